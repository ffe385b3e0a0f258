//! Integration tests for the analysis and reporting workflow.

use approx::assert_relative_eq;
use sloan_data::Weighting;
use sloan_data::build_returns_frame;
use sloan_data::report::{RawRow, ReportLayout, SectionMapping, extract_monthly_sections};
use sloan_output::export::{ExportFormat, write_returns_csv, write_summary};
use sloan_output::subperiod::SubPeriodReport;
use sloan_output::summary::{SpreadSignStats, SummaryStatistics};

fn month_row(month: &str, lo: f64, hi: f64) -> RawRow {
    let mut returns = vec!["0.1".to_string(); 15];
    returns[5] = lo.to_string();
    returns[14] = hi.to_string();
    RawRow {
        month: month.to_string(),
        returns,
    }
}

#[test]
fn test_full_summary_workflow() {
    // Lo10 = [1.0, -2.0, 3.0]%, Hi10 = [4.0, 1.0, -1.0]%.
    let df = build_returns_frame(&[
        month_row("196001", 1.0, 4.0),
        month_row("196002", -2.0, 1.0),
        month_row("196003", 3.0, -1.0),
    ])
    .unwrap();

    let summary = SummaryStatistics::compute(&df, Weighting::ValueWeighted).unwrap();
    let spread = summary
        .records
        .iter()
        .find(|r| r.portfolio == "Spread")
        .unwrap();

    // Monthly mean 0.0066667 -> 8% annualized.
    assert_relative_eq!(spread.mean, 0.08, epsilon = 1e-9);
    assert_relative_eq!(summary.spread_t_stat, 2.0 / 7.0, epsilon = 1e-9);

    let signs = SpreadSignStats::compute(&df).unwrap();
    assert_eq!(signs.negative, 1);
    assert_eq!(signs.total, 3);
    assert_relative_eq!(signs.pct_negative(), 33.333_333, epsilon = 1e-3);

    // The rendered table carries every tracked portfolio.
    let table = summary.to_ascii_table();
    for name in ["Lo10", "Dec5", "Hi10", "Spread"] {
        assert!(table.contains(name), "missing {name} in table");
    }
}

#[test]
fn test_subperiod_buckets_against_recession_calendar() {
    // Six months straddling the 1980 recession (1980-01 .. 1980-07).
    let df = build_returns_frame(&[
        month_row("197912", 1.0, 1.0),
        month_row("198001", 1.0, 2.0),
        month_row("198007", 1.0, 2.0),
        month_row("198008", 1.0, 0.0),
        month_row("198101", 2.0, 2.0),
        month_row("201001", 3.0, 3.0),
    ])
    .unwrap();

    let report = SubPeriodReport::compute(&df, Weighting::EqualWeighted).unwrap();

    let by_label = |label: &str| report.rows.iter().find(|r| r.period == label).unwrap();

    // 1980-01 and 1980-07 are recession months, inclusive of the end.
    assert_eq!(by_label("Recessions").months, 2);
    assert_eq!(by_label("Expansions").months, 4);
    assert_eq!(by_label("1970s").months, 1);
    assert_eq!(by_label("1980s").months, 4);
    assert_eq!(by_label("2010s").months, 1);
    assert_eq!(by_label("1990s").months, 0);

    // Recession spread: 1% both months -> 12% annualized, zero variance t.
    assert_relative_eq!(by_label("Recessions").spread, 0.12, epsilon = 1e-9);
    assert!(by_label("Recessions").spread_t_stat.is_nan());
}

#[test]
fn test_parse_to_export_round_trip() {
    let report_text = "\
  Value Weighted Returns -- Monthly
         Lo20  Qnt2  Qnt3  Qnt4  Hi20  Lo10  Dec2  Dec3  Dec4  Dec5  Dec6  Dec7  Dec8  Dec9  Hi10
196001   0.10  0.10  0.10  0.10  0.10  1.00  0.10  0.10  0.10  0.10  0.10  0.10  0.10  0.10  4.00
196002   0.10  0.10  0.10  0.10  0.10 -2.00  0.10  0.10  0.10  0.10  0.10  0.10  0.10  0.10  1.00

  Value Weighted Returns -- Monthly
         Lo20  Qnt2  Qnt3  Qnt4  Hi20  Lo10  Dec2  Dec3  Dec4  Dec5  Dec6  Dec7  Dec8  Dec9  Hi10
196001   0.10  0.10  0.10  0.10  0.10  2.00  0.10  0.10  0.10  0.10  0.10  0.10  0.10  0.10  3.00
";

    let sections = extract_monthly_sections(
        report_text,
        &ReportLayout::default(),
        &SectionMapping::default(),
    )
    .unwrap();

    let vw = build_returns_frame(&sections.value_weighted).unwrap();
    let ew = build_returns_frame(&sections.equal_weighted).unwrap();
    assert_eq!(vw.height(), 2);
    assert_eq!(ew.height(), 1);

    let dir = std::env::temp_dir().join("sloan-analysis-test");
    std::fs::create_dir_all(&dir).unwrap();

    let csv_path = dir.join("vw_monthly.csv");
    write_returns_csv(&vw, &csv_path).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("1960-01-01,0.001,"));

    let summary = SummaryStatistics::compute(&ew, Weighting::EqualWeighted).unwrap();
    let json_path = dir.join("ew_summary.json");
    write_summary(&summary, ExportFormat::PrettyJson, &json_path).unwrap();
    let json = std::fs::read_to_string(&json_path).unwrap();
    assert!(json.contains("\"EqualWeighted\""));
    assert!(json.contains("\"records\""));
}
