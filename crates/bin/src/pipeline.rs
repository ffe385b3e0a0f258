//! Batch pipeline: parse, build tables, compute statistics, write outputs.
//!
//! The stages run strictly in sequence over in-memory tables; each
//! weighting scheme gets the same treatment.

use polars::prelude::DataFrame;
use sloan_data::buckets::Weighting;
use sloan_data::frame::build_returns_frame;
use sloan_data::periods;
use sloan_data::report::{ReportLayout, SectionMapping, extract_monthly_sections};
use sloan_output::chart::{self, ChartStyle};
use sloan_output::export::{self, ExportFormat};
use sloan_output::seasonal::{GrowthSummary, JanuaryEffect};
use sloan_output::subperiod::{self, SubPeriodReport};
use sloan_output::summary::{SpreadSignStats, SummaryStatistics};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Injected run configuration.
#[derive(Debug)]
pub struct AnalysisConfig {
    /// Path of the source report.
    pub report_path: PathBuf,

    /// Directory receiving all file outputs.
    pub output_dir: PathBuf,

    /// Whether to render the SVG charts.
    pub charts: bool,
}

/// Run the full analysis over both weighting schemes.
pub fn run_analysis(config: &AnalysisConfig) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&config.output_dir)?;
    let tables = load_tables(&config.report_path)?;

    banner("ACCRUAL PORTFOLIO ANALYSIS");
    for (weighting, df) in &tables {
        log::info!("{weighting} table: {} monthly rows", df.height());
        let path = monthly_csv_path(&config.output_dir, *weighting);
        export::write_returns_csv(df, &path)?;
        println!("Wrote {}", path.display());
    }

    banner("1. SUMMARY STATISTICS FOR FULL SAMPLE");
    for (weighting, df) in &tables {
        let summary = SummaryStatistics::compute(df, *weighting)?;
        print!("{summary}");

        let path = config
            .output_dir
            .join(format!("{}_summary.json", weighting.slug()));
        export::write_summary(&summary, ExportFormat::PrettyJson, &path)?;
    }

    banner("2. SUB-PERIOD ANALYSIS");
    for (weighting, df) in &tables {
        print!("{}", SubPeriodReport::compute(df, *weighting)?);
    }

    banner("3. SPREAD BEHAVIOR AND CHARTS");
    let style = ChartStyle::default();
    for (weighting, df) in &tables {
        let filtered = subperiod::filter_from(df, periods::subperiod_start())?;

        let signs = SpreadSignStats::compute(&filtered)?;
        println!("\n{weighting} spread portfolio:");
        println!("{signs}");

        if config.charts {
            let slug = weighting.slug();
            chart::render_decile_chart(
                &filtered,
                *weighting,
                &style,
                &config.output_dir.join(format!("{slug}_decile_returns.svg")),
            )?;
            chart::render_spread_chart(
                &filtered,
                *weighting,
                &style,
                &config.output_dir.join(format!("{slug}_spread_returns.svg")),
            )?;
        }
    }

    banner("4. SEASONAL AND CUMULATIVE ANALYSIS");
    for (weighting, df) in &tables {
        let filtered = subperiod::filter_from(df, periods::subperiod_start())?;

        print!("{}", JanuaryEffect::compute(&filtered, *weighting)?);

        let growth = GrowthSummary::compute(&filtered, *weighting)?;
        println!("\n{growth}");

        if config.charts {
            let path = config
                .output_dir
                .join(format!("{}_cumulative_returns.svg", weighting.slug()));
            chart::render_cumulative_chart(&growth, &style, &path)?;
        }
    }

    banner("ANALYSIS COMPLETE");
    println!("Outputs written to {}", config.output_dir.display());
    Ok(())
}

/// Parse the report and export the two monthly tables as CSV.
pub fn run_extract(report: &Path, output_dir: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(output_dir)?;

    for (weighting, df) in load_tables(report)? {
        let path = monthly_csv_path(output_dir, weighting);
        export::write_returns_csv(&df, &path)?;
        println!(
            "Wrote {} ({} monthly rows)",
            path.display(),
            df.height()
        );
    }

    Ok(())
}

fn load_tables(path: &Path) -> Result<[(Weighting, DataFrame); 2], Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let sections =
        extract_monthly_sections(&text, &ReportLayout::default(), &SectionMapping::default())?;

    Ok([
        (
            Weighting::ValueWeighted,
            build_returns_frame(&sections.value_weighted)?,
        ),
        (
            Weighting::EqualWeighted,
            build_returns_frame(&sections.equal_weighted)?,
        ),
    ])
}

fn monthly_csv_path(output_dir: &Path, weighting: Weighting) -> PathBuf {
    output_dir.join(format!("accrual_{}_monthly.csv", weighting.code()))
}

fn banner(title: &str) {
    println!("\n{}", "=".repeat(80));
    println!("{title}");
    println!("{}", "=".repeat(80));
}
