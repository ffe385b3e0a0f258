//! SVG time-series charts with recession shading.
//!
//! Charts are rendered by hand into standalone SVG documents. All visual
//! parameters travel in an explicit [`ChartStyle`] value; there is no
//! process-wide plotting state.

use crate::seasonal::GrowthSummary;
use chrono::{Datelike, NaiveDate};
use polars::prelude::DataFrame;
use sloan_data::DataError;
use sloan_data::buckets::{HI10, LO10, SPREAD, Weighting};
use sloan_data::frame::{column_values, month_dates};
use sloan_data::periods;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while rendering charts.
#[derive(Debug, Error)]
pub enum ChartError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Ingestion-layer error.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Nothing to draw.
    #[error("chart has no data points")]
    Empty,
}

/// Rendering configuration shared by all charts.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Canvas width in pixels.
    pub width: u32,

    /// Canvas height in pixels.
    pub height: u32,

    /// Inner margin between canvas edge and plot area.
    pub padding: f64,

    /// Stroke color of the low-accrual series.
    pub low_color: &'static str,

    /// Stroke color of the high-accrual series.
    pub high_color: &'static str,

    /// Stroke color of the spread series.
    pub spread_color: &'static str,

    /// Fill color of the recession bands.
    pub recession_fill: &'static str,

    /// Color of gridlines and guides.
    pub grid_color: &'static str,

    /// Stroke width of data lines.
    pub stroke_width: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 960,
            height: 360,
            padding: 48.0,
            low_color: "#348dc1",
            high_color: "#ff9933",
            spread_color: "#00008b",
            recession_fill: "#999999",
            grid_color: "#dddddd",
            stroke_width: 1.5,
        }
    }
}

/// Monthly returns of the low and high accrual deciles, in percent, with
/// recession bands.
pub fn render_decile_chart(
    df: &DataFrame,
    weighting: Weighting,
    style: &ChartStyle,
    path: &Path,
) -> Result<(), ChartError> {
    let dates = month_dates(df)?;
    if dates.is_empty() {
        return Err(ChartError::Empty);
    }
    let lo10 = percent(&column_values(df, LO10)?);
    let hi10 = percent(&column_values(df, HI10)?);

    let extent = extent(&[&lo10[..], &hi10[..]]).ok_or(ChartError::Empty)?;
    let xs = x_positions(dates.len(), style);

    let mut svg = svg_open(
        style,
        &format!("{weighting}: Monthly Returns, Low vs High Accrual Deciles"),
    );
    svg.push_str(&recession_bands(&dates, &xs, style));
    svg.push_str(&value_axis(&extent, "%", style));
    svg.push_str(&year_axis(&dates, &xs, style));
    if extent.contains(0.0) {
        svg.push_str(&guide_line(y_scale(0.0, &extent, style), style, false));
    }
    svg.push_str(&series_line(&xs, &lo10, &extent, style.low_color, style));
    svg.push_str(&series_line(&xs, &hi10, &extent, style.high_color, style));
    svg.push_str(&legend(
        &[
            ("Decile 1 (Low Accrual)", style.low_color),
            ("Decile 10 (High Accrual)", style.high_color),
        ],
        style,
    ));
    svg.push_str(SVG_FOOTER);

    std::fs::write(path, svg)?;
    log::info!("wrote decile chart to {}", path.display());
    Ok(())
}

/// Monthly spread returns, in percent, with a dashed zero guide and
/// recession bands.
pub fn render_spread_chart(
    df: &DataFrame,
    weighting: Weighting,
    style: &ChartStyle,
    path: &Path,
) -> Result<(), ChartError> {
    let dates = month_dates(df)?;
    if dates.is_empty() {
        return Err(ChartError::Empty);
    }
    let spread = percent(&column_values(df, SPREAD)?);

    let extent = extent(&[&spread[..]]).ok_or(ChartError::Empty)?;
    let xs = x_positions(dates.len(), style);

    let mut svg = svg_open(
        style,
        &format!("{weighting}: Spread Portfolio Returns (High minus Low Accrual)"),
    );
    svg.push_str(&recession_bands(&dates, &xs, style));
    svg.push_str(&value_axis(&extent, "%", style));
    svg.push_str(&year_axis(&dates, &xs, style));
    if extent.contains(0.0) {
        svg.push_str(&guide_line(y_scale(0.0, &extent, style), style, true));
    }
    svg.push_str(&series_line(&xs, &spread, &extent, style.spread_color, style));
    svg.push_str(&legend(&[("Spread (Hi10 - Lo10)", style.spread_color)], style));
    svg.push_str(SVG_FOOTER);

    std::fs::write(path, svg)?;
    log::info!("wrote spread chart to {}", path.display());
    Ok(())
}

/// Log-scale growth of $1 for the low and high accrual deciles, with
/// power-of-ten gridlines.
pub fn render_cumulative_chart(
    growth: &GrowthSummary,
    style: &ChartStyle,
    path: &Path,
) -> Result<(), ChartError> {
    if growth.dates.is_empty() {
        return Err(ChartError::Empty);
    }

    let lo10 = log10_series(&growth.lo10);
    let hi10 = log10_series(&growth.hi10);
    let extent = extent(&[&lo10[..], &hi10[..]]).ok_or(ChartError::Empty)?;
    let xs = x_positions(growth.dates.len(), style);

    let mut svg = svg_open(
        style,
        &format!("{}: Cumulative Growth of $1 (log scale)", growth.weighting),
    );

    // Gridlines at powers of ten across the data range.
    let mut decade_exp = extent.min.floor() as i64;
    while (decade_exp as f64) <= extent.max {
        let y = y_scale(decade_exp as f64, &extent, style);
        svg.push_str(&guide_line(y, style, false));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">${value}</text>"#,
            x = style.padding - 6.0,
            y = y + 3.0,
            value = format_power_of_ten(decade_exp),
        ));
        decade_exp += 1;
    }

    svg.push_str(&year_axis(&growth.dates, &xs, style));
    svg.push_str(&series_line(&xs, &lo10, &extent, style.low_color, style));
    svg.push_str(&series_line(&xs, &hi10, &extent, style.high_color, style));
    svg.push_str(&legend(
        &[
            ("Low Accrual", style.low_color),
            ("High Accrual", style.high_color),
        ],
        style,
    ));
    svg.push_str(SVG_FOOTER);

    std::fs::write(path, svg)?;
    log::info!("wrote cumulative chart to {}", path.display());
    Ok(())
}

const SVG_FOOTER: &str = "</svg>";

#[derive(Debug, Clone, Copy)]
struct Extent {
    min: f64,
    max: f64,
}

impl Extent {
    fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

fn svg_open(style: &ChartStyle, title: &str) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#666}}</style>"#,
        w = style.width,
        h = style.height,
    );
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="18" text-anchor="middle" style="font-size:13px;fill:#333">{title}</text>"#,
        x = f64::from(style.width) / 2.0,
        title = title,
    ));
    svg
}

fn percent(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v * 100.0).collect()
}

fn log10_series(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .map(|v| if *v > 0.0 { v.log10() } else { f64::NAN })
        .collect()
}

fn extent(series: &[&[f64]]) -> Option<Extent> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for values in series {
        for v in values.iter().copied().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    if min == max {
        // Flat series still needs a non-degenerate scale.
        min -= 1.0;
        max += 1.0;
    }
    Some(Extent { min, max })
}

fn x_positions(len: usize, style: &ChartStyle) -> Vec<f64> {
    let width = f64::from(style.width);
    if len == 0 {
        return Vec::new();
    }
    if len == 1 {
        return vec![width / 2.0];
    }

    let inner_width = width - 2.0 * style.padding;
    (0..len)
        .map(|i| style.padding + inner_width * (i as f64 / (len - 1) as f64))
        .collect()
}

fn y_scale(value: f64, extent: &Extent, style: &ChartStyle) -> f64 {
    let inner_height = f64::from(style.height) - 2.0 * style.padding;
    let norm = (value - extent.min) / (extent.max - extent.min);
    style.padding + (1.0 - norm) * inner_height
}

/// Polyline for one series, split into segments around missing points.
fn series_line(
    xs: &[f64],
    values: &[f64],
    extent: &Extent,
    color: &str,
    style: &ChartStyle,
) -> String {
    let mut svg = String::new();
    let mut segment: Vec<(f64, f64)> = Vec::new();

    for (x, v) in xs.iter().zip(values) {
        if v.is_finite() {
            segment.push((*x, y_scale(*v, extent, style)));
        } else if !segment.is_empty() {
            svg.push_str(&polyline(&segment, color, style.stroke_width));
            segment.clear();
        }
    }
    if !segment.is_empty() {
        svg.push_str(&polyline(&segment, color, style.stroke_width));
    }

    svg
}

fn polyline(points: &[(f64, f64)], stroke: &str, stroke_width: f64) -> String {
    if points.is_empty() {
        return String::new();
    }

    let coords: String = points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"<polyline fill="none" stroke="{stroke}" stroke-width="{stroke_width}" points="{coords}" />"#,
    )
}

fn guide_line(y: f64, style: &ChartStyle, dashed: bool) -> String {
    let dash = if dashed {
        r#" stroke-dasharray="4 3""#
    } else {
        ""
    };
    format!(
        r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="1"{dash} />"##,
        x1 = style.padding,
        x2 = f64::from(style.width) - style.padding,
        color = style.grid_color,
    )
}

/// Shaded band for every recession window overlapping the plotted range.
fn recession_bands(dates: &[NaiveDate], xs: &[f64], style: &ChartStyle) -> String {
    let mut svg = String::new();

    for window in periods::nber_recessions() {
        let first = dates.iter().position(|d| *d >= window.start);
        let last = dates.iter().rposition(|d| *d <= window.end);

        if let (Some(first), Some(last)) = (first, last) {
            if first > last {
                continue;
            }
            svg.push_str(&format!(
                r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{fill}" fill-opacity="0.25" />"#,
                x = xs[first],
                y = style.padding,
                w = (xs[last] - xs[first]).max(1.0),
                h = f64::from(style.height) - 2.0 * style.padding,
                fill = style.recession_fill,
            ));
        }
    }

    svg
}

/// Baseline plus a tick and year label at every decade start.
fn year_axis(dates: &[NaiveDate], xs: &[f64], style: &ChartStyle) -> String {
    let axis_y = f64::from(style.height) - style.padding + 5.0;
    let mut svg = format!(
        r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#000" stroke-width="1" />"##,
        x1 = style.padding,
        x2 = f64::from(style.width) - style.padding,
        y = axis_y,
    );

    for (idx, date) in dates.iter().enumerate() {
        if date.month() != 1 || date.year() % 10 != 0 {
            continue;
        }
        let x = xs[idx];
        svg.push_str(&format!(
            r##"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="#ccc" stroke-width="1" />"##,
            y1 = axis_y,
            y2 = axis_y + 4.0,
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{year}</text>"#,
            y = axis_y + 16.0,
            year = date.year(),
        ));
    }

    svg
}

/// Left-hand labels at the extent bounds and zero.
fn value_axis(extent: &Extent, unit: &str, style: &ChartStyle) -> String {
    let mut ticks = vec![extent.min, extent.max];
    if extent.contains(0.0) {
        ticks.push(0.0);
    }

    let mut svg = String::new();
    for tick in ticks {
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{tick:.0}{unit}</text>"#,
            x = style.padding - 6.0,
            y = y_scale(tick, extent, style) + 3.0,
        ));
    }
    svg
}

fn format_power_of_ten(exp: i64) -> String {
    if exp >= 0 {
        format!("{}", 10f64.powi(exp as i32) as i64)
    } else {
        format!("{}", 10f64.powi(exp as i32))
    }
}

fn legend(entries: &[(&str, &str)], style: &ChartStyle) -> String {
    let mut svg = String::new();
    let mut y = style.padding + 6.0;

    for (label, color) in entries {
        svg.push_str(&format!(
            r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="2" />"##,
            x1 = style.padding + 8.0,
            x2 = style.padding + 30.0,
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{ty:.2}">{label}</text>"#,
            x = style.padding + 36.0,
            ty = y + 3.0,
        ));
        y += 14.0;
    }

    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use sloan_data::build_returns_frame;
    use sloan_data::report::RawRow;

    fn month_row(month: &str, lo: f64, hi: f64) -> RawRow {
        let mut returns = vec!["0.0".to_string(); 15];
        returns[5] = lo.to_string();
        returns[14] = hi.to_string();
        RawRow {
            month: month.to_string(),
            returns,
        }
    }

    fn fixture_frame() -> DataFrame {
        build_returns_frame(&[
            month_row("196912", 1.0, 2.0),
            month_row("197001", -1.0, 3.0),
            month_row("197002", 2.0, -2.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_decile_chart_contains_series_and_bands() {
        let dir = std::env::temp_dir().join("sloan-chart-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("deciles.svg");

        render_decile_chart(
            &fixture_frame(),
            Weighting::ValueWeighted,
            &ChartStyle::default(),
            &path,
        )
        .unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Low vs High"));
        // 1969-12 through 1970-02 sit inside the 1969-70 recession.
        assert!(svg.contains("<rect"));
        assert_eq!(svg.matches("<polyline").count(), 2);
    }

    #[test]
    fn test_spread_chart_has_dashed_zero_guide() {
        let dir = std::env::temp_dir().join("sloan-chart-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("spread.svg");

        render_spread_chart(
            &fixture_frame(),
            Weighting::EqualWeighted,
            &ChartStyle::default(),
            &path,
        )
        .unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("Spread"));
    }

    #[test]
    fn test_cumulative_chart_log_gridlines() {
        let dates: Vec<NaiveDate> = (0..3)
            .map(|i| NaiveDate::from_ymd_opt(1970, i + 1, 1).unwrap())
            .collect();
        let growth = GrowthSummary {
            weighting: Weighting::ValueWeighted,
            dates,
            lo10: vec![1.0, 10.0, 100.0],
            hi10: vec![1.0, 2.0, 4.0],
            spread: vec![1.0, 1.0, 1.0],
        };

        let dir = std::env::temp_dir().join("sloan-chart-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cumulative.svg");

        render_cumulative_chart(&growth, &ChartStyle::default(), &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("$1<"));
        assert!(svg.contains("$100"));
    }

    #[test]
    fn test_empty_frame_is_an_error() {
        let df = build_returns_frame(&[]).unwrap();
        let dir = std::env::temp_dir().join("sloan-chart-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("empty.svg");

        assert!(matches!(
            render_decile_chart(&df, Weighting::ValueWeighted, &ChartStyle::default(), &path),
            Err(ChartError::Empty)
        ));
    }
}
