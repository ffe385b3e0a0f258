//! Locating and extracting the monthly return tables from the source report.
//!
//! The French-library accruals report contains two monthly tables that both
//! carry the header `Value Weighted Returns -- Monthly`; the second
//! occurrence is in fact the equal-weighted table (a labeling defect in the
//! source file). Sections are therefore classified by occurrence ordinal
//! through an explicit [`SectionMapping`] rather than by the header text.

use crate::buckets::FIELDS_PER_ROW;
use crate::error::{DataError, Result};

/// Header line shared by both monthly return tables.
pub const MONTHLY_SECTION_HEADER: &str = "Value Weighted Returns -- Monthly";

/// Physical layout of the source report.
#[derive(Debug, Clone)]
pub struct ReportLayout {
    /// Section header to scan for.
    pub header: String,

    /// Lines to skip after a header before data rows begin (the repeated
    /// title line and the column-header line).
    pub header_skip: usize,

    /// Upper bound on lines scanned for the final section, which has no
    /// following header to terminate it. The monthly sample runs to about
    /// 750 rows; lines past the bound belong to the annual tables.
    pub max_section_lines: usize,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            header: MONTHLY_SECTION_HEADER.to_string(),
            header_skip: 2,
            max_section_lines: 750,
        }
    }
}

/// Mapping from header occurrence ordinal to weighting scheme.
///
/// Occurrence 0 is the value-weighted table and occurrence 1 the
/// (mislabeled) equal-weighted table in the published report.
#[derive(Debug, Clone)]
pub struct SectionMapping {
    /// Ordinal of the value-weighted section.
    pub value_weighted: usize,

    /// Ordinal of the equal-weighted section.
    pub equal_weighted: usize,
}

impl Default for SectionMapping {
    fn default() -> Self {
        Self {
            value_weighted: 0,
            equal_weighted: 1,
        }
    }
}

/// One whitespace-split data row: calendar month plus 15 return fields,
/// still in their source string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Month field in `YYYYMM` form.
    pub month: String,

    /// The 15 portfolio return fields in report order.
    pub returns: Vec<String>,
}

/// Raw rows of the two monthly tables.
#[derive(Debug, Clone)]
pub struct MonthlySections {
    /// Rows of the value-weighted table.
    pub value_weighted: Vec<RawRow>,

    /// Rows of the equal-weighted table.
    pub equal_weighted: Vec<RawRow>,
}

/// Line offsets of every occurrence of `header` in `lines`.
pub fn locate_sections(lines: &[&str], header: &str) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| line.contains(header).then_some(i))
        .collect()
}

/// Extract the value-weighted and equal-weighted monthly tables from the
/// report text.
///
/// # Errors
///
/// Returns [`DataError::SectionNotFound`] when the report does not contain
/// enough occurrences of the section header to satisfy `mapping`.
pub fn extract_monthly_sections(
    text: &str,
    layout: &ReportLayout,
    mapping: &SectionMapping,
) -> Result<MonthlySections> {
    let lines: Vec<&str> = text.lines().collect();
    let offsets = locate_sections(&lines, &layout.header);

    let required = mapping.value_weighted.max(mapping.equal_weighted) + 1;
    if offsets.len() < required {
        return Err(DataError::SectionNotFound {
            header: layout.header.clone(),
            required,
            found: offsets.len(),
        });
    }

    log::info!(
        "located {} occurrence(s) of {:?} at lines {:?}",
        offsets.len(),
        layout.header,
        offsets
    );

    let value_weighted = extract_section(&lines, &offsets, mapping.value_weighted, layout);
    let equal_weighted = extract_section(&lines, &offsets, mapping.equal_weighted, layout);

    Ok(MonthlySections {
        value_weighted,
        equal_weighted,
    })
}

/// Rows of the section at `offsets[ordinal]`.
///
/// The scan window ends at the next header occurrence, or after
/// `max_section_lines` for the final section.
fn extract_section(
    lines: &[&str],
    offsets: &[usize],
    ordinal: usize,
    layout: &ReportLayout,
) -> Vec<RawRow> {
    let start = (offsets[ordinal] + layout.header_skip).min(lines.len());
    let end = offsets
        .get(ordinal + 1)
        .copied()
        .unwrap_or(start + layout.max_section_lines)
        .min(lines.len());

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for line in &lines[start..end.max(start)] {
        let line = line.trim();
        if line.is_empty() || line.starts_with("Value") || line.starts_with("Equal") {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < FIELDS_PER_ROW {
            // Lossy by design: short rows carry no usable month.
            dropped += 1;
            log::debug!("dropping short row ({} fields): {line:?}", fields.len());
            continue;
        }

        rows.push(RawRow {
            month: fields[0].to_string(),
            returns: fields[1..FIELDS_PER_ROW]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        });
    }

    log::info!(
        "section {ordinal}: kept {} row(s), dropped {dropped}",
        rows.len()
    );

    rows
}
