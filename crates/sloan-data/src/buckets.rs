//! Portfolio bucket schema for accrual-sorted tables.
//!
//! The source report carries 15 portfolio columns per row: five accrual
//! quintiles followed by ten accrual deciles. Column order is fixed and
//! shared by the value-weighted and equal-weighted tables.

use derive_more::Display;
use serde::Serialize;

/// Name of the calendar-month column.
pub const DATE: &str = "Date";

/// Lowest accrual decile.
pub const LO10: &str = "Lo10";

/// Highest accrual decile.
pub const HI10: &str = "Hi10";

/// Derived long-short column, `Hi10 - Lo10`.
pub const SPREAD: &str = "Spread";

/// Quintile bucket columns in report order.
pub const QUINTILES: [&str; 5] = ["Lo20", "Qnt2", "Qnt3", "Qnt4", "Hi20"];

/// Decile bucket columns in report order.
pub const DECILES: [&str; 10] = [
    "Lo10", "Dec2", "Dec3", "Dec4", "Dec5", "Dec6", "Dec7", "Dec8", "Dec9", "Hi10",
];

/// All 15 return columns in report order (quintiles then deciles).
pub const RETURN_COLUMNS: [&str; 15] = [
    "Lo20", "Qnt2", "Qnt3", "Qnt4", "Hi20", "Lo10", "Dec2", "Dec3", "Dec4", "Dec5", "Dec6",
    "Dec7", "Dec8", "Dec9", "Hi10",
];

/// Number of whitespace-separated fields a data row must carry
/// (calendar month plus 15 returns).
pub const FIELDS_PER_ROW: usize = 1 + RETURN_COLUMNS.len();

/// The 11 columns tracked by the summary statistics: the ten deciles plus
/// the derived spread.
pub fn tracked_columns() -> Vec<&'static str> {
    let mut cols: Vec<&'static str> = DECILES.to_vec();
    cols.push(SPREAD);
    cols
}

/// How firm-level returns were aggregated into portfolio returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Weighting {
    /// Market-capitalization weighted.
    #[display("Value-Weighted")]
    ValueWeighted,

    /// Simple average across firms.
    #[display("Equal-Weighted")]
    EqualWeighted,
}

impl Weighting {
    /// File-name slug for outputs belonging to this weighting scheme.
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::ValueWeighted => "value_weighted",
            Self::EqualWeighted => "equal_weighted",
        }
    }

    /// Short code used in the exported CSV file names.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ValueWeighted => "vw",
            Self::EqualWeighted => "ew",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order() {
        assert_eq!(RETURN_COLUMNS[..5], QUINTILES);
        assert_eq!(RETURN_COLUMNS[5..], DECILES);
        assert_eq!(FIELDS_PER_ROW, 16);
    }

    #[test]
    fn test_tracked_columns() {
        let cols = tracked_columns();
        assert_eq!(cols.len(), 11);
        assert_eq!(cols[0], LO10);
        assert_eq!(cols[9], HI10);
        assert_eq!(cols[10], SPREAD);
    }

    #[test]
    fn test_weighting_labels() {
        assert_eq!(Weighting::ValueWeighted.to_string(), "Value-Weighted");
        assert_eq!(Weighting::EqualWeighted.slug(), "equal_weighted");
        assert_eq!(Weighting::ValueWeighted.code(), "vw");
    }
}
