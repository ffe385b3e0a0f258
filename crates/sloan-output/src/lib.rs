#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sloan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chart;
pub mod export;
pub mod seasonal;
pub mod subperiod;
pub mod summary;

pub use chart::{ChartError, ChartStyle};
pub use export::{ExportError, ExportFormat};
pub use seasonal::{GrowthSummary, JanuaryEffect, SeasonalMeans};
pub use subperiod::{SubPeriodReport, SubPeriodRow};
pub use summary::{SpreadSignStats, SummaryRecord, SummaryStatistics};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
