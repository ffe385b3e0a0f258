#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sloan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod buckets;
pub mod error;
pub mod frame;
pub mod periods;
pub mod report;

pub use buckets::Weighting;
pub use error::{DataError, Result};
pub use frame::build_returns_frame;
pub use periods::{Decade, PeriodWindow};
pub use report::{MonthlySections, RawRow, ReportLayout, SectionMapping};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
