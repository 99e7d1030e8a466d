//! Highlight aggregation over a forecast dataset.
//!
//! Selects a window of forecast days, ranks every half-day slot that clears
//! the qualifying threshold, tracks the best slot per region group and
//! labels the window with a `<m>月<d>日—<m>月<d>日` date range.

pub mod aggregate;
pub mod config;
pub mod types;
pub mod window;

pub use aggregate::{build_summary, build_summary_with};
pub use config::SummaryConfig;
pub use types::{GroupBest, GroupOverview, Highlight, Summary};
