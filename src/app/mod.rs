//! Binary-side glue: progress display and terminal report.

pub(crate) mod progress_manager;
pub(crate) mod report;
