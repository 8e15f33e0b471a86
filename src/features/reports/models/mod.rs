mod report;

pub use report::{CreateReport, Report, ReportCategory};
