pub mod report_handler;

pub use report_handler::{delete_report, list_reports, submit_report};
