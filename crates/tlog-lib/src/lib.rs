pub mod error;
pub mod io;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod trial;

pub use error::ReportError;
pub use pipeline::{process, run, JobFile, ReportPaths};
pub use report::{write_report, Report};
pub use trial::*;
