pub mod report_writer;
pub mod serial_source;
pub mod template_merger;

pub use report_writer::ReportWriter;
