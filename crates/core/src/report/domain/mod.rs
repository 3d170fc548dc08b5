pub mod report_row;
pub mod report_writer;
