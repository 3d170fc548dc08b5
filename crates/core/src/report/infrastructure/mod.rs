pub mod csv_report_writer;
