// File-based adapters behind the pipeline's input and output ports

pub mod csv_input;
pub mod csv_output;
pub mod report_output;

pub use csv_input::read_raw_records;
pub use csv_output::CsvDatasetWriter;
pub use report_output::JsonSummaryWriter;
