pub mod param_parser;
pub mod plot;
pub mod write_to_csv;
