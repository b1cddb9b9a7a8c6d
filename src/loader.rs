pub mod csv_parser;
pub mod parser;
pub mod time_zone;
