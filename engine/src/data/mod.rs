pub mod csv_parser;
pub mod market_data;
pub mod provider;
pub mod resample;
