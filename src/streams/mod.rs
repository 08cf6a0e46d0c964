mod csv_column;
pub mod generators;
mod stream;

pub use csv_column::{CsvColumnStream, MAX_ROUND_DECIMALS};
pub use stream::{Sample, SampleStream};
