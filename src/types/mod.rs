mod line;
mod record;

pub use line::{classify, normalize_data_line, Classification, RawLine};
pub use record::OutputRecord;
