//! Field normalizers: raw text to typed values, never failing.

pub mod date;
pub mod numeric;

pub use date::{normalize_date, parse_collect_date};
pub use numeric::{normalize_numeric, parse_numeric};
