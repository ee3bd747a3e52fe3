pub mod fields;
pub mod records;
pub mod sort;
pub mod units;
