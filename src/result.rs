use crate::error::Error as FetchErr;
/// Result type returned by fallible operations of this crate.
pub type Result<T> = std::result::Result<T, FetchErr>;
