//! Testing utilities shared by the integration suites
//!
//! - **[`temp`]**: self-cleaning temporary directories for database and
//!   blob-storage fixtures

pub mod temp;

pub use temp::TempDir;
