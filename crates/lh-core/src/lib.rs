//! Lakehouse core: bronze sample generation and DuckDB inspection.
//!
//! - [`generate`] fabricates users, events, subscriptions, and invoices and
//!   writes them as partitioned Parquet files.
//! - [`inspect`] lists the tables and views of a DuckDB file and counts
//!   their rows.

pub mod error;
pub mod exit_codes;
pub mod generate;
pub mod inspect;
pub mod logging;

pub use error::CoreError;
pub use exit_codes::ExitCode;
