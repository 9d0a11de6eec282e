//! Query a Prometheus metrics endpoint by selector, for use in tests.
//!
//! ```no_run
//! use promprobe::Probe;
//!
//! # fn main() -> promprobe::error::Result<()> {
//! let probe = Probe::new("http://127.0.0.1:9187/metrics");
//! probe.expect_value("table_rows{db=\"app\",table_name=\"users\"}", 3)?;
//! let prod = probe.query("cpu{env=prod}")?;
//! # Ok(())
//! # }
//! ```

pub mod cliopt;
pub mod error;
pub mod format;
pub mod input;
pub mod model;
pub mod parser;
pub mod query;

pub use parser::parse_selector;
pub use query::{Expected, Probe};
