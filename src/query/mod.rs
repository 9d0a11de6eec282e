mod expect;
mod matcher;
mod probe;

pub use expect::Expected;
pub use matcher::{labels_match, select};
pub use probe::Probe;
