mod labels;
mod record;
mod sample;
mod snapshot;
mod timestamp;

pub use labels::*;
pub use record::*;
pub use sample::*;
pub use snapshot::*;
pub use timestamp::*;

pub type MetricName = String;
