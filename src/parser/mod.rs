pub mod ast;
mod duration;
mod label_set;
mod result;
mod selector;

pub use duration::parse_duration;
pub use label_set::parse_label_set;
pub use selector::parse_selector;
