pub mod combine;
pub mod numstat;

pub use combine::combine;
pub use numstat::{analyze, parse_log, NumstatParser};
