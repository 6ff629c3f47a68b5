//! Time handling
//!
//! Timestamps are epoch milliseconds carried as `f64` so that parse
//! failures can travel as NaN instead of aborting a layout pass. The
//! current time is an explicit [`Clock`] dependency, never an implicit
//! system read: ongoing events substitute "now" for their missing end
//! bound, and that substitution must be reproducible in tests.

pub mod clock;
pub mod parse;

pub use clock::{Clock, FixedClock, SystemClock};
pub use parse::parse_timestamp_ms;
