//! Core data model: traces, lap times, and session selectors

pub mod lap_time;
pub mod session;
pub mod trace;

pub use lap_time::{LapTime, format_lap_time};
pub use session::{RankedResult, SessionKey, SessionKind};
pub use trace::{Trace, TraceSample};
