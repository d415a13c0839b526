pub mod carnot;
pub mod config;
pub mod error;
pub mod logging;

#[cfg(feature = "python")]
pub mod python;
#[cfg(feature = "python")]
pub mod ser;

pub use carnot::{CarnotCycle, CarnotReport, Stroke};
pub use config::CycleConfig;
pub use error::SimError;
pub use logging::{CycleLogger, StrokeRecord};
