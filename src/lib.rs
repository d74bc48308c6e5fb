// Crate root library declaration and module exports.
pub mod cli;
pub mod color_utils;
pub mod config;
pub mod context;
pub mod dates;
pub mod error;
pub mod loader;
pub mod model;
pub mod period;

pub use dates::{easter_sunday, first_day_of_iso_week, nth_weekday_of_month};
pub use error::{DateError, LineError, LoadError, RuleError};
pub use loader::{EventLoader, LoadReport, load_events};
pub use model::{Category, DateRule, Event};
