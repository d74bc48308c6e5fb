// File: ./src/model/mod.rs
pub mod item;
pub mod parser;
pub mod resolver;
pub mod tag;

pub use item::Event;
pub use parser::{DateRule, WeekendShift, classify};
pub use resolver::{ResolvedOccurrence, resolve};
pub use tag::{Category, Decoration, decorate};
