//! Domain types for the scoring engine.

pub mod bar;
pub mod series;

pub use bar::Bar;
pub use series::{latest, Series};
