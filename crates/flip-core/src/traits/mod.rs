//! Trait definitions shared across the workspace.

mod indicator;

pub use indicator::{Indicator, MultiOutputIndicator};
