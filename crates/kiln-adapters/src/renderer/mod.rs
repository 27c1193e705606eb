//! Result renderers.

mod standard;

pub use standard::{ModelFormat, StandardRenderer};
