//! Version resolver adapters.

mod caching;
mod static_map;

pub use caching::CachingVersionResolver;
pub use static_map::StaticVersionResolver;
