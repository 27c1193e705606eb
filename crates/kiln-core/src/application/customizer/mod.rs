//! Customizers: independent, conditionally activated rules that rewrite a
//! generation target.
//!
//! A [`Customizer`] declares three things:
//!
//! - an activation [`Condition`], evaluated once against the original
//!   request before anything runs
//! - an order; lower runs first, ties keep registration order
//! - `customize`, which mutates the target and sees every earlier mutation
//!
//! The same [`Pipeline`] engine drives the build model, the compose file,
//! and the test service connections.

pub mod build;
pub mod compose;
pub mod context;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod testing;

pub use context::GenerationContext;
pub use pipeline::Pipeline;

use crate::domain::Condition;
use crate::error::KilnResult;

/// Runs first.
pub const HIGHEST_PRECEDENCE: i32 = i32::MIN;
/// Runs last. Reserved for terminal bookkeeping.
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;
pub const DEFAULT_ORDER: i32 = 0;
/// For cleanup rules that must see the otherwise finished model.
pub const CLEANUP_ORDER: i32 = LOWEST_PRECEDENCE - 5;

pub trait Customizer<T>: Send + Sync {
    fn name(&self) -> &str;

    fn activation(&self) -> Condition {
        Condition::Always
    }

    fn order(&self) -> i32 {
        DEFAULT_ORDER
    }

    fn customize(&self, target: &mut T, ctx: &GenerationContext<'_>) -> KilnResult<()>;
}
