//! The customizer execution engine.

use tracing::{debug, instrument, warn};

use crate::application::ApplicationError;
use crate::application::customizer::{Customizer, GenerationContext};
use crate::error::KilnResult;

/// Ordered customizers for one target type.
pub struct Pipeline<T> {
    label: &'static str,
    customizers: Vec<Box<dyn Customizer<T>>>,
}

impl<T> Pipeline<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            customizers: Vec::new(),
        }
    }

    /// Append a customizer. Registration order breaks order ties.
    pub fn register(mut self, customizer: impl Customizer<T> + 'static) -> Self {
        self.customizers.push(Box::new(customizer));
        self
    }

    pub fn push(&mut self, customizer: Box<dyn Customizer<T>>) {
        self.customizers.push(customizer);
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn len(&self) -> usize {
        self.customizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customizers.is_empty()
    }

    /// Activated customizers in execution order.
    ///
    /// Activation is decided here, once, before anything runs.
    pub fn activated(&self, ctx: &GenerationContext<'_>) -> Vec<&dyn Customizer<T>> {
        let mut active: Vec<&dyn Customizer<T>> = self
            .customizers
            .iter()
            .filter(|c| c.activation().evaluate(ctx))
            .map(|c| &**c)
            .collect();
        // Stable: equal orders keep registration order.
        active.sort_by_key(|c| c.order());
        active
    }

    /// Apply every activated customizer to `target`.
    ///
    /// Returns the names of the customizers that ran.
    ///
    /// # Errors
    ///
    /// The first failure stops the run and is reported as
    /// [`ApplicationError::CustomizationFailed`] naming the customizer.
    #[instrument(skip_all, fields(pipeline = self.label))]
    pub fn run(&self, target: &mut T, ctx: &GenerationContext<'_>) -> KilnResult<Vec<String>> {
        let active = self.activated(ctx);
        debug!(
            registered = self.customizers.len(),
            activated = active.len(),
            "running pipeline"
        );

        let mut applied = Vec::with_capacity(active.len());
        for customizer in active {
            debug!(customizer = customizer.name(), order = customizer.order(), "applying");
            if let Err(e) = customizer.customize(target, ctx) {
                warn!(customizer = customizer.name(), error = %e, "customizer failed");
                return Err(ApplicationError::customization_failed(customizer.name(), e).into());
            }
            applied.push(customizer.name().to_string());
        }
        Ok(applied)
    }
}
