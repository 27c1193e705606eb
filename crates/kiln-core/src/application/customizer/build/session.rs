//! Session store selection driven by the `session` marker.
//!
//! `session` is not a real dependency. It selects one of the store-specific
//! session modules and is removed once every rule has seen it.

use crate::application::customizer::{CLEANUP_ORDER, Customizer, GenerationContext};
use crate::domain::{Build, Condition, Dependency};
use crate::error::KilnResult;

pub const SESSION_MARKER: &str = "session";

const SESSION_GROUP: &str = "org.springframework.session";

/// Store dependency id → session module. First match wins.
const SESSION_STORES: &[(&str, &str)] = &[
    ("data-redis", "spring-session-data-redis"),
    ("jdbc", "spring-session-jdbc"),
    ("data-mongodb", "spring-session-data-mongodb"),
    ("hazelcast", "spring-session-hazelcast"),
];

pub struct SessionStoreCustomizer;

impl SessionStoreCustomizer {
    fn store_present(build: &Build, store: &str) -> bool {
        build.has_dependency(store) || build.has_dependency(&format!("{store}-reactive"))
    }
}

impl Customizer<Build> for SessionStoreCustomizer {
    fn name(&self) -> &str {
        "SessionStoreCustomizer"
    }

    fn activation(&self) -> Condition {
        Condition::requested(SESSION_MARKER)
    }

    fn order(&self) -> i32 {
        10
    }

    fn customize(&self, build: &mut Build, _ctx: &GenerationContext<'_>) -> KilnResult<()> {
        let selected = SESSION_STORES
            .iter()
            .find(|(store, _)| Self::store_present(build, store));
        if let Some((_, module)) = selected {
            build.add_dependency(*module, Dependency::of(SESSION_GROUP, *module));
        }
        Ok(())
    }
}

pub struct SessionMarkerCleanupCustomizer;

impl Customizer<Build> for SessionMarkerCleanupCustomizer {
    fn name(&self) -> &str {
        "SessionMarkerCleanupCustomizer"
    }

    fn activation(&self) -> Condition {
        Condition::requested(SESSION_MARKER)
    }

    fn order(&self) -> i32 {
        CLEANUP_ORDER
    }

    fn customize(&self, build: &mut Build, _ctx: &GenerationContext<'_>) -> KilnResult<()> {
        build.remove_dependency(SESSION_MARKER);
        Ok(())
    }
}
