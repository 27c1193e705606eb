//! Build-tool plugin declarations and their configuration trees.
//!
//! Configuration is a tree of named settings. Values are owned, so cloning a
//! [`Plugin`] before configuring it gives copy-on-branch semantics for free.

use serde::Serialize;

use crate::domain::entities::common::{Coordinate, KeyedContainer};
use crate::domain::value_objects::BuildSystem;

// ── Configuration tree ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Text(String),
    Nested(Configuration),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Setting {
    pub name: String,
    pub value: SettingValue,
}

/// Ordered settings. Names may repeat (`<path>` entries under
/// `<annotationProcessorPaths>`, for instance).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Configuration {
    settings: Vec<Setting>,
}

impl Configuration {
    /// Set a text value, replacing the first setting with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = SettingValue::Text(value.into());
        match self.settings.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.value = value,
            None => self.settings.push(Setting { name, value }),
        }
        self
    }

    /// Append a text value, even if the name already exists.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.settings.push(Setting {
            name: name.into(),
            value: SettingValue::Text(value.into()),
        });
        self
    }

    /// Configure the nested node `name`, creating it if needed.
    pub fn configure(&mut self, name: impl Into<String>, f: impl FnOnce(&mut Configuration)) -> &mut Self {
        let name = name.into();
        let index = match self
            .settings
            .iter()
            .position(|s| s.name == name && matches!(s.value, SettingValue::Nested(_)))
        {
            Some(i) => i,
            None => {
                self.settings.push(Setting {
                    name,
                    value: SettingValue::Nested(Configuration::default()),
                });
                self.settings.len() - 1
            }
        };
        if let SettingValue::Nested(nested) = &mut self.settings[index].value {
            f(nested);
        }
        self
    }

    /// Append a fresh nested node `name`.
    pub fn add_nested(&mut self, name: impl Into<String>, f: impl FnOnce(&mut Configuration)) -> &mut Self {
        let mut nested = Configuration::default();
        f(&mut nested);
        self.settings.push(Setting {
            name: name.into(),
            value: SettingValue::Nested(nested),
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.settings.iter().find(|s| s.name == name).map(|s| &s.value)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            SettingValue::Text(t) => Some(t),
            SettingValue::Nested(_) => None,
        }
    }

    pub fn nested(&self, name: &str) -> Option<&Configuration> {
        match self.get(name)? {
            SettingValue::Nested(c) => Some(c),
            SettingValue::Text(_) => None,
        }
    }

    pub fn all(&self, name: &str) -> impl Iterator<Item = &SettingValue> {
        self.settings
            .iter()
            .filter(move |s| s.name == name)
            .map(|s| &s.value)
    }

    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

// ── Executions ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Execution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    pub goals: Vec<String>,
    #[serde(skip_serializing_if = "Configuration::is_empty")]
    pub configuration: Configuration,
}

impl Execution {
    pub fn phase(&mut self, phase: impl Into<String>) -> &mut Self {
        self.phase = Some(phase.into());
        self
    }

    pub fn goal(&mut self, goal: impl Into<String>) -> &mut Self {
        let goal = goal.into();
        if !self.goals.contains(&goal) {
            self.goals.push(goal);
        }
        self
    }

    pub fn configuration(&mut self, f: impl FnOnce(&mut Configuration)) -> &mut Self {
        f(&mut self.configuration);
        self
    }
}

// ── Plugin ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plugin {
    pub coordinate: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "KeyedContainer::is_empty")]
    pub executions: KeyedContainer<Execution>,
    #[serde(skip_serializing_if = "Configuration::is_empty")]
    pub configuration: Configuration,
    /// Set when the plugin shape only exists for one build tool.
    #[serde(skip)]
    pub only_for: Option<BuildSystem>,
}

impl Plugin {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            coordinate: Coordinate::new(group_id, artifact_id),
            version: None,
            executions: KeyedContainer::new(),
            configuration: Configuration::default(),
            only_for: None,
        }
    }

    pub fn version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = Some(version.into());
        self
    }

    /// Configure execution `id`, creating it on first use.
    pub fn execution(&mut self, id: impl Into<String>, f: impl FnOnce(&mut Execution)) -> &mut Self {
        let id = id.into();
        f(self.executions.get_or_insert_with(&id, Execution::default));
        self
    }

    pub fn configuration(&mut self, f: impl FnOnce(&mut Configuration)) -> &mut Self {
        f(&mut self.configuration);
        self
    }

    pub fn only_for(&mut self, build_system: BuildSystem) -> &mut Self {
        self.only_for = Some(build_system);
        self
    }
}

/// Plugins in declaration order, unique by coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PluginContainer {
    plugins: Vec<Plugin>,
}

impl PluginContainer {
    pub fn get(&self, group_id: &str, artifact_id: &str) -> Option<&Plugin> {
        self.plugins
            .iter()
            .find(|p| p.coordinate.matches(group_id, artifact_id))
    }

    pub fn has(&self, group_id: &str, artifact_id: &str) -> bool {
        self.get(group_id, artifact_id).is_some()
    }

    /// Insert or replace by coordinate, keeping the original position.
    pub fn put(&mut self, plugin: Plugin) {
        match self
            .plugins
            .iter_mut()
            .find(|p| p.coordinate == plugin.coordinate)
        {
            Some(existing) => *existing = plugin,
            None => self.plugins.push(plugin),
        }
    }

    pub fn remove(&mut self, group_id: &str, artifact_id: &str) -> Option<Plugin> {
        let index = self
            .plugins
            .iter()
            .position(|p| p.coordinate.matches(group_id, artifact_id))?;
        Some(self.plugins.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.iter()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_reuses_nested_node() {
        let mut config = Configuration::default();
        config.configure("annotationProcessorPaths", |paths| {
            paths.add_nested("path", |p| {
                p.set("groupId", "org.projectlombok").set("artifactId", "lombok");
            });
        });
        config.configure("annotationProcessorPaths", |paths| {
            paths.add_nested("path", |p| {
                p.set("groupId", "org.mapstruct");
            });
        });

        let paths = config.nested("annotationProcessorPaths").unwrap();
        assert_eq!(paths.all("path").count(), 2);
        assert_eq!(config.settings().len(), 1);
    }

    #[test]
    fn set_replaces_but_add_appends() {
        let mut config = Configuration::default();
        config.set("release", "17").set("release", "21");
        config.add("arg", "-a").add("arg", "-b");
        assert_eq!(config.text("release"), Some("21"));
        assert_eq!(config.all("arg").count(), 2);
    }

    #[test]
    fn execution_goals_are_unique() {
        let mut plugin = Plugin::new("com.vaadin", "vaadin-maven-plugin");
        plugin.execution("frontend", |e| {
            e.goal("prepare-frontend").goal("build-frontend").phase("compile");
        });
        plugin.execution("frontend", |e| {
            e.goal("build-frontend");
        });
        let exec = plugin.executions.get("frontend").unwrap();
        assert_eq!(exec.goals, vec!["prepare-frontend", "build-frontend"]);
        assert_eq!(exec.phase.as_deref(), Some("compile"));
    }

    #[test]
    fn put_replaces_same_coordinate() {
        let mut plugins = PluginContainer::default();
        plugins.put(Plugin::new("g", "a"));
        plugins.put(Plugin::new("g", "b"));
        let mut updated = Plugin::new("g", "a");
        updated.version("1.0");
        plugins.put(updated);
        assert_eq!(plugins.len(), 2);
        assert_eq!(plugins.iter().next().unwrap().version.as_deref(), Some("1.0"));
    }
}
