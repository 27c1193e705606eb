//! Composable activation predicates.
//!
//! A [`Condition`] is evaluated against a [`ConditionContext`], which answers
//! questions about the *original request*: which capabilities were asked
//! for, which facets they carry, the platform version, and the build tool.
//! Conditions never look at the mutable build model.

use std::fmt;

use crate::domain::value_objects::{BuildSystem, Language};
use crate::domain::version::{Version, VersionRange};

/// What a [`Condition`] can ask about a request.
pub trait ConditionContext {
    fn is_requested(&self, key: &str) -> bool;
    fn has_requested_facet(&self, facet: &str) -> bool;
    fn platform_version(&self) -> &Version;
    fn build_system(&self) -> BuildSystem;
    fn language(&self) -> Language;
}

/// Activation predicate for a customizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Always,
    Requested(String),
    NotRequested(String),
    PlatformIn(VersionRange),
    BuildSystemIs(BuildSystem),
    LanguageIs(Language),
    /// Any requested capability carries the facet.
    Facet(String),
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn requested(key: impl Into<String>) -> Self {
        Self::Requested(key.into())
    }

    pub fn not_requested(key: impl Into<String>) -> Self {
        Self::NotRequested(key.into())
    }

    pub fn facet(tag: impl Into<String>) -> Self {
        Self::Facet(tag.into())
    }

    /// Conjunction. Flattens nested `All`s so `a.and(b).and(c)` stays a
    /// single level.
    pub fn and(self, other: Condition) -> Self {
        match (self, other) {
            (Self::Always, c) | (c, Self::Always) => c,
            (Self::All(mut left), Self::All(right)) => {
                left.extend(right);
                Self::All(left)
            }
            (Self::All(mut left), c) => {
                left.push(c);
                Self::All(left)
            }
            (c, Self::All(mut right)) => {
                right.insert(0, c);
                Self::All(right)
            }
            (a, b) => Self::All(vec![a, b]),
        }
    }

    pub fn or(self, other: Condition) -> Self {
        match (self, other) {
            (Self::Any(mut left), Self::Any(right)) => {
                left.extend(right);
                Self::Any(left)
            }
            (Self::Any(mut left), c) => {
                left.push(c);
                Self::Any(left)
            }
            (a, b) => Self::Any(vec![a, b]),
        }
    }

    pub fn negate(self) -> Self {
        match self {
            Self::Not(inner) => *inner,
            Self::Requested(key) => Self::NotRequested(key),
            Self::NotRequested(key) => Self::Requested(key),
            other => Self::Not(Box::new(other)),
        }
    }

    pub fn evaluate(&self, ctx: &dyn ConditionContext) -> bool {
        match self {
            Self::Always => true,
            Self::Requested(key) => ctx.is_requested(key),
            Self::NotRequested(key) => !ctx.is_requested(key),
            Self::PlatformIn(range) => range.matches(ctx.platform_version()),
            Self::BuildSystemIs(kind) => ctx.build_system() == *kind,
            Self::LanguageIs(lang) => ctx.language() == *lang,
            Self::Facet(tag) => ctx.has_requested_facet(tag),
            Self::All(conditions) => conditions.iter().all(|c| c.evaluate(ctx)),
            Self::Any(conditions) => conditions.iter().any(|c| c.evaluate(ctx)),
            Self::Not(inner) => !inner.evaluate(ctx),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |f: &mut fmt::Formatter<'_>, items: &[Condition], sep: &str| {
            f.write_str("(")?;
            for (i, c) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{c}")?;
            }
            f.write_str(")")
        };
        match self {
            Self::Always => f.write_str("always"),
            Self::Requested(key) => write!(f, "requested({key})"),
            Self::NotRequested(key) => write!(f, "!requested({key})"),
            Self::PlatformIn(range) => write!(f, "platform in {range}"),
            Self::BuildSystemIs(kind) => write!(f, "build == {kind}"),
            Self::LanguageIs(lang) => write!(f, "language == {lang}"),
            Self::Facet(tag) => write!(f, "facet({tag})"),
            Self::All(items) => join(f, items, " && "),
            Self::Any(items) => join(f, items, " || "),
            Self::Not(inner) => write!(f, "!{inner}"),
        }
    }
}
