//! Catalog queries for display.
//!
//! Separated from [`GenerationService`](super::GenerationService) so
//! listing commands never build pipelines.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    application::ports::CapabilityCatalog,
    domain::{Capability, ServiceCatalog, ServiceDescriptor, Version},
};

/// Capability metadata for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityInfo {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub coordinate: String,
    pub facets: Vec<String>,
    /// Compatibility range expression, `None` when unrestricted.
    pub compatibility: Option<String>,
}

impl From<&Capability> for CapabilityInfo {
    fn from(c: &Capability) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            category: c.category.clone(),
            description: c.description.clone(),
            coordinate: format!("{}:{}", c.group_id, c.artifact_id),
            facets: c.facets.iter().cloned().collect(),
            compatibility: c.compatibility.as_ref().map(|r| r.to_expression()),
        }
    }
}

/// Filters for [`CatalogService::list`].
#[derive(Debug, Clone, Default)]
pub struct CapabilityFilter {
    pub facet: Option<String>,
    pub category: Option<String>,
    /// Only capabilities supporting this platform.
    pub platform: Option<Version>,
}

pub struct CatalogService {
    catalog: Arc<dyn CapabilityCatalog>,
    services: Arc<ServiceCatalog>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CapabilityCatalog>, services: Arc<ServiceCatalog>) -> Self {
        Self { catalog, services }
    }

    /// Capabilities matching `filter`, sorted by id.
    pub fn list(&self, filter: &CapabilityFilter) -> Vec<CapabilityInfo> {
        self.catalog
            .capabilities()
            .into_iter()
            .filter(|c| filter.facet.as_deref().is_none_or(|f| c.has_facet(f)))
            .filter(|c| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|cat| c.category.eq_ignore_ascii_case(cat))
            })
            .filter(|c| filter.platform.as_ref().is_none_or(|p| c.supports(p)))
            .map(CapabilityInfo::from)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<CapabilityInfo> {
        self.catalog.get(id).map(CapabilityInfo::from)
    }

    /// Registered container services, sorted by id.
    pub fn services(&self) -> Vec<&ServiceDescriptor> {
        self.services.iter().collect()
    }
}
