//! Immutable in-memory capability catalog.

use std::collections::BTreeMap;

use kiln_core::{
    application::ports::CapabilityCatalog,
    domain::{BomDefinition, Capability, DomainError},
    error::KilnResult,
};

/// Capabilities and BOM definitions keyed by id.
///
/// Built once, then only read; shared across requests behind an `Arc`
/// without locking.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    capabilities: BTreeMap<String, Capability>,
    boms: BTreeMap<String, BomDefinition>,
}

impl InMemoryCatalog {
    /// # Errors
    ///
    /// [`DomainError::CatalogInconsistency`] on duplicate ids or a capability
    /// referencing an undefined BOM.
    pub fn new(capabilities: Vec<Capability>, boms: Vec<BomDefinition>) -> KilnResult<Self> {
        let mut catalog = Self::default();
        catalog.extend(capabilities, boms)?;
        catalog.check_bom_references()?;
        Ok(catalog)
    }

    /// Layer `other` over `self`; entries in `other` replace same-id entries.
    pub fn merge(mut self, other: InMemoryCatalog) -> KilnResult<Self> {
        self.capabilities.extend(other.capabilities);
        self.boms.extend(other.boms);
        self.check_bom_references()?;
        Ok(self)
    }

    fn extend(&mut self, capabilities: Vec<Capability>, boms: Vec<BomDefinition>) -> KilnResult<()> {
        for capability in capabilities {
            let id = capability.id.clone();
            if self.capabilities.insert(id.clone(), capability).is_some() {
                return Err(DomainError::inconsistency(id, "capability defined twice").into());
            }
        }
        for bom in boms {
            let id = bom.id.clone();
            if self.boms.insert(id.clone(), bom).is_some() {
                return Err(DomainError::inconsistency(id, "bom defined twice").into());
            }
        }
        Ok(())
    }

    fn check_bom_references(&self) -> KilnResult<()> {
        for capability in self.capabilities.values() {
            if let Some(bom) = &capability.bom {
                if !self.boms.contains_key(bom) {
                    return Err(DomainError::inconsistency(
                        &capability.id,
                        format!("references undefined bom '{bom}'"),
                    )
                    .into());
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

impl CapabilityCatalog for InMemoryCatalog {
    fn get(&self, id: &str) -> Option<&Capability> {
        self.capabilities.get(id)
    }

    fn capabilities(&self) -> Vec<&Capability> {
        self.capabilities.values().collect()
    }

    fn bom(&self, id: &str) -> Option<&BomDefinition> {
        self.boms.get(id)
    }

    fn boms(&self) -> Vec<&BomDefinition> {
        self.boms.values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web() -> Capability {
        Capability::new("web", "org.springframework.boot", "spring-boot-starter-web")
    }

    #[test]
    fn duplicate_capability_is_rejected() {
        let err = InMemoryCatalog::new(vec![web(), web()], vec![]).unwrap_err();
        assert!(matches!(
            err.domain_cause(),
            Some(DomainError::CatalogInconsistency { key, .. }) if key == "web"
        ));
    }

    #[test]
    fn dangling_bom_reference_is_rejected() {
        let gateway = Capability::new("cloud-gateway", "org.springframework.cloud", "gw").bom("spring-cloud");
        assert!(InMemoryCatalog::new(vec![gateway], vec![]).is_err());
    }

    #[test]
    fn merge_overrides_by_id() {
        let base = InMemoryCatalog::new(vec![web()], vec![]).unwrap();
        let overlay = InMemoryCatalog::new(
            vec![web().named("Spring Web (custom)", "Web")],
            vec![],
        )
        .unwrap();
        let merged = base.merge(overlay).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("web").unwrap().name, "Spring Web (custom)");
    }
}
