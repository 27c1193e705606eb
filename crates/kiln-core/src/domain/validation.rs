use crate::domain::{
    entities::{capability::Capability, compose::ProjectFiles, description::ProjectDescription},
    error::DomainError,
};

/// Centralized domain validation.
pub struct DomainValidator;

impl DomainValidator {
    /// Every requested id must exist in the catalog and support the
    /// requested platform version.
    pub fn validate_description<'a>(
        description: &ProjectDescription,
        lookup: impl Fn(&str) -> Option<&'a Capability>,
    ) -> Result<(), DomainError> {
        description.validate()?;
        for id in description.dependencies() {
            let capability = lookup(id).ok_or_else(|| DomainError::UnknownCapability {
                id: id.clone(),
            })?;
            if !capability.supports(description.platform_version()) {
                return Err(DomainError::IncompatibleCapability {
                    id: id.clone(),
                    platform: description.platform_version().to_string(),
                    range: capability
                        .compatibility
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                });
            }
        }
        Ok(())
    }

    pub fn validate_project_files(files: &ProjectFiles) -> Result<(), DomainError> {
        files.validate()
    }
}
