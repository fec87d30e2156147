use super::Service;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// The concrete services known to a project, keyed by unique name.
///
/// Iteration is always in name order.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    services: BTreeMap<String, Service>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, rejecting duplicate names.
    ///
    /// `origin` labels the error (normally the project file).
    pub fn from_services(
        services: impl IntoIterator<Item = Service>,
        origin: &Path,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for service in services {
            registry.insert(service, origin)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, service: Service, origin: &Path) -> Result<()> {
        if let Some(existing) = self.services.get(&service.name) {
            return Err(Error::config(
                origin,
                format!(
                    "Two services are named '{}': {} and {}",
                    service.name,
                    existing.home.display(),
                    service.home.display()
                ),
            ));
        }
        self.services.insert(service.name.clone(), service);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.values()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
