use crate::config::GroupMap;
use std::collections::BTreeMap;

/// A named collection of selectors (a "group").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSet {
    pub name: String,
    pub selectors: Vec<String>,
}

impl ServiceSet {
    pub fn new<S: Into<String>>(name: impl Into<String>, selectors: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            selectors: selectors.into_iter().map(Into::into).collect(),
        }
    }

    /// Groups from a config file's `groups:` section, in name order.
    pub fn from_map(groups: GroupMap) -> Vec<ServiceSet> {
        groups
            .into_iter()
            .map(|(name, selectors)| ServiceSet { name, selectors })
            .collect()
    }
}

/// The group namespace one resolution sees.
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    groups: BTreeMap<String, ServiceSet>,
}

impl GroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the two scopes: project groups first, then profile groups
    /// overwrite any project group with the same name. An overwritten group
    /// is replaced whole, never merged.
    pub fn layered(project: &[ServiceSet], profile: &[ServiceSet]) -> Self {
        let mut groups: BTreeMap<String, ServiceSet> = project
            .iter()
            .map(|set| (set.name.clone(), set.clone()))
            .collect();

        let overrides = profile.iter().map(|set| (set.name.clone(), set.clone()));
        for (name, set) in overrides {
            if groups.contains_key(&name) {
                tracing::debug!("Profile group '{}' replaces the project's definition", name);
            }
            groups.insert(name, set);
        }

        Self { groups }
    }

    pub fn get(&self, name: &str) -> Option<&ServiceSet> {
        self.groups.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceSet> {
        self.groups.values()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
