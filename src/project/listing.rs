use super::Workspace;
use crate::selector::ServiceSet;

/// Sections of `key: value` lines with keys right-aligned across all sections.
#[derive(Debug, Default)]
pub struct Treelisting {
    sections: Vec<Section>,
}

#[derive(Debug)]
struct Section {
    heading: String,
    entries: Vec<(String, String)>,
    empty_hint: Option<String>,
}

impl Treelisting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(
        mut self,
        heading: impl Into<String>,
        entries: Vec<(String, String)>,
        empty_hint: Option<&str>,
    ) -> Self {
        self.sections.push(Section {
            heading: heading.into(),
            entries,
            empty_hint: empty_hint.map(String::from),
        });
        self
    }

    /// Output lines; nothing at all when no section has entries.
    pub fn render(&self) -> Vec<String> {
        let Some(widest) = self
            .sections
            .iter()
            .flat_map(|s| s.entries.iter().map(|(k, _)| k.chars().count()))
            .max()
        else {
            return Vec::new();
        };
        let width = widest + 1;

        let mut lines = Vec::new();
        for section in &self.sections {
            lines.push(String::new());
            lines.push(section.heading.clone());
            if section.entries.is_empty() {
                if let Some(hint) = &section.empty_hint {
                    lines.push(format!(" {}", hint));
                }
                continue;
            }
            for (key, value) in &section.entries {
                lines.push(format!("{:>width$}: {}", key, value, width = width));
            }
        }
        lines
    }
}

impl Workspace {
    /// The overview printed by `ads list`.
    pub fn listing(&self) -> Treelisting {
        let project = self.project();
        let default_selector = self.default_selector();

        let mut default_description = match self.resolve(default_selector) {
            Ok(names) => names.into_iter().collect::<Vec<_>>().join(", "),
            Err(e) => {
                tracing::debug!("Default selector does not resolve: {}", e);
                "(Unresolved)".to_string()
            }
        };
        if default_description == default_selector {
            if let Some(service) = project.services.get(default_selector) {
                default_description = service.description_or_default().to_string();
            }
        }

        let services = project
            .services
            .iter()
            .map(|s| (s.name.clone(), s.description_or_default().to_string()))
            .collect();

        Treelisting::new()
            .with_section(
                format!("All services in current project ({}):", project.name),
                services,
                Some("None (create ads.yml files in this dir tree)"),
            )
            .with_section(
                "Groups defined in current project:",
                group_entries(&project.groups),
                Some("None (add 'groups' to adsroot.yml)"),
            )
            .with_section(
                "Groups defined in your ads profile:",
                group_entries(&self.profile().groups),
                Some("None (add 'groups' to ~/.ads_profile.yml)"),
            )
            .with_section(
                "Default service for commands if none are specified:",
                vec![(default_selector.to_string(), default_description)],
                None,
            )
    }
}

fn group_entries(groups: &[ServiceSet]) -> Vec<(String, String)> {
    groups
        .iter()
        .map(|g| (g.name.clone(), g.selectors.join(", ")))
        .collect()
}
