use super::{GroupTable, ResolutionStack};
use crate::error::{Error, Result};
use crate::service::ServiceRegistry;
use std::collections::BTreeSet;

/// Selector that always means every registered service.
pub const ALL_SELECTOR: &str = "all";

/// Turns selectors into sets of concrete service names.
///
/// Resolution order for one selector: `"all"`, then a service name, then a
/// group name (expanded recursively). Anything else is an error.
pub struct SelectorResolver<'a> {
    services: &'a ServiceRegistry,
    groups: &'a GroupTable,
}

impl<'a> SelectorResolver<'a> {
    pub fn new(services: &'a ServiceRegistry, groups: &'a GroupTable) -> Self {
        Self { services, groups }
    }

    /// Resolve one selector.
    pub fn resolve(&self, selector: &str) -> Result<BTreeSet<String>> {
        let mut stack = ResolutionStack::new();
        self.resolve_with(selector, &mut stack)
    }

    /// Resolve several selectors and union the results; the first failure aborts.
    pub fn resolve_many<S: AsRef<str>>(&self, selectors: &[S]) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for selector in selectors {
            names.extend(self.resolve(selector.as_ref())?);
        }
        Ok(names)
    }

    fn resolve_with(&self, selector: &str, stack: &mut ResolutionStack) -> Result<BTreeSet<String>> {
        if stack.contains(selector) {
            return Err(Error::CircularSelector(stack.chain_with(selector)));
        }

        if selector == ALL_SELECTOR {
            return Ok(self.services.names().map(str::to_string).collect());
        }

        if self.services.contains(selector) {
            return Ok(BTreeSet::from([selector.to_string()]));
        }

        if let Some(group) = self.groups.get(selector) {
            tracing::debug!(
                "Expanding group '{}' ({} selectors, depth {})",
                selector,
                group.selectors.len(),
                stack.len()
            );
            stack.push(selector);
            let expanded = self.union_members(&group.selectors, stack);
            stack.pop();
            return expanded;
        }

        Err(Error::UnknownSelector {
            name: selector.to_string(),
            chain: stack.chain_with(selector),
        })
    }

    fn union_members(
        &self,
        members: &[String],
        stack: &mut ResolutionStack,
    ) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for member in members {
            names.extend(self.resolve_with(member, stack)?);
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::ServiceSet;
    use crate::service::Service;
    use std::path::Path;

    fn registry(names: &[&str]) -> ServiceRegistry {
        ServiceRegistry::from_services(
            names
                .iter()
                .map(|n| Service::new(*n, format!("/project/{}", n))),
            Path::new("adsroot.yml"),
        )
        .unwrap()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_service_name_resolves_to_itself() {
        let services = registry(&["a", "b", "c", "d"]);
        let groups = GroupTable::new();
        let resolver = SelectorResolver::new(&services, &groups);

        assert_eq!(resolver.resolve("b").unwrap(), set(&["b"]));
    }

    #[test]
    fn test_all_resolves_to_every_service() {
        let services = registry(&["a", "b", "c", "d"]);
        let groups = GroupTable::new();
        let resolver = SelectorResolver::new(&services, &groups);

        assert_eq!(resolver.resolve("all").unwrap(), set(&["a", "b", "c", "d"]));
    }

    #[test]
    fn test_all_on_empty_registry_is_empty() {
        let services = ServiceRegistry::new();
        let groups = GroupTable::new();
        let resolver = SelectorResolver::new(&services, &groups);

        assert!(resolver.resolve("all").unwrap().is_empty());
    }

    #[test]
    fn test_group_in_profile_expands_across_scopes() {
        let services = registry(&["a", "b", "c", "d"]);
        let groups = GroupTable::layered(
            &[ServiceSet::new("team", ["ab", "d"])],
            &[ServiceSet::new("ab", ["a", "b"])],
        );
        let resolver = SelectorResolver::new(&services, &groups);

        assert_eq!(resolver.resolve("team").unwrap(), set(&["a", "b", "d"]));
    }

    #[test]
    fn test_diamond_reference_is_not_a_cycle() {
        let services = registry(&["a", "b", "c"]);
        let groups = GroupTable::layered(
            &[
                ServiceSet::new("top", ["left", "right"]),
                ServiceSet::new("left", ["shared", "a"]),
                ServiceSet::new("right", ["shared", "b"]),
                ServiceSet::new("shared", ["c"]),
            ],
            &[],
        );
        let resolver = SelectorResolver::new(&services, &groups);

        assert_eq!(resolver.resolve("top").unwrap(), set(&["a", "b", "c"]));
    }

    #[test]
    fn test_cycle_reports_full_chain() {
        let services = registry(&["a"]);
        let groups = GroupTable::layered(
            &[ServiceSet::new("foo", ["bar"])],
            &[ServiceSet::new("bar", ["foo"])],
        );
        let resolver = SelectorResolver::new(&services, &groups);

        let err = resolver.resolve("foo").unwrap_err();
        assert!(err.to_string().contains("foo -> bar -> foo"), "{}", err);

        let err = resolver.resolve("bar").unwrap_err();
        assert!(err.to_string().contains("bar -> foo -> bar"), "{}", err);
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let services = registry(&["a"]);
        let groups = GroupTable::layered(&[ServiceSet::new("loop", ["a", "loop"])], &[]);
        let resolver = SelectorResolver::new(&services, &groups);

        match resolver.resolve("loop") {
            Err(Error::CircularSelector(chain)) => assert_eq!(chain, ["loop", "loop"]),
            other => panic!("expected a circular selector error, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle_below_entry_keeps_entry_in_chain() {
        let services = registry(&["a"]);
        let groups = GroupTable::layered(
            &[
                ServiceSet::new("team", ["x"]),
                ServiceSet::new("x", ["y"]),
                ServiceSet::new("y", ["x"]),
            ],
            &[],
        );
        let resolver = SelectorResolver::new(&services, &groups);

        match resolver.resolve("team") {
            Err(Error::CircularSelector(chain)) => assert_eq!(chain, ["team", "x", "y", "x"]),
            other => panic!("expected a circular selector error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_member_reports_reference_chain() {
        let services = ServiceRegistry::new();
        let groups = GroupTable::layered(&[ServiceSet::new("ab", ["a", "b"])], &[]);
        let resolver = SelectorResolver::new(&services, &groups);

        let err = resolver.resolve("ab").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No service or selector named 'a'"), "{}", msg);
        assert!(msg.contains("ab -> a"), "{}", msg);
    }

    #[test]
    fn test_unknown_top_level_selector() {
        let services = registry(&["a"]);
        let groups = GroupTable::new();
        let resolver = SelectorResolver::new(&services, &groups);

        match resolver.resolve("nope") {
            Err(Error::UnknownSelector { name, chain }) => {
                assert_eq!(name, "nope");
                assert_eq!(chain, ["nope"]);
            }
            other => panic!("expected an unknown selector error, got {:?}", other),
        }
    }

    #[test]
    fn test_service_name_wins_over_group_name() {
        let services = registry(&["api", "db"]);
        let groups = GroupTable::layered(&[ServiceSet::new("api", ["db"])], &[]);
        let resolver = SelectorResolver::new(&services, &groups);

        assert_eq!(resolver.resolve("api").unwrap(), set(&["api"]));
    }

    #[test]
    fn test_resolve_many_unions_and_fails_fast() {
        let services = registry(&["a", "b", "c"]);
        let groups = GroupTable::layered(&[ServiceSet::new("ab", ["a", "b"])], &[]);
        let resolver = SelectorResolver::new(&services, &groups);

        assert_eq!(
            resolver.resolve_many(&["ab", "b", "c"]).unwrap(),
            set(&["a", "b", "c"])
        );
        assert!(resolver.resolve_many(&["ab", "missing", "c"]).is_err());
    }

    #[test]
    fn test_repeated_resolutions_do_not_interfere() {
        let services = registry(&["a"]);
        let groups = GroupTable::layered(&[ServiceSet::new("g", ["a", "missing"])], &[]);
        let resolver = SelectorResolver::new(&services, &groups);

        // A failed resolution must not leave "g" on a shared stack.
        assert!(matches!(
            resolver.resolve("g"),
            Err(Error::UnknownSelector { .. })
        ));
        match resolver.resolve("g") {
            Err(Error::UnknownSelector { chain, .. }) => assert_eq!(chain, ["g", "missing"]),
            other => panic!("expected an unknown selector error, got {:?}", other),
        }
    }
}
