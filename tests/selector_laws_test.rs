/// Property-based tests for selector resolution
///
/// Generates random service inventories and acyclic group graphs, then checks
/// the laws resolution must obey:
/// - a service name resolves to exactly itself
/// - "all" resolves to the whole registry
/// - a group resolves to the union of its members
/// - closing any loop in the graph is reported as a cycle, never a stack overflow
use ads::selector::{GroupTable, SelectorResolver, ServiceSet};
use ads::service::{Service, ServiceRegistry};
use ads::Error;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;

fn registry(names: &BTreeSet<String>) -> ServiceRegistry {
    ServiceRegistry::from_services(
        names.iter().map(|n| Service::new(n.clone(), format!("/p/{}", n))),
        Path::new("adsroot.yml"),
    )
    .unwrap()
}

/// Group `gN` may reference services and groups `g0..gN-1`, so the graph is acyclic.
fn groups_over(services: Vec<String>, count: usize) -> impl Strategy<Value = Vec<ServiceSet>> {
    let per_group: Vec<_> = (0..count)
        .map(|i| {
            let mut choices = services.clone();
            choices.extend((0..i).map(|j| format!("g{}", j)));
            prop::sample::subsequence(choices.clone(), 0..=choices.len())
                .prop_map(move |members| ServiceSet::new(format!("g{}", i), members))
        })
        .collect();
    per_group
}

fn inventory() -> impl Strategy<Value = (BTreeSet<String>, Vec<ServiceSet>)> {
    prop::collection::btree_set("[a-f]{1,3}", 1..8).prop_flat_map(|names| {
        let services: Vec<String> = names.iter().cloned().collect();
        (Just(names), (0usize..6).prop_flat_map(move |n| groups_over(services.clone(), n)))
    })
}

/// Reference semantics: expand members directly, with no cycle guard.
fn expand(name: &str, services: &BTreeSet<String>, groups: &[ServiceSet]) -> BTreeSet<String> {
    if name == "all" {
        return services.clone();
    }
    if services.contains(name) {
        return BTreeSet::from([name.to_string()]);
    }
    let group = groups.iter().find(|g| g.name == name).unwrap();
    group
        .selectors
        .iter()
        .flat_map(|member| expand(member, services, groups))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn service_names_resolve_to_themselves((names, groups) in inventory()) {
        let services = registry(&names);
        let table = GroupTable::layered(&groups, &[]);
        let resolver = SelectorResolver::new(&services, &table);

        for name in &names {
            prop_assert_eq!(resolver.resolve(name).unwrap(), BTreeSet::from([name.clone()]));
        }
        prop_assert_eq!(resolver.resolve("all").unwrap(), names.clone());
    }

    #[test]
    fn groups_resolve_to_union_of_members((names, groups) in inventory()) {
        let services = registry(&names);
        let table = GroupTable::layered(&groups, &[]);
        let resolver = SelectorResolver::new(&services, &table);

        for group in &groups {
            let resolved = resolver.resolve(&group.name).unwrap();
            prop_assert_eq!(&resolved, &expand(&group.name, &names, &groups));
            prop_assert!(resolved.is_subset(&names));
        }
    }

    #[test]
    fn scope_split_does_not_change_results((names, groups) in inventory(), split in 0usize..6) {
        let services = registry(&names);
        let split = split.min(groups.len());
        let (project, profile) = groups.split_at(split);
        let merged = GroupTable::layered(&groups, &[]);
        let layered = GroupTable::layered(project, profile);

        for group in &groups {
            prop_assert_eq!(
                SelectorResolver::new(&services, &merged).resolve(&group.name).unwrap(),
                SelectorResolver::new(&services, &layered).resolve(&group.name).unwrap()
            );
        }
    }

    #[test]
    fn closing_a_loop_is_reported_as_a_cycle((names, mut groups) in inventory()) {
        prop_assume!(!groups.is_empty());
        // g0 now points at the last group, which reaches g0 or is g0 itself.
        let last = groups.last().unwrap().name.clone();
        let services = registry(&names);
        groups[0].selectors.push(last.clone());
        let top = groups.len() - 1;
        groups[top].selectors.push("g0".to_string());
        let table = GroupTable::layered(&groups, &[]);
        let resolver = SelectorResolver::new(&services, &table);

        match resolver.resolve("g0") {
            Err(Error::CircularSelector(chain)) => {
                prop_assert!(chain.len() >= 2);
                prop_assert_eq!(chain.first(), Some(&"g0".to_string()));
                let repeated = chain.last().unwrap();
                prop_assert!(chain[..chain.len() - 1].contains(repeated));
            }
            other => prop_assert!(false, "expected a cycle, got {:?}", other),
        }
    }
}
