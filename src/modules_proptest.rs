//! Property-based tests for the module filter.
//!
//! These tests use proptest to generate random module sets and exclusion
//! prefixes and verify that the filter invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::modules::{ExclusionRule, ModuleName, ModuleSet};
    use proptest::prelude::*;

    fn module_set() -> impl Strategy<Value = ModuleSet> {
        prop::collection::vec("[a-z][a-z0-9_]{0,6}(\\.[a-z][a-z0-9_]{0,6}){0,3}", 0..16).prop_map(
            |names| {
                names
                    .into_iter()
                    .filter_map(|name| ModuleName::new(name).ok())
                    .collect()
            },
        )
    }

    fn rules() -> impl Strategy<Value = Vec<ExclusionRule>> {
        prop::collection::vec("[a-z][a-z0-9_.]{0,8}", 0..4).prop_map(|prefixes| {
            prefixes
                .into_iter()
                .filter_map(|prefix| ExclusionRule::new(prefix).ok())
                .collect()
        })
    }

    proptest! {
        /// Property: the filtered set is a subset of the raw set
        #[test]
        fn filtered_is_subset_of_raw(raw in module_set(), rules in rules()) {
            let filtered = raw.filter(&rules);
            prop_assert!(filtered.is_subset(&raw));
        }

        /// Property: no filtered module starts with an exclusion prefix
        #[test]
        fn filtered_has_no_excluded_prefix(raw in module_set(), rules in rules()) {
            let filtered = raw.filter(&rules);
            for module in &filtered {
                for rule in &rules {
                    prop_assert!(
                        !module.as_str().starts_with(rule.prefix()),
                        "module '{}' survived prefix '{}'",
                        module,
                        rule.prefix()
                    );
                }
            }
        }

        /// Property: no rules means the filter is the identity
        #[test]
        fn empty_rules_is_identity(raw in module_set()) {
            prop_assert_eq!(raw.filter(&[]), raw);
        }

        /// Property: kept and excluded modules partition the raw set
        #[test]
        fn kept_and_excluded_partition_raw(raw in module_set(), rules in rules()) {
            let kept = raw.filter(&rules);
            let excluded = raw.excluded_by(&rules);
            prop_assert_eq!(kept.len() + excluded.len(), raw.len());
            for module in &excluded {
                prop_assert!(!kept.contains(module.as_str()));
            }
        }

        /// Property: a rendered listing parses back to the same set
        #[test]
        fn listing_parses_back(raw in module_set()) {
            let parsed = ModuleSet::parse_listing(&raw.to_listing());
            prop_assert!(parsed.is_ok());
            prop_assert_eq!(parsed.unwrap(), raw);
        }
    }
}
