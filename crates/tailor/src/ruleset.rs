//! Deduplication and ordering of resolved utilities.
//!
//! A [`RuleCollector`] is keyed by descriptor identity and keeps every class
//! spelling that resolved to it. Collectors are built per file and merged,
//! and [`RuleCollector::into_ruleset`] sorts by descriptor sort key, so the
//! resulting [`Ruleset`] does not depend on the order files were scanned in.

use std::collections::{BTreeSet, HashMap};

use crate::descriptor::UtilityDescriptor;

/// One emitted rule: a descriptor and the class spellings selecting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub descriptor: UtilityDescriptor,
    /// Sorted and unique.
    pub classes: Vec<String>,
}

/// The ordered, conflict-free rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ruleset {
    rules: Vec<Rule>,
}

impl Ruleset {
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a Ruleset {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Accumulates descriptors by identity.
#[derive(Debug, Clone, Default)]
pub struct RuleCollector {
    rules: HashMap<UtilityDescriptor, BTreeSet<String>>,
}

impl RuleCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `class` as a spelling of `descriptor`.
    pub fn insert(&mut self, class: impl Into<String>, descriptor: UtilityDescriptor) {
        let mut classes = BTreeSet::new();
        classes.insert(class.into());
        self.insert_spellings(descriptor, classes);
    }

    /// Folds another collector into this one.
    pub fn merge(mut self, other: RuleCollector) -> RuleCollector {
        if self.rules.len() < other.rules.len() {
            return other.merge(self);
        }
        for (descriptor, classes) in other.rules {
            self.insert_spellings(descriptor, classes);
        }
        self
    }

    fn insert_spellings(&mut self, descriptor: UtilityDescriptor, classes: BTreeSet<String>) {
        let replace = match self.rules.get_key_value(&descriptor) {
            Some((existing, _)) => descriptor.cmp_payload(existing).is_lt(),
            None => false,
        };

        if replace {
            let mut merged = self.rules.remove(&descriptor).unwrap_or_default();
            merged.extend(classes);
            self.rules.insert(descriptor, merged);
        } else {
            self.rules.entry(descriptor).or_default().extend(classes);
        }
    }

    /// Number of distinct descriptors.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn into_ruleset(self) -> Ruleset {
        let mut rules: Vec<Rule> = self
            .rules
            .into_iter()
            .map(|(descriptor, classes)| Rule {
                descriptor,
                classes: classes.into_iter().collect(),
            })
            .collect();
        rules.sort_by(|a, b| a.descriptor.cmp_sort_key(&b.descriptor));
        Ruleset { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Resolver;
    use crate::tokens::TokenStore;
    use crate::utilities::PatternIndex;

    fn collect(classes: &[&str]) -> Ruleset {
        let tokens = TokenStore::with_defaults();
        let index = PatternIndex::with_builtins();
        let resolver = Resolver::new(&tokens, &index);

        let mut collector = RuleCollector::new();
        for class in classes {
            if let Some(descriptor) = resolver.resolve(class) {
                collector.insert(*class, descriptor);
            }
        }
        collector.into_ruleset()
    }

    fn spellings(ruleset: &Ruleset) -> Vec<Vec<String>> {
        ruleset.iter().map(|r| r.classes.clone()).collect()
    }

    #[test]
    fn test_repeated_class_is_one_rule() {
        let ruleset = collect(&["p-4"; 100]);
        assert_eq!(ruleset.len(), 1);
        assert_eq!(ruleset.rules()[0].classes, vec!["p-4"]);
    }

    #[test]
    fn test_spellings_of_one_descriptor_share_a_rule() {
        let ruleset = collect(&["hover:md:p-4", "md:hover:p-4"]);
        assert_eq!(spellings(&ruleset), vec![vec!["hover:md:p-4", "md:hover:p-4"]]);
    }

    #[test]
    fn test_order_follows_sort_key() {
        let ruleset = collect(&["md:p-4", "bg-white", "p-4", "hidden", "p-2", "text-lg"]);
        let first: Vec<&str> = ruleset.iter().map(|r| r.classes[0].as_str()).collect();
        // Unscoped rules by group, then the md: scope.
        assert_eq!(first, vec!["hidden", "p-2", "p-4", "text-lg", "bg-white", "md:p-4"]);
    }

    #[test]
    fn test_breakpoint_rule_follows_later_groups() {
        let ruleset = collect(&["md:overflow-auto", "truncate"]);
        let first: Vec<&str> = ruleset.iter().map(|r| r.classes[0].as_str()).collect();
        assert_eq!(first, vec!["truncate", "md:overflow-auto"]);
    }

    #[test]
    fn test_multi_side_utility_precedes_single_side() {
        let ruleset = collect(&["pt-2", "py-4", "p-8"]);
        let first: Vec<&str> = ruleset.iter().map(|r| r.classes[0].as_str()).collect();
        assert_eq!(first, vec!["py-4", "p-8", "pt-2"]);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let tokens = TokenStore::with_defaults();
        let index = PatternIndex::with_builtins();
        let resolver = Resolver::new(&tokens, &index);

        let build = |classes: &[&str]| {
            let mut c = RuleCollector::new();
            for class in classes {
                c.insert(*class, resolver.resolve(class).unwrap());
            }
            c
        };

        let a = build(&["p-4", "flex"]).merge(build(&["!p-4", "p-4!", "m-2"]));
        let b = build(&["m-2", "p-4!"]).merge(build(&["flex", "!p-4", "p-4"]));
        assert_eq!(a.into_ruleset(), b.into_ruleset());
    }
}
