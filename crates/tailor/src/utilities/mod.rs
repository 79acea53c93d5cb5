//! Utility patterns: the vocabulary class names are matched against.
//!
//! A [`UtilityPattern`] pairs a [`ClassPattern`] with what the match
//! produces. Built-in patterns come from [`builtin`]; plugins contribute
//! more through [`Plugin::contribute_utilities`](crate::Plugin::contribute_utilities).
//! All of them are registered into one [`PatternIndex`], where later
//! registrations win over earlier ones for the same literal.

pub mod builtin;

use std::collections::HashMap;
use std::fmt;

/// How a pattern's literal is matched against a class base.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassPattern {
    /// The whole base must equal the literal (`flex`, `btn-primary`).
    Exact(String),
    /// The base is the literal alone or `literal-<value>` (`p-4`, `rounded`).
    Prefix(String),
}

impl ClassPattern {
    pub fn literal(&self) -> &str {
        match self {
            ClassPattern::Exact(s) | ClassPattern::Prefix(s) => s,
        }
    }
}

impl fmt::Display for ClassPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassPattern::Exact(s) => write!(f, "{}", s),
            ClassPattern::Prefix(s) => write!(f, "{}-*", s),
        }
    }
}

/// Output layer. Components come before utilities so utilities can override
/// them in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Components,
    Utilities,
}

/// Coarse property grouping, the second component of the rule sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyGroup {
    Component,
    Layout,
    Flexbox,
    Spacing,
    Sizing,
    Typography,
    Background,
    Border,
    Effects,
    Interactivity,
    Arbitrary,
}

/// Kind of value a themed utility accepts for bracketed arbitrary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    Color,
    Length,
    Number,
    /// Anything; as a classification, a value whose kind cannot be told.
    Any,
}

impl ValueKind {
    /// Whether a pattern accepting `self` takes a value of kind `value`.
    ///
    /// Unclassified values go to the first pattern that tries them.
    pub fn accepts(self, value: ValueKind) -> bool {
        self == ValueKind::Any || value == ValueKind::Any || self == value
    }
}

/// Value of a component declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclValue {
    Literal(String),
    /// Resolved from the token store when the class is used.
    Token { namespace: String, key: String },
}

impl DeclValue {
    pub fn literal(value: impl Into<String>) -> Self {
        DeclValue::Literal(value.into())
    }

    pub fn token(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        DeclValue::Token {
            namespace: namespace.into(),
            key: key.into(),
        }
    }
}

/// What a matched pattern produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtilityKind {
    /// Fixed declarations (`hidden` is `display:none`).
    Static { declarations: Vec<(String, String)> },
    /// A value looked up in a token namespace (`p-4` reads `padding.4`).
    ///
    /// `property` is the identity of the utility; `properties` are the CSS
    /// properties that receive the value.
    Themed {
        namespace: String,
        property: String,
        properties: Vec<String>,
        accepts: ValueKind,
    },
    /// A named component expanding into several declarations.
    Component {
        name: String,
        declarations: Vec<(String, DeclValue)>,
    },
}

/// One entry of the utility vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilityPattern {
    pub pattern: ClassPattern,
    pub kind: UtilityKind,
    pub layer: Layer,
    pub group: PropertyGroup,
}

impl UtilityPattern {
    /// An exact class with fixed declarations, in the utilities layer.
    pub fn fixed(class: &str, group: PropertyGroup, declarations: &[(&str, &str)]) -> Self {
        Self {
            pattern: ClassPattern::Exact(class.to_string()),
            kind: UtilityKind::Static {
                declarations: declarations
                    .iter()
                    .map(|(p, v)| (p.to_string(), v.to_string()))
                    .collect(),
            },
            layer: Layer::Utilities,
            group,
        }
    }

    /// A prefix utility reading `namespace`, setting each of `properties`.
    pub fn themed(
        prefix: &str,
        namespace: &str,
        group: PropertyGroup,
        accepts: ValueKind,
        property: &str,
        properties: &[&str],
    ) -> Self {
        Self {
            pattern: ClassPattern::Prefix(prefix.to_string()),
            kind: UtilityKind::Themed {
                namespace: namespace.to_string(),
                property: property.to_string(),
                properties: properties.iter().map(|p| p.to_string()).collect(),
                accepts,
            },
            layer: Layer::Utilities,
            group,
        }
    }

    /// A component class in the components layer.
    pub fn component(name: &str, declarations: Vec<(String, DeclValue)>) -> Self {
        Self {
            pattern: ClassPattern::Exact(name.to_string()),
            kind: UtilityKind::Component {
                name: name.to_string(),
                declarations,
            },
            layer: Layer::Components,
            group: PropertyGroup::Component,
        }
    }
}

/// Registration-ordered lookup table over every pattern.
#[derive(Debug, Clone, Default)]
pub struct PatternIndex {
    patterns: Vec<UtilityPattern>,
    by_literal: HashMap<String, Vec<usize>>,
}

impl PatternIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index holding only the built-in vocabulary.
    pub fn with_builtins() -> Self {
        let mut index = Self::new();
        index.extend(builtin::patterns(), "builtin");
        index
    }

    /// Registers a pattern. It takes precedence over every pattern with the
    /// same literal registered before it.
    pub fn register(&mut self, pattern: UtilityPattern, origin: &str) {
        let literal = pattern.pattern.literal().to_string();
        let slot = self.by_literal.entry(literal).or_default();
        if !slot.is_empty() {
            tracing::debug!(pattern = %pattern.pattern, plugin = origin, "pattern overrides an earlier registration");
        }
        slot.push(self.patterns.len());
        self.patterns.push(pattern);
    }

    pub fn extend(&mut self, patterns: impl IntoIterator<Item = UtilityPattern>, origin: &str) {
        for pattern in patterns {
            self.register(pattern, origin);
        }
    }

    /// Patterns registered under `literal`, most recent first.
    pub fn candidates<'a>(&'a self, literal: &str) -> impl Iterator<Item = &'a UtilityPattern> + 'a {
        self.by_literal
            .get(literal)
            .into_iter()
            .flat_map(|slot| slot.iter().rev())
            .map(|&i| &self.patterns[i])
    }

    /// Splits a class base into `(literal, rest)` pairs, longest literal
    /// first. The whole base comes first with no rest, then every split at a
    /// `-` that lies before any `[`.
    pub fn splits(base: &str) -> impl Iterator<Item = (&str, Option<&str>)> {
        let searchable = base.find('[').unwrap_or(base.len());
        let dashes: Vec<usize> = base[..searchable]
            .match_indices('-')
            .map(|(i, _)| i)
            .filter(|&i| i > 0)
            .collect();

        std::iter::once((base, None)).chain(
            dashes
                .into_iter()
                .rev()
                .map(move |i| (&base[..i], Some(&base[i + 1..]))),
        )
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splits(base: &str) -> Vec<(&str, Option<&str>)> {
        PatternIndex::splits(base).collect()
    }

    #[test]
    fn test_splits_longest_first() {
        assert_eq!(
            splits("border-t-red-500"),
            vec![
                ("border-t-red-500", None),
                ("border-t-red", Some("500")),
                ("border-t", Some("red-500")),
                ("border", Some("t-red-500")),
            ]
        );
    }

    #[test]
    fn test_splits_stop_at_bracket() {
        assert_eq!(
            splits("w-[calc(100%-1rem)]"),
            vec![("w-[calc(100%-1rem)]", None), ("w", Some("[calc(100%-1rem)]"))]
        );
    }

    #[test]
    fn test_splits_without_dash() {
        assert_eq!(splits("flex"), vec![("flex", None)]);
    }

    #[test]
    fn test_later_registration_comes_first() {
        let mut index = PatternIndex::new();
        index.register(
            UtilityPattern::fixed("flex", PropertyGroup::Layout, &[("display", "flex")]),
            "builtin",
        );
        index.register(
            UtilityPattern::fixed("flex", PropertyGroup::Layout, &[("display", "grid")]),
            "custom",
        );

        let first = index.candidates("flex").next().unwrap();
        assert_eq!(
            first.kind,
            UtilityKind::Static {
                declarations: vec![("display".into(), "grid".into())]
            }
        );
        assert_eq!(index.candidates("flex").count(), 2);
        assert_eq!(index.candidates("grid").count(), 0);
    }

    #[test]
    fn test_value_kind_accepts() {
        assert!(ValueKind::Color.accepts(ValueKind::Color));
        assert!(!ValueKind::Color.accepts(ValueKind::Length));
        assert!(ValueKind::Any.accepts(ValueKind::Length));
        assert!(ValueKind::Length.accepts(ValueKind::Any));
    }
}
