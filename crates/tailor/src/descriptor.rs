//! Resolved utility classes.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::modifier::Modifier;
use crate::tokens::ThemeToken;
use crate::utilities::{Layer, PropertyGroup};

/// Where a descriptor's value comes from.
///
/// Ordered by token namespace and key, then literals, then intrinsic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenRef {
    Theme(ThemeToken),
    Literal(String),
    /// The utility has no variable value (components, multi-declaration
    /// statics); its property names the class itself.
    Intrinsic,
}

impl fmt::Display for TokenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenRef::Theme(token) => write!(f, "{}.{}", token.namespace, token.key),
            TokenRef::Literal(value) => write!(f, "{}", value),
            TokenRef::Intrinsic => write!(f, "<intrinsic>"),
        }
    }
}

/// A single CSS declaration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Structured form of a resolved class.
///
/// Identity (`Eq`, `Hash`) covers `variants`, `property`, `value` and
/// `important` only. Two class spellings with the same identity emit a
/// single rule. `layer`, `group` and `declarations` are payload derived
/// during resolution.
#[derive(Debug, Clone)]
pub struct UtilityDescriptor {
    /// Canonicalised modifiers.
    pub variants: Vec<Modifier>,
    pub property: String,
    pub value: TokenRef,
    pub important: bool,
    pub layer: Layer,
    pub group: PropertyGroup,
    pub declarations: Vec<Declaration>,
}

impl UtilityDescriptor {
    /// Total order of emitted rules.
    ///
    /// Within a layer, rules without a breakpoint come first and breakpoint
    /// scopes follow in ascending width, so a responsive rule always lands
    /// after the rules it overrides. Inside one scope, rules with more
    /// declarations (`py-4`) precede narrower ones (`pt-2`).
    pub fn cmp_sort_key(&self, other: &Self) -> Ordering {
        let (screens, states) = self.split_variants();
        let (other_screens, other_states) = other.split_variants();
        self.layer
            .cmp(&other.layer)
            .then_with(|| screens.cmp(other_screens))
            .then_with(|| self.group.cmp(&other.group))
            .then_with(|| states.cmp(other_states))
            .then_with(|| other.declarations.len().cmp(&self.declarations.len()))
            .then_with(|| self.property.cmp(&other.property))
            .then_with(|| self.value.cmp(&other.value))
            .then_with(|| self.important.cmp(&other.important))
    }

    /// Breakpoint modifiers and the rest. Canonical order puts breakpoints
    /// first.
    fn split_variants(&self) -> (&[Modifier], &[Modifier]) {
        let at = self
            .variants
            .iter()
            .position(|m| !matches!(m, Modifier::Breakpoint(_)))
            .unwrap_or(self.variants.len());
        self.variants.split_at(at)
    }

    /// Orders the payload of descriptors sharing one identity, so the same
    /// payload is kept whichever spelling is seen first.
    pub(crate) fn cmp_payload(&self, other: &Self) -> Ordering {
        self.layer
            .cmp(&other.layer)
            .then_with(|| self.group.cmp(&other.group))
            .then_with(|| self.declarations.cmp(&other.declarations))
    }
}

impl PartialEq for UtilityDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.variants == other.variants
            && self.property == other.property
            && self.value == other.value
            && self.important == other.important
    }
}

impl Eq for UtilityDescriptor {}

impl Hash for UtilityDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.variants.hash(state);
        self.property.hash(state);
        self.value.hash(state);
        self.important.hash(state);
    }
}
