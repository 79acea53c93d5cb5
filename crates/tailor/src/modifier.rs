//! Variant modifiers (`md:`, `dark:`, `hover:`, `[&>*]:`).
//!
//! Modifiers derive `Ord` in their canonical order: breakpoints first (by
//! ascending min-width), then dark mode, then pseudo-states in table order,
//! then arbitrary selectors compared lexically. [`canonicalize`] sorts and
//! deduplicates a modifier list, so `hover:md:p-4` and `md:hover:p-4` end
//! up with the same variants.

use std::collections::BTreeMap;
use std::fmt;

use crate::tokens::TokenStore;
use crate::value::is_balanced;

/// A responsive breakpoint from the `screens` namespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Screen {
    /// Position in ascending min-width order.
    pub rank: usize,
    pub name: String,
    pub min_width: String,
}

/// Breakpoints known to a resolver, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Screens {
    by_name: BTreeMap<String, Screen>,
}

impl Screens {
    /// Reads the `screens` namespace and ranks the breakpoints by width.
    ///
    /// Widths in `px`, `rem` and `em` are compared in pixels (16px per rem).
    /// Unparsable widths sort last; ties break on the name.
    pub fn from_tokens(tokens: &TokenStore) -> Self {
        let mut screens: Vec<(f64, &str, &str)> = tokens
            .namespace("screens")
            .map(|t| (width_in_px(&t.value), t.key.as_str(), t.value.as_str()))
            .collect();
        screens.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));

        let by_name = screens
            .into_iter()
            .enumerate()
            .map(|(rank, (_, name, min_width))| {
                let screen = Screen {
                    rank,
                    name: name.to_string(),
                    min_width: min_width.to_string(),
                };
                (name.to_string(), screen)
            })
            .collect();

        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&Screen> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn width_in_px(value: &str) -> f64 {
    let value = value.trim();
    let (number, scale) = if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix("rem") {
        (n, 16.0)
    } else if let Some(n) = value.strip_suffix("em") {
        (n, 16.0)
    } else {
        (value, 1.0)
    };
    number
        .trim()
        .parse::<f64>()
        .map(|n| n * scale)
        .unwrap_or(f64::INFINITY)
}

/// Pseudo-class states, declared in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PseudoState {
    Hover,
    Focus,
    FocusWithin,
    FocusVisible,
    Active,
    Visited,
    Disabled,
    Checked,
    Required,
    Invalid,
    First,
    Last,
    Odd,
    Even,
    Empty,
}

impl PseudoState {
    pub const ALL: [PseudoState; 15] = [
        PseudoState::Hover,
        PseudoState::Focus,
        PseudoState::FocusWithin,
        PseudoState::FocusVisible,
        PseudoState::Active,
        PseudoState::Visited,
        PseudoState::Disabled,
        PseudoState::Checked,
        PseudoState::Required,
        PseudoState::Invalid,
        PseudoState::First,
        PseudoState::Last,
        PseudoState::Odd,
        PseudoState::Even,
        PseudoState::Empty,
    ];

    /// The modifier spelling in class names.
    pub fn name(self) -> &'static str {
        match self {
            PseudoState::Hover => "hover",
            PseudoState::Focus => "focus",
            PseudoState::FocusWithin => "focus-within",
            PseudoState::FocusVisible => "focus-visible",
            PseudoState::Active => "active",
            PseudoState::Visited => "visited",
            PseudoState::Disabled => "disabled",
            PseudoState::Checked => "checked",
            PseudoState::Required => "required",
            PseudoState::Invalid => "invalid",
            PseudoState::First => "first",
            PseudoState::Last => "last",
            PseudoState::Odd => "odd",
            PseudoState::Even => "even",
            PseudoState::Empty => "empty",
        }
    }

    /// The selector suffix appended to the class.
    pub fn pseudo_class(self) -> &'static str {
        match self {
            PseudoState::First => ":first-child",
            PseudoState::Last => ":last-child",
            PseudoState::Odd => ":nth-child(odd)",
            PseudoState::Even => ":nth-child(even)",
            PseudoState::Hover => ":hover",
            PseudoState::Focus => ":focus",
            PseudoState::FocusWithin => ":focus-within",
            PseudoState::FocusVisible => ":focus-visible",
            PseudoState::Active => ":active",
            PseudoState::Visited => ":visited",
            PseudoState::Disabled => ":disabled",
            PseudoState::Checked => ":checked",
            PseudoState::Required => ":required",
            PseudoState::Invalid => ":invalid",
            PseudoState::Empty => ":empty",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|state| state.name() == name)
    }
}

/// One variant modifier of a utility class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Breakpoint(Screen),
    Dark,
    State(PseudoState),
    /// A raw selector where `&` stands for the utility's own selector.
    Arbitrary(String),
}

impl Modifier {
    /// Recognises one `:`-separated segment of a class name.
    pub fn parse(segment: &str, screens: &Screens) -> Option<Self> {
        if segment == "dark" {
            return Some(Modifier::Dark);
        }
        if let Some(screen) = screens.get(segment) {
            return Some(Modifier::Breakpoint(screen.clone()));
        }
        if let Some(state) = PseudoState::from_name(segment) {
            return Some(Modifier::State(state));
        }

        let selector = segment.strip_prefix('[')?.strip_suffix(']')?;
        if selector.contains('&') && is_balanced(selector, &['{', '}', ';', '@', '!']) {
            return Some(Modifier::Arbitrary(selector.replace('_', " ")));
        }
        None
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Breakpoint(screen) => write!(f, "{}", screen.name),
            Modifier::Dark => write!(f, "dark"),
            Modifier::State(state) => write!(f, "{}", state.name()),
            Modifier::Arbitrary(selector) => write!(f, "[{}]", selector),
        }
    }
}

/// Puts modifiers in canonical order and drops duplicates.
pub fn canonicalize(mut modifiers: Vec<Modifier>) -> Vec<Modifier> {
    modifiers.sort();
    modifiers.dedup();
    modifiers
}
