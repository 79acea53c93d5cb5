//! Class resolution: candidate string in, [`UtilityDescriptor`] out.
//!
//! Resolution is a pure function of the candidate, the [`TokenStore`] and the
//! [`PatternIndex`]. Nothing is mutated, so one [`Resolver`] is shared by
//! every scanning thread.
//!
//! # Algorithm
//!
//! 1. Split on `:` outside brackets. Trailing segments are peeled off as
//!    modifiers while they are recognised; the first unrecognised segment
//!    and everything before it is glued back onto the base.
//! 2. A trailing (or leading) `!` marks the class important.
//! 3. `[property:value]` is an arbitrary property.
//! 4. Otherwise the base is split into `literal-rest` pairs, longest literal
//!    first, and every pattern registered for the literal is tried newest
//!    first. Bracketed rests are arbitrary values, anything else is a token
//!    key in the pattern's namespace.
//!
//! Every failure is a miss: [`Resolver::resolve`] returns `None` and the
//! candidate is dropped.

use std::borrow::Cow;

use crate::descriptor::{Declaration, TokenRef, UtilityDescriptor};
use crate::modifier::{canonicalize, Modifier, Screens};
use crate::tokens::TokenStore;
use crate::utilities::{
    ClassPattern, DeclValue, Layer, PatternIndex, PropertyGroup, UtilityKind, UtilityPattern,
};
use crate::value::{accepted_by, parse_arbitrary};

/// Resolves candidate class names.
#[derive(Debug)]
pub struct Resolver<'a> {
    tokens: &'a TokenStore,
    index: &'a PatternIndex,
    screens: Screens,
    important_all: bool,
}

struct Resolved {
    property: String,
    value: TokenRef,
    declarations: Vec<Declaration>,
}

impl<'a> Resolver<'a> {
    pub fn new(tokens: &'a TokenStore, index: &'a PatternIndex) -> Self {
        Self {
            tokens,
            index,
            screens: Screens::from_tokens(tokens),
            important_all: false,
        }
    }

    /// Marks every utility-layer rule important.
    pub fn important(mut self, important: bool) -> Self {
        self.important_all = important;
        self
    }

    pub fn tokens(&self) -> &TokenStore {
        self.tokens
    }

    pub fn screens(&self) -> &Screens {
        &self.screens
    }

    /// Resolves one candidate, or `None` when it is not a utility class.
    pub fn resolve(&self, candidate: &str) -> Option<UtilityDescriptor> {
        let resolved = self.resolve_inner(candidate);
        if resolved.is_none() {
            tracing::trace!(candidate, "unresolved candidate");
        }
        resolved
    }

    fn resolve_inner(&self, candidate: &str) -> Option<UtilityDescriptor> {
        let segments = split_variants(candidate)?;
        let (variants, base) = self.peel(&segments);

        let (base, important) = strip_important(&base);
        if base.is_empty() {
            return None;
        }

        let (pattern_layer, group, resolved) = match arbitrary_property(base) {
            Some(resolved) => (Layer::Utilities, PropertyGroup::Arbitrary, resolved),
            None => self.match_patterns(base)?,
        };

        let important = important || (self.important_all && pattern_layer == Layer::Utilities);
        Some(UtilityDescriptor {
            variants: canonicalize(variants),
            property: resolved.property,
            value: resolved.value,
            important,
            layer: pattern_layer,
            group,
            declarations: resolved.declarations,
        })
    }

    /// Separates modifiers from the base, gluing unrecognised leading
    /// segments back onto it.
    fn peel<'c>(&self, segments: &[&'c str]) -> (Vec<Modifier>, Cow<'c, str>) {
        let Some((&last, rest)) = segments.split_last() else {
            return (Vec::new(), Cow::Borrowed(""));
        };

        let mut modifiers = Vec::new();
        let mut keep = rest.len();
        while keep > 0 {
            match Modifier::parse(rest[keep - 1], &self.screens) {
                Some(modifier) => {
                    modifiers.push(modifier);
                    keep -= 1;
                }
                None => break,
            }
        }

        if keep == 0 {
            return (modifiers, Cow::Borrowed(last));
        }
        let mut glued = rest[..keep].join(":");
        glued.push(':');
        glued.push_str(last);
        (modifiers, Cow::Owned(glued))
    }

    fn match_patterns(&self, base: &str) -> Option<(Layer, PropertyGroup, Resolved)> {
        PatternIndex::splits(base).find_map(|(literal, rest)| {
            self.index.candidates(literal).find_map(|pattern| {
                self.apply(pattern, rest)
                    .map(|resolved| (pattern.layer, pattern.group, resolved))
            })
        })
    }

    fn apply(&self, pattern: &UtilityPattern, rest: Option<&str>) -> Option<Resolved> {
        match (&pattern.pattern, &pattern.kind, rest) {
            (_, UtilityKind::Static { declarations }, None) => {
                Some(static_utility(pattern.pattern.literal(), declarations))
            }
            (_, UtilityKind::Component { name, declarations }, None) => {
                self.component(name, declarations)
            }
            (
                ClassPattern::Prefix(_),
                UtilityKind::Themed {
                    namespace,
                    property,
                    properties,
                    accepts,
                },
                rest,
            ) => {
                let value = match rest {
                    Some(raw) if raw.starts_with('[') => {
                        let arbitrary = parse_arbitrary(raw)?;
                        if !accepted_by(&arbitrary, *accepts) {
                            return None;
                        }
                        TokenRef::Literal(arbitrary.value)
                    }
                    Some(key) => TokenRef::Theme(self.tokens.resolve(namespace, key)?.clone()),
                    None => TokenRef::Theme(self.tokens.resolve(namespace, "DEFAULT")?.clone()),
                };
                let css_value = match &value {
                    TokenRef::Theme(token) => token.value.clone(),
                    TokenRef::Literal(literal) => literal.clone(),
                    TokenRef::Intrinsic => return None,
                };
                Some(Resolved {
                    property: property.clone(),
                    value,
                    declarations: properties
                        .iter()
                        .map(|p| Declaration::new(p.clone(), css_value.clone()))
                        .collect(),
                })
            }
            _ => None,
        }
    }

    fn component(&self, name: &str, declarations: &[(String, DeclValue)]) -> Option<Resolved> {
        let declarations = declarations
            .iter()
            .map(|(property, value)| {
                let value = match value {
                    DeclValue::Literal(v) => v.clone(),
                    DeclValue::Token { namespace, key } => {
                        self.tokens.resolve(namespace, key)?.value.clone()
                    }
                };
                Some(Declaration::new(property.clone(), value))
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Resolved {
            property: name.to_string(),
            value: TokenRef::Intrinsic,
            declarations,
        })
    }
}

fn static_utility(class: &str, declarations: &[(String, String)]) -> Resolved {
    let declarations: Vec<Declaration> = declarations
        .iter()
        .map(|(p, v)| Declaration::new(p.clone(), v.clone()))
        .collect();

    match declarations.as_slice() {
        [single] => Resolved {
            property: single.property.clone(),
            value: TokenRef::Literal(single.value.clone()),
            declarations,
        },
        _ => Resolved {
            property: class.to_string(),
            value: TokenRef::Intrinsic,
            declarations,
        },
    }
}

/// Splits on `:` outside brackets. `None` for unbalanced brackets.
fn split_variants(candidate: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in candidate.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.checked_sub(1)?,
            ':' if depth == 0 => {
                segments.push(&candidate[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    segments.push(&candidate[start..]);
    Some(segments)
}

fn strip_important(base: &str) -> (&str, bool) {
    if let Some(stripped) = base.strip_suffix('!') {
        (stripped, true)
    } else if let Some(stripped) = base.strip_prefix('!') {
        (stripped, true)
    } else {
        (base, false)
    }
}

/// `[mask-type:luminance]` sets any property directly.
fn arbitrary_property(base: &str) -> Option<Resolved> {
    let inner = base.strip_prefix('[')?.strip_suffix(']')?;
    let (property, value) = inner.split_once(':')?;

    let valid_property = !property.is_empty()
        && !property.starts_with('-')
        && property
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid_property {
        return None;
    }

    let value = value.replace('_', " ");
    let value = value.trim();
    if value.is_empty() || crate::value::classify(value).is_none() {
        return None;
    }

    Some(Resolved {
        property: property.to_string(),
        value: TokenRef::Literal(value.to_string()),
        declarations: vec![Declaration::new(property, value)],
    })
}
