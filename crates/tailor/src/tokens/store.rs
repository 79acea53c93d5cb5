//! The resolved token theme.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use super::defaults::{Namespaces, DEFAULT_THEME, DERIVED};

/// A named design value, addressed by `(namespace, key)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThemeToken {
    pub namespace: String,
    pub key: String,
    pub value: String,
}

impl ThemeToken {
    pub fn new(
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A key of a token map.
///
/// YAML scales are usually written with bare numbers (`500:`, `0.5:`), so
/// numeric keys are accepted and kept in their written form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenKey(pub String);

impl TokenKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenKey {
    fn from(key: &str) -> Self {
        TokenKey(key.to_string())
    }
}

impl<'de> Deserialize<'de> for TokenKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = TokenKey;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or number token key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TokenKey, E> {
                Ok(TokenKey(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<TokenKey, E> {
                Ok(TokenKey(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TokenKey, E> {
                Ok(TokenKey(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TokenKey, E> {
                Ok(TokenKey(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<TokenKey, E> {
                Ok(TokenKey(v.to_string()))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

/// Token entries of one namespace as written in configuration.
pub type TokenEntries = BTreeMap<TokenKey, TokenValue>;

/// A token value as written in configuration.
///
/// Values are strings, numbers, or nested maps. Nested keys are joined with
/// `-` and a `DEFAULT` key stands for the parent name itself:
///
/// ```yaml
/// colors:
///   brand:
///     DEFAULT: "#1e3a8a"   # brand
///     light: "#2a4fc8"     # brand-light
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Value(String),
    Number(serde_json::Number),
    Nested(TokenEntries),
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Value(value.to_string())
    }
}

/// Flattens configuration entries into `(key, value)` pairs.
pub fn flatten_entries(entries: &TokenEntries) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (key, value) in entries {
        flatten_into(key.0.clone(), value, &mut out);
    }
    out
}

fn flatten_into(key: String, value: &TokenValue, out: &mut Vec<(String, String)>) {
    match value {
        TokenValue::Value(s) => out.push((key, s.clone())),
        TokenValue::Number(n) => out.push((key, n.to_string())),
        TokenValue::Nested(children) => {
            for (child, value) in children {
                let child_key = if child.as_str() == "DEFAULT" {
                    key.clone()
                } else {
                    format!("{}-{}", key, child.as_str())
                };
                flatten_into(child_key, value, out);
            }
        }
    }
}

/// Immutable token theme consulted by every resolver call.
///
/// Built once at configuration load through [`TokenStoreBuilder`] and only
/// read afterwards, so it is shared across scanning threads without locks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStore {
    namespaces: BTreeMap<String, BTreeMap<String, ThemeToken>>,
}

impl TokenStore {
    /// Starts an empty builder.
    pub fn builder() -> TokenStoreBuilder {
        TokenStoreBuilder::new()
    }

    /// Store holding only the built-in default theme.
    pub fn with_defaults() -> Self {
        Self::builder().defaults().build()
    }

    /// Looks up a token. `None` means the class referencing it does not resolve.
    pub fn resolve(&self, namespace: &str, key: &str) -> Option<&ThemeToken> {
        self.namespaces.get(namespace)?.get(key)
    }

    /// Tokens of one namespace in key order.
    pub fn namespace<'a>(&'a self, namespace: &str) -> impl Iterator<Item = &'a ThemeToken> + 'a {
        self.namespaces
            .get(namespace)
            .into_iter()
            .flat_map(|tokens| tokens.values())
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(namespace)
    }

    /// Namespace names in sorted order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    /// Total number of tokens.
    pub fn len(&self) -> usize {
        self.namespaces.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Layered construction of a [`TokenStore`].
///
/// Layers apply in call order. [`replace`](Self::replace) swaps out a whole
/// namespace; [`extend`](Self::extend) and [`token`](Self::token) merge key
/// by key, keeping every sibling key. Derived namespaces (`padding`,
/// `margin`, `width`, ...) are computed in [`build`](Self::build) from their
/// source namespace unless they were replaced explicitly.
#[derive(Debug, Clone, Default)]
pub struct TokenStoreBuilder {
    namespaces: Namespaces,
    replaced: BTreeSet<String>,
}

impl TokenStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the built-in default table.
    pub fn defaults(mut self) -> Self {
        for (namespace, entries) in DEFAULT_THEME.iter() {
            self.namespaces
                .entry(namespace.clone())
                .or_default()
                .extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        self
    }

    /// Replaces a namespace wholesale.
    pub fn replace<I, K, V>(mut self, namespace: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let namespace = namespace.into();
        let table = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.replaced.insert(namespace.clone());
        self.namespaces.insert(namespace, table);
        self
    }

    /// Merges entries into a namespace, overriding only the keys given.
    pub fn extend<I, K, V>(mut self, namespace: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let table = self.namespaces.entry(namespace.into()).or_default();
        for (key, value) in entries {
            table.insert(key.into(), value.into());
        }
        self
    }

    /// Merges a single token.
    pub fn token(mut self, token: ThemeToken) -> Self {
        self.namespaces
            .entry(token.namespace)
            .or_default()
            .insert(token.key, token.value);
        self
    }

    /// Applies namespace derivations and freezes the store.
    pub fn build(mut self) -> TokenStore {
        for derivation in DERIVED {
            if self.replaced.contains(derivation.target) {
                continue;
            }
            let Some(source) = self.namespaces.get(derivation.source) else {
                continue;
            };

            let mut derived = source.clone();
            for (key, value) in derivation.extras {
                derived.insert(key.to_string(), value.to_string());
            }
            if let Some(own) = self.namespaces.get(derivation.target) {
                derived.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            self.namespaces.insert(derivation.target.to_string(), derived);
        }

        let namespaces = self
            .namespaces
            .into_iter()
            .map(|(namespace, entries)| {
                let tokens = entries
                    .into_iter()
                    .map(|(key, value)| {
                        let token = ThemeToken::new(namespace.clone(), key.clone(), value);
                        (key, token)
                    })
                    .collect();
                (namespace, tokens)
            })
            .collect();

        TokenStore { namespaces }
    }
}
