//! Built-in component library in the style of daisyUI.
//!
//! Components (`btn`, `card`, `alert`, ...) expand into fixed declarations
//! whose colors and radii come from the `daisyui` namespace, which is
//! filled by the active preset (`light`, `dark` or `cupcake`).

use crate::tokens::ThemeToken;
use crate::utilities::{DeclValue, UtilityPattern};

use super::{ColorScheme, Plugin, ThemePreset};

const NAMESPACE: &str = "daisyui";

#[derive(Clone, Copy)]
enum V {
    Lit(&'static str),
    Tok(&'static str),
}

use V::{Lit, Tok};

type Component = (&'static str, &'static [(&'static str, V)]);

const COMPONENTS: &[Component] = &[
    (
        "btn",
        &[
            ("display", Lit("inline-flex")),
            ("align-items", Lit("center")),
            ("justify-content", Lit("center")),
            ("gap", Lit("0.5rem")),
            ("height", Lit("3rem")),
            ("padding-left", Lit("1rem")),
            ("padding-right", Lit("1rem")),
            ("border-width", Lit("1px")),
            ("border-color", Tok("base-200")),
            ("border-radius", Tok("rounded-btn")),
            ("background-color", Tok("base-200")),
            ("color", Tok("base-content")),
            ("font-size", Lit("0.875rem")),
            ("font-weight", Lit("600")),
            ("cursor", Lit("pointer")),
        ],
    ),
    (
        "btn-primary",
        &[
            ("border-color", Tok("primary")),
            ("background-color", Tok("primary")),
            ("color", Tok("primary-content")),
        ],
    ),
    (
        "btn-secondary",
        &[
            ("border-color", Tok("secondary")),
            ("background-color", Tok("secondary")),
            ("color", Tok("secondary-content")),
        ],
    ),
    (
        "btn-accent",
        &[
            ("border-color", Tok("accent")),
            ("background-color", Tok("accent")),
            ("color", Tok("accent-content")),
        ],
    ),
    (
        "btn-neutral",
        &[
            ("border-color", Tok("neutral")),
            ("background-color", Tok("neutral")),
            ("color", Tok("neutral-content")),
        ],
    ),
    (
        "btn-ghost",
        &[
            ("border-color", Lit("transparent")),
            ("background-color", Lit("transparent")),
        ],
    ),
    (
        "btn-outline",
        &[
            ("border-color", Lit("currentColor")),
            ("background-color", Lit("transparent")),
        ],
    ),
    (
        "btn-sm",
        &[
            ("height", Lit("2rem")),
            ("padding-left", Lit("0.75rem")),
            ("padding-right", Lit("0.75rem")),
            ("font-size", Lit("0.875rem")),
        ],
    ),
    (
        "btn-lg",
        &[
            ("height", Lit("4rem")),
            ("padding-left", Lit("1.5rem")),
            ("padding-right", Lit("1.5rem")),
            ("font-size", Lit("1.125rem")),
        ],
    ),
    (
        "card",
        &[
            ("position", Lit("relative")),
            ("display", Lit("flex")),
            ("flex-direction", Lit("column")),
            ("border-radius", Tok("rounded-box")),
            ("background-color", Tok("base-100")),
            ("color", Tok("base-content")),
        ],
    ),
    (
        "card-body",
        &[
            ("display", Lit("flex")),
            ("flex", Lit("1 1 auto")),
            ("flex-direction", Lit("column")),
            ("gap", Lit("0.5rem")),
            ("padding", Lit("2rem")),
        ],
    ),
    (
        "card-title",
        &[
            ("display", Lit("flex")),
            ("align-items", Lit("center")),
            ("gap", Lit("0.5rem")),
            ("font-size", Lit("1.25rem")),
            ("font-weight", Lit("600")),
        ],
    ),
    (
        "card-actions",
        &[
            ("display", Lit("flex")),
            ("flex-wrap", Lit("wrap")),
            ("align-items", Lit("flex-start")),
            ("gap", Lit("0.5rem")),
        ],
    ),
    (
        "badge",
        &[
            ("display", Lit("inline-flex")),
            ("align-items", Lit("center")),
            ("justify-content", Lit("center")),
            ("height", Lit("1.25rem")),
            ("padding-left", Lit("0.563rem")),
            ("padding-right", Lit("0.563rem")),
            ("font-size", Lit("0.875rem")),
            ("border-width", Lit("1px")),
            ("border-color", Tok("base-200")),
            ("border-radius", Tok("rounded-badge")),
            ("background-color", Tok("base-100")),
            ("color", Tok("base-content")),
        ],
    ),
    (
        "badge-primary",
        &[
            ("border-color", Tok("primary")),
            ("background-color", Tok("primary")),
            ("color", Tok("primary-content")),
        ],
    ),
    (
        "badge-secondary",
        &[
            ("border-color", Tok("secondary")),
            ("background-color", Tok("secondary")),
            ("color", Tok("secondary-content")),
        ],
    ),
    (
        "badge-accent",
        &[
            ("border-color", Tok("accent")),
            ("background-color", Tok("accent")),
            ("color", Tok("accent-content")),
        ],
    ),
    (
        "badge-neutral",
        &[
            ("border-color", Tok("neutral")),
            ("background-color", Tok("neutral")),
            ("color", Tok("neutral-content")),
        ],
    ),
    (
        "alert",
        &[
            ("display", Lit("grid")),
            ("align-items", Lit("center")),
            ("gap", Lit("1rem")),
            ("padding", Lit("1rem")),
            ("border-width", Lit("1px")),
            ("border-color", Tok("base-200")),
            ("border-radius", Tok("rounded-box")),
            ("background-color", Tok("base-200")),
            ("color", Tok("base-content")),
        ],
    ),
    (
        "alert-info",
        &[
            ("border-color", Tok("info")),
            ("background-color", Tok("info")),
            ("color", Tok("info-content")),
        ],
    ),
    (
        "alert-success",
        &[
            ("border-color", Tok("success")),
            ("background-color", Tok("success")),
            ("color", Tok("success-content")),
        ],
    ),
    (
        "alert-warning",
        &[
            ("border-color", Tok("warning")),
            ("background-color", Tok("warning")),
            ("color", Tok("warning-content")),
        ],
    ),
    (
        "alert-error",
        &[
            ("border-color", Tok("error")),
            ("background-color", Tok("error")),
            ("color", Tok("error-content")),
        ],
    ),
    (
        "input",
        &[
            ("height", Lit("3rem")),
            ("padding-left", Lit("1rem")),
            ("padding-right", Lit("1rem")),
            ("font-size", Lit("1rem")),
            ("border-width", Lit("1px")),
            ("border-color", Lit("transparent")),
            ("border-radius", Tok("rounded-btn")),
            ("background-color", Tok("base-100")),
            ("color", Tok("base-content")),
        ],
    ),
    ("input-bordered", &[("border-color", Tok("base-300"))]),
    (
        "navbar",
        &[
            ("display", Lit("flex")),
            ("align-items", Lit("center")),
            ("min-height", Lit("4rem")),
            ("width", Lit("100%")),
            ("padding", Lit("0.5rem")),
        ],
    ),
    (
        "link",
        &[
            ("cursor", Lit("pointer")),
            ("text-decoration-line", Lit("underline")),
        ],
    ),
    ("link-primary", &[("color", Tok("primary"))]),
];

/// Status colors are shared by every preset.
const STATUS: &[(&str, &str)] = &[
    ("info", "#3abff8"),
    ("info-content", "#002b3d"),
    ("success", "#36d399"),
    ("success-content", "#003320"),
    ("warning", "#fbbd23"),
    ("warning-content", "#382800"),
    ("error", "#f87272"),
    ("error-content", "#470000"),
];

const PRESETS: &[(&str, ColorScheme, &[(&str, &str)])] = &[
    (
        "light",
        ColorScheme::Light,
        &[
            ("primary", "#570df8"),
            ("primary-content", "#e0d2fe"),
            ("secondary", "#f000b8"),
            ("secondary-content", "#ffd9ee"),
            ("accent", "#37cdbe"),
            ("accent-content", "#163835"),
            ("neutral", "#3d4451"),
            ("neutral-content", "#d7dde4"),
            ("base-100", "#ffffff"),
            ("base-200", "#f2f2f2"),
            ("base-300", "#e5e6e6"),
            ("base-content", "#1f2937"),
            ("rounded-box", "1rem"),
            ("rounded-btn", "0.5rem"),
            ("rounded-badge", "1.9rem"),
        ],
    ),
    (
        "dark",
        ColorScheme::Dark,
        &[
            ("primary", "#661ae6"),
            ("primary-content", "#ffffff"),
            ("secondary", "#d926aa"),
            ("secondary-content", "#ffffff"),
            ("accent", "#1fb2a5"),
            ("accent-content", "#ffffff"),
            ("neutral", "#191d24"),
            ("neutral-content", "#a6adbb"),
            ("base-100", "#2a303c"),
            ("base-200", "#242933"),
            ("base-300", "#20252e"),
            ("base-content", "#a6adbb"),
            ("rounded-box", "1rem"),
            ("rounded-btn", "0.5rem"),
            ("rounded-badge", "1.9rem"),
        ],
    ),
    (
        "cupcake",
        ColorScheme::Light,
        &[
            ("primary", "#65c3c8"),
            ("primary-content", "#223d3f"),
            ("secondary", "#ef9fbc"),
            ("secondary-content", "#3b2a30"),
            ("accent", "#eeaf3a"),
            ("accent-content", "#3d2d0f"),
            ("neutral", "#291334"),
            ("neutral-content", "#ede8ee"),
            ("base-100", "#faf7f5"),
            ("base-200", "#efeae6"),
            ("base-300", "#e7e2df"),
            ("base-content", "#291334"),
            ("rounded-box", "1rem"),
            ("rounded-btn", "1.9rem"),
            ("rounded-badge", "1.9rem"),
        ],
    ),
];

/// The `daisyui` plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentLibrary;

impl ComponentLibrary {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for ComponentLibrary {
    fn name(&self) -> &str {
        NAMESPACE
    }

    fn contribute_utilities(&self) -> Vec<UtilityPattern> {
        COMPONENTS
            .iter()
            .map(|(name, declarations)| {
                let declarations = declarations
                    .iter()
                    .map(|(property, value)| {
                        let value = match *value {
                            Lit(v) => DeclValue::literal(v),
                            Tok(key) => DeclValue::token(NAMESPACE, key),
                        };
                        (property.to_string(), value)
                    })
                    .collect();
                UtilityPattern::component(name, declarations)
            })
            .collect()
    }

    fn contribute_theme_namespaces(&self) -> Vec<String> {
        vec![NAMESPACE.to_string()]
    }

    fn presets(&self) -> Vec<ThemePreset> {
        PRESETS
            .iter()
            .map(|(name, color_scheme, tokens)| ThemePreset {
                name: name.to_string(),
                color_scheme: *color_scheme,
                tokens: tokens
                    .iter()
                    .chain(STATUS)
                    .map(|(key, value)| ThemeToken::new(NAMESPACE, *key, *value))
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_every_token_reference_exists_in_every_preset() {
        let library = ComponentLibrary::new();
        for preset in library.presets() {
            let keys: BTreeSet<&str> = preset.tokens.iter().map(|t| t.key.as_str()).collect();
            for (component, declarations) in COMPONENTS {
                for (_, value) in declarations.iter() {
                    if let Tok(key) = value {
                        assert!(
                            keys.contains(key),
                            "{} uses {} missing from preset {}",
                            component,
                            key,
                            preset.name
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_presets_share_keys() {
        let presets = ComponentLibrary::new().presets();
        let names: Vec<&str> = presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["light", "dark", "cupcake"]);

        let keys = |p: &ThemePreset| -> BTreeSet<String> {
            p.tokens.iter().map(|t| t.key.clone()).collect()
        };
        assert_eq!(keys(&presets[0]), keys(&presets[1]));
        assert_eq!(keys(&presets[0]), keys(&presets[2]));
    }

    #[test]
    fn test_components_live_in_the_plugin_namespace() {
        let library = ComponentLibrary::new();
        assert_eq!(library.contribute_theme_namespaces(), vec!["daisyui"]);
        for preset in library.presets() {
            assert!(preset.tokens.iter().all(|t| t.namespace == "daisyui"));
        }
        assert_eq!(library.contribute_utilities().len(), COMPONENTS.len());
    }
}
