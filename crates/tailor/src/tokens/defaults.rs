//! Built-in design tokens.
//!
//! The default table covers the namespaces the built-in utilities read. Some
//! namespaces are not stored directly but derived from another one after
//! user overrides are applied (`margin` is `spacing` plus `auto`), so
//! extending `spacing` also extends every namespace built on it.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

pub(crate) type Namespaces = BTreeMap<String, BTreeMap<String, String>>;

/// A namespace computed from another namespace at build time.
pub(crate) struct Derivation {
    pub target: &'static str,
    pub source: &'static str,
    pub extras: &'static [(&'static str, &'static str)],
}

pub(crate) const DERIVED: &[Derivation] = &[
    Derivation {
        target: "padding",
        source: "spacing",
        extras: &[],
    },
    Derivation {
        target: "margin",
        source: "spacing",
        extras: &[("auto", "auto")],
    },
    Derivation {
        target: "gap",
        source: "spacing",
        extras: &[],
    },
    Derivation {
        target: "inset",
        source: "spacing",
        extras: &[("auto", "auto"), ("1/2", "50%"), ("full", "100%")],
    },
    Derivation {
        target: "width",
        source: "spacing",
        extras: &[
            ("auto", "auto"),
            ("1/2", "50%"),
            ("1/3", "33.333333%"),
            ("2/3", "66.666667%"),
            ("1/4", "25%"),
            ("3/4", "75%"),
            ("full", "100%"),
            ("screen", "100vw"),
            ("min", "min-content"),
            ("max", "max-content"),
            ("fit", "fit-content"),
        ],
    },
    Derivation {
        target: "height",
        source: "spacing",
        extras: &[
            ("auto", "auto"),
            ("1/2", "50%"),
            ("full", "100%"),
            ("screen", "100vh"),
            ("min", "min-content"),
            ("max", "max-content"),
            ("fit", "fit-content"),
        ],
    },
];

const SPACING_STEPS: &[&str] = &[
    "0.5", "1", "1.5", "2", "2.5", "3", "3.5", "4", "5", "6", "7", "8", "9", "10", "11", "12",
    "14", "16", "20", "24", "28", "32", "36", "40", "44", "48", "52", "56", "60", "64", "72",
    "80", "96",
];

const COLOR_SHADES: &[&str] = &["50", "100", "200", "300", "400", "500", "600", "700", "800", "900"];

const COLOR_FAMILIES: &[(&str, [&str; 10])] = &[
    (
        "gray",
        [
            "#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563", "#374151",
            "#1f2937", "#111827",
        ],
    ),
    (
        "red",
        [
            "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626", "#b91c1c",
            "#991b1b", "#7f1d1d",
        ],
    ),
    (
        "yellow",
        [
            "#fefce8", "#fef9c3", "#fef08a", "#fde047", "#facc15", "#eab308", "#ca8a04", "#a16207",
            "#854d0e", "#713f12",
        ],
    ),
    (
        "green",
        [
            "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d",
            "#166534", "#14532d",
        ],
    ),
    (
        "blue",
        [
            "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8",
            "#1e40af", "#1e3a8a",
        ],
    ),
    (
        "indigo",
        [
            "#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5", "#4338ca",
            "#3730a3", "#312e81",
        ],
    ),
];

const STATIC_NAMESPACES: &[(&str, &[(&str, &str)])] = &[
    (
        "fontSize",
        &[
            ("xs", "0.75rem"),
            ("sm", "0.875rem"),
            ("base", "1rem"),
            ("lg", "1.125rem"),
            ("xl", "1.25rem"),
            ("2xl", "1.5rem"),
            ("3xl", "1.875rem"),
            ("4xl", "2.25rem"),
            ("5xl", "3rem"),
            ("6xl", "3.75rem"),
        ],
    ),
    (
        "fontWeight",
        &[
            ("thin", "100"),
            ("extralight", "200"),
            ("light", "300"),
            ("normal", "400"),
            ("medium", "500"),
            ("semibold", "600"),
            ("bold", "700"),
            ("extrabold", "800"),
            ("black", "900"),
        ],
    ),
    (
        "fontFamily",
        &[
            ("sans", "ui-sans-serif, system-ui, sans-serif"),
            ("serif", "ui-serif, Georgia, serif"),
            ("mono", "ui-monospace, SFMono-Regular, monospace"),
        ],
    ),
    (
        "lineHeight",
        &[
            ("none", "1"),
            ("tight", "1.25"),
            ("snug", "1.375"),
            ("normal", "1.5"),
            ("relaxed", "1.625"),
            ("loose", "2"),
        ],
    ),
    (
        "borderRadius",
        &[
            ("none", "0px"),
            ("sm", "0.125rem"),
            ("DEFAULT", "0.25rem"),
            ("md", "0.375rem"),
            ("lg", "0.5rem"),
            ("xl", "0.75rem"),
            ("2xl", "1rem"),
            ("3xl", "1.5rem"),
            ("full", "9999px"),
        ],
    ),
    (
        "borderWidth",
        &[
            ("DEFAULT", "1px"),
            ("0", "0px"),
            ("2", "2px"),
            ("4", "4px"),
            ("8", "8px"),
        ],
    ),
    (
        "boxShadow",
        &[
            ("sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
            (
                "DEFAULT",
                "0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)",
            ),
            (
                "md",
                "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)",
            ),
            (
                "lg",
                "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)",
            ),
            ("none", "0 0 #0000"),
        ],
    ),
    (
        "zIndex",
        &[
            ("0", "0"),
            ("10", "10"),
            ("20", "20"),
            ("30", "30"),
            ("40", "40"),
            ("50", "50"),
            ("auto", "auto"),
        ],
    ),
    (
        "maxWidth",
        &[
            ("none", "none"),
            ("xs", "20rem"),
            ("sm", "24rem"),
            ("md", "28rem"),
            ("lg", "32rem"),
            ("xl", "36rem"),
            ("2xl", "42rem"),
            ("3xl", "48rem"),
            ("4xl", "56rem"),
            ("5xl", "64rem"),
            ("6xl", "72rem"),
            ("7xl", "80rem"),
            ("full", "100%"),
            ("prose", "65ch"),
        ],
    ),
    (
        "minWidth",
        &[
            ("0", "0px"),
            ("full", "100%"),
            ("min", "min-content"),
            ("max", "max-content"),
        ],
    ),
    (
        "minHeight",
        &[("0", "0px"), ("full", "100%"), ("screen", "100vh")],
    ),
    (
        "screens",
        &[
            ("sm", "640px"),
            ("md", "768px"),
            ("lg", "1024px"),
            ("xl", "1280px"),
            ("2xl", "1536px"),
        ],
    ),
];

const OPACITY_STEPS: &[u32] = &[0, 5, 10, 20, 25, 30, 40, 50, 60, 70, 75, 80, 90, 95, 100];

/// The built-in token table.
pub(crate) static DEFAULT_THEME: Lazy<Namespaces> = Lazy::new(|| {
    let mut namespaces = Namespaces::new();

    let colors = namespaces.entry("colors".to_string()).or_default();
    for (key, value) in [
        ("inherit", "inherit"),
        ("current", "currentColor"),
        ("transparent", "transparent"),
        ("black", "#000"),
        ("white", "#fff"),
    ] {
        colors.insert(key.to_string(), value.to_string());
    }
    for (family, values) in COLOR_FAMILIES {
        for (shade, value) in COLOR_SHADES.iter().zip(values.iter()) {
            colors.insert(format!("{}-{}", family, shade), value.to_string());
        }
    }

    let spacing = namespaces.entry("spacing".to_string()).or_default();
    spacing.insert("0".to_string(), "0px".to_string());
    spacing.insert("px".to_string(), "1px".to_string());
    for step in SPACING_STEPS {
        let rem = step.parse::<f64>().unwrap_or_default() * 0.25;
        spacing.insert(step.to_string(), format!("{}rem", rem));
    }

    let opacity = namespaces.entry("opacity".to_string()).or_default();
    for step in OPACITY_STEPS {
        opacity.insert(step.to_string(), format!("{}", f64::from(*step) / 100.0));
    }

    for (namespace, entries) in STATIC_NAMESPACES {
        let table = namespaces.entry(namespace.to_string()).or_default();
        for (key, value) in entries.iter() {
            table.insert(key.to_string(), value.to_string());
        }
    }

    namespaces
});
