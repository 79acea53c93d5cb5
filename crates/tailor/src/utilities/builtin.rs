//! The built-in utility vocabulary.

use super::{PropertyGroup, UtilityPattern, ValueKind};

use PropertyGroup::*;

const FIXED: &[(&str, PropertyGroup, &[(&str, &str)])] = &[
    // Layout
    ("block", Layout, &[("display", "block")]),
    ("inline-block", Layout, &[("display", "inline-block")]),
    ("inline", Layout, &[("display", "inline")]),
    ("flex", Layout, &[("display", "flex")]),
    ("inline-flex", Layout, &[("display", "inline-flex")]),
    ("grid", Layout, &[("display", "grid")]),
    ("inline-grid", Layout, &[("display", "inline-grid")]),
    ("contents", Layout, &[("display", "contents")]),
    ("hidden", Layout, &[("display", "none")]),
    ("static", Layout, &[("position", "static")]),
    ("fixed", Layout, &[("position", "fixed")]),
    ("absolute", Layout, &[("position", "absolute")]),
    ("relative", Layout, &[("position", "relative")]),
    ("sticky", Layout, &[("position", "sticky")]),
    ("visible", Layout, &[("visibility", "visible")]),
    ("invisible", Layout, &[("visibility", "hidden")]),
    ("overflow-auto", Layout, &[("overflow", "auto")]),
    ("overflow-hidden", Layout, &[("overflow", "hidden")]),
    ("overflow-visible", Layout, &[("overflow", "visible")]),
    ("overflow-scroll", Layout, &[("overflow", "scroll")]),
    ("container", Layout, &[("width", "100%")]),
    // Flexbox
    ("flex-row", Flexbox, &[("flex-direction", "row")]),
    ("flex-row-reverse", Flexbox, &[("flex-direction", "row-reverse")]),
    ("flex-col", Flexbox, &[("flex-direction", "column")]),
    ("flex-col-reverse", Flexbox, &[("flex-direction", "column-reverse")]),
    ("flex-wrap", Flexbox, &[("flex-wrap", "wrap")]),
    ("flex-nowrap", Flexbox, &[("flex-wrap", "nowrap")]),
    ("flex-1", Flexbox, &[("flex", "1 1 0%")]),
    ("flex-auto", Flexbox, &[("flex", "1 1 auto")]),
    ("flex-none", Flexbox, &[("flex", "none")]),
    ("grow", Flexbox, &[("flex-grow", "1")]),
    ("shrink-0", Flexbox, &[("flex-shrink", "0")]),
    ("justify-start", Flexbox, &[("justify-content", "flex-start")]),
    ("justify-end", Flexbox, &[("justify-content", "flex-end")]),
    ("justify-center", Flexbox, &[("justify-content", "center")]),
    ("justify-between", Flexbox, &[("justify-content", "space-between")]),
    ("justify-around", Flexbox, &[("justify-content", "space-around")]),
    ("justify-evenly", Flexbox, &[("justify-content", "space-evenly")]),
    ("items-start", Flexbox, &[("align-items", "flex-start")]),
    ("items-end", Flexbox, &[("align-items", "flex-end")]),
    ("items-center", Flexbox, &[("align-items", "center")]),
    ("items-baseline", Flexbox, &[("align-items", "baseline")]),
    ("items-stretch", Flexbox, &[("align-items", "stretch")]),
    ("self-auto", Flexbox, &[("align-self", "auto")]),
    ("self-start", Flexbox, &[("align-self", "flex-start")]),
    ("self-end", Flexbox, &[("align-self", "flex-end")]),
    ("self-center", Flexbox, &[("align-self", "center")]),
    // Typography
    ("text-left", Typography, &[("text-align", "left")]),
    ("text-center", Typography, &[("text-align", "center")]),
    ("text-right", Typography, &[("text-align", "right")]),
    ("text-justify", Typography, &[("text-align", "justify")]),
    ("italic", Typography, &[("font-style", "italic")]),
    ("not-italic", Typography, &[("font-style", "normal")]),
    ("underline", Typography, &[("text-decoration-line", "underline")]),
    ("line-through", Typography, &[("text-decoration-line", "line-through")]),
    ("no-underline", Typography, &[("text-decoration-line", "none")]),
    ("uppercase", Typography, &[("text-transform", "uppercase")]),
    ("lowercase", Typography, &[("text-transform", "lowercase")]),
    ("capitalize", Typography, &[("text-transform", "capitalize")]),
    ("whitespace-nowrap", Typography, &[("white-space", "nowrap")]),
    (
        "truncate",
        Typography,
        &[
            ("overflow", "hidden"),
            ("text-overflow", "ellipsis"),
            ("white-space", "nowrap"),
        ],
    ),
    // Border
    ("border-solid", Border, &[("border-style", "solid")]),
    ("border-dashed", Border, &[("border-style", "dashed")]),
    ("border-dotted", Border, &[("border-style", "dotted")]),
    ("border-none", Border, &[("border-style", "none")]),
    // Interactivity
    ("cursor-pointer", Interactivity, &[("cursor", "pointer")]),
    ("cursor-default", Interactivity, &[("cursor", "default")]),
    ("cursor-not-allowed", Interactivity, &[("cursor", "not-allowed")]),
    ("select-none", Interactivity, &[("user-select", "none")]),
    ("select-text", Interactivity, &[("user-select", "text")]),
    ("select-all", Interactivity, &[("user-select", "all")]),
    ("pointer-events-none", Interactivity, &[("pointer-events", "none")]),
    ("pointer-events-auto", Interactivity, &[("pointer-events", "auto")]),
];

/// `(prefix, namespace, group, accepts, identity, properties)`
type Themed = (
    &'static str,
    &'static str,
    PropertyGroup,
    ValueKind,
    &'static str,
    &'static [&'static str],
);

const THEMED: &[Themed] = &[
    // Spacing
    ("p", "padding", Spacing, ValueKind::Length, "padding", &["padding"]),
    ("px", "padding", Spacing, ValueKind::Length, "padding-x", &["padding-left", "padding-right"]),
    ("py", "padding", Spacing, ValueKind::Length, "padding-y", &["padding-top", "padding-bottom"]),
    ("pt", "padding", Spacing, ValueKind::Length, "padding-top", &["padding-top"]),
    ("pr", "padding", Spacing, ValueKind::Length, "padding-right", &["padding-right"]),
    ("pb", "padding", Spacing, ValueKind::Length, "padding-bottom", &["padding-bottom"]),
    ("pl", "padding", Spacing, ValueKind::Length, "padding-left", &["padding-left"]),
    ("m", "margin", Spacing, ValueKind::Length, "margin", &["margin"]),
    ("mx", "margin", Spacing, ValueKind::Length, "margin-x", &["margin-left", "margin-right"]),
    ("my", "margin", Spacing, ValueKind::Length, "margin-y", &["margin-top", "margin-bottom"]),
    ("mt", "margin", Spacing, ValueKind::Length, "margin-top", &["margin-top"]),
    ("mr", "margin", Spacing, ValueKind::Length, "margin-right", &["margin-right"]),
    ("mb", "margin", Spacing, ValueKind::Length, "margin-bottom", &["margin-bottom"]),
    ("ml", "margin", Spacing, ValueKind::Length, "margin-left", &["margin-left"]),
    ("gap", "gap", Spacing, ValueKind::Length, "gap", &["gap"]),
    ("gap-x", "gap", Spacing, ValueKind::Length, "column-gap", &["column-gap"]),
    ("gap-y", "gap", Spacing, ValueKind::Length, "row-gap", &["row-gap"]),
    // Sizing
    ("w", "width", Sizing, ValueKind::Length, "width", &["width"]),
    ("h", "height", Sizing, ValueKind::Length, "height", &["height"]),
    ("min-w", "minWidth", Sizing, ValueKind::Length, "min-width", &["min-width"]),
    ("max-w", "maxWidth", Sizing, ValueKind::Length, "max-width", &["max-width"]),
    ("min-h", "minHeight", Sizing, ValueKind::Length, "min-height", &["min-height"]),
    // Layout
    ("inset", "inset", Layout, ValueKind::Length, "inset", &["inset"]),
    ("top", "inset", Layout, ValueKind::Length, "top", &["top"]),
    ("right", "inset", Layout, ValueKind::Length, "right", &["right"]),
    ("bottom", "inset", Layout, ValueKind::Length, "bottom", &["bottom"]),
    ("left", "inset", Layout, ValueKind::Length, "left", &["left"]),
    ("z", "zIndex", Layout, ValueKind::Number, "z-index", &["z-index"]),
    // Typography: for a shared prefix the later entry is tried first.
    ("text", "fontSize", Typography, ValueKind::Length, "font-size", &["font-size"]),
    ("text", "colors", Typography, ValueKind::Color, "color", &["color"]),
    ("font", "fontFamily", Typography, ValueKind::Any, "font-family", &["font-family"]),
    ("font", "fontWeight", Typography, ValueKind::Number, "font-weight", &["font-weight"]),
    ("leading", "lineHeight", Typography, ValueKind::Any, "line-height", &["line-height"]),
    // Background
    ("bg", "colors", Background, ValueKind::Color, "background-color", &["background-color"]),
    // Border
    ("border", "borderWidth", Border, ValueKind::Length, "border-width", &["border-width"]),
    ("border", "colors", Border, ValueKind::Color, "border-color", &["border-color"]),
    ("border-t", "borderWidth", Border, ValueKind::Length, "border-top-width", &["border-top-width"]),
    ("border-r", "borderWidth", Border, ValueKind::Length, "border-right-width", &["border-right-width"]),
    ("border-b", "borderWidth", Border, ValueKind::Length, "border-bottom-width", &["border-bottom-width"]),
    ("border-l", "borderWidth", Border, ValueKind::Length, "border-left-width", &["border-left-width"]),
    ("rounded", "borderRadius", Border, ValueKind::Length, "border-radius", &["border-radius"]),
    // Effects
    ("opacity", "opacity", Effects, ValueKind::Number, "opacity", &["opacity"]),
    ("shadow", "boxShadow", Effects, ValueKind::Any, "box-shadow", &["box-shadow"]),
];

/// Every built-in pattern in registration order.
pub fn patterns() -> Vec<UtilityPattern> {
    let fixed = FIXED
        .iter()
        .map(|(class, group, declarations)| UtilityPattern::fixed(class, *group, declarations));
    let themed = THEMED
        .iter()
        .map(|(prefix, namespace, group, accepts, property, properties)| {
            UtilityPattern::themed(prefix, namespace, *group, *accepts, property, properties)
        });
    fixed.chain(themed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::{ClassPattern, UtilityKind};
    use std::collections::HashSet;

    #[test]
    fn test_fixed_classes_are_unique() {
        let mut seen = HashSet::new();
        for (class, _, _) in FIXED {
            assert!(seen.insert(*class), "duplicate built-in class {}", class);
        }
    }

    #[test]
    fn test_themed_patterns_are_prefixes() {
        for pattern in patterns() {
            match (&pattern.pattern, &pattern.kind) {
                (ClassPattern::Prefix(_), UtilityKind::Themed { properties, .. }) => {
                    assert!(!properties.is_empty())
                }
                (ClassPattern::Exact(_), UtilityKind::Static { declarations }) => {
                    assert!(!declarations.is_empty())
                }
                other => panic!("unexpected built-in shape {:?}", other),
            }
        }
    }
}
