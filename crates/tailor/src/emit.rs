//! Stylesheet serialization.
//!
//! Output is one rule per line, minified inside the line:
//!
//! ```text
//! .text-primary{color:#1e3a8a}
//! @media (min-width:768px){.md\:hidden{display:none}}
//! ```
//!
//! Class spellings are escaped with `cssparser::serialize_identifier`, so
//! every character the extractor accepts is valid in the selector.

use std::fmt::{self, Write};

use cssparser::serialize_identifier;

use crate::config::DarkMode;
use crate::modifier::Modifier;
use crate::ruleset::{Rule, Ruleset};

/// Serializes a [`Ruleset`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CssEmitter {
    dark_mode: DarkMode,
}

impl CssEmitter {
    pub fn new(dark_mode: DarkMode) -> Self {
        Self { dark_mode }
    }

    pub fn emit(&self, ruleset: &Ruleset) -> Result<String, fmt::Error> {
        let mut css = String::new();
        self.emit_to(ruleset, &mut css)?;
        Ok(css)
    }

    pub fn emit_to<W: Write>(&self, ruleset: &Ruleset, out: &mut W) -> fmt::Result {
        for rule in ruleset {
            self.write_rule(rule, out)?;
        }
        Ok(())
    }

    fn write_rule<W: Write>(&self, rule: &Rule, out: &mut W) -> fmt::Result {
        let variants = &rule.descriptor.variants;

        let mut wrappers = 0;
        for modifier in variants {
            match modifier {
                Modifier::Breakpoint(screen) => {
                    write!(out, "@media (min-width:{}){{", screen.min_width)?;
                    wrappers += 1;
                }
                Modifier::Dark if self.dark_mode == DarkMode::Media => {
                    out.write_str("@media (prefers-color-scheme:dark){")?;
                    wrappers += 1;
                }
                _ => {}
            }
        }

        for (i, class) in rule.classes.iter().enumerate() {
            if i > 0 {
                out.write_char(',')?;
            }
            out.write_str(&self.selector(class, variants)?)?;
        }

        out.write_char('{')?;
        let suffix = if rule.descriptor.important {
            " !important"
        } else {
            ""
        };
        for (i, declaration) in rule.descriptor.declarations.iter().enumerate() {
            if i > 0 {
                out.write_char(';')?;
            }
            write!(out, "{}:{}{}", declaration.property, declaration.value, suffix)?;
        }
        out.write_char('}')?;

        for _ in 0..wrappers {
            out.write_char('}')?;
        }
        out.write_char('\n')
    }

    /// Builds the selector for one class spelling.
    pub fn selector(&self, class: &str, variants: &[Modifier]) -> Result<String, fmt::Error> {
        let mut selector = String::from(".");
        serialize_identifier(class, &mut selector)?;

        for modifier in variants {
            if let Modifier::State(state) = modifier {
                selector.push_str(state.pseudo_class());
            }
        }
        for modifier in variants {
            if let Modifier::Arbitrary(pattern) = modifier {
                selector = pattern.replace('&', &selector);
            }
        }
        if self.dark_mode == DarkMode::Class && variants.contains(&Modifier::Dark) {
            selector.insert_str(0, ".dark ");
        }
        Ok(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Resolver;
    use crate::ruleset::RuleCollector;
    use crate::tokens::TokenStore;
    use crate::utilities::PatternIndex;

    fn render(dark_mode: DarkMode, classes: &[&str]) -> String {
        let tokens = TokenStore::builder()
            .defaults()
            .extend("colors", [("primary", "#1e3a8a")])
            .build();
        let index = PatternIndex::with_builtins();
        let resolver = Resolver::new(&tokens, &index);

        let mut collector = RuleCollector::new();
        for class in classes {
            collector.insert(*class, resolver.resolve(class).unwrap());
        }
        CssEmitter::new(dark_mode)
            .emit(&collector.into_ruleset())
            .unwrap()
    }

    // =========================================================================
    // Rules
    // =========================================================================

    #[test]
    fn test_plain_and_breakpoint_rule() {
        assert_eq!(
            render(DarkMode::Media, &["text-primary", "md:hidden"]),
            ".text-primary{color:#1e3a8a}\n@media (min-width:768px){.md\\:hidden{display:none}}\n"
        );
    }

    #[test]
    fn test_multiple_declarations_and_important() {
        assert_eq!(
            render(DarkMode::Media, &["!px-4"]),
            ".\\!px-4{padding-left:1rem !important;padding-right:1rem !important}\n"
        );
    }

    #[test]
    fn test_spellings_join_into_one_selector_list() {
        assert_eq!(
            render(DarkMode::Media, &["md:hover:p-4", "hover:md:p-4"]),
            "@media (min-width:768px){.hover\\:md\\:p-4:hover,.md\\:hover\\:p-4:hover{padding:1rem}}\n"
        );
    }

    #[test]
    fn test_empty_ruleset_is_empty_output() {
        assert_eq!(render(DarkMode::Media, &[]), "");
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    #[test]
    fn test_escaping() {
        let emitter = CssEmitter::default();
        assert_eq!(emitter.selector("w-1/2", &[]).unwrap(), ".w-1\\/2");
        assert_eq!(
            emitter.selector("bg-[#ff0000]", &[]).unwrap(),
            ".bg-\\[\\#ff0000\\]"
        );
        assert_eq!(emitter.selector("p-0.5", &[]).unwrap(), ".p-0\\.5");
        assert_eq!(emitter.selector("w-[50%]", &[]).unwrap(), ".w-\\[50\\%\\]");
    }

    #[test]
    fn test_leading_digit_is_escaped() {
        let emitter = CssEmitter::default();
        assert_eq!(emitter.selector("2xl", &[]).unwrap(), ".\\32 xl");
    }

    #[test]
    fn test_arbitrary_selector_substitutes_ampersand() {
        assert_eq!(
            render(DarkMode::Media, &["[&>*]:p-4"]),
            ".\\[\\&\\>\\*\\]\\:p-4>*{padding:1rem}\n"
        );
    }

    #[test]
    fn test_dark_mode_strategies() {
        assert_eq!(
            render(DarkMode::Media, &["dark:bg-black"]),
            "@media (prefers-color-scheme:dark){.dark\\:bg-black{background-color:#000}}\n"
        );
        assert_eq!(
            render(DarkMode::Class, &["dark:bg-black"]),
            ".dark .dark\\:bg-black{background-color:#000}\n"
        );
    }

    #[test]
    fn test_breakpoint_wraps_dark_media() {
        assert_eq!(
            render(DarkMode::Media, &["dark:md:hidden"]),
            "@media (min-width:768px){@media (prefers-color-scheme:dark){.dark\\:md\\:hidden{display:none}}}\n"
        );
    }
}
