//! Property-based tests for output determinism.

use proptest::prelude::*;
use std::fs;
use tailor::{Config, Engine, TokenStore};
use tempfile::TempDir;

const POOL: &[&str] = &[
    "flex",
    "hidden",
    "p-4",
    "md:p-4",
    "hover:md:p-4",
    "md:hover:p-4",
    "px-2",
    "text-lg",
    "text-red-500",
    "bg-[#ff0000]",
    "dark:bg-black",
    "w-1/2",
    "!font-bold",
    "font-bold!",
    "rounded-lg",
    "lg:hidden",
    "[&>*]:m-2",
    "not-a-class",
    "btn-primary",
    "card",
];

fn generate(files: &[Vec<&str>]) -> String {
    let tmp = TempDir::new().unwrap();
    for (i, classes) in files.iter().enumerate() {
        let body = format!("<div class=\"{}\"></div>", classes.join(" "));
        fs::write(tmp.path().join(format!("{}.html", i)), body).unwrap();
    }
    let config = Config::from_yaml("content: ['*.html']\nplugins: [daisyui]\n")
        .unwrap()
        .with_root(tmp.path());
    Engine::from_config(&config).unwrap().generate().unwrap().css
}

/// Every line is one complete rule: braces balance outside quoted strings
/// and escapes, and no `;` appears outside a block.
fn rules_are_well_formed(css: &str) -> bool {
    css.lines().all(|line| {
        let mut depth = 0i32;
        let mut quote = None;
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            if let Some(q) = quote {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '\\' => {
                    chars.next();
                }
                '"' | '\'' => quote = Some(c),
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                ';' if depth == 0 => return false,
                _ => {}
            }
        }
        depth == 0 && quote.is_none()
    })
}

fn bracketed() -> impl Strategy<Value = String> {
    let inner = "[a-z0-9#&{};:!()'\\[\\]%.,_-]{1,12}";
    prop_oneof![
        (prop::sample::select(vec!["bg-", "text-", "w-", "p-"]), inner)
            .prop_map(|(prefix, inner)| format!("{}[{}]", prefix, inner)),
        inner.prop_map(|inner| format!("[{}]", inner)),
        inner.prop_map(|inner| format!("[&{}]:p-4", inner)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Spreading the same classes over files in any order and grouping
    /// produces the same stylesheet.
    #[test]
    fn output_ignores_file_and_class_order(
        classes in prop::sample::subsequence(POOL.to_vec(), 1..POOL.len()).prop_shuffle(),
        cuts in prop::collection::vec(0usize..4, 0..6),
    ) {
        let mut files: Vec<Vec<&str>> = vec![Vec::new(); 4];
        for (i, class) in classes.iter().copied().enumerate() {
            let slot = cuts.get(i).copied().unwrap_or(i % 4);
            files[slot].push(class);
        }

        let mut sorted = classes.clone();
        sorted.sort();
        let reference = generate(&[sorted]);

        prop_assert_eq!(generate(&files), reference);
    }

    /// Malformed bracket content never leaks out of its rule.
    #[test]
    fn bracket_content_cannot_break_the_stylesheet(
        candidates in prop::collection::vec(bracketed(), 1..8),
    ) {
        let mut classes: Vec<&str> = candidates.iter().map(String::as_str).collect();
        classes.extend(["flex", "md:p-4"]);

        let css = generate(&[classes]);
        prop_assert!(rules_are_well_formed(&css), "{}", css);
        prop_assert!(css.contains(".flex{display:flex}"), "{}", css);
    }

    /// Extending a namespace keeps every base key and adds the new one.
    #[test]
    fn extend_is_a_union(key in "[a-z]{1,8}", value in "#[0-9a-f]{6}") {
        let base = TokenStore::with_defaults();
        let extended = TokenStore::builder()
            .defaults()
            .extend("colors", [(key.clone(), value.clone())])
            .build();

        for token in base.namespace("colors") {
            if token.key != key {
                prop_assert_eq!(
                    &extended.resolve("colors", &token.key).unwrap().value,
                    &token.value
                );
            }
        }
        prop_assert_eq!(&extended.resolve("colors", &key).unwrap().value, &value);
    }
}
