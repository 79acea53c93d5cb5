//! End-to-end builds over on-disk content trees.

use std::fs;
use std::io;
use std::path::Path;

use tailor::utilities::{PropertyGroup, UtilityPattern};
use tailor::{
    BuildError, Config, ConfigError, Engine, Plugin, PluginCatalog, WarningReason,
};
use tempfile::TempDir;

// ============================================================================
// Helpers
// ============================================================================

fn project(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, content) in files {
        let path = tmp.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    tmp
}

fn config(root: &Path, yaml: &str) -> Config {
    Config::from_yaml(yaml).unwrap().with_root(root)
}

fn build(config: &Config) -> (String, tailor::BuildResult) {
    let mut sink = Vec::new();
    let result = tailor::build(config, &mut sink).unwrap();
    (String::from_utf8(sink).unwrap(), result)
}

struct Override {
    name: &'static str,
    display: &'static str,
}

impl Plugin for Override {
    fn name(&self) -> &str {
        self.name
    }

    fn contribute_utilities(&self) -> Vec<UtilityPattern> {
        vec![UtilityPattern::fixed(
            "flex",
            PropertyGroup::Layout,
            &[("display", self.display)],
        )]
    }
}

struct Branded(&'static str);

impl Plugin for Branded {
    fn name(&self) -> &str {
        self.0
    }

    fn contribute_utilities(&self) -> Vec<UtilityPattern> {
        Vec::new()
    }

    fn contribute_theme_namespaces(&self) -> Vec<String> {
        vec!["brand".to_string()]
    }
}

fn catalog() -> PluginCatalog {
    PluginCatalog::default()
        .with("grid-flex", || {
            Box::new(Override {
                name: "grid-flex",
                display: "grid",
            })
        })
        .with("contents-flex", || {
            Box::new(Override {
                name: "contents-flex",
                display: "contents",
            })
        })
        .with("brand-a", || Box::new(Branded("brand-a")))
        .with("brand-b", || Box::new(Branded("brand-b")))
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_primary_color_and_breakpoint_example() {
    let tmp = project(&[("a.html", r#"<div class="text-primary md:hidden">"#)]);
    let config = config(
        tmp.path(),
        r##"
content: ["a.html"]
theme:
  extend:
    colors:
      primary: "#1e3a8a"
"##,
    );

    let (css, result) = build(&config);

    assert_eq!(
        css,
        ".text-primary{color:#1e3a8a}\n@media (min-width:768px){.md\\:hidden{display:none}}\n"
    );
    assert_eq!(result.generated_rule_count, 2);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_builds_are_idempotent() {
    let tmp = project(&[
        ("t/a.html", r#"<p class="p-4 hover:bg-red-500 md:w-1/2">"#),
        ("t/b.html", r#"<p class="dark:text-white mx-auto">"#),
    ]);
    let config = config(tmp.path(), "content: ['t/**/*.html']");

    let (first, _) = build(&config);
    let (second, _) = build(&config);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_glob_order_does_not_change_output() {
    let tmp = project(&[
        ("core/templates/index.html", r#"<p class="flex p-2">"#),
        ("accounts/templates/login.html", r#"<p class="p-2 text-lg">"#),
        ("orgs/templates/list.html", r#"<p class="md:flex text-gray-500">"#),
    ]);
    let a = config(
        tmp.path(),
        "content: [core/templates/**/*.html, accounts/templates/**/*.html, orgs/templates/**/*.html]",
    );
    let b = config(
        tmp.path(),
        "content: [orgs/templates/**/*.html, core/templates/**/*.html, accounts/templates/**/*.html]",
    );

    assert_eq!(build(&a).0, build(&b).0);
}

#[test]
fn test_repeated_class_across_files_is_one_rule() {
    let files: Vec<(String, String)> = (0..10)
        .map(|i| (format!("pages/{}.html", i), "<i class=\"p-4\"></i>\n".repeat(10)))
        .collect();
    let refs: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
    let tmp = project(&refs);
    let config = config(tmp.path(), "content: ['pages/*.html']");

    let (css, result) = build(&config);
    assert_eq!(css, ".p-4{padding:1rem}\n");
    assert_eq!(result.generated_rule_count, 1);
}

#[test]
fn test_prose_produces_an_empty_stylesheet() {
    let tmp = project(&[(
        "notes.txt",
        "The quick brown fox jumps over the lazy dog.\nNothing to see here: move along!\n",
    )]);
    let config = config(tmp.path(), "content: [notes.txt]");

    let (css, result) = build(&config);
    assert_eq!(css, "");
    assert_eq!(result.generated_rule_count, 0);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_components_use_the_active_preset() {
    let tmp = project(&[("a.html", r#"<button class="btn-primary">"#)]);
    let light = config(tmp.path(), "content: [a.html]\nplugins: [daisyui]\n");
    let dark = config(
        tmp.path(),
        "content: [a.html]\nplugins: [daisyui]\ndaisyui:\n  themes: [dark]\n",
    );

    assert_eq!(
        build(&light).0,
        ".btn-primary{border-color:#570df8;background-color:#570df8;color:#e0d2fe}\n"
    );
    assert_eq!(
        build(&dark).0,
        ".btn-primary{border-color:#661ae6;background-color:#661ae6;color:#ffffff}\n"
    );
}

#[test]
fn test_components_without_the_plugin_do_not_resolve() {
    let tmp = project(&[("a.html", r#"<button class="btn btn-primary">"#)]);
    let config = config(tmp.path(), "content: [a.html]");
    assert_eq!(build(&config).0, "");
}

// ============================================================================
// Plugins
// ============================================================================

#[test]
fn test_plugin_pattern_wins_over_builtin() {
    let tmp = project(&[("a.html", r#"<div class="flex">"#)]);
    let config = config(tmp.path(), "content: [a.html]\nplugins: [grid-flex]\n");

    let engine = Engine::with_catalog(&config, &catalog()).unwrap();
    assert_eq!(engine.generate().unwrap().css, ".flex{display:grid}\n");
}

#[test]
fn test_later_plugin_wins_over_earlier() {
    let tmp = project(&[("a.html", r#"<div class="flex">"#)]);
    let config = config(
        tmp.path(),
        "content: [a.html]\nplugins: [grid-flex, contents-flex]\n",
    );

    let engine = Engine::with_catalog(&config, &catalog()).unwrap();
    assert_eq!(engine.generate().unwrap().css, ".flex{display:contents}\n");
}

#[test]
fn test_duplicate_namespace_aborts_before_scanning() {
    let tmp = project(&[("a.html", r#"<div class="flex">"#)]);
    let config = config(tmp.path(), "content: [a.html]\nplugins: [brand-a, brand-b]\n");

    let err = Engine::with_catalog(&config, &catalog()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::DuplicateNamespace { ref namespace, .. } if namespace == "brand"
    ));
}

// ============================================================================
// Warnings and failures
// ============================================================================

#[test]
fn test_missing_directory_is_a_warning() {
    let tmp = project(&[("core/templates/index.html", r#"<p class="flex">"#)]);
    let config = config(
        tmp.path(),
        "content: [./core/templates/**/*.html, ./orgs/templates/**/*.html]",
    );

    let (css, result) = build(&config);
    assert_eq!(css, ".flex{display:flex}\n");
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].reason, WarningReason::MissingDirectory);
    assert!(result.warnings[0].file.ends_with("orgs/templates"));
}

#[test]
fn test_unreadable_file_is_a_warning() {
    let tmp = project(&[("good.html", r#"<p class="flex">"#)]);
    fs::write(tmp.path().join("bad.html"), [0xff, 0xfe, 0x00]).unwrap();
    let config = config(tmp.path(), "content: ['*.html']");

    let (css, result) = build(&config);
    assert_eq!(css, ".flex{display:flex}\n");
    assert_eq!(result.warnings.len(), 1);
    assert!(matches!(result.warnings[0].reason, WarningReason::Unreadable(_)));
}

#[test]
fn test_unknown_preset_writes_nothing() {
    let tmp = project(&[("a.html", r#"<p class="flex">"#)]);
    let config = config(
        tmp.path(),
        "content: [a.html]\nplugins: [daisyui]\ndaisyui:\n  themes: [retro]\n",
    );

    let mut sink = Vec::new();
    let err = tailor::build(&config, &mut sink).unwrap_err();
    assert!(matches!(
        err,
        BuildError::Config(ConfigError::UnknownPreset { .. })
    ));
    assert!(sink.is_empty());
}

#[test]
fn test_invalid_glob_is_fatal() {
    let tmp = project(&[]);
    let config = config(tmp.path(), "content: ['a/[z']");

    let mut sink = Vec::new();
    let err = tailor::build(&config, &mut sink).unwrap_err();
    assert!(matches!(err, BuildError::Config(ConfigError::InvalidGlob(_))));
    assert!(sink.is_empty());
}

#[test]
fn test_sink_errors_are_reported() {
    struct Broken;

    impl io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let tmp = project(&[("a.html", r#"<p class="flex">"#)]);
    let config = config(tmp.path(), "content: [a.html]");

    let err = tailor::build(&config, &mut Broken).unwrap_err();
    assert!(matches!(err, BuildError::Io(_)));
    assert!(err.to_string().contains("disk full"));
}

// ============================================================================
// Configuration files
// ============================================================================

#[test]
fn test_globs_are_relative_to_the_config_file() {
    let tmp = project(&[
        ("site/tailor.yaml", "content:\n  - ./templates/**/*.html\n"),
        ("site/templates/home.html", r#"<p class="italic">"#),
    ]);

    let config = Config::from_file(tmp.path().join("site/tailor.yaml")).unwrap();
    let (css, result) = build(&config);

    assert_eq!(css, ".italic{font-style:italic}\n");
    assert!(result.warnings.is_empty());
}
