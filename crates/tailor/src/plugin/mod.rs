//! Plugins: extra utility vocabulary and theme namespaces.
//!
//! A [`Plugin`] is installed into a [`PluginRegistry`] at configuration load
//! and never changes afterwards. Install order is the `plugins` order of the
//! configuration; for colliding patterns the later plugin wins over earlier
//! plugins and over the built-ins. Each override is logged at `debug`.
//!
//! Plugins named in configuration are created through a [`PluginCatalog`].
//! The default catalog provides the built-in component library
//! ([`ComponentLibrary`], registered as `daisyui`).

mod components;

use std::collections::BTreeMap;
use std::fmt;

pub use components::ComponentLibrary;

use crate::error::ConfigError;
use crate::tokens::ThemeToken;
use crate::utilities::UtilityPattern;

/// Light or dark presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorScheme::Light => write!(f, "light"),
            ColorScheme::Dark => write!(f, "dark"),
        }
    }
}

/// A named set of tokens a plugin offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePreset {
    pub name: String,
    pub color_scheme: ColorScheme,
    pub tokens: Vec<ThemeToken>,
}

/// An installable extension.
pub trait Plugin: Send + Sync {
    /// Name used in configuration.
    fn name(&self) -> &str;

    /// Utility patterns this plugin adds.
    fn contribute_utilities(&self) -> Vec<UtilityPattern>;

    /// Theme namespaces this plugin owns. No two installed plugins may share one.
    fn contribute_theme_namespaces(&self) -> Vec<String> {
        Vec::new()
    }

    /// Presets, in the plugin's preferred order. The first is the default.
    fn presets(&self) -> Vec<ThemePreset> {
        Vec::new()
    }
}

struct Installed {
    plugin: Box<dyn Plugin>,
    namespaces: Vec<String>,
    presets: Vec<ThemePreset>,
    active: Option<usize>,
}

/// Installed plugins in install order.
#[derive(Default)]
pub struct PluginRegistry {
    installed: Vec<Installed>,
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.installed.iter().map(|i| i.plugin.name()))
            .finish()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a plugin after the ones already installed.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateNamespace`] when the plugin declares a theme
    /// namespace an installed plugin already owns.
    pub fn install(&mut self, plugin: Box<dyn Plugin>) -> Result<(), ConfigError> {
        let namespaces = plugin.contribute_theme_namespaces();
        for namespace in &namespaces {
            if let Some(owner) = self
                .installed
                .iter()
                .find(|i| i.namespaces.contains(namespace))
            {
                return Err(ConfigError::DuplicateNamespace {
                    namespace: namespace.clone(),
                    first: owner.plugin.name().to_string(),
                    second: plugin.name().to_string(),
                });
            }
        }

        let presets = plugin.presets();
        let active = if presets.is_empty() { None } else { Some(0) };
        tracing::debug!(
            plugin = plugin.name(),
            namespaces = ?namespaces,
            presets = presets.len(),
            "plugin installed"
        );

        self.installed.push(Installed {
            plugin,
            namespaces,
            presets,
            active,
        });
        Ok(())
    }

    /// Activates a preset from `names`.
    ///
    /// Every name must be one of the plugin's presets; the first one becomes
    /// active. An empty list keeps the default.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownPreset`] for a name the plugin does not offer,
    /// [`ConfigError::UnknownKey`] when the plugin is not installed.
    pub fn activate_presets(&mut self, plugin: &str, names: &[String]) -> Result<(), ConfigError> {
        let installed = self
            .installed
            .iter_mut()
            .find(|i| i.plugin.name() == plugin)
            .ok_or_else(|| ConfigError::UnknownKey(plugin.to_string()))?;

        let mut first = None;
        for name in names {
            let position = installed
                .presets
                .iter()
                .position(|p| &p.name == name)
                .ok_or_else(|| ConfigError::UnknownPreset {
                    plugin: plugin.to_string(),
                    preset: name.clone(),
                    available: installed.presets.iter().map(|p| p.name.clone()).collect(),
                })?;
            first.get_or_insert(position);
        }

        if let Some(position) = first {
            if names.len() > 1 {
                tracing::debug!(
                    plugin,
                    active = %names[0],
                    "several presets listed, only the first is active"
                );
            }
            installed.active = Some(position);
            let preset = &installed.presets[position];
            tracing::debug!(
                plugin,
                preset = %preset.name,
                color_scheme = %preset.color_scheme,
                "preset activated"
            );
        }
        Ok(())
    }

    pub fn contains(&self, plugin: &str) -> bool {
        self.installed.iter().any(|i| i.plugin.name() == plugin)
    }

    /// Plugin names in install order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.installed.iter().map(|i| i.plugin.name())
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    /// The active preset of a plugin.
    pub fn active_preset(&self, plugin: &str) -> Option<&ThemePreset> {
        let installed = self.installed.iter().find(|i| i.plugin.name() == plugin)?;
        installed.active.map(|i| &installed.presets[i])
    }

    /// Tokens of every active preset, in install order.
    pub fn active_tokens(&self) -> impl Iterator<Item = &ThemeToken> {
        self.installed
            .iter()
            .filter_map(|i| i.active.map(|a| &i.presets[a]))
            .flat_map(|preset| preset.tokens.iter())
    }

    /// `(plugin name, patterns)` in install order.
    pub fn utilities(&self) -> impl Iterator<Item = (&str, Vec<UtilityPattern>)> + '_ {
        self.installed
            .iter()
            .map(|i| (i.plugin.name(), i.plugin.contribute_utilities()))
    }
}

type PluginFactory = Box<dyn Fn() -> Box<dyn Plugin> + Send + Sync>;

/// Named plugin constructors used to resolve the `plugins` list.
pub struct PluginCatalog {
    factories: BTreeMap<String, PluginFactory>,
}

impl fmt::Debug for PluginCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}

impl Default for PluginCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.register("daisyui", || Box::new(ComponentLibrary::new()));
        catalog
    }
}

impl PluginCatalog {
    /// A catalog without any plugin.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registers a constructor, replacing any earlier one of the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Plugin> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Plugin> + Send + Sync + 'static,
    {
        self.register(name, factory);
        self
    }

    /// Creates a plugin by name.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownPlugin`] when no constructor is registered.
    pub fn create(&self, name: &str) -> Result<Box<dyn Plugin>, ConfigError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| ConfigError::UnknownPlugin(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::PropertyGroup;

    struct Stub {
        name: &'static str,
        namespaces: Vec<String>,
    }

    impl Plugin for Stub {
        fn name(&self) -> &str {
            self.name
        }

        fn contribute_utilities(&self) -> Vec<UtilityPattern> {
            vec![UtilityPattern::fixed(
                "flex",
                PropertyGroup::Layout,
                &[("display", "grid")],
            )]
        }

        fn contribute_theme_namespaces(&self) -> Vec<String> {
            self.namespaces.clone()
        }
    }

    fn stub(name: &'static str, namespaces: &[&str]) -> Box<dyn Plugin> {
        Box::new(Stub {
            name,
            namespaces: namespaces.iter().map(|s| s.to_string()).collect(),
        })
    }

    // =========================================================================
    // Registry
    // =========================================================================

    #[test]
    fn test_install_order_is_kept() {
        let mut registry = PluginRegistry::new();
        registry.install(stub("b", &["x"])).unwrap();
        registry.install(stub("a", &["y"])).unwrap();

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["b", "a"]);
        let utilities: Vec<&str> = registry.utilities().map(|(name, _)| name).collect();
        assert_eq!(utilities, vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate_namespace_is_fatal() {
        let mut registry = PluginRegistry::new();
        registry.install(stub("first", &["brand"])).unwrap();
        let err = registry.install(stub("second", &["other", "brand"])).unwrap_err();

        match err {
            ConfigError::DuplicateNamespace {
                namespace,
                first,
                second,
            } => {
                assert_eq!(namespace, "brand");
                assert_eq!(first, "first");
                assert_eq!(second, "second");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_default_preset_is_first() {
        let mut registry = PluginRegistry::new();
        registry.install(Box::new(ComponentLibrary::new())).unwrap();

        assert_eq!(registry.active_preset("daisyui").unwrap().name, "light");
        assert!(registry.active_tokens().any(|t| t.key == "primary"));
    }

    #[test]
    fn test_activate_first_listed_preset() {
        let mut registry = PluginRegistry::new();
        registry.install(Box::new(ComponentLibrary::new())).unwrap();
        registry
            .activate_presets("daisyui", &["dark".into(), "light".into()])
            .unwrap();

        let preset = registry.active_preset("daisyui").unwrap();
        assert_eq!(preset.name, "dark");
        assert_eq!(preset.color_scheme, ColorScheme::Dark);
    }

    #[test]
    fn test_unknown_preset_is_fatal() {
        let mut registry = PluginRegistry::new();
        registry.install(Box::new(ComponentLibrary::new())).unwrap();
        let err = registry
            .activate_presets("daisyui", &["light".into(), "retro".into()])
            .unwrap_err();

        assert!(matches!(err, ConfigError::UnknownPreset { ref preset, .. } if preset == "retro"));
        assert_eq!(registry.active_preset("daisyui").unwrap().name, "light");
    }

    #[test]
    fn test_presets_for_missing_plugin() {
        let mut registry = PluginRegistry::new();
        let err = registry.activate_presets("daisyui", &[]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    #[test]
    fn test_default_catalog_knows_daisyui() {
        let catalog = PluginCatalog::default();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["daisyui"]);
        assert_eq!(catalog.create("daisyui").unwrap().name(), "daisyui");
    }

    #[test]
    fn test_unknown_plugin() {
        let err = PluginCatalog::default().create("flowbite").err().unwrap();
        assert!(matches!(err, ConfigError::UnknownPlugin(name) if name == "flowbite"));
    }

    #[test]
    fn test_custom_catalog_entry() {
        let catalog = PluginCatalog::empty().with("grid-flex", || stub("grid-flex", &[]));
        assert!(catalog.create("grid-flex").is_ok());
        assert!(catalog.create("daisyui").is_err());
    }
}
