//! Template root resolution and layer addressing
//!
//! The template root is organized as `{language}/{type}` trees plus the
//! shared `common`, language-specific `{language}/common`, and `common.vue`
//! overlay directories. A `package.json.template` at the root is the
//! manifest template rendered into each scaffolded project.

use crate::error::ScaffoldError;
use crate::toolkit::{ExtensionType, ProjectLanguage, ToolkitConfig};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Filename suffix marking files that are rendered rather than copied verbatim
pub const MARKER_SUFFIX: &str = "template";

/// Filename of a manifest fragment, and of the root manifest template
pub const MANIFEST_TEMPLATE: &str = "package.json.template";

/// Resolved template root plus the layer paths derived from it
#[derive(Debug, Clone)]
pub struct TemplateLayout {
    root: PathBuf,
}

impl TemplateLayout {
    /// Resolve the template root: an explicit path wins, then the
    /// environment override, then the `templates` directory shipped next to
    /// the running executable.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = explicit {
            return Ok(Self { root });
        }
        if let Ok(root) = std::env::var(ToolkitConfig::TEMPLATE_ROOT_ENV) {
            return Ok(Self {
                root: PathBuf::from(root),
            });
        }
        let exe = std::env::current_exe().context("failed to locate the running executable")?;
        let root = exe
            .parent()
            .context("executable has no parent directory")?
            .join("templates");
        Ok(Self { root })
    }

    pub fn from_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The type+language-specific template directory
    pub fn type_dir(&self, language: ProjectLanguage, extension_type: &ExtensionType) -> PathBuf {
        self.root
            .join(language.dir_name())
            .join(extension_type.name())
    }

    /// The language-agnostic common tree
    pub fn common_dir(&self) -> PathBuf {
        self.root.join("common")
    }

    /// The language-specific common tree
    pub fn language_common_dir(&self, language: ProjectLanguage) -> PathBuf {
        self.root.join(language.dir_name()).join("common")
    }

    /// The Vue overlay applied to app extension types
    pub fn app_overlay_dir(&self) -> PathBuf {
        self.root.join("common.vue")
    }

    /// The manifest template rendered into `<destination>/package.json`
    pub fn manifest_template(&self) -> PathBuf {
        self.root.join(MANIFEST_TEMPLATE)
    }

    /// Ordered copy layers for a type/language pair; later layers overwrite
    /// files from earlier ones
    pub fn copy_layers(
        &self,
        config: &ToolkitConfig,
        language: ProjectLanguage,
        extension_type: &ExtensionType,
    ) -> Vec<PathBuf> {
        let mut layers = vec![
            self.type_dir(language, extension_type),
            self.common_dir(),
            self.language_common_dir(language),
        ];
        if config.is_app_type(extension_type) {
            layers.push(self.app_overlay_dir());
        }
        layers
    }

    /// Check whether boilerplate ships for the type/language pair.
    ///
    /// A template counts as supported when it has an entry file at its root
    /// or under `src/`. Runs before any filesystem mutation.
    pub fn probe_support(
        &self,
        language: ProjectLanguage,
        extension_type: &ExtensionType,
    ) -> Result<(), ScaffoldError> {
        let dir = self.type_dir(language, extension_type);
        let entry = format!("index.{}", language.entry_extension());

        if dir.join(&entry).is_file() || dir.join("src").join(&entry).is_file() {
            Ok(())
        } else {
            Err(ScaffoldError::UnsupportedTemplate {
                extension_type: extension_type.name().to_string(),
                language,
            })
        }
    }
}
