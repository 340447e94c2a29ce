//! Toolkit configuration: the extension-type set, language selection,
//! documentation links, and the install command.
//!
//! The valid-type set is a single configuration value rather than a literal
//! list repeated at call sites, and can be adjusted without code changes via
//! the `CREATE_EXTENSION_TYPES` environment variable.

use crate::error::ScaffoldError;
use std::fmt;

/// Default set of extension types that can be scaffolded
const DEFAULT_EXTENSION_TYPES: &[&str] = &[
    "display",
    "endpoint",
    "hook",
    "interface",
    "layout",
    "module",
];

/// Types whose boilerplate runs inside the app and carries the Vue overlay
const APP_EXTENSION_TYPES: &[&str] = &["display", "interface", "layout", "module"];

/// Product configuration for the extension toolkit
#[derive(Debug, Clone)]
pub struct ToolkitConfig {
    /// Valid extension type names, in display order
    pub extension_types: Vec<String>,

    /// Subset of types that receive the `common.vue` overlay
    pub app_types: Vec<String>,

    /// Documentation URL printed on unsupported combinations and on success
    pub docs_url: &'static str,

    /// Package manager program run in the destination after scaffolding
    pub install_program: &'static str,

    /// Arguments passed to the package manager
    pub install_args: &'static [&'static str],
}

impl ToolkitConfig {
    /// Environment variable overriding the valid extension-type set
    /// (comma-separated names)
    pub const TYPES_ENV: &'static str = "CREATE_EXTENSION_TYPES";

    /// Environment variable overriding the template root directory
    pub const TEMPLATE_ROOT_ENV: &'static str = "CREATE_EXTENSION_TEMPLATE_ROOT";

    /// Build the configuration, applying environment overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(Self::TYPES_ENV) {
            let types: Vec<String> = raw
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            if !types.is_empty() {
                config.extension_types = types;
            }
        }

        config
    }

    /// Validate a requested type name against the configured set
    pub fn parse_type(&self, requested: &str) -> Result<ExtensionType, ScaffoldError> {
        if self.extension_types.iter().any(|t| t == requested) {
            Ok(ExtensionType {
                name: requested.to_string(),
            })
        } else {
            Err(ScaffoldError::UnknownType {
                requested: requested.to_string(),
                valid: self.extension_types.clone(),
            })
        }
    }

    /// Whether the type receives the `common.vue` overlay
    pub fn is_app_type(&self, extension_type: &ExtensionType) -> bool {
        self.app_types.iter().any(|t| t == extension_type.name())
    }

    /// Documentation link for a specific extension type
    pub fn type_docs_url(&self, extension_type: &ExtensionType) -> String {
        format!("{}#{}", self.docs_url, extension_type.name())
    }
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            extension_types: DEFAULT_EXTENSION_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            app_types: APP_EXTENSION_TYPES.iter().map(|t| t.to_string()).collect(),
            docs_url: "https://github.com/directus-community/extension-toolkit",
            install_program: "npm",
            install_args: &["install"],
        }
    }
}

/// A validated extension type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionType {
    name: String,
}

impl ExtensionType {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Language the scaffolded project is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectLanguage {
    TypeScript,
    JavaScript,
}

impl ProjectLanguage {
    /// Template subtree name for this language
    pub fn dir_name(&self) -> &'static str {
        match self {
            ProjectLanguage::TypeScript => "typescript",
            ProjectLanguage::JavaScript => "javascript",
        }
    }

    /// Entry-file extension used by the support probe
    pub fn entry_extension(&self) -> &'static str {
        match self {
            ProjectLanguage::TypeScript => "ts",
            ProjectLanguage::JavaScript => "js",
        }
    }
}

impl fmt::Display for ProjectLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}
