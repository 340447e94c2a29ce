//! Scaffold Core - shared library for extension project scaffolding
//!
//! This library provides the full scaffolding pipeline used by the
//! `create-extension` binary: argument-level validation, destination
//! claiming, layered template copying, manifest fragment merging, template
//! rendering, and package-manager invocation.
//!
//! # Architecture
//!
//! The pipeline is an explicit ordered list of stages; each stage's
//! completion is a precondition for the next:
//!
//! 1. Validate the requested extension type against the configured set
//! 2. Resolve the template root and probe type/language support (read-only)
//! 3. Claim the destination directory (atomic create-if-absent-and-empty)
//! 4. Copy the template layers, in order, each able to overwrite the last
//! 5. Render marked files and the merged `package.json` manifest
//! 6. Run the package manager's install command in the destination

pub mod error;
pub mod install;
pub mod pipeline;
pub mod target;
pub mod templates;
pub mod toolkit;

// Re-export main types for convenience
pub use error::ScaffoldError;
pub use pipeline::{run, CreateArgs};
pub use templates::{ManifestFragment, MergeLayer, MergedManifest, RenderContext, TemplateLayout};
pub use toolkit::{ExtensionType, ProjectLanguage, ToolkitConfig};
