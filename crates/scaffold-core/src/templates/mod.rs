//! Layered template trees: layout addressing, verbatim copying, manifest
//! fragment merging, and template rendering

pub mod copier;
pub mod layout;
pub mod manifest;
pub mod render;

pub use copier::{copy_layer, is_marked};
pub use layout::{TemplateLayout, MANIFEST_TEMPLATE, MARKER_SUFFIX};
pub use manifest::{merge_layers, ManifestFragment, MergeLayer, MergedManifest};
pub use render::{RenderContext, Renderer};
