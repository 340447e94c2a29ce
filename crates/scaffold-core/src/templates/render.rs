//! Textual substitution of the manifest template and other marked files
//!
//! Rendering is substitution only: no control flow, no escaping. The
//! substituted values land inside JSON, so the engine's HTML escaping is
//! disabled and values pass through untouched. Nothing sanitizes `name` or
//! `type` against breaking the JSON syntax; a malformed render is a fatal
//! parse failure.

use super::layout::MANIFEST_TEMPLATE;
use super::manifest::MergedManifest;
use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Values substituted into templates. The three maps are pre-serialized to
/// compact JSON strings because substitution is textual, not structural.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub name: String,

    #[serde(rename = "type")]
    pub extension_type: String,

    pub dependencies: String,

    #[serde(rename = "devDependencies")]
    pub dev_dependencies: String,

    pub scripts: String,
}

impl RenderContext {
    pub fn new(name: &str, extension_type: &str, merged: &MergedManifest) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            extension_type: extension_type.to_string(),
            dependencies: serde_json::to_string(&merged.dependencies)?,
            dev_dependencies: serde_json::to_string(&merged.dev_dependencies)?,
            scripts: serde_json::to_string(&merged.scripts)?,
        })
    }
}

/// Mustache-style renderer over handlebars with HTML escaping disabled
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        Self { registry }
    }

    /// Substitute the context into a template string
    pub fn render(&self, template: &str, context: &RenderContext) -> Result<String> {
        self.registry
            .render_template(template, context)
            .context("failed to render template")
    }

    /// Render the manifest template, parse the result as JSON, and write it
    /// pretty-printed to `<destination>/package.json`
    pub async fn render_manifest(
        &self,
        template_path: &Path,
        context: &RenderContext,
        dest: &Path,
    ) -> Result<()> {
        let template = fs::read_to_string(template_path)
            .await
            .with_context(|| format!("failed to read manifest template {}", template_path.display()))?;
        let rendered = self.render(&template, context)?;
        let manifest: serde_json::Value =
            serde_json::from_str(&rendered).context("rendered package.json is not valid JSON")?;

        let out = dest.join("package.json");
        let pretty = serde_json::to_string_pretty(&manifest)?;
        fs::write(&out, pretty + "\n")
            .await
            .with_context(|| format!("failed to write {}", out.display()))?;
        Ok(())
    }

    /// Render every marked file in a layer into the destination with the
    /// marker suffix stripped, honoring the same layer precedence as the
    /// verbatim copy. Manifest fragments belong to the merger and are
    /// skipped here. Returns the relative paths of the rendered files.
    pub async fn render_marked_files(
        &self,
        layer: &Path,
        dest: &Path,
        context: &RenderContext,
    ) -> Result<Vec<PathBuf>> {
        if !layer.is_dir() {
            return Ok(Vec::new());
        }

        let mut rendered_files = Vec::new();

        for entry in WalkDir::new(layer) {
            let entry = entry.with_context(|| format!("failed to walk {}", layer.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == MANIFEST_TEMPLATE {
                continue;
            }
            let Some(output_name) = name.strip_suffix(".template") else {
                continue;
            };
            if output_name.is_empty() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(layer)
                .context("walked entry escaped the layer root")?;
            let target = dest.join(relative).with_file_name(output_name);

            let template = fs::read_to_string(entry.path())
                .await
                .with_context(|| format!("failed to read template {}", entry.path().display()))?;
            let rendered = self.render(&template, context)?;

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            fs::write(&target, rendered)
                .await
                .with_context(|| format!("failed to write {}", target.display()))?;

            rendered_files.push(relative.with_file_name(output_name));
        }

        Ok(rendered_files)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn merged() -> MergedManifest {
        let mut deps = BTreeMap::new();
        deps.insert("axios".to_string(), "^0.21.0".to_string());
        let mut scripts = BTreeMap::new();
        scripts.insert("build".to_string(), "webpack --mode production".to_string());
        MergedManifest {
            dependencies: deps,
            dev_dependencies: BTreeMap::new(),
            scripts,
        }
    }

    const TEMPLATE: &str = r#"{
	"name": "{{name}}",
	"keywords": ["extension", "{{type}}"],
	"dependencies": {{dependencies}},
	"devDependencies": {{devDependencies}},
	"scripts": {{scripts}}
}"#;

    #[test]
    fn rendered_manifest_round_trips_the_merged_maps() {
        let renderer = Renderer::new();
        let context = RenderContext::new("my-ext", "endpoint", &merged()).unwrap();

        let rendered = renderer.render(TEMPLATE, &context).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed["name"], "my-ext");
        assert_eq!(parsed["keywords"][1], "endpoint");
        assert_eq!(parsed["dependencies"]["axios"], "^0.21.0");
        assert_eq!(parsed["scripts"]["build"], "webpack --mode production");
        assert_eq!(parsed["devDependencies"], serde_json::json!({}));
    }

    #[test]
    fn substituted_json_is_not_html_escaped() {
        let renderer = Renderer::new();
        let context = RenderContext::new("my-ext", "endpoint", &merged()).unwrap();

        let rendered = renderer.render("{{dependencies}}", &context).unwrap();
        assert_eq!(rendered, r#"{"axios":"^0.21.0"}"#);
    }

    #[tokio::test]
    async fn render_manifest_writes_pretty_printed_json() {
        let tmp = tempfile::tempdir().unwrap();
        let template_path = tmp.path().join("package.json.template");
        std::fs::write(&template_path, TEMPLATE).unwrap();
        let dest = tmp.path().join("out");
        std::fs::create_dir(&dest).unwrap();

        let renderer = Renderer::new();
        let context = RenderContext::new("my-ext", "endpoint", &merged()).unwrap();
        renderer
            .render_manifest(&template_path, &context, &dest)
            .await
            .unwrap();

        let written = std::fs::read_to_string(dest.join("package.json")).unwrap();
        assert!(written.contains("  \"name\": \"my-ext\""));
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["scripts"]["build"], "webpack --mode production");
    }

    #[tokio::test]
    async fn marked_files_render_with_the_suffix_stripped() {
        let tmp = tempfile::tempdir().unwrap();
        let layer = tmp.path().join("layer");
        std::fs::create_dir_all(layer.join("docs")).unwrap();
        std::fs::write(layer.join("docs/README.md.template"), "# {{name}}\n").unwrap();
        std::fs::write(layer.join("package.json.template"), "{}").unwrap();
        std::fs::write(layer.join("index.js"), "module.exports = {};").unwrap();
        let dest = tmp.path().join("out");
        std::fs::create_dir(&dest).unwrap();

        let renderer = Renderer::new();
        let context = RenderContext::new("my-ext", "hook", &merged()).unwrap();
        let rendered = renderer
            .render_marked_files(&layer, &dest, &context)
            .await
            .unwrap();

        assert_eq!(rendered, vec![PathBuf::from("docs/README.md")]);
        let readme = std::fs::read_to_string(dest.join("docs/README.md")).unwrap();
        assert_eq!(readme, "# my-ext\n");
        // The manifest fragment is for the merger, not the renderer
        assert!(!dest.join("package.json").exists());
        // Plain files belong to the copier
        assert!(!dest.join("index.js").exists());
    }

    #[test]
    fn malformed_name_surfaces_as_a_parse_failure() {
        let renderer = Renderer::new();
        let context = RenderContext::new("bad\"name", "endpoint", &merged()).unwrap();

        let rendered = renderer.render(TEMPLATE, &context).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&rendered).is_err());
    }
}
