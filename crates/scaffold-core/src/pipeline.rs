//! The scaffolding pipeline
//!
//! An explicit ordered list of stages; each stage's completion is a
//! precondition for the next. Control flows strictly forward: no retries
//! beyond the destination claim's retry-once, no branching back. Manifest
//! fragments are read from the source template tree, never from the
//! destination, but the copies are still joined before the manifest write
//! so the destination tree is complete by then.

use crate::error::ScaffoldError;
use crate::install;
use crate::target;
use crate::templates::copier;
use crate::templates::layout::{TemplateLayout, MANIFEST_TEMPLATE};
use crate::templates::manifest::{merge_layers, ManifestFragment, MergeLayer};
use crate::templates::render::{RenderContext, Renderer};
use crate::toolkit::{ProjectLanguage, ToolkitConfig};
use anyhow::Context;
use std::path::PathBuf;

/// Arguments for one scaffolding run
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Requested extension type, validated against the configured set
    pub extension_type: String,

    /// Destination directory, created relative to the working directory;
    /// also the `name` substituted into the manifest
    pub name: String,

    /// Scaffold JavaScript boilerplate instead of TypeScript
    pub javascript: bool,

    /// Local template root override (for development use)
    pub template_dir: Option<PathBuf>,

    /// Skip the package-manager install step
    pub skip_install: bool,
}

/// Run the scaffolding pipeline to completion
pub async fn run(config: &ToolkitConfig, args: CreateArgs) -> Result<(), ScaffoldError> {
    // Stage 1: validate arguments
    let extension_type = config.parse_type(&args.extension_type)?;
    cliclack::intro("create-extension").context("failed to write status output")?;
    let language = if args.javascript {
        ProjectLanguage::JavaScript
    } else {
        ProjectLanguage::TypeScript
    };
    let target_path = PathBuf::from(&args.name);

    // Stage 2: resolve templates and probe support, read-only, before any
    // filesystem mutation
    let layout = TemplateLayout::resolve(args.template_dir.clone())?;
    layout.probe_support(language, &extension_type)?;

    // Stage 3: claim the destination
    target::claim_target(&target_path).await?;

    let spinner = cliclack::spinner();
    spinner.start(format!("Setting up {} boilerplate", extension_type));

    // Stage 4: layered copy, each layer joined before the next so its
    // overwrites land in order
    let layers = layout.copy_layers(config, language, &extension_type);
    let mut file_count = 0usize;
    for layer in &layers {
        file_count += copier::copy_layer(layer, &target_path).await?.len();
    }

    // Stage 5: merge manifest fragments in fixed named-layer order
    let common_fragment = ManifestFragment::load(
        &layout.language_common_dir(language).join(MANIFEST_TEMPLATE),
    )
    .await?;
    let type_fragment = ManifestFragment::load_optional(
        &layout.type_dir(language, &extension_type).join(MANIFEST_TEMPLATE),
    )
    .await?;

    let mut fragments = vec![
        MergeLayer::new("language-common", common_fragment),
        MergeLayer::new("type", type_fragment),
    ];
    if config.is_app_type(&extension_type) {
        let overlay =
            ManifestFragment::load_optional(&layout.app_overlay_dir().join(MANIFEST_TEMPLATE))
                .await?;
        fragments.push(MergeLayer::new("app-overlay", overlay));
    }
    let merged = merge_layers(&fragments);

    // Stage 6: render marked files and the manifest
    let renderer = Renderer::new();
    let context = RenderContext::new(&args.name, extension_type.name(), &merged)?;
    for layer in &layers {
        file_count += renderer
            .render_marked_files(layer, &target_path, &context)
            .await?
            .len();
    }
    renderer
        .render_manifest(&layout.manifest_template(), &context, &target_path)
        .await?;

    spinner.stop(format!(
        "Created {} files in {}",
        file_count + 1,
        target_path.display()
    ));

    // Stage 7: install dependencies
    if args.skip_install {
        cliclack::log::info("Skipping dependency install")
            .context("failed to write status output")?;
    } else {
        let spinner = cliclack::spinner();
        spinner.start("Installing dependencies...");
        match install::install_dependencies(config, &target_path).await {
            Ok(()) => spinner.stop("Dependencies installed"),
            Err(e) => {
                spinner.stop("Dependency install failed");
                return Err(e.into());
            }
        }
    }

    cliclack::log::info(format!(
        "Read more about {} extensions: {}",
        extension_type,
        config.type_docs_url(&extension_type)
    ))
    .context("failed to write status output")?;
    cliclack::outro(format!(
        "Extension set up successfully! Start your development with \"cd {}\"",
        args.name
    ))
    .context("failed to write status output")?;

    Ok(())
}
