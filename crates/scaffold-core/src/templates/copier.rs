//! Verbatim copying of template layers with the marker-suffix filter

use super::layout::MARKER_SUFFIX;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Whether a filename carries the reserved marker suffix.
///
/// Marked files are excluded from the verbatim copy; they are consumed by
/// the manifest merger or handled by the renderer instead.
pub fn is_marked(file_name: &str) -> bool {
    file_name.ends_with(MARKER_SUFFIX)
}

/// Copy one template layer into the destination, overwriting files left by
/// earlier layers. Returns the relative paths of the copied files.
///
/// A missing layer directory copies nothing; the common layers are optional.
pub async fn copy_layer(source: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    if !source.is_dir() {
        return Ok(Vec::new());
    }

    let mut copied = Vec::new();

    for entry in WalkDir::new(source) {
        let entry = entry.with_context(|| format!("failed to walk {}", source.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_marked(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source)
            .context("walked entry escaped the layer root")?;
        let target = dest.join(relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::copy(entry.path(), &target)
            .await
            .with_context(|| format!("failed to copy {}", entry.path().display()))?;

        copied.push(relative.to_path_buf());
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_suffix_predicate() {
        assert!(is_marked("package.json.template"));
        assert!(is_marked("index.js.template"));
        assert!(!is_marked("package.json"));
        assert!(!is_marked(".eslintrc.js"));
        assert!(!is_marked("template.js"));
    }

    #[tokio::test]
    async fn copies_tree_excluding_marked_files() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("layer");
        let dest = tmp.path().join("out");
        std::fs::create_dir_all(source.join("src")).unwrap();
        std::fs::write(source.join("src/index.ts"), "export default {};").unwrap();
        std::fs::write(source.join(".gitignore"), "node_modules\n").unwrap();
        std::fs::write(source.join("package.json.template"), "{}").unwrap();
        std::fs::write(source.join("README.md.template"), "# {{name}}").unwrap();
        std::fs::create_dir(&dest).unwrap();

        let copied = copy_layer(&source, &dest).await.unwrap();

        assert_eq!(copied.len(), 2);
        assert!(dest.join("src/index.ts").is_file());
        assert!(dest.join(".gitignore").is_file());
        assert!(!dest.join("package.json.template").exists());
        assert!(!dest.join("README.md.template").exists());
    }

    #[tokio::test]
    async fn later_layer_overwrites_earlier_files() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        let dest = tmp.path().join("out");
        std::fs::create_dir_all(&first).unwrap();
        std::fs::create_dir_all(&second).unwrap();
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(first.join(".eslintrc.js"), "base").unwrap();
        std::fs::write(second.join(".eslintrc.js"), "override").unwrap();

        copy_layer(&first, &dest).await.unwrap();
        copy_layer(&second, &dest).await.unwrap();

        let contents = std::fs::read_to_string(dest.join(".eslintrc.js")).unwrap();
        assert_eq!(contents, "override");
    }

    #[tokio::test]
    async fn missing_layer_copies_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");
        std::fs::create_dir(&dest).unwrap();

        let copied = copy_layer(&tmp.path().join("absent"), &dest).await.unwrap();
        assert!(copied.is_empty());
    }
}
