//! Destination directory claiming

use crate::error::ScaffoldError;
use anyhow::Context;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Claim the destination directory with a single create-if-absent operation.
///
/// An existing empty directory is acceptable and is reused. When the create
/// fails because the entry already exists but the entry then vanishes before
/// it can be inspected, the create is retried exactly once.
pub async fn claim_target(path: &Path) -> Result<(), ScaffoldError> {
    let mut retried = false;

    loop {
        match fs::create_dir(path).await {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // Missing parent directories; create the whole chain
                fs::create_dir_all(path)
                    .await
                    .with_context(|| format!("failed to create {}", path.display()))?;
                return Ok(());
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => match fs::metadata(path).await {
                Ok(meta) if !meta.is_dir() => {
                    return Err(ScaffoldError::DestinationNotADirectory {
                        path: path.to_path_buf(),
                    });
                }
                Ok(_) => {
                    if dir_is_empty(path).await? {
                        return Ok(());
                    }
                    return Err(ScaffoldError::DestinationNotEmpty {
                        path: path.to_path_buf(),
                    });
                }
                Err(stat) if stat.kind() == ErrorKind::NotFound && !retried => {
                    // The entry vanished between the create and the stat
                    retried = true;
                    continue;
                }
                Err(stat) => {
                    return Err(anyhow::Error::from(stat)
                        .context(format!("failed to inspect {}", path.display()))
                        .into());
                }
            },
            Err(e) => {
                return Err(anyhow::Error::from(e)
                    .context(format!("failed to create {}", path.display()))
                    .into());
            }
        }
    }
}

async fn dir_is_empty(path: &Path) -> Result<bool, ScaffoldError> {
    let mut entries = fs::read_dir(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let first = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(first.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn claims_absent_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("new-ext");

        claim_target(&target).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("nested/deeply/new-ext");

        claim_target(&target).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn accepts_existing_empty_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("empty");
        std::fs::create_dir(&target).unwrap();

        claim_target(&target).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_regular_file() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("occupied");
        std::fs::write(&target, "hello").unwrap();

        match claim_target(&target).await {
            Err(ScaffoldError::DestinationNotADirectory { path }) => assert_eq!(path, target),
            other => panic!("expected DestinationNotADirectory, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rejects_non_empty_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("populated");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("existing.txt"), "hello").unwrap();

        match claim_target(&target).await {
            Err(ScaffoldError::DestinationNotEmpty { path }) => assert_eq!(path, target),
            other => panic!("expected DestinationNotEmpty, got {:?}", other),
        }
    }
}
