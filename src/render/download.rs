//! Download sink: write the rendered artifact to disk

use super::traits::{Artifact, RenderError};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_FILE_NAME: &str = "resume.pdf";

/// Write `artifact` to `dir/file_name`, creating the directory if needed.
/// An existing file with the same name is overwritten.
pub async fn save_artifact(
    dir: &Path,
    file_name: &str,
    artifact: &Artifact,
) -> Result<PathBuf, RenderError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, &artifact.bytes).await?;
    info!(path = %path.display(), bytes = artifact.bytes.len(), "Artifact saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn artifact(bytes: &[u8]) -> Artifact {
        Artifact {
            bytes: bytes.to_vec(),
            page_count: 1,
        }
    }

    #[tokio::test]
    async fn test_save_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("out").join("nested");

        let path = save_artifact(&dir, DEFAULT_FILE_NAME, &artifact(b"%PDF-1.5"))
            .await
            .unwrap();

        assert_eq!(path, dir.join("resume.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.5");
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        save_artifact(temp.path(), "cv.pdf", &artifact(b"first"))
            .await
            .unwrap();
        let path = save_artifact(temp.path(), "cv.pdf", &artifact(b"second"))
            .await
            .unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_save_into_file_path_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let result = save_artifact(&blocker, "resume.pdf", &artifact(b"x")).await;
        assert!(matches!(result, Err(RenderError::Io(_))));
    }
}
