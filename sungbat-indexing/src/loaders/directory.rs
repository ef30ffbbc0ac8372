//! Data folder loader.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use sungbat_core::traits::Loader;
use sungbat_core::{Document, Result as CoreResult};
use tokio::fs;
use tracing::{debug, info, warn};

use super::{SourceFormat, file::FileLoader};
use crate::error::{IndexingError, Result};

/// Loads every supported file sitting directly inside a folder.
///
/// Subdirectories are not visited. Files are processed in name order; a
/// file that fails to load is logged and skipped.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    path: PathBuf,
}

/// Summary of a data folder's contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderInfo {
    /// Number of regular files.
    pub total_files: usize,
    /// File names, sorted.
    pub files: Vec<String>,
    /// File count per lowercased extension (with the dot, `""` if none).
    pub file_types: BTreeMap<String, usize>,
}

impl DirectoryLoader {
    /// Create a loader for `path`, which must be an existing, non-empty
    /// directory.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(IndexingError::directory_not_found(
                path.display().to_string(),
            ));
        }
        if !path.is_dir() {
            return Err(IndexingError::configuration(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }
        if std::fs::read_dir(&path)?.next().is_none() {
            return Err(IndexingError::EmptyDirectory {
                path: path.display().to_string(),
            });
        }

        Ok(Self { path })
    }

    /// Folder being loaded.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Regular files directly inside the folder, sorted by name.
    async fn list_files(&self) -> Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(&self.path).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Supported files directly inside the folder.
    pub async fn supported_files(&self) -> Result<Vec<PathBuf>> {
        let files = self.list_files().await?;
        Ok(files
            .into_iter()
            .filter(|p| SourceFormat::from_path(p).is_some())
            .collect())
    }

    /// Count the folder's files by extension.
    pub async fn folder_info(&self) -> Result<FolderInfo> {
        let mut info = FolderInfo::default();
        for path in self.list_files().await? {
            let extension = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
                .unwrap_or_default();
            *info.file_types.entry(extension).or_insert(0) += 1;
            if let Some(name) = path.file_name() {
                info.files.push(name.to_string_lossy().into_owned());
            }
            info.total_files += 1;
        }
        Ok(info)
    }

    /// Load all supported files, skipping the ones that fail.
    pub async fn load_documents(&self) -> Result<Vec<Document>> {
        let files = self.supported_files().await?;
        info!(
            "Found {} supported file(s) in {}",
            files.len(),
            self.path.display()
        );

        let mut documents = Vec::new();
        for path in files {
            let loaded = match FileLoader::new(&path) {
                Ok(loader) => loader.load_documents().await,
                Err(e) => Err(e),
            };
            match loaded {
                Ok(docs) => {
                    debug!("Loaded {} document(s) from {}", docs.len(), path.display());
                    documents.extend(docs);
                }
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        Ok(documents)
    }
}

#[async_trait]
impl Loader for DirectoryLoader {
    async fn load(&self) -> CoreResult<Vec<Document>> {
        Ok(self.load_documents().await?)
    }

    fn name(&self) -> &'static str {
        "DirectoryLoader"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sungbat_core::types::metadata_keys;

    #[test]
    fn test_missing_and_empty_folders() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            DirectoryLoader::new(dir.path().join("data")),
            Err(IndexingError::DirectoryNotFound { .. })
        ));
        assert!(matches!(
            DirectoryLoader::new(dir.path()),
            Err(IndexingError::EmptyDirectory { .. })
        ));
    }

    #[tokio::test]
    async fn test_non_recursive_and_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "Artikulo II").unwrap();
        std::fs::write(dir.path().join("a.txt"), "Artikulo I").unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        std::fs::write(dir.path().join("broken.docx"), "not a zip").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.txt"), "hidden").unwrap();

        let loader = DirectoryLoader::new(dir.path()).unwrap();
        let docs = loader.load_documents().await.unwrap();

        let names: Vec<_> = docs
            .iter()
            .filter_map(|d| d.get_metadata_string(metadata_keys::FILENAME))
            .collect();
        assert_eq!(names, vec!["a.txt".to_string(), "b.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_folder_info_counts_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["one.pdf", "two.PDF", "three.txt", "LICENSE"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }

        let info = DirectoryLoader::new(dir.path())
            .unwrap()
            .folder_info()
            .await
            .unwrap();

        assert_eq!(info.total_files, 4);
        assert_eq!(info.file_types.get(".pdf"), Some(&2));
        assert_eq!(info.file_types.get(".txt"), Some(&1));
        assert_eq!(info.file_types.get(""), Some(&1));
        assert_eq!(info.files[0], "LICENSE");
    }
}
