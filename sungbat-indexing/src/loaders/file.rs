//! Single-file loader.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use sungbat_core::traits::Loader;
use sungbat_core::types::metadata_keys;
use sungbat_core::{Document, Result as CoreResult};
use tracing::{debug, info};

use super::SourceFormat;
use crate::error::{IndexingError, Result};

/// Loads one PDF, TXT or DOCX file.
///
/// PDFs yield one [`Document`] per non-blank page with a 1-based `page`
/// entry; the other formats yield a single document.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
    format: SourceFormat,
}

impl FileLoader {
    /// Create a loader, checking that `path` is an existing file of a
    /// supported format.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.is_file() {
            return Err(IndexingError::file_not_found(path.display().to_string()));
        }

        let format = SourceFormat::from_path(&path)
            .ok_or_else(|| IndexingError::unsupported_format(path.display().to_string()))?;

        Ok(Self { path, format })
    }

    /// Path being loaded.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Detected format.
    #[must_use]
    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Read and extract the file.
    pub async fn load_documents(&self) -> Result<Vec<Document>> {
        let documents = match self.format {
            SourceFormat::Text => {
                let text = tokio::fs::read_to_string(&self.path).await?;
                vec![Document::from_file(&self.path, text)]
            }
            SourceFormat::Docx => {
                let bytes = tokio::fs::read(&self.path).await?;
                let text = extract_docx_text(&bytes)?;
                vec![Document::from_file(&self.path, text)]
            }
            SourceFormat::Pdf => {
                let bytes = tokio::fs::read(&self.path).await?;
                let pages = extract_pdf_pages(bytes).await?;
                pages
                    .into_iter()
                    .enumerate()
                    .map(|(index, text)| {
                        Document::from_file(&self.path, text)
                            .with_metadata(metadata_keys::PAGE, index + 1)
                    })
                    .collect()
            }
        };

        let documents: Vec<Document> = documents.into_iter().filter(|d| !d.is_blank()).collect();
        debug!(
            "Extracted {} document(s) from {}",
            documents.len(),
            self.path.display()
        );
        Ok(documents)
    }
}

#[async_trait]
impl Loader for FileLoader {
    async fn load(&self) -> CoreResult<Vec<Document>> {
        info!("Loading file: {}", self.path.display());
        Ok(self.load_documents().await?)
    }

    fn name(&self) -> &'static str {
        "FileLoader"
    }
}

/// PDF parsing is CPU bound and may panic on malformed input, so it runs on
/// the blocking pool where a panic surfaces as a join error.
async fn extract_pdf_pages(bytes: Vec<u8>) -> Result<Vec<String>> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&bytes))
        .await
        .map_err(|e| IndexingError::text_extraction(format!("PDF extraction aborted: {e}")))?
        .map_err(|e| IndexingError::text_extraction(format!("PDF extraction failed: {e}")))
}

fn extract_docx_text(bytes: &[u8]) -> Result<String> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| IndexingError::text_extraction(format!("DOCX parsing failed: {e}")))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for run in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = run {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_text_file_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Artikulo-III.TXT");
        std::fs::write(&path, "Seksion 1. Awan ti tao a maikkat ti biag.").unwrap();

        let loader = FileLoader::new(&path).unwrap();
        let docs = loader.load().await.unwrap();

        assert_eq!(docs.len(), 1);
        let doc = &docs[0];
        assert_eq!(doc.content, "Seksion 1. Awan ti tao a maikkat ti biag.");
        assert_eq!(
            doc.get_metadata_string(metadata_keys::FILENAME).as_deref(),
            Some("Artikulo-III.TXT")
        );
        assert_eq!(
            doc.get_metadata_string(metadata_keys::FILE_TYPE).as_deref(),
            Some(".TXT")
        );
        assert!(doc.get_metadata(metadata_keys::PAGE).is_none());
    }

    #[tokio::test]
    async fn test_blank_text_file_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        std::fs::write(&path, "  \n\t ").unwrap();

        let docs = FileLoader::new(&path).unwrap().load_documents().await.unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_rejects_unsupported_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, [0u8; 4]).unwrap();

        assert!(matches!(
            FileLoader::new(&path),
            Err(IndexingError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            FileLoader::new(dir.path().join("missing.txt")),
            Err(IndexingError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not really a pdf").unwrap();

        let err = FileLoader::new(&path)
            .unwrap()
            .load_documents()
            .await
            .unwrap_err();
        assert!(matches!(err, IndexingError::TextExtraction { .. }));
    }
}
