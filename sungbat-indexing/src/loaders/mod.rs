//! Loaders for the three supported source formats.

pub mod directory;
pub mod file;

pub use directory::{DirectoryLoader, FolderInfo};
pub use file::FileLoader;

use std::path::Path;

/// Kinds of files the loaders understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Portable Document Format, loaded one document per page.
    Pdf,
    /// Plain UTF-8 text.
    Text,
    /// Office Open XML word processing document.
    Docx,
}

/// Extensions accepted by [`SourceFormat::from_path`], without the dot.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "txt", "docx"];

impl SourceFormat {
    /// Detect the format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Text),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}
