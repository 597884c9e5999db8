use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use walkdir::WalkDir;

/// Extensions the backend accepts for upload.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "docx", "doc"];

/// Recursively collects uploadable documents under `dir`, sorted by path.
pub fn collect_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Directory not found: {}", dir.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_document(path))
        .collect();
    files.sort();
    Ok(files)
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_documents_recursively_and_skips_others() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(temp.path().join("a.pdf"), "x").unwrap();
        fs::write(temp.path().join("notes.txt"), "x").unwrap();
        fs::write(nested.join("B.DOCX"), "x").unwrap();
        fs::write(nested.join("c.doc"), "x").unwrap();

        let found = collect_documents(temp.path()).unwrap();

        assert_eq!(
            found,
            vec![
                temp.path().join("a.pdf"),
                nested.join("B.DOCX"),
                nested.join("c.doc"),
            ]
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = collect_documents(&temp.path().join("absent")).unwrap_err();
        assert!(err.to_string().starts_with("Directory not found"));
    }
}
