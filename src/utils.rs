// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

use crate::core::FileUpload;

/// Split a comma-separated skills field, trimming and dropping blanks
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Guess the upload content type from the file name
pub fn content_type_for(filename: &str) -> &'static str {
    match get_file_extension(filename).as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("doc") => "application/msword",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Read a file from disk into an upload part
pub async fn read_upload(path: &Path) -> Result<FileUpload> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?
        .to_string();

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    Ok(FileUpload {
        content_type: content_type_for(&file_name).to_string(),
        file_name,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skills() {
        assert_eq!(parse_skills("go, sql"), vec!["go", "sql"]);
        assert_eq!(parse_skills(" rust ,, ,python "), vec!["rust", "python"]);
        assert!(parse_skills("").is_empty());
    }

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("test.pdf"), Some("pdf".to_string()));
        assert_eq!(
            get_file_extension("document.DOCX"),
            Some("docx".to_string())
        );
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("cv.PDF"), "application/pdf");
        assert_eq!(content_type_for("resume.txt"), "text/plain");
        assert_eq!(content_type_for("blob"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_read_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        tokio::fs::write(&path, b"Python, SQL").await.unwrap();

        let upload = read_upload(&path).await.unwrap();
        assert_eq!(upload.file_name, "resume.txt");
        assert_eq!(upload.content_type, "text/plain");
        assert_eq!(upload.bytes, b"Python, SQL".to_vec());

        assert!(read_upload(&dir.path().join("missing.pdf")).await.is_err());
    }
}
