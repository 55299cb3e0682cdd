//! # Quote File
//!
//! Durable mirror of the store: a pretty-printed JSON array of quotes.
//! Each save rewrites the file in full.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::errors::{QuoteError, QuoteResult};
use super::quote::Quote;

/// JSON file holding the quote collection
#[derive(Debug, Clone)]
pub struct QuoteFile {
    path: PathBuf,
}

impl QuoteFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all quotes. A missing file is an empty collection.
    pub fn load(&self) -> QuoteResult<Vec<Quote>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let quotes: Vec<Quote> = serde_json::from_str(&content)?;
        validate_ids(&quotes)?;
        Ok(quotes)
    }

    /// Overwrite the file with `quotes`.
    pub fn save(&self, quotes: &[Quote]) -> QuoteResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut json = serde_json::to_string_pretty(quotes)?;
        json.push('\n');
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn validate_ids(quotes: &[Quote]) -> QuoteResult<()> {
    let mut seen = HashSet::with_capacity(quotes.len());
    for quote in quotes {
        if quote.id == 0 {
            return Err(QuoteError::Corrupt("quote id 0 is not allowed".to_string()));
        }
        if !seen.insert(quote.id) {
            return Err(QuoteError::Corrupt(format!("duplicate quote id {}", quote.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quote(id: u64, text: &str, author: &str) -> Quote {
        Quote {
            id,
            text: text.to_string(),
            author: author.to_string(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let file = QuoteFile::new(temp.path().join("quotes.json"));
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_load() {
        let temp = TempDir::new().unwrap();
        let file = QuoteFile::new(temp.path().join("quotes.json"));
        let quotes = vec![quote(1, "Carpe diem", "Horace"), quote(4, "Ça ira", "")];

        file.save(&quotes).unwrap();
        assert_eq!(file.load().unwrap(), quotes);
    }

    #[test]
    fn test_save_is_indented_utf8() {
        let temp = TempDir::new().unwrap();
        let file = QuoteFile::new(temp.path().join("quotes.json"));
        file.save(&[quote(1, "Ça ira", "")]).unwrap();

        let raw = fs::read_to_string(file.path()).unwrap();
        assert!(raw.starts_with("[\n  {\n    \"id\": 1,"));
        assert!(raw.contains("Ça ira"));
    }

    #[test]
    fn test_nested_path() {
        let temp = TempDir::new().unwrap();
        let file = QuoteFile::new(temp.path().join("a/b/quotes.json"));
        file.save(&[quote(1, "nested", "")]).unwrap();
        assert_eq!(file.load().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_file_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("quotes.json");
        fs::write(&path, "{not json").unwrap();

        let result = QuoteFile::new(&path).load();
        assert!(matches!(result, Err(QuoteError::Corrupt(_))));
    }

    #[test]
    fn test_duplicate_ids_are_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("quotes.json");
        fs::write(
            &path,
            r#"[{"id":2,"text":"a","author":""},{"id":2,"text":"b","author":""}]"#,
        )
        .unwrap();

        let result = QuoteFile::new(&path).load();
        assert!(matches!(result, Err(QuoteError::Corrupt(msg)) if msg.contains("duplicate")));
    }
}
