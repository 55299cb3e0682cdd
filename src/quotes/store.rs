//! # Quote Store
//!
//! Holds the quote sequence in memory and mirrors it to a [`QuoteFile`].
//!
//! Mutations are serialized by the writer lock, which also guards the next
//! id to hand out. A mutation builds the new sequence, writes it to disk and
//! only then publishes it, so readers never observe a state the file does
//! not hold. Readers take the shared lock only long enough to clone.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::seq::SliceRandom;
use tracing::{debug, info};

use super::errors::{QuoteError, QuoteResult};
use super::file::QuoteFile;
use super::quote::{NewQuote, Quote, QuotePatch};

/// File-backed quote collection
#[derive(Debug)]
pub struct QuoteStore {
    file: Option<QuoteFile>,
    quotes: RwLock<Vec<Quote>>,
    /// Next id to assign. Never decreases, so deleted ids are not reused.
    writer: Mutex<u64>,
}

impl QuoteStore {
    /// Open a store backed by `path`, loading existing quotes if present.
    pub fn open(path: impl AsRef<Path>) -> QuoteResult<Self> {
        let file = QuoteFile::new(path.as_ref());
        let quotes = file.load()?;
        let next_id = next_id_after(&quotes)?;
        info!(
            path = %file.path().display(),
            count = quotes.len(),
            "Loaded quotes"
        );
        Ok(Self::from_parts(Some(file), quotes, next_id))
    }

    /// Store with no backing file
    pub fn in_memory() -> Self {
        Self::from_parts(None, Vec::new(), 1)
    }

    fn from_parts(file: Option<QuoteFile>, quotes: Vec<Quote>, next_id: u64) -> Self {
        Self {
            file,
            quotes: RwLock::new(quotes),
            writer: Mutex::new(next_id),
        }
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(QuoteFile::path)
    }

    // ==================
    // Reads
    // ==================

    /// Copy of all quotes in insertion order
    pub fn list(&self) -> Vec<Quote> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Uniformly random quote, or `None` when the store is empty
    pub fn random(&self) -> Option<Quote> {
        self.read().choose(&mut rand::thread_rng()).cloned()
    }

    pub fn get(&self, id: u64) -> Option<Quote> {
        self.read().iter().find(|q| q.id == id).cloned()
    }

    // ==================
    // Mutations
    // ==================

    /// Append a new quote with the next id.
    pub fn create(&self, new: NewQuote) -> QuoteResult<Quote> {
        let text = new.text.trim();
        if text.is_empty() {
            return Err(QuoteError::EmptyText);
        }

        let mut next_id = self.lock_writer();
        let following = next_id.checked_add(1).ok_or(QuoteError::IdsExhausted)?;
        let quote = Quote {
            id: *next_id,
            text: text.to_string(),
            author: new.author.trim().to_string(),
        };

        let mut quotes = self.list();
        quotes.push(quote.clone());
        self.commit(quotes)?;
        *next_id = following;

        info!(id = quote.id, "Added quote");
        Ok(quote)
    }

    /// Overwrite the fields present in `patch`. Returns `None` if `id` is absent.
    pub fn update(&self, id: u64, patch: QuotePatch) -> QuoteResult<Option<Quote>> {
        let text = match patch.text.as_deref().map(str::trim) {
            Some("") => return Err(QuoteError::EmptyText),
            other => other.map(str::to_string),
        };
        let author = patch.author.as_deref().map(|a| a.trim().to_string());

        let _writer = self.lock_writer();
        let mut quotes = self.list();
        let Some(quote) = quotes.iter_mut().find(|q| q.id == id) else {
            debug!(id, "Update of unknown quote");
            return Ok(None);
        };

        if let Some(text) = text {
            quote.text = text;
        }
        if let Some(author) = author {
            quote.author = author;
        }
        let updated = quote.clone();

        self.commit(quotes)?;
        info!(id, "Updated quote");
        Ok(Some(updated))
    }

    /// Remove a quote. Returns `false` if `id` is absent.
    pub fn delete(&self, id: u64) -> QuoteResult<bool> {
        let _writer = self.lock_writer();
        let mut quotes = self.list();
        let Some(pos) = quotes.iter().position(|q| q.id == id) else {
            debug!(id, "Delete of unknown quote");
            return Ok(false);
        };

        quotes.remove(pos);
        self.commit(quotes)?;
        info!(id, "Deleted quote");
        Ok(true)
    }

    /// Persist `quotes`, then make them visible. Caller holds the writer lock.
    fn commit(&self, quotes: Vec<Quote>) -> QuoteResult<()> {
        if let Some(file) = &self.file {
            file.save(&quotes)?;
        }
        *self.write() = quotes;
        Ok(())
    }

    // The sequence is only ever replaced wholesale, so a poisoned lock still
    // guards a consistent value.

    fn read(&self) -> RwLockReadGuard<'_, Vec<Quote>> {
        self.quotes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Quote>> {
        self.quotes.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_writer(&self) -> MutexGuard<'_, u64> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn next_id_after(quotes: &[Quote]) -> QuoteResult<u64> {
    match quotes.iter().map(|q| q.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| QuoteError::Corrupt(format!("quote id {} leaves no room for new ids", max))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_id_is_one() {
        let store = QuoteStore::in_memory();
        let quote = store.create(NewQuote::new("First", "")).unwrap();
        assert_eq!(quote.id, 1);
    }

    #[test]
    fn test_create_trims_fields() {
        let store = QuoteStore::in_memory();
        let quote = store
            .create(NewQuote::new("  Know thyself \n", "  Socrates "))
            .unwrap();
        assert_eq!(quote.text, "Know thyself");
        assert_eq!(quote.author, "Socrates");
    }

    #[test]
    fn test_create_rejects_blank_text() {
        let store = QuoteStore::in_memory();
        let result = store.create(NewQuote::new("   ", "Nobody"));
        assert!(matches!(result, Err(QuoteError::EmptyText)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_only_touches_provided_fields() {
        let store = QuoteStore::in_memory();
        let created = store.create(NewQuote::new("Old text", "Someone")).unwrap();

        let updated = store
            .update(created.id, QuotePatch::text(" New text "))
            .unwrap()
            .unwrap();
        assert_eq!(updated.text, "New text");
        assert_eq!(updated.author, "Someone");

        let updated = store
            .update(created.id, QuotePatch::author(""))
            .unwrap()
            .unwrap();
        assert_eq!(updated.text, "New text");
        assert_eq!(updated.author, "");
    }

    #[test]
    fn test_update_rejects_blank_text() {
        let store = QuoteStore::in_memory();
        let created = store.create(NewQuote::new("Keep me", "")).unwrap();

        let result = store.update(created.id, QuotePatch::text("  "));
        assert!(matches!(result, Err(QuoteError::EmptyText)));
        assert_eq!(store.get(created.id).unwrap().text, "Keep me");
    }

    #[test]
    fn test_update_missing_returns_none() {
        let store = QuoteStore::in_memory();
        assert!(store.update(9, QuotePatch::text("x")).unwrap().is_none());
    }

    #[test]
    fn test_delete_keeps_order() {
        let store = QuoteStore::in_memory();
        for text in ["a", "b", "c"] {
            store.create(NewQuote::new(text, "")).unwrap();
        }

        assert!(store.delete(2).unwrap());
        assert!(!store.delete(2).unwrap());

        let texts: Vec<_> = store.list().into_iter().map(|q| q.text).collect();
        assert_eq!(texts, ["a", "c"]);
    }

    #[test]
    fn test_random_empty_and_single() {
        let store = QuoteStore::in_memory();
        assert!(store.random().is_none());

        let only = store.create(NewQuote::new("Only one", "")).unwrap();
        assert_eq!(store.random(), Some(only));
    }

    #[test]
    fn test_open_continues_after_max_id() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("quotes.json");
        std::fs::write(
            &path,
            r#"[{"id":7,"text":"seven","author":""},{"id":3,"text":"three","author":""}]"#,
        )
        .unwrap();

        let store = QuoteStore::open(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.create(NewQuote::new("eight", "")).unwrap().id, 8);
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let temp = TempDir::new().unwrap();
        // A directory at the file path makes every write fail
        let path = temp.path().join("quotes.json");
        std::fs::create_dir(&path).unwrap();

        let store = QuoteStore::from_parts(Some(QuoteFile::new(&path)), Vec::new(), 1);
        let result = store.create(NewQuote::new("lost", ""));

        assert!(matches!(result, Err(QuoteError::Io(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_rejects_largest_id() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("quotes.json");
        std::fs::write(
            &path,
            format!(r#"[{{"id":{},"text":"last","author":""}}]"#, u64::MAX),
        )
        .unwrap();

        let result = QuoteStore::open(&path);
        assert!(matches!(result, Err(QuoteError::Corrupt(msg)) if msg.contains("no room")));
    }

    #[test]
    fn test_create_stops_when_ids_run_out() {
        let last = Quote {
            id: u64::MAX - 1,
            text: "almost".to_string(),
            author: "".to_string(),
        };
        let store = QuoteStore::from_parts(None, vec![last.clone()], u64::MAX);

        let result = store.create(NewQuote::new("one too many", ""));
        assert!(matches!(result, Err(QuoteError::IdsExhausted)));
        assert_eq!(store.list(), vec![last]);
    }
}
