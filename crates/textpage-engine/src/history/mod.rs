//! Persistent history of generated pages.
//!
//! All pages live under one key as a JSON array, newest first. The
//! repository reads and rewrites the whole array on every change.

mod filter;
mod page;

use chrono::{DateTime, Utc};

use crate::content::ParsedContent;
use crate::generate::GenerationMode;
use crate::storage::{KeyValueStore, StorageError, read_list, write_list};

pub use filter::{PageFilter, PageStats, SortBy, SortOrder};
pub use page::{GeneratedPage, PageTag, fallback_title, preview};

pub const HISTORY_KEY: &str = "generated_pages";

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// Fields that [`PageHistory::update`] may change. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageUpdate {
    pub title: Option<String>,
    pub html_content: Option<String>,
    pub tags: Option<Vec<PageTag>>,
}

pub struct PageHistory<S: KeyValueStore> {
    store: S,
    clock: Clock,
}

impl<S: KeyValueStore> PageHistory<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Utc::now)
    }

    pub fn with_clock(store: S, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every page, newest first. Stored data that fails to parse is logged
    /// and read as an empty history.
    pub fn list(&self) -> Result<Vec<GeneratedPage>, StorageError> {
        read_list(&self.store, HISTORY_KEY)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<GeneratedPage>, StorageError> {
        Ok(self.list()?.into_iter().find(|page| page.id == id))
    }

    /// Records a new page at the front of the history.
    pub fn insert(
        &mut self,
        parsed: &ParsedContent,
        original_text: &str,
        mode: GenerationMode,
        custom_title: Option<&str>,
    ) -> Result<GeneratedPage, StorageError> {
        let now = (self.clock)();
        let title = custom_title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| Some(parsed.title.clone()).filter(|t| !t.is_empty()))
            .unwrap_or_else(|| fallback_title(original_text, now));

        let page = GeneratedPage::new(parsed, original_text, mode, title, now);

        let mut pages = self.list()?;
        pages.insert(0, page.clone());
        self.save(&pages)?;
        log::debug!("Saved page {} ({} in history)", page.id, pages.len());
        Ok(page)
    }

    /// Applies `changes` and bumps `updated_at`. Returns `false` for an unknown id.
    pub fn update(&mut self, id: &str, changes: PageUpdate) -> Result<bool, StorageError> {
        let mut pages = self.list()?;
        let Some(page) = pages.iter_mut().find(|page| page.id == id) else {
            return Ok(false);
        };

        if let Some(title) = changes.title {
            page.title = title;
        }
        if let Some(html) = changes.html_content {
            page.html_content = html;
        }
        if let Some(tags) = changes.tags {
            page.tags = tags;
        }
        page.updated_at = (self.clock)();

        self.save(&pages)?;
        Ok(true)
    }

    pub fn delete(&mut self, id: &str) -> Result<bool, StorageError> {
        Ok(self.delete_many(&[id])? > 0)
    }

    /// Removes every page whose id is in `ids`, returning how many went.
    pub fn delete_many<T: AsRef<str>>(&mut self, ids: &[T]) -> Result<usize, StorageError> {
        let mut pages = self.list()?;
        let before = pages.len();
        pages.retain(|page| !ids.iter().any(|id| id.as_ref() == page.id));
        let removed = before - pages.len();
        if removed > 0 {
            self.save(&pages)?;
        }
        Ok(removed)
    }

    pub fn filter(&self, filter: &PageFilter) -> Result<Vec<GeneratedPage>, StorageError> {
        let mut pages: Vec<_> = self
            .list()?
            .into_iter()
            .filter(|page| filter.matches(page))
            .collect();
        pages.sort_by(|a, b| filter.compare(a, b));
        Ok(pages)
    }

    pub fn stats(&self) -> Result<PageStats, StorageError> {
        Ok(PageStats::collect(&self.list()?))
    }

    /// Pretty JSON for one page, or `None` for an unknown id.
    pub fn export_page(&self, id: &str) -> Result<Option<String>, StorageError> {
        self.get_by_id(id)?
            .map(|page| serde_json::to_string_pretty(&page))
            .transpose()
            .map_err(StorageError::from)
    }

    pub fn export_all(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(&self.list()?)?)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(HISTORY_KEY)
    }

    fn save(&mut self, pages: &[GeneratedPage]) -> Result<(), StorageError> {
        write_list(&mut self.store, HISTORY_KEY, pages)
    }
}
