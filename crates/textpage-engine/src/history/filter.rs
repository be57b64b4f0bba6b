use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::GeneratedPage;
use crate::generate::GenerationMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Created,
    Updated,
    Title,
    Size,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(SortBy::Created),
            "updated" => Ok(SortBy::Updated),
            "title" => Ok(SortBy::Title),
            "size" => Ok(SortBy::Size),
            other => Err(format!(
                "Unknown sort key: {other} (expected created, updated, title or size)"
            )),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortBy::Created => "created",
            SortBy::Updated => "updated",
            SortBy::Title => "title",
            SortBy::Size => "size",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Search, mode filter and ordering for [`super::PageHistory::filter`].
///
/// The default keeps every page, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFilter {
    pub search: Option<String>,
    pub mode: Option<GenerationMode>,
    pub sort_by: SortBy,
    pub order: SortOrder,
}

impl PageFilter {
    pub fn matches(&self, page: &GeneratedPage) -> bool {
        if let Some(mode) = self.mode
            && page.generation_mode != mode
        {
            return false;
        }

        let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = search.to_lowercase();
        page.title.to_lowercase().contains(&needle)
            || page.content.to_lowercase().contains(&needle)
            || page.tags.iter().any(|tag| tag.label().contains(&needle))
    }

    pub fn compare(&self, a: &GeneratedPage, b: &GeneratedPage) -> Ordering {
        let ordering = match self.sort_by {
            SortBy::Created => a.created_at.cmp(&b.created_at),
            SortBy::Updated => a.updated_at.cmp(&b.updated_at),
            SortBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortBy::Size => a.character_count.cmp(&b.character_count),
        };
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Totals across the whole history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStats {
    pub total_pages: usize,
    pub total_characters: usize,
    pub local_count: usize,
    pub remote_count: usize,
}

impl PageStats {
    pub fn collect<'a>(pages: impl IntoIterator<Item = &'a GeneratedPage>) -> Self {
        pages.into_iter().fold(Self::default(), |mut stats, page| {
            stats.total_pages += 1;
            stats.total_characters += page.character_count;
            match page.generation_mode {
                GenerationMode::Local => stats.local_count += 1,
                GenerationMode::Remote => stats.remote_count += 1,
            }
            stats
        })
    }
}
