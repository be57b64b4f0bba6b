//! Blog posts published from converted text.

mod post;

use chrono::NaiveDate;

use crate::content::ParsedContent;
use crate::storage::{KeyValueStore, StorageError, read_list, write_list};

pub use post::{BlogPost, DEFAULT_TAG, blog_read_minutes, keyword_tags};

pub const BLOG_KEY: &str = "blog_posts";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Option<Vec<String>>,
}

pub struct BlogRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> BlogRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Builds a post without storing it.
    pub fn create_post(&self, parsed: &ParsedContent, author: &str, today: NaiveDate) -> BlogPost {
        BlogPost::from_parsed(parsed, author, today)
    }

    /// Stores `post` at the front of the list.
    pub fn publish(&mut self, post: BlogPost) -> Result<BlogPost, StorageError> {
        let mut posts = self.list()?;
        posts.insert(0, post.clone());
        write_list(&mut self.store, BLOG_KEY, &posts)?;
        log::debug!("Published post {}", post.id);
        Ok(post)
    }

    pub fn list(&self) -> Result<Vec<BlogPost>, StorageError> {
        read_list(&self.store, BLOG_KEY)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<BlogPost>, StorageError> {
        Ok(self.list()?.into_iter().find(|post| post.id == id))
    }

    pub fn delete(&mut self, id: &str) -> Result<bool, StorageError> {
        let mut posts = self.list()?;
        let before = posts.len();
        posts.retain(|post| post.id != id);
        if posts.len() == before {
            return Ok(false);
        }
        write_list(&mut self.store, BLOG_KEY, &posts)?;
        Ok(true)
    }

    /// Returns the updated post, or `None` for an unknown id.
    pub fn update(
        &mut self,
        id: &str,
        changes: BlogUpdate,
    ) -> Result<Option<BlogPost>, StorageError> {
        let mut posts = self.list()?;
        let Some(post) = posts.iter_mut().find(|post| post.id == id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(excerpt) = changes.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(tags) = changes.tags {
            post.tags = tags;
        }
        let updated = post.clone();

        write_list(&mut self.store, BLOG_KEY, &posts)?;
        Ok(Some(updated))
    }

    /// Case-insensitive search over title, content, excerpt and tags.
    pub fn search(&self, query: &str) -> Result<Vec<BlogPost>, StorageError> {
        let needle = query.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|post| {
                post.title.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
                    || post.excerpt.to_lowercase().contains(&needle)
                    || post.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect())
    }

    pub fn by_tag(&self, tag: &str) -> Result<Vec<BlogPost>, StorageError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|post| post.has_tag(tag))
            .collect())
    }

    /// Newest `published_at` first.
    pub fn recent(&self, limit: usize) -> Result<Vec<BlogPost>, StorageError> {
        let mut posts = self.list()?;
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        posts.truncate(limit);
        Ok(posts)
    }

    /// Posts sharing the most tags with `id`, topped up with recent posts.
    pub fn related(&self, id: &str, limit: usize) -> Result<Vec<BlogPost>, StorageError> {
        let posts = self.list()?;
        let Some(current) = posts.iter().find(|post| post.id == id) else {
            return Ok(vec![]);
        };

        let mut scored: Vec<(usize, &BlogPost)> = posts
            .iter()
            .filter(|post| post.id != id)
            .map(|post| {
                let shared = post.tags.iter().filter(|t| current.has_tag(t)).count();
                (shared, post)
            })
            .filter(|(shared, _)| *shared > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let mut related: Vec<BlogPost> = scored
            .into_iter()
            .take(limit)
            .map(|(_, post)| post.clone())
            .collect();

        if related.len() < limit {
            let missing = limit - related.len();
            let filler: Vec<BlogPost> = self
                .recent(limit.saturating_mul(2))?
                .into_iter()
                .filter(|post| post.id != id && !related.iter().any(|r| r.id == post.id))
                .take(missing)
                .collect();
            related.extend(filler);
        }
        Ok(related)
    }
}
