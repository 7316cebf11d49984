//! Post filtering, sorting and aggregate statistics.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{Post, PostStatus};

/// Filters applied to a post listing. Every set filter must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilters {
    pub category: Option<String>,
    pub status: Option<PostStatus>,
    pub featured: Option<bool>,
    /// Author display name.
    pub author: Option<String>,
    /// Posts must carry all of these tags.
    pub tags: Vec<String>,
    /// Case-insensitive match on title, excerpt or content.
    pub search: Option<String>,
}

impl PostFilters {
    /// Creates an empty filter set that matches every post.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the category filter.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the status filter.
    pub fn status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the featured filter.
    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    /// Sets the author filter.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Adds a required tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Returns `true` if the post passes every set filter.
    pub fn matches(&self, post: &Post) -> bool {
        if self.category.as_ref().is_some_and(|c| *c != post.category) {
            return false;
        }
        if self.status.is_some_and(|s| s != post.status) {
            return false;
        }
        if self.featured.is_some_and(|f| f != post.featured) {
            return false;
        }
        if self.author.as_ref().is_some_and(|a| *a != post.author.name) {
            return false;
        }
        if !self.tags.iter().all(|tag| post.tags.contains(tag)) {
            return false;
        }
        match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                post.title.to_lowercase().contains(&term)
                    || post.excerpt.to_lowercase().contains(&term)
                    || post.content.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

/// Sort key for post listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    PublishedAt,
    Views,
    Likes,
    Title,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filters plus ordering for a post listing.
///
/// # Example
///
/// ```
/// use testhub_mock::fixtures::mock_posts;
/// use testhub_mock::{PostFilters, PostQuery, PostStatus, SortBy, SortOrder};
///
/// let drafts = PostQuery::new()
///     .filters(PostFilters::new().status(PostStatus::Draft))
///     .sort(SortBy::Views, SortOrder::Desc)
///     .apply(mock_posts());
///
/// assert!(drafts.iter().all(|p| p.status == PostStatus::Draft));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub filters: PostFilters,
    pub sort_by: SortBy,
    pub order: SortOrder,
}

impl PostQuery {
    /// Newest first, no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filters.
    pub fn filters(mut self, filters: PostFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Sets the sort key and direction.
    pub fn sort(mut self, sort_by: SortBy, order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.order = order;
        self
    }

    /// Filter then sort. The sort is stable.
    pub fn apply(&self, posts: Vec<Post>) -> Vec<Post> {
        let mut posts: Vec<Post> = posts
            .into_iter()
            .filter(|post| self.filters.matches(post))
            .collect();
        posts.sort_by(|a, b| {
            let ordering = compare(self.sort_by, a, b);
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        posts
    }
}

fn compare(sort_by: SortBy, a: &Post, b: &Post) -> Ordering {
    match sort_by {
        SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        SortBy::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortBy::PublishedAt => a.published_at.cmp(&b.published_at),
        SortBy::Views => a.views.cmp(&b.views),
        SortBy::Likes => a.likes.cmp(&b.likes),
        SortBy::Title => a.title.cmp(&b.title),
    }
}

/// Aggregate counts over a set of posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStats {
    pub total_posts: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
}

impl PostStats {
    /// Computes the statistics for `posts`.
    pub fn from_posts(posts: &[Post]) -> Self {
        posts.iter().fold(
            Self {
                total_posts: posts.len(),
                ..Self::default()
            },
            |mut stats, post| {
                match post.status {
                    PostStatus::Published => stats.published_posts += 1,
                    PostStatus::Draft => stats.draft_posts += 1,
                    PostStatus::Archived => {}
                }
                stats.total_views += u64::from(post.views);
                stats.total_likes += u64::from(post.likes);
                stats.total_comments += u64::from(post.comments);
                stats
            },
        )
    }
}
