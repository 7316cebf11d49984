//! In-memory record stores backing the mock endpoints.
//!
//! A [`MockStore`] holds the mutable copy of a fixture set. Services call it
//! after the simulated round trip; it never fails on its own except by
//! reporting a missing id.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use tokio::sync::RwLock;

use crate::fixtures::{self, EXCERPT_LENGTH};
use crate::model::{
    Author, CreatePostInput, CreateUserInput, LikeToggle, Post, PostStatus, Role,
    UpdatePostInput, UpdateUserInput, User,
};
use crate::query::{PostQuery, PostStats};

/// CRUD access to one record collection.
///
/// Implementations keep records in insertion order.
#[async_trait]
pub trait MockStore: Send + Sync {
    /// Stored record.
    type Item: Clone + Send + Sync;
    /// Input for `create`.
    type Create: Send;
    /// Input for `update`.
    type Update: Send;

    /// Returns every record.
    async fn get_all(&self) -> Vec<Self::Item>;

    /// Returns the record with this id.
    async fn get_by_id(&self, id: &str) -> Option<Self::Item>;

    /// Inserts a record built from `input` and returns it.
    async fn create(&self, input: Self::Create) -> Self::Item;

    /// Applies `input` to the record with this id.
    ///
    /// Returns `None` if there is no such record.
    async fn update(&self, id: &str, input: Self::Update) -> Option<Self::Item>;

    /// Removes the record with this id. Returns `false` if there was none.
    async fn delete(&self, id: &str) -> bool;
}

/// Next free numeric id, given ids that end in a number.
fn next_id<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> usize {
    ids.filter_map(|id| id.strip_prefix(prefix)?.parse::<usize>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

// =============================================================================
// Users
// =============================================================================

/// Store of [`User`] records.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    /// Creates a store holding `users`.
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Creates a store seeded with the fixture users.
    pub fn seeded() -> Self {
        Self::new(fixtures::mock_users())
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns `true` if the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl MockStore for UserStore {
    type Item = User;
    type Create = CreateUserInput;
    type Update = UpdateUserInput;

    async fn get_all(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    async fn get_by_id(&self, id: &str) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    async fn create(&self, input: CreateUserInput) -> User {
        let mut users = self.users.write().await;
        let now = Utc::now();
        let user = User {
            id: next_id(users.iter().map(|u| u.id.as_str()), "").to_string(),
            avatar: Some(fixtures::avatar_url(&input.email)),
            name: input.name,
            email: input.email,
            role: input.role.unwrap_or(Role::User),
            created_at: now,
            updated_at: now,
        };
        debug!("user store: created {}", user.id);
        users.push(user.clone());
        user
    }

    async fn update(&self, id: &str, input: UpdateUserInput) -> Option<User> {
        let mut users = self.users.write().await;
        let user = users.iter_mut().find(|u| u.id == id)?;
        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(email) = input.email {
            user.email = email;
        }
        if let Some(role) = input.role {
            user.role = role;
        }
        user.updated_at = Utc::now();
        Some(user.clone())
    }

    async fn delete(&self, id: &str) -> bool {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        users.len() != before
    }
}

// =============================================================================
// Posts
// =============================================================================

const POST_ID_PREFIX: &str = "post-";

/// Store of [`Post`] records.
#[derive(Debug, Default)]
pub struct PostStore {
    posts: RwLock<Vec<Post>>,
    liked: RwLock<HashSet<String>>,
    default_author: Option<Author>,
}

impl PostStore {
    /// Creates a store holding `posts`. New posts are credited to the first
    /// fixture author.
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
            liked: RwLock::default(),
            default_author: fixtures::authors().into_iter().next(),
        }
    }

    /// Creates a store seeded with the generated fixture posts.
    pub fn seeded() -> Self {
        Self::new(fixtures::mock_posts())
    }

    /// Posts matching `query`, in query order.
    pub async fn query(&self, query: &PostQuery) -> Vec<Post> {
        query.apply(self.get_all().await)
    }

    /// Looks a post up by slug.
    pub async fn get_by_slug(&self, slug: &str) -> Option<Post> {
        self.posts.read().await.iter().find(|p| p.slug == slug).cloned()
    }

    /// Likes the post if the current user has not, otherwise takes the like
    /// back. The count never drops below zero.
    ///
    /// Returns `None` if there is no such post.
    pub async fn toggle_like(&self, id: &str) -> Option<LikeToggle> {
        let mut posts = self.posts.write().await;
        let post = posts.iter_mut().find(|p| p.id == id)?;
        let mut liked = self.liked.write().await;

        let now_liked = if liked.remove(id) {
            post.likes = post.likes.saturating_sub(1);
            false
        } else {
            liked.insert(id.to_string());
            post.likes = post.likes.saturating_add(1);
            true
        };
        debug!("post store: {} liked={} ({})", id, now_liked, post.likes);
        Some(LikeToggle {
            liked: now_liked,
            likes_count: post.likes,
        })
    }

    /// Whether the current user has liked this post.
    pub async fn is_liked(&self, id: &str) -> bool {
        self.liked.read().await.contains(id)
    }

    /// Aggregate counts over every stored post.
    pub async fn stats(&self) -> PostStats {
        PostStats::from_posts(&self.posts.read().await)
    }
}

#[async_trait]
impl MockStore for PostStore {
    type Item = Post;
    type Create = CreatePostInput;
    type Update = UpdatePostInput;

    async fn get_all(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }

    async fn get_by_id(&self, id: &str) -> Option<Post> {
        self.posts.read().await.iter().find(|p| p.id == id).cloned()
    }

    async fn create(&self, input: CreatePostInput) -> Post {
        let mut posts = self.posts.write().await;
        let now = Utc::now();
        let number = next_id(posts.iter().map(|p| p.id.as_str()), POST_ID_PREFIX);
        let author = self.default_author.clone().unwrap_or_else(|| Author {
            id: "1".to_string(),
            name: "Unknown Author".to_string(),
            avatar: None,
            email: "1@example.com".to_string(),
        });

        let post = Post {
            id: format!("{}{}", POST_ID_PREFIX, number),
            slug: fixtures::slugify(&input.title),
            excerpt: input
                .excerpt
                .unwrap_or_else(|| fixtures::excerpt(&input.content, EXCERPT_LENGTH)),
            read_time: fixtures::read_time(&input.content),
            title: input.title,
            content: input.content,
            author,
            category: input.category,
            tags: input.tags,
            cover_image: input.cover_image,
            status: input.status,
            featured: input.featured.unwrap_or(false),
            likes: 0,
            comments: 0,
            views: 0,
            created_at: now,
            updated_at: now,
            published_at: (input.status == PostStatus::Published).then_some(now),
        };
        debug!("post store: created {}", post.id);
        posts.push(post.clone());
        post
    }

    async fn update(&self, id: &str, input: UpdatePostInput) -> Option<Post> {
        let mut posts = self.posts.write().await;
        let post = posts.iter_mut().find(|p| p.id == id)?;
        let now = Utc::now();

        if let Some(title) = input.title {
            post.slug = fixtures::slugify(&title);
            post.title = title;
        }
        if let Some(content) = input.content {
            post.read_time = fixtures::read_time(&content);
            post.content = content;
        }
        if let Some(excerpt) = input.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(category) = input.category {
            post.category = category;
        }
        if let Some(tags) = input.tags {
            post.tags = tags;
        }
        if let Some(cover_image) = input.cover_image {
            post.cover_image = Some(cover_image);
        }
        if let Some(featured) = input.featured {
            post.featured = featured;
        }
        if let Some(status) = input.status {
            if status == PostStatus::Published && post.status != PostStatus::Published {
                post.published_at = Some(now);
            }
            post.status = status;
        }
        post.updated_at = now;
        Some(post.clone())
    }

    async fn delete(&self, id: &str) -> bool {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return false;
        }
        self.liked.write().await.remove(id);
        true
    }
}
