//! Seed data: three users and a generated set of posts.
//!
//! Post generation cycles templates, categories and authors by index and
//! draws everything else from a seeded RNG, so a given seed and anchor time
//! always produce the same posts.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::model::{Author, Post, PostStatus, Role, User};

/// Number of generated posts.
pub const POST_COUNT: usize = 100;

/// Seed used by [`mock_posts`].
pub const DEFAULT_SEED: u64 = 42;

/// Excerpt length in characters.
pub const EXCERPT_LENGTH: usize = 150;

const WORDS_PER_MINUTE: usize = 200;

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

pub const CATEGORIES: [&str; 15] = [
    "Technology",
    "Development",
    "Design",
    "Business",
    "Marketing",
    "Data Science",
    "DevOps",
    "Security",
    "Mobile",
    "Web Development",
    "AI & ML",
    "Cloud Computing",
    "Database",
    "Testing",
    "Frontend",
];

pub const TAGS: [&str; 26] = [
    "javascript",
    "typescript",
    "react",
    "nextjs",
    "nodejs",
    "python",
    "database",
    "api",
    "frontend",
    "backend",
    "devops",
    "design",
    "ui",
    "ux",
    "mobile",
    "web",
    "cloud",
    "security",
    "performance",
    "testing",
    "tutorial",
    "guide",
    "news",
    "tips",
    "trends",
    "best-practices",
];

const AUTHORS: [(&str, &str, &str); 5] = [
    ("1", "John Doe", "john"),
    ("2", "Jane Smith", "jane"),
    ("3", "Bob Johnson", "bob"),
    ("4", "Sarah Wilson", "sarah"),
    ("5", "Tom Davis", "tom"),
];

struct Template {
    title: &'static str,
    content: &'static str,
}

const TEMPLATES: [Template; 5] = [
    Template {
        title: "Getting Started with {category}",
        content: "<h2>Introduction</h2><p>This comprehensive guide covers the fundamentals of {category}. Whether you're a beginner or looking to refresh your knowledge, this article will provide valuable insights into modern {category} practices.</p><h3>What You'll Learn</h3><ul><li>Core concepts and principles</li><li>Practical implementation tips</li><li>Common pitfalls and how to avoid them</li><li>Best practices from industry experts</li></ul>",
    },
    Template {
        title: "Advanced {category} Techniques",
        content: "<h2>Advanced Concepts</h2><p>Take your {category} skills to the next level with these advanced techniques. We'll explore complex scenarios and solutions that experienced developers face in production environments.</p><h3>Topics Covered</h3><ul><li>Performance optimization strategies</li><li>Scalability considerations</li><li>Security best practices</li><li>Maintenance and monitoring</li></ul>",
    },
    Template {
        title: "{category} Trends in 2024",
        content: "<h2>Latest Developments</h2><p>Stay ahead of the curve with the latest {category} trends and innovations. This article analyzes the current landscape and predicts future developments in the field.</p><h3>Key Trends</h3><ul><li>Emerging technologies</li><li>Industry adoption patterns</li><li>Future predictions</li><li>Skill requirements</li></ul>",
    },
    Template {
        title: "Building Scalable {category} Solutions",
        content: "<h2>Architecture Patterns</h2><p>Learn how to build {category} solutions that can scale with your business needs. This guide covers architectural patterns, design principles, and implementation strategies.</p><h3>Architecture Considerations</h3><ul><li>Microservices vs monolith</li><li>Database design patterns</li><li>API design principles</li><li>Deployment strategies</li></ul>",
    },
    Template {
        title: "Security Best Practices for {category}",
        content: "<h2>Security Fundamentals</h2><p>Security should be a top priority in any {category} project. This comprehensive guide covers essential security practices, common vulnerabilities, and how to protect your applications.</p><h3>Security Topics</h3><ul><li>Authentication and authorization</li><li>Data protection</li><li>Network security</li><li>Compliance requirements</li></ul>",
    },
];

/// Avatar URL for a seed string.
pub fn avatar_url(seed: &str) -> String {
    format!("{}{}", AVATAR_BASE, seed)
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or_default()
}

/// The three seed users.
pub fn mock_users() -> Vec<User> {
    let user = |id: &str, name: &str, email: &str, role, created_at| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        avatar: email.split('@').next().map(avatar_url),
        created_at,
        updated_at: created_at,
    };

    vec![
        user("1", "John Doe", "john@example.com", Role::User, at(2024, 1, 15, 10, 30)),
        user("2", "Jane Smith", "jane@example.com", Role::Admin, at(2024, 1, 16, 14, 20)),
        user("3", "Bob Johnson", "bob@example.com", Role::User, at(2024, 1, 17, 9, 15)),
    ]
}

/// The fixed set of post authors.
pub fn authors() -> Vec<Author> {
    AUTHORS
        .iter()
        .map(|(id, name, seed)| Author {
            id: id.to_string(),
            name: name.to_string(),
            avatar: Some(avatar_url(seed)),
            email: format!("{}@example.com", seed),
        })
        .collect()
}

/// [`POST_COUNT`] posts from [`DEFAULT_SEED`], dated relative to now.
pub fn mock_posts() -> Vec<Post> {
    generate_posts(DEFAULT_SEED, Utc::now())
}

/// Generate [`POST_COUNT`] posts. Dates fall within 90 days before `anchor`.
pub fn generate_posts(seed: u64, anchor: DateTime<Utc>) -> Vec<Post> {
    let mut rng = StdRng::seed_from_u64(seed);
    let authors = authors();

    (0..POST_COUNT)
        .map(|index| {
            let template = &TEMPLATES[index % TEMPLATES.len()];
            let category = CATEGORIES[index % CATEGORIES.len()];
            let author = authors[index % authors.len()].clone();

            let title = template.title.replacen("{category}", category, 1);
            let content = template.content.replace("{category}", category);

            let published = rng.random_bool(0.85);
            let featured = rng.random_bool(0.15);
            let created_at = days_before(&mut rng, anchor, 90);
            let updated_at = days_before(&mut rng, anchor, 30);
            let published_at = published.then(|| days_before(&mut rng, anchor, 60));

            let tag_count = rng.random_range(3..=6);
            let tags = TAGS
                .choose_multiple(&mut rng, tag_count)
                .map(|tag| tag.to_string())
                .collect();

            Post {
                id: format!("post-{}", index + 1),
                slug: slugify(&title),
                excerpt: excerpt(&content, EXCERPT_LENGTH),
                read_time: read_time(&content),
                title,
                content,
                author,
                category: category.to_string(),
                tags,
                cover_image: Some(format!("https://picsum.photos/800/400?random={}", index + 1)),
                status: if published {
                    PostStatus::Published
                } else {
                    PostStatus::Draft
                },
                featured,
                likes: rng.random_range(0..500),
                comments: rng.random_range(0..100),
                views: rng.random_range(0..5000),
                created_at,
                updated_at,
                published_at,
            }
        })
        .collect()
}

fn days_before(rng: &mut StdRng, anchor: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    anchor - Duration::days(rng.random_range(0..days))
}

// =============================================================================
// Text helpers
// =============================================================================

/// URL slug: lowercase, punctuation dropped, runs of whitespace, `_` and `-`
/// collapsed to a single `-`, no leading or trailing `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_dash = true;
        }
    }
    slug
}

/// Text with HTML tags removed.
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

/// First `max_chars` characters of the text content, with `...` appended if
/// anything was cut.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let text = strip_tags(content);
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text
    }
}

/// Reading time in minutes at 200 words per minute, at least one.
pub fn read_time(content: &str) -> u32 {
    let words = strip_tags(content).split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
