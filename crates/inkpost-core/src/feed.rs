//! Feed query assembly.
//!
//! Turns the optional arguments of the `feed` field into a store-agnostic
//! [`FeedQuery`]. Each repository translates the descriptor into its own
//! query language; [`PostFilter::matches`] and [`PostOrderBy::compare`] give
//! the reference semantics for stores that evaluate it in process.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::Post;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Ordering accepted by the feed. Only `updated_at` is sortable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOrderBy {
    pub updated_at: SortOrder,
}

impl PostOrderBy {
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let ord = a.updated_at.cmp(&b.updated_at);
        match self.updated_at {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

/// Text columns a search can match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostTextField {
    Title,
    Content,
}

/// `field contains needle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contains {
    pub field: PostTextField,
    pub needle: String,
}

impl Contains {
    fn matches(&self, post: &Post) -> bool {
        match self.field {
            PostTextField::Title => post.title.contains(&self.needle),
            PostTextField::Content => post
                .content
                .as_deref()
                .is_some_and(|c| c.contains(&self.needle)),
        }
    }
}

/// Filter of a feed query: `published = true AND (any_of[0] OR any_of[1] ...)`.
///
/// An empty `any_of` means no text clause at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFilter {
    pub published: bool,
    pub any_of: Vec<Contains>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        post.published == self.published
            && (self.any_of.is_empty() || self.any_of.iter().any(|c| c.matches(post)))
    }
}

/// Raw arguments of the `feed` field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedArgs {
    pub search_string: Option<String>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
    pub order_by: Option<PostOrderBy>,
}

/// Assembled feed descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    pub filter: PostFilter,
    pub skip: Option<u64>,
    pub take: Option<u64>,
    pub order_by: Option<PostOrderBy>,
}

impl FeedQuery {
    /// Build the descriptor.
    ///
    /// A zero `skip` or `take` is indistinguishable from an absent one: both
    /// mean "no constraint". `take: 0` therefore returns every match.
    pub fn assemble(args: FeedArgs) -> Self {
        let any_of = match args.search_string {
            Some(s) if !s.is_empty() => vec![
                Contains {
                    field: PostTextField::Title,
                    needle: s.clone(),
                },
                Contains {
                    field: PostTextField::Content,
                    needle: s,
                },
            ],
            _ => Vec::new(),
        };

        Self {
            filter: PostFilter {
                published: true,
                any_of,
            },
            skip: args.skip.filter(|&n| n != 0),
            take: args.take.filter(|&n| n != 0),
            order_by: args.order_by,
        }
    }
}

impl From<FeedArgs> for FeedQuery {
    fn from(args: FeedArgs) -> Self {
        Self::assemble(args)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn post(id: i32, title: &str, content: Option<&str>, published: bool) -> Post {
        let now = Utc::now();
        Post {
            id,
            author_id: 1,
            title: title.to_string(),
            content: content.map(str::to_string),
            published,
            view_count: 0,
            created_at: now,
            updated_at: now + Duration::seconds(id as i64),
        }
    }

    fn published_only() -> PostFilter {
        PostFilter {
            published: true,
            any_of: Vec::new(),
        }
    }

    #[test]
    fn absent_search_yields_published_only() {
        let q = FeedQuery::assemble(FeedArgs::default());
        assert_eq!(q.filter, published_only());
    }

    #[test]
    fn empty_search_yields_published_only() {
        let q = FeedQuery::assemble(FeedArgs {
            search_string: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(q.filter, published_only());
    }

    #[test]
    fn search_matches_title_or_content() {
        let q = FeedQuery::assemble(FeedArgs {
            search_string: Some("rust".to_string()),
            ..Default::default()
        });
        assert_eq!(
            q.filter,
            PostFilter {
                published: true,
                any_of: vec![
                    Contains {
                        field: PostTextField::Title,
                        needle: "rust".to_string(),
                    },
                    Contains {
                        field: PostTextField::Content,
                        needle: "rust".to_string(),
                    },
                ],
            }
        );
    }

    #[test]
    fn zero_skip_and_take_collapse_to_absent() {
        let q = FeedQuery::assemble(FeedArgs {
            skip: Some(0),
            take: Some(0),
            ..Default::default()
        });
        assert_eq!(q.skip, None);
        assert_eq!(q.take, None);
    }

    #[test]
    fn nonzero_pagination_is_kept() {
        let q = FeedQuery::assemble(FeedArgs {
            skip: Some(5),
            take: Some(10),
            order_by: Some(PostOrderBy {
                updated_at: SortOrder::Desc,
            }),
            ..Default::default()
        });
        assert_eq!(q.skip, Some(5));
        assert_eq!(q.take, Some(10));
        assert_eq!(
            q.order_by,
            Some(PostOrderBy {
                updated_at: SortOrder::Desc
            })
        );
    }

    #[test]
    fn filter_rejects_drafts_and_non_matching_text() {
        let q = FeedQuery::assemble(FeedArgs {
            search_string: Some("async".to_string()),
            ..Default::default()
        });
        assert!(q.filter.matches(&post(1, "async Rust", None, true)));
        assert!(q.filter.matches(&post(2, "Intro", Some("about async"), true)));
        assert!(!q.filter.matches(&post(3, "async Rust", None, false)));
        assert!(!q.filter.matches(&post(4, "Intro", None, true)));
        // case sensitive
        assert!(!q.filter.matches(&post(5, "Async", None, true)));
    }

    #[test]
    fn order_by_updated_at_desc_reverses() {
        let older = post(1, "a", None, true);
        let newer = post(2, "b", None, true);
        let desc = PostOrderBy {
            updated_at: SortOrder::Desc,
        };
        assert_eq!(desc.compare(&newer, &older), Ordering::Less);
    }
}
