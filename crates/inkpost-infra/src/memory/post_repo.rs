use async_trait::async_trait;
use chrono::Utc;

use inkpost_core::RepoError;
use inkpost_core::domain::{NewPost, Post};
use inkpost_core::error::RepoResult;
use inkpost_core::feed::FeedQuery;
use inkpost_core::ports::PostRepository;

use super::InMemoryStore;

/// In-memory post repository.
pub struct InMemoryPostRepository {
    store: InMemoryStore,
}

impl InMemoryPostRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }

    /// Mutate one post under the write lock.
    async fn modify(
        &self,
        id: i32,
        f: impl FnOnce(&mut Post) -> RepoResult<()> + Send,
    ) -> RepoResult<Post> {
        let mut tables = self.store.tables.write().await;

        let post = tables
            .posts
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Post", format!("id={id}")))?;
        f(post)?;
        post.updated_at = Utc::now();

        Ok(post.clone())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Post>> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn find_by_author(&self, author_id: i32) -> RepoResult<Vec<Post>> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn feed(&self, query: FeedQuery) -> RepoResult<Vec<Post>> {
        let tables = self.store.tables.read().await;

        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| query.filter.matches(p))
            .cloned()
            .collect();

        if let Some(order) = query.order_by {
            posts.sort_by(|a, b| order.compare(a, b));
        }

        let skip = query.skip.unwrap_or(0) as usize;
        let take = query.take.map_or(usize::MAX, |n| n as usize);

        Ok(posts.into_iter().skip(skip).take(take).collect())
    }

    async fn create_draft(&self, new_post: NewPost, author_email: &str) -> RepoResult<Post> {
        let mut tables = self.store.tables.write().await;

        let author_id = tables
            .user_by_email(author_email)
            .map(|u| u.id)
            .ok_or_else(|| RepoError::not_found("User", format!("email={author_email}")))?;

        let now = Utc::now();
        let post = Post {
            id: tables.next_post_id(),
            author_id,
            title: new_post.title,
            content: new_post.content,
            published: false,
            view_count: 0,
            created_at: now,
            updated_at: now,
        };
        tables.posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn increment_view_count(&self, id: i32) -> RepoResult<Post> {
        self.modify(id, |p| {
            p.view_count = p.view_count.checked_add(1).ok_or_else(|| {
                RepoError::Query(format!("view count overflow for post id={id}"))
            })?;
            Ok(())
        })
        .await
    }

    async fn toggle_published(&self, id: i32) -> RepoResult<Post> {
        self.modify(id, |p| {
            p.published = !p.published;
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: i32) -> RepoResult<Post> {
        let mut tables = self.store.tables.write().await;
        tables
            .posts
            .remove(&id)
            .ok_or_else(|| RepoError::not_found("Post", format!("id={id}")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use inkpost_core::domain::NewUser;
    use inkpost_core::feed::{FeedArgs, PostOrderBy, SortOrder};
    use inkpost_core::ports::UserRepository;

    async fn seeded() -> (InMemoryStore, Vec<Post>) {
        let store = InMemoryStore::new();
        store
            .users()
            .create(NewUser {
                name: Some("Alice".to_string()),
                email: "alice@inkpost.dev".to_string(),
            })
            .await
            .unwrap();

        let posts = store.posts();
        let mut created = Vec::new();
        for (title, content) in [
            ("Rust ownership", Some("borrowing explained")),
            ("Async in practice", Some("tokio and rust")),
            ("Gardening", None),
        ] {
            let post = posts
                .create_draft(
                    NewPost {
                        title: title.to_string(),
                        content: content.map(str::to_string),
                    },
                    "alice@inkpost.dev",
                )
                .await
                .unwrap();
            created.push(posts.toggle_published(post.id).await.unwrap());
        }
        (store, created)
    }

    #[tokio::test]
    async fn test_create_draft_unknown_email_fails() {
        let repo = InMemoryStore::new().posts();
        let err = repo
            .create_draft(
                NewPost {
                    title: "x".to_string(),
                    content: None,
                },
                "ghost@inkpost.dev",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound { entity: "User", .. }));
    }

    #[tokio::test]
    async fn test_feed_excludes_drafts() {
        let (store, created) = seeded().await;
        let posts = store.posts();
        posts.toggle_published(created[2].id).await.unwrap();

        let feed = posts.feed(FeedQuery::assemble(FeedArgs::default())).await.unwrap();
        let ids: Vec<i32> = feed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![created[0].id, created[1].id]);
    }

    #[tokio::test]
    async fn test_feed_search_matches_title_or_content() {
        let (store, _) = seeded().await;
        let feed = store
            .posts()
            .feed(FeedQuery::assemble(FeedArgs {
                search_string: Some("rust".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();

        // "Rust ownership" does not match: the search is case sensitive.
        let titles: Vec<&str> = feed.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Async in practice"]);
    }

    #[tokio::test]
    async fn test_feed_pagination_and_order() {
        let (store, created) = seeded().await;
        let posts = store.posts();

        let page = posts
            .feed(FeedQuery::assemble(FeedArgs {
                skip: Some(1),
                take: Some(1),
                order_by: Some(PostOrderBy {
                    updated_at: SortOrder::Desc,
                }),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, created[1].id);

        let everything = posts
            .feed(FeedQuery::assemble(FeedArgs {
                take: Some(0),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(everything.len(), 3);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state() {
        let (store, created) = seeded().await;
        let posts = store.posts();
        let id = created[0].id;

        assert!(!posts.toggle_published(id).await.unwrap().published);
        assert!(posts.toggle_published(id).await.unwrap().published);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_do_not_lose_updates() {
        let (store, created) = seeded().await;
        let posts = Arc::new(store.posts());
        let id = created[0].id;

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let posts = Arc::clone(&posts);
                tokio::spawn(async move { posts.toggle_published(id).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert!(posts.find_by_id(id).await.unwrap().unwrap().published);
    }

    #[tokio::test]
    async fn test_increment_view_count_twice() {
        let (store, created) = seeded().await;
        let posts = store.posts();
        let id = created[1].id;

        posts.increment_view_count(id).await.unwrap();
        let post = posts.increment_view_count(id).await.unwrap();
        assert_eq!(post.view_count, created[1].view_count + 2);
    }

    #[tokio::test]
    async fn test_increment_at_max_is_query_error() {
        let (store, created) = seeded().await;
        let id = created[0].id;
        store
            .tables
            .write()
            .await
            .posts
            .get_mut(&id)
            .unwrap()
            .view_count = i32::MAX;

        let err = store.posts().increment_view_count(id).await.unwrap_err();
        assert!(matches!(err, RepoError::Query(_)));

        let post = store.posts().find_by_id(id).await.unwrap().unwrap();
        assert_eq!(post.view_count, i32::MAX);
    }

    #[tokio::test]
    async fn test_missing_post_mutations_are_not_found() {
        let repo = InMemoryStore::new().posts();
        assert!(repo.increment_view_count(1).await.is_err());
        assert!(repo.toggle_published(1).await.is_err());
        assert!(repo.delete(1).await.is_err());
    }
}
