//! Post resolvers.

use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use inkpost_core::feed::{FeedArgs, FeedQuery};
use inkpost_core::ports::PostRepository;

use super::error::repo_error;
use super::types::{Post, PostCreateInput, PostOrderByUpdatedAtInput};

fn posts<'a>(ctx: &Context<'a>) -> Result<&'a Arc<dyn PostRepository>> {
    ctx.data::<Arc<dyn PostRepository>>()
}

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    async fn post_by_id(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Post>> {
        let found = posts(ctx)?.find_by_id(id).await.map_err(repo_error)?;
        Ok(found.map(Post::from))
    }

    /// Published posts, optionally filtered by a substring of title or
    /// content. `skip: 0` and `take: 0` mean no constraint.
    async fn feed(
        &self,
        ctx: &Context<'_>,
        search_string: Option<String>,
        skip: Option<u64>,
        take: Option<u64>,
        order_by: Option<PostOrderByUpdatedAtInput>,
    ) -> Result<Vec<Post>> {
        let query = FeedQuery::assemble(FeedArgs {
            search_string,
            skip,
            take,
            order_by: order_by.map(Into::into),
        });

        let found = posts(ctx)?.feed(query).await.map_err(repo_error)?;
        Ok(found.into_iter().map(Post::from).collect())
    }
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    async fn create_draft(
        &self,
        ctx: &Context<'_>,
        data: PostCreateInput,
        author_email: String,
    ) -> Result<Post> {
        let post = posts(ctx)?
            .create_draft(data.into(), &author_email)
            .await
            .map_err(repo_error)?;
        tracing::info!(post_id = post.id, "Draft created");
        Ok(post.into())
    }

    async fn increment_post_view_count(&self, ctx: &Context<'_>, id: i32) -> Result<Post> {
        let post = posts(ctx)?
            .increment_view_count(id)
            .await
            .map_err(repo_error)?;
        Ok(post.into())
    }

    async fn toggle_publish_post(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Post>> {
        let post = posts(ctx)?.toggle_published(id).await.map_err(repo_error)?;
        tracing::info!(post_id = id, published = post.published, "Publish state toggled");
        Ok(Some(post.into()))
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Post>> {
        let post = posts(ctx)?.delete(id).await.map_err(repo_error)?;
        Ok(Some(post.into()))
    }
}
