//! GraphQL object and input types.

use std::sync::Arc;

use async_graphql::{ComplexObject, Context, Enum, InputObject, Result, SimpleObject};
use chrono::{DateTime, Utc};

use inkpost_core::domain;
use inkpost_core::feed;
use inkpost_core::ports::{PostRepository, UserRepository};

use super::error::repo_error;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct User {
    pub id: i32,
    pub name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[ComplexObject]
impl User {
    /// Posts written by this user, fetched only when selected.
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let posts = ctx.data::<Arc<dyn PostRepository>>()?;
        let found = posts.find_by_author(self.id).await.map_err(repo_error)?;
        Ok(found.into_iter().map(Post::from).collect())
    }
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[graphql(skip)]
    pub author_id: i32,
}

#[ComplexObject]
impl Post {
    /// The author, fetched by foreign key only when selected.
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let users = ctx.data::<Arc<dyn UserRepository>>()?;
        let author = users.find_by_id(self.author_id).await.map_err(repo_error)?;
        Ok(author.map(User::from))
    }
}

impl From<domain::Post> for Post {
    fn from(post: domain::Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            published: post.published,
            view_count: post.view_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author_id: post.author_id,
        }
    }
}

#[derive(InputObject)]
pub struct RegisterUserInput {
    pub name: Option<String>,
    pub email: String,
}

impl From<RegisterUserInput> for domain::NewUser {
    fn from(input: RegisterUserInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
        }
    }
}

#[derive(InputObject)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: String,
}

impl From<UpdateUserInput> for domain::UserUpdate {
    fn from(input: UpdateUserInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
        }
    }
}

#[derive(InputObject)]
pub struct PostCreateInput {
    pub title: String,
    pub content: Option<String>,
}

impl From<PostCreateInput> for domain::NewPost {
    fn from(input: PostCreateInput) -> Self {
        Self {
            title: input.title,
            content: input.content,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(rename_items = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl From<SortOrder> for feed::SortOrder {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => feed::SortOrder::Asc,
            SortOrder::Desc => feed::SortOrder::Desc,
        }
    }
}

#[derive(InputObject)]
pub struct PostOrderByUpdatedAtInput {
    pub updated_at: SortOrder,
}

impl From<PostOrderByUpdatedAtInput> for feed::PostOrderBy {
    fn from(input: PostOrderByUpdatedAtInput) -> Self {
        Self {
            updated_at: input.updated_at.into(),
        }
    }
}
