//! User resolvers. Each field is a single store call.

use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use inkpost_core::ports::UserRepository;

use super::error::repo_error;
use super::types::{RegisterUserInput, UpdateUserInput, User};

fn users<'a>(ctx: &Context<'a>) -> Result<&'a Arc<dyn UserRepository>> {
    ctx.data::<Arc<dyn UserRepository>>()
}

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let found = users(ctx)?.find_all().await.map_err(repo_error)?;
        Ok(found.into_iter().map(User::from).collect())
    }

    async fn user(&self, ctx: &Context<'_>, id: i32) -> Result<Option<User>> {
        let found = users(ctx)?.find_by_id(id).await.map_err(repo_error)?;
        Ok(found.map(User::from))
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn register_user(
        &self,
        ctx: &Context<'_>,
        register_user: RegisterUserInput,
    ) -> Result<User> {
        let user = users(ctx)?
            .create(register_user.into())
            .await
            .map_err(repo_error)?;
        tracing::info!(user_id = user.id, "User registered");
        Ok(user.into())
    }

    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: i32,
        update_user_input: UpdateUserInput,
    ) -> Result<User> {
        let user = users(ctx)?
            .update(id, update_user_input.into())
            .await
            .map_err(repo_error)?;
        Ok(user.into())
    }

    async fn remove_user(&self, ctx: &Context<'_>, id: i32) -> Result<User> {
        let user = users(ctx)?.delete(id).await.map_err(repo_error)?;
        tracing::info!(user_id = id, "User removed");
        Ok(user.into())
    }
}
