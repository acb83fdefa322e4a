//! GraphQL schema: the User and Post resolver modules merged into one
//! query root and one mutation root.

mod error;
mod post;
mod types;
mod user;

use std::sync::Arc;

use async_graphql::{EmptySubscription, MergedObject, Schema};

use inkpost_core::ports::{PostRepository, UserRepository};

use crate::config::GraphqlConfig;

pub use post::{PostMutation, PostQuery};
pub use user::{UserMutation, UserQuery};

#[derive(MergedObject, Default)]
pub struct QueryRoot(UserQuery, PostQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(UserMutation, PostMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema, handing the repositories to resolvers as context data.
pub fn build_schema(
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    config: &GraphqlConfig,
) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(users)
    .data(posts)
    .limit_depth(config.depth_limit)
    .finish()
}

#[cfg(test)]
mod tests;
