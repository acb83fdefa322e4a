//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait, Unchanged, UpdateMany,
};

use inkpost_core::domain::{NewPost, NewUser, Post, User, UserUpdate};
use inkpost_core::error::RepoResult;
use inkpost_core::feed::{FeedQuery, PostTextField, SortOrder};
use inkpost_core::ports::{PostRepository, UserRepository};
use inkpost_core::RepoError;

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::errors::{db_err, mask_email};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> RepoResult<User> {
        tracing::debug!(user_email = %mask_email(&new_user.email), "Registering user");

        let now = Utc::now().fixed_offset();
        let model = user::ActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(model.into())
    }

    async fn find_all(&self) -> RepoResult<Vec<User>> {
        let result = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<User>> {
        Ok(self.find_model(id).await?.map(Into::into))
    }

    async fn update(&self, id: i32, update: UserUpdate) -> RepoResult<User> {
        let model = user::ActiveModel {
            id: Unchanged(id),
            name: update.name.map_or(NotSet, |name| Set(Some(name))),
            email: Set(update.email),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::not_found("User", format!("id={id}")),
            other => db_err(other),
        })?;

        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> RepoResult<User> {
        Ok(self.delete_returning(id, "User").await?.into())
    }
}

/// `%needle%` pattern with LIKE metacharacters escaped, so the needle is
/// matched as plain text.
fn contains_pattern(needle: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');

    LikeExpr::new(pattern).escape('\\')
}

/// Translate an assembled feed descriptor into a SeaORM select.
pub(crate) fn feed_select(query: &FeedQuery) -> Select<PostEntity> {
    let mut condition = Condition::all().add(post::Column::Published.eq(query.filter.published));

    if !query.filter.any_of.is_empty() {
        let text = query
            .filter
            .any_of
            .iter()
            .fold(Condition::any(), |any, c| {
                let column = match c.field {
                    PostTextField::Title => post::Column::Title,
                    PostTextField::Content => post::Column::Content,
                };
                any.add(Expr::col((PostEntity, column)).like(contains_pattern(&c.needle)))
            });
        condition = condition.add(text);
    }

    let select = PostEntity::find().filter(condition);

    let select = match query.order_by {
        Some(order) => match order.updated_at {
            SortOrder::Asc => select.order_by_asc(post::Column::UpdatedAt),
            SortOrder::Desc => select.order_by_desc(post::Column::UpdatedAt),
        },
        None => select.order_by_asc(post::Column::Id),
    };

    select.offset(query.skip).limit(query.take)
}

/// Single-statement update of one column on one post. The new value is
/// computed by the database from the current row.
fn column_update(id: i32, column: post::Column, expr: SimpleExpr) -> UpdateMany<PostEntity> {
    PostEntity::update_many()
        .col_expr(column, expr)
        .col_expr(
            post::Column::UpdatedAt,
            Expr::value(Utc::now().fixed_offset()),
        )
        .filter(post::Column::Id.eq(id))
}

/// `SET view_count = view_count + 1`
pub(crate) fn increment_view_count_update(id: i32) -> UpdateMany<PostEntity> {
    column_update(
        id,
        post::Column::ViewCount,
        Expr::col(post::Column::ViewCount).add(1),
    )
}

/// `SET published = NOT published`
pub(crate) fn toggle_published_update(id: i32) -> UpdateMany<PostEntity> {
    column_update(
        id,
        post::Column::Published,
        Expr::col(post::Column::Published).not(),
    )
}

impl PostgresPostRepository {
    /// Run a single-row update and return the row as written.
    async fn apply_update(&self, id: i32, update: UpdateMany<PostEntity>) -> RepoResult<Post> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let result = update
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::not_found("Post", format!("id={id}")));
        }

        let model = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| RepoError::not_found("Post", format!("id={id}")))?;

        txn.commit().await.map_err(db_err)?;
        Ok(model.into())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Post>> {
        Ok(self.find_model(id).await?.map(Into::into))
    }

    async fn find_by_author(&self, author_id: i32) -> RepoResult<Vec<Post>> {
        let result = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn feed(&self, query: FeedQuery) -> RepoResult<Vec<Post>> {
        tracing::debug!(
            search = query.filter.any_of.first().map(|c| c.needle.as_str()),
            skip = query.skip,
            take = query.take,
            "Running feed query"
        );

        let result = feed_select(&query).all(&self.db).await.map_err(db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create_draft(&self, new_post: NewPost, author_email: &str) -> RepoResult<Post> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let author = UserEntity::find()
            .filter(user::Column::Email.eq(author_email))
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| RepoError::not_found("User", format!("email={author_email}")))?;

        let now = Utc::now().fixed_offset();
        let model = post::ActiveModel {
            title: Set(new_post.title),
            content: Set(new_post.content),
            published: Set(false),
            view_count: Set(0),
            author_id: Set(author.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        tracing::debug!(post_id = model.id, author_id = author.id, "Draft created");
        Ok(model.into())
    }

    async fn increment_view_count(&self, id: i32) -> RepoResult<Post> {
        self.apply_update(id, increment_view_count_update(id)).await
    }

    async fn toggle_published(&self, id: i32) -> RepoResult<Post> {
        self.apply_update(id, toggle_published_update(id)).await
    }

    async fn delete(&self, id: i32) -> RepoResult<Post> {
        Ok(self.delete_returning(id, "Post").await?.into())
    }
}
