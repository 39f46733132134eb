use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait, QueryOrder,
    QuerySelect, Select, Set,
};

use blogly_core::DomainError;
use blogly_core::domain::{Post, PostDetail, PostInput, User};
use blogly_core::error::RepoError;
use blogly_core::ports::PostRepository;

use super::associations;
use super::user::require_user;
use crate::database::entity::{post, tag, user};
use crate::database::sea_orm_base::{SeaOrmRepository, db_err};
use crate::database::unit_of_work::UnitOfWork;

/// SeaORM post repository.
pub type SeaOrmPostRepository = SeaOrmRepository<post::Entity>;

async fn require_post<C>(conn: &C, id: i32) -> Result<post::Model, DomainError>
where
    C: ConnectionTrait,
{
    post::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| DomainError::not_found("Post", id))
}

/// Insert the post row. An owner deleted after the existence check still
/// reports the user as not found.
pub(crate) async fn insert_post<C>(
    conn: &C,
    user_id: i32,
    input: &PostInput,
) -> Result<post::Model, DomainError>
where
    C: ConnectionTrait,
{
    post::ActiveModel {
        title: Set(input.title.clone()),
        content: Set(input.content.clone()),
        created_at: Set(Utc::now().into()),
        user_id: Set(user_id),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| match db_err(e) {
        RepoError::ForeignKey(_) => DomainError::not_found("User", user_id),
        other => other.into(),
    })
}

fn newest_first() -> Select<post::Entity> {
    post::Entity::find()
        .order_by_desc(post::Column::CreatedAt)
        .order_by_desc(post::Column::Id)
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn create(&self, user_id: i32, input: PostInput) -> Result<Post, DomainError> {
        input.validate()?;

        let uow = UnitOfWork::begin(&self.db).await?;
        require_user(uow.conn(), user_id).await?;

        let model = insert_post(uow.conn(), user_id, &input).await?;

        let tag_ids = associations::set_post_tags(uow.conn(), model.id, &input.tag_ids)
            .await
            .map_err(db_err)?;

        uow.commit().await?;

        tracing::info!(post_id = model.id, user_id, tags = ?tag_ids, "Post created");
        Ok(model.into())
    }

    async fn get(&self, id: i32) -> Result<PostDetail, DomainError> {
        tracing::debug!(post_id = id, "Loading post with author and tags");

        let post = require_post(&self.db, id).await?;
        let author = post
            .find_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::Internal(format!("post {id} has no author")))?;
        let tags = post
            .find_related(tag::Entity)
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PostDetail {
            post: post.into(),
            author: author.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        })
    }

    async fn list(&self, limit: Option<u64>) -> Result<Vec<Post>, DomainError> {
        let mut query = newest_first();
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let posts = query.all(&self.db).await.map_err(db_err)?;
        Ok(posts.into_iter().map(Into::into).collect())
    }

    async fn list_with_authors(
        &self,
        limit: Option<u64>,
    ) -> Result<Vec<(Post, User)>, DomainError> {
        let mut query = newest_first().find_also_related(user::Entity);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows = query.all(&self.db).await.map_err(db_err)?;
        rows.into_iter()
            .map(|(post, author)| {
                let author = author.ok_or_else(|| {
                    DomainError::Internal(format!("post {} has no author", post.id))
                })?;
                Ok((post.into(), author.into()))
            })
            .collect()
    }

    async fn update(&self, id: i32, input: PostInput) -> Result<Post, DomainError> {
        input.validate()?;

        let uow = UnitOfWork::begin(&self.db).await?;

        let mut active = require_post(uow.conn(), id).await?.into_active_model();
        active.title = Set(input.title);
        active.content = Set(input.content);
        let model = active.update(uow.conn()).await.map_err(db_err)?;

        let tag_ids = associations::set_post_tags(uow.conn(), id, &input.tag_ids)
            .await
            .map_err(db_err)?;

        uow.commit().await?;

        tracing::info!(post_id = id, tags = ?tag_ids, "Post updated");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let uow = UnitOfWork::begin(&self.db).await?;
        require_post(uow.conn(), id).await?;

        associations::unlink_post(uow.conn(), id)
            .await
            .map_err(db_err)?;
        post::Entity::delete_by_id(id)
            .exec(uow.conn())
            .await
            .map_err(db_err)?;

        uow.commit().await?;

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }
}
