use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

use blogly_core::DomainError;
use blogly_core::domain::{Tag, TagDetail, TagInput};
use blogly_core::ports::TagRepository;

use super::associations;
use crate::database::entity::{post, tag};
use crate::database::sea_orm_base::{SeaOrmRepository, db_err};
use crate::database::unit_of_work::UnitOfWork;

/// SeaORM tag repository.
pub type SeaOrmTagRepository = SeaOrmRepository<tag::Entity>;

async fn require_tag<C>(conn: &C, id: i32) -> Result<tag::Model, DomainError>
where
    C: ConnectionTrait,
{
    tag::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| DomainError::not_found("Tag", id))
}

/// Fail with `Conflict` when another tag already uses `name`.
async fn ensure_name_available<C>(
    conn: &C,
    name: &str,
    except_id: Option<i32>,
) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    let mut query = tag::Entity::find().filter(tag::Column::Name.eq(name));
    if let Some(id) = except_id {
        query = query.filter(tag::Column::Id.ne(id));
    }

    match query.one(conn).await.map_err(db_err)? {
        Some(_) => Err(DomainError::Conflict(format!("tag '{name}' already exists"))),
        None => Ok(()),
    }
}

#[async_trait]
impl TagRepository for SeaOrmTagRepository {
    async fn create(&self, input: TagInput) -> Result<Tag, DomainError> {
        input.validate()?;

        let uow = UnitOfWork::begin(&self.db).await?;
        ensure_name_available(uow.conn(), &input.name, None).await?;

        let model = tag::ActiveModel {
            name: Set(input.name),
            ..Default::default()
        }
        .insert(uow.conn())
        .await
        .map_err(db_err)?;

        let post_ids = associations::set_tag_posts(uow.conn(), model.id, &input.post_ids)
            .await
            .map_err(db_err)?;

        uow.commit().await?;

        tracing::info!(tag_id = model.id, posts = ?post_ids, "Tag created");
        Ok(model.into())
    }

    async fn get(&self, id: i32) -> Result<TagDetail, DomainError> {
        tracing::debug!(tag_id = id, "Loading tag with posts");

        let tag = require_tag(&self.db, id).await?;
        let posts = tag
            .find_related(post::Entity)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(TagDetail {
            tag: tag.into(),
            posts: posts.into_iter().map(Into::into).collect(),
        })
    }

    async fn list(&self) -> Result<Vec<Tag>, DomainError> {
        let tags = tag::Entity::find()
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(tags.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: TagInput) -> Result<Tag, DomainError> {
        input.validate()?;

        let uow = UnitOfWork::begin(&self.db).await?;

        let mut active = require_tag(uow.conn(), id).await?.into_active_model();
        ensure_name_available(uow.conn(), &input.name, Some(id)).await?;
        active.name = Set(input.name);
        let model = active.update(uow.conn()).await.map_err(db_err)?;

        let post_ids = associations::set_tag_posts(uow.conn(), id, &input.post_ids)
            .await
            .map_err(db_err)?;

        uow.commit().await?;

        tracing::info!(tag_id = id, posts = ?post_ids, "Tag updated");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let uow = UnitOfWork::begin(&self.db).await?;
        require_tag(uow.conn(), id).await?;

        let unlinked = associations::unlink_tag(uow.conn(), id)
            .await
            .map_err(db_err)?;
        tag::Entity::delete_by_id(id)
            .exec(uow.conn())
            .await
            .map_err(db_err)?;

        uow.commit().await?;

        tracing::info!(tag_id = id, associations_removed = unlinked, "Tag deleted");
        Ok(())
    }
}
