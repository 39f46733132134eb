use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

use blogly_core::DomainError;
use blogly_core::domain::{User, UserDetail, UserInput};
use blogly_core::ports::UserRepository;

use super::associations;
use crate::database::entity::{post, user};
use crate::database::sea_orm_base::{SeaOrmRepository, db_err};
use crate::database::unit_of_work::UnitOfWork;

/// SeaORM user repository.
pub type SeaOrmUserRepository = SeaOrmRepository<user::Entity>;

/// Load a user row or fail with `NotFound`.
pub(super) async fn require_user<C>(conn: &C, id: i32) -> Result<user::Model, DomainError>
where
    C: ConnectionTrait,
{
    user::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| DomainError::not_found("User", id))
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, input: UserInput) -> Result<User, DomainError> {
        input.validate()?;

        let model = user::ActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            image_url: Set(input.image_url),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        tracing::info!(user_id = model.id, "User created");
        Ok(model.into())
    }

    async fn get(&self, id: i32) -> Result<UserDetail, DomainError> {
        tracing::debug!(user_id = id, "Loading user with posts");

        let user = require_user(&self.db, id).await?;
        let posts = user
            .find_related(post::Entity)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(UserDetail {
            user: user.into(),
            posts: posts.into_iter().map(Into::into).collect(),
        })
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::LastName)
            .order_by_asc(user::Column::FirstName)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: UserInput) -> Result<User, DomainError> {
        input.validate()?;

        let uow = UnitOfWork::begin(&self.db).await?;

        let mut active = require_user(uow.conn(), id).await?.into_active_model();
        active.first_name = Set(input.first_name);
        active.last_name = Set(input.last_name);
        active.image_url = Set(input.image_url);
        let model = active.update(uow.conn()).await.map_err(db_err)?;

        uow.commit().await?;

        tracing::info!(user_id = id, "User updated");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let uow = UnitOfWork::begin(&self.db).await?;
        require_user(uow.conn(), id).await?;

        associations::unlink_user_posts(uow.conn(), id)
            .await
            .map_err(db_err)?;
        let posts = post::Entity::delete_many()
            .filter(post::Column::UserId.eq(id))
            .exec(uow.conn())
            .await
            .map_err(db_err)?;
        user::Entity::delete_by_id(id)
            .exec(uow.conn())
            .await
            .map_err(db_err)?;

        uow.commit().await?;

        tracing::info!(user_id = id, posts_deleted = posts.rows_affected, "User deleted");
        Ok(())
    }
}
