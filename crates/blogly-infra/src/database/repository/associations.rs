//! Maintenance of the `posts_tags` join table.
//!
//! Association sets are always replaced wholesale. Ids that do not resolve
//! to an existing row are skipped rather than failing the operation.

use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, Set,
};

use crate::database::entity::{post, post_tag, tag};

/// Replace every tag of `post_id` with the existing tags among `tag_ids`.
/// Returns the ids that were linked.
pub(super) async fn set_post_tags<C>(
    conn: &C,
    post_id: i32,
    tag_ids: &[i32],
) -> Result<Vec<i32>, DbErr>
where
    C: ConnectionTrait,
{
    post_tag::Entity::delete_many()
        .filter(post_tag::Column::PostId.eq(post_id))
        .exec(conn)
        .await?;

    let tag_ids = existing_tag_ids(conn, tag_ids).await?;
    link(conn, tag_ids.iter().map(|tag_id| (post_id, *tag_id))).await?;

    Ok(tag_ids)
}

/// Replace every post of `tag_id` with the existing posts among `post_ids`.
/// Returns the ids that were linked.
pub(super) async fn set_tag_posts<C>(
    conn: &C,
    tag_id: i32,
    post_ids: &[i32],
) -> Result<Vec<i32>, DbErr>
where
    C: ConnectionTrait,
{
    post_tag::Entity::delete_many()
        .filter(post_tag::Column::TagId.eq(tag_id))
        .exec(conn)
        .await?;

    let post_ids = existing_post_ids(conn, post_ids).await?;
    link(conn, post_ids.iter().map(|post_id| (*post_id, tag_id))).await?;

    Ok(post_ids)
}

/// Drop every association of one post.
pub(super) async fn unlink_post<C>(conn: &C, post_id: i32) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let result = post_tag::Entity::delete_many()
        .filter(post_tag::Column::PostId.eq(post_id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

/// Drop every association of the posts owned by `user_id`.
pub(super) async fn unlink_user_posts<C>(conn: &C, user_id: i32) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let owned_posts = post::Entity::find()
        .select_only()
        .column(post::Column::Id)
        .filter(post::Column::UserId.eq(user_id))
        .into_query();

    let result = post_tag::Entity::delete_many()
        .filter(post_tag::Column::PostId.in_subquery(owned_posts))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

/// Drop every association of one tag.
pub(super) async fn unlink_tag<C>(conn: &C, tag_id: i32) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let result = post_tag::Entity::delete_many()
        .filter(post_tag::Column::TagId.eq(tag_id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

async fn link<C, I>(conn: &C, pairs: I) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    I: IntoIterator<Item = (i32, i32)>,
{
    let rows: Vec<post_tag::ActiveModel> = pairs
        .into_iter()
        .map(|(post_id, tag_id)| post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(tag_id),
        })
        .collect();

    if rows.is_empty() {
        return Ok(());
    }

    post_tag::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

async fn existing_tag_ids<C>(conn: &C, ids: &[i32]) -> Result<Vec<i32>, DbErr>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    tag::Entity::find()
        .select_only()
        .column(tag::Column::Id)
        .filter(tag::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(tag::Column::Id)
        .into_tuple::<i32>()
        .all(conn)
        .await
}

async fn existing_post_ids<C>(conn: &C, ids: &[i32]) -> Result<Vec<i32>, DbErr>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    post::Entity::find()
        .select_only()
        .column(post::Column::Id)
        .filter(post::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(post::Column::Id)
        .into_tuple::<i32>()
        .all(conn)
        .await
}
