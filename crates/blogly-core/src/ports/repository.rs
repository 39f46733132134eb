use async_trait::async_trait;

use crate::domain::{
    Post, PostDetail, PostInput, Tag, TagDetail, TagInput, User, UserDetail, UserInput,
};
use crate::error::{DomainError, RepoError};

/// Generic repository trait shared by every entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// User repository.
///
/// Mutations are atomic: each call either commits fully or leaves no trace.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Insert a new user. Fails with `Validation` on missing names.
    async fn create(&self, input: UserInput) -> Result<User, DomainError>;

    /// Fetch a user and the posts they own.
    async fn get(&self, id: i32) -> Result<UserDetail, DomainError>;

    /// All users ordered by last name, then first name.
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Replace first name, last name and image URL together.
    async fn update(&self, id: i32, input: UserInput) -> Result<User, DomainError>;

    /// Delete a user, their posts, and those posts' tag associations.
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Insert a post owned by `user_id`, tagged with whichever of
    /// `input.tag_ids` exist. Fails with `NotFound` for an unknown owner.
    async fn create(&self, user_id: i32, input: PostInput) -> Result<Post, DomainError>;

    /// Fetch a post with its author and tags.
    async fn get(&self, id: i32) -> Result<PostDetail, DomainError>;

    /// Posts newest first, optionally capped at `limit`.
    async fn list(&self, limit: Option<u64>) -> Result<Vec<Post>, DomainError>;

    /// Same order as [`PostRepository::list`], each post paired with its author.
    async fn list_with_authors(
        &self,
        limit: Option<u64>,
    ) -> Result<Vec<(Post, User)>, DomainError>;

    /// Replace title, content and the whole tag set.
    async fn update(&self, id: i32, input: PostInput) -> Result<Post, DomainError>;

    /// Delete a post and its tag associations. Tags are kept.
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, i32> {
    /// Insert a tag attached to whichever of `input.post_ids` exist.
    /// Fails with `Conflict` when the name is taken.
    async fn create(&self, input: TagInput) -> Result<Tag, DomainError>;

    /// Fetch a tag with the posts it is attached to.
    async fn get(&self, id: i32) -> Result<TagDetail, DomainError>;

    /// All tags in insertion order.
    async fn list(&self) -> Result<Vec<Tag>, DomainError>;

    /// Replace the name and the whole post set.
    async fn update(&self, id: i32, input: TagInput) -> Result<Tag, DomainError>;

    /// Delete a tag and its associations. Posts are kept.
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
