use blogly_core::DomainError;
use blogly_core::error::RepoError;
use blogly_core::domain::{Post, PostInput, TagInput, User, UserInput};
use blogly_core::ports::{BaseRepository, PostRepository, TagRepository, UserRepository};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseBackend, DbConn, EntityTrait, MockDatabase,
    Set, SqlxSqliteConnector,
};

use super::entity::{post_tag, user};
use super::repository::insert_post;
use super::sea_orm_base::db_err;
use super::{SeaOrmPostRepository, SeaOrmTagRepository, SeaOrmUserRepository, UnitOfWork};

struct Repos {
    db: DbConn,
    users: SeaOrmUserRepository,
    posts: SeaOrmPostRepository,
    tags: SeaOrmTagRepository,
}

/// A migrated in-memory SQLite database. A single pooled connection keeps
/// every query on the same in-memory database.
async fn setup() -> Repos {
    let opts = ConnectOptions::new("sqlite::memory:")
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false)
        .to_owned();
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    Repos {
        users: SeaOrmUserRepository::new(share(&db)),
        posts: SeaOrmPostRepository::new(share(&db)),
        tags: SeaOrmTagRepository::new(share(&db)),
        db,
    }
}

/// `DatabaseConnection` is not `Clone` while sea-orm's `mock` feature is on,
/// so hand out another handle to the same SQLite pool instead.
fn share(db: &DbConn) -> DbConn {
    SqlxSqliteConnector::from_sqlx_sqlite_pool(db.get_sqlite_connection_pool().clone())
}

async fn add_user(repos: &Repos, first: &str, last: &str) -> User {
    repos
        .users
        .create(UserInput::new(first, last, None))
        .await
        .unwrap()
}

async fn add_post(repos: &Repos, owner: i32, title: &str, tag_ids: Vec<i32>) -> Post {
    repos
        .posts
        .create(owner, PostInput::new(title, format!("{title} content."), tag_ids))
        .await
        .unwrap()
}

async fn association_count(db: &DbConn) -> usize {
    post_tag::Entity::find().all(db).await.unwrap().len()
}

#[tokio::test]
async fn test_find_user_by_id_with_mock() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: 7,
            first_name: "Coral".to_owned(),
            last_name: "Cho".to_owned(),
            image_url: None,
        }]])
        .into_connection();

    let repo = SeaOrmUserRepository::new(db);

    let result: Option<User> = repo.find_by_id(7).await.unwrap();

    let user = result.unwrap();
    assert_eq!(user.full_name(), "Coral Cho");
    assert_eq!(user.id, 7);
}

#[tokio::test]
async fn test_create_user_assigns_id_and_full_name() {
    let repos = setup().await;

    let user = add_user(&repos, "TestFirst", "TestLast").await;

    assert!(user.id > 0);
    assert_eq!(user.full_name(), "TestFirst TestLast");
    assert_eq!(user.image_url, None);
}

#[tokio::test]
async fn test_create_user_requires_names() {
    let repos = setup().await;

    let err = repos
        .users
        .create(UserInput::new("", "Last", None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
    assert!(repos.users.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_users_orders_by_last_then_first_name() {
    let repos = setup().await;
    add_user(&repos, "TestFirst", "TestLast").await;
    add_user(&repos, "Test2First", "Test2Last").await;
    add_user(&repos, "Aaron", "TestLast").await;

    let names: Vec<String> = repos
        .users
        .list()
        .await
        .unwrap()
        .iter()
        .map(User::full_name)
        .collect();

    assert_eq!(
        names,
        vec!["Test2First Test2Last", "Aaron TestLast", "TestFirst TestLast"]
    );
}

#[tokio::test]
async fn test_get_user_is_stable_without_writes() {
    let repos = setup().await;
    let user = add_user(&repos, "Allison", "Applebee").await;

    let first = repos.users.get(user.id).await.unwrap();
    let second = repos.users.get(user.id).await.unwrap();

    assert_eq!(first.user, second.user);
    assert_eq!(first.posts, second.posts);
}

#[tokio::test]
async fn test_get_unknown_user_is_not_found() {
    let repos = setup().await;

    let err = repos.users.get(404).await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::NotFound { entity_type: "User", id: 404 }
    ));
}

#[tokio::test]
async fn test_update_user_replaces_all_fields() {
    let repos = setup().await;
    let user = repos
        .users
        .create(UserInput::new(
            "Barry",
            "Bumble",
            Some("http://img/bee.png".to_string()),
        ))
        .await
        .unwrap();

    let updated = repos
        .users
        .update(user.id, UserInput::new("Barnaby", "Buzz", Some(String::new())))
        .await
        .unwrap();

    assert_eq!(updated.full_name(), "Barnaby Buzz");
    assert_eq!(updated.image_url, None);
    assert_eq!(repos.users.get(user.id).await.unwrap().user, updated);
}

#[tokio::test]
async fn test_update_unknown_user_is_not_found() {
    let repos = setup().await;

    let err = repos
        .users
        .update(99, UserInput::new("A", "B", None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_user_posts_are_retrievable() {
    let repos = setup().await;
    let user = add_user(&repos, "TestFirst", "TestLast").await;
    let p1 = add_post(&repos, user.id, "Test1", vec![]).await;
    let p2 = add_post(&repos, user.id, "Test2", vec![]).await;

    let detail = repos.users.get(user.id).await.unwrap();
    let titles: Vec<&str> = detail.posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Test1", "Test2"]);

    let fetched = repos.posts.get(p1.id).await.unwrap();
    assert_eq!(fetched.post, p1);
    assert_eq!(fetched.author, user);
    assert_eq!(repos.posts.get(p2.id).await.unwrap().post.title, "Test2");
}

#[tokio::test]
async fn test_create_post_for_unknown_user_is_not_found() {
    let repos = setup().await;

    let err = repos
        .posts
        .create(12, PostInput::new("Orphan", "No owner.", vec![]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::NotFound { entity_type: "User", id: 12 }
    ));
    assert!(repos.posts.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_post_skips_unknown_tags() {
    let repos = setup().await;
    let user = add_user(&repos, "Coral", "Cho").await;
    let tag = repos.tags.create(TagInput::new("fun", vec![])).await.unwrap();

    let post = add_post(&repos, user.id, "Tagged", vec![tag.id, 9999]).await;

    let detail = repos.posts.get(post.id).await.unwrap();
    assert_eq!(detail.tags, vec![tag]);
}

#[tokio::test]
async fn test_list_posts_newest_first_with_limit() {
    let repos = setup().await;
    let user = add_user(&repos, "Allison", "Applebee").await;
    for n in 1..=7 {
        add_post(&repos, user.id, &format!("Post {n}"), vec![]).await;
    }

    let recent = repos.posts.list(Some(5)).await.unwrap();
    let titles: Vec<&str> = recent.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Post 7", "Post 6", "Post 5", "Post 4", "Post 3"]);

    assert_eq!(repos.posts.list(None).await.unwrap().len(), 7);
}

#[tokio::test]
async fn test_update_post_replaces_tag_set() {
    let repos = setup().await;
    let user = add_user(&repos, "Barry", "Bumble").await;
    let t1 = repos.tags.create(TagInput::new("t1", vec![])).await.unwrap();
    let t2 = repos.tags.create(TagInput::new("t2", vec![])).await.unwrap();
    let post = add_post(&repos, user.id, "Retag me", vec![t1.id]).await;

    let updated = repos
        .posts
        .update(post.id, PostInput::new("Retagged", "New body.", vec![t2.id]))
        .await
        .unwrap();

    assert_eq!(updated.title, "Retagged");
    assert_eq!(updated.created_at, post.created_at);
    let detail = repos.posts.get(post.id).await.unwrap();
    assert_eq!(detail.tag_ids(), vec![t2.id]);
    assert!(repos.tags.get(t1.id).await.unwrap().posts.is_empty());
}

#[tokio::test]
async fn test_update_post_with_no_tags_clears_them() {
    let repos = setup().await;
    let user = add_user(&repos, "Barry", "Bumble").await;
    let tag = repos.tags.create(TagInput::new("t1", vec![])).await.unwrap();
    let post = add_post(&repos, user.id, "Tagged", vec![tag.id]).await;

    repos
        .posts
        .update(post.id, PostInput::new("Tagged", "Body.", vec![]))
        .await
        .unwrap();

    assert!(repos.posts.get(post.id).await.unwrap().tags.is_empty());
    assert_eq!(association_count(&repos.db).await, 0);
}

#[tokio::test]
async fn test_delete_post_keeps_tags_and_other_posts() {
    let repos = setup().await;
    let user = add_user(&repos, "TestFirst", "TestLast").await;
    let post = add_post(&repos, user.id, "Doomed", vec![]).await;
    let other = add_post(&repos, user.id, "Survivor", vec![]).await;
    let tag = repos
        .tags
        .create(TagInput::new("silly tag", vec![post.id, other.id]))
        .await
        .unwrap();

    assert_eq!(
        repos.tags.get(tag.id).await.unwrap().post_ids(),
        vec![post.id, other.id]
    );

    repos.posts.delete(post.id).await.unwrap();

    let detail = repos.tags.get(tag.id).await.unwrap();
    assert_eq!(detail.tag, tag);
    assert_eq!(detail.post_ids(), vec![other.id]);
    assert!(matches!(
        repos.posts.get(post.id).await.unwrap_err(),
        DomainError::NotFound { .. }
    ));
}

#[tokio::test]
async fn test_silly_tag_loses_its_only_post() {
    let repos = setup().await;
    let user = add_user(&repos, "TestFirst", "TestLast").await;
    let post = add_post(&repos, user.id, "Test1", vec![]).await;
    let tag = repos
        .tags
        .create(TagInput::new("silly tag", vec![post.id]))
        .await
        .unwrap();

    assert_eq!(repos.tags.get(tag.id).await.unwrap().posts, vec![post.clone()]);

    repos.posts.delete(post.id).await.unwrap();

    assert!(repos.tags.get(tag.id).await.unwrap().posts.is_empty());
}

#[tokio::test]
async fn test_delete_user_cascades_to_posts() {
    let repos = setup().await;
    let doomed = add_user(&repos, "Doomed", "Author").await;
    let keeper = add_user(&repos, "Kept", "Author").await;
    let tag = repos.tags.create(TagInput::new("shared", vec![])).await.unwrap();
    let gone = add_post(&repos, doomed.id, "Gone", vec![tag.id]).await;
    add_post(&repos, doomed.id, "Also gone", vec![tag.id]).await;
    let kept = add_post(&repos, keeper.id, "Kept", vec![tag.id]).await;

    repos.users.delete(doomed.id).await.unwrap();

    let remaining: Vec<i32> = repos
        .posts
        .list(None)
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(remaining, vec![kept.id]);
    let gone: Option<Post> = repos.posts.find_by_id(gone.id).await.unwrap();
    assert!(gone.is_none());
    assert_eq!(repos.tags.get(tag.id).await.unwrap().post_ids(), vec![kept.id]);
    assert_eq!(association_count(&repos.db).await, 1);
}

#[tokio::test]
async fn test_delete_unknown_entities_is_not_found() {
    let repos = setup().await;

    assert!(matches!(
        repos.users.delete(1).await.unwrap_err(),
        DomainError::NotFound { entity_type: "User", .. }
    ));
    assert!(matches!(
        repos.posts.delete(1).await.unwrap_err(),
        DomainError::NotFound { entity_type: "Post", .. }
    ));
    assert!(matches!(
        repos.tags.delete(1).await.unwrap_err(),
        DomainError::NotFound { entity_type: "Tag", .. }
    ));
}

#[tokio::test]
async fn test_duplicate_tag_name_is_conflict() {
    let repos = setup().await;
    repos.tags.create(TagInput::new("rust", vec![])).await.unwrap();

    let err = repos
        .tags
        .create(TagInput::new("rust", vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Conflict(_)));
    assert_eq!(repos.tags.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_tag_name_collision_is_conflict() {
    let repos = setup().await;
    let first = repos.tags.create(TagInput::new("first", vec![])).await.unwrap();
    repos.tags.create(TagInput::new("second", vec![])).await.unwrap();

    let err = repos
        .tags
        .update(first.id, TagInput::new("second", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let same = repos
        .tags
        .update(first.id, TagInput::new("first", vec![]))
        .await
        .unwrap();
    assert_eq!(same, first);
}

#[tokio::test]
async fn test_update_tag_replaces_post_set() {
    let repos = setup().await;
    let user = add_user(&repos, "Coral", "Cho").await;
    let p1 = add_post(&repos, user.id, "One", vec![]).await;
    let p2 = add_post(&repos, user.id, "Two", vec![]).await;
    let tag = repos.tags.create(TagInput::new("tag", vec![p1.id])).await.unwrap();

    let renamed = repos
        .tags
        .update(tag.id, TagInput::new("renamed", vec![p2.id, 555]))
        .await
        .unwrap();

    assert_eq!(renamed.name, "renamed");
    assert_eq!(repos.tags.get(tag.id).await.unwrap().post_ids(), vec![p2.id]);
    assert!(repos.posts.get(p1.id).await.unwrap().tags.is_empty());
}

#[tokio::test]
async fn test_delete_tag_keeps_posts() {
    let repos = setup().await;
    let user = add_user(&repos, "Coral", "Cho").await;
    let post = add_post(&repos, user.id, "Tagged", vec![]).await;
    let tag = repos.tags.create(TagInput::new("tag", vec![post.id])).await.unwrap();

    repos.tags.delete(tag.id).await.unwrap();

    assert!(repos.tags.list().await.unwrap().is_empty());
    let detail = repos.posts.get(post.id).await.unwrap();
    assert_eq!(detail.post, post);
    assert!(detail.tags.is_empty());
    assert_eq!(association_count(&repos.db).await, 0);
}

#[tokio::test]
async fn test_list_tags_in_insertion_order() {
    let repos = setup().await;
    for name in ["zeta", "alpha", "mid"] {
        repos.tags.create(TagInput::new(name, vec![])).await.unwrap();
    }

    let names: Vec<String> = repos
        .tags
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[tokio::test]
async fn test_unit_of_work_rollback_discards_writes() {
    let repos = setup().await;

    let uow = UnitOfWork::begin(&repos.db).await.unwrap();
    user::ActiveModel {
        first_name: Set("Rolled".to_string()),
        last_name: Set("Back".to_string()),
        ..Default::default()
    }
    .insert(uow.conn())
    .await
    .unwrap();
    uow.rollback().await.unwrap();

    let uow = UnitOfWork::begin(&repos.db).await.unwrap();
    user::ActiveModel {
        first_name: Set("Dropped".to_string()),
        last_name: Set("Uncommitted".to_string()),
        ..Default::default()
    }
    .insert(uow.conn())
    .await
    .unwrap();
    drop(uow);

    assert!(repos.users.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unit_of_work_commit_persists_writes() {
    let repos = setup().await;

    let uow = UnitOfWork::begin(&repos.db).await.unwrap();
    let model = user::ActiveModel {
        first_name: Set("Kept".to_string()),
        last_name: Set("Row".to_string()),
        ..Default::default()
    }
    .insert(uow.conn())
    .await
    .unwrap();
    uow.commit().await.unwrap();

    let found: Option<User> = repos.users.find_by_id(model.id).await.unwrap();
    assert_eq!(found.map(|u| u.full_name()), Some("Kept Row".to_string()));
}

#[tokio::test]
async fn test_names_are_stored_as_given() {
    let repos = setup().await;

    let user = add_user(&repos, "  Mary", "Ann ").await;
    let stored = repos.users.get(user.id).await.unwrap().user;
    assert_eq!(stored.first_name, "  Mary");
    assert_eq!(stored.full_name(), "  Mary Ann ");

    let spaced = repos.tags.create(TagInput::new(" rust", vec![])).await.unwrap();
    let plain = repos.tags.create(TagInput::new("rust", vec![])).await.unwrap();
    assert_ne!(spaced.id, plain.id);
    assert_eq!(repos.tags.get(spaced.id).await.unwrap().tag.name, " rust");
}

#[tokio::test]
async fn test_list_posts_with_authors() {
    let repos = setup().await;
    let alice = add_user(&repos, "Alice", "Adams").await;
    let bob = add_user(&repos, "Bob", "Brown").await;
    add_post(&repos, alice.id, "Older", vec![]).await;
    let newer = add_post(&repos, bob.id, "Newer", vec![]).await;
    let newest = add_post(&repos, alice.id, "Newest", vec![]).await;

    let rows = repos.posts.list_with_authors(Some(2)).await.unwrap();

    let summary: Vec<(i32, String)> = rows
        .iter()
        .map(|(post, author)| (post.id, author.full_name()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (newest.id, "Alice Adams".to_string()),
            (newer.id, "Bob Brown".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_foreign_key_violation_is_classified() {
    let repos = setup().await;

    let err = post_tag::Entity::insert(post_tag::ActiveModel {
        post_id: Set(404),
        tag_id: Set(405),
    })
    .exec_without_returning(&repos.db)
    .await
    .unwrap_err();

    assert!(matches!(db_err(err), RepoError::ForeignKey(_)));
}

#[tokio::test]
async fn test_post_insert_for_vanished_owner_is_not_found() {
    let repos = setup().await;

    let err = insert_post(&repos.db, 404, &PostInput::new("Orphan", "No owner.", vec![]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::NotFound { entity_type: "User", id: 404 }
    ));
    assert!(repos.posts.list(None).await.unwrap().is_empty());
}
