//! Conversions from domain entities to template view models.

use blogly_core::domain::{Post, Tag, User};
use blogly_shared::dto::{ChoiceView, PostView, TagView, UserView};

pub fn user(user: &User) -> UserView {
    UserView {
        id: user.id,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        full_name: user.full_name(),
        image_url: user.image_url.clone(),
    }
}

pub fn users(users: &[User]) -> Vec<UserView> {
    users.iter().map(user).collect()
}

pub fn post(post: &Post) -> PostView {
    PostView {
        id: post.id,
        user_id: post.user_id,
        title: post.title.clone(),
        content: post.content.clone(),
        created_at: post.pretty_datetime(),
        author: None,
    }
}

pub fn posts(posts: &[Post]) -> Vec<PostView> {
    posts.iter().map(post).collect()
}

/// Posts annotated with their author's full name.
pub fn posts_with_authors(posts: &[(Post, User)]) -> Vec<PostView> {
    posts
        .iter()
        .map(|(p, author)| PostView {
            author: Some(author.full_name()),
            ..post(p)
        })
        .collect()
}

pub fn tag(tag: &Tag) -> TagView {
    TagView {
        id: tag.id,
        name: tag.name.clone(),
    }
}

pub fn tags(tags: &[Tag]) -> Vec<TagView> {
    tags.iter().map(tag).collect()
}

pub fn tag_choices(tags: &[Tag], selected: &[i32]) -> Vec<ChoiceView> {
    tags.iter()
        .map(|t| ChoiceView::new(t.id, t.name.clone(), selected))
        .collect()
}

pub fn post_choices(posts: &[Post], selected: &[i32]) -> Vec<ChoiceView> {
    posts
        .iter()
        .map(|p| ChoiceView::new(p.id, p.title.clone(), selected))
        .collect()
}
