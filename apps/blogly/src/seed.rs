//! Demo content for a fresh database.

use blogly_core::DomainError;
use blogly_core::domain::{PostInput, TagInput, UserInput};

use crate::state::AppState;

/// Insert demo users, posts and tags. Does nothing if any user exists.
pub async fn seed_demo_data(state: &AppState) -> Result<(), DomainError> {
    if !state.users.list().await?.is_empty() {
        tracing::info!("Users already present, skipping demo data");
        return Ok(());
    }

    let allison = state
        .users
        .create(UserInput::new(
            "Allison",
            "Applebee",
            Some("https://images.unsplash.com/photo-1494790108377-be9c29b29330".to_string()),
        ))
        .await?;
    let barry = state
        .users
        .create(UserInput::new(
            "Barry",
            "Bumble",
            Some("https://images.unsplash.com/photo-1500648767791-00dcc994a43e".to_string()),
        ))
        .await?;
    state
        .users
        .create(UserInput::new("Coral", "Cho", None))
        .await?;

    let posts = [
        (allison.id, "First Post!", "Oh, hai."),
        (allison.id, "Yet another post", "Nothing much to say today."),
        (barry.id, "Flask is awesome", "Ship it before lunch."),
        (barry.id, "Bees", "A short note on bumblebees and their habits."),
        (barry.id, "Buzzing along", "Another day in the garden."),
    ];

    let mut post_ids = Vec::with_capacity(posts.len());
    for (user_id, title, content) in posts {
        let post = state
            .posts
            .create(user_id, PostInput::new(title, content, vec![]))
            .await?;
        post_ids.push(post.id);
    }

    let tags = [
        ("Fun", vec![post_ids[0], post_ids[3]]),
        ("Even More", vec![post_ids[1]]),
        ("Bloop", vec![post_ids[2], post_ids[4]]),
        ("Zope", vec![]),
    ];
    for (name, ids) in tags {
        state.tags.create(TagInput::new(name, ids)).await?;
    }

    tracing::info!(
        users = 3,
        posts = post_ids.len(),
        "Demo data inserted"
    );
    Ok(())
}
