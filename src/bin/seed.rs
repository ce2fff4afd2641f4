//! Seeds a demo author and a few posts so the list and detail pages have
//! something to serve. Authoring normally happens out of band; this stands
//! in for it during development.

use blogist::db;
use blogist::models::{Comment, Post, PostStatus, User};

fn main() -> anyhow::Result<()> {
    let pool = db::create_connection_pool();
    let conn = pool.get()?;

    let author = User::create(&conn, "demo", "demo@example.com")?;
    let first = Post::create(
        &conn,
        &author,
        "Hello from blogist",
        "A small blog service, freshly seeded.",
        PostStatus::Published,
    )?;
    Post::create(
        &conn,
        &author,
        "Still cooking",
        "This one is not public yet.",
        PostStatus::Draft,
    )?;
    Comment::create(
        &conn,
        &first,
        "First visitor",
        "visitor@example.com",
        "Looking forward to more.",
    )?;

    println!("Seeded author {} and post {}", author.username, first.url());
    Ok(())
}
