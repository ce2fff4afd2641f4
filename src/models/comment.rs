use crate::db;
use crate::models::post::Post;
use crate::schema::comments;
use anyhow::Result;
use chrono::prelude::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Queryable, Identifiable, Associations, Debug)]
#[belongs_to(Post)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub name: String,
    pub email: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub is_active: bool,
}

#[derive(Insertable)]
#[table_name = "comments"]
struct NewComment<'a> {
    pub post_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub body: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub is_active: bool,
}

impl Comment {
    /// Attaches a visitor comment to the post. New comments are active until
    /// moderation hides them.
    pub fn create(
        conn: &SqliteConnection,
        post: &Post,
        name: &str,
        email: &str,
        body: &str,
    ) -> Result<Comment> {
        let now = Utc::now().naive_utc();
        let new_comment = NewComment {
            post_id: post.id,
            name,
            email,
            body,
            created_at: now,
            updated_at: now,
            is_active: true,
        };
        diesel::insert_into(comments::table)
            .values(new_comment)
            .execute(conn)?;
        let id = db::last_insert_id(conn)?;
        let comment = comments::table.find(id).first(conn)?;
        Ok(comment)
    }

    pub fn deactivate(&mut self, conn: &SqliteConnection) -> Result<()> {
        let now = Utc::now().naive_utc();
        diesel::update(comments::table.find(self.id))
            .set((
                comments::is_active.eq(false),
                comments::updated_at.eq(now),
            ))
            .execute(conn)?;
        self.is_active = false;
        self.updated_at = now;
        Ok(())
    }

    pub fn count_for(conn: &SqliteConnection, post: &Post) -> Result<i64, diesel::result::Error> {
        Comment::belonging_to(post).count().get_result(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::{PostStatus, User};

    #[test]
    fn test_create_is_active_by_default() {
        let pool = db::create_test_pool();
        let conn = pool.get().unwrap();
        let author = User::create(&conn, "ann", "ann@example.com").unwrap();
        let post = Post::create(&conn, &author, "Post", "body", PostStatus::Published).unwrap();

        let comment =
            Comment::create(&conn, &post, "Bob", "bob@example.com", "Nice read").unwrap();
        assert!(comment.is_active);
        assert_eq!(comment.post_id, post.id);
        assert_eq!(Comment::count_for(&conn, &post).unwrap(), 1);
    }

    #[test]
    fn test_deactivated_comments_are_hidden() {
        let pool = db::create_test_pool();
        let conn = pool.get().unwrap();
        let author = User::create(&conn, "ann", "ann@example.com").unwrap();
        let post = Post::create(&conn, &author, "Post", "body", PostStatus::Published).unwrap();
        Comment::create(&conn, &post, "Bob", "bob@example.com", "First").unwrap();
        let mut spam = Comment::create(&conn, &post, "Eve", "eve@example.com", "Spam").unwrap();

        spam.deactivate(&conn).unwrap();

        let active = post.active_comments(&conn).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].body, "First");
        // Deactivation hides, it does not delete.
        assert_eq!(Comment::count_for(&conn, &post).unwrap(), 2);
    }

    #[test]
    fn test_active_comments_in_chronological_order() {
        let pool = db::create_test_pool();
        let conn = pool.get().unwrap();
        let author = User::create(&conn, "ann", "ann@example.com").unwrap();
        let post = Post::create(&conn, &author, "Post", "body", PostStatus::Published).unwrap();
        let first = Comment::create(&conn, &post, "Bob", "bob@example.com", "First").unwrap();
        let second = Comment::create(&conn, &post, "Cat", "cat@example.com", "Second").unwrap();

        let active = post.active_comments(&conn).unwrap();
        assert_eq!(
            active.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );
    }

    #[test]
    fn test_deleting_post_cascades_to_comments() {
        let pool = db::create_test_pool();
        let conn = pool.get().unwrap();
        let author = User::create(&conn, "ann", "ann@example.com").unwrap();
        let post = Post::create(&conn, &author, "Post", "body", PostStatus::Published).unwrap();
        Comment::create(&conn, &post, "Bob", "bob@example.com", "Orphan soon").unwrap();

        post.delete(&conn).unwrap();

        let remaining: i64 = comments::table.count().get_result(&conn).unwrap();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_deleting_user_cascades_to_posts_and_comments() {
        let pool = db::create_test_pool();
        let conn = pool.get().unwrap();
        let author = User::create(&conn, "ann", "ann@example.com").unwrap();
        let post = Post::create(&conn, &author, "Post", "body", PostStatus::Published).unwrap();
        Comment::create(&conn, &post, "Bob", "bob@example.com", "Gone with the post").unwrap();

        author.delete(&conn).unwrap();

        let posts_left: i64 = crate::schema::posts::table.count().get_result(&conn).unwrap();
        let comments_left: i64 = comments::table.count().get_result(&conn).unwrap();
        assert_eq!(posts_left, 0);
        assert_eq!(comments_left, 0);
    }
}
