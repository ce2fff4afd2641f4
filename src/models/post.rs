use crate::db;
use crate::models::{comment::Comment, user::User};
use crate::schema::{comments, posts};
use anyhow::{anyhow, Result};
use chrono::prelude::*;
use chrono::{Duration, NaiveDateTime};
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use std::io::Write;
use voca_rs::manipulate::slugify;

/// Publication state gating visibility to anonymous visitors.
#[derive(
    AsExpression, FromSqlRow, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq,
)]
#[sql_type = "Text"]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl ToSql<Text, Sqlite> for PostStatus {
    fn to_sql<W: Write>(&self, out: &mut Output<W, Sqlite>) -> serialize::Result {
        <str as ToSql<Text, Sqlite>>::to_sql(self.as_str(), out)
    }
}

impl FromSql<Text, Sqlite> for PostStatus {
    fn from_sql(bytes: Option<&<Sqlite as Backend>::RawValue>) -> deserialize::Result<Self> {
        let status = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        match status.as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(format!("Unrecognized post status: {}", other).into()),
        }
    }
}

#[derive(Serialize, Deserialize, Queryable, Identifiable, Debug)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub author_id: i32,
    pub body: String,
    pub published_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub status: PostStatus,
}

#[derive(Insertable)]
#[table_name = "posts"]
struct NewPost<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub author_id: i32,
    pub body: &'a str,
    pub published_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub status: PostStatus,
}

/// Start and end of the given calendar day, or None if the date is invalid.
fn publish_day_bounds(year: i32, month: u32, day: u32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let start = date.and_hms(0, 0, 0);
    Some((start, start + Duration::days(1)))
}

impl Post {
    /// All published posts, newest publication first.
    pub fn published(conn: &SqliteConnection) -> Result<Vec<Post>, diesel::result::Error> {
        posts::table
            .filter(posts::status.eq(PostStatus::Published))
            .order(posts::published_at.desc())
            .load(conn)
    }

    pub fn find_published_by_id(
        conn: &SqliteConnection,
        id: i32,
    ) -> Result<Option<Post>, diesel::result::Error> {
        posts::table
            .filter(posts::id.eq(id))
            .filter(posts::status.eq(PostStatus::Published))
            .first::<Post>(conn)
            .optional()
    }

    pub fn find_by_publish_day_and_slug(
        conn: &SqliteConnection,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Option<Post>, diesel::result::Error> {
        let (start, end) = match publish_day_bounds(year, month, day) {
            Some(bounds) => bounds,
            None => return Ok(None),
        };
        posts::table
            .filter(posts::published_at.ge(start))
            .filter(posts::published_at.lt(end))
            .filter(posts::slug.eq(slug))
            .first::<Post>(conn)
            .optional()
    }

    pub fn find_published_by_publish_day_and_slug(
        conn: &SqliteConnection,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Option<Post>, diesel::result::Error> {
        match Self::find_by_publish_day_and_slug(conn, year, month, day, slug)? {
            Some(post) if post.status == PostStatus::Published => Ok(Some(post)),
            _ => Ok(None),
        }
    }

    /// Creates a post published now. The slug is derived from the title.
    pub fn create(
        conn: &SqliteConnection,
        author: &User,
        title: &str,
        body: &str,
        status: PostStatus,
    ) -> Result<Post> {
        Self::create_at(conn, author, title, body, status, Utc::now().naive_utc())
    }

    pub fn create_at(
        conn: &SqliteConnection,
        author: &User,
        title: &str,
        body: &str,
        status: PostStatus,
        published_at: NaiveDateTime,
    ) -> Result<Post> {
        let now = Utc::now().naive_utc();
        let slug = slugify(title);
        let date = published_at.date();
        if Self::find_by_publish_day_and_slug(conn, date.year(), date.month(), date.day(), &slug)?
            .is_some()
        {
            return Err(anyhow!(
                "A post with slug {} already exists for {}",
                slug,
                date
            ));
        }
        let new_post = NewPost {
            title,
            slug: &slug,
            author_id: author.id,
            body,
            published_at,
            created_at: now,
            updated_at: now,
            status,
        };
        diesel::insert_into(posts::table)
            .values(new_post)
            .execute(conn)?;
        let id = db::last_insert_id(conn)?;
        let post = posts::table.find(id).first(conn)?;
        Ok(post)
    }

    /// Writes the mutable fields back and refreshes updated_at. created_at
    /// and published_at are never touched here.
    pub fn save(&mut self, conn: &SqliteConnection) -> Result<()> {
        let now = Utc::now().naive_utc();
        diesel::update(posts::table.find(self.id))
            .set((
                posts::title.eq(&self.title),
                posts::slug.eq(&self.slug),
                posts::body.eq(&self.body),
                posts::status.eq(self.status),
                posts::updated_at.eq(now),
            ))
            .execute(conn)?;
        self.updated_at = now;
        Ok(())
    }

    pub fn delete(&self, conn: &SqliteConnection) -> Result<()> {
        diesel::delete(posts::table.find(self.id)).execute(conn)?;
        Ok(())
    }

    /// Comments not hidden by moderation, oldest first.
    pub fn active_comments(
        &self,
        conn: &SqliteConnection,
    ) -> Result<Vec<Comment>, diesel::result::Error> {
        Comment::belonging_to(self)
            .filter(comments::is_active.eq(true))
            .order((comments::created_at.asc(), comments::id.asc()))
            .load(conn)
    }

    /// Path of the public detail page, e.g. `/posts/2020/9/12/first-post`.
    pub fn url(&self) -> String {
        let date = self.published_at.date();
        format!(
            "/posts/{}/{}/{}/{}",
            date.year(),
            date.month(),
            date.day(),
            self.slug
        )
    }
}
