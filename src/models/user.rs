use crate::db;
use crate::schema::users;
use anyhow::Result;
use chrono::prelude::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Queryable, Identifiable, Debug)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "users"]
struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    pub fn create(conn: &SqliteConnection, username: &str, email: &str) -> Result<Self> {
        let now = Utc::now().naive_utc();
        let new_user = NewUser {
            username,
            email,
            created_at: now,
            updated_at: now,
        };
        diesel::insert_into(users::table)
            .values(new_user)
            .execute(conn)?;
        let id = db::last_insert_id(conn)?;
        let user = users::table.find(id).first(conn)?;
        Ok(user)
    }

    pub fn find(conn: &SqliteConnection, id: i32) -> Result<Option<User>, diesel::result::Error> {
        users::table.find(id).first::<User>(conn).optional()
    }

    pub fn delete(&self, conn: &SqliteConnection) -> Result<()> {
        diesel::delete(users::table.find(self.id)).execute(conn)?;
        Ok(())
    }
}
