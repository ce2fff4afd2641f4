use super::{invalid_form, Response};
use crate::config::AppConfig;
use crate::extractors::{DbConnection, Query};
use crate::forms::{field_errors, CommentForm, SharePostForm};
use crate::mail::{EmailBackend, OutgoingEmail};
use crate::models::{Comment, Post};
use crate::pagination;
use actix_web::{get, post, web, Error, HttpResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Default, Debug)]
pub struct PostListQuery {
    pub page: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PostListResponse {
    pub page: usize,
    pub num_pages: usize,
    pub count: usize,
    pub posts: Vec<Post>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PostDetailResponse {
    pub post: Post,
    pub comments: Vec<Comment>,
    pub new_comment: Option<Comment>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ShareResponse {
    pub post: Post,
    pub sent: bool,
}

#[get("/posts")]
pub async fn list_posts(
    conn: DbConnection,
    query: Option<Query<PostListQuery>>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, Error> {
    let PostListQuery { page } = query.unwrap_or_default().into_inner();
    let posts = web::block(move || Post::published(&conn))
        .await
        .map_err(|e| {
            log::error!("Failed to load published posts: {}", e);
            HttpResponse::InternalServerError().finish()
        })?;
    let page = pagination::paginate(posts, config.posts_per_page, page.as_deref());
    let resp = Response {
        status: "OK".to_owned(),
        result: PostListResponse {
            page: page.number,
            num_pages: page.num_pages,
            count: page.count,
            posts: page.items,
        },
    };
    Ok(HttpResponse::Ok().json(resp))
}

#[get("/posts/{year}/{month}/{day}/{slug}")]
pub async fn post_detail(
    conn: DbConnection,
    path: web::Path<(i32, u32, u32, String)>,
) -> Result<HttpResponse, Error> {
    let (year, month, day, slug) = path.into_inner();
    let post =
        match Post::find_published_by_publish_day_and_slug(&conn, year, month, day, &slug) {
            Ok(Some(post)) => post,
            Ok(None) => {
                return Ok(
                    HttpResponse::NotFound().body(format!("No post found with slug: {}", slug))
                )
            }
            Err(e) => {
                log::error!("Failed to look up post: {}", e);
                return Ok(HttpResponse::InternalServerError().finish());
            }
        };
    let comments = match post.active_comments(&conn) {
        Ok(comments) => comments,
        Err(e) => {
            log::error!("Failed to load comments: {}", e);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };
    let resp = Response {
        status: "OK".to_owned(),
        result: PostDetailResponse {
            post,
            comments,
            new_comment: None,
        },
    };
    Ok(HttpResponse::Ok().json(resp))
}

#[post("/posts/{year}/{month}/{day}/{slug}/comments")]
pub async fn create_comment(
    conn: DbConnection,
    path: web::Path<(i32, u32, u32, String)>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse, Error> {
    let (year, month, day, slug) = path.into_inner();
    // Comments are accepted on drafts too, so no status filter here.
    let post = match Post::find_by_publish_day_and_slug(&conn, year, month, day, &slug) {
        Ok(Some(post)) => post,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().body(format!("No post found with slug: {}", slug)))
        }
        Err(e) => {
            log::error!("Failed to look up post: {}", e);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return Ok(invalid_form(&form, field_errors(&errors)));
    }
    let (post, comments, new_comment) =
        web::block(move || -> anyhow::Result<(Post, Vec<Comment>, Comment)> {
            let new_comment = Comment::create(&conn, &post, &form.name, &form.email, &form.body)?;
            let comments = post.active_comments(&conn)?;
            Ok((post, comments, new_comment))
        })
        .await
        .map_err(|e| {
            log::error!("Failed to create comment: {}", e);
            HttpResponse::InternalServerError().finish()
        })?;
    let resp = Response {
        status: "OK".to_owned(),
        result: PostDetailResponse {
            post,
            comments,
            new_comment: Some(new_comment),
        },
    };
    Ok(HttpResponse::Created().json(resp))
}

#[get("/posts/{post_id}/share")]
pub async fn share_post_form(
    conn: DbConnection,
    path: web::Path<(i32,)>,
) -> Result<HttpResponse, Error> {
    let post = match Post::find_published_by_id(&conn, path.0.0) {
        Ok(Some(post)) => post,
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().body(format!("No published post with id: {}", path.0.0))
            )
        }
        Err(e) => {
            log::error!("Failed to look up post: {}", e);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };
    let resp = Response {
        status: "OK".to_owned(),
        result: ShareResponse { post, sent: false },
    };
    Ok(HttpResponse::Ok().json(resp))
}

#[post("/posts/{post_id}/share")]
pub async fn share_post(
    conn: DbConnection,
    path: web::Path<(i32,)>,
    form: web::Form<SharePostForm>,
    config: web::Data<AppConfig>,
    mailer: web::Data<EmailBackend>,
) -> Result<HttpResponse, Error> {
    let post = match Post::find_published_by_id(&conn, path.0.0) {
        Ok(Some(post)) => post,
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().body(format!("No published post with id: {}", path.0.0))
            )
        }
        Err(e) => {
            log::error!("Failed to look up post: {}", e);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return Ok(invalid_form(&form, field_errors(&errors)));
    }
    let email = compose_share_email(&post, &form, &config.base_url);
    match mailer.send(email).await {
        Ok(()) => {
            let resp = Response {
                status: "OK".to_owned(),
                result: ShareResponse { post, sent: true },
            };
            Ok(HttpResponse::Ok().json(resp))
        }
        Err(e) => {
            log::error!("Failed to deliver share email: {}", e);
            Ok(HttpResponse::BadGateway().body("Failed to deliver the notification email"))
        }
    }
}

pub fn compose_share_email(post: &Post, form: &SharePostForm, base_url: &str) -> OutgoingEmail {
    let post_url = format!("{}{}", base_url, post.url());
    let subject = format!(
        "{} ({}) recommends you reading \"{}\"",
        form.name, form.email, post.title
    );
    let text_body = format!(
        "Read \"{}\" at {}\n\n{}'s comments: {}",
        post.title, post_url, form.name, form.comments
    );
    OutgoingEmail {
        to: form.to.clone(),
        subject,
        text_body,
    }
}
