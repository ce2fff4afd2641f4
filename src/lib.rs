#[macro_use]
extern crate diesel;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

pub mod config;
pub mod db;
pub mod extractors;
pub mod forms;
pub mod mail;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod schema;

pub async fn run() -> std::io::Result<()> {
    std::env::set_var("RUST_LOG", "blogist=debug,actix_web=info");
    std::env::set_var("RUST_BACKTRACE", "1");
    env_logger::init();
    let pool = db::create_connection_pool();
    let conf = config::AppConfig::from_env();
    let mailer = web::Data::new(mail::backend_from_env());
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::new().max_age(3600).finish())
            .data(pool.clone())
            .data(conf.clone())
            .app_data(mailer.clone())
            .service(routes::index)
            .service(routes::posts::list_posts)
            .service(routes::posts::post_detail)
            .service(routes::posts::create_comment)
            .service(routes::posts::share_post_form)
            .service(routes::posts::share_post)
    })
    .bind("127.0.0.1:8088")?
    .run()
    .await
}
