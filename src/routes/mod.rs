use actix_web::{get, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod posts;

#[derive(Serialize, Deserialize, Debug)]
pub struct Response<T> {
    pub status: String,
    pub result: T,
}

/// Body of a rejected form submission: the errors per field, next to the
/// submitted values so the caller can re-display them.
#[derive(Serialize, Debug)]
pub struct InvalidForm<F> {
    pub status: String,
    pub form: F,
    pub errors: HashMap<String, Vec<String>>,
}

pub fn invalid_form<F: Serialize>(
    form: &F,
    errors: HashMap<&'static str, Vec<String>>,
) -> HttpResponse {
    let errors = errors.into_iter().map(|(k, v)| (k.to_owned(), v)).collect();
    HttpResponse::BadRequest().json(InvalidForm {
        status: "INVALID".to_owned(),
        form,
        errors,
    })
}

#[get("/")]
pub async fn index(_req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().body("blogist is running")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_rt::test]
    async fn test_get() {
        let mut app = test::init_service(App::new().service(index)).await;
        let req = test::TestRequest::with_header("content-type", "text/plain")
            .uri("/")
            .to_request();
        let resp = test::call_service(&mut app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(test::read_body(resp).await, "blogist is running");
    }
}
