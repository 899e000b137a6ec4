//! src/routes/home.rs
use actix_web::http::header::{self, ContentType};
use actix_web::HttpResponse;

const INDEX: &str = include_str!("../../static/index.html");
const CONTACT_SCRIPT: &str = include_str!("../../static/js/contact.js");

pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX)
}

pub async fn contact_script() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/javascript; charset=utf-8"))
        .insert_header((header::CACHE_CONTROL, "public, max-age=3600"))
        .body(CONTACT_SCRIPT)
}
