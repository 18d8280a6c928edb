use askama::Template;
use axum::response::IntoResponse;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {}

#[derive(Template)]
#[template(path = "services.html")]
pub struct ServicesTemplate {}

pub async fn index() -> impl IntoResponse {
    IndexTemplate {}
}

pub async fn about() -> impl IntoResponse {
    AboutTemplate {}
}

pub async fn services() -> impl IntoResponse {
    ServicesTemplate {}
}

pub async fn health_check() -> &'static str {
    "OK"
}
