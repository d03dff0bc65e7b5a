use actix_web::HttpResponse;

/// Static pages embedded at compile time; no build pipeline, no disk reads.
const LANDING_HTML: &str = include_str!("../assets/landing.html");
const QUERY_HTML: &str = include_str!("../assets/index.html");

pub async fn landing() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(LANDING_HTML)
}

pub async fn query_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(QUERY_HTML)
}
