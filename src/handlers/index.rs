use crate::routes;
use axum::response::Html;

pub const BANNER: &str = "<h1>Code challenge</h1>";

/// GET / handler - Static HTML banner
#[utoipa::path(
    get,
    path = routes::INDEX,
    responses(
        (status = 200, description = "Static banner", body = String, content_type = "text/html")
    ),
    tag = "index"
)]
pub async fn index_handler() -> Html<&'static str> {
    Html(BANNER)
}
