use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "frontend/dist"]
struct Assets;

pub async fn static_handler(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if let Some(asset) = Assets::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return (
            [(header::CONTENT_TYPE, mime.as_ref().to_string())],
            asset.data,
        )
            .into_response();
    }

    // Everything else gets the SPA shell; the frontend router takes over.
    match Assets::get("index.html") {
        Some(shell) => (
            [(header::CONTENT_TYPE, "text/html".to_string())],
            shell.data,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
