use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use crate::model::PlaylistResponse;
use crate::server::error::ServerError;
use crate::server::storage::PlaylistStore;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /api/playlist
///
/// Returns the playlist, re-read from the backing file per request.
#[get("/api/playlist")]
pub async fn playlist(store: web::Data<PlaylistStore>) -> Result<HttpResponse, ServerError> {
    let songs = store.load()?;
    Ok(HttpResponse::Ok().json(PlaylistResponse { songs }))
}

/// GET /health
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "operational",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(playlist).service(health);
}
