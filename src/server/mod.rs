pub mod error;
pub mod routes;
pub mod storage;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware::Logger, web};

use crate::config::Settings;
use crate::server::storage::PlaylistStore;

fn configure_cors(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .max_age(3600);

    if origins.len() == 1 && origins[0] == "*" {
        cors = cors.allow_any_origin();
    } else {
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Run the content service until it is shut down.
pub async fn run(settings: Settings) -> std::io::Result<()> {
    let store = PlaylistStore::new(settings.songs_file.clone());
    let music_dir = settings.music_dir.clone();
    let origins = settings.cors_origins.clone();
    let bind_address = settings.bind_address();

    tracing::info!(
        address = %bind_address,
        songs_file = %settings.songs_file.display(),
        music_dir = %music_dir.display(),
        "starting content service"
    );

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(configure_cors(&origins))
            .app_data(web::Data::new(store.clone()))
            .configure(routes::configure)
            .service(Files::new("/music", music_dir.clone()))
    })
    .bind(&bind_address)?
    .shutdown_timeout(30)
    .run();

    tokio::select! {
        result = server => result,
        _ = shutdown_signal() => {
            tracing::info!("shutdown complete");
            Ok(())
        }
    }
}
