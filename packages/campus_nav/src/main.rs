use std::sync::Arc;

use axum::serve;
use campus_nav::api::{AppState, build_router};
use campus_nav::common::campus_graph::CampusGraph;
use campus_nav::common::logging::init_logging;
use campus_nav::config::service::ServiceConfig;
use campus_nav::loading::catalog::{default_catalog, load_catalog};
use campus_nav::notify::TextSender;
use campus_nav::notify::twilio::TwilioSender;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env();
    init_logging(&config.logging);

    let catalog = match &config.graph_path {
        Some(path) => load_catalog(path),
        None => default_catalog(),
    }
    .inspect_err(|e| error!(error = %e, "failed to read campus catalog"))?;

    let campus = CampusGraph::from_catalog(catalog)
        .inspect_err(|e| error!(error = %e, "failed to build campus graph"))?;

    info!(
        locations = campus.location_ids().len(),
        segments = campus.edge_count(),
        "campus graph loaded"
    );

    let sms: Option<Arc<dyn TextSender>> = match config.sms {
        Some(credentials) => {
            let sender: Arc<dyn TextSender> =
                Arc::new(TwilioSender::new(credentials));
            Some(sender)
        }
        None => {
            warn!("twilio credentials missing, text messages disabled");
            None
        }
    };

    let router = build_router(AppState::new(campus, sms));

    info!(addr = %config.addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.addr.as_str()).await?;
    serve(listener, router).await?;

    Ok(())
}
