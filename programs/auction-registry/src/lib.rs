use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod config;
pub mod instructions;
pub mod registry;
pub mod state;
pub mod store;
pub mod utils;

use config::HttpOptions;
use instructions::*;
use registry::AuctionRegistry;

/// HTTP surface of the registry. Every route answers 200 with a JSON body.
pub fn app(registry: Arc<AuctionRegistry>, options: &HttpOptions) -> Router {
    let router = Router::new()
        .route(register_auction_info::ROUTE, post(register_auction_info::handler))
        .route(get_auction_info::ROUTE, post(get_auction_info::handler))
        .route(get_all_auction_infos::ROUTE, post(get_all_auction_infos::handler))
        .with_state(registry);

    let router = match &options.public_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(options.cors_layer())
        .layer(TraceLayer::new_for_http())
}
