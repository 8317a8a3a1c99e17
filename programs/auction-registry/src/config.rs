use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use clap::{Args, Parser};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "auction-registry",
    version,
    about = "Serves auction metadata persisted in a single JSON document"
)]
pub struct Config {
    /// Address the HTTP listener binds to
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
    /// Registry document, created on first registration
    #[arg(long, env = "AUCTION_STORE_PATH", default_value = "dump.json")]
    pub store_path: PathBuf,
    #[command(flatten)]
    pub http: HttpOptions,
}

impl Config {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct HttpOptions {
    /// Origins allowed by CORS. Every origin is allowed when none are given.
    #[arg(long = "cors-origin", env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
    /// Directory served for requests that match no API route
    #[arg(long, env = "PUBLIC_DIR")]
    pub public_dir: Option<PathBuf>,
}

impl HttpOptions {
    pub fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods([
                Method::OPTIONS,
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

        if self.cors_origins.is_empty() || self.cors_origins.iter().any(|origin| origin == "*") {
            return layer.allow_origin(Any);
        }

        let origins: Vec<HeaderValue> = self
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
