use std::sync::Arc;

use axum::extract::State;

use crate::{
    registry::{run_blocking, AuctionRegistry},
    utils::Reply,
};

pub const ROUTE: &str = "/getAllAuctionInfos";

pub async fn handler(State(registry): State<Arc<AuctionRegistry>>) -> Reply {
    match run_blocking(&registry, |registry| registry.list()).await {
        Ok(listings) => Reply::Auctions(listings),
        Err(err) => Reply::failure(ROUTE, err),
    }
}
