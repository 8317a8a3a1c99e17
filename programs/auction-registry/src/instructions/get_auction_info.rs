use std::sync::Arc;

use axum::extract::State;

use crate::{
    registry::{run_blocking, AuctionRegistry},
    state::auction_id,
    utils::{payload::Payload, Reply},
};

pub const ROUTE: &str = "/getAuctionInfo";

pub async fn handler(
    State(registry): State<Arc<AuctionRegistry>>,
    Payload(fields): Payload,
) -> Reply {
    let auction_id = auction_id(fields.get("auction_id")).unwrap_or_default();

    match run_blocking(&registry, move |registry| registry.get(&auction_id)).await {
        Ok(info) => Reply::Auction(info),
        Err(err) => Reply::failure(ROUTE, err),
    }
}
