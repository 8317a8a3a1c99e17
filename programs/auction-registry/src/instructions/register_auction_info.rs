use std::sync::Arc;

use axum::extract::State;

use crate::{
    registry::{run_blocking, AuctionRegistry},
    state::RegisterAuctionInfo,
    utils::{payload::Payload, Reply, Sentinel},
};

pub const ROUTE: &str = "/registerAuctionInfo";

pub async fn handler(
    State(registry): State<Arc<AuctionRegistry>>,
    Payload(fields): Payload,
) -> Reply {
    let request = RegisterAuctionInfo::from(fields);

    match run_blocking(&registry, move |registry| registry.register(&request)).await {
        Ok(_) => Reply::Code(Sentinel::Success),
        Err(err) => Reply::failure(ROUTE, err),
    }
}
