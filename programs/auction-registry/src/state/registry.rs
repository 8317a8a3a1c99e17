use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::{is_truthy, listing, AuctionInfo, AuctionRecord};

/// Every known auction keyed by auction id. Serialized as a flat JSON object.
/// Entries are kept exactly as stored, so documents written by older or
/// foreign writers survive a rewrite untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    auctions: BTreeMap<String, Value>,
}

impl Registry {
    pub fn len(&self) -> usize {
        self.auctions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.auctions.is_empty()
    }

    /// Stores `record` under `auction_id`, replacing any earlier entry
    /// wholesale. Returns the replaced entry.
    pub fn insert(&mut self, auction_id: String, record: AuctionRecord) -> Option<Value> {
        self.auctions.insert(auction_id, record.into_entry())
    }

    pub fn get(&self, auction_id: &str) -> Option<&Value> {
        self.auctions.get(auction_id).filter(|entry| is_truthy(entry))
    }

    pub fn info(&self, auction_id: &str) -> Option<AuctionInfo> {
        self.get(auction_id)
            .map(|entry| AuctionInfo::project(auction_id, entry))
    }

    pub fn listings(&self) -> Vec<Value> {
        self.auctions
            .iter()
            .map(|(auction_id, entry)| listing(auction_id, entry))
            .collect()
    }
}
