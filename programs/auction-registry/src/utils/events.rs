use serde_json::Value;
use tracing::info;

pub trait Event {
    fn emit(&self);
}

#[macro_export]
macro_rules! emit {
    ($event:expr) => {
        $crate::utils::events::Event::emit(&$event)
    };
}

pub struct AuctionRegistered<'a> {
    pub auction_id: &'a str,
    pub owner: &'a Value,
    pub created_time: i64,
    pub replaced: bool,
}

impl Event for AuctionRegistered<'_> {
    fn emit(&self) {
        info!(
            auction_id = self.auction_id,
            owner = %self.owner,
            created_time = self.created_time,
            replaced = self.replaced,
            "auction registered"
        );
    }
}

pub struct AuctionInfoServed<'a> {
    pub auction_id: &'a str,
}

impl Event for AuctionInfoServed<'_> {
    fn emit(&self) {
        info!(auction_id = self.auction_id, "auction info served");
    }
}

pub struct AuctionListServed {
    pub count: usize,
}

impl Event for AuctionListServed {
    fn emit(&self) {
        info!(count = self.count, "auction list served");
    }
}
