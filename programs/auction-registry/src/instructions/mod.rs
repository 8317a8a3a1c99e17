pub mod get_all_auction_infos;
pub mod get_auction_info;
pub mod register_auction_info;
