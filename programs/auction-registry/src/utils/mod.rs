pub mod errors;
pub mod events;
pub mod payload;
pub mod response;

pub use errors::*;
pub use response::*;
