pub mod auction;
pub mod registry;

pub use auction::*;
pub use registry::*;
