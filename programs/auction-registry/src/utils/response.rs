use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{state::AuctionInfo, utils::errors::RegistryError};

/// Integer outcome codes returned in place of HTTP statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    Success,
    NotFound,
    ValidationFailed,
    InternalError,
}

impl Sentinel {
    pub fn code(self) -> i64 {
        match self {
            Sentinel::Success | Sentinel::NotFound => 0,
            Sentinel::ValidationFailed => -1,
            Sentinel::InternalError => -100,
        }
    }
}

impl From<&RegistryError> for Sentinel {
    fn from(err: &RegistryError) -> Self {
        match err {
            RegistryError::Validation(_) => Sentinel::ValidationFailed,
            RegistryError::NotFound(_) => Sentinel::NotFound,
            RegistryError::Storage(_) | RegistryError::Task(_) => Sentinel::InternalError,
        }
    }
}

impl Serialize for Sentinel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

/// Body of every API response. Always sent with status 200.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Code(Sentinel),
    Auction(AuctionInfo),
    Auctions(Vec<Value>),
}

impl Reply {
    pub fn failure(route: &'static str, err: RegistryError) -> Self {
        err.report(route);
        Reply::Code(Sentinel::from(&err))
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
