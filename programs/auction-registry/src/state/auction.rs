use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::errors::ValidationError;

/// A freshly validated auction, written into the registry document under its
/// id. Identifiers and timing fields keep the JSON form they arrived in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuctionRecord {
    pub owner: Value,
    pub nft_mint: Value,
    pub token_mint: Value,
    #[serde(rename = "auctionTitle")]
    pub auction_title: Value,
    pub floor: i64,
    pub increment: i64,
    pub biddercap: i64,
    #[serde(rename = "startTime")]
    pub start_time: Value,
    #[serde(rename = "endTime")]
    pub end_time: Value,
    pub amount: Value,
    /// Epoch milliseconds at registration.
    #[serde(rename = "createdTime")]
    pub created_time: i64,
}

impl AuctionRecord {
    pub fn into_entry(self) -> Value {
        let AuctionRecord {
            owner,
            nft_mint,
            token_mint,
            auction_title,
            floor,
            increment,
            biddercap,
            start_time,
            end_time,
            amount,
            created_time,
        } = self;

        let mut entry = Map::new();
        entry.insert("owner".into(), owner);
        entry.insert("nft_mint".into(), nft_mint);
        entry.insert("token_mint".into(), token_mint);
        entry.insert("auctionTitle".into(), auction_title);
        entry.insert("floor".into(), floor.into());
        entry.insert("increment".into(), increment.into());
        entry.insert("biddercap".into(), biddercap.into());
        entry.insert("startTime".into(), start_time);
        entry.insert("endTime".into(), end_time);
        entry.insert("amount".into(), amount);
        entry.insert("createdTime".into(), created_time.into());
        Value::Object(entry)
    }
}

/// Projection served by `/getAuctionInfo`. Leaves out `owner` and
/// `createdTime`; fields absent from the stored entry are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuctionInfo {
    pub auction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft_mint: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_mint: Option<Value>,
    #[serde(rename = "auctionTitle", skip_serializing_if = "Option::is_none")]
    pub auction_title: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub increment: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biddercap: Option<Value>,
    #[serde(rename = "startTime", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Value>,
    #[serde(rename = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
}

impl AuctionInfo {
    pub fn project(auction_id: &str, entry: &Value) -> Self {
        let field = |name: &str| entry.get(name).cloned();
        Self {
            auction_id: auction_id.to_owned(),
            nft_mint: field("nft_mint"),
            token_mint: field("token_mint"),
            auction_title: field("auctionTitle"),
            floor: field("floor"),
            increment: field("increment"),
            biddercap: field("biddercap"),
            start_time: field("startTime"),
            end_time: field("endTime"),
            amount: field("amount"),
        }
    }
}

/// Stored entry with its key re-attached, as served by `/getAllAuctionInfos`.
/// Every field present in the document is kept; entries that are not JSON
/// objects are passed through unchanged.
pub fn listing(auction_id: &str, entry: &Value) -> Value {
    match entry {
        Value::Object(fields) => {
            let mut fields = fields.clone();
            fields.insert("auction_id".into(), Value::String(auction_id.to_owned()));
            Value::Object(fields)
        }
        other => other.clone(),
    }
}

/// Loose registration request. Every field is kept as raw JSON until
/// [`RegisterAuctionInfo::validate`] decides what counts as present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterAuctionInfo {
    pub auction_id: Option<Value>,
    pub owner: Option<Value>,
    pub nft_mint: Option<Value>,
    pub token_mint: Option<Value>,
    #[serde(rename = "auctionTitle")]
    pub auction_title: Option<Value>,
    pub floor: Option<Value>,
    pub increment: Option<Value>,
    pub biddercap: Option<Value>,
    #[serde(rename = "startTime")]
    pub start_time: Option<Value>,
    #[serde(rename = "endTime")]
    pub end_time: Option<Value>,
    pub amount: Option<Value>,
}

impl From<Map<String, Value>> for RegisterAuctionInfo {
    fn from(fields: Map<String, Value>) -> Self {
        serde_json::from_value(Value::Object(fields)).unwrap_or_default()
    }
}

impl RegisterAuctionInfo {
    /// Checks presence of every field, then the non-zero rule on the bid
    /// parameters, and stamps the record with `created_time`.
    pub fn validate(&self, created_time: i64) -> Result<(String, AuctionRecord), ValidationError> {
        let mut missing = Vec::new();

        let auction_id = auction_id(self.auction_id.as_ref());
        if auction_id.is_none() {
            missing.push("auction_id");
        }
        let owner = required(&self.owner, "owner", identifier, &mut missing);
        let nft_mint = required(&self.nft_mint, "nft_mint", identifier, &mut missing);
        let token_mint = required(&self.token_mint, "token_mint", identifier, &mut missing);
        let auction_title = required(&self.auction_title, "auctionTitle", identifier, &mut missing);
        let floor = integer(&self.floor, "floor", &mut missing);
        let increment = integer(&self.increment, "increment", &mut missing);
        let biddercap = integer(&self.biddercap, "biddercap", &mut missing);
        let start_time = required(&self.start_time, "startTime", is_truthy, &mut missing);
        let end_time = required(&self.end_time, "endTime", is_truthy, &mut missing);
        let amount = required(&self.amount, "amount", is_truthy, &mut missing);

        let Some(auction_id) = auction_id else {
            return Err(ValidationError::MissingFields(missing));
        };
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let bid_parameters = [
            ("floor", floor),
            ("increment", increment),
            ("biddercap", biddercap),
        ];
        let zero: Vec<&'static str> = bid_parameters
            .into_iter()
            .filter(|(_, value)| *value == 0)
            .map(|(field, _)| field)
            .collect();
        if !zero.is_empty() {
            return Err(ValidationError::ZeroParameters(zero));
        }

        Ok((
            auction_id,
            AuctionRecord {
                owner,
                nft_mint,
                token_mint,
                auction_title,
                floor,
                increment,
                biddercap,
                start_time,
                end_time,
                amount,
                created_time,
            },
        ))
    }
}

/// Identifiers are non-empty strings or non-zero numbers.
pub fn identifier(value: &Value) -> bool {
    match value {
        Value::String(_) | Value::Number(_) => is_truthy(value),
        _ => false,
    }
}

/// Reads an auction id under the identifier rule; numbers become their
/// decimal form since the id keys the registry document.
pub fn auction_id(value: Option<&Value>) -> Option<String> {
    match value.filter(|value| identifier(value))? {
        Value::String(id) => Some(id.clone()),
        other => Some(other.to_string()),
    }
}

fn required(
    value: &Option<Value>,
    field: &'static str,
    accept: fn(&Value) -> bool,
    missing: &mut Vec<&'static str>,
) -> Value {
    match value {
        Some(value) if accept(value) => value.clone(),
        _ => {
            missing.push(field);
            Value::Null
        }
    }
}

fn integer(value: &Option<Value>, field: &'static str, missing: &mut Vec<&'static str>) -> i64 {
    match value.as_ref().and_then(parse_int) {
        Some(parsed) => parsed,
        None => {
            missing.push(field);
            0
        }
    }
}

/// Integer from a JSON number (truncated) or from the leading digits of a
/// string, e.g. `" 12abc"` is 12.
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite())
                .map(|float| float.trunc() as i64)
        }),
        Value::String(text) => leading_int(text),
        _ => None,
    }
}

fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |float| float != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
