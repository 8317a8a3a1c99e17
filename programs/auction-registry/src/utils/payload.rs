use std::{collections::HashMap, convert::Infallible};

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde_json::{Map, Value};
use tracing::debug;

/// Request body as a loose field map. JSON objects and urlencoded forms are
/// both accepted; anything unreadable becomes an empty map so the handler's
/// own validation decides the outcome.
#[derive(Debug, Default)]
pub struct Payload(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let fields = if is_form {
            match Form::<HashMap<String, String>>::from_request(req, state).await {
                Ok(Form(fields)) => fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect(),
                Err(rejection) => {
                    debug!(%rejection, "ignoring unreadable form body");
                    Map::new()
                }
            }
        } else {
            match Json::<Map<String, Value>>::from_request(req, state).await {
                Ok(Json(fields)) => fields,
                Err(rejection) => {
                    debug!(%rejection, "ignoring unreadable json body");
                    Map::new()
                }
            }
        };

        Ok(Payload(fields))
    }
}
