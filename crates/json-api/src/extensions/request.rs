//! Request parsing helpers.
//!
//! Malformed ids, query parameters and bodies are rejected with 400 before any service call.

use std::str::FromStr;

use salvo::{Request, http::header::CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::ApiError;

pub(crate) trait RequestExt {
    /// A numeric path parameter.
    fn path_id(&self, name: &str) -> Result<i64, ApiError>;

    /// An optional query parameter; present but unparsable is an error.
    fn optional_query<T: FromStr>(&self, name: &str) -> Result<Option<T>, ApiError>;

    /// The request body as JSON.
    async fn json_body<T: DeserializeOwned + Send>(&mut self) -> Result<T, ApiError>;

    /// The `Content-Type` header, if it is valid text.
    fn content_type_header(&self) -> Option<String>;
}

impl RequestExt for Request {
    fn path_id(&self, name: &str) -> Result<i64, ApiError> {
        self.param::<String>(name)
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|id| *id >= 0)
            .ok_or_else(|| ApiError::bad_request(format!("invalid {name} id")))
    }

    fn optional_query<T: FromStr>(&self, name: &str) -> Result<Option<T>, ApiError> {
        self.query::<String>(name)
            .map(|value| value.parse::<T>())
            .transpose()
            .map_err(|_ignored| ApiError::bad_request(format!("invalid {name} parameter")))
    }

    async fn json_body<T: DeserializeOwned + Send>(&mut self) -> Result<T, ApiError> {
        self.parse_json::<T>().await.map_err(|error| {
            debug!(error = %error, "rejected request body");

            ApiError::invalid_body()
        })
    }

    fn content_type_header(&self) -> Option<String> {
        self.headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }
}
