use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::Response,
};
use tracing::warn;

use crate::error::generic_response;

/// Raw query-string pairs. Lookups take the first value of a repeated name.
///
/// A query string that cannot be decoded is answered with a generic 400; the
/// decoder's message is logged only.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for QueryParams {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<Vec<(String, String)>>::from_request_parts(parts, state).await {
            Ok(Query(pairs)) => Ok(Self(pairs)),
            Err(rejection) => {
                warn!(error = %rejection.body_text(), "Rejected query string");
                Err(generic_response(StatusCode::BAD_REQUEST))
            }
        }
    }
}
