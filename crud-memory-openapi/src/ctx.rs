use std::convert::Infallible;

use axum::{
    extract::{Extension, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use crate::NoteStore;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone, Debug, FromRequestParts)]
pub struct BaseParams {
    pub ctx: Ctx,
    #[from_request(via(Extension))]
    pub store: NoteStore,
}

impl BaseParams {
    pub fn new(store: NoteStore, ctx: Ctx) -> Self {
        Self { store, ctx }
    }
}

#[derive(Clone, Debug)]
pub struct Ctx {
    pub request_id: String,
}

impl Ctx {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}

impl Default for Ctx {
    fn default() -> Self {
        Self::new(Uuid::now_v7().to_string())
    }
}

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // set by SetRequestIdLayer, but handlers may run without it
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(Ctx::new);

        Ok(request_id.unwrap_or_default())
    }
}
