//! Network Trait
//!
//! The one outbound call the worker makes. `Err` means the request never
//! got a response; HTTP error statuses come back as `Ok`.

use async_trait::async_trait;

use crate::error::WorkerResult;
use crate::http::{FetchRequest, HttpResponse};

#[async_trait(?Send)]
pub trait Network {
    async fn fetch(&self, request: &FetchRequest) -> WorkerResult<HttpResponse>;
}
