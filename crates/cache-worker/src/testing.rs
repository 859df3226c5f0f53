//! Scripted network for handler tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{WorkerError, WorkerResult};
use crate::http::{FetchRequest, HttpResponse};
use crate::network::Network;

#[derive(Default)]
pub struct FakeNetwork {
    responses: RefCell<HashMap<String, HttpResponse>>,
    offline: Cell<bool>,
    calls: RefCell<Vec<String>>,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(self, url: &str, response: HttpResponse) -> Self {
        self.responses.borrow_mut().insert(url.to_string(), response);
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Network for FakeNetwork {
    async fn fetch(&self, request: &FetchRequest) -> WorkerResult<HttpResponse> {
        self.calls.borrow_mut().push(request.url.clone());
        if self.offline.get() {
            return Err(WorkerError::Network("Failed to fetch".to_string()));
        }
        Ok(self
            .responses
            .borrow()
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| HttpResponse::ok("").with_status(404)))
    }
}
