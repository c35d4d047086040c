//! In-memory sender (testing only)
//!
//! `RecordingSender` captures every request and replays queued responses,
//! falling back to a default response when the queue is empty.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use orb_bdd_state::ResponseState;

use crate::request::HttpRequest;
use crate::sender::RequestSender;
use crate::Result;

#[derive(Debug)]
pub struct RecordingSender {
    requests: Mutex<Vec<HttpRequest>>,
    queued: Mutex<VecDeque<ResponseState>>,
    fallback: ResponseState,
}

impl RecordingSender {
    /// Answer every request with `fallback`.
    pub fn new(fallback: ResponseState) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            queued: Mutex::new(VecDeque::new()),
            fallback,
        }
    }

    /// Queue a response to be returned before the fallback.
    pub fn with_response(self, response: ResponseState) -> Self {
        self.queued.lock().unwrap().push_back(response);
        self
    }

    /// Requests seen so far, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for RecordingSender {
    fn default() -> Self {
        Self::new(ResponseState::new(200, ""))
    }
}

#[async_trait]
impl RequestSender for RecordingSender {
    async fn send(&self, request: &HttpRequest) -> Result<ResponseState> {
        self.requests.lock().unwrap().push(request.clone());
        let queued = self.queued.lock().unwrap().pop_front();
        Ok(queued.unwrap_or_else(|| self.fallback.clone()))
    }
}
