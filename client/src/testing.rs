//! Test doubles shared by the client's unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::auth::tokens::{MemoryTokenStore, TokenStore};
use crate::net::client::ApiClient;
use crate::net::error::ApiError;
use crate::net::transport::{ApiRequest, Transport};
use crate::util::persistence::{KeyValueStore, MemoryStorage};
use crate::util::timer::Sleeper;

/// Transport answering from a scripted queue and recording every request.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<Value, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn reply(&self, reply: Result<Value, ApiError>) -> &Self {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner).push_back(reply);
        self
    }

    pub fn ok(&self, body: Value) -> &Self {
        self.reply(Ok(body))
    }

    pub fn status(&self, status: u16, body: Value) -> &Self {
        self.reply(Err(ApiError::Status { status, body: Some(body) }))
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|request| request.path).collect()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".to_owned())))
    }
}

pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub tokens: Arc<MemoryTokenStore>,
    pub storage: Arc<MemoryStorage>,
    pub client: ApiClient,
}

impl Harness {
    pub fn new() -> Self {
        let transport = Arc::new(MockTransport::default());
        let tokens = Arc::new(MemoryTokenStore::new());
        let client = ApiClient::new(transport.clone(), tokens.clone() as Arc<dyn TokenStore>);
        Self { transport, tokens, storage: Arc::new(MemoryStorage::new()), client }
    }

    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let harness = Self::new();
        harness.tokens.set_tokens(access, refresh);
        harness
    }

    pub fn storage(&self) -> Arc<dyn KeyValueStore> {
        self.storage.clone()
    }
}

pub fn cell<S>(value: S) -> Rc<RefCell<S>> {
    Rc::new(RefCell::new(value))
}

/// Sleeper that returns immediately and remembers each requested delay.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    pub delays: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn recorded(&self) -> Vec<Duration> {
        self.delays.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, delay: Duration) {
        self.delays.borrow_mut().push(delay);
    }
}
