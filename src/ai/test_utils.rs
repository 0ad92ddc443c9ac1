//! Shared test utilities for the `ai` module.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::ai::{CompletionBackend, CompletionRequest};

/// Mock backend with a pre-programmed queue of responses.
///
/// Responses are returned in FIFO order. When the queue is exhausted,
/// subsequent calls return `Err("no more mock responses")`. Every call
/// records the request and key it was given; use
/// [`request_handle`](Self::request_handle) to inspect them after the mock
/// has been moved into the code under test.
pub(crate) struct MockBackend {
    responses: Arc<Mutex<VecDeque<Result<Vec<String>>>>>,
    recorded: Arc<Mutex<Vec<(CompletionRequest, String)>>>,
}

impl MockBackend {
    /// Creates a mock that returns the given responses in order.
    pub(crate) fn new(responses: Vec<Result<Vec<String>>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            recorded: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock answering once with a single choice.
    pub(crate) fn answering(text: &str) -> Self {
        Self::new(vec![Ok(vec![text.to_string()])])
    }

    /// Returns a handle for inspecting the requests that were sent.
    pub(crate) fn request_handle(&self) -> RequestRecordHandle {
        RequestRecordHandle {
            recorded: self.recorded.clone(),
        }
    }
}

/// Shared handle to a mock backend's recorded requests.
pub(crate) struct RequestRecordHandle {
    recorded: Arc<Mutex<Vec<(CompletionRequest, String)>>>,
}

impl RequestRecordHandle {
    /// Returns all recorded `(request, api_key)` pairs.
    pub(crate) fn requests(&self) -> Vec<(CompletionRequest, String)> {
        self.recorded.lock().unwrap().clone()
    }

    /// Returns the number of completion calls that were made.
    pub(crate) fn request_count(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }
}

impl CompletionBackend for MockBackend {
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
        api_key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>> {
        let responses = self.responses.clone();
        let recorded = self.recorded.clone();
        let request = request.clone();
        let api_key = api_key.to_string();
        Box::pin(async move {
            recorded.lock().unwrap().push((request, api_key));
            responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(anyhow::anyhow!("no more mock responses")))
        })
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
