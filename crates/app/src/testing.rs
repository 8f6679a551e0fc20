//! Scripted in-memory transport for controller tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;

use batlog_domain::locale::Locale;

use crate::ports::{HttpReply, LogTransport, TransportError};

/// A request seen by [`StubTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub locale: Locale,
    pub body: Option<serde_json::Value>,
}

/// Answers requests from a queue and records what was asked.
#[derive(Debug, Default)]
pub struct StubTransport {
    replies: RefCell<VecDeque<Result<HttpReply, TransportError>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl StubTransport {
    /// Queue a reply.
    pub fn push(&self, reply: HttpReply) {
        self.replies.borrow_mut().push_back(Ok(reply));
    }

    /// Queue a `{logs, totalPages}` reply.
    pub fn push_page(&self, logs: serde_json::Value, total_pages: u32) {
        self.push(HttpReply::json(
            200,
            &serde_json::json!({"logs": logs, "totalPages": total_pages}),
        ));
    }

    /// Queue a transport failure.
    pub fn fail(&self, message: &str) {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError(message.to_string())));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    fn answer(&self, request: RecordedRequest) -> Result<HttpReply, TransportError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".to_string())))
    }
}

impl LogTransport for StubTransport {
    fn post_json(
        &self,
        path: &str,
        locale: Locale,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<HttpReply, TransportError>> {
        let result = self.answer(RecordedRequest {
            method: "POST",
            path: path.to_string(),
            locale,
            body: Some(body.clone()),
        });
        async move { result }
    }

    fn get(
        &self,
        path: &str,
        locale: Locale,
    ) -> impl Future<Output = Result<HttpReply, TransportError>> {
        let result = self.answer(RecordedRequest {
            method: "GET",
            path: path.to_string(),
            locale,
            body: None,
        });
        async move { result }
    }
}
