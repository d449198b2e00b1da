//! Scripted in-memory LoopApi
//!
//! Responses are queued per endpoint and consumed in order. Every call is
//! recorded. `hold()` makes calls wait for `release()`, which lets a test
//! observe and interfere with a request while it is in flight.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::client::{ApiError, LoopApi};
use super::types::{CreateLoopRequest, CreateLoopResponse, GenerateTestResponse, SubmitTestRequest, SubmitTestResponse};

/// A call received by the mock
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    CreateLoop(CreateLoopRequest),
    GenerateTest { loop_id: u64 },
    SubmitTest { loop_id: u64, request: SubmitTestRequest },
}

#[derive(Debug, Default)]
struct Script {
    create_loop: VecDeque<Result<CreateLoopResponse, ApiError>>,
    generate_test: VecDeque<Result<GenerateTestResponse, ApiError>>,
    submit_test: VecDeque<Result<SubmitTestResponse, ApiError>>,
    calls: Vec<ApiCall>,
    gate: Option<Arc<Notify>>,
}

/// Mock loop API with queued responses
#[derive(Debug, Default)]
pub struct MockLoopApi {
    script: Mutex<Script>,
}

impl MockLoopApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue the next create-loop response
    pub fn push_create_loop(&self, response: Result<CreateLoopResponse, ApiError>) -> &Self {
        self.script().create_loop.push_back(response);
        self
    }

    /// Queue the next generate-test response
    pub fn push_generate_test(&self, response: Result<GenerateTestResponse, ApiError>) -> &Self {
        self.script().generate_test.push_back(response);
        self
    }

    /// Queue the next submit-test response
    pub fn push_submit_test(&self, response: Result<SubmitTestResponse, ApiError>) -> &Self {
        self.script().submit_test.push_back(response);
        self
    }

    /// Make subsequent calls wait until `release()`
    pub fn hold(&self) {
        self.script().gate = Some(Arc::new(Notify::new()));
    }

    /// Let one held call proceed
    pub fn release(&self) {
        if let Some(gate) = &self.script().gate {
            gate.notify_one();
        }
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<ApiCall> {
        self.script().calls.clone()
    }

    async fn record(&self, call: ApiCall) {
        let gate = {
            let mut script = self.script();
            script.calls.push(call);
            script.gate.clone()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

fn unscripted(endpoint: &str) -> ApiError {
    ApiError::Transport(format!("no scripted response for {}", endpoint))
}

#[async_trait]
impl LoopApi for MockLoopApi {
    async fn create_loop(&self, request: &CreateLoopRequest) -> Result<CreateLoopResponse, ApiError> {
        self.record(ApiCall::CreateLoop(request.clone())).await;
        self.script()
            .create_loop
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("create-loop")))
    }

    async fn generate_test(&self, loop_id: u64) -> Result<GenerateTestResponse, ApiError> {
        self.record(ApiCall::GenerateTest { loop_id }).await;
        self.script()
            .generate_test
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("generate-test")))
    }

    async fn submit_test(&self, loop_id: u64, request: &SubmitTestRequest) -> Result<SubmitTestResponse, ApiError> {
        self.record(ApiCall::SubmitTest {
            loop_id,
            request: request.clone(),
        })
        .await;
        self.script()
            .submit_test
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("submit-test")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(loop_id: u64) -> CreateLoopResponse {
        CreateLoopResponse {
            loop_id,
            student_id: 1,
            learning_pack_id: 7,
        }
    }

    #[tokio::test]
    async fn test_responses_consumed_in_order() {
        let mock = MockLoopApi::new();
        mock.push_create_loop(Ok(created(1)))
            .push_create_loop(Ok(created(2)));

        let request = CreateLoopRequest {
            student_id: 1,
            topics: vec!["1.1".into()],
        };
        assert_eq!(mock.create_loop(&request).await.unwrap().loop_id, 1);
        assert_eq!(mock.create_loop(&request).await.unwrap().loop_id, 2);
        assert_eq!(mock.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_unscripted_call_fails() {
        let mock = MockLoopApi::new();
        let result = mock.generate_test(42).await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
        assert_eq!(mock.calls(), vec![ApiCall::GenerateTest { loop_id: 42 }]);
    }

    #[tokio::test]
    async fn test_hold_and_release() {
        let mock = Arc::new(MockLoopApi::new());
        mock.push_create_loop(Ok(created(5)));
        mock.hold();

        let task = {
            let mock = mock.clone();
            tokio::spawn(async move {
                let request = CreateLoopRequest {
                    student_id: 1,
                    topics: vec!["1.1".into()],
                };
                mock.create_loop(&request).await
            })
        };

        mock.release();
        let response = task.await.unwrap().unwrap();
        assert_eq!(response.loop_id, 5);
    }
}
