//! The loop orchestrator
//!
//! Owns the state of one loop and drives it through the remote API. Each
//! asynchronous operation is two-phase: it checks its required stage and
//! advances to an in-flight stage under a single write lock, awaits the API,
//! then settles or rolls back under a second write lock. The lock is never held
//! across the await.
//!
//! `reset` bumps the epoch. A response whose operation started in an older
//! epoch is dropped instead of being written into the new loop.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info, warn};
use tokio::sync::broadcast;

use crate::api::{ApiError, CreateLoopRequest, LoopApi, SubmitTestRequest};
use crate::domain::{Answer, Exam, ExamResult, Outcome, Stage};
use crate::error::{LoopError, Result};

use super::events::{EventBus, StageEvent};
use super::state::LoopState;

/// One operation's stage requirements and failure wording
struct Step {
    name: &'static str,
    required: Stage,
    in_flight: Stage,
    failure: &'static str,
}

const START_LOOP: Step = Step {
    name: "start loop",
    required: Stage::Idle,
    in_flight: Stage::Assigning,
    failure: "Failed to start loop",
};

const GENERATE_TEST: Step = Step {
    name: "generate test",
    required: Stage::Assigned,
    in_flight: Stage::GeneratingExam,
    failure: "Failed to generate test",
};

const SUBMIT_TEST: Step = Step {
    name: "submit test",
    required: Stage::Testing,
    in_flight: Stage::Diagnosing,
    failure: "Failed to submit test",
};

/// Single-writer state container for one tutoring loop
pub struct LoopOrchestrator<A: LoopApi> {
    api: Arc<A>,
    state: RwLock<LoopState>,
    events: EventBus,
}

impl<A: LoopApi> LoopOrchestrator<A> {
    /// Create an orchestrator in the idle stage
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: RwLock::new(LoopState::default()),
            events: EventBus::new(),
        }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    fn read(&self) -> RwLockReadGuard<'_, LoopState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, LoopState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> LoopState {
        self.read().clone()
    }

    pub fn stage(&self) -> Stage {
        self.read().stage
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    /// Receive a `StageEvent` for every committed stage change
    pub fn subscribe(&self) -> broadcast::Receiver<StageEvent> {
        self.events.subscribe()
    }

    /// Create a loop and its learning pack for a student.
    ///
    /// Requires `Idle`. Settles in `Assigned`, rolls back to `Idle`.
    pub async fn start_loop<I, S>(&self, student_id: u64, topics: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = CreateLoopRequest {
            student_id,
            topics: topics.into_iter().map(Into::into).collect(),
        };
        let (epoch, ()) = self.begin(&START_LOOP, |_| Some(()))?;
        info!(
            "Starting loop for student {} with topics {:?}",
            student_id, request.topics
        );

        let response = self.api.create_loop(&request).await;

        Ok(self.settle(&START_LOOP, epoch, response, |state, created| {
            state.loop_id = Some(created.loop_id);
            state.student_id = Some(created.student_id);
            state.learning_pack = Some(created.learning_pack());
            Stage::Assigned
        }))
    }

    /// Generate the mock exam for the current loop.
    ///
    /// Requires `Assigned`. Settles in `Testing`, rolls back to `Assigned`.
    pub async fn generate_test(&self) -> Result<Outcome> {
        let (epoch, loop_id) = self.begin(&GENERATE_TEST, |state| state.loop_id)?;
        info!("Generating test for loop {}", loop_id);

        let response = self.api.generate_test(loop_id).await;

        Ok(self.settle(&GENERATE_TEST, epoch, response, |state, generated| {
            state.exam = Some(Exam::from(generated));
            Stage::Testing
        }))
    }

    /// Submit answers for diagnosis.
    ///
    /// Answers are forwarded as given; completeness is the caller's concern.
    /// Requires `Testing`. Settles in `Finished`, rolls back to `Testing`.
    pub async fn submit_test(&self, answers: Vec<Answer>) -> Result<Outcome> {
        let (epoch, loop_id) = self.begin(&SUBMIT_TEST, |state| state.loop_id)?;
        info!("Submitting {} answers for loop {}", answers.len(), loop_id);

        let request = SubmitTestRequest { answers };
        let response = self.api.submit_test(loop_id, &request).await;

        Ok(self.settle(&SUBMIT_TEST, epoch, response, |state, diagnosed| {
            state.result = Some(ExamResult::from(diagnosed));
            Stage::Finished
        }))
    }

    /// Abandon the current loop and return to `Idle`.
    ///
    /// Never fails and never contacts the remote system. Responses still in
    /// flight will be discarded.
    pub fn reset(&self) {
        let event = {
            let mut state = self.write();
            let from = state.stage;
            let epoch = state.epoch + 1;
            if let Some(loop_id) = state.loop_id {
                info!("Abandoning loop {} at stage {}", loop_id, from);
            }
            *state = LoopState::initial(epoch);
            StageEvent {
                epoch,
                from,
                to: Stage::Idle,
            }
        };
        self.events.publish(event);
    }

    /// Gate on the required stage and advance to the in-flight stage.
    ///
    /// `key` extracts what the request needs from the gated state; `None`
    /// rejects the call. Returns the epoch the operation runs in.
    fn begin<K>(&self, step: &Step, key: impl FnOnce(&LoopState) -> Option<K>) -> Result<(u64, K)> {
        let (epoch, key, event) = {
            let mut state = self.write();
            let key = if state.stage == step.required { key(&*state) } else { None };
            let Some(key) = key else {
                debug!("Rejected {} in stage {}", step.name, state.stage);
                return Err(LoopError::InvalidStage {
                    operation: step.name,
                    stage: state.stage,
                });
            };
            state.stage = step.in_flight;
            state.error = None;
            let event = StageEvent {
                epoch: state.epoch,
                from: step.required,
                to: step.in_flight,
            };
            (state.epoch, key, event)
        };
        self.events.publish(event);
        Ok((epoch, key))
    }

    /// Commit a response, or roll back on failure, unless the loop was reset meanwhile
    fn settle<T>(
        &self,
        step: &Step,
        epoch: u64,
        response: std::result::Result<T, ApiError>,
        apply: impl FnOnce(&mut LoopState, T) -> Stage,
    ) -> Outcome {
        let (outcome, event) = {
            let mut state = self.write();
            if state.epoch != epoch {
                warn!(
                    "Discarding {} response from epoch {}, loop was reset (now epoch {})",
                    step.name, epoch, state.epoch
                );
                return Outcome::Discarded;
            }

            match response {
                Ok(value) => {
                    let to = apply(&mut *state, value);
                    state.stage = to;
                    info!("{} settled in {}", step.name, to);
                    (Outcome::Settled(to), StageEvent {
                        epoch,
                        from: step.in_flight,
                        to,
                    })
                }
                Err(e) => {
                    let message = format!("{}: {}", step.failure, e);
                    warn!("{}", message);
                    state.stage = step.required;
                    state.error = Some(message.clone());
                    (
                        Outcome::RolledBack {
                            stage: step.required,
                            error: message,
                        },
                        StageEvent {
                            epoch,
                            from: step.in_flight,
                            to: step.required,
                        },
                    )
                }
            }
        };
        self.events.publish(event);
        outcome
    }
}

impl<A: LoopApi> std::fmt::Debug for LoopOrchestrator<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("LoopOrchestrator")
            .field("stage", &state.stage)
            .field("loop_id", &state.loop_id)
            .field("epoch", &state.epoch)
            .finish()
    }
}
