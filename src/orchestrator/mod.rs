//! Loop orchestration
//!
//! `LoopOrchestrator` is the single writer of a loop's state. Presentation
//! layers read `LoopState` snapshots, subscribe to `StageEvent`s and call the
//! four operations.

pub mod events;
pub mod loop_orchestrator;
pub mod state;

pub use events::{EventBus, StageEvent};
pub use loop_orchestrator::LoopOrchestrator;
pub use state::{LoopState, StagePayload};
