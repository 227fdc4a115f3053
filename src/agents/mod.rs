//! AI-powered extraction agents.
//!
//! Agents extract structured data from unstructured content (here,
//! photographed timecards) using a vision model behind the
//! `VisionBackend` trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::normalize::NormalizeError;

pub mod backend;
pub mod timecard_reader;

/// Errors that can occur during agent execution.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The extraction service could not be reached.
    #[error("extraction service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The extraction service answered with a non-success status.
    #[error("extraction service returned {status}: {body}")]
    ServiceError { status: u16, body: String },

    /// The service answered, but not with a parseable timecard list.
    #[error(transparent)]
    MalformedOutput(#[from] NormalizeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Core trait for all AI agents.
#[async_trait]
pub trait Agent {
    type Input;
    type Output;

    /// Agent identifier for logging and metrics.
    fn name(&self) -> &'static str;

    /// Execute the agent's task.
    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError>;
}
