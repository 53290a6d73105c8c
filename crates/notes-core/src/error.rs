use crate::id::ToolId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    /// A tool with this id is already registered; the new one was rejected.
    #[error("Tool {0} already exists")]
    DuplicateTool(ToolId),

    #[error("invalid canvas config: {0}")]
    InvalidConfig(String),
}
