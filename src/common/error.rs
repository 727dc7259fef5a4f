use thiserror::Error;

/// Rejected search configuration. Raised when the search is constructed, never mid-run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("ant_count must be at least 1")]
    ZeroAnts,

    #[error("max_steps must be at least 1")]
    ZeroSteps,

    #[error("max_iterations must be at least 1")]
    ZeroIterations,

    #[error("{field} must lie in [0, 1], got {value}")]
    RateOutOfRange { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    NegativeIncrement { field: &'static str, value: f32 },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("debug interval {field} must be at least 1")]
    ZeroDebugInterval { field: &'static str },
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Graph integrity error: vertex {vertex} has no usable out-edge at the start of the path")]
    GraphIntegrity { vertex: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown node: {node}")]
    UnknownNode { node: String },
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Search task failed: {0}")]
    Task(String),
}

pub type SearchResult<T> = Result<T, SearchError>;
pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
