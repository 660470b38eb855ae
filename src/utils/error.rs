use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GsdError {
    #[error("Domain store not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("No hosts file found at {}", path.display())]
    MissingHostsFile { path: PathBuf },

    #[error("Work mode already set in {}", path.display())]
    AlreadyActive { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    PermissionDenied { message: String },

    #[error("{message}")]
    InvalidArgument {
        kind: ArgumentErrorKind,
        message: String,
    },

    #[error("DNS cache refresh failed ({command}): {reason}")]
    RefreshFailed { command: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentErrorKind {
    MissingMode,
    MissingDomain,
    UnknownMode,
    InvalidValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Environment is unfit to run at all (privilege).
    Precondition,
    /// A required argument was not given or is malformed.
    Usage,
    UnknownMode,
    /// Anything that failed while carrying out a mode.
    Operation,
}

impl GsdError {
    pub fn missing_domain(mode: &str) -> Self {
        GsdError::InvalidArgument {
            kind: ArgumentErrorKind::MissingDomain,
            message: format!("Please provide a domain to {}", mode),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GsdError::PermissionDenied { .. } => ErrorCategory::Precondition,
            GsdError::InvalidArgument {
                kind: ArgumentErrorKind::UnknownMode,
                ..
            } => ErrorCategory::UnknownMode,
            GsdError::InvalidArgument { .. } => ErrorCategory::Usage,
            _ => ErrorCategory::Operation,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Operation => 1,
            ErrorCategory::Precondition => 2,
            ErrorCategory::Usage => 3,
            ErrorCategory::UnknownMode => 4,
        }
    }

    /// One-line message shown on stderr.
    pub fn user_friendly_message(&self) -> String {
        match self {
            GsdError::NotFound { path } => format!(
                "Domain store {} does not exist; run any mode once to create it",
                path.display()
            ),
            GsdError::MissingHostsFile { .. } => "No hosts file found".to_string(),
            GsdError::AlreadyActive { .. } => "Work mode already set".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GsdError>;
