// Error types for the HTTP layer and the command layer.

use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the actions service.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized, you have to log in first!")]
    Unauthenticated,

    #[error("Request to actions storage failed with error '{message}'")]
    BadRequest { message: String },

    #[error("Request to actions storage failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Request to actions storage failed with error {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from actions storage: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base url: {0}")]
    InvalidUrl(String),
}

/// Errors surfaced to the user by `main`.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    NotFound(String),

    #[error("config: {0}")]
    Config(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type CliResult<T> = Result<T, CliError>;

/// Exit codes, BSD sysexits.h compatible.
pub mod exitcode {
    pub const USAGE: i32 = 64;
    pub const DATAERR: i32 = 65;
    pub const NOINPUT: i32 = 66;
    pub const UNAVAILABLE: i32 = 69;
    pub const SOFTWARE: i32 = 70;
    pub const IOERR: i32 = 74;
    pub const NOPERM: i32 = 77;
    pub const CONFIG: i32 = 78;
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => exitcode::USAGE,
            CliError::NotFound(_) => exitcode::NOINPUT,
            CliError::Config(_) => exitcode::CONFIG,
            CliError::Io(_) => exitcode::IOERR,
            CliError::Other(_) => exitcode::SOFTWARE,
            CliError::Api(e) => match e {
                ApiError::Unauthenticated => exitcode::NOPERM,
                ApiError::BadRequest { .. } | ApiError::Decode(_) => exitcode::DATAERR,
                ApiError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN => {
                    exitcode::NOPERM
                }
                ApiError::Status { .. } | ApiError::Transport(_) => exitcode::UNAVAILABLE,
                ApiError::InvalidUrl(_) => exitcode::CONFIG,
            },
        }
    }
}
