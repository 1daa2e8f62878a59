use axum::http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

// header carrying the session id returned by login
pub(crate) const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) store: RepositoryStore,
}

impl AppState {
    pub fn new(branch: &str, store: RepositoryStore) -> AppState {
        AppState {
            config: Configuration::new(branch),
            store,
        }
    }

    pub fn from_env() -> AppState {
        let store = RepositoryStore::from_env();
        let branch = if store == RepositoryStore::DynamoDB { "prod" } else { "dev" };
        AppState {
            config: Configuration::from_env(branch),
            store,
        }
    }
}

// Outside of AWS the lambda runtime needs these to start; see
// https://docs.aws.amazon.com/lambda/latest/dg/images-test.html
pub(crate) fn configure_dev_runtime(state: &AppState) {
    if state.store == RepositoryStore::DynamoDB {
        return;
    }
    for (name, value) in [
        ("AWS_LAMBDA_FUNCTION_NAME", "_"),
        ("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096"),
        ("AWS_LAMBDA_FUNCTION_VERSION", "1"),
        ("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt"),
    ] {
        if std::env::var(name).is_err() {
            std::env::set_var(name, value);
        }
    }
}

pub(crate) type ServerError = (StatusCode, String);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, format!("{}", err))
}

pub(crate) fn session_id(headers: &HeaderMap) -> Result<String, ServerError> {
    headers.get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or((StatusCode::UNAUTHORIZED, format!("missing {} header", SESSION_HEADER)))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Access { reason_code: Some(ref code), .. } if code == "401" => {
                (StatusCode::UNAUTHORIZED, format!("{:?}", err))
            }
            CommandError::Access { .. } => {
                (StatusCode::FORBIDDEN, format!("{:?}", err))
            }
            CommandError::Database { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", err))
            }
            CommandError::DuplicateKey { .. } => {
                (StatusCode::CONFLICT, format!("{:?}", err))
            }
            CommandError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, format!("{:?}", err))
            }
            CommandError::Runtime { retryable: true, .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, format!("{:?}", err))
            }
            CommandError::Runtime { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", err))
            }
            CommandError::Serialization { .. } => {
                (StatusCode::BAD_REQUEST, format!("{:?}", err))
            }
            CommandError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, format!("{:?}", err))
            }
            CommandError::Other { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", err))
            }
        }
    }
}
