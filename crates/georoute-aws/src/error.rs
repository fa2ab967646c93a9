use aws_sdk_georoutes::config::http::HttpResponse;
use aws_sdk_georoutes::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Failure to obtain temporary credentials from the identity pool.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("malformed identity pool id {0:?}, expected \"<region>:<uuid>\"")]
    MalformedPoolId(String),

    #[error("identity service error (HTTP {status}) {code}: {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    #[error("identity request failed: {0}")]
    Transport(String),

    #[error("identity response missing {0}")]
    Missing(&'static str),
}

/// Failure anywhere on the route-calculation path.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("no credentials available: {0}")]
    Auth(#[from] AuthError),

    #[error("routes API error (HTTP {status}) {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("routes request failed: {0}")]
    Transport(String),
}

/// Status, error code and message of a modeled or unmodeled service error.
struct ServiceFailure {
    status: u16,
    code: String,
    message: String,
}

fn service_failure<E>(err: &SdkError<E, HttpResponse>) -> Option<ServiceFailure>
where
    E: ProvideErrorMetadata,
{
    match err {
        SdkError::ServiceError(context) => Some(ServiceFailure {
            status: context.raw().status().as_u16(),
            code: context.err().code().unwrap_or("Unknown").to_string(),
            message: context.err().message().unwrap_or_default().to_string(),
        }),
        _ => None,
    }
}

impl AuthError {
    pub(crate) fn from_sdk<E>(err: SdkError<E, HttpResponse>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
    {
        match service_failure(&err) {
            Some(failure) => Self::Service {
                status: failure.status,
                code: failure.code,
                message: failure.message,
            },
            None => Self::Transport(DisplayErrorContext(&err).to_string()),
        }
    }
}

impl RouteError {
    pub(crate) fn from_sdk<E>(err: SdkError<E, HttpResponse>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
    {
        match service_failure(&err) {
            Some(failure) => Self::Api {
                status: failure.status,
                code: failure.code,
                message: failure.message,
            },
            None => Self::Transport(DisplayErrorContext(&err).to_string()),
        }
    }
}
