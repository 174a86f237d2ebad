use actix_web::http::StatusCode;
use std::fmt;

/// The part of an error that API clients get to see.
#[derive(Debug, Clone, Copy)]
pub struct ExternalError {
    pub cause: Cause,
    /// Human-readable text, shown verbatim in the error body.
    pub text: &'static str,
}

/// Coarse classification of what went wrong, from the client's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    ServerError,
    NotFound,
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        // Each variant displays as its name.
        write!(f, "{:?}", self)
    }
}

impl From<Cause> for StatusCode {
    /// The datastore reports causes, not status codes; the mapping only happens at the HTTP edge.
    fn from(cause: Cause) -> StatusCode {
        match cause {
            Cause::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Cause::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl fmt::Display for ExternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}: {}", self.cause, self.text)
    }
}

impl Default for ExternalError {
    fn default() -> Self {
        Self {
            cause: Cause::ServerError,
            text: "Internal server error",
        }
    }
}
