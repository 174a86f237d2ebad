//! `TfError` pairs an internal error with the description a caller of the API is allowed to see.
//! The internal half is logged, the external half becomes the response body.

pub mod externalerror;
mod integrations;

pub use externalerror::{Cause, ExternalError};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub struct TfError {
    /// The underlying error. May mention tables, DSNs or upstream hosts, so it is never sent to
    /// clients.
    pub internal: anyhow::Error,
    /// What the client is told.
    pub external: ExternalError,
}

impl TfError {
    pub fn new(internal: impl Into<anyhow::Error>, external: ExternalError) -> Self {
        Self {
            internal: internal.into(),
            external,
        }
    }

    /// The requested post or user doesn't exist.
    pub fn not_found(internal: anyhow::Error, text: &'static str) -> Self {
        Self::new(
            internal,
            ExternalError {
                cause: Cause::NotFound,
                text,
            },
        )
    }

    /// Drop the external description, e.g. when the error is reported by the CLI instead of
    /// an HTTP response.
    pub fn into_internal(self) -> anyhow::Error {
        self.internal.context(self.external.text)
    }
}

/// Only the external half is displayed.
impl Display for TfError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        write!(f, "{}", self.external)
    }
}

/// Errors converted with `?` are reported as a plain "Internal server error". Use `describe_err`
/// to say which operation failed.
impl<Internal: Into<anyhow::Error>> From<Internal> for TfError {
    fn from(internal: Internal) -> TfError {
        TfError::new(internal, ExternalError::default())
    }
}

pub type Fallible<T> = Result<T, TfError>;

pub trait DescribeErr<T> {
    /// Keep the error for the logs and tell the client `external` instead.
    fn describe_err(self, external: ExternalError) -> Fallible<T>;
}

impl<T, E: Into<anyhow::Error>> DescribeErr<T> for Result<T, E> {
    fn describe_err(self, external: ExternalError) -> Fallible<T> {
        self.map_err(|e| TfError::new(e, external))
    }
}

pub trait OrNotFound<T> {
    /// `None` becomes a 404 saying `text`; `detail` only reaches the logs.
    fn or_not_found(self, text: &'static str, detail: impl FnOnce() -> String) -> Fallible<T>;
}

impl<T> OrNotFound<T> for Option<T> {
    fn or_not_found(self, text: &'static str, detail: impl FnOnce() -> String) -> Fallible<T> {
        self.ok_or_else(|| TfError::not_found(anyhow::Error::msg(detail()), text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_only_external_part_is_shown() {
        let err = Err::<(), _>(anyhow!("relation \"posts\" does not exist"))
            .describe_err(ExternalError {
                cause: Cause::ServerError,
                text: "Failed to fetch posts",
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "ServerError: Failed to fetch posts");
        assert!(format!("{:#}", err.internal).contains("does not exist"));
    }

    #[test]
    fn test_question_mark_hides_detail() {
        fn parse(s: &str) -> Fallible<i32> {
            Ok(s.parse::<i32>()?)
        }
        let err = parse("seven").unwrap_err();
        assert_eq!(err.external.cause, Cause::ServerError);
        assert_eq!(err.to_string(), "ServerError: Internal server error");
    }

    #[test]
    fn test_or_not_found() {
        assert_eq!(Some(3).or_not_found("User not found", String::new).unwrap(), 3);
        let err = None::<i32>
            .or_not_found("User not found", || "no user with id 9".to_owned())
            .unwrap_err();
        assert_eq!(err.external.cause, Cause::NotFound);
        assert_eq!(err.to_string(), "NotFound: User not found");
        assert_eq!(err.internal.to_string(), "no user with id 9");
    }

    #[test]
    fn test_not_found_keeps_internal_detail() {
        let err = TfError::not_found(anyhow!("no post with id 7"), "Post not found");
        assert_eq!(err.to_string(), "NotFound: Post not found");
        let internal = format!("{:#}", err.into_internal());
        assert!(internal.contains("no post with id 7"));
        assert!(internal.starts_with("Post not found"));
    }
}
