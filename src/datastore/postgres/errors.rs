use crate::twoface::{DescribeErr, ExternalError, Fallible, TfError};
use actix_web::error::BlockingError;
use anyhow::anyhow;

/// Extracts errors from `web::block`.
pub trait BlockingResp<T> {
    /// Convert the return from a web::block into a `Fallible<T>`, describing failures with
    /// `external`.
    fn to_resp(self, external: ExternalError) -> Fallible<T>;
}

impl<T, I> BlockingResp<T> for Result<T, BlockingError<I>>
where
    I: std::fmt::Debug + Into<anyhow::Error>,
{
    fn to_resp(self, external: ExternalError) -> Fallible<T> {
        match self {
            Ok(t) => Ok(t),
            Err(BlockingError::Error(err)) => Err(err).describe_err(external),
            Err(BlockingError::Canceled) => {
                Err(TfError::new(anyhow!("DB operation cancelled"), external))
            }
        }
    }
}
