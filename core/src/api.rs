use crate::{Method, ObjectReference, Result};
use std::fmt::Debug;
use std::time::Duration;

/// PresignObject is the signing collaborator used by [`Presigner`](crate::Presigner).
///
/// Implementations own everything about producing the signature: credential
/// discovery, endpoint selection, clock handling and the signing algorithm.
/// The returned string is an absolute URL and is passed to the caller as-is.
#[async_trait::async_trait]
pub trait PresignObject: Debug + Send + Sync + 'static {
    /// Produce a signed URL granting `method` on `reference` for `expiry`.
    ///
    /// Any failure must be reported as an error; callers never retry.
    async fn presign_object(
        &self,
        reference: &ObjectReference,
        method: Method,
        expiry: Duration,
    ) -> Result<String>;
}
