use crate::{ObjectReference, PresignObject, Result, SignRequest};
use log::debug;
use std::sync::Arc;
use std::time::Duration;

/// Presigner turns an object reference, a verb and an expiry into a signed URL.
///
/// It validates the request locally and hands it to its [`PresignObject`]
/// exactly once. Errors from the signer are returned untouched.
#[derive(Clone, Debug)]
pub struct Presigner {
    signer: Arc<dyn PresignObject>,
}

impl Presigner {
    /// Create a new presigner backed by the given signer.
    pub fn new(signer: impl PresignObject) -> Self {
        Self {
            signer: Arc::new(signer),
        }
    }

    /// Presign `reference` for the verb `method` (`GET`, `HEAD`, `PUT` or `DELETE`).
    ///
    /// An unsupported verb or a zero expiry fails before the signer is called.
    pub async fn presign(
        &self,
        reference: &ObjectReference,
        method: &str,
        expiry: Duration,
    ) -> Result<String> {
        let req = SignRequest::from_token(reference, method, expiry)?;
        self.presign_request(req).await
    }

    /// Presign an already validated request.
    pub async fn presign_request(&self, req: SignRequest<'_>) -> Result<String> {
        let reference = req.reference();
        debug!(
            "presigning {} for bucket {} key {} expiring in {:?}",
            req.method().operation(),
            reference.bucket(),
            reference.key(),
            req.expiry()
        );

        self.signer
            .presign_object(reference, req.method(), req.expiry())
            .await
    }
}
