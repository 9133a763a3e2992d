use crate::{Error, Method, ObjectReference, Result};
use std::time::Duration;

/// Expiry applied when the caller does not choose one.
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(5 * 60);

/// SignRequest is a single presign request: what to sign, for which method, for how long.
///
/// Constructing one validates the method token and the expiry, so a
/// `SignRequest` that exists is always fit to hand to a signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignRequest<'a> {
    reference: &'a ObjectReference,
    method: Method,
    expiry: Duration,
}

impl<'a> SignRequest<'a> {
    /// Build a sign request from an already resolved method.
    pub fn new(reference: &'a ObjectReference, method: Method, expiry: Duration) -> Result<Self> {
        if expiry.is_zero() {
            return Err(Error::expiry_invalid("expiry must be greater than zero"));
        }

        Ok(Self {
            reference,
            method,
            expiry,
        })
    }

    /// Build a sign request from a free-text verb token such as `GET`.
    pub fn from_token(reference: &'a ObjectReference, token: &str, expiry: Duration) -> Result<Self> {
        Self::new(reference, Method::from_token(token)?, expiry)
    }

    /// The object to sign for.
    pub fn reference(&self) -> &'a ObjectReference {
        self.reference
    }

    /// The method the signed URL grants.
    pub fn method(&self) -> Method {
        self.method
    }

    /// How long the signed URL stays valid.
    pub fn expiry(&self) -> Duration {
        self.expiry
    }
}
