//! Core components for presigning object-store URLs.
//!
//! This crate provides the provider-neutral half of s3presign: turning user
//! input into an object reference, and turning that reference into a signed
//! URL through a pluggable signer.
//!
//! ## Overview
//!
//! - **ObjectReference**: a resolved (bucket, key) pair, built verbatim or parsed from a URL
//! - **Method**: the closed set of operations a signed URL can grant
//! - **SignRequest**: a validated (reference, method, expiry) triple
//! - **PresignObject**: the narrow interface a signing backend implements
//! - **Presigner**: the orchestrator that validates input and delegates to the backend
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use s3presign_core::{Method, ObjectReference, PresignObject, Presigner, Result};
//! use std::time::Duration;
//!
//! #[derive(Debug)]
//! struct MySigner;
//!
//! #[async_trait]
//! impl PresignObject for MySigner {
//!     async fn presign_object(
//!         &self,
//!         reference: &ObjectReference,
//!         method: Method,
//!         expiry: Duration,
//!     ) -> Result<String> {
//!         // Hand the request to your signing backend here
//!         todo!()
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let presigner = Presigner::new(MySigner);
//! let reference = ObjectReference::parse("s3://mybucket/path/to/file.txt")?;
//! let url = presigner
//!     .presign(&reference, "GET", Duration::from_secs(300))
//!     .await?;
//! println!("{url}");
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod error;
pub use error::{Error, ErrorKind, Result};

mod reference;
pub use reference::{ObjectReference, LEGACY_HOST_PREFIX, OBJECT_STORE_SCHEME};

mod method;
pub use method::Method;

mod request;
pub use request::{SignRequest, DEFAULT_EXPIRY};

mod api;
pub use api::PresignObject;

mod presigner;
pub use presigner::Presigner;
