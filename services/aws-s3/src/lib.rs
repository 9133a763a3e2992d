//! AWS S3 signing backend for s3presign.
//!
//! [`AwsPresigner`] implements [`s3presign_core::PresignObject`] on top of
//! reqsign's SigV4 [`Signer`](reqsign::Signer). It turns a bucket and key into
//! an s3 object URL and asks reqsign to presign it.
//!
//! ```no_run
//! use reqsign::OsEnv;
//! use s3presign_aws::{AwsPresigner, Config};
//! use s3presign_core::{ObjectReference, Presigner};
//! use std::time::Duration;
//!
//! # async fn example() -> s3presign_core::Result<()> {
//! let config = Config::default().from_env(&OsEnv).from_profile(&OsEnv)?;
//! let presigner = Presigner::new(AwsPresigner::new(config)?);
//!
//! let reference = ObjectReference::new("mybucket", "path/to/file.txt");
//! let url = presigner
//!     .presign(&reference, "GET", Duration::from_secs(300))
//!     .await?;
//! println!("{url}");
//! # Ok(())
//! # }
//! ```

mod config;
pub use config::Config;

mod presign;
pub use presign::AwsPresigner;

mod constants;
pub use constants::{DEFAULT_REGION, MAX_PRESIGN_EXPIRY};
