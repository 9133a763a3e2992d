use crate::constants::*;
use crate::Config;
use async_trait::async_trait;
use log::debug;
use percent_encoding::utf8_percent_encode;
use reqsign::aws::Credential;
use reqsign::Signer;
use s3presign_core::{Error, Method, ObjectReference, PresignObject, Result};
use std::time::Duration;
use url::{Host, Url};

/// AwsPresigner presigns s3 object requests with reqsign's SigV4 signer.
///
/// Credential discovery, clock handling and the signature itself are left
/// to the wrapped [`Signer`]. This type only decides which URL gets signed.
#[derive(Clone, Debug)]
pub struct AwsPresigner {
    endpoint: Url,
    force_path_style: bool,
    signer: Signer<Credential>,
}

impl AwsPresigner {
    /// Create a presigner using reqsign's default AWS credential chain.
    pub fn new(config: Config) -> Result<Self> {
        let signer = reqsign::aws::default_signer(S3_SERVICE, config.region());
        Self::with_signer(config, signer)
    }

    /// Create a presigner with a custom signer.
    ///
    /// The signer must be scoped to the `s3` service and the same region as `config`.
    pub fn with_signer(config: Config, signer: Signer<Credential>) -> Result<Self> {
        let endpoint = config.endpoint_url()?;
        debug!(
            "presigning against {endpoint} in {} (profile {}, path style {})",
            config.region(),
            config.profile(),
            config.force_path_style
        );

        Ok(Self {
            endpoint,
            force_path_style: config.force_path_style,
            signer,
        })
    }

    /// The unsigned URL addressing `reference`.
    pub fn object_url(&self, reference: &ObjectReference) -> String {
        let scheme = self.endpoint.scheme();
        let host = self.endpoint.host_str().unwrap_or_default();
        let port = self
            .endpoint
            .port()
            .map(|port| format!(":{port}"))
            .unwrap_or_default();
        let base = self.endpoint.path().trim_end_matches('/');
        let bucket = reference.bucket();
        let key = utf8_percent_encode(reference.key(), &AWS_URI_ENCODE_SET);

        if self.use_virtual_host(bucket) {
            format!("{scheme}://{bucket}.{host}{port}{base}/{key}")
        } else {
            let bucket = utf8_percent_encode(bucket, &AWS_URI_ENCODE_SET);
            format!("{scheme}://{host}{port}{base}/{bucket}/{key}")
        }
    }

    fn use_virtual_host(&self, bucket: &str) -> bool {
        !self.force_path_style
            && matches!(self.endpoint.host(), Some(Host::Domain(_)))
            && is_virtual_host_bucket(bucket)
    }
}

#[async_trait]
impl PresignObject for AwsPresigner {
    async fn presign_object(
        &self,
        reference: &ObjectReference,
        method: Method,
        expiry: Duration,
    ) -> Result<String> {
        if expiry > MAX_PRESIGN_EXPIRY {
            return Err(Error::expiry_invalid(format!(
                "expiry {}s exceeds the maximum of {}s",
                expiry.as_secs(),
                MAX_PRESIGN_EXPIRY.as_secs()
            )));
        }

        let url = self.object_url(reference);
        debug!("presigning {} {url}", method.operation());

        let (mut parts, ()) = http::Request::builder()
            .method(method.as_http())
            .uri(url.as_str())
            .body(())?
            .into_parts();

        self.signer
            .sign(&mut parts, Some(expiry))
            .await
            .map_err(|e| {
                Error::signing_failed(format!("failed to sign {} request", method.operation()))
                    .with_source(e)
            })?;

        Ok(parts.uri.to_string())
    }
}

/// Check if bucket can be used as a DNS label in front of the endpoint host.
fn is_virtual_host_bucket(bucket: &str) -> bool {
    let bytes = bucket.as_bytes();
    (3..=63).contains(&bytes.len())
        && bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
        && bytes[0].is_ascii_alphanumeric()
        && bytes[bytes.len() - 1].is_ascii_alphanumeric()
}
