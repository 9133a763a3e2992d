use crate::{Error, Result};
use log::debug;
use percent_encoding::percent_decode_str;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// URL scheme naming the object store explicitly: `s3://bucket/key`.
pub const OBJECT_STORE_SCHEME: &str = "s3";

/// Host prefix marking a legacy endpoint URL: `https://s3-<region>.../bucket/key`.
pub const LEGACY_HOST_PREFIX: &str = "s3-";

/// A single notation an object-store URL may be written in.
///
/// Returns `None` when the URL is not in this notation (or is in it but
/// does not carry a usable bucket and key).
type Notation = fn(&Url, &str) -> Option<ObjectReference>;

/// Notations tried in order, first match wins.
const NOTATIONS: &[Notation] = &[scheme_notation, legacy_host_notation];

/// ObjectReference identifies a single object by bucket and key.
///
/// Both parts are fully resolved: `key` is already percent-decoded and has no
/// leading separator taken from a URL path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectReference {
    bucket: String,
    key: String,
}

impl ObjectReference {
    /// Build a reference from explicit bucket and key, used verbatim.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Resolve an object-store URL into a reference.
    ///
    /// Accepted notations:
    ///
    /// - `s3://<bucket>/<key>`: host is the bucket, path (minus one leading `/`) is the key.
    /// - `<scheme>://s3-<anything>/<bucket>/<key>`: the path is split on its first
    ///   separator into bucket and key, both of which must be non-empty.
    ///
    /// The path is percent-decoded but otherwise kept as written: `.` and `..`
    /// segments stay part of the key. Input with control characters is rejected.
    ///
    /// Everything else fails with [`ErrorKind::ReferenceInvalid`](crate::ErrorKind::ReferenceInvalid).
    pub fn parse(input: &str) -> Result<Self> {
        if input.chars().any(|c| c.is_ascii_control()) {
            return Err(Error::reference_invalid(input));
        }
        let url = Url::parse(input)
            .map_err(|e| Error::reference_invalid(input).with_source(anyhow::Error::new(e)))?;
        // `Url::path` is normalized (dot segments, `\`), so the key is read from the input as written.
        let raw = raw_path(input).ok_or_else(|| Error::reference_invalid(input))?;
        let path = percent_decode_str(raw)
            .decode_utf8()
            .map_err(|e| Error::reference_invalid(input).with_source(anyhow::Error::new(e)))?;

        debug!(
            "resolving {input}: scheme={}, host={:?}, path={path}",
            url.scheme(),
            url.host_str()
        );

        NOTATIONS
            .iter()
            .find_map(|notation| notation(&url, &path))
            .ok_or_else(|| Error::reference_invalid(input))
    }

    /// Bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Object key, may be empty and may contain `/`.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl FromStr for ObjectReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{OBJECT_STORE_SCHEME}://{}/{}", self.bucket, self.key)
    }
}

/// The path of `input` as written: after the authority, before any query or fragment.
fn raw_path(input: &str) -> Option<&str> {
    let (_, rest) = input.split_once("://")?;
    let rest = &rest[rest.find(['/', '?', '#']).unwrap_or(rest.len())..];
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

fn scheme_notation(url: &Url, path: &str) -> Option<ObjectReference> {
    if url.scheme() != OBJECT_STORE_SCHEME {
        return None;
    }
    let bucket = url.host_str().filter(|host| !host.is_empty())?;
    let key = path.strip_prefix('/').unwrap_or(path);

    Some(ObjectReference::new(bucket, key))
}

fn legacy_host_notation(url: &Url, path: &str) -> Option<ObjectReference> {
    if !url.host_str()?.starts_with(LEGACY_HOST_PREFIX) {
        return None;
    }
    let path = path.strip_prefix('/').unwrap_or(path);
    let (bucket, key) = path.split_once('/')?;
    if bucket.is_empty() || key.is_empty() {
        debug!("legacy path {path} does not split into bucket and key");
        return None;
    }

    Some(ObjectReference::new(bucket, key))
}
