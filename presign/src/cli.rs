use std::time::Duration;

use clap::Parser;
use s3presign_aws::Config;
use s3presign_core::{ObjectReference, Result};

/// Units accepted in a duration, with their length in nanoseconds.
const DURATION_UNITS: [(&str, f64); 7] = [
    ("ns", 1.0),
    ("us", 1e3),
    ("µs", 1e3),
    ("ms", 1e6),
    ("s", 1e9),
    ("m", 60e9),
    ("h", 3600e9),
];

#[derive(Debug, Parser)]
#[command(name = "presign")]
#[command(bin_name = "presign")]
#[command(version)]
#[command(about = "Print a presigned URL for an s3 object", long_about = None)]
#[command(override_usage = "presign [OPTIONS] (<BUCKET> <KEY> | <OBJECT_URL>)")]
pub struct PresignCli {
    /// HTTP method the URL grants: GET, HEAD, PUT or DELETE
    #[arg(short, long, default_value = "GET")]
    pub method: String,

    /// How long the URL stays valid, e.g. 300s, 5m, 1h30m
    #[arg(short, long, default_value = "5m", value_parser = parse_duration)]
    pub expire: Duration,

    /// Region to sign for, instead of AWS_REGION or the profile's region
    #[arg(long)]
    pub region: Option<String>,

    /// S3-compatible endpoint to sign for
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Put the bucket in the URL path instead of the host
    #[arg(long)]
    pub path_style: bool,

    /// Profile to read the region from
    #[arg(long)]
    pub profile: Option<String>,

    /// An object URL (s3://bucket/key), or a bucket followed by a key
    ///
    /// Flags are only read before the first target, so a key may start with `-`.
    #[arg(value_name = "TARGET", trailing_var_arg = true)]
    pub targets: Vec<String>,
}

/// What the positional arguments name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// A single object-store URL.
    Url(&'a str),
    /// Explicit bucket and key.
    Explicit { bucket: &'a str, key: &'a str },
}

impl<'a> Target<'a> {
    /// Resolve into an object reference.
    pub fn resolve(self) -> Result<ObjectReference> {
        match self {
            Target::Url(url) => ObjectReference::parse(url),
            Target::Explicit { bucket, key } => Ok(ObjectReference::new(bucket, key)),
        }
    }
}

impl PresignCli {
    /// The target named by the positionals, `None` unless there are one or two.
    pub fn target(&self) -> Option<Target<'_>> {
        match self.targets.as_slice() {
            [url] => Some(Target::Url(url)),
            [bucket, key] => Some(Target::Explicit { bucket, key }),
            _ => None,
        }
    }

    /// Signer config from flags. Env and profile are layered on by the caller.
    pub fn config(&self) -> Config {
        Config {
            profile: self.profile.clone(),
            region: self.region.clone(),
            endpoint: self.endpoint_url.clone(),
            force_path_style: self.path_style,
            ..Default::default()
        }
    }
}

/// Parse a duration such as `300s`, `5m`, `1h30m` or `1.5s`.
///
/// Every number needs a unit, except a bare `0`.
pub fn parse_duration(input: &str) -> std::result::Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut rest = s;
    let mut nanos = 0f64;
    while !rest.is_empty() {
        let (number, tail) = rest.split_at(rest.find(|c: char| !is_number(c)).unwrap_or(rest.len()));
        let (unit, tail) = tail.split_at(tail.find(is_number).unwrap_or(tail.len()));

        let value: f64 = number
            .parse()
            .map_err(|_| format!("invalid duration {input}"))?;
        let scale = DURATION_UNITS
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| match unit {
                "" => format!("missing unit in duration {input}"),
                unit => format!("unknown unit {unit} in duration {input}"),
            })?;

        nanos += value * scale;
        rest = tail;
    }

    Duration::try_from_secs_f64(nanos / 1e9).map_err(|_| format!("invalid duration {input}"))
}
