use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Method is the object operation a presigned URL grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// Retrieve the object (`GET`, GetObject).
    Get,
    /// Inspect object metadata (`HEAD`, HeadObject).
    Head,
    /// Write the object (`PUT`, PutObject).
    Put,
    /// Delete the object (`DELETE`, DeleteObject).
    Delete,
}

/// Verb tokens accepted on input, matched exactly and case-sensitively.
const METHODS: [(&str, Method); 4] = [
    ("GET", Method::Get),
    ("HEAD", Method::Head),
    ("PUT", Method::Put),
    ("DELETE", Method::Delete),
];

impl Method {
    /// Resolve a verb token into a method.
    pub fn from_token(token: &str) -> Result<Self> {
        METHODS
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, m)| *m)
            .ok_or_else(|| Error::method_unsupported(token))
    }

    /// The verb token for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Name of the object-store operation this method is presigned for.
    pub fn operation(&self) -> &'static str {
        match self {
            Method::Get => "GetObject",
            Method::Head => "HeadObject",
            Method::Put => "PutObject",
            Method::Delete => "DeleteObject",
        }
    }

    /// The HTTP method a bearer must use with the signed URL.
    pub fn as_http(&self) -> http::Method {
        match self {
            Method::Get => http::Method::GET,
            Method::Head => http::Method::HEAD,
            Method::Put => http::Method::PUT,
            Method::Delete => http::Method::DELETE,
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token(s)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use test_case::test_case;

    #[test_case("GET", Method::Get, "GetObject")]
    #[test_case("HEAD", Method::Head, "HeadObject")]
    #[test_case("PUT", Method::Put, "PutObject")]
    #[test_case("DELETE", Method::Delete, "DeleteObject")]
    fn test_from_token(token: &str, expected: Method, operation: &str) {
        let method = Method::from_token(token).expect("must be supported");
        assert_eq!(method, expected);
        assert_eq!(method.as_str(), token);
        assert_eq!(method.as_http().as_str(), token);
        assert_eq!(method.operation(), operation);
    }

    #[test_case("get"; "lowercase")]
    #[test_case("Get"; "mixed case")]
    #[test_case("POST"; "post")]
    #[test_case("PATCH"; "patch")]
    #[test_case(" GET"; "leading space")]
    #[test_case(""; "empty")]
    fn test_from_token_unsupported(token: &str) {
        let err = token.parse::<Method>().expect_err("must be unsupported");
        assert_eq!(err.kind(), ErrorKind::MethodUnsupported);
        assert_eq!(err.to_string(), format!("unsupported method: {token}"));
    }
}
