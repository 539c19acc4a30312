use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("invalid url `{input}`: {reason}")]
    InvalidUrl { input: String, reason: &'static str },
}

impl UrlError {
    fn invalid(input: &str, reason: &'static str) -> Self {
        UrlError::InvalidUrl { input: input.to_string(), reason }
    }
}

/// Absolute http(s) URL split into scheme, host, port, path and query.
///
/// This is deliberately not a WHATWG parser. The host ends at the first `/`
/// or `?` after the scheme, and anything after the first colon in the host
/// is read as a numeric port, so bracketed IPv6 literals are rejected.
/// All accessors are slices of the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Url {
    raw: String,
    scheme_end: usize,
    host_end: usize,
    port: Option<u16>,
    path_start: Option<usize>,
    query_start: Option<usize>,
}

impl Url {
    pub fn parse(input: &str) -> Result<Url, UrlError> {
        let scheme_end = if input.starts_with("http://") {
            "http://".len()
        } else if input.starts_with("https://") {
            "https://".len()
        } else {
            return Err(UrlError::invalid(input, "scheme must be http:// or https://"));
        };

        let first_slash = input[scheme_end..].find('/').map(|i| i + scheme_end);
        let first_qmark = input[scheme_end..].find('?').map(|i| i + scheme_end);

        let authority_end = match (first_slash, first_qmark) {
            (Some(s), Some(q)) => s.min(q),
            (Some(s), None) => s,
            (None, Some(q)) => q,
            (None, None) => input.len(),
        };

        let authority = &input[scheme_end..authority_end];
        let (host_end, port) = match authority.find(':') {
            Some(colon) => {
                let port = authority[colon + 1..]
                    .parse::<u16>()
                    .map_err(|_| UrlError::invalid(input, "port is not a number"))?;
                (scheme_end + colon, Some(port))
            }
            None => (authority_end, None),
        };

        // A slash inside the query is not a path delimiter.
        let (path_start, query_start) = match (first_slash, first_qmark) {
            (Some(s), Some(q)) if q < s => (None, Some(q)),
            (Some(s), q) => (Some(s), q),
            (None, q) => (None, q),
        };

        Ok(Url {
            raw: input.to_string(),
            scheme_end,
            host_end,
            port,
            path_start,
            query_start,
        })
    }

    /// Joins `path` onto this URL with exactly one `/` and re-parses the result.
    pub fn append(&self, path: &str) -> Result<Url, UrlError> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let base = self.raw.strip_suffix('/').unwrap_or(&self.raw);
        Url::parse(&format!("{}/{}", base, path))
    }

    /// Scheme including the `://` separator, e.g. `"https://"`.
    pub fn scheme(&self) -> &str {
        &self.raw[..self.scheme_end]
    }

    pub fn host(&self) -> &str {
        &self.raw[self.scheme_end..self.host_end]
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> Option<&str> {
        let start = self.path_start?;
        match self.query_start {
            Some(q) => Some(&self.raw[start..q]),
            None => Some(&self.raw[start..]),
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query_start.map(|q| &self.raw[q..])
    }

    /// Everything after the authority: path and query, or `""` when neither exists.
    pub fn resource(&self) -> &str {
        match self.path_start.or(self.query_start) {
            Some(start) => &self.raw[start..],
            None => "",
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Url {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<Url> for String {
    fn from(url: Url) -> Self {
        url.raw
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
