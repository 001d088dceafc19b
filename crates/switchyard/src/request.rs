//! The request a router run resolves.

use switchyard_match::Method;

use crate::error::{Result, RouterError};

/// Method and path of the request being routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// HTTP method.
    pub method: Method,
    /// Request path, without query string or fragment.
    pub path: String,
}

impl RequestContext {
    /// Creates a context from a method and a path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// Creates a GET context.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a POST context.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Builds a context from raw request-line parts.
    ///
    /// The method token is case-insensitive. The query string and fragment
    /// of `uri` are discarded, and an absolute URI is reduced to its path.
    ///
    /// ```
    /// use switchyard::{Method, RequestContext};
    ///
    /// let ctx = RequestContext::parse("get", "/users/42?expand=posts#top").unwrap();
    /// assert_eq!(ctx, RequestContext::new(Method::Get, "/users/42"));
    ///
    /// let ctx = RequestContext::parse("POST", "https://example.com/login").unwrap();
    /// assert_eq!(ctx.path, "/login");
    /// ```
    pub fn parse(method: &str, uri: &str) -> Result<Self> {
        let method = method
            .parse::<Method>()
            .map_err(|e| RouterError::InvalidArgument(e.to_string()))?;
        Ok(Self::new(method, uri_path(uri)))
    }
}

/// Extracts the path component of a request URI.
fn uri_path(uri: &str) -> &str {
    let end = uri.find(['?', '#']).unwrap_or(uri.len());
    let uri = &uri[..end];

    // Only `scheme://authority` before the first `/` makes the URI absolute.
    let absolute = uri
        .find("://")
        .filter(|&i| !uri[..i].is_empty() && !uri[..i].contains('/'));
    let path = match absolute {
        Some(scheme_end) => {
            let authority = &uri[scheme_end + 3..];
            authority.find('/').map_or("", |i| &authority[i..])
        }
        None => uri,
    };

    if path.is_empty() {
        "/"
    } else {
        path
    }
}
