//! Error types.
//!
//! Parsing a URL never fails: components that cannot be interpreted are left
//! absent. The errors below only come from typed query conversions, from
//! converting into [`http::Uri`], and from the redirect collaborator.

/// An error produced by typed conversions of a URL or its query.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The value could not be serialized as a flat list of query parameters.
    ///
    /// Only maps, structs and sequences of pairs can become parameters.
    #[error("invalid query parameters: {0}")]
    InvalidParameters(#[from] serde_urlencoded::ser::Error),

    /// The query could not be deserialized into the requested type.
    #[error("deserialize query: {0}")]
    DeserializeQuery(#[from] serde_urlencoded::de::Error),

    /// The built URL is not accepted by [`http::Uri`].
    #[error("invalid uri: {0}")]
    InvalidUri(#[from] http::uri::InvalidUri),
}

/// A precondition of [`Redirect`](crate::Redirect) was not met.
#[derive(Debug, thiserror::Error)]
pub enum RedirectError {
    /// The redirect target is empty.
    #[error("unable to redirect to an empty url")]
    EmptyUrl,

    /// The response has already been committed.
    #[error("unable to redirect to `{0}`, the headers have already been sent")]
    HeadersSent(String),

    /// The redirect target cannot be used as a `Location` header value.
    #[error("invalid location `{location}`: {source}")]
    InvalidLocation {
        /// The rejected target.
        location: String,
        /// The header value error.
        source: http::header::InvalidHeaderValue,
    },
}

/// A specialized Result type for this crate.
pub type Result<T, E = Error> = ::std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_error_messages() {
        assert_eq!(
            RedirectError::EmptyUrl.to_string(),
            "unable to redirect to an empty url"
        );
        assert_eq!(
            RedirectError::HeadersSent("/login".to_string()).to_string(),
            "unable to redirect to `/login`, the headers have already been sent"
        );
    }

    #[test]
    fn invalid_parameters_from_serializer() {
        let err: Error = serde_urlencoded::to_string(1u8).unwrap_err().into();
        assert!(matches!(err, Error::InvalidParameters(_)));
        assert!(err.to_string().starts_with("invalid query parameters"));
    }
}
