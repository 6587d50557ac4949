use std::fmt::Display;

use http::{header, HeaderValue, Response, StatusCode};

use crate::error::RedirectError;

/// A redirect to a URL.
///
/// The URL is only turned into a `Location` header, sending the response is
/// up to the caller.
///
/// # Example
///
/// ```
/// use urlkit::{http::StatusCode, ImmutableUrl, Redirect};
///
/// let url = ImmutableUrl::parse("https://example.com/login")
///     .with_query_parameter("next", Some("/admin"));
/// let resp = Redirect::see_other(&url).into_response::<()>().unwrap();
/// assert_eq!(resp.status(), StatusCode::SEE_OTHER);
/// assert_eq!(
///     resp.headers()["location"],
///     "https://example.com/login?next=%2Fadmin"
/// );
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Redirect {
    status: StatusCode,
    location: String,
}

impl Redirect {
    /// A simple `302` redirect to a different location.
    pub fn found(uri: impl Display) -> Self {
        Self {
            status: StatusCode::FOUND,
            location: uri.to_string(),
        }
    }

    /// A simple `308` permanent redirect to a different location.
    pub fn permanent(uri: impl Display) -> Self {
        Self::found(uri).with_status(StatusCode::PERMANENT_REDIRECT)
    }

    /// A simple `301` permanent redirect to a different location.
    pub fn moved_permanent(uri: impl Display) -> Self {
        Self::found(uri).with_status(StatusCode::MOVED_PERMANENTLY)
    }

    /// A simple `303` redirect to a different location.
    pub fn see_other(uri: impl Display) -> Self {
        Self::found(uri).with_status(StatusCode::SEE_OTHER)
    }

    /// A simple `307` temporary redirect to a different location.
    pub fn temporary(uri: impl Display) -> Self {
        Self::found(uri).with_status(StatusCode::TEMPORARY_REDIRECT)
    }

    /// Specify the status code.
    #[must_use]
    pub fn with_status(self, status: StatusCode) -> Self {
        Self { status, ..self }
    }

    /// Returns the status code.
    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the redirect target.
    #[inline]
    pub fn location(&self) -> &str {
        &self.location
    }

    fn location_header(&self) -> Result<HeaderValue, RedirectError> {
        if self.location.is_empty() {
            return Err(RedirectError::EmptyUrl);
        }
        HeaderValue::from_str(&self.location).map_err(|source| RedirectError::InvalidLocation {
            location: self.location.clone(),
            source,
        })
    }

    /// Creates a response with the status code and the `Location` header.
    pub fn into_response<B: Default>(self) -> Result<Response<B>, RedirectError> {
        let location = self.location_header()?;
        let mut resp = Response::new(B::default());
        resp.redirect(self.status, location);
        Ok(resp)
    }

    /// Writes the redirect into a response that has not been sent yet.
    pub fn send<S: ResponseSink + ?Sized>(&self, sink: &mut S) -> Result<(), RedirectError> {
        let location = self.location_header()?;
        if sink.headers_sent() {
            return Err(RedirectError::HeadersSent(self.location.clone()));
        }
        tracing::debug!(status = %self.status, location = %self.location, "redirect");
        sink.redirect(self.status, location);
        Ok(())
    }
}

/// A response that can be turned into a redirect.
pub trait ResponseSink {
    /// Returns `true` once the status line and headers have been written.
    fn headers_sent(&self) -> bool;

    /// Sets the status code and replaces the `Location` header.
    fn redirect(&mut self, status: StatusCode, location: HeaderValue);
}

/// An in-memory response, its headers are never sent.
impl<B> ResponseSink for Response<B> {
    fn headers_sent(&self) -> bool {
        false
    }

    fn redirect(&mut self, status: StatusCode, location: HeaderValue) {
        *self.status_mut() = status;
        self.headers_mut().insert(header::LOCATION, location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Url;

    macro_rules! test_redirect {
        ($fn:ident, $status:ident) => {
            #[test]
            fn $fn() {
                let resp = Redirect::$fn("https://example.com/")
                    .into_response::<()>()
                    .unwrap();
                assert_eq!(resp.status(), StatusCode::$status);
                assert_eq!(
                    resp.headers()
                        .get(header::LOCATION)
                        .and_then(|value| value.to_str().ok()),
                    Some("https://example.com/")
                );
            }
        };
    }

    test_redirect!(found, FOUND);
    test_redirect!(permanent, PERMANENT_REDIRECT);
    test_redirect!(moved_permanent, MOVED_PERMANENTLY);
    test_redirect!(see_other, SEE_OTHER);
    test_redirect!(temporary, TEMPORARY_REDIRECT);

    #[derive(Default)]
    struct Committed {
        sent: bool,
        status: Option<StatusCode>,
    }

    impl ResponseSink for Committed {
        fn headers_sent(&self) -> bool {
            self.sent
        }

        fn redirect(&mut self, status: StatusCode, _location: HeaderValue) {
            self.status = Some(status);
        }
    }

    #[test]
    fn test_from_url() {
        let url = Url::parse("http://example.com:80/a?b=1#c");
        let redirect = Redirect::found(&url);
        assert_eq!(redirect.location(), "http://example.com/a?b=1#c");
        assert_eq!(redirect.status(), StatusCode::FOUND);
        assert_eq!(
            redirect.with_status(StatusCode::MULTIPLE_CHOICES).status(),
            StatusCode::MULTIPLE_CHOICES
        );
    }

    #[test]
    fn test_empty_url() {
        assert!(matches!(
            Redirect::found("").into_response::<()>(),
            Err(RedirectError::EmptyUrl)
        ));
        let mut sink = Committed::default();
        assert!(matches!(
            Redirect::found("").send(&mut sink),
            Err(RedirectError::EmptyUrl)
        ));
    }

    #[test]
    fn test_invalid_location() {
        assert!(matches!(
            Redirect::found("/a\nb").into_response::<()>(),
            Err(RedirectError::InvalidLocation { .. })
        ));
    }

    #[test]
    fn test_headers_sent() {
        let mut sink = Committed {
            sent: true,
            ..Default::default()
        };
        assert!(matches!(
            Redirect::found("/login").send(&mut sink),
            Err(RedirectError::HeadersSent(location)) if location == "/login"
        ));
        assert_eq!(sink.status, None);

        sink.sent = false;
        Redirect::temporary("/login").send(&mut sink).unwrap();
        assert_eq!(sink.status, Some(StatusCode::TEMPORARY_REDIRECT));
    }

    #[test]
    fn test_send_to_response() {
        let mut resp = Response::new(String::from("body"));
        Redirect::moved_permanent("/new").send(&mut resp).unwrap();
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[header::LOCATION], "/new");
        assert_eq!(resp.body(), "body");
    }
}
