//! Interoperability with other URI types.

use std::borrow::Cow;
use std::convert::TryFrom;

use crate::builder::BuildOptions;
use crate::encoding::{form_decode, form_encode};
use crate::error::{Error, Result};
use crate::immutable::ImmutableUrl;
use crate::parser::non_empty;
use crate::parts::{format_authority, present, Parts};
use crate::query::{Parameters, DEFAULT_QUERY_SEPARATOR};
use crate::url::Url;

/// Read access to the components of a URI, as found in its string form.
///
/// User info, query and fragment are returned encoded. Implement it for a
/// foreign URI type to convert it with [`Parts::from_uri`]; it is
/// implemented for [`http::Uri`] and for [`Parts`].
pub trait UriAccess {
    /// The scheme.
    fn scheme(&self) -> Option<&str>;

    /// The host.
    fn host(&self) -> Option<&str>;

    /// The explicit port.
    fn port(&self) -> Option<u16>;

    /// The encoded `user[:password]`.
    fn user_info(&self) -> Option<Cow<'_, str>>;

    /// The path, possibly empty.
    fn path(&self) -> &str;

    /// The encoded query, without `?`.
    fn query(&self) -> Option<Cow<'_, str>>;

    /// The encoded fragment, without `#`.
    fn fragment(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// `[user_info@]host[:port]`, or `None` without a host.
    fn authority(&self) -> Option<String> {
        let host = self.host()?;
        Some(format_authority(
            self.user_info().as_deref(),
            host,
            self.port(),
        ))
    }
}

impl UriAccess for http::Uri {
    fn scheme(&self) -> Option<&str> {
        self.scheme_str()
    }

    fn host(&self) -> Option<&str> {
        http::Uri::host(self)
    }

    fn port(&self) -> Option<u16> {
        self.port_u16()
    }

    fn user_info(&self) -> Option<Cow<'_, str>> {
        let authority = self.authority()?.as_str();
        authority
            .rsplit_once('@')
            .map(|(user_info, _)| Cow::Borrowed(user_info))
    }

    fn path(&self) -> &str {
        http::Uri::path(self)
    }

    fn query(&self) -> Option<Cow<'_, str>> {
        http::Uri::query(self).map(Cow::Borrowed)
    }
}

impl UriAccess for Parts {
    fn scheme(&self) -> Option<&str> {
        Parts::scheme(self)
    }

    fn host(&self) -> Option<&str> {
        present(&self.host)
    }

    fn port(&self) -> Option<u16> {
        self.port
    }

    fn user_info(&self) -> Option<Cow<'_, str>> {
        Parts::user_info(self).map(Cow::Owned)
    }

    fn path(&self) -> &str {
        self.path.as_deref().unwrap_or_default()
    }

    fn query(&self) -> Option<Cow<'_, str>> {
        self.query_string(DEFAULT_QUERY_SEPARATOR).map(Cow::Owned)
    }

    fn fragment(&self) -> Option<Cow<'_, str>> {
        present(&self.fragment).map(|fragment| Cow::Owned(form_encode(fragment)))
    }
}

impl Parts {
    /// Creates a URL from any [`UriAccess`] type.
    ///
    /// The same rules as [`parse`](crate::parse) apply: empty components
    /// are absent, the scheme is lowercased and encoded components are
    /// decoded.
    pub fn from_uri<U: UriAccess + ?Sized>(uri: &U) -> Self {
        let mut parts = Parts::new();
        parts.set_scheme(uri.scheme().and_then(non_empty));
        parts.host = uri.host().and_then(non_empty).map(ToString::to_string);
        parts.set_port(uri.port());

        if let Some(user_info) = uri.user_info() {
            let (user, password) = match user_info.split_once(':') {
                Some((user, password)) => (user, Some(password)),
                None => (&*user_info, None),
            };
            parts.user = non_empty(user).map(form_decode);
            parts.password = password.and_then(non_empty).map(form_decode);
        }

        parts.path = non_empty(uri.path()).map(ToString::to_string);
        if let Some(query) = uri.query() {
            parts.query = Parameters::from_query_str(&query);
        }
        parts.fragment = uri
            .fragment()
            .as_deref()
            .and_then(non_empty)
            .map(form_decode);
        parts
    }
}

impl From<&http::Uri> for Parts {
    fn from(uri: &http::Uri) -> Self {
        Parts::from_uri(uri)
    }
}

impl TryFrom<&Parts> for http::Uri {
    type Error = Error;

    /// The fragment is left out, [`http::Uri`] cannot hold one.
    fn try_from(parts: &Parts) -> Result<Self> {
        let url = parts.build(&BuildOptions::default().fragment(false));
        Ok(url.parse::<http::Uri>()?)
    }
}

impl TryFrom<&Url> for http::Uri {
    type Error = Error;

    fn try_from(url: &Url) -> Result<Self> {
        http::Uri::try_from(&**url)
    }
}

impl TryFrom<&ImmutableUrl> for http::Uri {
    type Error = Error;

    fn try_from(url: &ImmutableUrl) -> Result<Self> {
        http::Uri::try_from(&**url)
    }
}
