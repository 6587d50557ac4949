use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ambient::AmbientContext;
use crate::compat::UriAccess;
use crate::immutable::ImmutableUrl;
use crate::parts::Parts;
use crate::query::Parameters;

/// A URL changed in place.
///
/// All read accessors come from [`Parts`] through `Deref`. Every setter
/// returns `&mut Self` so calls can be chained.
///
/// ```
/// use urlkit::Url;
///
/// let mut url = Url::parse("http://example.com/search?q=rust");
/// url.set_scheme("https")
///     .set_port(8443)
///     .set_query_parameter("page", Some("2"))
///     .remove_fragment();
/// assert_eq!(url.to_string(), "https://example.com:8443/search?q=rust&page=2");
/// ```
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Url(Parts);

impl Url {
    /// Creates an empty URL.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a URL, see [`parse`](crate::parse).
    #[inline]
    pub fn parse(url: &str) -> Self {
        Self(Parts::parse(url))
    }

    /// Creates a URL from the context of the current request.
    #[inline]
    pub fn from_ambient(context: &AmbientContext) -> Self {
        Self(Parts::from_ambient(context))
    }

    /// Creates a URL from a foreign URI type.
    #[inline]
    pub fn from_uri<U: UriAccess + ?Sized>(uri: &U) -> Self {
        Self(Parts::from_uri(uri))
    }

    /// Consumes this URL and returns its components.
    #[inline]
    pub fn into_parts(self) -> Parts {
        self.0
    }

    /// Sets the scheme, it is lowercased.
    pub fn set_scheme(&mut self, scheme: &str) -> &mut Self {
        self.0.set_scheme(Some(scheme));
        self
    }

    /// Removes the scheme.
    pub fn remove_scheme(&mut self) -> &mut Self {
        self.0.scheme = None;
        self
    }

    /// Sets the host name or IP address.
    pub fn set_host(&mut self, host: impl Into<String>) -> &mut Self {
        self.0.host = Some(host.into());
        self
    }

    /// Removes the host.
    pub fn remove_host(&mut self) -> &mut Self {
        self.0.host = None;
        self
    }

    /// Sets the port. `0` removes it.
    pub fn set_port(&mut self, port: u16) -> &mut Self {
        self.0.set_port(Some(port));
        self
    }

    /// Removes the port.
    pub fn remove_port(&mut self) -> &mut Self {
        self.0.port = None;
        self
    }

    /// Sets the user name.
    pub fn set_user(&mut self, user: impl Into<String>) -> &mut Self {
        self.0.user = Some(user.into());
        self
    }

    /// Removes the user name. The password is kept but will not be written.
    pub fn remove_user(&mut self) -> &mut Self {
        self.0.user = None;
        self
    }

    /// Sets the password.
    pub fn set_password(&mut self, password: impl Into<String>) -> &mut Self {
        self.0.password = Some(password.into());
        self
    }

    /// Removes the password.
    pub fn remove_password(&mut self) -> &mut Self {
        self.0.password = None;
        self
    }

    /// Sets the user name and replaces the password.
    pub fn set_user_info(&mut self, user: impl Into<String>, password: Option<&str>) -> &mut Self {
        self.0.user = Some(user.into());
        self.0.password = password.map(ToString::to_string);
        self
    }

    /// Sets the path.
    pub fn set_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.0.path = Some(path.into());
        self
    }

    /// Removes the path, the URL will be built with `/`.
    pub fn remove_path(&mut self) -> &mut Self {
        self.0.path = None;
        self
    }

    /// Sets the fragment, given unencoded.
    pub fn set_fragment(&mut self, fragment: impl Into<String>) -> &mut Self {
        self.0.fragment = Some(fragment.into());
        self
    }

    /// Removes the fragment.
    pub fn remove_fragment(&mut self) -> &mut Self {
        self.0.fragment = None;
        self
    }

    /// Replaces the query with the parameters of an encoded query string.
    pub fn set_query_string(&mut self, query: &str) -> &mut Self {
        self.0.set_query_string(query);
        self
    }

    /// Replaces the query.
    pub fn set_query(&mut self, query: Parameters) -> &mut Self {
        self.0.query = query;
        self
    }

    /// Removes all query parameters.
    pub fn remove_query(&mut self) -> &mut Self {
        self.0.query.clear();
        self
    }

    /// Adds query parameters, replacing the value of those already present.
    pub fn add_query_parameters<I, K, V>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.0.add_query_parameters(params);
        self
    }

    /// Sets a query parameter, `None` makes it a flag.
    pub fn set_query_parameter(
        &mut self,
        name: impl Into<String>,
        value: Option<&str>,
    ) -> &mut Self {
        self.0
            .query
            .insert_optional(name.into(), value.map(ToString::to_string));
        self
    }

    /// Removes a query parameter, returns `true` if it was present.
    pub fn remove_query_parameter(&mut self, name: &str) -> bool {
        self.0.query.remove(name)
    }

    /// Returns a mutable reference to the query parameters.
    #[inline]
    pub fn query_mut(&mut self) -> &mut Parameters {
        &mut self.0.query
    }
}

impl Deref for Url {
    type Target = Parts;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Url {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Url {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Url {
    fn from(url: &str) -> Self {
        Self::parse(url)
    }
}

impl From<Parts> for Url {
    fn from(parts: Parts) -> Self {
        Self(parts)
    }
}

impl From<Url> for Parts {
    fn from(url: Url) -> Self {
        url.0
    }
}

impl From<ImmutableUrl> for Url {
    fn from(url: ImmutableUrl) -> Self {
        Self(url.into_parts())
    }
}
