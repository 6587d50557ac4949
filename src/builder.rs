use serde::Deserialize;

use crate::encoding::form_encode;
use crate::parts::{present, Parts};
use crate::query::DEFAULT_QUERY_SEPARATOR;

/// The scheme written when a URL with a host has none.
pub const DEFAULT_SCHEME: &str = "http";

const DEFAULT_PORTS: &[(&str, u16)] = &[
    ("ftp", 21),
    ("ssh", 22),
    ("sftp", 22),
    ("http", 80),
    ("https", 443),
];

/// Returns the well-known port of a scheme.
///
/// ```
/// assert_eq!(urlkit::default_port("https"), Some(443));
/// assert_eq!(urlkit::default_port("gopher"), None);
/// ```
pub fn default_port(scheme: &str) -> Option<u16> {
    DEFAULT_PORTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(scheme))
        .map(|(_, port)| *port)
}

/// Controls which components [`build`] writes and how.
///
/// The default writes everything, uses `http` when the URL has a host but
/// no scheme, joins query parameters with `&` and leaves out a port that is
/// the default one for the scheme.
///
/// It can be read from configuration files:
///
/// ```
/// use urlkit::BuildOptions;
///
/// let options: BuildOptions =
///     serde_json::from_str(r#"{"include_credentials": false, "default_scheme": "https"}"#)
///         .unwrap();
/// assert_eq!(options, BuildOptions::default().credentials(false).default_scheme("https"));
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    include_authority: bool,
    include_credentials: bool,
    include_port: bool,
    include_query: bool,
    include_fragment: bool,
    suppress_default_port: bool,
    default_scheme: String,
    query_separator: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            include_authority: true,
            include_credentials: true,
            include_port: true,
            include_query: true,
            include_fragment: true,
            suppress_default_port: true,
            default_scheme: DEFAULT_SCHEME.to_string(),
            query_separator: DEFAULT_QUERY_SEPARATOR.to_string(),
        }
    }
}

impl BuildOptions {
    /// Create new `BuildOptions` that write everything.
    pub fn new() -> Self {
        Default::default()
    }

    /// Options for a relative URI: path, query and fragment only.
    pub fn relative() -> Self {
        Self::default().authority(false)
    }

    /// Write scheme, credentials, host and port.
    #[must_use]
    pub fn authority(self, include: bool) -> Self {
        Self {
            include_authority: include,
            ..self
        }
    }

    /// Write the user and password.
    #[must_use]
    pub fn credentials(self, include: bool) -> Self {
        Self {
            include_credentials: include,
            ..self
        }
    }

    /// Write the port.
    #[must_use]
    pub fn port(self, include: bool) -> Self {
        Self {
            include_port: include,
            ..self
        }
    }

    /// Write the query.
    #[must_use]
    pub fn query(self, include: bool) -> Self {
        Self {
            include_query: include,
            ..self
        }
    }

    /// Write the fragment.
    #[must_use]
    pub fn fragment(self, include: bool) -> Self {
        Self {
            include_fragment: include,
            ..self
        }
    }

    /// Leave out a port equal to the scheme's [`default_port`].
    #[must_use]
    pub fn suppress_default_port(self, suppress: bool) -> Self {
        Self {
            suppress_default_port: suppress,
            ..self
        }
    }

    /// Specify the scheme used when the URL has none.
    #[must_use]
    pub fn default_scheme(self, scheme: impl Into<String>) -> Self {
        Self {
            default_scheme: scheme.into(),
            ..self
        }
    }

    /// Specify the separator placed between query parameters.
    #[must_use]
    pub fn query_separator(self, separator: impl Into<String>) -> Self {
        Self {
            query_separator: separator.into(),
            ..self
        }
    }
}

/// Builds a URL string from its components.
///
/// The output is `scheme://[user[:password]@]host[:port]` when there is a
/// host, then the path (or `/`), then `?query` and `#fragment` when they
/// are not empty. User, password, query and fragment are form encoded;
/// scheme, host, port and path are written as they are.
pub fn build(parts: &Parts, options: &BuildOptions) -> String {
    let mut url = String::new();

    if options.include_authority {
        if let Some(host) = present(&parts.host) {
            let scheme = present(&parts.scheme).unwrap_or(options.default_scheme.as_str());
            url.push_str(scheme);
            url.push_str("://");

            if options.include_credentials {
                if let Some(user_info) = parts.user_info() {
                    url.push_str(&user_info);
                    url.push('@');
                }
            }

            url.push_str(host);

            if options.include_port {
                if let Some(port) = parts.port {
                    if !options.suppress_default_port || default_port(scheme) != Some(port) {
                        url.push(':');
                        url.push_str(&port.to_string());
                    }
                }
            }
        }
    }

    url.push_str(present(&parts.path).unwrap_or("/"));

    if options.include_query && !parts.query.is_empty() {
        url.push('?');
        url.push_str(&parts.query.to_query_string(&options.query_separator));
    }

    if options.include_fragment {
        if let Some(fragment) = present(&parts.fragment) {
            url.push('#');
            url.push_str(&form_encode(fragment));
        }
    }

    url
}
