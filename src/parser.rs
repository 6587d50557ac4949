use crate::encoding::form_decode;
use crate::parts::Parts;
use crate::query::Parameters;

/// Parses a URL into its components.
///
/// The input is split along `[scheme:][//[user[:password]@]host[:port]][path][?query][#fragment]`.
/// This is a best-effort split, not a validation: a component that is
/// missing or empty stays `None`, and input that cannot be split at all
/// gives an empty [`Parts`]. It never fails.
///
/// The scheme is lowercased. User, password, query and fragment are form
/// decoded. A port that is zero, not a number or too large is ignored.
/// `host:port` without scheme (`example.com:8080/path`) is understood as an
/// authority.
///
/// ```
/// let parts = urlkit::parse("HTTPS://example.com:8443/a?b=1#c");
/// assert_eq!(parts.scheme(), Some("https"));
/// assert_eq!(parts.host(), Some("example.com"));
/// assert_eq!(parts.port(), Some(8443));
/// assert_eq!(parts.path(), Some("/a"));
/// assert_eq!(parts.query_parameter("b"), Some("1"));
/// assert_eq!(parts.fragment(), Some("c"));
/// ```
pub fn parse(url: &str) -> Parts {
    let mut parts = Parts::default();

    let (rest, fragment) = split_off(url, '#');
    let (rest, query) = split_off(rest, '?');
    let (scheme, rest) = split_scheme(rest);

    let (authority, path) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find('/').unwrap_or_else(|| after.len());
            (Some(&after[..end]), &after[end..])
        }
        None if scheme.is_none() && starts_with_port(rest) => {
            let end = rest.find('/').unwrap_or_else(|| rest.len());
            (Some(&rest[..end]), &rest[end..])
        }
        None => (None, rest),
    };

    if let Some(authority) = authority {
        // only `file:///path` may leave the authority empty
        let missing_host = authority.is_empty()
            && scheme.map_or(false, |scheme| !scheme.eq_ignore_ascii_case("file"));
        if missing_host || !parse_authority(authority, &mut parts) {
            tracing::debug!("malformed authority, ignoring the url");
            return Parts::default();
        }
    }

    parts.set_scheme(scheme);
    parts.path = non_empty(path).map(ToString::to_string);
    if let Some(query) = query.and_then(non_empty) {
        parts.query = Parameters::from_query_str(query);
    }
    parts.fragment = fragment.and_then(non_empty).map(form_decode);

    tracing::trace!(
        scheme = ?parts.scheme,
        host = ?parts.host,
        port = ?parts.port,
        path = ?parts.path,
        "parsed url"
    );
    parts
}

/// Splits a combined `host[:port]` value such as a `Host` header on the
/// first `:`.
///
/// A bracketed IPv6 literal (`[::1]:8080`) is split after the `]`. An
/// unusable port is dropped.
///
/// ```
/// assert_eq!(
///     urlkit::split_host_port("example.com:8080"),
///     (Some("example.com".to_string()), Some(8080))
/// );
/// assert_eq!(urlkit::split_host_port("example.com"), (Some("example.com".to_string()), None));
/// ```
pub fn split_host_port(value: &str) -> (Option<String>, Option<u16>) {
    let (host, port) = if value.starts_with('[') {
        match value.find(']') {
            Some(end) => (&value[..=end], value[end + 1..].strip_prefix(':')),
            None => (value, None),
        }
    } else {
        match value.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (value, None),
        }
    };
    (
        non_empty(host).map(ToString::to_string),
        port.and_then(parse_port),
    )
}

/// Parses a port token, anything outside `1..=65535` is ignored.
pub(crate) fn parse_port(token: &str) -> Option<u16> {
    if token.is_empty() {
        return None;
    }
    match token.parse::<u16>() {
        Ok(port) if port != 0 && token.bytes().all(|b| b.is_ascii_digit()) => Some(port),
        _ => {
            tracing::debug!(port = token, "ignoring invalid port");
            None
        }
    }
}

pub(crate) fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn split_off(value: &str, delimiter: char) -> (&str, Option<&str>) {
    match value.split_once(delimiter) {
        Some((head, tail)) => (head, Some(tail)),
        None => (value, None),
    }
}

/// Splits `scheme:rest`. A scheme starts with a letter followed by letters,
/// digits, `+`, `-` or `.`. `name:1234` is a host and a port, not a scheme.
fn split_scheme(value: &str) -> (Option<&str>, &str) {
    let (scheme, rest) = match value.split_once(':') {
        Some(split) => split,
        None => return (None, value),
    };
    let valid = scheme
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid || starts_with_port(value) {
        return (None, value);
    }
    (Some(scheme), rest)
}

/// Returns `true` for `name:1234` or `name:1234/path`.
fn starts_with_port(value: &str) -> bool {
    let first = value.split('/').next().unwrap_or_default();
    match first.split_once(':') {
        Some((host, port)) => {
            !host.is_empty()
                && !port.is_empty()
                && port.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Fills user, password, host and port. Returns `false` when the authority
/// carries credentials or a port but no host.
fn parse_authority(authority: &str, parts: &mut Parts) -> bool {
    let (user_info, host_port) = match authority.rsplit_once('@') {
        Some((user_info, host_port)) => (Some(user_info), host_port),
        None => (None, authority),
    };

    let (host, port) = if host_port.starts_with('[') {
        match host_port.find(']') {
            Some(end) => (&host_port[..=end], host_port[end + 1..].strip_prefix(':')),
            None => (host_port, None),
        }
    } else {
        match host_port.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        }
    };

    if host.is_empty() {
        return user_info.is_none() && port.is_none();
    }

    if let Some(user_info) = user_info {
        let (user, password) = split_off(user_info, ':');
        parts.user = non_empty(user).map(form_decode);
        parts.password = password.and_then(non_empty).map(form_decode);
    }
    parts.host = Some(host.to_string());
    parts.set_port(port.and_then(parse_port));
    true
}
