use std::fmt::{self, Display, Formatter};
use std::iter::FromIterator;

use serde::{de::DeserializeOwned, Serialize};

use crate::encoding::{form_decode, form_encode};
use crate::error::Result;

/// The separator placed between query parameters unless told otherwise.
pub const DEFAULT_QUERY_SEPARATOR: &str = "&";

/// The query parameters of a URL.
///
/// An ordered map from parameter name to an optional value. A parameter
/// without value (`?debug`) is a flag. Names are unique: inserting an
/// existing name replaces its value and keeps its position.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Parameters(Vec<(String, Option<String>)>);

impl Parameters {
    /// Creates an empty set of parameters.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a form-encoded query string such as `a=1&b&c=x+y`.
    ///
    /// Empty pairs and pairs with an empty name are skipped. When a name
    /// appears more than once the last value wins.
    pub fn from_query_str(query: &str) -> Self {
        let mut params = Self::new();
        for pair in query.split('&') {
            let (name, value) = match pair.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (pair, None),
            };
            if name.is_empty() {
                continue;
            }
            params.insert_optional(form_decode(name), value.map(form_decode));
        }
        params
    }

    /// Builds parameters from any value `serde_urlencoded` can serialize,
    /// for example a struct or a map of scalars.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        let query = serde_urlencoded::to_string(value)?;
        Ok(Self::from_query_str(&query))
    }

    /// Deserializes the parameters into `T`.
    ///
    /// Flags are seen as empty strings.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_urlencoded::from_str(&self.to_string())?)
    }

    /// Returns the number of parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if a parameter with this name exists, flags included.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the value of a parameter.
    ///
    /// Returns `None` if the parameter is missing or is a flag, use
    /// [`Parameters::contains`] to tell them apart.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).and_then(|idx| self.0[idx].1.as_deref())
    }

    /// Sets a parameter to a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert_optional(name.into(), Some(value.into()));
    }

    /// Sets a parameter without value.
    pub fn insert_flag(&mut self, name: impl Into<String>) {
        self.insert_optional(name.into(), None);
    }

    /// Sets a parameter to an optional value.
    pub fn insert_optional(&mut self, name: String, value: Option<String>) {
        match self.position(&name) {
            Some(idx) => self.0[idx].1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Removes a parameter, returns `true` if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.0.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Removes all parameters.
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// An iterator visiting all parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Serializes the parameters, joining pairs with `separator`.
    ///
    /// Names and values are form encoded. Flags and empty values are written
    /// as a bare name, `"0"` is a value like any other.
    pub fn to_query_string(&self, separator: &str) -> String {
        let mut query = String::new();
        for (name, value) in &self.0 {
            if !query.is_empty() {
                query.push_str(separator);
            }
            query.push_str(&form_encode(name));
            if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
                query.push('=');
                query.push_str(&form_encode(value));
            }
        }
        query
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|(key, _)| key == name)
    }
}

impl Display for Parameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string(DEFAULT_QUERY_SEPARATOR))
    }
}

impl Extend<(String, Option<String>)> for Parameters {
    fn extend<T: IntoIterator<Item = (String, Option<String>)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.insert_optional(name, value);
        }
    }
}

impl<'a> Extend<(&'a str, Option<&'a str>)> for Parameters {
    fn extend<T: IntoIterator<Item = (&'a str, Option<&'a str>)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.insert_optional(name.to_string(), value.map(ToString::to_string));
        }
    }
}

impl FromIterator<(String, Option<String>)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (String, Option<String>)>>(iter: T) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<'a> FromIterator<(&'a str, Option<&'a str>)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (&'a str, Option<&'a str>)>>(iter: T) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl IntoIterator for Parameters {
    type Item = (String, Option<String>);
    type IntoIter = std::vec::IntoIter<(String, Option<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
