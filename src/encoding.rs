use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes left untouched by form encoding, everything else becomes `%XX`.
const FORM: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Encodes a component the way form data is encoded: spaces become `+`.
pub(crate) fn form_encode(input: &str) -> String {
    // `%` itself is always escaped, so `%20` can only come from a space.
    utf8_percent_encode(input, FORM)
        .to_string()
        .replace("%20", "+")
}

/// Reverses [`form_encode`]. Invalid escapes are kept as-is and invalid
/// UTF-8 is replaced.
pub(crate) fn form_decode(input: &str) -> String {
    let input: Cow<'_, str> = if input.contains('+') {
        Cow::Owned(input.replace('+', " "))
    } else {
        Cow::Borrowed(input)
    };
    percent_decode_str(&input).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_encode() {
        assert_eq!(form_encode("val1"), "val1");
        assert_eq!(form_encode("a b"), "a+b");
        assert_eq!(form_encode("a+b"), "a%2Bb");
        assert_eq!(form_encode("x@y:z/w"), "x%40y%3Az%2Fw");
        assert_eq!(form_encode("50%"), "50%25");
        assert_eq!(form_encode("-_."), "-_.");
        assert_eq!(form_encode("é"), "%C3%A9");
    }

    #[test]
    fn test_form_decode() {
        assert_eq!(form_decode("a+b"), "a b");
        assert_eq!(form_decode("a%2Bb"), "a+b");
        assert_eq!(form_decode("%C3%A9t%C3%A9"), "été");
        assert_eq!(form_decode("100%"), "100%");
        assert_eq!(form_decode("%zz"), "%zz");
    }
}
