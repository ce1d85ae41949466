//! The Jotform endpoint catalog.
//!
//! Each method is a one-line adapter: a literal path with ids substituted, a
//! fixed verb, and parameters taken from the arguments. They are grouped by
//! resource; everything returns the decoded JSON envelope untouched.
//!
//! Ids accept anything `Display`, so both `"230123456789"` and `230123456789`
//! work. Every id is percent-encoded as one path segment, so `/`, `?` or a
//! space in an id stays inside that segment.

use std::fmt::Display;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

mod folder;
mod form;
mod report;
mod submission;
mod system;
mod user;

/// Characters that may not appear raw inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

pub(crate) fn segment(id: impl Display) -> String {
    utf8_percent_encode(&id.to_string(), PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ids_are_unchanged() {
        assert_eq!(segment("230123456789"), "230123456789");
        assert_eq!(segment(230123456789u64), "230123456789");
        assert_eq!(segment("GOLD"), "GOLD");
        assert_eq!(segment("a-b_c.d~e"), "a-b_c.d~e");
    }

    #[test]
    fn reserved_characters_stay_in_the_segment() {
        assert_eq!(segment("GOLD PLAN"), "GOLD%20PLAN");
        assert_eq!(segment("a/../../user?x=1"), "a%2F..%2F..%2Fuser%3Fx=1");
        assert_eq!(segment("50%#top"), "50%25%23top");
    }

    #[test]
    fn non_ascii_is_utf8_encoded() {
        assert_eq!(segment("é"), "%C3%A9");
    }
}
