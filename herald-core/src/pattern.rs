//! Topic pattern matching.
//!
//! Patterns and topic names are split on `.` into segments. Two wildcard
//! segments are recognised:
//!
//! - [`SINGLE_WILDCARD`] (`*`) matches exactly one segment, which may be empty.
//! - [`MULTI_WILDCARD`] (`**`) matches zero or more segments.
//!
//! ```
//! use herald_core::pattern::matches;
//!
//! assert!(matches("order.*", "order.created"));
//! assert!(matches("**.error", "db.conn.error"));
//! assert!(!matches("event.**", "event"));
//! ```

/// Matches exactly one topic segment.
pub const SINGLE_WILDCARD: &str = "*";

/// Matches zero or more topic segments.
pub const MULTI_WILDCARD: &str = "**";

const SEPARATOR: char = '.';

/// Characters a topic pattern may not contain.
const RESERVED: &[char] = &['?', '['];

/// Reports whether `topic` matches `pattern`.
///
/// Total over all inputs: never panics, including on empty strings and
/// consecutive dots. Splitting `""` yields a single empty segment.
///
/// A pattern of two or more segments ending in `**` does not match a bare
/// single-segment topic equal to its first segment: `"event.**"` rejects
/// `"event"`. Longer literal prefixes are not covered by this rule, so
/// `"a.b.**"` still matches `"a.b"`.
pub fn matches(pattern: &str, topic: &str) -> bool {
    if pattern == topic {
        return true;
    }

    let pattern: Vec<&str> = pattern.split(SEPARATOR).collect();
    let topic: Vec<&str> = topic.split(SEPARATOR).collect();

    if pattern.len() > 1
        && pattern.last() == Some(&MULTI_WILDCARD)
        && topic.len() == 1
        && topic[0] == pattern[0]
    {
        return false;
    }

    match_segments(&pattern, &topic)
}

fn match_segments(pattern: &[&str], topic: &[&str]) -> bool {
    let Some((&head, rest)) = pattern.split_first() else {
        return topic.is_empty();
    };

    match head {
        MULTI_WILDCARD if rest.is_empty() => true,
        MULTI_WILDCARD => (0..=topic.len()).any(|skip| match_segments(rest, &topic[skip..])),
        SINGLE_WILDCARD => !topic.is_empty() && match_segments(rest, &topic[1..]),
        literal => topic.first() == Some(&literal) && match_segments(rest, &topic[1..]),
    }
}

/// Reports whether `pattern` may be used to register listeners.
///
/// Empty patterns and patterns containing `?` or `[` are rejected.
pub fn is_valid_topic_name(pattern: &str) -> bool {
    !pattern.is_empty() && !pattern.contains(RESERVED)
}
