use crate::rope::Rope;
use std::fmt;
use std::rc::Rc;

/// A Plorth string: a finite ordered sequence of Unicode code points built on
/// the shared rope structure so that concatenation and reversal do not copy.
#[derive(Clone)]
pub struct PlorthString {
    rope: Rc<Rope<char>>,
}

impl PlorthString {
    pub fn new(text: &str) -> Self {
        PlorthString {
            rope: Rope::from_vec(text.chars().collect()),
        }
    }

    pub fn empty() -> Self {
        PlorthString { rope: Rope::empty() }
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.rope.get(index)
    }

    pub fn concat(&self, other: &PlorthString) -> PlorthString {
        PlorthString {
            rope: Rope::concat(self.rope.clone(), other.rope.clone()),
        }
    }

    pub fn reversed(&self) -> PlorthString {
        PlorthString {
            rope: Rope::reversed(self.rope.clone()),
        }
    }

    pub fn slice(&self, offset: usize, len: usize) -> PlorthString {
        PlorthString {
            rope: Rope::slice(self.rope.clone(), offset, len),
        }
    }

    pub fn repeat(&self, times: usize) -> PlorthString {
        let mut result = PlorthString::empty();
        for _ in 0..times {
            result = result.concat(self);
        }
        result
    }

    pub fn contains(&self, needle: &PlorthString) -> bool {
        self.to_string().contains(&needle.to_string())
    }

    pub fn find(&self, needle: &PlorthString) -> Option<usize> {
        let haystack: Vec<char> = self.rope.to_vec();
        let needle_chars: Vec<char> = needle.rope.to_vec();
        if needle_chars.is_empty() {
            return Some(0);
        }
        if needle_chars.len() > haystack.len() {
            return None;
        }
        haystack
            .windows(needle_chars.len())
            .position(|window| window == needle_chars.as_slice())
    }

    pub fn split(&self, separator: &PlorthString) -> Vec<PlorthString> {
        let text = self.to_string();
        let sep = separator.to_string();
        if sep.is_empty() {
            return text.chars().map(|c| PlorthString::new(&c.to_string())).collect();
        }
        text.split(sep.as_str()).map(PlorthString::new).collect()
    }

    pub fn chars(&self) -> Vec<char> {
        self.rope.to_vec()
    }

    /// Escapes per the source-form contract: reverses the parser's
    /// `\b \t \n \f \r \" \\ \uXXXX` table.
    pub fn to_source(&self) -> String {
        let mut out = String::with_capacity(self.len() + 2);
        out.push('"');
        for ch in self.chars() {
            match ch {
                '\u{8}' => out.push_str("\\b"),
                '\t' => out.push_str("\\t"),
                '\n' => out.push_str("\\n"),
                '\u{c}' => out.push_str("\\f"),
                '\r' => out.push_str("\\r"),
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                other => out.push(other),
            }
        }
        out.push('"');
        out
    }
}

impl fmt::Display for PlorthString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.chars().into_iter().collect();
        f.write_str(&text)
    }
}

impl PartialEq for PlorthString {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.chars() == other.chars()
    }
}

impl Eq for PlorthString {}

impl fmt::Debug for PlorthString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlorthString({:?})", self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_and_equality() {
        let a = PlorthString::new("foo");
        let b = PlorthString::new("bar");
        let combined = a.concat(&b);
        assert_eq!(combined.to_string(), "foobar");
        assert_eq!(combined, PlorthString::new("foobar"));
    }

    #[test]
    fn reverse_and_slice() {
        let s = PlorthString::new("hello");
        assert_eq!(s.reversed().to_string(), "olleh");
        assert_eq!(s.slice(1, 3).to_string(), "ell");
    }

    #[test]
    fn to_source_escapes_quotes_and_control_chars() {
        let s = PlorthString::new("a\"b\nc");
        assert_eq!(s.to_source(), "\"a\\\"b\\nc\"");
    }

    #[test]
    fn find_returns_byte_independent_index() {
        let s = PlorthString::new("foobar");
        assert_eq!(s.find(&PlorthString::new("bar")), Some(3));
        assert_eq!(s.find(&PlorthString::new("baz")), None);
    }
}
