use crate::value::{Val, Value};
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// An insertion-ordered, immutable mapping from string keys to (possibly
/// `null`) values.
///
/// Every "mutating" word (`!`, `delete`, `+`) is functional: it builds a new
/// `PlorthObject` rather than editing one in place, matching the reference
/// implementation's `object::set`/`object::delete`/`object::concat`, which
/// are all copy-on-write over a fresh property list.
#[derive(Clone)]
pub struct PlorthObject {
    properties: Rc<IndexMap<String, Val>>,
}

impl PlorthObject {
    pub fn new(properties: IndexMap<String, Val>) -> Self {
        PlorthObject {
            properties: Rc::new(properties),
        }
    }

    /// Convenience for building an object whose property values are never
    /// `null`, e.g. the parser's literal property list before evaluation.
    pub fn from_values(properties: IndexMap<String, Value>) -> Self {
        PlorthObject::new(properties.into_iter().map(|(k, v)| (k, Some(v))).collect())
    }

    pub fn empty() -> Self {
        PlorthObject::new(IndexMap::new())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Val> {
        self.properties.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.properties.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Val> {
        self.properties.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Val)> {
        self.properties.iter()
    }

    /// `!`: returns a new object with `key` bound to `value`. A pre-existing
    /// key keeps its original position; a new key is appended, matching
    /// `IndexMap::insert` semantics.
    pub fn set(&self, key: impl Into<String>, value: Val) -> PlorthObject {
        let mut next = (*self.properties).clone();
        next.insert(key.into(), value);
        PlorthObject::new(next)
    }

    /// `delete`: returns `None` if the key was absent (range error at the
    /// call site), otherwise the object without that key.
    pub fn delete(&self, key: &str) -> Option<PlorthObject> {
        if !self.properties.contains_key(key) {
            return None;
        }
        let mut next = (*self.properties).clone();
        next.shift_remove(key);
        Some(PlorthObject::new(next))
    }

    /// `+`: merges `self`'s entries then `other`'s; on key collision the
    /// right-hand operand's value wins, matching the reference's
    /// `w_concat` (`a`'s entries first, `b`'s appended with override).
    pub fn concat(&self, other: &PlorthObject) -> PlorthObject {
        let mut next = (*self.properties).clone();
        for (key, value) in other.iter() {
            next.insert(key.clone(), value.clone());
        }
        PlorthObject::new(next)
    }

    /// The object's own `__proto__` property, if present, non-null and
    /// itself an object.
    pub fn own_proto(&self) -> Option<PlorthObject> {
        match self.get("__proto__") {
            Some(Some(Value::Object(obj))) => Some(obj.clone()),
            _ => None,
        }
    }
}

impl PartialEq for PlorthObject {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl fmt::Debug for PlorthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::Number;

    fn num(n: i64) -> Val {
        Some(Value::Number(Number::Int(n)))
    }

    #[test]
    fn set_is_functional_and_preserves_position() {
        let base = PlorthObject::empty().set("a", num(1)).set("b", num(2));
        let updated = base.set("a", num(99));

        assert_eq!(base.get("a"), Some(&num(1)));
        assert_eq!(updated.get("a"), Some(&num(99)));
        assert_eq!(
            updated.keys().cloned().collect::<Vec<_>>(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn delete_returns_none_for_missing_key() {
        let obj = PlorthObject::empty().set("a", num(1));
        assert!(obj.delete("missing").is_none());
        let without_a = obj.delete("a").unwrap();
        assert!(!without_a.has("a"));
    }

    #[test]
    fn concat_right_hand_wins_on_collision() {
        let a = PlorthObject::empty().set("x", num(1)).set("y", num(2));
        let b = PlorthObject::empty().set("y", num(99)).set("z", num(3));
        let merged = a.concat(&b);
        assert_eq!(merged.get("x"), Some(&num(1)));
        assert_eq!(merged.get("y"), Some(&num(99)));
        assert_eq!(merged.get("z"), Some(&num(3)));
    }

    #[test]
    fn equality_is_order_insensitive() {
        let a = PlorthObject::empty().set("x", num(1)).set("y", num(2));
        let b = PlorthObject::empty().set("y", num(2)).set("x", num(1));
        assert_eq!(a, b);
    }

    #[test]
    fn holds_null_property_values() {
        let obj = PlorthObject::empty().set("a", None);
        assert_eq!(obj.get("a"), Some(&None));
    }
}
