use crate::rope::Rope;
use crate::value::{Val, Value};
use std::fmt;
use std::rc::Rc;

/// A Plorth array: a finite ordered sequence of (possibly `null`) values,
/// structurally shared the same way as `PlorthString` (leaf / concat /
/// slice / reverse). Elements are `Val` rather than bare `Value` because an
/// array literal may embed `null` (e.g. `[true, null]`).
#[derive(Clone)]
pub struct PlorthArray {
    rope: Rc<Rope<Val>>,
}

impl PlorthArray {
    pub fn from_vec(items: Vec<Val>) -> Self {
        PlorthArray {
            rope: Rope::from_vec(items),
        }
    }

    /// Convenience for building an array whose elements are never `null`,
    /// e.g. the parser's literal element list before evaluation.
    pub fn from_values(items: Vec<Value>) -> Self {
        PlorthArray::from_vec(items.into_iter().map(Some).collect())
    }

    pub fn empty() -> Self {
        PlorthArray { rope: Rope::empty() }
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    /// `None` means out of bounds; `Some(None)` is an in-bounds `null`.
    pub fn get(&self, index: usize) -> Option<Val> {
        self.rope.get(index)
    }

    pub fn concat(&self, other: &PlorthArray) -> PlorthArray {
        PlorthArray {
            rope: Rope::concat(self.rope.clone(), other.rope.clone()),
        }
    }

    pub fn reversed(&self) -> PlorthArray {
        PlorthArray {
            rope: Rope::reversed(self.rope.clone()),
        }
    }

    pub fn slice(&self, offset: usize, len: usize) -> PlorthArray {
        PlorthArray {
            rope: Rope::slice(self.rope.clone(), offset, len),
        }
    }

    /// `push` appends a single element; built as a concat against a
    /// single-element leaf rather than copying the whole backing vector.
    pub fn push(&self, value: Val) -> PlorthArray {
        self.concat(&PlorthArray::from_vec(vec![value]))
    }

    /// `pop` (drop-last) returns the array without its last element plus the
    /// removed element, an O(1) amortized slice rather than a full copy.
    pub fn pop(&self) -> Option<(PlorthArray, Val)> {
        if self.is_empty() {
            return None;
        }
        let len = self.len();
        let last = self.get(len - 1)?;
        Some((self.slice(0, len - 1), last))
    }

    pub fn to_vec(&self) -> Vec<Val> {
        self.rope.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = Val> + '_ {
        (0..self.len()).map(move |i| self.get(i).expect("index within bounds"))
    }
}

impl PartialEq for PlorthArray {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.to_vec() == other.to_vec()
    }
}

impl fmt::Debug for PlorthArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
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
    fn concat_push_pop_roundtrip() {
        let a = PlorthArray::from_vec(vec![num(1), num(2)]);
        let b = PlorthArray::from_vec(vec![num(3)]);
        let combined = a.concat(&b);
        assert_eq!(combined.to_vec(), vec![num(1), num(2), num(3)]);

        let pushed = combined.push(num(4));
        assert_eq!(pushed.len(), 4);

        let (popped, last) = pushed.pop().unwrap();
        assert_eq!(last, num(4));
        assert_eq!(popped.to_vec(), vec![num(1), num(2), num(3)]);
    }

    #[test]
    fn reverse() {
        let a = PlorthArray::from_vec(vec![num(1), num(2), num(3)]);
        assert_eq!(a.reversed().to_vec(), vec![num(3), num(2), num(1)]);
    }

    #[test]
    fn holds_null_elements() {
        let a = PlorthArray::from_vec(vec![Some(Value::Boolean(true)), None]);
        assert_eq!(a.get(1), Some(None));
        assert_eq!(a.len(), 2);
    }
}
