use crate::word::Word;
use indexmap::IndexMap;

/// An insertion-ordered mapping from identifier to word, used both as the
/// Runtime's global dictionary and as each Context's local dictionary.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: IndexMap<String, Word>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary {
            words: IndexMap::new(),
        }
    }

    /// Replaces any existing entry with the same identifier in place,
    /// preserving its original insertion position rather than moving the
    /// redefinition to the end.
    pub fn insert(&mut self, word: Word) {
        let id = word.id().to_string();
        if let Some(slot) = self.words.get_mut(&id) {
            *slot = word;
        } else {
            self.words.insert(id, word);
        }
    }

    pub fn find(&self, identifier: &str) -> Option<&Word> {
        self.words.get(identifier)
    }

    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.words.values()
    }

    pub fn size(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::quote::Quote;
    use crate::symbol::Symbol;

    fn word(id: &str, marker: i64) -> Word {
        Word::new(
            Symbol::new(id, None::<Position>),
            Quote::native("test", move |ctx| {
                ctx.push(Some(crate::value::Value::Number(crate::number::Number::Int(marker))));
                true
            }),
        )
    }

    #[test]
    fn reinsertion_preserves_original_position() {
        let mut dict = Dictionary::new();
        dict.insert(word("a", 1));
        dict.insert(word("b", 2));
        dict.insert(word("a", 99));

        let ids: Vec<&str> = dict.words().map(|w| w.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(dict.find("a").unwrap().id(), "a");
    }

    #[test]
    fn find_missing_returns_none() {
        let dict = Dictionary::new();
        assert!(dict.find("nope").is_none());
    }
}
