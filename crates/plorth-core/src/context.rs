use crate::array_value::PlorthArray;
use crate::dictionary::Dictionary;
use crate::error::{Error, ErrorKind};
use crate::number::Number;
use crate::object_value::PlorthObject;
use crate::parser::Parser;
use crate::position::Position;
use crate::quote::Quote;
use crate::runtime::Runtime;
use crate::string_value::PlorthString;
use crate::symbol::Symbol;
use crate::value::{Val, Value};
use crate::word::Word;
use std::rc::Rc;

/// Per-execution state: a reference to the owning Runtime, the data stack,
/// the local dictionary, the current uncaught error (if any) and the
/// current source position. Optionally carries a filename when the context
/// is running as a module body.
pub struct Context {
    pub runtime: Rc<Runtime>,
    stack: Vec<Val>,
    local_dictionary: Dictionary,
    error: Option<Error>,
    position: Position,
    pub filename: Option<String>,
}

impl Context {
    pub fn new(runtime: Rc<Runtime>) -> Self {
        Context {
            runtime,
            stack: Vec::new(),
            local_dictionary: Dictionary::new(),
            error: None,
            position: Position::start(None),
            filename: None,
        }
    }

    pub fn with_filename(runtime: Rc<Runtime>, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        Context {
            position: Position::start(Some(filename.clone())),
            filename: Some(filename),
            ..Context::new(runtime)
        }
    }

    // --- stack operations -------------------------------------------------

    pub fn push(&mut self, value: Val) {
        self.stack.push(value);
    }

    pub fn push_value(&mut self, value: Value) {
        self.push(Some(value));
    }

    pub fn push_null(&mut self) {
        self.push(None);
    }

    pub fn push_boolean(&mut self, b: bool) {
        self.push_value(Value::Boolean(b));
    }

    pub fn push_number(&mut self, n: Number) {
        self.push_value(Value::Number(n));
    }

    pub fn push_int(&mut self, i: i64) {
        self.push_number(Number::Int(i));
    }

    pub fn push_string(&mut self, s: impl AsRef<str>) {
        self.push_value(Value::String(PlorthString::new(s.as_ref())));
    }

    pub fn push_array(&mut self, arr: PlorthArray) {
        self.push_value(Value::Array(arr));
    }

    pub fn push_object(&mut self, obj: PlorthObject) {
        self.push_value(Value::Object(obj));
    }

    pub fn push_symbol(&mut self, id: impl Into<String>) {
        self.push_value(Value::Symbol(Symbol::new(id, None)));
    }

    pub fn push_quote(&mut self, quote: Quote) {
        self.push_value(Value::Quote(quote));
    }

    pub fn push_word(&mut self, word: Word) {
        self.push_value(Value::Word(word));
    }

    /// Pops the top of the stack. `None` means underflow; the error has
    /// already been set on the context. A successful pop yields a `Val`,
    /// which may itself be `null` (Rust `None`).
    pub fn pop(&mut self) -> Option<Val> {
        match self.stack.pop() {
            Some(v) => Some(v),
            None => {
                self.set_error(ErrorKind::Range, "Stack underflow.", None);
                None
            }
        }
    }

    pub fn peek(&self) -> Option<&Val> {
        self.stack.last()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn size(&self) -> usize {
        self.stack.len()
    }

    fn pop_non_null(&mut self, expected: &str) -> Option<Value> {
        let value = self.pop()?;
        match value {
            Some(v) => Some(v),
            None => {
                self.set_error(
                    ErrorKind::Type,
                    format!("Expected {expected}, got null instead."),
                    None,
                );
                None
            }
        }
    }

    fn pop_expecting<T>(
        &mut self,
        expected: &str,
        extract: impl FnOnce(Value) -> Result<T, Value>,
    ) -> Option<T> {
        let value = self.pop_non_null(expected)?;
        let type_tag = value.type_tag();
        match extract(value) {
            Ok(result) => Some(result),
            Err(_) => {
                self.set_error(
                    ErrorKind::Type,
                    format!("Expected {expected}, got {type_tag} instead."),
                    None,
                );
                None
            }
        }
    }

    pub fn pop_boolean(&mut self) -> Option<bool> {
        self.pop_expecting("boolean", |v| match v {
            Value::Boolean(b) => Ok(b),
            other => Err(other),
        })
    }

    pub fn pop_number(&mut self) -> Option<Number> {
        self.pop_expecting("number", |v| match v {
            Value::Number(n) => Ok(n),
            other => Err(other),
        })
    }

    pub fn pop_string(&mut self) -> Option<PlorthString> {
        self.pop_expecting("string", |v| match v {
            Value::String(s) => Ok(s),
            other => Err(other),
        })
    }

    pub fn pop_array(&mut self) -> Option<PlorthArray> {
        self.pop_expecting("array", |v| match v {
            Value::Array(a) => Ok(a),
            other => Err(other),
        })
    }

    pub fn pop_object(&mut self) -> Option<PlorthObject> {
        self.pop_expecting("object", |v| match v {
            Value::Object(o) => Ok(o),
            other => Err(other),
        })
    }

    pub fn pop_symbol(&mut self) -> Option<Symbol> {
        self.pop_expecting("symbol", |v| match v {
            Value::Symbol(s) => Ok(s),
            other => Err(other),
        })
    }

    pub fn pop_quote(&mut self) -> Option<Quote> {
        self.pop_expecting("quote", |v| match v {
            Value::Quote(q) => Ok(q),
            other => Err(other),
        })
    }

    pub fn pop_word(&mut self) -> Option<Word> {
        self.pop_expecting("word", |v| match v {
            Value::Word(w) => Ok(w),
            other => Err(other),
        })
    }

    pub fn pop_error(&mut self) -> Option<Error> {
        self.pop_expecting("error", |v| match v {
            Value::Error(e) => Ok(e),
            other => Err(other),
        })
    }

    // --- error management ---------------------------------------------

    pub fn set_error(&mut self, kind: ErrorKind, message: impl Into<String>, position: Option<Position>) {
        let position = position.or_else(|| Some(self.position.clone()));
        self.error = Some(Error::new(kind, message, position));
    }

    pub fn set_error_value(&mut self, error: Error) {
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    // --- position -------------------------------------------------------

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    // --- compile ----------------------------------------------------------

    /// Parses `source` and wraps the resulting token sequence in a compiled
    /// quote bound to this context's filename. On a syntax error, sets it on
    /// the context and returns `None`.
    pub fn compile(&mut self, source: &str) -> Option<Quote> {
        let start = Position::start(self.filename.clone());
        let mut parser = Parser::new(source, start);
        match parser.parse_program() {
            Ok(values) => Some(Quote::compiled(values, self.filename.clone())),
            Err(err) => {
                self.set_error_value(err);
                None
            }
        }
    }

    pub fn local_dictionary(&self) -> &Dictionary {
        &self.local_dictionary
    }

    pub fn local_dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.local_dictionary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;

    fn ctx() -> Context {
        Context::new(Rc::new(Runtime::new()))
    }

    #[test]
    fn pop_on_empty_stack_sets_range_error() {
        let mut c = ctx();
        assert!(c.pop().is_none());
        assert_eq!(c.error().unwrap().kind, ErrorKind::Range);
    }

    #[test]
    fn pop_expecting_wrong_type_sets_type_error() {
        let mut c = ctx();
        c.push_boolean(true);
        assert!(c.pop_number().is_none());
        assert_eq!(c.error().unwrap().kind, ErrorKind::Type);
    }

    #[test]
    fn pop_null_for_typed_pop_sets_type_error_not_panic() {
        let mut c = ctx();
        c.push_null();
        assert!(c.pop_string().is_none());
        assert_eq!(c.error().unwrap().kind, ErrorKind::Type);
    }
}
