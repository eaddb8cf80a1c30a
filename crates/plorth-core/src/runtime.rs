use crate::array_value::PlorthArray;
use crate::dictionary::Dictionary;
use crate::error::{Error, ErrorKind};
use crate::number::Number;
use crate::object_value::PlorthObject;
use crate::position::Position;
use crate::quote::Quote;
use crate::string_value::PlorthString;
use crate::symbol::Symbol;
use crate::value::Value;
use crate::word::Word;
use indexmap::IndexMap;
use std::cell::RefCell;

/// Per-type prototype objects, built once at startup and shared (via `Rc`
/// inside `PlorthObject`) by every value of that type.
pub struct Prototypes {
    pub array: PlorthObject,
    pub boolean: PlorthObject,
    pub error: PlorthObject,
    pub number: PlorthObject,
    pub object: PlorthObject,
    pub quote: PlorthObject,
    pub string: PlorthObject,
    pub symbol: PlorthObject,
    pub word: PlorthObject,
}

/// The process-wide environment: global dictionary, per-type prototypes,
/// CLI arguments, module search paths and the module cache.
///
/// The global dictionary and the prototypes are built once in `new`/`with_args`
/// and never mutated afterward (user word definitions always land in a
/// `Context`'s *local* dictionary, never here) — only the module cache
/// changes after construction, so it is the sole `RefCell` on this type.
pub struct Runtime {
    global_dictionary: Dictionary,
    prototypes: Prototypes,
    args: Vec<String>,
    module_paths: Vec<String>,
    module_extension: String,
    module_cache: RefCell<IndexMap<String, PlorthObject>>,
}

impl Runtime {
    pub fn new() -> Self {
        Runtime::with_args(Vec::new(), Vec::new())
    }

    pub fn with_args(args: Vec<String>, module_paths: Vec<String>) -> Self {
        let mut global_dictionary = Dictionary::new();
        let prototypes = crate::builtins::install(&mut global_dictionary);

        Runtime {
            global_dictionary,
            prototypes,
            args,
            module_paths,
            module_extension: ".plorth".to_string(),
            module_cache: RefCell::new(IndexMap::new()),
        }
    }

    pub fn global_dictionary(&self) -> &Dictionary {
        &self.global_dictionary
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn module_paths(&self) -> &[String] {
        &self.module_paths
    }

    pub fn module_extension(&self) -> &str {
        &self.module_extension
    }

    // --- prototypes ---------------------------------------------------

    pub fn array_prototype(&self) -> PlorthObject {
        self.prototypes.array.clone()
    }
    pub fn boolean_prototype(&self) -> PlorthObject {
        self.prototypes.boolean.clone()
    }
    pub fn error_prototype(&self) -> PlorthObject {
        self.prototypes.error.clone()
    }
    pub fn number_prototype(&self) -> PlorthObject {
        self.prototypes.number.clone()
    }
    pub fn object_prototype(&self) -> PlorthObject {
        self.prototypes.object.clone()
    }
    pub fn quote_prototype(&self) -> PlorthObject {
        self.prototypes.quote.clone()
    }
    pub fn string_prototype(&self) -> PlorthObject {
        self.prototypes.string.clone()
    }
    pub fn symbol_prototype(&self) -> PlorthObject {
        self.prototypes.symbol.clone()
    }
    pub fn word_prototype(&self) -> PlorthObject {
        self.prototypes.word.clone()
    }

    // --- factories ------------------------------------------------------

    pub fn true_value(&self) -> Value {
        Value::Boolean(true)
    }

    pub fn false_value(&self) -> Value {
        Value::Boolean(false)
    }

    pub fn boolean(&self, b: bool) -> Value {
        Value::Boolean(b)
    }

    pub fn number_int(&self, i: i64) -> Value {
        Value::Number(Number::Int(i))
    }

    pub fn number_real(&self, r: f64) -> Value {
        Value::Number(Number::Real(r))
    }

    pub fn number_text(&self, text: &str) -> Option<Value> {
        Number::parse(text).map(Value::Number)
    }

    pub fn string(&self, text: &str) -> Value {
        Value::String(PlorthString::new(text))
    }

    pub fn array(&self, items: Vec<Value>) -> Value {
        Value::Array(PlorthArray::from_values(items))
    }

    pub fn object(&self, properties: IndexMap<String, Value>) -> Value {
        Value::Object(PlorthObject::from_values(properties))
    }

    pub fn symbol(&self, id: impl Into<String>, position: Option<Position>) -> Value {
        Value::Symbol(Symbol::new(id, position))
    }

    pub fn compiled_quote(&self, values: Vec<Value>) -> Value {
        Value::Quote(Quote::compiled(values, None))
    }

    pub fn native_quote(&self, name: &'static str, callback: impl Fn(&mut crate::context::Context) -> bool + 'static) -> Value {
        Value::Quote(Quote::native(name, callback))
    }

    pub fn word(&self, symbol: Symbol, quote: Quote) -> Value {
        Value::Word(Word::new(symbol, quote))
    }

    pub fn error(&self, kind: ErrorKind, message: impl Into<String>, position: Option<Position>) -> Value {
        Value::Error(Error::new(kind, message, position))
    }

    // --- module cache ---------------------------------------------------

    /// Looks up a resolved path in the module cache. While a module is still
    /// initializing, this returns the empty placeholder object inserted by
    /// `module_cache_insert_placeholder`, so a re-entrant import observes a
    /// partial (empty) view instead of recursing.
    pub fn module_cache_get(&self, path: &str) -> Option<PlorthObject> {
        self.module_cache.borrow().get(path).cloned()
    }

    pub fn module_cache_insert_placeholder(&self, path: &str) {
        self.module_cache
            .borrow_mut()
            .insert(path.to_string(), PlorthObject::empty());
    }

    pub fn module_cache_store(&self, path: &str, module: PlorthObject) {
        self.module_cache.borrow_mut().insert(path.to_string(), module);
    }

    pub fn module_cache_remove(&self, path: &str) {
        self.module_cache.borrow_mut().shift_remove(path);
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new()
    }
}
