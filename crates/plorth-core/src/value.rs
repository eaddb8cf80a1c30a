use crate::array_value::PlorthArray;
use crate::error::Error;
use crate::number::Number;
use crate::object_value::PlorthObject;
use crate::quote::Quote;
use crate::runtime::Runtime;
use crate::string_value::PlorthString;
use crate::symbol::Symbol;
use crate::word::Word;

/// A language value. The absence of a value (`None` wherever a `Val` is
/// expected) represents Plorth's `null`, rather than a dedicated variant.
pub type Val = Option<Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Number(Number),
    String(PlorthString),
    Array(PlorthArray),
    Object(PlorthObject),
    Quote(Quote),
    Symbol(Symbol),
    Word(Word),
    Error(Error),
}

impl Value {
    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Quote(_) => "quote",
            Value::Symbol(_) => "symbol",
            Value::Word(_) => "word",
            Value::Error(_) => "error",
        }
    }

    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.equals(*b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Quote(a), Value::Quote(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Word(a), Value::Word(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a.kind == b.kind && a.message == b.message,
            _ => false,
        }
    }

    pub fn to_string(&self) -> String {
        match self {
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.to_string(),
            Value::Array(a) => format!(
                "[{}]",
                a.iter().map(|v| val_to_string(&v)).collect::<Vec<_>>().join(", ")
            ),
            Value::Object(o) => format!(
                "{{{}}}",
                o.iter()
                    .map(|(k, v)| format!("{k}: {}", val_to_string(v)))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Value::Quote(q) => q.to_string_form(),
            Value::Symbol(s) => s.id.clone(),
            Value::Word(w) => word_to_source(w),
            Value::Error(e) => e.to_source(),
        }
    }

    pub fn to_source(&self) -> String {
        match self {
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.to_source(),
            Value::Array(a) => format!(
                "[{}]",
                a.iter().map(|v| val_to_source(&v)).collect::<Vec<_>>().join(", ")
            ),
            Value::Object(o) => format!(
                "{{{}}}",
                o.iter()
                    .map(|(k, v)| format!("{}: {}", PlorthString::new(k).to_source(), val_to_source(v)))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Value::Quote(q) => q.to_source(),
            Value::Symbol(s) => s.id.clone(),
            Value::Word(w) => word_to_source(w),
            Value::Error(e) => e.to_source(),
        }
    }

    /// Every value's prototype comes from the Runtime's per-type table,
    /// except Object, whose prototype is its own `__proto__` property if
    /// present, else the shared object prototype.
    pub fn prototype(&self, runtime: &Runtime) -> Option<PlorthObject> {
        match self {
            Value::Object(obj) => obj.own_proto().or_else(|| Some(runtime.object_prototype())),
            Value::Boolean(_) => Some(runtime.boolean_prototype()),
            Value::Number(_) => Some(runtime.number_prototype()),
            Value::String(_) => Some(runtime.string_prototype()),
            Value::Array(_) => Some(runtime.array_prototype()),
            Value::Quote(_) => Some(runtime.quote_prototype()),
            Value::Symbol(_) => Some(runtime.symbol_prototype()),
            Value::Word(_) => Some(runtime.word_prototype()),
            Value::Error(_) => Some(runtime.error_prototype()),
        }
    }
}

fn word_to_source(word: &Word) -> String {
    match &word.quote {
        Quote::Compiled { values, .. } => {
            let body = values.iter().map(Value::to_source).collect::<Vec<_>>().join(" ");
            format!(": {} {} ;", word.symbol.id, body)
        }
        Quote::Native { .. } => format!(": {} <native> ;", word.symbol.id),
    }
}

/// `type_tag` for a nullable value slot, where `None` is Plorth's `null`.
pub fn val_type_tag(value: &Val) -> &'static str {
    match value {
        Some(v) => v.type_tag(),
        None => "null",
    }
}

pub fn val_equals(a: &Val, b: &Val) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.equals(b),
        (None, None) => true,
        _ => false,
    }
}

pub fn val_to_string(value: &Val) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}

pub fn val_to_source(value: &Val) -> String {
    match value {
        Some(v) => v.to_source(),
        None => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_equality_never_panics_and_is_reflexive() {
        assert!(val_equals(&None, &None));
        assert!(!val_equals(&None, &Some(Value::Boolean(true))));
    }

    #[test]
    fn boolean_to_source_roundtrips() {
        let v = Value::Boolean(true);
        assert_eq!(v.to_source(), "true");
    }

    #[test]
    fn array_to_source_is_reparseable_shape() {
        let arr = PlorthArray::from_values(vec![Value::Boolean(true), Value::Boolean(false)]);
        let v = Value::Array(arr);
        assert_eq!(v.to_source(), "[true, false]");
    }

    #[test]
    fn array_to_source_renders_null_elements() {
        let arr = PlorthArray::from_vec(vec![Some(Value::Boolean(true)), None]);
        let v = Value::Array(arr);
        assert_eq!(v.to_source(), "[true, null]");
    }
}
