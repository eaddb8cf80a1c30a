use super::{native, reg};
use crate::dictionary::Dictionary;
use crate::error::ErrorKind;
use crate::number::Number;
use crate::string_value::PlorthString;
use crate::value::Value;
use indexmap::IndexMap;

/// Prototype methods: single operand (the receiver), dispatched through
/// `exec`'s top-of-stack lookup (§4.F step 1).
pub fn entries() -> IndexMap<String, Value> {
    let mut entries = IndexMap::new();

    entries.insert(
        "length".to_string(),
        native("length", |ctx| {
            let Some(s) = ctx.pop_string() else { return false };
            ctx.push_int(s.len() as i64);
            true
        }),
    );

    entries.insert(
        "reverse".to_string(),
        native("reverse", |ctx| {
            let Some(s) = ctx.pop_string() else { return false };
            ctx.push_value(Value::String(s.reversed()));
            true
        }),
    );

    entries.insert(
        "+".to_string(),
        native("+", |ctx| {
            let Some(b) = ctx.pop_string() else { return false };
            let Some(a) = ctx.pop_string() else { return false };
            ctx.push_value(Value::String(a.concat(&b)));
            true
        }),
    );

    entries
}

/// Two-operand indexed/keyed words, where the operand roles differ and the
/// container is written first (§4.I note on calling convention): global
/// words rather than prototype methods, matching `[] 0 @` / `{} "k" @`.
pub fn install(dict: &mut Dictionary) {
    reg(dict, "@", |ctx| {
        let Some(index) = ctx.pop_number() else { return false };
        let Some(s) = ctx.pop_string() else { return false };
        let len = s.len() as i64;
        let mut i = index.to_int_truncating();
        if i < 0 {
            i += len;
        }
        if i < 0 || i >= len {
            ctx.set_error(ErrorKind::Range, "String index out of bounds.", None);
            return false;
        }
        let ch = s.char_at(i as usize).expect("index within bounds");
        ctx.push_string(ch.to_string());
        true
    });

    reg(dict, "includes?", |ctx| {
        let Some(needle) = ctx.pop_string() else { return false };
        let Some(haystack) = ctx.pop_string() else { return false };
        let found = haystack.contains(&needle);
        ctx.push_boolean(found);
        true
    });

    reg(dict, "index-of", |ctx| {
        let Some(needle) = ctx.pop_string() else { return false };
        let Some(haystack) = ctx.pop_string() else { return false };
        match haystack.find(&needle) {
            Some(index) => ctx.push_number(Number::Int(index as i64)),
            None => ctx.push_number(Number::Int(-1)),
        }
        true
    });

    reg(dict, "split", |ctx| {
        let Some(sep) = ctx.pop_string() else { return false };
        let Some(s) = ctx.pop_string() else { return false };
        let parts = s.split(&sep);
        let values = parts.into_iter().map(Value::String).collect();
        ctx.push_value(Value::Array(crate::array_value::PlorthArray::from_values(values)));
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::runtime::Runtime;
    use std::rc::Rc;

    fn ctx() -> Context {
        Context::new(Rc::new(Runtime::new()))
    }

    fn run(c: &mut Context, word: &str) -> bool {
        let quote = c.runtime.global_dictionary().find(word).unwrap().quote.clone();
        quote.call(c)
    }

    #[test]
    fn indexed_access_matches_container_first_calling_convention() {
        let mut c = ctx();
        c.push_string("hello");
        c.push_int(1);
        assert!(run(&mut c, "@"));
        assert_eq!(c.pop(), Some(Some(Value::String(PlorthString::new("e")))));
    }

    #[test]
    fn empty_string_index_is_range_error() {
        let mut c = ctx();
        c.push_string("");
        c.push_int(0);
        assert!(!run(&mut c, "@"));
        assert_eq!(c.error().unwrap().kind, ErrorKind::Range);
    }

    #[test]
    fn includes_and_index_of() {
        let mut c = ctx();
        c.push_string("foobar");
        c.push_string("bar");
        assert!(run(&mut c, "includes?"));
        assert_eq!(c.pop(), Some(Some(Value::Boolean(true))));

        c.push_string("foobar");
        c.push_string("baz");
        assert!(run(&mut c, "index-of"));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(-1)))));
    }

    #[test]
    fn length_is_prototype_method_on_top_of_stack() {
        let mut c = ctx();
        c.push_string("hello");
        let method = entries().get("length").unwrap().clone();
        if let Value::Quote(q) = method {
            assert!(q.call(&mut c));
        }
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(5)))));
    }
}
