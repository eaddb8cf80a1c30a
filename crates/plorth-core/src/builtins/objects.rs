use super::{native, reg};
use crate::array_value::PlorthArray;
use crate::dictionary::Dictionary;
use crate::error::ErrorKind;
use crate::object_value::PlorthObject;
use crate::value::Value;
use indexmap::IndexMap;

/// Prototype methods: single operand (the receiver).
pub fn entries() -> IndexMap<String, Value> {
    let mut entries = IndexMap::new();

    entries.insert(
        "length".to_string(),
        native("length", |ctx| {
            let Some(o) = ctx.pop_object() else { return false };
            ctx.push_int(o.len() as i64);
            true
        }),
    );

    entries.insert(
        "keys".to_string(),
        native("keys", |ctx| {
            let Some(o) = ctx.pop_object() else { return false };
            let keys = o.keys().map(|k| Value::String(crate::string_value::PlorthString::new(k))).collect();
            ctx.push_value(Value::Array(PlorthArray::from_values(keys)));
            true
        }),
    );

    entries.insert(
        "values".to_string(),
        native("values", |ctx| {
            let Some(o) = ctx.pop_object() else { return false };
            let values = o.values().cloned().collect();
            ctx.push_value(Value::Array(PlorthArray::from_vec(values)));
            true
        }),
    );

    entries.insert(
        "+".to_string(),
        native("+", |ctx| {
            let Some(b) = ctx.pop_object() else { return false };
            let Some(a) = ctx.pop_object() else { return false };
            ctx.push_value(Value::Object(a.concat(&b)));
            true
        }),
    );

    entries.insert(
        "new".to_string(),
        native("new", |ctx| {
            let Some(prototype) = ctx.pop_object() else { return false };
            let instance = PlorthObject::empty().set("__proto__", Some(Value::Object(prototype)));
            ctx.push_value(Value::Object(instance));
            true
        }),
    );

    entries
}

/// Two-operand indexed/keyed words: global words, container written first
/// in source (`{} "k" @`), matching §8's `{} "k" @` example.
pub fn install(dict: &mut Dictionary) {
    reg(dict, "has?", |ctx| {
        let Some(key) = ctx.pop_string() else { return false };
        let Some(o) = ctx.pop_object() else { return false };
        let found = o.has(&key.to_string());
        ctx.push_boolean(found);
        true
    });

    reg(dict, "@", |ctx| {
        let Some(key) = ctx.pop_string() else { return false };
        let Some(o) = ctx.pop_object() else { return false };
        let key = key.to_string();
        match o.get(&key).cloned() {
            Some(value) => {
                ctx.push_value(Value::Object(o));
                ctx.push(value);
                true
            }
            None => {
                ctx.push_value(Value::Object(o));
                ctx.set_error(ErrorKind::Range, format!("No such property: `{key}'"), None);
                false
            }
        }
    });

    reg(dict, "!", |ctx| {
        // Push order is `obj any str`, so the key is on top, the value
        // below it, and the object at the bottom.
        let Some(key) = ctx.pop_string() else { return false };
        let Some(value) = ctx.pop() else { return false };
        let Some(o) = ctx.pop_object() else { return false };
        ctx.push_value(Value::Object(o.set(key.to_string(), value)));
        true
    });

    reg(dict, "delete", |ctx| {
        let Some(key) = ctx.pop_string() else { return false };
        let Some(o) = ctx.pop_object() else { return false };
        let key_text = key.to_string();
        match o.delete(&key_text) {
            Some(next) => {
                ctx.push_value(Value::Object(next));
                true
            }
            None => {
                ctx.push_value(Value::Object(o));
                ctx.set_error(ErrorKind::Range, format!("No such property: `{key_text}'"), None);
                false
            }
        }
    });
}
