use super::{native, reg};
use crate::array_value::PlorthArray;
use crate::dictionary::Dictionary;
use crate::error::ErrorKind;
use crate::value::Value;
use indexmap::IndexMap;

/// Prototype methods: single operand (the receiver).
pub fn entries() -> IndexMap<String, Value> {
    let mut entries = IndexMap::new();

    entries.insert(
        "length".to_string(),
        native("length", |ctx| {
            let Some(a) = ctx.pop_array() else { return false };
            ctx.push_int(a.len() as i64);
            true
        }),
    );

    entries.insert(
        "reverse".to_string(),
        native("reverse", |ctx| {
            let Some(a) = ctx.pop_array() else { return false };
            ctx.push_value(Value::Array(a.reversed()));
            true
        }),
    );

    entries.insert(
        "+".to_string(),
        native("+", |ctx| {
            let Some(b) = ctx.pop_array() else { return false };
            let Some(a) = ctx.pop_array() else { return false };
            ctx.push_value(Value::Array(a.concat(&b)));
            true
        }),
    );

    entries.insert(
        "pop".to_string(),
        native("pop", |ctx| {
            let Some(a) = ctx.pop_array() else { return false };
            match a.pop() {
                Some((rest, last)) => {
                    ctx.push_value(Value::Array(rest));
                    ctx.push(last);
                    true
                }
                None => {
                    ctx.push_value(Value::Array(a));
                    ctx.set_error(ErrorKind::Range, "Array is empty.", None);
                    false
                }
            }
        }),
    );

    entries
}

/// Two-operand words: global, container written first in source
/// (`[1, 2, 3] 0 @`), matching §8's `[] 0 @` example. `for-each`/`map`/
/// `filter` take a quote as their last operand, so they belong here rather
/// than in `entries()`: the quote, not the array, is on top of the stack at
/// call time, which is where prototype dispatch would look.
pub fn install(dict: &mut Dictionary) {
    reg(dict, "@", |ctx| {
        let Some(index) = ctx.pop_number() else { return false };
        let Some(a) = ctx.pop_array() else { return false };
        let len = a.len() as i64;
        let mut i = index.to_int_truncating();
        if i < 0 {
            i += len;
        }
        if len == 0 || i < 0 || i >= len {
            ctx.push_value(Value::Array(a));
            ctx.set_error(ErrorKind::Range, "Array index out of bounds.", None);
            return false;
        }
        let element = a.get(i as usize).expect("index within bounds");
        ctx.push_value(Value::Array(a));
        ctx.push(element);
        true
    });

    reg(dict, "push", |ctx| {
        let Some(value) = ctx.pop() else { return false };
        let Some(a) = ctx.pop_array() else { return false };
        ctx.push_value(Value::Array(a.push(value)));
        true
    });

    reg(dict, "includes?", |ctx| {
        let Some(needle) = ctx.pop() else { return false };
        let Some(a) = ctx.pop_array() else { return false };
        let found = a.iter().any(|v| crate::value::val_equals(&v, &needle));
        ctx.push_boolean(found);
        true
    });

    reg(dict, "for-each", |ctx| {
        let Some(quo) = ctx.pop_quote() else { return false };
        let Some(a) = ctx.pop_array() else { return false };
        for element in a.iter() {
            ctx.push(element);
            if !quo.call(ctx) {
                return false;
            }
        }
        true
    });

    reg(dict, "map", |ctx| {
        let Some(quo) = ctx.pop_quote() else { return false };
        let Some(a) = ctx.pop_array() else { return false };
        let mut mapped = Vec::with_capacity(a.len());
        for element in a.iter() {
            ctx.push(element);
            if !quo.call(ctx) {
                return false;
            }
            let Some(result) = ctx.pop() else { return false };
            mapped.push(result);
        }
        ctx.push_value(Value::Array(PlorthArray::from_vec(mapped)));
        true
    });

    reg(dict, "filter", |ctx| {
        let Some(quo) = ctx.pop_quote() else { return false };
        let Some(a) = ctx.pop_array() else { return false };
        let mut kept = Vec::new();
        for element in a.iter() {
            ctx.push(element.clone());
            if !quo.call(ctx) {
                return false;
            }
            let Some(matched) = ctx.pop_boolean() else { return false };
            if matched {
                kept.push(element);
            }
        }
        ctx.push_value(Value::Array(PlorthArray::from_vec(kept)));
        true
    });
}
