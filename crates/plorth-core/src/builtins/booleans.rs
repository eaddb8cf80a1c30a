use super::reg;
use crate::dictionary::Dictionary;
use crate::exec::MAX_PROTOTYPE_DEPTH;
use crate::object_value::PlorthObject;
use crate::value::{val_equals, val_to_source, val_to_string, Val, Value};

/// Generic type tests, conversions and structural equality. None of these
/// belong to a single type's prototype, so (matching the reference
/// implementation) they are global words that peek at whatever Rust variant
/// (or `null`) is on top of the stack.
pub fn install(dict: &mut Dictionary) {
    for (name, tag) in [
        ("boolean?", "boolean"),
        ("number?", "number"),
        ("string?", "string"),
        ("array?", "array"),
        ("object?", "object"),
        ("quote?", "quote"),
        ("symbol?", "symbol"),
        ("word?", "word"),
        ("error?", "error"),
        ("null?", "null"),
    ] {
        reg(dict, name, move |ctx| {
            let Some(value) = ctx.pop() else { return false };
            let matches = crate::value::val_type_tag(&value) == tag;
            ctx.push(value);
            ctx.push_boolean(matches);
            true
        });
    }

    reg(dict, "typeof", |ctx| {
        let Some(value) = ctx.pop() else { return false };
        let tag = crate::value::val_type_tag(&value);
        ctx.push(value);
        ctx.push_string(tag);
        true
    });

    reg(dict, "proto", |ctx| {
        let Some(value) = ctx.pop() else { return false };
        let proto = value.as_ref().and_then(|v| v.prototype(&ctx.runtime));
        ctx.push(value);
        match proto {
            Some(p) => ctx.push_object(p),
            None => ctx.push_null(),
        }
        true
    });

    reg(dict, "instance-of?", |ctx| {
        let Some(constructor) = ctx.pop_object() else { return false };
        let Some(value) = ctx.pop() else { return false };
        let is_instance = is_instance_of(&value, &constructor, &ctx.runtime);
        ctx.push(value);
        ctx.push_boolean(is_instance);
        true
    });

    reg(dict, ">boolean", |ctx| {
        let Some(value) = ctx.pop() else { return false };
        let b = match &value {
            Some(Value::Boolean(b)) => *b,
            Some(_) => true,
            None => false,
        };
        ctx.push_boolean(b);
        true
    });

    reg(dict, ">string", |ctx| {
        let Some(value) = ctx.pop() else { return false };
        ctx.push_string(val_to_string(&value));
        true
    });

    reg(dict, ">source", |ctx| {
        let Some(value) = ctx.pop() else { return false };
        ctx.push_string(val_to_source(&value));
        true
    });

    reg(dict, "=", |ctx| {
        let Some(a) = ctx.pop() else { return false };
        let Some(b) = ctx.pop() else { return false };
        ctx.push_boolean(val_equals(&a, &b));
        true
    });

    reg(dict, "!=", |ctx| {
        let Some(a) = ctx.pop() else { return false };
        let Some(b) = ctx.pop() else { return false };
        ctx.push_boolean(!val_equals(&a, &b));
        true
    });
}

/// Tests whether `value`'s own prototype, or any ancestor reached by walking
/// `__proto__`, equals `constructor`'s `prototype` property — the contract
/// established by `install_type_constants`'s `NAME { prototype: … }` holders.
fn is_instance_of(value: &Val, constructor: &PlorthObject, runtime: &crate::runtime::Runtime) -> bool {
    let Some(Some(Value::Object(target))) = constructor.get("prototype") else {
        return false;
    };
    let Some(value) = value else { return false };
    let Some(mut current) = value.prototype(runtime) else {
        return false;
    };
    for _ in 0..MAX_PROTOTYPE_DEPTH {
        if &current == target {
            return true;
        }
        match current.own_proto() {
            Some(next) => current = next,
            None => return false,
        }
    }
    false
}
