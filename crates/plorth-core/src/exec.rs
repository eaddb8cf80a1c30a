use crate::context::Context;
use crate::error::ErrorKind;
use crate::eval::eval;
use crate::number::Number;
use crate::object_value::PlorthObject;
use crate::value::{Val, Value};

/// Bounds the `__proto__` walk so a user-constructed cycle raises a `type`
/// error instead of looping forever (§9 Design Notes).
pub(crate) const MAX_PROTOTYPE_DEPTH: usize = 1024;

/// Walks `start`'s prototype chain looking for a property named `id`. A
/// non-object `__proto__` terminates the walk as if it were absent (the
/// resolved Open Question in §9). The outer `Option` distinguishes "not
/// found" (`None`) from "found" (`Some`); the inner `Val` is the property's
/// own value, which may itself be `null`. Returns `Err(())` if the chain
/// exceeds `MAX_PROTOTYPE_DEPTH`, which the caller reports as a `type` error.
pub fn walk_prototype_chain(start: &PlorthObject, id: &str) -> Result<Option<Val>, ()> {
    let mut current = start.clone();
    for _ in 0..MAX_PROTOTYPE_DEPTH {
        if let Some(value) = current.get(id) {
            return Ok(Some(value.clone()));
        }
        match current.get("__proto__") {
            Some(Some(Value::Object(next))) => current = next.clone(),
            _ => return Ok(None),
        }
    }
    Err(())
}

/// Drives the interpreter by the effect of `value`: pushes literals, resolves
/// and calls words for symbols, and installs word definitions into the
/// local dictionary. Returns `false` on failure, with the error already set.
pub fn exec(ctx: &mut Context, value: &Value) -> bool {
    match value {
        Value::Symbol(sym) => exec_symbol(ctx, sym),
        Value::Word(word) => {
            ctx.local_dictionary_mut()
                .insert(crate::word::Word::new(word.symbol.clone(), word.quote.clone()));
            true
        }
        other => match eval(ctx, other) {
            Some(result) => {
                ctx.push(result);
                true
            }
            None => false,
        },
    }
}

fn exec_symbol(ctx: &mut Context, sym: &crate::symbol::Symbol) -> bool {
    if let Some(position) = &sym.position {
        ctx.set_position(position.clone());
    }

    if let Some(Some(top)) = ctx.peek() {
        let top = top.clone();
        if let Some(prototype) = top.prototype(&ctx.runtime) {
            match walk_prototype_chain(&prototype, &sym.id) {
                Ok(Some(Some(Value::Quote(quote)))) => return quote.call(ctx),
                Ok(Some(found)) => {
                    ctx.push(found);
                    return true;
                }
                Ok(None) => {}
                Err(()) => {
                    tracing::debug!(id = %sym.id, "prototype walk exceeded MAX_PROTOTYPE_DEPTH");
                    ctx.set_error(
                        ErrorKind::Type,
                        "Maximum prototype chain depth exceeded.",
                        None,
                    );
                    return false;
                }
            }
        }
    }

    if let Some(word) = ctx.local_dictionary().find(&sym.id) {
        let quote = word.quote.clone();
        return quote.call(ctx);
    }

    if let Some(word) = ctx.runtime.global_dictionary().find(&sym.id) {
        let quote = word.quote.clone();
        return quote.call(ctx);
    }

    if let Some(n) = Number::parse(&sym.id) {
        tracing::trace!(id = %sym.id, "word resolution fell through to number parsing");
        ctx.push_number(n);
        return true;
    }

    ctx.set_error(
        ErrorKind::Reference,
        format!("Unrecognized word: `{}'", sym.id),
        None,
    );
    false
}
