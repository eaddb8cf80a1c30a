use crate::array_value::PlorthArray;
use crate::context::Context;
use crate::error::ErrorKind;
use crate::number::Number;
use crate::object_value::PlorthObject;
use crate::value::{Val, Value};
use indexmap::IndexMap;

/// Produces the value that `value` denotes when used as a literal. Returns
/// `None` on failure (the error has already been set on `ctx`); a successful
/// evaluation may still yield `null` (`Some(None)`).
pub fn eval(ctx: &mut Context, value: &Value) -> Option<Val> {
    match value {
        Value::Boolean(_)
        | Value::Number(_)
        | Value::String(_)
        | Value::Error(_)
        | Value::Quote(_) => Some(Some(value.clone())),

        Value::Array(arr) => {
            let mut out = Vec::with_capacity(arr.len());
            for element in arr.iter() {
                // `element` is itself an AST node (e.g. `Symbol("null")`,
                // never a bare `None`), so this only fails if evaluating it
                // fails; the evaluated result may legitimately be `null`.
                let evaluated = eval(ctx, &element.expect("array literal elements are always present"))?;
                out.push(evaluated);
            }
            Some(Some(Value::Array(PlorthArray::from_vec(out))))
        }

        Value::Object(obj) => {
            let mut out = IndexMap::new();
            for (key, val) in obj.iter() {
                let evaluated = eval(ctx, &val.clone().expect("object literal values are always present"))?;
                out.insert(key.clone(), evaluated);
            }
            Some(Some(Value::Object(PlorthObject::new(out))))
        }

        Value::Symbol(sym) => match sym.id.as_str() {
            "null" => Some(None),
            "true" => Some(Some(Value::Boolean(true))),
            "false" => Some(Some(Value::Boolean(false))),
            "drop" => ctx.pop(),
            id => {
                if let Some(n) = Number::parse(id) {
                    Some(Some(Value::Number(n)))
                } else {
                    ctx.set_error(
                        ErrorKind::Syntax,
                        format!("Unexpected '{id}'; Missing value."),
                        sym.position.clone(),
                    );
                    None
                }
            }
        },

        Value::Word(_) => {
            ctx.set_error(
                ErrorKind::Syntax,
                "Unexpected word declaration; Missing value.",
                None,
            );
            None
        }
    }
}
