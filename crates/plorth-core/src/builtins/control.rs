use super::reg;
use crate::dictionary::Dictionary;
use crate::value::Value;

/// Global control-flow words. None of these are type-specific, so none of
/// them belong on a prototype.
pub fn install(dict: &mut Dictionary) {
    reg(dict, "if", |ctx| {
        let Some(quo) = ctx.pop_quote() else { return false };
        let Some(condition) = ctx.pop_boolean() else { return false };
        if condition {
            return quo.call(ctx);
        }
        true
    });

    reg(dict, "if-else", |ctx| {
        let Some(else_quo) = ctx.pop_quote() else { return false };
        let Some(then_quo) = ctx.pop_quote() else { return false };
        let Some(condition) = ctx.pop_boolean() else { return false };
        if condition { then_quo.call(ctx) } else { else_quo.call(ctx) }
    });

    reg(dict, "while", |ctx| {
        let Some(body) = ctx.pop_quote() else { return false };
        let Some(test) = ctx.pop_quote() else { return false };
        loop {
            if !test.call(ctx) {
                return false;
            }
            let Some(again) = ctx.pop_boolean() else { return false };
            if !again {
                return true;
            }
            if !body.call(ctx) {
                return false;
            }
        }
    });

    reg(dict, "try", |ctx| {
        let Some(catch_quo) = ctx.pop_quote() else { return false };
        let Some(try_quo) = ctx.pop_quote() else { return false };
        if !try_quo.call(ctx) {
            let err = ctx.clear_error().expect("a failed quote leaves an error set");
            ctx.push_value(Value::Error(err));
            return catch_quo.call(ctx);
        }
        true
    });

    reg(dict, "try-else", |ctx| {
        let Some(else_quo) = ctx.pop_quote() else { return false };
        let Some(catch_quo) = ctx.pop_quote() else { return false };
        let Some(try_quo) = ctx.pop_quote() else { return false };
        if !try_quo.call(ctx) {
            let err = ctx.clear_error().expect("a failed quote leaves an error set");
            ctx.push_value(Value::Error(err));
            catch_quo.call(ctx)
        } else {
            else_quo.call(ctx)
        }
    });
}
