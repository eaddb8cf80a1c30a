use super::native;
use crate::quote::Quote;
use crate::value::Value;
use indexmap::IndexMap;

/// Prototype methods: single operand (the receiver quote is always pushed
/// last, so dispatch through `exec`'s top-of-stack lookup works unmodified).
pub fn entries() -> IndexMap<String, Value> {
    let mut entries = IndexMap::new();

    entries.insert(
        "call".to_string(),
        native("call", |ctx| {
            let Some(q) = ctx.pop_quote() else { return false };
            q.call(ctx)
        }),
    );

    entries.insert(
        "compose".to_string(),
        native("compose", |ctx| {
            let Some(right) = ctx.pop_quote() else { return false };
            let Some(left) = ctx.pop_quote() else { return false };
            ctx.push_value(Value::Quote(Quote::native("composed", move |ctx| {
                left.call(ctx) && right.call(ctx)
            })));
            true
        }),
    );

    entries.insert(
        "curry".to_string(),
        native("curry", |ctx| {
            let Some(quo) = ctx.pop_quote() else { return false };
            let Some(argument) = ctx.pop() else { return false };
            ctx.push_value(Value::Quote(Quote::native("curried", move |ctx| {
                ctx.push(argument.clone());
                quo.call(ctx)
            })));
            true
        }),
    );

    entries.insert(
        "negate".to_string(),
        native("negate", |ctx| {
            let Some(quo) = ctx.pop_quote() else { return false };
            ctx.push_value(Value::Quote(Quote::native("negated", move |ctx| {
                if !quo.call(ctx) {
                    return false;
                }
                let Some(result) = ctx.pop_boolean() else { return false };
                ctx.push_boolean(!result);
                true
            })));
            true
        }),
    );

    entries.insert(
        "dip".to_string(),
        native("dip", |ctx| {
            let Some(quo) = ctx.pop_quote() else { return false };
            let Some(val) = ctx.pop() else { return false };
            if !quo.call(ctx) {
                return false;
            }
            ctx.push(val);
            true
        }),
    );

    entries.insert(
        "2dip".to_string(),
        native("2dip", |ctx| {
            let Some(quo) = ctx.pop_quote() else { return false };
            let Some(val2) = ctx.pop() else { return false };
            let Some(val1) = ctx.pop() else { return false };
            if !quo.call(ctx) {
                return false;
            }
            ctx.push(val1);
            ctx.push(val2);
            true
        }),
    );

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::number::Number;
    use crate::runtime::Runtime;
    use std::rc::Rc;

    fn ctx() -> Context {
        Context::new(Rc::new(Runtime::new()))
    }

    fn method(name: &str) -> Quote {
        match entries().get(name).unwrap().clone() {
            Value::Quote(q) => q,
            _ => panic!("expected quote"),
        }
    }

    fn push_num(c: &mut Context, n: i64) {
        c.push_value(Value::Number(Number::Int(n)));
    }

    #[test]
    fn call_invokes_the_quote() {
        let mut c = ctx();
        let q = Quote::native("pushes-one", |ctx| {
            ctx.push_value(Value::Number(Number::Int(1)));
            true
        });
        c.push_value(Value::Quote(q));
        assert!(method("call").call(&mut c));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(1)))));
    }

    #[test]
    fn compose_runs_both_quotes_in_sequence() {
        let mut c = ctx();
        let left = Quote::native("push-a", |ctx| {
            push_num(ctx, 1);
            true
        });
        let right = Quote::native("push-b", |ctx| {
            push_num(ctx, 2);
            true
        });
        c.push_value(Value::Quote(left));
        c.push_value(Value::Quote(right));
        assert!(method("compose").call(&mut c));
        let Some(Some(Value::Quote(composed))) = c.pop() else {
            panic!("expected quote");
        };
        assert!(composed.call(&mut c));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(2)))));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(1)))));
    }

    #[test]
    fn curry_pushes_argument_before_calling() {
        let mut c = ctx();
        let quo = Quote::native("identity", |_ctx| true);
        push_num(&mut c, 42);
        c.push_value(Value::Quote(quo));
        assert!(method("curry").call(&mut c));
        let Some(Some(Value::Quote(curried))) = c.pop() else {
            panic!("expected quote");
        };
        assert!(curried.call(&mut c));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(42)))));
    }

    #[test]
    fn negate_flips_boolean_result() {
        let mut c = ctx();
        let quo = Quote::native("push-true", |ctx| {
            ctx.push_boolean(true);
            true
        });
        c.push_value(Value::Quote(quo));
        assert!(method("negate").call(&mut c));
        let Some(Some(Value::Quote(negated))) = c.pop() else {
            panic!("expected quote");
        };
        assert!(negated.call(&mut c));
        assert_eq!(c.pop(), Some(Some(Value::Boolean(false))));
    }

    #[test]
    fn dip_hides_then_restores_value() {
        let mut c = ctx();
        let quo = Quote::native("push-two", |ctx| {
            push_num(ctx, 2);
            true
        });
        push_num(&mut c, 1);
        c.push_value(Value::Quote(quo));
        assert!(method("dip").call(&mut c));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(1)))));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(2)))));
    }

    #[test]
    fn two_dip_hides_then_restores_both_values() {
        let mut c = ctx();
        let quo = Quote::native("push-three", |ctx| {
            push_num(ctx, 3);
            true
        });
        push_num(&mut c, 1);
        push_num(&mut c, 2);
        c.push_value(Value::Quote(quo));
        assert!(method("2dip").call(&mut c));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(2)))));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(1)))));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(3)))));
    }
}
