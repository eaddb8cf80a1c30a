use super::reg;
use crate::dictionary::Dictionary;

pub fn install(dict: &mut Dictionary) {
    reg(dict, "nop", |_ctx| true);

    reg(dict, "clear", |ctx| {
        ctx.clear();
        true
    });

    reg(dict, "depth", |ctx| {
        let depth = ctx.size() as i64;
        ctx.push_int(depth);
        true
    });

    reg(dict, "drop", |ctx| ctx.pop().is_some());

    reg(dict, "2drop", |ctx| ctx.pop().is_some() && ctx.pop().is_some());

    reg(dict, "dup", |ctx| {
        let Some(top) = ctx.pop() else { return false };
        ctx.push(top.clone());
        ctx.push(top);
        true
    });

    reg(dict, "2dup", |ctx| {
        let Some(b) = ctx.pop() else { return false };
        let Some(a) = ctx.pop() else { return false };
        ctx.push(a.clone());
        ctx.push(b.clone());
        ctx.push(a);
        ctx.push(b);
        true
    });

    reg(dict, "nip", |ctx| {
        let Some(b) = ctx.pop() else { return false };
        let Some(_a) = ctx.pop() else { return false };
        ctx.push(b);
        true
    });

    reg(dict, "over", |ctx| {
        let Some(b) = ctx.pop() else { return false };
        let Some(a) = ctx.pop() else { return false };
        ctx.push(a.clone());
        ctx.push(b);
        ctx.push(a);
        true
    });

    reg(dict, "rot", |ctx| {
        let Some(c) = ctx.pop() else { return false };
        let Some(b) = ctx.pop() else { return false };
        let Some(a) = ctx.pop() else { return false };
        ctx.push(b);
        ctx.push(c);
        ctx.push(a);
        true
    });

    reg(dict, "swap", |ctx| {
        let Some(b) = ctx.pop() else { return false };
        let Some(a) = ctx.pop() else { return false };
        ctx.push(b);
        ctx.push(a);
        true
    });

    reg(dict, "tuck", |ctx| {
        let Some(b) = ctx.pop() else { return false };
        let Some(a) = ctx.pop() else { return false };
        ctx.push(b.clone());
        ctx.push(a);
        ctx.push(b);
        true
    });
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::number::Number;
    use crate::runtime::Runtime;
    use crate::value::Value;
    use std::rc::Rc;

    fn ctx() -> Context {
        Context::new(Rc::new(Runtime::new()))
    }

    fn run(c: &mut Context, word: &str) -> bool {
        let quote = c.runtime.global_dictionary().find(word).unwrap().quote.clone();
        quote.call(c)
    }

    #[test]
    fn swap_exchanges_top_two() {
        let mut c = ctx();
        c.push_int(1);
        c.push_int(2);
        assert!(run(&mut c, "swap"));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(1)))));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(2)))));
    }

    #[test]
    fn dup_on_empty_stack_sets_error() {
        let mut c = ctx();
        assert!(!run(&mut c, "dup"));
        assert!(c.has_error());
    }

    #[test]
    fn rot_rotates_three_values() {
        let mut c = ctx();
        c.push_int(1);
        c.push_int(2);
        c.push_int(3);
        assert!(run(&mut c, "rot"));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(1)))));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(3)))));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(2)))));
    }
}
