use super::native;
use crate::error::ErrorKind;
use crate::number::Number;
use crate::value::Value;
use indexmap::IndexMap;

fn binary(
    entries: &mut IndexMap<String, Value>,
    name: &'static str,
    op: impl Fn(Number, Number) -> Number + 'static,
) {
    entries.insert(
        name.to_string(),
        native(name, move |ctx| {
            let Some(b) = ctx.pop_number() else { return false };
            let Some(a) = ctx.pop_number() else { return false };
            ctx.push_number(op(a, b));
            true
        }),
    );
}

fn comparison(
    entries: &mut IndexMap<String, Value>,
    name: &'static str,
    op: impl Fn(std::cmp::Ordering) -> bool + 'static,
) {
    entries.insert(
        name.to_string(),
        native(name, move |ctx| {
            let Some(b) = ctx.pop_number() else { return false };
            let Some(a) = ctx.pop_number() else { return false };
            match a.partial_cmp(b) {
                Some(ord) => {
                    ctx.push_boolean(op(ord));
                    true
                }
                None => {
                    ctx.push_boolean(false);
                    true
                }
            }
        }),
    );
}

pub fn entries() -> IndexMap<String, Value> {
    let mut entries = IndexMap::new();

    binary(&mut entries, "+", Number::add);
    binary(&mut entries, "-", Number::sub);
    binary(&mut entries, "*", Number::mul);
    binary(&mut entries, "/", Number::div);
    binary(&mut entries, "%", Number::rem);

    comparison(&mut entries, "<", |ord| ord.is_lt());
    comparison(&mut entries, ">", |ord| ord.is_gt());
    comparison(&mut entries, "<=", |ord| ord.is_le());
    comparison(&mut entries, ">=", |ord| ord.is_ge());

    entries.insert(
        "=".to_string(),
        native("=", |ctx| {
            let Some(b) = ctx.pop_number() else { return false };
            let Some(a) = ctx.pop_number() else { return false };
            ctx.push_boolean(a.equals(b));
            true
        }),
    );
    entries.insert(
        "<>".to_string(),
        native("<>", |ctx| {
            let Some(b) = ctx.pop_number() else { return false };
            let Some(a) = ctx.pop_number() else { return false };
            ctx.push_boolean(!a.equals(b));
            true
        }),
    );

    entries.insert(
        "neg".to_string(),
        native("neg", |ctx| {
            let Some(a) = ctx.pop_number() else { return false };
            ctx.push_number(a.neg());
            true
        }),
    );
    entries.insert(
        "abs".to_string(),
        native("abs", |ctx| {
            let Some(a) = ctx.pop_number() else { return false };
            ctx.push_number(a.abs());
            true
        }),
    );

    entries.insert(
        ">number".to_string(),
        native(">number", |ctx| {
            let Some(s) = ctx.pop_string() else { return false };
            match Number::parse(&s.to_string()) {
                Some(n) => {
                    ctx.push_number(n);
                    true
                }
                None => {
                    ctx.set_error(ErrorKind::Value, format!("Not a number: `{s}'"), None);
                    false
                }
            }
        }),
    );

    entries.insert(
        "nan?".to_string(),
        native("nan?", |ctx| {
            let Some(n) = ctx.pop_number() else { return false };
            ctx.push_boolean(n.as_f64().is_nan());
            true
        }),
    );
    entries.insert(
        "int?".to_string(),
        native("int?", |ctx| {
            let Some(n) = ctx.pop_number() else { return false };
            ctx.push_boolean(!n.is_real());
            true
        }),
    );

    entries
}
