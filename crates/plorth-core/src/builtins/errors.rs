use super::reg;
use crate::dictionary::Dictionary;
use crate::error::ErrorKind;
use crate::value::Value;

/// Pops a message, constructs an error of `kind` and fails with it, matching
/// `try`'s expectation that a failed quote leaves an error on the context.
fn raise(ctx: &mut crate::context::Context, kind: ErrorKind) -> bool {
    let Some(message) = ctx.pop_string() else { return false };
    ctx.set_error(kind, message.to_string(), None);
    false
}

pub fn install(dict: &mut Dictionary) {
    reg(dict, "type-error", |ctx| raise(ctx, ErrorKind::Type));
    reg(dict, "value-error", |ctx| raise(ctx, ErrorKind::Value));
    reg(dict, "range-error", |ctx| raise(ctx, ErrorKind::Range));
    reg(dict, "unknown-error", |ctx| raise(ctx, ErrorKind::Unknown));

    reg(dict, "throw", |ctx| {
        let Some(err) = ctx.pop_error() else { return false };
        ctx.set_error_value(err);
        false
    });
}
