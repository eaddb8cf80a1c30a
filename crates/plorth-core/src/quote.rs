use crate::context::Context;
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

type NativeFn = dyn Fn(&mut Context) -> bool;

/// Executable code: either a compiled sequence of token values produced by
/// the parser, or a native callback supplied by the host (built-in words).
#[derive(Clone)]
pub enum Quote {
    Compiled {
        values: Rc<Vec<Value>>,
        filename: Option<String>,
    },
    Native {
        name: &'static str,
        callback: Rc<NativeFn>,
    },
}

impl Quote {
    pub fn compiled(values: Vec<Value>, filename: Option<String>) -> Self {
        Quote::Compiled {
            values: Rc::new(values),
            filename,
        }
    }

    pub fn native(name: &'static str, callback: impl Fn(&mut Context) -> bool + 'static) -> Self {
        Quote::Native {
            name,
            callback: Rc::new(callback),
        }
    }

    /// Runs the quote against `ctx`. A compiled quote executes each element
    /// via `exec` in order and stops at the first failure; a native quote
    /// simply invokes its callback.
    pub fn call(&self, ctx: &mut Context) -> bool {
        match self {
            Quote::Compiled { values, filename } => {
                let previous_filename = ctx.filename.clone();
                if filename.is_some() {
                    ctx.filename = filename.clone();
                }
                let mut ok = true;
                for value in values.iter() {
                    if !crate::exec::exec(ctx, value) {
                        ok = false;
                        break;
                    }
                }
                ctx.filename = previous_filename;
                ok
            }
            Quote::Native { callback, .. } => callback(ctx),
        }
    }

    pub fn to_source(&self) -> String {
        match self {
            Quote::Compiled { values, .. } => {
                let joined = values
                    .iter()
                    .map(Value::to_source)
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("( {joined} )")
            }
            Quote::Native { .. } => "<quote: native>".to_string(),
        }
    }

    pub fn to_string_form(&self) -> String {
        self.to_source()
    }
}

impl PartialEq for Quote {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Quote::Compiled { values: a, .. }, Quote::Compiled { values: b, .. }) => a == b,
            (Quote::Native { callback: a, .. }, Quote::Native { callback: b, .. }) => {
                Rc::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quote::Compiled { values, .. } => {
                f.debug_struct("Quote::Compiled").field("values", values).finish()
            }
            Quote::Native { name, .. } => f.debug_struct("Quote::Native").field("name", name).finish(),
        }
    }
}
