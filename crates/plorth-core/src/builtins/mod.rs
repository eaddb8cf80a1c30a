//! Standard library subset: native quotes installed into the global
//! dictionary and into each per-type prototype object.
//!
//! This is a tested, representative subset of the full catalogue described
//! in the data model (§4.I); the native-quote mechanism it is built on
//! supports the whole catalogue, so growing it never requires core changes.

mod arithmetic;
mod arrays;
mod booleans;
mod control;
mod errors;
mod objects;
mod quotes;
mod reflection;
mod stack_ops;
mod strings;

use crate::dictionary::Dictionary;
use crate::object_value::PlorthObject;
use crate::quote::Quote;
use crate::runtime::Prototypes;
use crate::symbol::Symbol;
use crate::value::Value;
use crate::word::Word;
use indexmap::IndexMap;

fn reg(dict: &mut Dictionary, name: &'static str, f: impl Fn(&mut crate::context::Context) -> bool + 'static) {
    dict.insert(Word::new(Symbol::new(name, None), Quote::native(name, f)));
}

fn native(name: &'static str, f: impl Fn(&mut crate::context::Context) -> bool + 'static) -> Value {
    Value::Quote(Quote::native(name, f))
}

fn prototype_of(entries: IndexMap<String, Value>) -> PlorthObject {
    PlorthObject::from_values(entries)
}

pub fn install(global: &mut Dictionary) -> Prototypes {
    stack_ops::install(global);
    control::install(global);
    errors::install(global);
    reflection::install(global);
    booleans::install(global);
    arrays::install(global);
    objects::install(global);
    strings::install(global);

    let object = prototype_of(objects::entries());
    let array = prototype_of(arrays::entries());
    let string = prototype_of(strings::entries());
    let number = prototype_of(arithmetic::entries());
    let quote = prototype_of(quotes::entries());
    let boolean = PlorthObject::empty();
    let symbol = PlorthObject::empty();
    let word = PlorthObject::empty();
    let error = PlorthObject::empty();

    install_type_constants(
        global,
        &object,
        &[
            ("array", &array),
            ("boolean", &boolean),
            ("error", &error),
            ("number", &number),
            ("object", &object),
            ("quote", &quote),
            ("string", &string),
            ("symbol", &symbol),
            ("word", &word),
        ],
    );

    Prototypes {
        array,
        boolean,
        error,
        number,
        object,
        quote,
        string,
        symbol,
        word,
    }
}

/// Installs `NAME { __proto__: object-prototype, prototype: <name-prototype> }`
/// for each per-type prototype, per §4.I, so user code can introduce new
/// instances with `new`.
fn install_type_constants(
    global: &mut Dictionary,
    object_prototype: &PlorthObject,
    prototypes: &[(&'static str, &PlorthObject)],
) {
    for (name, prototype) in prototypes {
        let mut props = IndexMap::new();
        props.insert("__proto__".to_string(), Some(Value::Object(object_prototype.clone())));
        props.insert("prototype".to_string(), Some(Value::Object((*prototype).clone())));
        let holder = Value::Object(PlorthObject::new(props));
        global.insert(Word::new(
            Symbol::new(*name, None),
            Quote::native(*name, move |ctx| {
                ctx.push_value(holder.clone());
                true
            }),
        ));
    }
}
