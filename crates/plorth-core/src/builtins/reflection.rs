use super::reg;
use crate::array_value::PlorthArray;
use crate::dictionary::Dictionary;
use crate::object_value::PlorthObject;
use crate::quote::Quote;
use crate::symbol::Symbol;
use crate::value::Value;
use crate::word::Word;
use indexmap::IndexMap;

/// Interpreter-reflection words: compiling source at runtime, inspecting the
/// global/local dictionaries, defining constants, running the module loader,
/// and reporting the host environment (`args`, `version`).
pub fn install(dict: &mut Dictionary) {
    reg(dict, "compile", |ctx| {
        let Some(source) = ctx.pop_string() else { return false };
        match ctx.compile(&source.to_string()) {
            Some(quote) => {
                ctx.push_value(Value::Quote(quote));
                true
            }
            None => false,
        }
    });

    reg(dict, "globals", |ctx| {
        let obj = dictionary_to_object(ctx.runtime.global_dictionary());
        ctx.push_value(Value::Object(obj));
        true
    });

    reg(dict, "locals", |ctx| {
        let obj = dictionary_to_object(ctx.local_dictionary());
        ctx.push_value(Value::Object(obj));
        true
    });

    reg(dict, "const", |ctx| {
        let Some(id) = ctx.pop_string() else { return false };
        let Some(val) = ctx.pop() else { return false };
        let quote = Quote::native("const", move |ctx| {
            ctx.push(val.clone());
            true
        });
        ctx.local_dictionary_mut()
            .insert(Word::new(Symbol::new(id.to_string(), None), quote));
        true
    });

    reg(dict, "import", |ctx| {
        let Some(path) = ctx.pop_string() else { return false };
        crate::module_loader::import(ctx, &path.to_string())
    });

    reg(dict, "args", |ctx| {
        let args = ctx.runtime.args().iter().map(|a| Value::String(crate::string_value::PlorthString::new(a))).collect();
        ctx.push_value(Value::Array(PlorthArray::from_values(args)));
        true
    });

    reg(dict, "version", |ctx| {
        ctx.push_string(env!("CARGO_PKG_VERSION"));
        true
    });
}

fn dictionary_to_object(dict: &Dictionary) -> PlorthObject {
    let mut properties = IndexMap::new();
    for word in dict.words() {
        properties.insert(word.id().to_string(), Some(Value::Quote(word.quote.clone())));
    }
    PlorthObject::new(properties)
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

    fn run(c: &mut Context, word: &str) -> bool {
        let quote = c.runtime.global_dictionary().find(word).unwrap().quote.clone();
        quote.call(c)
    }

    #[test]
    fn compile_produces_a_callable_quote() {
        let mut c = ctx();
        c.push_string("1 2 +");
        assert!(run(&mut c, "compile"));
        let Some(Some(Value::Quote(quote))) = c.pop() else {
            panic!("expected quote");
        };
        assert!(quote.call(&mut c));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(3)))));
    }

    #[test]
    fn compile_syntax_error_fails() {
        let mut c = ctx();
        c.push_string("\"unterminated");
        assert!(!run(&mut c, "compile"));
        assert!(c.has_error());
    }

    #[test]
    fn globals_exposes_a_known_word() {
        let mut c = ctx();
        assert!(run(&mut c, "globals"));
        let Some(Some(Value::Object(obj))) = c.pop() else {
            panic!("expected object");
        };
        assert!(obj.has("if"));
    }

    #[test]
    fn const_defines_a_local_word_returning_the_value() {
        let mut c = ctx();
        c.push_value(Value::Number(Number::Int(42)));
        c.push_string("answer");
        assert!(run(&mut c, "const"));
        let word = c.local_dictionary().find("answer").unwrap();
        let quote = word.quote.clone();
        assert!(quote.call(&mut c));
        assert_eq!(c.pop(), Some(Some(Value::Number(Number::Int(42)))));
    }

    #[test]
    fn args_reflects_runtime_arguments() {
        let runtime = Rc::new(Runtime::with_args(vec!["a".to_string(), "b".to_string()], Vec::new()));
        let mut c = Context::new(runtime);
        assert!(run(&mut c, "args"));
        let Some(Some(Value::Array(arr))) = c.pop() else {
            panic!("expected array");
        };
        assert_eq!(arr.len(), 2);
    }

    #[test]
    fn version_matches_crate_version() {
        let mut c = ctx();
        assert!(run(&mut c, "version"));
        assert_eq!(
            c.pop(),
            Some(Some(Value::String(crate::string_value::PlorthString::new(env!("CARGO_PKG_VERSION")))))
        );
    }
}
