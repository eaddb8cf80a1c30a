//! End-to-end checks against a fresh `Context`: the six scenarios, the
//! additional required checks, and the two ambient cycle-termination
//! properties, all driven through `Context::compile` + `Quote::call` the
//! way a host program actually runs source text.

use indexmap::IndexMap;
use plorth_core::value::{Val, Value};
use plorth_core::{Context, ErrorKind, Runtime};
use std::rc::Rc;

fn run(source: &str) -> Result<Vec<Val>, plorth_core::Error> {
    let mut ctx = Context::new(Rc::new(Runtime::new()));
    let quote = ctx.compile(source).expect("source should parse");
    if quote.call(&mut ctx) {
        let mut stack = Vec::new();
        while let Some(v) = ctx.pop() {
            stack.push(v);
        }
        stack.reverse();
        Ok(stack)
    } else {
        Err(ctx.clear_error().expect("failed call leaves an error set"))
    }
}

#[test]
fn scenario_1_integer_addition() {
    let stack = run("1 2 +").unwrap();
    assert_eq!(stack, vec![Some(Value::Number(plorth_core::Number::Int(3)))]);
}

#[test]
fn scenario_2_string_concatenation() {
    let stack = run(r#""foo" "bar" +"#).unwrap();
    assert_eq!(stack.len(), 1);
    assert_eq!(stack[0].as_ref().unwrap().to_string(), "foobar");
}

#[test]
fn scenario_3_array_length_leaves_array_and_length() {
    let stack = run("[1, 2, 3] length").unwrap();
    assert_eq!(stack.len(), 2);
    assert_eq!(stack[0].as_ref().unwrap().to_source(), "[1, 2, 3]");
    assert_eq!(stack[1], Some(Value::Number(plorth_core::Number::Int(3))));
}

// The body of a word definition is the flat token sequence between `:` and
// `;`; enclosing it in its own parens makes it a single nested quote token,
// which a call pushes rather than invokes (see DESIGN.md). The scenario's
// literal program is therefore unparenthesized.
#[test]
fn scenario_4_word_definition_and_call() {
    let stack = run(": sq dup * ; 5 sq").unwrap();
    assert_eq!(stack, vec![Some(Value::Number(plorth_core::Number::Int(25)))]);
}

#[test]
fn scenario_5_try_catches_stack_underflow() {
    let stack = run(r#"( drop ) ( "caught" swap drop ) try"#).unwrap();
    assert_eq!(stack.len(), 1);
    assert_eq!(stack[0].as_ref().unwrap().to_string(), "caught");
}

#[test]
fn scenario_6_if_else_picks_the_matching_branch() {
    let yes = run(r#"true ( "yes" ) ( "no" ) if-else"#).unwrap();
    assert_eq!(yes[0].as_ref().unwrap().to_string(), "yes");

    let no = run(r#"false ( "yes" ) ( "no" ) if-else"#).unwrap();
    assert_eq!(no[0].as_ref().unwrap().to_string(), "no");
}

#[test]
fn object_literal_equals_programmatically_constructed_equivalent() {
    let stack = run(r#"{ "a": 1, "b": [true, null] }"#).unwrap();
    let parsed = stack[0].as_ref().unwrap();

    let mut properties: IndexMap<String, Val> = IndexMap::new();
    properties.insert("a".to_string(), Some(Value::Number(plorth_core::Number::Int(1))));
    properties.insert(
        "b".to_string(),
        Some(Value::Array(plorth_core::array_value::PlorthArray::from_vec(vec![
            Some(Value::Boolean(true)),
            None,
        ]))),
    );
    let expected = Value::Object(plorth_core::object_value::PlorthObject::new(properties));

    assert!(parsed.equals(&expected));
}

#[test]
fn importing_a_module_installs_its_words() {
    let dir = tempfile::tempdir().unwrap();
    let module_path = dir.path().join("greeter.plorth");
    std::fs::write(&module_path, r#": greet "hi" ;"#).unwrap();

    let mut ctx = Context::new(Rc::new(Runtime::new()));
    assert!(plorth_core::module_loader::import(&mut ctx, &module_path.to_string_lossy()));
    assert!(ctx.local_dictionary().find("greet").is_some());

    assert!(plorth_core::exec::exec(
        &mut ctx,
        &Value::Symbol(plorth_core::symbol::Symbol::new("greet", None)),
    ));
    assert_eq!(ctx.pop(), Some(Some(Value::String(plorth_core::string_value::PlorthString::new("hi")))));
}

#[test]
fn non_numeric_string_to_number_is_value_error() {
    let err = run(r#""not-a-number" >number"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Value);
}

#[test]
fn empty_array_index_is_range_error() {
    let err = run("[] 0 @").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Range);
}

#[test]
fn missing_object_key_is_range_error_mentioning_the_key() {
    let err = run(r#"{} "k" @"#).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Range);
    assert!(err.message.contains('k'));
}

#[test]
fn module_import_cycle_terminates() {
    let dir = tempfile::tempdir().unwrap();
    let a_path = dir.path().join("a.plorth");
    let b_path = dir.path().join("b.plorth");
    std::fs::write(&a_path, format!("{:?} import", b_path.to_string_lossy())).unwrap();
    std::fs::write(&b_path, format!("{:?} import", a_path.to_string_lossy())).unwrap();

    let mut ctx = Context::new(Rc::new(Runtime::new()));
    // Must return rather than recurse without bound; the resulting success
    // or failure depends on the partial placeholder view, but it must
    // terminate, which the test itself demonstrates by completing at all.
    let _ = plorth_core::module_loader::import(&mut ctx, &a_path.to_string_lossy());
}

#[test]
fn cyclic_prototype_chain_terminates_with_type_error() {
    let mut ctx = Context::new(Rc::new(Runtime::new()));

    // Build two objects whose `__proto__` point at each other, then push one
    // and look up a property that exists on neither.
    let mut a_props: IndexMap<String, Val> = IndexMap::new();
    a_props.insert("__proto__".to_string(), None);
    let a = plorth_core::object_value::PlorthObject::new(a_props);

    let mut b_props: IndexMap<String, Val> = IndexMap::new();
    b_props.insert("__proto__".to_string(), Some(Value::Object(a.clone())));
    let b = plorth_core::object_value::PlorthObject::new(b_props);

    let a = a.set("__proto__", Some(Value::Object(b.clone())));

    ctx.push_value(Value::Object(a));
    assert!(!plorth_core::exec::exec(
        &mut ctx,
        &Value::Symbol(plorth_core::symbol::Symbol::new("no-such-property", None)),
    ));
    assert_eq!(ctx.error().unwrap().kind, ErrorKind::Type);
}

#[test]
fn source_round_trip_preserves_equality_for_non_native_values() {
    for source in ["1", "\"hello\"", "[1, 2, 3]", "true", "null"] {
        let mut ctx = Context::new(Rc::new(Runtime::new()));
        let quote = ctx.compile(source).unwrap();
        assert!(quote.call(&mut ctx));
        let first = ctx.pop().unwrap();

        let mut ctx2 = Context::new(Rc::new(Runtime::new()));
        let source_form = plorth_core::value::val_to_source(&first);
        let quote2 = ctx2.compile(&source_form).unwrap();
        assert!(quote2.call(&mut ctx2));
        let second = ctx2.pop().unwrap();

        assert!(plorth_core::value::val_equals(&first, &second), "round-trip failed for {source}");
    }
}
