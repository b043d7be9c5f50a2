use kang_core::examples::EXAMPLES;
use kang_core::{execute, validate, ErrorKind, ExecutionContext, Value};
use pretty_assertions::assert_eq;

fn run_ok(src: &str) -> ExecutionContext {
    let ctx = execute(src);
    if let Some(err) = ctx.error() {
        panic!("script failed:\n{src}\nError: {err}");
    }
    ctx
}

fn run_err(src: &str) -> (ExecutionContext, ErrorKind) {
    let ctx = execute(src);
    let kind = ctx
        .error()
        .map(|e| e.kind.clone())
        .unwrap_or_else(|| panic!("expected failure for:\n{src}"));
    (ctx, kind)
}

#[test]
fn bundled_examples_run() {
    for example in EXAMPLES {
        run_ok(example.code);
        let diagnostics = validate(example.code, example.title);
        assert!(!diagnostics.has_errors(), "{} has syntax errors", example.title);
    }
}

#[test]
fn complex_example_runs_body_once() {
    let example = kang_core::examples::find("complex-example").unwrap();
    let ctx = run_ok(example.code);
    assert_eq!(
        ctx.output(),
        [
            "Loop iteration 1",
            "Loop iteration 2",
            "Loop iteration 3",
            "Loop iteration 4",
            "Loop iteration 5",
            "Looping...",
            "Condition false: count (1) does not equal 5",
            "Count reached 5!",
            "Keeping count vibing high at 0",
        ]
    );
    assert_eq!(ctx.get("count"), Some(&Value::Number(0.0)));
}

#[test]
fn literal_types() {
    let ctx = run_ok("vibe s = \"hi\"\nvibe n = 2.5\nvibe b = false\nvibe q = \"5\"");
    assert_eq!(ctx.get("s").unwrap().type_name(), "string");
    assert_eq!(ctx.get("n").unwrap().type_name(), "number");
    assert_eq!(ctx.get("b").unwrap().type_name(), "boolean");
    assert_eq!(ctx.get("q"), Some(&Value::String("5".into())));
}

#[test]
fn shout_literal_and_variable() {
    assert_eq!(run_ok("shout \"abc\"").output(), ["abc"]);
    assert_eq!(run_ok("vibe x = 5\nshout x").output(), ["5"]);
}

#[test]
fn add_with_target_equal_to_source() {
    let ctx = run_ok("vibe a = 10\nadd r a 3");
    assert_eq!(ctx.get("r"), Some(&Value::Number(13.0)));

    let ctx = run_ok("vibe a = 10\nadd a a 3");
    assert_eq!(ctx.get("a"), Some(&Value::Number(13.0)));
}

#[test]
fn division_by_zero_keeps_prior_state() {
    let (ctx, kind) = run_err("vibe a = 10\nshout a\ndiv r a 0\nshout \"unreachable\"");
    assert_eq!(kind, ErrorKind::DivisionByZero);
    assert_eq!(ctx.get("r"), None);
    assert_eq!(ctx.output(), ["10"]);
    assert_eq!(ctx.error().unwrap().line, 3);
}

#[test]
fn grind_counts() {
    assert_eq!(run_ok("grind 3").output().len(), 3);
    assert!(run_ok("grind 0").output().is_empty());

    let (_, kind) = run_err("grind -1");
    assert!(matches!(kind, ErrorKind::InvalidLoopCount { .. }));
}

#[test]
fn compare_never_skips() {
    let ctx = run_ok("vibe x = 5\nfr x same 5\nshout \"after\"");
    assert_eq!(ctx.output(), ["Condition true: x equals 5", "after"]);

    let ctx = run_ok("vibe x = 4\nfr x same 5\nshout \"after\"");
    assert_eq!(
        ctx.output(),
        ["Condition false: x (4) does not equal 5", "after"]
    );
}

#[test]
fn unknown_statement_names_line_and_text() {
    let (ctx, kind) = run_err("foo bar");
    assert!(matches!(kind, ErrorKind::Syntax { ref text, .. } if text == "foo bar"));
    let message = ctx.error_message().unwrap();
    assert!(message.contains("line 1"), "{message}");
    assert!(message.contains("foo bar"), "{message}");
}

#[test]
fn unresolved_and_unbound_values() {
    let (_, kind) = run_err("vibe x = y");
    assert_eq!(kind, ErrorKind::UnboundVariable { name: "y".into() });

    let (_, kind) = run_err("vibe x = 1 + 2");
    assert_eq!(kind, ErrorKind::UnresolvedValue { text: "1 + 2".into() });
}

#[test]
fn string_concatenation_and_type_mismatch() {
    let ctx = run_ok("vibe greeting = \"hi \"\nadd out greeting \"there\"\nshout out");
    assert_eq!(ctx.output(), ["hi there"]);

    let (ctx, kind) = run_err("vibe s = \"x\"\nmult t s 2");
    assert!(matches!(kind, ErrorKind::TypeMismatch { op: "mult", .. }));
    assert_eq!(ctx.get("t"), None);
}

#[test]
fn execution_is_deterministic() {
    let source = "vibe a = 1\nadd b a 2.5\ngrind b\nfr b same 3.5\nkeep vibing c high true\nshout c";
    let first = execute(source);
    let second = execute(source);
    assert_eq!(first, second);
    assert_eq!(first.output(), second.output());
}

#[test]
fn each_run_starts_clean() {
    execute("vibe leaked = 1");
    let (_, kind) = run_err("shout leaked");
    assert_eq!(kind, ErrorKind::UnboundVariable { name: "leaked".into() });
}
