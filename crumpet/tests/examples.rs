//! Integration tests against the demonstration programs.

use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use crumpet::lang::{core, surface};
use crumpet::pass::{core_to_c, core_to_pretty, surface_to_core};
use crumpet::reporting::Message;

fn resolve(path: &str, source: &str) -> (core::Term, Vec<Message>) {
    let file = SimpleFile::new(path, source);
    let surface_term = surface::Term::from_str(file.source()).unwrap();

    let (messages_tx, messages_rx) = crossbeam_channel::unbounded();
    let mut state = surface_to_core::State::new(messages_tx);
    let (core_term, captures) = surface_to_core::from_surface(&mut state, &surface_term);
    assert!(captures.is_empty(), "top-level terms have no free captures");

    (core_term, messages_rx.try_iter().collect())
}

fn run_test(path: &str, source: &str) -> String {
    let (core_term, messages) = resolve(path, source);
    if !messages.is_empty() {
        let writer = StandardStream::stdout(ColorChoice::Always);
        let config = codespan_reporting::term::Config::default();
        let file = SimpleFile::new(path, source);
        for message in &messages {
            codespan_reporting::term::emit(
                &mut writer.lock(),
                &config,
                &file,
                &message.to_diagnostic(),
            )
            .unwrap();
        }
        panic!("failed sample");
    }

    let pretty_alloc = pretty::BoxAllocator;
    let doc = core_to_c::from_term(&pretty_alloc, &core_term).unwrap();
    format!("{}", doc.1.pretty(80))
}

#[test]
fn identity() {
    let emitted = run_test(
        "demos/identity.crumb",
        include_str!("../../demos/identity.crumb"),
    );

    assert!(emitted.contains("function* f_f(function* f, function** c) {"));
    assert!(emitted.contains("    function* f_f_ret = f;"));
    assert!(emitted.contains("    del(f);"));
    assert!(emitted.contains("    return 0;"));
}

#[test]
fn nested() {
    let emitted = run_test(
        "demos/nested.crumb",
        include_str!("../../demos/nested.crumb"),
    );

    // the inner record captures the outer argument at slot 0
    assert!(emitted.contains("->closedValues[0] = f;"));
    assert!(emitted.contains("= c[0];"));
}

#[test]
fn wrap() {
    let emitted = run_test("demos/wrap.crumb", include_str!("../../demos/wrap.crumb"));

    assert!(emitted.contains("    function* f = f_l->ptr(f_r, f_l->closedValues);"));
    assert!(emitted.contains("    del(f_r);"));
    assert!(emitted.contains("    del(f_l);"));
}

#[test]
fn nested_captures_are_annotated() {
    let (core_term, messages) = resolve(
        "demos/nested.crumb",
        include_str!("../../demos/nested.crumb"),
    );
    assert!(messages.is_empty());

    let pretty_alloc = pretty::BoxAllocator;
    let doc = core_to_pretty::from_term(&pretty_alloc, &core_term);
    assert_eq!(format!("{}", doc.1.pretty(80)), "fun x => fun y [0] => x");
}

#[test]
fn unbound_name() {
    let (core_term, messages) = resolve("<test>", "(fn x y)");

    assert_eq!(messages.len(), 1);
    assert!(matches!(
        &messages[0],
        Message::SurfaceToCore(crumpet::reporting::SurfaceToCoreMessage::UnboundName { .. })
    ));

    // an erroneous term is refused by the emitter
    let pretty_alloc = pretty::BoxAllocator;
    assert_eq!(
        core_to_c::from_term(&pretty_alloc, &core_term).err(),
        Some(core_to_c::EmitError::ErrorTerm),
    );
}

#[test]
fn unexpected_end_of_file() {
    let error = surface::Term::from_str("(fn x").unwrap_err();
    assert!(matches!(
        Message::from_lalrpop(error),
        Message::Parse(crumpet::reporting::ParseError::UnrecognizedEOF { .. })
    ));
}

#[test]
fn shadowed_names_resolve_to_the_innermost_binder() {
    let (core_term, messages) = resolve("<test>", "(fn x (fn x x))");
    assert!(messages.is_empty());

    let pretty_alloc = pretty::BoxAllocator;
    let doc = core_to_pretty::from_term(&pretty_alloc, &core_term);
    // the inner function captures nothing: its own binder shadows the outer one
    assert_eq!(format!("{}", doc.1.pretty(80)), "fun x => fun x => x");
}
