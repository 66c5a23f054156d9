use css_syntax::parse_stylesheet;
use css_tree::NodeKind;
use modscale::{BreakpointConfig, Config, ConfigError, Engine, Report, ms_to_rem, transform};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config() -> Config {
    Config::with_breakpoints(vec![
        BreakpointConfig::new("mobile", "0px", 16.0),
        BreakpointConfig::new("small", "480px", 18.0),
        BreakpointConfig::new("tablet", "768px", 24.0),
    ])
}

fn rewrite(css: &str) -> (String, Report) {
    init_logging();
    let mut doc = parse_stylesheet(css);
    let report = Engine::new(&config()).unwrap().run(&mut doc);
    (doc.to_string(), report)
}

#[test]
fn ms_at_root_resolves_at_base_breakpoint() {
    let (out, report) = rewrite(".x { font-size: 12ms; }");
    let engine = Engine::new(&config()).unwrap();
    let expected = ms_to_rem("12", engine.breakpoints(), None).unwrap();
    assert_eq!(expected, "8.9161rem");
    assert_eq!(out, format!(".x {{\n  font-size: {expected};\n}}\n"));
    assert!(report.is_clean());
    assert_eq!(report.rewritten, 1);
}

#[test]
fn ms_keeps_important_flag_and_other_declarations() {
    let (out, _) = rewrite("h1 { color: red; font-size: -1ms !important; margin: 0 }");
    assert_eq!(
        out,
        "h1 {\n  color: red;\n  font-size: 0.8333rem !important;\n  margin: 0;\n}\n"
    );
}

#[test]
fn ms_inside_t_above_uses_named_breakpoint() {
    init_logging();
    let mut doc = parse_stylesheet("@t-above(tablet) { font-size: 12ms; }");
    let engine = Engine::new(&config()).unwrap();
    let report = engine.run(&mut doc);
    assert!(report.is_clean(), "{:?}", report.diagnostics);

    let at_rule = doc.children(doc.root())[0];
    assert_eq!(
        doc.kind(at_rule).unwrap(),
        &NodeKind::AtRule {
            name: "t-above".into(),
            params: "(tablet)".into(),
            after_name: String::new(),
            has_block: true,
        }
    );
    let decl = doc.children(at_rule)[0];
    let expected = ms_to_rem("12", engine.breakpoints(), Some("tablet")).unwrap();
    assert_eq!(doc.kind(decl).unwrap(), &NodeKind::declaration("font-size", expected));
}

#[test]
fn every_responsive_at_rule_is_accepted() {
    let (out, report) = rewrite(
        "@t-below(small) { .a { font-size: 1ms; } }\n\
         @t-only(Tablet) { .b { font-size: 0ms; } }",
    );
    assert!(report.is_clean(), "{:?}", report.diagnostics);
    assert_eq!(
        out,
        "@t-below(small) {\n  .a {\n    font-size: 1.35rem;\n  }\n}\n\
         @t-only(Tablet) {\n  .b {\n    font-size: 1.5rem;\n  }\n}\n"
    );
}

#[test]
fn unknown_breakpoint_removes_the_block() {
    let (out, report) = rewrite(
        "@t-above(bogus) { .x { font-size: 12ms; } }\n.y { color: red; }",
    );
    assert_eq!(out, ".y {\n  color: red;\n}\n");
    assert_eq!(report.diagnostics.len(), 1);
    let message = &report.diagnostics[0].message;
    assert!(message.contains("bogus"), "{message}");
    assert!(message.contains("mobile, small, tablet"), "{message}");
    assert_eq!(report.diagnostics[0].line, Some(1));
}

#[test]
fn ms_inside_other_at_rules_is_rejected() {
    let (out, report) = rewrite(
        ".keep { color: blue; }\n@media print {\n  .x { font-size: 2ms; }\n}",
    );
    assert_eq!(out, ".keep {\n  color: blue;\n}\n");
    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.diagnostics[0].message.contains("@media"));
    assert_eq!(report.diagnostics[0].line, Some(3));
}

#[test]
fn step_function_generates_ascending_media_blocks() {
    let (out, report) = rewrite(".x { font-size: t-ms(3); }\n.z { color: red; }");
    assert!(report.is_clean());
    assert_eq!(
        out,
        ".x {\n  font-size: 1.728rem;\n}\n\
         @media (min-width: 480px) {\n  .x {\n    font-size: 1.944rem;\n  }\n}\n\
         @media (min-width: 768px) {\n  .x {\n    font-size: 2.592rem;\n  }\n}\n\
         .z {\n  color: red;\n}\n"
    );
    assert!(!out.contains("min-width: 0px"));
}

#[test]
fn step_function_values_grow_with_breakpoints() {
    init_logging();
    let mut doc = parse_stylesheet("p { font-size: t-ms(-2); }");
    Engine::new(&config()).unwrap().run(&mut doc);
    let sizes: Vec<f64> = doc
        .declarations()
        .into_iter()
        .filter_map(|id| match doc.kind(id).ok()? {
            NodeKind::Declaration { value, .. } => value.strip_suffix("rem")?.parse().ok(),
            _ => None,
        })
        .collect();
    assert_eq!(sizes.len(), 3);
    assert!(sizes.windows(2).all(|pair| pair[0] <= pair[1]), "{sizes:?}");
}

#[test]
fn invalid_step_argument_removes_the_rule() {
    let (out, report) = rewrite(".x { color: red; font-size: t-ms(abc); }\n.y { margin: 0; }");
    assert_eq!(out, ".y {\n  margin: 0;\n}\n");
    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.diagnostics[0].message.contains("abc"));
    assert!(!out.contains("@media"));
}

#[test]
fn step_function_outside_a_rule_is_rejected() {
    let (out, report) = rewrite("@t-above(tablet) { font-size: t-ms(2); }\na { color: red; }");
    assert_eq!(out, "a {\n  color: red;\n}\n");
    assert_eq!(report.diagnostics.len(), 1);
}

#[test]
fn one_bad_declaration_does_not_stop_the_pass() {
    let (out, report) = rewrite(
        "@t-above(nowhere) { .a { font-size: 1ms; } }\n\
         .b { font-size: t-ms(oops); }\n\
         .c { font-size: 0ms; }",
    );
    assert_eq!(report.diagnostics.len(), 2);
    assert_eq!(report.rewritten, 1);
    assert_eq!(out, ".c {\n  font-size: 1rem;\n}\n");
}

#[test]
fn overflowing_steps_are_removed_and_reported() {
    let (out, report) = rewrite(
        ".x { color: red; font-size: 4000ms; }\n\
         .y { font-size: t-ms(5000); }\n\
         .z { font-size: 1ms; }",
    );
    assert!(!out.contains("inf"), "{out}");
    assert_eq!(
        out,
        ".x {\n  color: red;\n}\n.z {\n  font-size: 1.2rem;\n}\n"
    );
    assert_eq!(report.rewritten, 1);
    assert_eq!(report.diagnostics.len(), 2);
    assert!(report.diagnostics[0].message.contains("4000"));
    assert_eq!(report.diagnostics[1].line, Some(2));
}

#[test]
fn comments_and_at_rule_text_pass_through() {
    let css = "/* banner */\n@t-above(tablet) {\n  /* hero */\n  .x {\n    font-size: 0ms;\n  }\n}\n";
    let (out, report) = rewrite(css);
    assert!(report.is_clean(), "{:?}", report.diagnostics);
    assert_eq!(
        out,
        "/* banner */\n@t-above(tablet) {\n  /* hero */\n  .x {\n    font-size: 1.5rem;\n  }\n}\n"
    );
}

#[test]
fn loosely_spelled_important_is_still_rewritten() {
    let (out, report) = rewrite(".x { font-size: 1ms ! IMPORTANT; }");
    assert!(report.is_clean());
    assert_eq!(out, ".x {\n  font-size: 1.2rem !important;\n}\n");
}

#[test]
fn unrelated_declarations_are_left_alone() {
    let css = ".x {\n  font-size: 12px;\n  transition: opacity 200ms;\n}\n";
    let (out, report) = rewrite(css);
    assert_eq!(out, css);
    assert_eq!(report.rewritten, 0);
    assert!(report.is_clean());
}

#[test]
fn invalid_config_aborts_before_touching_the_document() {
    init_logging();
    let mut doc = parse_stylesheet(".x { font-size: 2ms; }");
    let before = doc.to_string();
    let config = Config::with_breakpoints(vec![BreakpointConfig::new("tablet", "768px", 18.0)]);
    let err = transform(&mut doc, &config).unwrap_err();
    assert!(matches!(err, ConfigError::MissingBaseBreakpoint));
    assert_eq!(doc.to_string(), before);

    let config = Config::with_breakpoints(vec![
        BreakpointConfig::new("mobile", "0px", 16.0),
        BreakpointConfig::new("mobile", "768px", 18.0),
    ]);
    let err = transform(&mut doc, &config).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateName(_)));
    assert_eq!(doc.to_string(), before);
}
