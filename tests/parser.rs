//! Tests for reading LOT Flux DSL text back into a program.
mod common;
use common::*;
use lotflux::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_parse_heater_program() {
    let program = parse_program(HEATER_PROGRAM).expect("Failed to parse");
    let expected = Compiler::default()
        .lower(&create_heater_workspace())
        .unwrap();
    assert_eq!(program, expected);
}

#[test]
fn test_compile_then_parse_round_trip() {
    let compiler = Compiler::default();
    let workspace = create_multi_action_workspace();
    let lowered = compiler.lower(&workspace).unwrap();
    let code = compiler.compile(&workspace).unwrap();

    assert_eq!(parse_program(&code).unwrap(), lowered);
}

#[test]
fn test_round_trip_with_custom_indent() {
    let compiler = Compiler::builder().with_indent_width(3).build();
    let workspace = create_multi_action_workspace();
    let code = compiler.compile(&workspace).unwrap();

    let program = Parser::new().with_indent(3).parse(&code).unwrap();
    assert_eq!(program, compiler.lower(&workspace).unwrap());
    assert!(parse_program(&code).is_err());
}

#[test]
fn test_parse_empty_and_blank_sources() {
    assert!(parse_program("").unwrap().is_empty());
    assert!(parse_program("\n   \n\n").unwrap().is_empty());
}

#[test]
fn test_else_binds_by_indentation() {
    let inner_else = "\
DEFINE ACTION A ON EVERY 1s DO
IF a THEN
  IF b THEN
    PUBLISH TOPIC \"t\" \"1\"
  ELSE
    PUBLISH TOPIC \"t\" \"2\"
";
    let outer_else = "\
DEFINE ACTION A ON EVERY 1s DO
IF a THEN
  IF b THEN
    PUBLISH TOPIC \"t\" \"1\"
ELSE
  PUBLISH TOPIC \"t\" \"2\"
";

    let inner = parse_program(inner_else).unwrap();
    match &inner.actions[0].body[0] {
        Statement::If {
            then_branch,
            else_branch,
            ..
        } => {
            assert!(else_branch.is_empty());
            assert!(matches!(
                &then_branch[0],
                Statement::If { else_branch, .. } if else_branch.len() == 1
            ));
        }
        other => panic!("Expected If statement, got {:?}", other),
    }

    let outer = parse_program(outer_else).unwrap();
    match &outer.actions[0].body[0] {
        Statement::If {
            then_branch,
            else_branch,
            ..
        } => {
            assert_eq!(else_branch.len(), 1);
            assert!(matches!(
                &then_branch[0],
                Statement::If { else_branch, .. } if else_branch.is_empty()
            ));
        }
        other => panic!("Expected If statement, got {:?}", other),
    }
}

#[test]
fn test_parse_escaped_literals() {
    let source = "DEFINE ACTION A ON EVERY 250ms DO\nPUBLISH TOPIC \"say \\\"hi\\\"\" \"a\\nb\\\\c\\t\"\n";
    let program = parse_program(source).unwrap();
    assert_eq!(
        program.actions[0].body[0],
        Statement::Publish {
            topic: "say \"hi\"".to_string(),
            payload: "a\nb\\c\t".to_string(),
        }
    );
    assert_eq!(
        program.actions[0].every,
        Duration::new(250, TimeUnit::Milliseconds).unwrap()
    );
}

#[test]
fn test_parse_accepts_crlf_and_blank_lines() {
    let source = "DEFINE ACTION A ON EVERY 1h DO\r\n\r\nPUBLISH TOPIC \"t\" \"p\"\r\n";
    let program = parse_program(source).unwrap();
    assert_eq!(program.statement_count(), 1);
}

#[test]
fn test_parse_errors_report_lines() {
    let cases: Vec<(&str, usize)> = vec![
        ("DEFINE ACTION A ON EVERY 1s DO\n", 1),
        ("DEFINE ACTION 9A ON EVERY 1s DO\nPUBLISH TOPIC \"t\" \"p\"\n", 1),
        ("DEFINE ACTION A ON EVERY soon DO\nPUBLISH TOPIC \"t\" \"p\"\n", 1),
        ("DEFINE ACTION A ON EVERY 1s\nPUBLISH TOPIC \"t\" \"p\"\n", 1),
        ("DEFINE ACTION A ON EVERY 1s DO\nIF x THEN\nPUBLISH TOPIC \"t\" \"p\"\n", 2),
        ("DEFINE ACTION A ON EVERY 1s DO\n  PUBLISH TOPIC \"t\" \"p\"\n", 2),
        ("DEFINE ACTION A ON EVERY 1s DO\nIF x THEN\n   PUBLISH TOPIC \"t\" \"p\"\n", 3),
        ("DEFINE ACTION A ON EVERY 1s DO\nIF x THEN\n\tPUBLISH TOPIC \"t\" \"p\"\n", 3),
        ("DEFINE ACTION A ON EVERY 1s DO\nPUBLISH TOPIC \"t\" \"unterminated\n", 2),
        ("DEFINE ACTION A ON EVERY 1s DO\nPUBLISH TOPIC \"t\"\"p\"\n", 2),
        ("DEFINE ACTION A ON EVERY 1s DO\nPUBLISH TOPIC \"t\" \"p\" extra\n", 2),
        ("DEFINE ACTION A ON EVERY 1s DO\nSUBSCRIBE \"t\"\n", 2),
        ("DEFINE ACTION A ON EVERY 1s DO\nIF THEN\n  PUBLISH TOPIC \"t\" \"p\"\n", 2),
        (
            "DEFINE ACTION A ON EVERY 1s DO\nIF x THEN\n  PUBLISH TOPIC \"t\" \"p\"\nELSE\n",
            4,
        ),
        ("DEFINE ACTION A ON EVERY 1s DO\nPUBLISH TOPIC \"t\" \"p\"\nELSE\n", 3),
    ];

    for (source, line) in cases {
        let err = parse_program(source).expect_err(source);
        assert_eq!(err.line(), line, "source {:?} gave {}", source, err);
    }
}

#[test]
fn test_program_display_tree() {
    let program = parse_program(HEATER_PROGRAM).unwrap();
    let tree = program.display_tree().to_string();
    let expected = "\
Program (1 actions)
└── Action MyAction (every 15s)
    └── If temperature>30
        ├── Then
        │   └── Publish \"Devices/Heater\" \"ON\"
        └── Else
            └── Publish \"Devices/Heater\" \"OFF\"
";
    assert_eq!(tree, expected);
}
