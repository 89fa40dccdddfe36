//! Property tests: generated text always reads back as the program it came from.
mod common;
use common::*;
use lotflux::ast::literal::{quote, unquote};
use lotflux::compiler::Compiler;
use lotflux::parser::Parser;
use lotflux::workspace::{Block, Workspace};
use proptest::prelude::*;

fn publish_strategy() -> impl Strategy<Value = Block> {
    ("[A-Za-z0-9/ _\"\\\\\n\t-]{0,12}[A-Za-z0-9]", any::<String>())
        .prop_map(|(topic, payload)| publish(&topic, &payload))
}

fn statement_strategy() -> impl Strategy<Value = Block> {
    publish_strategy().prop_recursive(4, 24, 4, |inner| {
        (
            "[a-z]{1,8} ?(==|>|<|!=) ?[0-9a-z\"]{1,5}",
            prop::collection::vec(inner.clone(), 1..4),
            prop::collection::vec(inner, 0..3),
        )
            .prop_map(|(condition, then_blocks, else_blocks)| {
                if_block(&condition, then_blocks, else_blocks)
            })
    })
}

fn workspace_strategy() -> impl Strategy<Value = Workspace> {
    let explicit_action = (
        "[A-Za-z_][A-Za-z0-9_]{0,10}",
        1u64..10_000,
        prop::sample::select(vec!["ms", "s", "m", "h"]),
        prop::collection::vec(statement_strategy(), 1..4),
    )
        .prop_map(|(name, amount, unit, body)| {
            action(&name, &format!("{}{}", amount, unit), body)
        });
    prop::collection::vec(prop_oneof![explicit_action, statement_strategy()], 0..5).prop_map(
        |blocks| {
            // Action names must be unique; the numeric suffix keeps them apart.
            let blocks = blocks
                .into_iter()
                .enumerate()
                .map(|(i, mut block)| {
                    if block.block_type == "action" {
                        if let Some(name) = block.fields.get_mut("name") {
                            name.push_str(&i.to_string());
                        }
                    }
                    block
                })
                .collect();
            Workspace::new(blocks)
        },
    )
}

proptest! {
    #[test]
    fn quoted_strings_read_back_unchanged(value in any::<String>(), tail in "[ A-Za-z]{0,6}") {
        let literal = format!("{}{}", quote(&value), tail);
        let (decoded, rest) = unquote(&literal).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(rest, tail.as_str());
    }

    #[test]
    fn quoted_strings_stay_on_one_line(value in any::<String>()) {
        let literal = quote(&value);
        prop_assert!(!literal.contains('\n'));
        prop_assert!(!literal.contains('\r'));
    }

    #[test]
    fn compiled_programs_parse_back(workspace in workspace_strategy(), indent in 1usize..5) {
        let compiler = Compiler::builder().with_indent_width(indent).build();
        let program = compiler.lower(&workspace).unwrap();
        let code = compiler.compile(&workspace).unwrap();

        let reread = Parser::new().with_indent(indent).parse(&code).unwrap();
        prop_assert_eq!(reread, program);
    }

    #[test]
    fn compilation_is_deterministic(workspace in workspace_strategy()) {
        let compiler = Compiler::default();
        prop_assert_eq!(compiler.compile(&workspace).unwrap(), compiler.compile(&workspace).unwrap());
    }
}
