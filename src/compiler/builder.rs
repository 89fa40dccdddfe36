use super::DefaultAction;
use super::schema::BlockKind;
use crate::ast::literal::is_identifier;
use crate::ast::{ActionDecl, Duration, Program, Statement};
use crate::error::CompileError;
use crate::workspace::{Block, BlockPath, Workspace};
use ahash::AHashMap;

/// Responsible for validating a `Workspace` and lowering it into a typed `Program`.
pub(super) struct ProgramBuilder<'a> {
    registry: &'a AHashMap<String, BlockKind>,
    default_action: &'a DefaultAction,
}

impl<'a> ProgramBuilder<'a> {
    pub(super) fn new(
        registry: &'a AHashMap<String, BlockKind>,
        default_action: &'a DefaultAction,
    ) -> Self {
        Self {
            registry,
            default_action,
        }
    }

    /// Lowers every top-level block. Loose statements are gathered into the default
    /// action, which takes the position of the first loose statement.
    pub(super) fn build_program(&self, workspace: &Workspace) -> Result<Program, CompileError> {
        let mut actions = Vec::new();
        let mut loose = Vec::new();
        let mut default_position = None;
        let mut declared: AHashMap<String, BlockPath> = AHashMap::new();

        for (index, block) in workspace.blocks.iter().enumerate() {
            let path = BlockPath::top_level(index);
            let kind = self.resolve_kind(block, &path)?;
            if kind.is_statement() {
                default_position.get_or_insert(actions.len());
                self.build_statement(block, kind, &path, &mut loose)?;
                continue;
            }

            let action = self.build_action(block, &path)?;
            if let Some(first) = declared.get(&action.name) {
                return Err(duplicate_action(&path, &action.name, &format!("an action at {}", first)));
            }
            declared.insert(action.name.clone(), path);
            actions.push(action);
        }

        if let Some(position) = default_position {
            if !loose.is_empty() {
                let action = self.default_action_with(loose)?;
                if let Some(path) = declared.get(&action.name) {
                    return Err(duplicate_action(
                        path,
                        &action.name,
                        "the default action wrapping loose top-level blocks",
                    ));
                }
                actions.insert(position, action);
            }
        }

        Ok(Program::new(actions))
    }

    fn default_action_with(&self, body: Vec<Statement>) -> Result<ActionDecl, CompileError> {
        if !is_identifier(&self.default_action.name) {
            return Err(CompileError::InvalidConfiguration(format!(
                "default action name '{}' is not a valid identifier",
                self.default_action.name
            )));
        }
        Ok(ActionDecl {
            name: self.default_action.name.clone(),
            every: self.default_action.every,
            body,
        })
    }

    fn resolve_kind(&self, block: &Block, path: &BlockPath) -> Result<BlockKind, CompileError> {
        let kind = self
            .registry
            .get(&block.block_type)
            .copied()
            .ok_or_else(|| CompileError::UnknownBlockType {
                path: path.clone(),
                type_name: block.block_type.clone(),
            })?;
        self.check_schema(block, kind, path)?;
        Ok(kind)
    }

    /// Rejects undeclared fields and slots, then checks that required ones are present.
    fn check_schema(
        &self,
        block: &Block,
        kind: BlockKind,
        path: &BlockPath,
    ) -> Result<(), CompileError> {
        let schema = kind.schema();

        if let Some(field) = block.fields.keys().find(|f| schema.field(f).is_none()) {
            return Err(CompileError::UnknownField {
                path: path.clone(),
                block_type: block.block_type.clone(),
                field: field.clone(),
            });
        }
        if let Some(slot) = block.slots.keys().find(|s| schema.slot(s).is_none()) {
            return Err(CompileError::UnknownSlot {
                path: path.clone(),
                block_type: block.block_type.clone(),
                slot: slot.clone(),
            });
        }

        for spec in schema.fields.iter().filter(|f| f.required) {
            if !block.fields.contains_key(spec.name) {
                return Err(CompileError::MissingRequiredField {
                    path: path.clone(),
                    block_type: block.block_type.clone(),
                    field: spec.name.to_string(),
                });
            }
        }
        for spec in schema.slots.iter().filter(|s| s.required) {
            if block.slot(spec.name).is_none_or(|blocks| blocks.is_empty()) {
                return Err(self.missing_slot(block, path, spec.name));
            }
        }
        Ok(())
    }

    fn build_action(&self, block: &Block, path: &BlockPath) -> Result<ActionDecl, CompileError> {
        let name = self.required_field(block, path, "name")?.trim();
        if !is_identifier(name) {
            return Err(CompileError::InvalidFieldValue {
                path: path.clone(),
                field: "name".to_string(),
                message: format!("'{}' is not a valid action identifier", name),
            });
        }

        let every_text = self.required_field(block, path, "every")?;
        let every: Duration =
            every_text
                .parse()
                .map_err(|e| CompileError::InvalidFieldValue {
                    path: path.clone(),
                    field: "every".to_string(),
                    message: format!("{}", e),
                })?;

        let body = self.build_slot(block, path, "do")?;
        if body.is_empty() {
            return Err(self.missing_slot(block, path, "do"));
        }

        Ok(ActionDecl {
            name: name.to_string(),
            every,
            body,
        })
    }

    /// Lowers one statement block, appending to `out`. Sequences splice their
    /// children in place, so one block may contribute zero or many statements.
    fn build_statement(
        &self,
        block: &Block,
        kind: BlockKind,
        path: &BlockPath,
        out: &mut Vec<Statement>,
    ) -> Result<(), CompileError> {
        match kind {
            BlockKind::Action => {
                return Err(CompileError::MisplacedBlock {
                    path: path.clone(),
                    block_type: block.block_type.clone(),
                    message: "actions may only appear at the top level of the workspace"
                        .to_string(),
                });
            }
            BlockKind::If => {
                let condition = self.build_condition(block, path)?;
                let then_branch = self.build_slot(block, path, "then")?;
                if then_branch.is_empty() {
                    return Err(self.missing_slot(block, path, "then"));
                }
                let else_branch = self.build_slot(block, path, "else")?;
                out.push(Statement::If {
                    condition,
                    then_branch,
                    else_branch,
                });
            }
            BlockKind::Publish => {
                let topic = self.required_field(block, path, "topic")?;
                if topic.trim().is_empty() {
                    return Err(CompileError::InvalidFieldValue {
                        path: path.clone(),
                        field: "topic".to_string(),
                        message: "topic must not be empty".to_string(),
                    });
                }
                let payload = self.required_field(block, path, "payload")?;
                out.push(Statement::Publish {
                    topic: topic.to_string(),
                    payload: payload.to_string(),
                });
            }
            BlockKind::StatementSequence => {
                out.extend(self.build_slot(block, path, "statements")?);
            }
        }
        Ok(())
    }

    fn build_condition(&self, block: &Block, path: &BlockPath) -> Result<String, CompileError> {
        let condition = self.required_field(block, path, "condition")?.trim();
        let invalid = |message: &str| CompileError::InvalidFieldValue {
            path: path.clone(),
            field: "condition".to_string(),
            message: message.to_string(),
        };

        if condition.is_empty() {
            return Err(invalid("condition must not be empty"));
        }
        if condition.contains(['\n', '\r']) {
            return Err(invalid("condition must fit on a single line"));
        }
        Ok(condition.to_string())
    }

    /// Lowers the blocks of `slot` in order. A missing slot lowers to nothing.
    fn build_slot(
        &self,
        block: &Block,
        path: &BlockPath,
        slot: &str,
    ) -> Result<Vec<Statement>, CompileError> {
        let mut statements = Vec::new();
        for (index, child) in block.slot(slot).unwrap_or_default().iter().enumerate() {
            let child_path = path.child(slot, index);
            let kind = self.resolve_kind(child, &child_path)?;
            self.build_statement(child, kind, &child_path, &mut statements)?;
        }
        Ok(statements)
    }

    fn required_field<'b>(
        &self,
        block: &'b Block,
        path: &BlockPath,
        field: &str,
    ) -> Result<&'b str, CompileError> {
        block
            .field(field)
            .ok_or_else(|| CompileError::MissingRequiredField {
                path: path.clone(),
                block_type: block.block_type.clone(),
                field: field.to_string(),
            })
    }

    fn missing_slot(&self, block: &Block, path: &BlockPath, slot: &str) -> CompileError {
        CompileError::MissingRequiredSlot {
            path: path.clone(),
            block_type: block.block_type.clone(),
            slot: slot.to_string(),
        }
    }
}

/// Every action name must be declared once across the program.
fn duplicate_action(path: &BlockPath, name: &str, other: &str) -> CompileError {
    CompileError::InvalidFieldValue {
        path: path.clone(),
        field: "name".to_string(),
        message: format!("action '{}' is already declared by {}", name, other),
    }
}
