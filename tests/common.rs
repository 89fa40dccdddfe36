//! Common test utilities for building block workspaces and editor documents.
use lotflux::prelude::*;

/// `PUBLISH TOPIC "<topic>" "<payload>"`
#[allow(dead_code)]
pub fn publish(topic: &str, payload: &str) -> Block {
    Block::new("publish")
        .with_field("topic", topic)
        .with_field("payload", payload)
}

/// An `if` block with the given branches. An empty `else_blocks` leaves the slot out.
#[allow(dead_code)]
pub fn if_block(condition: &str, then_blocks: Vec<Block>, else_blocks: Vec<Block>) -> Block {
    let block = Block::new("if")
        .with_field("condition", condition)
        .with_slot("then", then_blocks);
    if else_blocks.is_empty() {
        block
    } else {
        block.with_slot("else", else_blocks)
    }
}

/// An explicit action block.
#[allow(dead_code)]
pub fn action(name: &str, every: &str, body: Vec<Block>) -> Block {
    Block::new("action")
        .with_field("name", name)
        .with_field("every", every)
        .with_slot("do", body)
}

/// The heater thermostat: `temperature>30` switches the heater on, otherwise off.
#[allow(dead_code)]
pub fn create_heater_workspace() -> Workspace {
    Workspace::new(vec![if_block(
        "temperature>30",
        vec![publish("Devices/Heater", "ON")],
        vec![publish("Devices/Heater", "OFF")],
    )])
}

#[allow(dead_code)]
pub const HEATER_PROGRAM: &str = "\
DEFINE ACTION MyAction ON EVERY 15s DO
IF temperature>30 THEN
  PUBLISH TOPIC \"Devices/Heater\" \"ON\"
ELSE
  PUBLISH TOPIC \"Devices/Heater\" \"OFF\"
";

/// Two explicit actions with nested conditionals.
#[allow(dead_code)]
pub fn create_multi_action_workspace() -> Workspace {
    Workspace::new(vec![
        action(
            "Climate",
            "30s",
            vec![if_block(
                "temperature>30",
                vec![if_block(
                    "humidity>80",
                    vec![publish("Devices/Fan", "HIGH")],
                    vec![publish("Devices/Fan", "LOW")],
                )],
                vec![publish("Devices/Fan", "OFF")],
            )],
        ),
        action(
            "Heartbeat",
            "5m",
            vec![publish("System/Heartbeat", "alive")],
        ),
    ])
}

#[allow(dead_code)]
pub const MULTI_ACTION_PROGRAM: &str = "\
DEFINE ACTION Climate ON EVERY 30s DO
IF temperature>30 THEN
  IF humidity>80 THEN
    PUBLISH TOPIC \"Devices/Fan\" \"HIGH\"
  ELSE
    PUBLISH TOPIC \"Devices/Fan\" \"LOW\"
ELSE
  PUBLISH TOPIC \"Devices/Fan\" \"OFF\"

DEFINE ACTION Heartbeat ON EVERY 5m DO
PUBLISH TOPIC \"System/Heartbeat\" \"alive\"
";

/// The heater workspace as saved by Blockly, using editor-specific block types
/// and upper-case field names.
#[allow(dead_code)]
pub const BLOCKLY_HEATER_JSON: &str = r#"{
  "blocks": {
    "languageVersion": 0,
    "blocks": [
      {
        "type": "lot_if",
        "id": "if-1",
        "x": 40,
        "y": 60,
        "fields": { "CONDITION": "temperature>30" },
        "inputs": {
          "THEN": {
            "block": {
              "type": "lot_publish",
              "id": "pub-on",
              "fields": { "TOPIC": "Devices/Heater", "PAYLOAD": "ON" }
            }
          },
          "ELSE": {
            "block": {
              "type": "lot_publish",
              "id": "pub-off",
              "fields": { "TOPIC": "Devices/Heater", "PAYLOAD": "OFF" }
            }
          }
        }
      }
    ]
  },
  "variables": []
}"#;

/// A Blockly action whose body is a `next` chain of three publish blocks.
#[allow(dead_code)]
pub const BLOCKLY_CHAIN_JSON: &str = r#"{
  "blocks": {
    "languageVersion": 0,
    "blocks": [
      {
        "type": "action",
        "id": "act",
        "fields": { "NAME": "Sequence", "EVERY": 10 },
        "inputs": {
          "DO": {
            "block": {
              "type": "publish",
              "fields": { "TOPIC": "a", "PAYLOAD": "1" },
              "next": {
                "block": {
                  "type": "publish",
                  "fields": { "TOPIC": "b", "PAYLOAD": 2 },
                  "next": {
                    "block": {
                      "type": "publish",
                      "fields": { "TOPIC": "c", "PAYLOAD": true }
                    }
                  }
                }
              }
            }
          }
        }
      }
    ]
  }
}"#;

/// A compiler that understands the `lot_*` editor block types.
#[allow(dead_code)]
pub fn create_editor_compiler() -> Compiler {
    Compiler::builder()
        .with_type_mapping("lot_if", "if")
        .with_type_mapping("lot_publish", "publish")
        .build()
}
