use ahash::AHashMap;

/// A field a block kind declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

/// A named child sequence a block kind declares. Required slots must be non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub name: &'static str,
    pub required: bool,
}

/// The fields and slots accepted by one block kind, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSchema {
    pub fields: &'static [FieldSpec],
    pub slots: &'static [SlotSpec],
}

impl BlockSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn slot(&self, name: &str) -> Option<&SlotSpec> {
        self.slots.iter().find(|s| s.name == name)
    }
}

/// Master macro defining the closed set of block kinds, their schemas and their registration.
macro_rules! define_block_kinds {
    ( $( $variant:ident => $type_name:literal {
            fields: [ $( $field:literal : $field_required:literal ),* $(,)? ],
            slots: [ $( $slot:literal : $slot_required:literal ),* $(,)? ] $(,)?
        } ),* $(,)? ) => {
        /// Every block kind the compiler understands.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum BlockKind {
            $( $variant, )*
        }

        impl BlockKind {
            pub const ALL: &'static [BlockKind] = &[ $( BlockKind::$variant, )* ];

            /// The canonical type name used in serialized workspaces.
            pub fn type_name(&self) -> &'static str {
                match self {
                    $( BlockKind::$variant => $type_name, )*
                }
            }

            pub fn schema(&self) -> &'static BlockSchema {
                match self {
                    $( BlockKind::$variant => &BlockSchema {
                        fields: &[ $( FieldSpec { name: $field, required: $field_required }, )* ],
                        slots: &[ $( SlotSpec { name: $slot, required: $slot_required }, )* ],
                    }, )*
                }
            }

            pub fn from_type_name(name: &str) -> Option<Self> {
                match name {
                    $( $type_name => Some(BlockKind::$variant), )*
                    _ => None,
                }
            }
        }

        pub(super) fn register_default_kinds(registry: &mut AHashMap<String, BlockKind>) {
            $( registry.insert($type_name.to_string(), BlockKind::$variant); )*
        }
    };
}

define_block_kinds! {
    Action => "action" {
        fields: ["name": true, "every": true],
        slots: ["do": true],
    },
    If => "if" {
        fields: ["condition": true],
        slots: ["then": true, "else": false],
    },
    Publish => "publish" {
        fields: ["topic": true, "payload": true],
        slots: [],
    },
    StatementSequence => "statementSequence" {
        fields: [],
        slots: ["statements": false],
    },
}

impl BlockKind {
    /// Whether the block can appear inside a statement slot.
    pub fn is_statement(&self) -> bool {
        !matches!(self, BlockKind::Action)
    }
}
