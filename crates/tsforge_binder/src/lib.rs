//! tsforge_binder: Symbol tables and control flow graphs.
//!
//! The binder walks a parsed source file once. It creates symbols for
//! declarations, links every node to its parent, lowers statements and
//! expressions into a control flow graph, and reports the diagnostics that
//! need no type information (duplicate declarations, strict-mode misuse,
//! unreachable code, unused labels).
//!
//! Results live in a [`BoundFile`]: the tree is never mutated.

mod binder;
mod bound_file;
mod container;
mod control_flow;
mod flow;
mod js_declarations;
mod module_instance;
mod narrowing;
mod strict_mode;
mod symbol;
mod transform_flags;

pub use binder::Binder;
pub use bound_file::{bind_source_file, BoundFile};
pub use container::ContainerFlags;
pub use flow::{FlowGraph, FlowLabel, FlowLabelKind, FlowNode, FlowNodeFlags, FlowNodeId};
pub use js_declarations::{get_assignment_declaration_kind, AssignmentDeclarationKind};
pub use module_instance::{get_module_instance_state, ModuleInstanceState};
pub use narrowing::{is_narrowable_reference, is_narrowing_expression};
pub use symbol::{InternalNames, Symbol, SymbolTable, TableRef};
pub use transform_flags::{compute_transform_flags, TransformFlagCache};
