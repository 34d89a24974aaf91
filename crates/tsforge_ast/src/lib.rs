//! tsforge_ast: The typed syntax tree the binder and printer work on.
//!
//! Trees are built with [`NodeFactory`] (parsing is out of scope) and
//! allocated in a [`tsforge_core::CompilerArena`]. Node kinds are closed
//! enums per syntactic family, so the binder and printer dispatch with
//! exhaustive matches.

pub mod factory;
pub mod generated;
pub mod node;
pub mod node_ref;
pub mod syntax_kind;
pub mod types;
pub mod utilities;
pub mod visitor;

pub use factory::NodeFactory;
pub use generated::HasNodeData;
pub use node::*;
pub use node_ref::NodeRef;
pub use syntax_kind::SyntaxKind;
pub use types::*;
pub use visitor::{children, for_each_child};
