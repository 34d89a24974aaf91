//! tsforge_core: Core utilities shared by the binder, printer and emitter.
//!
//! Provides the node arena, string interning, text ranges with line maps,
//! and the hashed collections used for side tables.

pub mod arena;
pub mod collections;
pub mod intern;
pub mod text;

pub use arena::CompilerArena;
pub use intern::{InternedString, StringInterner};
pub use text::{LineMap, TextRange, TextSpan};
