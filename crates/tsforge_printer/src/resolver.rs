//! Questions the printer asks the checker.

use tsforge_ast::NodeId;

/// What the printer needs to know about names and values it cannot see in
/// the tree alone.
pub trait EmitResolver {
    /// Whether `name` is declared in the global scope of the program.
    fn has_global_name(&self, name: &str) -> bool;

    /// The constant value of an enum member access, when it has one.
    fn get_constant_value(&self, _node: NodeId) -> Option<f64> {
        None
    }

    /// Whether an import alias is used as a value. Unreferenced aliases are
    /// dropped when types are stripped.
    fn is_referenced_alias_declaration(&self, _node: NodeId) -> bool {
        true
    }

    /// The name of the export container an identifier reference must be
    /// qualified with, such as `exports` or an enclosing namespace.
    fn get_referenced_export_container(&self, _node: NodeId) -> Option<String> {
        None
    }
}

/// A resolver for printing trees with no checker behind them.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResolver;

impl EmitResolver for NullResolver {
    fn has_global_name(&self, _name: &str) -> bool {
        false
    }
}
