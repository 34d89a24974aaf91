//! Symbols and symbol tables.

use tsforge_ast::types::{SymbolFlags, SymbolId};
use tsforge_ast::{NodeId, NodeRef};
use tsforge_core::collections::FxIndexMap;
use tsforge_core::{InternedString, StringInterner};

/// A named entity: a variable, function, class, namespace, property, ...
///
/// Merged declarations (interface + interface, namespace + class, function
/// overloads) share one symbol and appear in `declarations` in binding order.
#[derive(Debug, Clone)]
pub struct Symbol<'a> {
    pub id: SymbolId,
    /// Escaped name; internal names start with two underscores.
    pub name: InternedString,
    pub flags: SymbolFlags,
    pub declarations: Vec<NodeRef<'a>>,
    /// The first declaration that introduced a value meaning.
    pub value_declaration: Option<NodeRef<'a>>,
    /// Instance members of classes, interfaces and literals.
    pub members: Option<SymbolTable>,
    /// Exports of modules, static members of classes, enum members.
    pub exports: Option<SymbolTable>,
    /// Names declared by `export as namespace X`.
    pub global_exports: Option<SymbolTable>,
    pub parent: Option<SymbolId>,
    /// For a local with an exported meaning: the symbol in the export table.
    pub export_symbol: Option<SymbolId>,
    /// Set for `this.x = ...` properties that a later method may replace.
    pub is_replaceable_by_method: bool,
    /// For namespaces: `Some(true)` while the body holds only const enums.
    pub const_enum_only_module: Option<bool>,
    /// JavaScript assignments with computed names that add members to this symbol.
    pub assignment_declaration_members: Vec<NodeRef<'a>>,
}

impl<'a> Symbol<'a> {
    pub fn new(id: SymbolId, name: InternedString, flags: SymbolFlags) -> Self {
        Self {
            id,
            name,
            flags,
            declarations: Vec::new(),
            value_declaration: None,
            members: None,
            exports: None,
            global_exports: None,
            parent: None,
            export_symbol: None,
            is_replaceable_by_method: false,
            const_enum_only_module: None,
            assignment_declaration_members: Vec::new(),
        }
    }

    #[inline]
    pub fn has_flags(&self, flags: SymbolFlags) -> bool {
        self.flags.intersects(flags)
    }

    /// Whether `node` is one of this symbol's declarations.
    pub fn is_declared_by(&self, node: NodeId) -> bool {
        self.declarations.iter().any(|d| d.id() == node)
    }
}

/// Name to symbol map. Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    table: FxIndexMap<InternedString, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &InternedString) -> Option<SymbolId> {
        self.table.get(name).copied()
    }

    pub fn set(&mut self, name: InternedString, symbol: SymbolId) {
        self.table.insert(name, symbol);
    }

    pub fn has(&self, name: &InternedString) -> bool {
        self.table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&InternedString, &SymbolId)> {
        self.table.iter()
    }
}

/// Which table a declaration goes into.
///
/// Tables are owned by symbols or by container nodes, so the binder names
/// them by owner instead of holding `&mut` borrows across the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRef {
    /// The locals of a container node.
    Locals(NodeId),
    Exports(SymbolId),
    Members(SymbolId),
    GlobalExports(SymbolId),
    /// Globals created by JavaScript assignments such as `a.b = 1` with no
    /// declaration of `a` in the file.
    JsGlobalAugmentations,
}

/// Pre-interned names of anonymous and synthetic declarations.
#[derive(Debug, Clone, Copy)]
pub struct InternalNames {
    pub call: InternedString,
    pub constructor: InternedString,
    pub new: InternedString,
    pub index: InternedString,
    pub export_star: InternedString,
    pub global: InternedString,
    pub missing: InternedString,
    pub type_literal: InternedString,
    pub object: InternedString,
    pub class: InternedString,
    pub function: InternedString,
    pub computed: InternedString,
    pub default: InternedString,
    pub export_equals: InternedString,
    pub prototype: InternedString,
}

impl InternalNames {
    pub fn new(interner: &StringInterner) -> Self {
        Self {
            call: interner.intern_static("__call"),
            constructor: interner.intern_static("__constructor"),
            new: interner.intern_static("__new"),
            index: interner.intern_static("__index"),
            export_star: interner.intern_static("__export"),
            global: interner.intern_static("__global"),
            missing: interner.intern_static("__missing"),
            type_literal: interner.intern_static("__type"),
            object: interner.intern_static("__object"),
            class: interner.intern_static("__class"),
            function: interner.intern_static("__function"),
            computed: interner.intern_static("__computed"),
            default: interner.intern_static("default"),
            export_equals: interner.intern_static("export="),
            prototype: interner.intern_static("prototype"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table_keeps_insertion_order() {
        let interner = StringInterner::new();
        let mut table = SymbolTable::new();
        let (b, a) = (interner.intern("b"), interner.intern("a"));
        table.set(b, SymbolId(0));
        table.set(a, SymbolId(1));
        let names: Vec<_> = table.iter().map(|(n, _)| interner.resolve(*n).to_string()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(table.get(&a), Some(SymbolId(1)));
        assert!(!table.has(&interner.intern("c")));
    }

    #[test]
    fn test_internal_names_cannot_collide_with_user_names() {
        let interner = StringInterner::new();
        let names = InternalNames::new(&interner);
        assert_ne!(interner.intern_escaped("__function"), names.function);
    }
}
