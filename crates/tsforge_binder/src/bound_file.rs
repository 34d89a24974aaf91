//! The result of binding one source file.

use crate::binder::Binder;
use crate::flow::{FlowGraph, FlowNodeId};
use crate::symbol::{Symbol, SymbolTable};
use crate::transform_flags::compute_transform_flags;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, span, Level};
use tsforge_ast::types::{NodeFlags, SymbolId};
use tsforge_ast::{NodeId, NodeRef, SourceFile, TransformFlags};
use tsforge_core::StringInterner;
use tsforge_diagnostics::{Diagnostic, DiagnosticCollection};
use tsforge_tsoptions::CompilerOptions;

/// Side tables produced by the binder, keyed by node id.
///
/// The syntax tree stays immutable; everything the binder learns about a
/// node is looked up here.
#[derive(Debug)]
pub struct BoundFile<'a> {
    file: &'a SourceFile<'a>,
    symbols: Vec<Symbol<'a>>,
    locals: FxHashMap<NodeId, SymbolTable>,
    parents: FxHashMap<NodeId, NodeRef<'a>>,
    node_symbols: FxHashMap<NodeId, SymbolId>,
    local_symbols: FxHashMap<NodeId, SymbolId>,
    flow_nodes: FxHashMap<NodeId, FlowNodeId>,
    end_flow: FxHashMap<NodeId, FlowNodeId>,
    return_flow: FxHashMap<NodeId, FlowNodeId>,
    fallthrough_flow: FxHashMap<NodeId, FlowNodeId>,
    node_flags: FxHashMap<NodeId, NodeFlags>,
    transform_flags: FxHashMap<NodeId, TransformFlags>,
    unreachable: FxHashSet<NodeId>,
    graph: FlowGraph,
    diagnostics: DiagnosticCollection,
    file_symbol: Option<SymbolId>,
    js_global_augmentations: SymbolTable,
    common_js_module_indicator: Option<NodeId>,
}

impl<'a> BoundFile<'a> {
    pub(crate) fn from_binder(binder: Binder<'a, '_>) -> Self {
        let transform_flags = compute_transform_flags(binder.file);
        Self {
            file: binder.file,
            symbols: binder.symbols,
            locals: binder.locals,
            parents: binder.parents,
            node_symbols: binder.node_symbols,
            local_symbols: binder.local_symbols,
            flow_nodes: binder.flow_nodes,
            end_flow: binder.end_flow,
            return_flow: binder.return_flow,
            fallthrough_flow: binder.fallthrough_flow,
            node_flags: binder.node_flags,
            transform_flags,
            unreachable: binder.unreachable,
            graph: binder.graph,
            diagnostics: binder.diagnostics,
            file_symbol: binder.file_symbol,
            js_global_augmentations: binder.js_global_augmentations,
            common_js_module_indicator: binder.common_js_module_indicator,
        }
    }

    #[inline]
    pub fn file(&self) -> &'a SourceFile<'a> {
        self.file
    }

    /// The symbol a declaration contributes to. For an exported local this
    /// is the export symbol; see [`BoundFile::local_symbol_of`].
    pub fn symbol_of(&self, node: NodeRef<'_>) -> Option<SymbolId> {
        self.node_symbols.get(&node.id()).copied()
    }

    /// The local half of an exported declaration.
    pub fn local_symbol_of(&self, node: NodeRef<'_>) -> Option<SymbolId> {
        self.local_symbols.get(&node.id()).copied()
    }

    #[inline]
    pub fn symbol(&self, id: SymbolId) -> &Symbol<'a> {
        &self.symbols[id.index()]
    }

    pub fn symbols(&self) -> &[Symbol<'a>] {
        &self.symbols
    }

    pub fn parent_of(&self, node: NodeRef<'_>) -> Option<NodeRef<'a>> {
        self.parents.get(&node.id()).copied()
    }

    /// The flow node in effect at a reference, statement or function expression.
    pub fn flow_of(&self, node: NodeRef<'_>) -> Option<FlowNodeId> {
        self.flow_nodes.get(&node.id()).copied()
    }

    /// Locals of a scope-owning container.
    pub fn locals_of(&self, node: NodeRef<'_>) -> Option<&SymbolTable> {
        self.locals.get(&node.id())
    }

    pub fn transform_flags_of(&self, node: NodeRef<'_>) -> TransformFlags {
        self.transform_flags.get(&node.id()).copied().unwrap_or(TransformFlags::NONE)
    }

    /// Flow at the end of a function body, when that end is reachable.
    pub fn end_flow_of(&self, node: NodeRef<'_>) -> Option<FlowNodeId> {
        self.end_flow.get(&node.id()).copied()
    }

    pub fn return_flow_of(&self, node: NodeRef<'_>) -> Option<FlowNodeId> {
        self.return_flow.get(&node.id()).copied()
    }

    /// Flow falling out of a case clause into the next one.
    pub fn fallthrough_flow_of(&self, node: NodeRef<'_>) -> Option<FlowNodeId> {
        self.fallthrough_flow.get(&node.id()).copied()
    }

    /// Flags the binder computed for a node, on top of the parser's.
    pub fn node_flags_of(&self, node: NodeRef<'_>) -> NodeFlags {
        self.node_flags.get(&node.id()).copied().unwrap_or(NodeFlags::NONE)
    }

    pub fn is_unreachable(&self, node: NodeRef<'_>) -> bool {
        self.unreachable.contains(&node.id())
    }

    #[inline]
    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    #[inline]
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_diagnostics()
    }

    /// The symbol of an external or CommonJS module.
    pub fn file_symbol(&self) -> Option<SymbolId> {
        self.file_symbol
    }

    /// Namespaces created by top-level JavaScript assignments such as
    /// `A.B = {}` where `A` is undeclared.
    pub fn js_global_augmentations(&self) -> &SymbolTable {
        &self.js_global_augmentations
    }

    /// The first `module.exports`, `exports.x` or `require` use that made a
    /// JavaScript file a CommonJS module.
    pub fn common_js_module_indicator(&self) -> Option<NodeId> {
        self.common_js_module_indicator
    }
}

/// Bind `file` and return its side tables.
pub fn bind_source_file<'a>(
    file: &'a SourceFile<'a>,
    options: &CompilerOptions,
    interner: &StringInterner,
) -> BoundFile<'a> {
    let _span = span!(Level::DEBUG, "bind_source_file", file = %file.file_name).entered();
    debug!("binding {}", file.file_name);
    let bound = Binder::new(file, options, interner).bind();
    debug!(
        symbols = bound.symbols.len(),
        diagnostics = bound.diagnostics.len(),
        flow_nodes = bound.graph.len(),
        "bound {}",
        file.file_name
    );
    bound
}
