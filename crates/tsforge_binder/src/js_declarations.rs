//! Declarations made by assignment in JavaScript files.
//!
//! CommonJS exports (`exports.x = ...`, `module.exports = ...`), constructor
//! functions that assign `this.x`, prototype assignments, expando
//! properties on functions (`f.x = 1`, which TypeScript files may use too)
//! and `Object.defineProperty` calls all declare symbols without a
//! declaration keyword.

use crate::binder::{is_aliasable_expression, Binder};
use crate::narrowing::is_entity_name_expression;
use crate::symbol::TableRef;
use tsforge_ast::types::{SymbolFlags, SymbolId};
use tsforge_ast::utilities::literal_expression_key;
use tsforge_ast::{
    BinaryExpression, CallExpression, ClassElement, Expression, MemberName, NodeId, NodeRef, ObjectLiteralElement,
    PropertyName, Statement, SyntaxKind,
};
use tsforge_core::{InternedString, StringInterner};

/// What an assignment or call declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentDeclarationKind {
    None,
    /// `exports.name = expr`, `module.exports.name = expr`
    ExportsProperty,
    /// `module.exports = expr`
    ModuleExports,
    /// `className.prototype.name = expr`
    PrototypeProperty,
    /// `this.name = expr`
    ThisProperty,
    /// `F.name = expr`
    Property,
    /// `F.prototype = { ... }`
    Prototype,
    /// `Object.defineProperty(x, 'name', { value: ... })`
    ObjectDefinePropertyValue,
    /// `Object.defineProperty(exports, 'name', { ... })`
    ObjectDefinePropertyExports,
    /// `Object.defineProperty(Foo.prototype, 'name', { ... })`
    ObjectDefinePrototypeProperty,
}

fn text_is(interner: &StringInterner, name: InternedString, text: &str) -> bool {
    interner.resolve(name) == text
}

fn is_identifier_named(expr: &Expression<'_>, interner: &StringInterner, text: &str) -> bool {
    matches!(expr, Expression::Identifier(id) if text_is(interner, id.escaped_text, text))
}

/// Name of `a.name` or `a["name"]`.
pub fn element_or_property_access_name(expr: &Expression<'_>, interner: &StringInterner) -> Option<InternedString> {
    match expr {
        Expression::PropertyAccess(access) => Some(access.name.identifier().escaped_text),
        Expression::ElementAccess(access) => literal_expression_key(access.argument_expression, interner),
        _ => None,
    }
}

/// `module.exports` or `module["exports"]`.
pub fn is_module_exports_access_expression(expr: &Expression<'_>, interner: &StringInterner) -> bool {
    match expr {
        Expression::PropertyAccess(access) => {
            is_identifier_named(access.expression, interner, "module")
                && text_is(interner, access.name.identifier().escaped_text, "exports")
        }
        Expression::ElementAccess(access) => {
            is_identifier_named(access.expression, interner, "module")
                && literal_expression_key(access.argument_expression, interner)
                    .is_some_and(|key| text_is(interner, key, "exports"))
        }
        _ => false,
    }
}

/// `a.b` or `a["b"]` where `a` is itself bindable.
fn is_bindable_static_access_expression(expr: &Expression<'_>, exclude_this: bool) -> bool {
    match expr {
        Expression::PropertyAccess(access) => {
            matches!(access.name, MemberName::Identifier(_))
                && ((!exclude_this && access.expression.is_keyword(SyntaxKind::ThisKeyword))
                    || is_bindable_static_name_expression(access.expression, true))
        }
        Expression::ElementAccess(access) => {
            matches!(
                access.argument_expression,
                Expression::StringLiteral(_) | Expression::NumericLiteral(_) | Expression::NoSubstitutionTemplateLiteral(_)
            ) && ((!exclude_this && access.expression.is_keyword(SyntaxKind::ThisKeyword))
                || is_bindable_static_name_expression(access.expression, true))
        }
        _ => false,
    }
}

/// An identifier or a chain of static accesses on one.
pub fn is_bindable_static_name_expression(expr: &Expression<'_>, exclude_this: bool) -> bool {
    is_entity_name_expression(expr) || is_bindable_static_access_expression(expr, exclude_this)
}

fn is_prototype_access(expr: &Expression<'_>, interner: &StringInterner) -> bool {
    is_bindable_static_access_expression(expr, false)
        && element_or_property_access_name(expr, interner).is_some_and(|n| text_is(interner, n, "prototype"))
}

fn access_expression<'a>(expr: &'a Expression<'a>) -> Option<&'a Expression<'a>> {
    match expr {
        Expression::PropertyAccess(access) => Some(access.expression),
        Expression::ElementAccess(access) => Some(access.expression),
        _ => None,
    }
}

/// `Object.defineProperty(target, "name", descriptor)` with a bindable target.
pub fn is_bindable_object_define_property_call(call: &CallExpression<'_>, interner: &StringInterner) -> bool {
    let Expression::PropertyAccess(callee) = call.expression else {
        return false;
    };
    call.arguments.len() == 3
        && is_identifier_named(callee.expression, interner, "Object")
        && text_is(interner, callee.name.identifier().escaped_text, "defineProperty")
        && matches!(call.arguments[1], Expression::StringLiteral(_) | Expression::NumericLiteral(_))
        && is_bindable_static_name_expression(&call.arguments[0], true)
}

/// `require("x")`.
pub fn is_require_call(expr: &Expression<'_>, interner: &StringInterner) -> bool {
    match expr {
        Expression::Call(call) => {
            is_identifier_named(call.expression, interner, "require")
                && call.arguments.len() == 1
                && matches!(call.arguments[0], Expression::StringLiteral(_) | Expression::NoSubstitutionTemplateLiteral(_))
        }
        _ => false,
    }
}

fn right_most_assigned_expression<'a>(mut expr: &'a Expression<'a>) -> &'a Expression<'a> {
    while let Expression::Binary(b) = expr {
        if b.operator() != SyntaxKind::EqualsToken {
            break;
        }
        expr = b.right;
    }
    expr
}

fn access_kind(lhs: &Expression<'_>, interner: &StringInterner) -> AssignmentDeclarationKind {
    let Some(target) = access_expression(lhs) else {
        return AssignmentDeclarationKind::None;
    };
    if target.is_keyword(SyntaxKind::ThisKeyword) {
        return AssignmentDeclarationKind::ThisProperty;
    }
    if is_module_exports_access_expression(lhs, interner) {
        return AssignmentDeclarationKind::ModuleExports;
    }
    if is_bindable_static_name_expression(target, true) {
        if is_prototype_access(target, interner) {
            return AssignmentDeclarationKind::PrototypeProperty;
        }
        // Walk to the access right above the root identifier.
        let mut next_to_last = lhs;
        while let Some(inner) = access_expression(next_to_last) {
            if matches!(inner, Expression::Identifier(_)) {
                break;
            }
            next_to_last = inner;
        }
        if let Some(Expression::Identifier(root)) = access_expression(next_to_last) {
            let is_exports = text_is(interner, root.escaped_text, "exports")
                || (text_is(interner, root.escaped_text, "module")
                    && element_or_property_access_name(next_to_last, interner)
                        .is_some_and(|n| text_is(interner, n, "exports")));
            if is_exports && is_bindable_static_access_expression(lhs, false) {
                return AssignmentDeclarationKind::ExportsProperty;
            }
        }
        let dynamic_element_access = matches!(lhs, Expression::ElementAccess(e) if literal_expression_key(e.argument_expression, interner).is_none());
        if is_bindable_static_name_expression(lhs, true) || dynamic_element_access {
            return AssignmentDeclarationKind::Property;
        }
    }
    AssignmentDeclarationKind::None
}

/// Classify an assignment or call. Outside JavaScript files only
/// [`AssignmentDeclarationKind::Property`] is recognized.
pub fn get_assignment_declaration_kind(
    expr: &Expression<'_>,
    in_js_file: bool,
    interner: &StringInterner,
) -> AssignmentDeclarationKind {
    let kind = match expr {
        Expression::Binary(binary) => {
            if binary.operator() != SyntaxKind::EqualsToken || access_expression(binary.left).is_none() {
                AssignmentDeclarationKind::None
            } else if access_expression(binary.left).is_some_and(|t| is_bindable_static_name_expression(t, true))
                && element_or_property_access_name(binary.left, interner)
                    .is_some_and(|n| text_is(interner, n, "prototype"))
                && matches!(right_most_assigned_expression(binary.right), Expression::ObjectLiteral(_))
            {
                AssignmentDeclarationKind::Prototype
            } else {
                access_kind(binary.left, interner)
            }
        }
        Expression::Call(call) => {
            if !is_bindable_object_define_property_call(call, interner) {
                AssignmentDeclarationKind::None
            } else {
                let target = &call.arguments[0];
                if is_identifier_named(target, interner, "exports") || is_module_exports_access_expression(target, interner)
                {
                    AssignmentDeclarationKind::ObjectDefinePropertyExports
                } else if is_bindable_static_access_expression(target, false)
                    && element_or_property_access_name(target, interner)
                        .is_some_and(|n| text_is(interner, n, "prototype"))
                {
                    AssignmentDeclarationKind::ObjectDefinePrototypeProperty
                } else {
                    AssignmentDeclarationKind::ObjectDefinePropertyValue
                }
            }
        }
        _ => AssignmentDeclarationKind::None,
    };
    if kind == AssignmentDeclarationKind::Property || in_js_file {
        kind
    } else {
        AssignmentDeclarationKind::None
    }
}

impl<'a, 'o> Binder<'a, 'o> {
    // ========================================================================
    // Names and lookups
    // ========================================================================

    pub(crate) fn access_name(&self, expr: &Expression<'_>) -> Option<InternedString> {
        element_or_property_access_name(expr, &self.interner)
    }

    pub(crate) fn is_module_exports_access(&self, expr: &Expression<'_>) -> bool {
        is_module_exports_access_expression(expr, &self.interner)
    }

    fn is_exports_identifier(&self, expr: &Expression<'_>) -> bool {
        matches!(expr, Expression::Identifier(id) if id.escaped_text == self.well_known.exports)
    }

    /// The symbol `name` resolves to in exactly `container`, following
    /// export-value locals to their exported symbol.
    pub(crate) fn lookup_symbol_for_name(&self, container: NodeRef<'a>, name: InternedString) -> Option<SymbolId> {
        if let Some(local) = self.locals.get(&container.id()).and_then(|t| t.get(&name)) {
            return Some(self.symbols[local.index()].export_symbol.unwrap_or(local));
        }
        if matches!(container, NodeRef::SourceFile(_)) {
            if let Some(global) = self.js_global_augmentations.get(&name) {
                return Some(global);
            }
        }
        let symbol = self.node_symbols.get(&container.id())?;
        self.symbols[symbol.index()].exports.as_ref()?.get(&name)
    }

    pub(crate) fn lookup_symbol_for_property_access(
        &self,
        expr: &Expression<'_>,
        container: NodeRef<'a>,
    ) -> Option<SymbolId> {
        match expr {
            Expression::Identifier(id) => self.lookup_symbol_for_name(container, id.escaped_text),
            _ => {
                let target = access_expression(expr)?;
                let symbol = self.lookup_symbol_for_property_access(target, container)?;
                let name = self.access_name(expr)?;
                self.symbols[symbol.index()].exports.as_ref()?.get(&name)
            }
        }
    }

    /// `exports`, `module.exports`, or a file-level variable initialized to either.
    pub(crate) fn is_exports_or_module_exports_or_alias(&self, expr: &'a Expression<'a>) -> bool {
        let root = NodeRef::SourceFile(self.file);
        let mut expr = expr;
        for _ in 0..100 {
            if self.is_exports_identifier(expr) || self.is_module_exports_access(expr) {
                return true;
            }
            let Expression::Identifier(id) = expr else {
                return false;
            };
            let Some(symbol) = self.lookup_symbol_for_name(root, id.escaped_text) else {
                return false;
            };
            match self.symbols[symbol.index()].value_declaration {
                Some(NodeRef::VariableDeclaration(declaration)) => match declaration.initializer {
                    Some(initializer) => expr = initializer,
                    None => return false,
                },
                _ => return false,
            }
        }
        false
    }

    /// Files with CommonJS exports become modules, unless they are ES modules.
    pub(crate) fn set_common_js_module_indicator(&mut self, node: NodeRef<'a>) -> bool {
        if self.file.is_external_module() {
            return false;
        }
        if self.common_js_module_indicator.is_none() {
            self.common_js_module_indicator = Some(node.id());
            self.bind_source_file_as_external_module();
        }
        true
    }

    /// `var x = require("x")` and `var y = require("x").y`.
    pub(crate) fn is_require_variable(&self, declaration: NodeRef<'a>) -> bool {
        let NodeRef::VariableDeclaration(declaration) = declaration else {
            return false;
        };
        let Some(initializer) = declaration.initializer else {
            return false;
        };
        let initializer = match initializer {
            Expression::PropertyAccess(access) => access.expression,
            other => other,
        };
        is_require_call(initializer, &self.interner)
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// `module.exports` used as a value gets a file-local `module` symbol.
    pub(crate) fn bind_module_exports_reference(&mut self, expr: &'a Expression<'a>) {
        if !self.file.is_js_file() || self.common_js_module_indicator.is_none() || !self.is_module_exports_access(expr) {
            return;
        }
        if self.lookup_symbol_for_name(self.block_scope_container, self.well_known.module).is_some() {
            return;
        }
        let Some(module) = access_expression(expr) else {
            return;
        };
        self.parents.insert(NodeRef::Expression(module).id(), NodeRef::Expression(expr));
        let file = NodeRef::SourceFile(self.file).id();
        self.declare_symbol(
            TableRef::Locals(file),
            None,
            NodeRef::Expression(module),
            SymbolFlags::FUNCTION_SCOPED_VARIABLE | SymbolFlags::MODULE_EXPORTS,
            SymbolFlags::FUNCTION_SCOPED_VARIABLE_EXCLUDES,
            false,
            false,
        );
    }

    pub(crate) fn bind_assignment_declaration(&mut self, node: NodeRef<'a>, binary: &'a BinaryExpression<'a>) {
        let Some(expr) = node.as_expression() else {
            return;
        };
        match get_assignment_declaration_kind(expr, self.file.is_js_file(), &self.interner) {
            AssignmentDeclarationKind::ExportsProperty => self.bind_exports_property_assignment(node, binary),
            AssignmentDeclarationKind::ModuleExports => self.bind_module_exports_assignment(node, binary),
            AssignmentDeclarationKind::PrototypeProperty => self.bind_prototype_property_assignment(binary.left, node),
            AssignmentDeclarationKind::Prototype => self.bind_prototype_assignment(binary),
            AssignmentDeclarationKind::ThisProperty => self.bind_this_property_assignment(node, binary),
            AssignmentDeclarationKind::Property => {
                let target = access_expression(binary.left);
                if self.file.is_js_file() {
                    if let Some(Expression::Identifier(id)) = target {
                        let symbol = self.lookup_symbol_for_name(self.block_scope_container, id.escaped_text);
                        if symbol.is_some_and(|s| self.is_this_initialized_declaration(s)) {
                            self.bind_this_property_assignment(node, binary);
                            return;
                        }
                    }
                }
                self.bind_special_property_assignment(node, binary);
            }
            _ => {}
        }
    }

    pub(crate) fn bind_call_expression(&mut self, node: NodeRef<'a>, call: &'a CallExpression<'a>) {
        let Some(expr) = node.as_expression() else {
            return;
        };
        match get_assignment_declaration_kind(expr, self.file.is_js_file(), &self.interner) {
            AssignmentDeclarationKind::ObjectDefinePropertyValue => self.bind_object_define_property_assignment(node, call),
            AssignmentDeclarationKind::ObjectDefinePropertyExports => self.bind_object_define_property_export(node, call),
            AssignmentDeclarationKind::ObjectDefinePrototypeProperty => {
                self.bind_object_define_prototype_property(node, call)
            }
            _ => {
                if self.file.is_js_file()
                    && self.common_js_module_indicator.is_none()
                    && is_require_call(expr, &self.interner)
                {
                    self.set_common_js_module_indicator(node);
                }
            }
        }
    }

    // ========================================================================
    // CommonJS exports
    // ========================================================================

    fn bind_exports_property_assignment(&mut self, node: NodeRef<'a>, binary: &'a BinaryExpression<'a>) {
        if !self.set_common_js_module_indicator(node) {
            return;
        }
        let Some(target) = access_expression(binary.left) else {
            return;
        };
        let Some(symbol) = self.mark_entity_name_as_module(target) else {
            return;
        };
        let is_alias = is_aliasable_expression(binary.right)
            && (self.is_exports_identifier(target) || self.is_module_exports_access(target));
        let flags = if is_alias { SymbolFlags::ALIAS } else { SymbolFlags::PROPERTY | SymbolFlags::EXPORT_VALUE };
        let left = NodeRef::Expression(binary.left);
        self.parents.insert(left.id(), node);
        self.declare_symbol(TableRef::Exports(symbol), Some(symbol), left, flags, SymbolFlags::empty(), false, false);
    }

    /// Each identifier of `exports.a.b` that names a symbol becomes a namespace.
    fn mark_entity_name_as_module(&mut self, expr: &'a Expression<'a>) -> Option<SymbolId> {
        if self.is_exports_or_module_exports_or_alias(expr) {
            return self.file_symbol;
        }
        let symbol = match expr {
            Expression::Identifier(id) => self.lookup_symbol_for_name(self.container, id.escaped_text),
            _ => {
                let parent = self.mark_entity_name_as_module(access_expression(expr)?)?;
                let name = self.access_name(expr)?;
                self.symbols[parent.index()].exports.as_ref()?.get(&name)
            }
        }?;
        self.add_declaration_to_symbol(
            symbol,
            NodeRef::Expression(expr),
            SymbolFlags::VALUE_MODULE | SymbolFlags::ASSIGNMENT,
        );
        Some(symbol)
    }

    fn bind_module_exports_assignment(&mut self, node: NodeRef<'a>, binary: &'a BinaryExpression<'a>) {
        if !self.set_common_js_module_indicator(node) {
            return;
        }
        let assigned = right_most_assigned_expression(binary.right);
        let is_empty_object = matches!(assigned, Expression::ObjectLiteral(o) if o.properties.is_empty());
        let at_file_level = matches!(self.container, NodeRef::SourceFile(_));
        if is_empty_object || (at_file_level && self.is_exports_or_module_exports_or_alias(assigned)) {
            return;
        }
        let Some(file_symbol) = self.file_symbol else {
            return;
        };

        // `module.exports = { a, b }` re-exports each name.
        if let Expression::ObjectLiteral(literal) = assigned {
            let all_shorthand = literal
                .properties
                .iter()
                .all(|p| matches!(p, ObjectLiteralElement::ShorthandPropertyAssignment(_)));
            if all_shorthand {
                for property in literal.properties {
                    self.declare_symbol(
                        TableRef::Exports(file_symbol),
                        Some(file_symbol),
                        NodeRef::ObjectLiteralElement(property),
                        SymbolFlags::ALIAS | SymbolFlags::ASSIGNMENT,
                        SymbolFlags::empty(),
                        false,
                        false,
                    );
                }
                return;
            }
        }

        let flags = if is_aliasable_expression(assigned) {
            SymbolFlags::ALIAS
        } else {
            SymbolFlags::PROPERTY | SymbolFlags::EXPORT_VALUE | SymbolFlags::VALUE_MODULE
        };
        let symbol = self.declare_symbol(
            TableRef::Exports(file_symbol),
            Some(file_symbol),
            node,
            flags | SymbolFlags::ASSIGNMENT,
            SymbolFlags::empty(),
            false,
            false,
        );
        self.set_value_declaration(symbol, node);
    }

    fn bind_object_define_property_export(&mut self, node: NodeRef<'a>, call: &'a CallExpression<'a>) {
        if !self.set_common_js_module_indicator(node) {
            return;
        }
        if let Some(symbol) = self.mark_entity_name_as_module(&call.arguments[0]) {
            self.declare_symbol(
                TableRef::Exports(symbol),
                Some(symbol),
                node,
                SymbolFlags::PROPERTY | SymbolFlags::EXPORT_VALUE,
                SymbolFlags::empty(),
                false,
                false,
            );
        }
    }

    // ========================================================================
    // this-properties
    // ========================================================================

    /// The nearest function, class member, namespace or file that `this`
    /// refers to at `node`. Arrow functions are transparent.
    fn this_container(&self, node: NodeRef<'a>) -> NodeRef<'a> {
        for ancestor in self.ancestors(node) {
            match ancestor {
                NodeRef::Expression(Expression::ArrowFunction(_)) => continue,
                NodeRef::Statement(Statement::FunctionDeclaration(_) | Statement::ModuleDeclaration(_))
                | NodeRef::Statement(Statement::EnumDeclaration(_))
                | NodeRef::Expression(Expression::FunctionExpression(_))
                | NodeRef::ModuleDeclaration(_)
                | NodeRef::ClassElement(_)
                | NodeRef::TypeElement(_)
                | NodeRef::SourceFile(_) => return ancestor,
                NodeRef::ObjectLiteralElement(
                    ObjectLiteralElement::MethodDeclaration(_)
                    | ObjectLiteralElement::GetAccessor(_)
                    | ObjectLiteralElement::SetAccessor(_),
                ) => return ancestor,
                _ => {}
            }
        }
        NodeRef::SourceFile(self.file)
    }

    fn bind_this_property_assignment(&mut self, node: NodeRef<'a>, binary: &'a BinaryExpression<'a>) {
        let declaration = NodeRef::Expression(binary.left);
        self.parents.insert(declaration.id(), node);
        let dynamic = has_dynamic_access_name(binary.left, &self.interner);
        let this_container = self.this_container(node);
        match this_container {
            NodeRef::Statement(Statement::FunctionDeclaration(_))
            | NodeRef::Expression(Expression::FunctionExpression(_)) => {
                let mut constructor = self.node_symbols.get(&this_container.id()).copied();
                // `C.prototype.m = function () { this.x = 1 }` adds to `C`.
                if let Some(NodeRef::Expression(Expression::Binary(assignment))) = self.parent_of(this_container) {
                    if assignment.operator() == SyntaxKind::EqualsToken
                        && is_bindable_static_access_expression(assignment.left, false)
                    {
                        if let Some(prototype) = access_expression(assignment.left) {
                            if is_prototype_access(prototype, &self.interner) {
                                if let Some(class_name) = access_expression(prototype) {
                                    let outer = self.this_parent_container.unwrap_or(self.container);
                                    constructor = self.lookup_symbol_for_property_access(class_name, outer);
                                }
                            }
                        }
                    }
                }
                let Some(constructor) = constructor else {
                    return;
                };
                let Some(value_declaration) = self.symbols[constructor.index()].value_declaration else {
                    return;
                };
                if dynamic {
                    self.bind_dynamically_named_assignment(declaration, constructor);
                } else {
                    self.declare_symbol(
                        TableRef::Members(constructor),
                        Some(constructor),
                        declaration,
                        SymbolFlags::PROPERTY | SymbolFlags::ASSIGNMENT,
                        SymbolFlags::PROPERTY_EXCLUDES & !SymbolFlags::PROPERTY,
                        false,
                        false,
                    );
                }
                self.add_declaration_to_symbol(constructor, value_declaration, SymbolFlags::CLASS);
            }
            NodeRef::ClassElement(
                element @ (ClassElement::Constructor(_)
                | ClassElement::PropertyDeclaration(_)
                | ClassElement::MethodDeclaration(_)
                | ClassElement::GetAccessor(_)
                | ClassElement::SetAccessor(_)
                | ClassElement::ClassStaticBlockDeclaration(_)),
            ) => {
                let Some(class) = self.parent_of(this_container) else {
                    return;
                };
                let Some(&class_symbol) = self.node_symbols.get(&class.id()) else {
                    return;
                };
                let is_static = this_container.data().has_modifier(tsforge_ast::ModifierFlags::STATIC)
                    || matches!(element, ClassElement::ClassStaticBlockDeclaration(_));
                let table = if is_static { TableRef::Exports(class_symbol) } else { TableRef::Members(class_symbol) };
                if dynamic {
                    self.bind_dynamically_named_assignment(declaration, class_symbol);
                } else {
                    self.declare_symbol(
                        table,
                        Some(class_symbol),
                        declaration,
                        SymbolFlags::PROPERTY | SymbolFlags::ASSIGNMENT,
                        SymbolFlags::empty(),
                        true,
                        false,
                    );
                }
            }
            NodeRef::ObjectLiteralElement(_) => {
                let Some(literal) = self.parent_of(this_container) else {
                    return;
                };
                let Some(&literal_symbol) = self.node_symbols.get(&literal.id()) else {
                    return;
                };
                if !dynamic {
                    self.declare_symbol(
                        TableRef::Members(literal_symbol),
                        Some(literal_symbol),
                        declaration,
                        SymbolFlags::PROPERTY | SymbolFlags::ASSIGNMENT,
                        SymbolFlags::empty(),
                        true,
                        false,
                    );
                }
            }
            NodeRef::SourceFile(_) => {
                if dynamic {
                    return;
                }
                match (self.common_js_module_indicator, self.file_symbol) {
                    (Some(_), Some(file_symbol)) => {
                        self.declare_symbol(
                            TableRef::Exports(file_symbol),
                            Some(file_symbol),
                            declaration,
                            SymbolFlags::PROPERTY | SymbolFlags::EXPORT_VALUE,
                            SymbolFlags::empty(),
                            false,
                            false,
                        );
                    }
                    _ => {
                        self.declare_symbol_and_add_to_symbol_table(
                            declaration,
                            SymbolFlags::FUNCTION_SCOPED_VARIABLE,
                            SymbolFlags::FUNCTION_SCOPED_VARIABLE_EXCLUDES,
                        );
                    }
                }
            }
            NodeRef::Statement(Statement::ModuleDeclaration(_)) | NodeRef::ModuleDeclaration(_) => {}
            other => panic!("unexpected this-container {:?} for a this-property assignment", other.kind()),
        }
    }

    fn bind_dynamically_named_assignment(&mut self, declaration: NodeRef<'a>, owner: SymbolId) {
        let name = self.names.computed;
        self.bind_anonymous_declaration(declaration, SymbolFlags::PROPERTY | SymbolFlags::ASSIGNMENT, name);
        self.symbols[owner.index()].assignment_declaration_members.push(declaration);
    }

    /// `var self = this;` makes `self.x = 1` a this-property assignment.
    fn is_this_initialized_declaration(&self, symbol: SymbolId) -> bool {
        matches!(
            self.symbols[symbol.index()].value_declaration,
            Some(NodeRef::VariableDeclaration(v)) if v.initializer.is_some_and(|i| i.is_keyword(SyntaxKind::ThisKeyword))
        )
    }

    // ========================================================================
    // Prototype and expando assignments
    // ========================================================================

    /// `C.prototype.m = ...`
    fn bind_prototype_property_assignment(&mut self, lhs: &'a Expression<'a>, parent: NodeRef<'a>) {
        let Some(class_prototype) = access_expression(lhs) else {
            return;
        };
        let Some(constructor_function) = access_expression(class_prototype) else {
            return;
        };
        self.parents.insert(NodeRef::Expression(lhs).id(), parent);
        self.bind_property_assignment(constructor_function, lhs, true, true);
    }

    /// `C.prototype = { ... }`
    fn bind_prototype_assignment(&mut self, binary: &'a BinaryExpression<'a>) {
        let Some(constructor_function) = access_expression(binary.left) else {
            return;
        };
        self.bind_property_assignment(constructor_function, binary.left, false, true);
    }

    /// `F.x = ...` for a function `F`, or anything in JavaScript.
    fn bind_special_property_assignment(&mut self, node: NodeRef<'a>, binary: &'a BinaryExpression<'a>) {
        let Some(target) = access_expression(binary.left) else {
            return;
        };
        let parent_symbol = self
            .lookup_symbol_for_property_access(target, self.container)
            .or_else(|| self.lookup_symbol_for_property_access(target, self.block_scope_container));
        if !self.file.is_js_file() && !parent_symbol.is_some_and(|s| self.is_function_symbol(s)) {
            return;
        }
        let mut root = binary.left;
        while let Some(inner) = access_expression(root) {
            root = inner;
        }
        if let Expression::Identifier(id) = root {
            let aliased = self
                .lookup_symbol_for_name(self.container, id.escaped_text)
                .is_some_and(|s| self.symbols[s.index()].has_flags(SymbolFlags::ALIAS));
            if aliased {
                return;
            }
        }
        let left = NodeRef::Expression(binary.left);
        self.parents.insert(left.id(), node);

        let at_file_level = matches!(self.container, NodeRef::SourceFile(_));
        if matches!(target, Expression::Identifier(_)) && at_file_level && self.is_exports_or_module_exports_or_alias(target)
        {
            self.bind_exports_property_assignment(node, binary);
        } else if has_dynamic_access_name(binary.left, &self.interner) {
            let name = self.names.computed;
            self.bind_anonymous_declaration(node, SymbolFlags::PROPERTY | SymbolFlags::ASSIGNMENT, name);
            let is_top_level = self.is_top_level_namespace_assignment(binary.left);
            if let Some(namespace) = self.bind_potentially_missing_namespaces(parent_symbol, target, is_top_level, false, false)
            {
                self.symbols[namespace.index()].assignment_declaration_members.push(node);
            }
        } else {
            self.bind_property_assignment(target, binary.left, false, false);
        }
    }

    fn bind_property_assignment(
        &mut self,
        name: &'a Expression<'a>,
        property_access: &'a Expression<'a>,
        is_prototype_property: bool,
        container_is_class: bool,
    ) {
        let namespace = self
            .lookup_symbol_for_property_access(name, self.container)
            .or_else(|| self.lookup_symbol_for_property_access(name, self.block_scope_container));
        let is_top_level = self.is_top_level_namespace_assignment(property_access);
        let Some(target) = access_expression(property_access) else {
            return;
        };
        let namespace = self.bind_potentially_missing_namespaces(
            namespace,
            target,
            is_top_level,
            is_prototype_property,
            container_is_class,
        );
        self.bind_potentially_new_expando_member(NodeRef::Expression(property_access), namespace, is_prototype_property);
    }

    /// Whether the assignment statement sits directly in the file.
    fn is_top_level_namespace_assignment(&self, property_access: &'a Expression<'a>) -> bool {
        let mut node = NodeRef::Expression(property_access);
        while let Some(parent) = self.parent_of(node) {
            match parent {
                NodeRef::Expression(Expression::Binary(_)) => node = parent,
                NodeRef::Statement(Statement::ExpressionStatement(_)) => {
                    return matches!(self.parent_of(parent), Some(NodeRef::SourceFile(_)));
                }
                _ => return false,
            }
        }
        false
    }

    /// Declare `a` and `a.b` of `a.b.c = 1` as namespaces when they do not
    /// exist yet.
    fn bind_potentially_missing_namespaces(
        &mut self,
        namespace: Option<SymbolId>,
        entity_name: &'a Expression<'a>,
        is_top_level: bool,
        is_prototype_property: bool,
        container_is_class: bool,
    ) -> Option<SymbolId> {
        if namespace.is_some_and(|s| self.symbols[s.index()].has_flags(SymbolFlags::ALIAS)) {
            return namespace;
        }
        let mut namespace = namespace;
        if is_top_level && !is_prototype_property {
            namespace = self.declare_namespace_chain(entity_name);
        }
        if container_is_class {
            if let Some(symbol) = namespace {
                if let Some(value_declaration) = self.symbols[symbol.index()].value_declaration {
                    self.add_declaration_to_symbol(symbol, value_declaration, SymbolFlags::CLASS);
                }
            }
        }
        namespace
    }

    fn declare_namespace_chain(&mut self, expr: &'a Expression<'a>) -> Option<SymbolId> {
        let flags = SymbolFlags::MODULE | SymbolFlags::ASSIGNMENT;
        let excludes = SymbolFlags::VALUE_MODULE_EXCLUDES & !SymbolFlags::ASSIGNMENT;
        if self.is_exports_or_module_exports_or_alias(expr) {
            return self.file_symbol;
        }
        let (parent, name, node) = match expr {
            Expression::Identifier(id) => (None, id.escaped_text, NodeRef::Expression(expr)),
            _ => {
                let parent = self.declare_namespace_chain(access_expression(expr)?);
                (parent, self.access_name(expr)?, NodeRef::Expression(expr))
            }
        };
        let existing = match parent {
            None => self.lookup_symbol_for_name(self.container, name),
            Some(parent) => self.symbols[parent.index()].exports.as_ref().and_then(|e| e.get(&name)),
        };
        if let Some(symbol) = existing {
            self.add_declaration_to_symbol(symbol, node, flags);
            return Some(symbol);
        }
        let table = match parent {
            Some(parent) => TableRef::Exports(parent),
            None => TableRef::JsGlobalAugmentations,
        };
        Some(self.declare_symbol(table, parent, node, flags, excludes, false, false))
    }

    fn bind_potentially_new_expando_member(
        &mut self,
        declaration: NodeRef<'a>,
        namespace: Option<SymbolId>,
        is_prototype_property: bool,
    ) {
        let Some(namespace) = namespace else {
            return;
        };
        if !self.is_expando_symbol(namespace) {
            return;
        }
        let table = if is_prototype_property { TableRef::Members(namespace) } else { TableRef::Exports(namespace) };

        let mut includes = SymbolFlags::empty();
        let mut excludes = SymbolFlags::empty();
        match declaration {
            NodeRef::Expression(Expression::Call(call)) => {
                if let Some(Expression::ObjectLiteral(descriptor)) = call.arguments.get(2) {
                    for property in descriptor.properties {
                        let key = match property {
                            ObjectLiteralElement::PropertyAssignment(p) => property_key(&p.name, &self.interner),
                            ObjectLiteralElement::MethodDeclaration(m) => property_key(&m.name, &self.interner),
                            _ => None,
                        };
                        match key.as_deref() {
                            Some("get") => {
                                includes |= SymbolFlags::GET_ACCESSOR;
                                excludes |= SymbolFlags::GET_ACCESSOR_EXCLUDES;
                            }
                            Some("set") => {
                                includes |= SymbolFlags::SET_ACCESSOR;
                                excludes |= SymbolFlags::SET_ACCESSOR_EXCLUDES;
                            }
                            _ => {}
                        }
                    }
                }
            }
            NodeRef::Expression(_) => {
                let initializer = self.parent_of(declaration).and_then(|p| match p {
                    NodeRef::Expression(Expression::Binary(b)) => Some(right_most_assigned_expression(b.right)),
                    _ => None,
                });
                if initializer.is_some_and(|i| i.is_function_like()) {
                    includes = SymbolFlags::METHOD;
                    excludes = SymbolFlags::METHOD_EXCLUDES;
                }
            }
            _ => {}
        }
        if includes.is_empty() {
            includes = SymbolFlags::PROPERTY;
            excludes = SymbolFlags::PROPERTY_EXCLUDES;
        }
        self.declare_symbol(
            table,
            Some(namespace),
            declaration,
            includes | SymbolFlags::ASSIGNMENT,
            excludes & !SymbolFlags::ASSIGNMENT,
            false,
            false,
        );
    }

    /// Functions, classes, namespaces and variables initialized to one of
    /// them (or to an empty object literal) may gain members by assignment.
    fn is_expando_symbol(&self, symbol: SymbolId) -> bool {
        let symbol = &self.symbols[symbol.index()];
        if symbol.has_flags(SymbolFlags::FUNCTION | SymbolFlags::CLASS | SymbolFlags::NAMESPACE_MODULE) {
            return true;
        }
        let Some(declaration) = symbol.value_declaration else {
            return false;
        };
        let (initializer, name_is_prototype) = match declaration {
            NodeRef::VariableDeclaration(v) => (v.initializer, false),
            NodeRef::Expression(Expression::Binary(b)) => (Some(b.right), is_prototype_access(b.left, &self.interner)),
            NodeRef::Expression(access @ Expression::PropertyAccess(_)) => {
                let right = match self.parent_of(declaration) {
                    Some(NodeRef::Expression(Expression::Binary(b))) => Some(b.right),
                    _ => None,
                };
                (right, is_prototype_access(access, &self.interner))
            }
            NodeRef::Expression(Expression::Call(call)) => {
                return call.arguments.get(2).is_some_and(|a| matches!(a, Expression::ObjectLiteral(_)));
            }
            _ => (None, false),
        };
        let Some(initializer) = initializer else {
            return false;
        };
        let mut initializer = right_most_assigned_expression(initializer);
        if let Expression::Binary(b) = initializer {
            if matches!(b.operator(), SyntaxKind::BarBarToken | SyntaxKind::QuestionQuestionToken) {
                initializer = b.right;
            }
        }
        is_expando_initializer(initializer, name_is_prototype)
    }

    /// `function F() {}` or `var F = function () {}`.
    fn is_function_symbol(&self, symbol: SymbolId) -> bool {
        match self.symbols[symbol.index()].value_declaration {
            Some(NodeRef::Statement(Statement::FunctionDeclaration(_))) => true,
            Some(NodeRef::VariableDeclaration(v)) => v.initializer.is_some_and(|i| i.is_function_like()),
            _ => false,
        }
    }

    // ========================================================================
    // Object.defineProperty
    // ========================================================================

    fn bind_object_define_property_assignment(&mut self, node: NodeRef<'a>, call: &'a CallExpression<'a>) {
        let target = &call.arguments[0];
        let namespace = self.lookup_symbol_for_property_access(target, self.container);
        let is_top_level = matches!(
            self.parent_of(node).and_then(|p| self.parent_of(p)),
            Some(NodeRef::SourceFile(_))
        );
        let namespace = self.bind_potentially_missing_namespaces(namespace, target, is_top_level, false, false);
        self.bind_potentially_new_expando_member(node, namespace, false);
    }

    fn bind_object_define_prototype_property(&mut self, node: NodeRef<'a>, call: &'a CallExpression<'a>) {
        let Some(class_name) = access_expression(&call.arguments[0]) else {
            return;
        };
        let namespace = self.lookup_symbol_for_property_access(class_name, self.container);
        if let Some(symbol) = namespace {
            if let Some(value_declaration) = self.symbols[symbol.index()].value_declaration {
                self.add_declaration_to_symbol(symbol, value_declaration, SymbolFlags::CLASS);
            }
        }
        self.bind_potentially_new_expando_member(node, namespace, true);
    }

    /// Node id of the file's first CommonJS construct.
    pub fn common_js_indicator(&self) -> Option<NodeId> {
        self.common_js_module_indicator
    }
}

fn property_key(name: &PropertyName<'_>, interner: &StringInterner) -> Option<String> {
    tsforge_ast::utilities::property_name_key(name, interner).map(|k| interner.unescape(k).to_string())
}

/// `a[expr]` where `expr` is not a literal.
fn has_dynamic_access_name(expr: &Expression<'_>, interner: &StringInterner) -> bool {
    matches!(expr, Expression::ElementAccess(e) if literal_expression_key(e.argument_expression, interner).is_none())
}

fn is_expando_initializer(initializer: &Expression<'_>, is_prototype_assignment: bool) -> bool {
    match initializer {
        Expression::FunctionExpression(_) | Expression::ClassExpression(_) | Expression::ArrowFunction(_) => true,
        Expression::ObjectLiteral(o) => o.properties.is_empty() || is_prototype_assignment,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsforge_ast::NodeFactory;
    use tsforge_core::CompilerArena;

    #[test]
    fn test_classifies_commonjs_assignments() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let interner = f.interner().clone();
        let id = |name: &str| Expression::Identifier(f.create_identifier(name));
        let one = || Expression::NumericLiteral(f.create_numeric_literal("1"));

        let exports_x = f.create_property_access(id("exports"), f.create_identifier("x"));
        let assign = f.create_assignment(exports_x, one());
        assert_eq!(
            get_assignment_declaration_kind(&assign, true, &interner),
            AssignmentDeclarationKind::ExportsProperty
        );
        assert_eq!(get_assignment_declaration_kind(&assign, false, &interner), AssignmentDeclarationKind::None);

        let module_exports = f.create_property_access(id("module"), f.create_identifier("exports"));
        let assign = f.create_assignment(module_exports, one());
        assert_eq!(
            get_assignment_declaration_kind(&assign, true, &interner),
            AssignmentDeclarationKind::ModuleExports
        );

        let this_x = f.create_property_access(f.create_this(), f.create_identifier("x"));
        let assign = f.create_assignment(this_x, one());
        assert_eq!(get_assignment_declaration_kind(&assign, true, &interner), AssignmentDeclarationKind::ThisProperty);
    }

    #[test]
    fn test_expando_property_is_recognized_in_typescript() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let interner = f.interner().clone();
        let target = f.create_property_access(Expression::Identifier(f.create_identifier("f")), f.create_identifier("x"));
        let assign = f.create_assignment(target, f.create_true());
        assert_eq!(get_assignment_declaration_kind(&assign, false, &interner), AssignmentDeclarationKind::Property);

        let prototype = f.create_property_access(
            Expression::Identifier(f.create_identifier("C")),
            f.create_identifier("prototype"),
        );
        let method = f.create_property_access(prototype, f.create_identifier("m"));
        let assign = f.create_assignment(method, f.create_true());
        assert_eq!(
            get_assignment_declaration_kind(&assign, true, &interner),
            AssignmentDeclarationKind::PrototypeProperty
        );
    }

    #[test]
    fn test_define_property_on_exports() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let interner = f.interner().clone();
        let callee = f.create_property_access(
            Expression::Identifier(f.create_identifier("Object")),
            f.create_identifier("defineProperty"),
        );
        let call = f.create_call(
            callee,
            None,
            vec![
                Expression::Identifier(f.create_identifier("exports")),
                Expression::StringLiteral(f.create_string_literal("x", false)),
                f.create_object_literal(vec![], false),
            ],
        );
        assert_eq!(
            get_assignment_declaration_kind(&call, true, &interner),
            AssignmentDeclarationKind::ObjectDefinePropertyExports
        );
        assert!(is_require_call(
            &f.create_call(
                Expression::Identifier(f.create_identifier("require")),
                None,
                vec![Expression::StringLiteral(f.create_string_literal("fs", false))]
            ),
            &interner
        ));
    }
}
