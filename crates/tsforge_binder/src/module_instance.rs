//! Whether a namespace declaration produces a runtime value.

use tsforge_ast::{
    ModifierFlags, ModuleBody, ModuleDeclaration, NamedExportBindings, Statement,
    utilities::is_enum_const, HasNodeData,
};
use tsforge_core::InternedString;

/// How much of a namespace body exists at runtime.
///
/// Ordered from least to most instantiated, so combining the states of the
/// statements in a body is a `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModuleInstanceState {
    /// Only types, interfaces and non-exported imports.
    NonInstantiated,
    /// Values, but only const enums that are inlined at use sites.
    ConstEnumOnly,
    Instantiated,
}

/// Instance state of a namespace. A declaration without a body is
/// instantiated.
pub fn get_module_instance_state(decl: &ModuleDeclaration<'_>) -> ModuleInstanceState {
    let mut scopes = Vec::new();
    module_state(decl, &mut scopes)
}

fn module_state<'a>(decl: &'a ModuleDeclaration<'a>, scopes: &mut Vec<&'a [Statement<'a>]>) -> ModuleInstanceState {
    match &decl.body {
        None => ModuleInstanceState::Instantiated,
        Some(ModuleBody::ModuleDeclaration(inner)) => module_state(inner, scopes),
        Some(ModuleBody::ModuleBlock(block)) => {
            scopes.push(block.statements);
            let state = statements_state(block.statements, scopes);
            scopes.pop();
            state
        }
    }
}

fn statements_state<'a>(
    statements: &'a [Statement<'a>],
    scopes: &mut Vec<&'a [Statement<'a>]>,
) -> ModuleInstanceState {
    let mut state = ModuleInstanceState::NonInstantiated;
    for statement in statements {
        state = state.max(statement_state(statement, scopes));
        if state == ModuleInstanceState::Instantiated {
            break;
        }
    }
    state
}

fn statement_state<'a>(statement: &'a Statement<'a>, scopes: &mut Vec<&'a [Statement<'a>]>) -> ModuleInstanceState {
    match statement {
        Statement::InterfaceDeclaration(_) | Statement::TypeAliasDeclaration(_) => ModuleInstanceState::NonInstantiated,
        Statement::EnumDeclaration(e) if is_enum_const(e) => ModuleInstanceState::ConstEnumOnly,
        Statement::ImportDeclaration(_) | Statement::ImportEqualsDeclaration(_)
            if !statement.data().has_modifier(ModifierFlags::EXPORT) =>
        {
            ModuleInstanceState::NonInstantiated
        }
        Statement::ExportDeclaration(export) if export.module_specifier.is_none() => match &export.export_clause {
            Some(NamedExportBindings::NamedExports(named)) => {
                let mut state = ModuleInstanceState::NonInstantiated;
                for specifier in named.elements {
                    let target = specifier.property_name.as_ref().unwrap_or(&specifier.name);
                    state = state.max(alias_target_state(target.escaped_text, scopes));
                    if state == ModuleInstanceState::Instantiated {
                        break;
                    }
                }
                state
            }
            _ => ModuleInstanceState::Instantiated,
        },
        Statement::ModuleDeclaration(inner) => module_state(inner, scopes),
        _ => ModuleInstanceState::Instantiated,
    }
}

/// State of the local declaration an `export { name }` refers to, searched
/// from the innermost enclosing statement list outwards. A name that cannot
/// be found may refer to a value.
fn alias_target_state<'a>(name: InternedString, scopes: &mut Vec<&'a [Statement<'a>]>) -> ModuleInstanceState {
    for depth in (0..scopes.len()).rev() {
        let mut found: Option<ModuleInstanceState> = None;
        for statement in scopes[depth] {
            if !statement_declares(statement, name) {
                continue;
            }
            let mut inner_scopes = scopes[..=depth].to_vec();
            let state = statement_state(statement, &mut inner_scopes);
            let state = if matches!(statement, Statement::ImportEqualsDeclaration(_)) {
                ModuleInstanceState::Instantiated
            } else {
                state
            };
            found = Some(found.map_or(state, |f| f.max(state)));
            if found == Some(ModuleInstanceState::Instantiated) {
                return ModuleInstanceState::Instantiated;
            }
        }
        if let Some(state) = found {
            return state;
        }
    }
    ModuleInstanceState::Instantiated
}

fn statement_declares(statement: &Statement<'_>, name: InternedString) -> bool {
    let declared = match statement {
        Statement::FunctionDeclaration(f) => f.name.as_ref(),
        Statement::ClassDeclaration(c) => c.name.as_ref(),
        Statement::InterfaceDeclaration(i) => Some(&i.name),
        Statement::TypeAliasDeclaration(t) => Some(&t.name),
        Statement::EnumDeclaration(e) => Some(&e.name),
        Statement::ImportEqualsDeclaration(i) => Some(&i.name),
        Statement::ModuleDeclaration(m) => match &m.name {
            tsforge_ast::ModuleName::Identifier(id) => Some(id),
            tsforge_ast::ModuleName::StringLiteral(_) => None,
        },
        _ => None,
    };
    declared.is_some_and(|id| id.escaped_text == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsforge_ast::{ModuleName, NodeFactory, NodeFlags};
    use tsforge_core::{CompilerArena, StringInterner};

    fn namespace<'a>(f: &NodeFactory<'a>, statements: Vec<Statement<'a>>) -> Statement<'a> {
        f.create_module_declaration(
            ModuleName::Identifier(f.create_identifier("N")),
            Some(f.create_module_block(statements)),
            NodeFlags::NAMESPACE,
        )
    }

    fn state_of(stmt: &Statement<'_>) -> ModuleInstanceState {
        match stmt {
            Statement::ModuleDeclaration(m) => get_module_instance_state(m),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_type_only_namespace_is_not_instantiated() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let alias = f.create_type_alias_declaration(
            f.create_identifier("T"),
            None,
            f.create_keyword_type_node(tsforge_ast::SyntaxKind::StringKeyword),
        );
        let ns = namespace(&f, vec![alias]);
        assert_eq!(state_of(&ns), ModuleInstanceState::NonInstantiated);
    }

    #[test]
    fn test_const_enum_only_namespace() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let e = f.create_enum_declaration(f.create_identifier("E"), vec![]).with_modifiers(ModifierFlags::CONST);
        let ns = namespace(&f, vec![e]);
        assert_eq!(state_of(&ns), ModuleInstanceState::ConstEnumOnly);
    }

    #[test]
    fn test_export_of_unknown_name_is_instantiated() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let spec = f.create_export_specifier(false, None, f.create_identifier("missing"));
        let export = f.create_export_declaration(false, Some(f.create_named_exports(vec![spec])), None, None);
        let ns = namespace(&f, vec![export]);
        assert_eq!(state_of(&ns), ModuleInstanceState::Instantiated);
    }

    #[test]
    fn test_export_of_local_interface_is_not_instantiated() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let iface = f.create_interface_declaration(f.create_identifier("I"), None, None, vec![]);
        let spec = f.create_export_specifier(false, None, f.create_identifier("I"));
        let export = f.create_export_declaration(false, Some(f.create_named_exports(vec![spec])), None, None);
        let ns = namespace(&f, vec![iface, export]);
        assert_eq!(state_of(&ns), ModuleInstanceState::NonInstantiated);
    }
}
