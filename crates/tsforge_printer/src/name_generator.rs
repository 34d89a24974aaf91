//! Names for compiler-generated identifiers.
//!
//! A generated identifier gets its text the first time it is printed and
//! keeps it for the rest of the print pass. Candidate names are rejected
//! when they were already generated in this pass, are reserved by the
//! current or an enclosing scope, occur anywhere in the current file, or
//! are declared globally.

use crate::resolver::EmitResolver;
use rustc_hash::{FxHashMap, FxHashSet};
use tsforge_ast::{GeneratedIdentifierFlags, GeneratedIdentifierKind, GeneratedNameSource, Identifier, NodeId, SyntaxKind};
use tsforge_core::StringInterner;

/// Which kind of temporary to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempKind {
    /// `_a`, `_b`, ... `_z`, `_0`, `_1`, ...
    Auto,
    /// `_i` first, then the `Auto` sequence.
    Loop,
}

#[derive(Debug, Clone, Copy, Default)]
struct TempFlags {
    count: u32,
    loop_taken: bool,
}

pub struct NameGenerator<'r> {
    resolver: &'r dyn EmitResolver,
    file_identifiers: FxHashSet<String>,
    generated_names: FxHashSet<String>,
    /// One set per open scope; the last is the innermost.
    reserved_names: Vec<FxHashSet<String>>,
    temp_flags: TempFlags,
    temp_flags_stack: Vec<TempFlags>,
    auto_generated_names: FxHashMap<u32, String>,
    node_names: FxHashMap<NodeId, String>,
}

impl<'r> NameGenerator<'r> {
    pub fn new(resolver: &'r dyn EmitResolver) -> Self {
        Self {
            resolver,
            file_identifiers: FxHashSet::default(),
            generated_names: FxHashSet::default(),
            reserved_names: vec![FxHashSet::default()],
            temp_flags: TempFlags::default(),
            temp_flags_stack: Vec::new(),
            auto_generated_names: FxHashMap::default(),
            node_names: FxHashMap::default(),
        }
    }

    /// Forget everything generated so far. Called between print passes.
    pub fn reset(&mut self) {
        self.file_identifiers.clear();
        self.generated_names.clear();
        self.reserved_names.clear();
        self.reserved_names.push(FxHashSet::default());
        self.temp_flags = TempFlags::default();
        self.temp_flags_stack.clear();
        self.auto_generated_names.clear();
        self.node_names.clear();
    }

    /// Make `names` the identifiers of the file being printed.
    pub fn set_file_identifiers<'s>(&mut self, names: impl IntoIterator<Item = &'s str>) {
        self.file_identifiers.clear();
        self.file_identifiers.extend(names.into_iter().map(str::to_string));
    }

    /// Enter a name-generation scope. A node flagged to reuse its parent's
    /// temp scope passes `reuse = true` and nothing changes.
    pub fn push_scope(&mut self, reuse: bool) {
        if reuse {
            return;
        }
        self.temp_flags_stack.push(self.temp_flags);
        self.temp_flags = TempFlags::default();
        self.reserved_names.push(FxHashSet::default());
    }

    pub fn pop_scope(&mut self, reuse: bool) {
        if reuse {
            return;
        }
        self.temp_flags = self.temp_flags_stack.pop().unwrap_or_default();
        if self.reserved_names.len() > 1 {
            self.reserved_names.pop();
        }
    }

    /// Keep `name` away from this scope and every scope nested in it.
    pub fn reserve_name_in_nested_scopes(&mut self, name: &str) {
        if let Some(scope) = self.reserved_names.last_mut() {
            scope.insert(name.to_string());
        }
    }

    /// The text of a generated identifier, computed once per identifier.
    pub fn generate_name(&mut self, name: &Identifier, interner: &StringInterner) -> Option<String> {
        let info = name.auto_generate.as_ref()?;
        if info.kind == GeneratedIdentifierKind::Node {
            let source = info.node?;
            return Some(self.generate_name_for_node(&source, info.flags, interner));
        }
        if let Some(text) = self.auto_generated_names.get(&info.id) {
            return Some(text.clone());
        }
        let reserved = info.flags.contains(GeneratedIdentifierFlags::RESERVED_IN_NESTED_SCOPES);
        let text = match info.kind {
            GeneratedIdentifierKind::Auto => self.make_temp_variable_name(TempKind::Auto, reserved),
            GeneratedIdentifierKind::Loop => self.make_temp_variable_name(TempKind::Loop, reserved),
            _ => {
                let base = info.base.map(|b| interner.unescape(b)).unwrap_or("");
                let prefix = info.prefix.map(|p| interner.resolve(p)).unwrap_or("");
                let suffix = info.suffix.map(|s| interner.resolve(s)).unwrap_or("");
                let base = format!("{prefix}{base}{suffix}");
                let optimistic = info.flags.contains(GeneratedIdentifierFlags::OPTIMISTIC);
                if info.flags.contains(GeneratedIdentifierFlags::FILE_LEVEL) {
                    self.make_file_level_unique_name(&base, optimistic)
                } else {
                    self.make_unique_name(&base, None, optimistic, reserved)
                }
            }
        };
        self.auto_generated_names.insert(info.id, text.clone());
        Some(text)
    }

    /// A name derived from a declaration, import or export. Asking twice for
    /// the same node returns the same name.
    pub fn generate_name_for_node(
        &mut self,
        source: &GeneratedNameSource,
        flags: GeneratedIdentifierFlags,
        interner: &StringInterner,
    ) -> String {
        if let Some(name) = self.node_names.get(&source.id) {
            return name.clone();
        }
        let text = source.text.map(|t| interner.resolve(t).to_string());
        let optimistic = flags.contains(GeneratedIdentifierFlags::OPTIMISTIC);
        let reserved = flags.contains(GeneratedIdentifierFlags::RESERVED_IN_NESTED_SCOPES);
        let name = match (source.kind, text) {
            (SyntaxKind::Identifier | SyntaxKind::PrivateIdentifier, Some(text)) => {
                self.make_unique_name(&text, None, optimistic, reserved)
            }
            (SyntaxKind::ModuleDeclaration | SyntaxKind::EnumDeclaration, Some(text)) => {
                if self.is_unused_in_pass(&text) {
                    self.generated_names.insert(text.clone());
                    text
                } else {
                    self.make_unique_name(&text, None, false, false)
                }
            }
            (
                SyntaxKind::ImportDeclaration | SyntaxKind::ExportDeclaration | SyntaxKind::ImportEqualsDeclaration,
                text,
            ) => {
                let base = text
                    .as_deref()
                    .map(make_identifier_from_module_name)
                    .unwrap_or_else(|| "module".to_string());
                self.make_unique_name(&base, None, false, false)
            }
            (SyntaxKind::FunctionDeclaration | SyntaxKind::ClassDeclaration, Some(text)) => {
                self.make_unique_name(&text, None, optimistic, reserved)
            }
            (SyntaxKind::FunctionDeclaration | SyntaxKind::ClassDeclaration | SyntaxKind::ExportAssignment, _) => {
                self.make_unique_name("default", None, false, false)
            }
            (SyntaxKind::ClassExpression, _) => self.make_unique_name("class", None, false, false),
            (
                SyntaxKind::MethodDeclaration | SyntaxKind::GetAccessor | SyntaxKind::SetAccessor,
                Some(text),
            ) => self.make_unique_name(&text, None, optimistic, reserved),
            (SyntaxKind::ComputedPropertyName, _) => self.make_temp_variable_name(TempKind::Auto, true),
            _ => self.make_temp_variable_name(TempKind::Auto, reserved),
        };
        self.node_names.insert(source.id, name.clone());
        name
    }

    /// `base_name`, or `base_name_1`, `base_name_2`, ... until one is
    /// acceptable. `base_name` itself is only tried when `optimistic`.
    /// `is_acceptable` replaces the default uniqueness check.
    pub fn make_unique_name(
        &mut self,
        base_name: &str,
        is_acceptable: Option<&dyn Fn(&str) -> bool>,
        optimistic: bool,
        scoped: bool,
    ) -> String {
        let accept = |this: &Self, name: &str| match is_acceptable {
            Some(check) => check(name) && this.is_unique_name(name),
            None => this.is_unique_name(name),
        };
        if optimistic && accept(self, base_name) {
            self.record(base_name, scoped);
            return base_name.to_string();
        }
        let base = if base_name.ends_with('_') {
            base_name.to_string()
        } else {
            format!("{base_name}_")
        };
        let mut i = 1u32;
        loop {
            let candidate = format!("{base}{i}");
            if accept(self, &candidate) {
                self.record(&candidate, scoped);
                return candidate;
            }
            i += 1;
        }
    }

    /// The next free temporary of this scope.
    pub fn make_temp_variable_name(&mut self, kind: TempKind, reserved_in_nested_scopes: bool) -> String {
        if kind == TempKind::Loop && !self.temp_flags.loop_taken && self.is_unique_name("_i") {
            self.temp_flags.loop_taken = true;
            self.record("_i", reserved_in_nested_scopes);
            return "_i".to_string();
        }
        loop {
            let count = self.temp_flags.count;
            self.temp_flags.count += 1;
            // `_i` and `_n` belong to loop counters.
            if count == 8 || count == 13 {
                continue;
            }
            let name = if count < 26 {
                format!("_{}", (b'a' + count as u8) as char)
            } else {
                format!("_{}", count - 26)
            };
            if self.is_unique_name(&name) {
                self.record(&name, reserved_in_nested_scopes);
                return name;
            }
        }
    }

    fn make_file_level_unique_name(&mut self, base_name: &str, optimistic: bool) -> String {
        let check = |name: &str| self.is_file_level_unique_name(name);
        if optimistic && check(base_name) {
            self.generated_names.insert(base_name.to_string());
            return base_name.to_string();
        }
        let base = if base_name.ends_with('_') {
            base_name.to_string()
        } else {
            format!("{base_name}_")
        };
        let mut i = 1u32;
        loop {
            let candidate = format!("{base}{i}");
            if self.is_file_level_unique_name(&candidate) {
                self.generated_names.insert(candidate.clone());
                return candidate;
            }
            i += 1;
        }
    }

    fn record(&mut self, name: &str, scoped: bool) {
        if scoped {
            self.reserve_name_in_nested_scopes(name);
        } else {
            self.generated_names.insert(name.to_string());
        }
    }

    fn is_file_level_unique_name(&self, name: &str) -> bool {
        !self.file_identifiers.contains(name) && !self.resolver.has_global_name(name)
    }

    fn is_reserved_name(&self, name: &str) -> bool {
        self.reserved_names.iter().any(|scope| scope.contains(name))
    }

    fn is_unused_in_pass(&self, name: &str) -> bool {
        !self.generated_names.contains(name) && !self.is_reserved_name(name)
    }

    pub fn is_unique_name(&self, name: &str) -> bool {
        self.is_file_level_unique_name(name) && self.is_unused_in_pass(name)
    }
}

/// `./lib/my-module.js` becomes `my_module`.
pub fn make_identifier_from_module_name(module_name: &str) -> String {
    let base = tsforge_tspath::get_base_file_name(tsforge_tspath::remove_file_extension(module_name));
    let mut out = String::with_capacity(base.len() + 1);
    if base.starts_with(|c: char| c.is_ascii_digit()) {
        out.push('_');
    }
    out.extend(base.chars().map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::NullResolver;

    struct Globals(&'static [&'static str]);

    impl EmitResolver for Globals {
        fn has_global_name(&self, name: &str) -> bool {
            self.0.contains(&name)
        }
    }

    #[test]
    fn test_temp_names_skip_loop_letters() {
        let mut names = NameGenerator::new(&NullResolver);
        let generated: Vec<String> = (0..10).map(|_| names.make_temp_variable_name(TempKind::Auto, false)).collect();
        assert_eq!(generated, ["_a", "_b", "_c", "_d", "_e", "_f", "_g", "_h", "_j", "_k"]);
    }

    #[test]
    fn test_temp_names_continue_with_numbers() {
        let mut names = NameGenerator::new(&NullResolver);
        let last = (0..25).map(|_| names.make_temp_variable_name(TempKind::Auto, false)).last();
        assert_eq!(last.as_deref(), Some("_0"));
    }

    #[test]
    fn test_loop_variable_takes_i_first() {
        let mut names = NameGenerator::new(&NullResolver);
        assert_eq!(names.make_temp_variable_name(TempKind::Loop, false), "_i");
        assert_eq!(names.make_temp_variable_name(TempKind::Loop, false), "_a");
    }

    #[test]
    fn test_file_identifiers_and_globals_are_avoided() {
        let resolver = Globals(&["_b"]);
        let mut names = NameGenerator::new(&resolver);
        names.set_file_identifiers(["_a"]);
        assert_eq!(names.make_temp_variable_name(TempKind::Auto, false), "_c");
    }

    #[test]
    fn test_unique_name_never_repeats() {
        let mut names = NameGenerator::new(&NullResolver);
        let first = names.make_unique_name("x", None, false, false);
        let second = names.make_unique_name("x", None, false, false);
        assert_eq!(first, "x_1");
        assert_eq!(second, "x_2");
    }

    #[test]
    fn test_optimistic_tries_base_first() {
        let mut names = NameGenerator::new(&NullResolver);
        names.set_file_identifiers(["taken"]);
        assert_eq!(names.make_unique_name("free", None, true, false), "free");
        assert_eq!(names.make_unique_name("taken", None, true, false), "taken_1");
        assert_eq!(names.make_unique_name("free", None, true, false), "free_1");
    }

    #[test]
    fn test_custom_acceptance_check() {
        let mut names = NameGenerator::new(&NullResolver);
        let reject_one = |name: &str| name != "y_1";
        assert_eq!(names.make_unique_name("y", Some(&reject_one), false, false), "y_2");
    }

    #[test]
    fn test_counters_restart_per_scope_but_reserved_names_stay_taken() {
        let mut names = NameGenerator::new(&NullResolver);
        let outer = names.make_temp_variable_name(TempKind::Auto, true);
        assert_eq!(outer, "_a");
        names.push_scope(false);
        assert_eq!(names.make_temp_variable_name(TempKind::Auto, false), "_b");
        names.pop_scope(false);
        names.push_scope(false);
        // `_b` was generated in this pass, so a sibling scope moves on.
        assert_eq!(names.make_temp_variable_name(TempKind::Auto, false), "_c");
        names.pop_scope(false);
    }

    #[test]
    fn test_scoped_reservations_end_with_their_scope() {
        let mut names = NameGenerator::new(&NullResolver);
        names.push_scope(false);
        names.reserve_name_in_nested_scopes("tmp");
        assert!(!names.is_unique_name("tmp"));
        names.pop_scope(false);
        assert!(names.is_unique_name("tmp"));
    }

    #[test]
    fn test_reuse_keeps_parent_scope() {
        let mut names = NameGenerator::new(&NullResolver);
        assert_eq!(names.make_temp_variable_name(TempKind::Auto, false), "_a");
        names.push_scope(true);
        assert_eq!(names.make_temp_variable_name(TempKind::Auto, false), "_b");
        names.pop_scope(true);
        assert_eq!(names.make_temp_variable_name(TempKind::Auto, false), "_c");
    }

    #[test]
    fn test_generate_name_for_node_is_idempotent() {
        let interner = StringInterner::new();
        let mut names = NameGenerator::new(&NullResolver);
        let source = GeneratedNameSource {
            id: NodeId(7),
            kind: SyntaxKind::ImportDeclaration,
            text: Some(interner.intern("./util/string-helpers")),
        };
        let first = names.generate_name_for_node(&source, GeneratedIdentifierFlags::NONE, &interner);
        let second = names.generate_name_for_node(&source, GeneratedIdentifierFlags::NONE, &interner);
        assert_eq!(first, "string_helpers_1");
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_export_names() {
        let interner = StringInterner::new();
        let mut names = NameGenerator::new(&NullResolver);
        let class = GeneratedNameSource {
            id: NodeId(1),
            kind: SyntaxKind::ClassDeclaration,
            text: None,
        };
        let assignment = GeneratedNameSource {
            id: NodeId(2),
            kind: SyntaxKind::ExportAssignment,
            text: None,
        };
        assert_eq!(names.generate_name_for_node(&class, GeneratedIdentifierFlags::NONE, &interner), "default_1");
        assert_eq!(names.generate_name_for_node(&assignment, GeneratedIdentifierFlags::NONE, &interner), "default_2");
    }

    #[test]
    fn test_module_name_from_specifier() {
        assert_eq!(make_identifier_from_module_name("./lib/my-module.js"), "my_module");
        assert_eq!(make_identifier_from_module_name("2d"), "_2d");
        assert_eq!(make_identifier_from_module_name("@scope/pkg"), "pkg");
    }
}
