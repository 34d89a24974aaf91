//! String interning for identifier and symbol names.
//!
//! Symbol tables key on *escaped* names: a user identifier that starts with
//! two underscores gets one extra leading underscore so that it can never
//! collide with the compiler's internal names (`__function`, `__object`,
//! `__export`, ...). [`StringInterner::intern_escaped`] and
//! [`StringInterner::unescape`] convert between the two forms.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// A handle to an interned string. Comparing two handles is an integer compare.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl InternedString {
    #[inline]
    pub fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }

    #[inline]
    pub fn as_spur(self) -> Spur {
        self.0
    }
}

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedString({:?})", self.0)
    }
}

/// Thread-safe string interner shared by the factory, binder and printer.
#[derive(Clone)]
pub struct StringInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    #[inline]
    pub fn intern(&self, s: &str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern(s))
    }

    #[inline]
    pub fn intern_static(&self, s: &'static str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern_static(s))
    }

    /// Intern the escaped form of a user-written name.
    pub fn intern_escaped(&self, name: &str) -> InternedString {
        if needs_escaping(name) {
            self.intern(&format!("_{}", name))
        } else {
            self.intern(name)
        }
    }

    /// Look up an already-interned string without interning it.
    #[inline]
    pub fn get(&self, s: &str) -> Option<InternedString> {
        self.rodeo.get(s).map(InternedString::from_spur)
    }

    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.rodeo.resolve(&key.as_spur())
    }

    /// Resolve an escaped name back to the text the user wrote.
    pub fn unescape(&self, key: InternedString) -> &str {
        unescape_leading_underscores(self.resolve(key))
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

fn needs_escaping(name: &str) -> bool {
    name.len() >= 2 && name.as_bytes()[0] == b'_' && name.as_bytes()[1] == b'_'
}

/// Strip the extra underscore added by escaping (`___x` -> `__x`).
pub fn unescape_leading_underscores(escaped: &str) -> &str {
    let bytes = escaped.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'_' && bytes[1] == b'_' && bytes[2] == b'_' {
        &escaped[1..]
    } else {
        escaped
    }
}

/// Display adapter for an [`InternedString`].
pub struct DisplayInterned<'a> {
    pub key: InternedString,
    pub interner: &'a StringInterner,
}

impl fmt::Display for DisplayInterned<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.interner.unescape(self.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_resolve() {
        let interner = StringInterner::new();
        let a = interner.intern("hello");
        let b = interner.intern("hello");
        let c = interner.intern("world");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "hello");
    }

    #[test]
    fn test_escaped_names_do_not_collide_with_internal_names() {
        let interner = StringInterner::new();
        let internal = interner.intern("__function");
        let user = interner.intern_escaped("__function");
        assert_ne!(internal, user);
        assert_eq!(interner.resolve(user), "___function");
        assert_eq!(interner.unescape(user), "__function");
    }

    #[test]
    fn test_single_underscore_is_not_escaped() {
        let interner = StringInterner::new();
        let a = interner.intern_escaped("_a");
        assert_eq!(interner.resolve(a), "_a");
        assert_eq!(unescape_leading_underscores("__x"), "__x");
    }
}
