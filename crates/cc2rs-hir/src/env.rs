//! The name-to-C-type environment (spec §3.3).
//!
//! A stack of `(identifier, CType)` bindings, newest-first, with shadowing
//! permitted. Scopes are nested by saving the stack's length on entry and
//! truncating back to it on exit — the persistent-snapshot style spec §9
//! calls out as one of the two acceptable designs.

use crate::types::CType;

/// A mark returned by [`Environment::mark`], to be passed back to
/// [`Environment::restore`] when the scope it opened exits.
pub type Mark = usize;

/// The scoped identifier environment threaded through expression,
/// statement, and top-level translation.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: Vec<(String, CType)>,
}

impl Environment {
    /// An empty environment, as at translation-unit start (spec §3.3).
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `ty`, shadowing any existing binding of the same
    /// name. This is the only way bindings are added; the stack discipline
    /// (spec §5) never removes entries individually.
    pub fn add_var(&mut self, name: impl Into<String>, ty: CType) {
        self.bindings.push((name.into(), ty));
    }

    /// Look up the most recent binding for `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&CType> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| bound == name)
            .map(|(_, ty)| ty)
    }

    /// Snapshot the current stack depth, to be restored with
    /// [`Environment::restore`] when the enclosing scope exits.
    pub fn mark(&self) -> Mark {
        self.bindings.len()
    }

    /// Restore the stack to a previously taken [`Mark`], discarding every
    /// binding added since. Must be called on every exit path — including
    /// failure — of a function body, compound statement, or for-statement
    /// initializer (spec §5).
    pub fn restore(&mut self, mark: Mark) {
        self.bindings.truncate(mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IntWidth, Signedness};

    fn int32() -> CType {
        CType::Integer {
            signedness: Signedness::Signed,
            width: IntWidth::ThirtyTwo,
        }
    }

    #[test]
    fn lookup_misses_on_empty_environment() {
        let env = Environment::new();
        assert!(env.lookup("x").is_none());
    }

    #[test]
    fn lookup_finds_added_variable() {
        let mut env = Environment::new();
        env.add_var("x", int32());
        assert_eq!(env.lookup("x"), Some(&int32()));
    }

    #[test]
    fn shadowing_returns_the_most_recent_binding() {
        let mut env = Environment::new();
        env.add_var("x", int32());
        let float = CType::Float(crate::types::FloatWidth::SixtyFour);
        env.add_var("x", float.clone());
        assert_eq!(env.lookup("x"), Some(&float));
    }

    #[test]
    fn restore_discards_bindings_added_after_the_mark() {
        let mut env = Environment::new();
        env.add_var("outer", int32());
        let mark = env.mark();
        env.add_var("inner", int32());
        assert!(env.lookup("inner").is_some());
        env.restore(mark);
        assert!(env.lookup("inner").is_none());
        assert!(env.lookup("outer").is_some());
    }

    #[test]
    fn restore_after_failure_path_still_discards_scope() {
        let mut env = Environment::new();
        let mark = env.mark();
        env.add_var("temp", int32());
        let outcome: Result<(), ()> = Err(());
        if outcome.is_err() {
            env.restore(mark);
        }
        assert!(env.lookup("temp").is_none());
    }
}
