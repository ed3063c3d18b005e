// tarn-core - Environment for lexical scoping
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Environment for variable bindings with lexical scoping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tarn_parser::{Symbol, TarnVal};

use crate::error::{Error, Result};

/// A lexical environment for variable bindings.
///
/// Environments form a chain through parent references, enabling
/// lexical scoping. Each environment has its own bindings map
/// and optionally a parent environment for outer scope lookup.
///
/// Cloning an `Env` clones the handle, not the bindings: closures
/// capturing an environment observe later definitions in it.
///
/// # Examples
///
/// ```
/// use tarn_core::Env;
/// use tarn_parser::{Symbol, TarnVal};
///
/// // Create a root environment
/// let env = Env::new();
///
/// // Define a binding
/// env.define(Symbol::new("x"), TarnVal::int(42));
///
/// // Look up the binding
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), TarnVal::int(42));
///
/// // Create a child environment that inherits parent bindings
/// let child = env.child();
/// assert_eq!(child.lookup(&Symbol::new("x")).unwrap(), TarnVal::int(42));
///
/// // Child can shadow parent bindings
/// child.define(Symbol::new("x"), TarnVal::int(100));
/// assert_eq!(child.lookup(&Symbol::new("x")).unwrap(), TarnVal::int(100));
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), TarnVal::int(42));
/// ```
#[derive(Debug, Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

#[derive(Debug)]
struct EnvInner {
    bindings: HashMap<Symbol, TarnVal>,
    parent: Option<Env>,
}

impl Env {
    /// Create a new root environment with no parent.
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Create a child environment with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Create a child of `outer` binding parameter names to arguments.
    ///
    /// A `&` in `binds` makes the following name variadic: it collects
    /// the remaining arguments (possibly none) into a list. Without `&`
    /// the argument count must match the parameter count exactly.
    pub fn bind(outer: &Env, binds: &[Symbol], exprs: &[TarnVal]) -> Result<Env> {
        let required = binds.iter().position(|b| b.name() == "&");
        match required {
            Some(n) => {
                if exprs.len() < n {
                    return Err(Error::arity_at_least(n, exprs.len()));
                }
                if binds.len() != n + 2 {
                    return Err(Error::syntax(
                        "fn*",
                        "& must be followed by exactly one parameter name",
                    ));
                }
            }
            None => {
                if exprs.len() != binds.len() {
                    return Err(Error::arity(binds.len(), exprs.len()));
                }
            }
        }

        let env = outer.child();
        for (i, bind) in binds.iter().enumerate() {
            if bind.name() == "&" {
                let rest: Vec<TarnVal> = exprs.get(i..).unwrap_or(&[]).to_vec();
                env.define(binds[i + 1].clone(), TarnVal::list(rest));
                break;
            }
            env.define(bind.clone(), exprs[i].clone());
        }
        Ok(env)
    }

    /// Define a binding in this environment (not parent).
    pub fn define(&self, sym: Symbol, val: TarnVal) {
        self.inner.borrow_mut().bindings.insert(sym, val);
    }

    /// Look up a symbol in this environment or parent chain.
    /// Uses iterative traversal to avoid stack overflow on deep environments.
    pub fn lookup(&self, sym: &Symbol) -> Result<TarnVal> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(val) = inner.bindings.get(sym) {
                return Ok(val.clone());
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return Err(Error::UndefinedSymbol(sym.clone())),
            }
        }
    }

    /// Check if a symbol is defined in this environment or parent chain.
    /// Uses iterative traversal to avoid stack overflow on deep environments.
    #[must_use]
    pub fn is_defined(&self, sym: &Symbol) -> bool {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if inner.bindings.contains_key(sym) {
                return true;
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return false,
            }
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Symbol {
        Symbol::new(name)
    }

    #[test]
    fn test_define_and_lookup() {
        let env = Env::new();
        env.define(sym("x"), TarnVal::int(42));

        assert_eq!(env.lookup(&sym("x")).unwrap(), TarnVal::int(42));
    }

    #[test]
    fn test_undefined_symbol() {
        let env = Env::new();
        let result = env.lookup(&sym("x"));
        assert!(result.is_err());
    }

    #[test]
    fn test_child_inherits_parent() {
        let parent = Env::new();
        parent.define(sym("x"), TarnVal::int(42));

        let child = parent.child();
        assert_eq!(child.lookup(&sym("x")).unwrap(), TarnVal::int(42));
    }

    #[test]
    fn test_child_shadows_parent() {
        let parent = Env::new();
        parent.define(sym("x"), TarnVal::int(42));

        let child = parent.child();
        child.define(sym("x"), TarnVal::int(100));

        assert_eq!(child.lookup(&sym("x")).unwrap(), TarnVal::int(100));
        assert_eq!(parent.lookup(&sym("x")).unwrap(), TarnVal::int(42));
    }

    #[test]
    fn test_is_defined() {
        let env = Env::new();
        assert!(!env.is_defined(&sym("x")));

        env.define(sym("x"), TarnVal::int(42));
        assert!(env.is_defined(&sym("x")));
    }

    #[test]
    fn test_bind_exact() {
        let outer = Env::new();
        let env = Env::bind(
            &outer,
            &[sym("a"), sym("b")],
            &[TarnVal::int(1), TarnVal::int(2)],
        )
        .unwrap();
        assert_eq!(env.lookup(&sym("a")).unwrap(), TarnVal::int(1));
        assert_eq!(env.lookup(&sym("b")).unwrap(), TarnVal::int(2));
    }

    #[test]
    fn test_bind_arity_mismatch() {
        let outer = Env::new();
        assert!(Env::bind(&outer, &[sym("a"), sym("b")], &[TarnVal::int(1)]).is_err());
        assert!(Env::bind(&outer, &[sym("a")], &[TarnVal::int(1), TarnVal::int(2)]).is_err());
    }

    #[test]
    fn test_bind_variadic() {
        let outer = Env::new();
        let env = Env::bind(
            &outer,
            &[sym("a"), sym("&"), sym("rest")],
            &[TarnVal::int(1), TarnVal::int(2), TarnVal::int(3)],
        )
        .unwrap();
        assert_eq!(env.lookup(&sym("a")).unwrap(), TarnVal::int(1));
        assert_eq!(
            env.lookup(&sym("rest")).unwrap(),
            TarnVal::list(vec![TarnVal::int(2), TarnVal::int(3)])
        );
    }

    #[test]
    fn test_bind_variadic_empty_rest() {
        let outer = Env::new();
        let env = Env::bind(
            &outer,
            &[sym("a"), sym("&"), sym("rest")],
            &[TarnVal::int(1)],
        )
        .unwrap();
        assert_eq!(env.lookup(&sym("rest")).unwrap(), TarnVal::empty_list());
    }

    #[test]
    fn test_bind_variadic_too_few() {
        let outer = Env::new();
        assert!(Env::bind(&outer, &[sym("a"), sym("&"), sym("rest")], &[]).is_err());
    }
}
