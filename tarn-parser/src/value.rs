// tarn-parser - Value types for Tarn
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Core value type for Tarn.
//!
//! `TarnVal` is the central enum representing all Tarn values.

// Allow mutable key types - TarnVal has interior mutability for Atoms by design
#![allow(clippy::mutable_key_type)]

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use im::Vector;
use indexmap::IndexMap;

use crate::keyword::Keyword;
use crate::symbol::Symbol;

/// Map type: an insertion-ordered map of TarnVal to TarnVal.
/// Wrapped in Rc for cheap cloning.
pub type TarnMap = IndexMap<TarnVal, TarnVal>;

/// Metadata slot: any value, wrapped in Rc for cheap cloning and
/// Option for zero cost when absent.
pub type Meta = Option<Rc<TarnVal>>;

/// The core value type for Tarn.
///
/// All values in Tarn are represented by this enum. Values are immutable
/// (except through Atoms) and use reference counting for efficient sharing.
///
/// Types that support metadata (List, Vector, Map, Fn, NativeFn) carry an
/// optional `Rc<TarnVal>` slot. Metadata never affects equality or hashing.
#[derive(Clone)]
pub enum TarnVal {
    /// The nil value, representing nothing/absence
    Nil,
    /// Boolean true or false
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// Immutable string
    String(Rc<str>),
    /// Symbol (interned identifier)
    Symbol(Symbol),
    /// Keyword (interned, self-evaluating)
    Keyword(Keyword),
    /// Linked list (persistent, structural sharing, with optional metadata)
    List(Vector<TarnVal>, Meta),
    /// Indexed vector (persistent, structural sharing, with optional metadata)
    Vector(Vector<TarnVal>, Meta),
    /// Insertion-ordered map (with optional metadata)
    Map(Rc<TarnMap>, Meta),
    /// User-defined function (closure)
    Fn(TarnFn),
    /// Native (Rust) function
    NativeFn(TarnNativeFn),
    /// Atom (mutable reference for application state)
    Atom(TarnAtom),
}

// ============================================================================
// Function Types
// ============================================================================

/// A user-defined function (closure).
///
/// Stores the parameter list, body, and a type-erased environment reference.
/// The actual environment type is defined in tarn-core.
#[derive(Clone)]
pub struct TarnFn {
    /// Parameter names, possibly including the `&` rest marker
    pub params: Vec<Symbol>,
    /// Function body expressions
    pub body: Vec<TarnVal>,
    /// Captured environment (type-erased to avoid circular dependency)
    pub env: Rc<dyn Any>,
    /// Whether this function is a macro (receives unevaluated forms)
    pub is_macro: bool,
    /// Optional metadata
    pub meta: Meta,
}

impl TarnFn {
    /// Create a new (non-macro) function.
    pub fn new(params: Vec<Symbol>, body: Vec<TarnVal>, env: Rc<dyn Any>) -> Self {
        TarnFn {
            params,
            body,
            env,
            is_macro: false,
            meta: None,
        }
    }

    /// Return a copy of this function flagged as a macro.
    ///
    /// The macro flag is fixed at construction time, so a value already
    /// bound elsewhere is never retroactively changed.
    pub fn as_macro(&self) -> Self {
        TarnFn {
            params: self.params.clone(),
            body: self.body.clone(),
            env: Rc::clone(&self.env),
            is_macro: true,
            meta: self.meta.clone(),
        }
    }
}

impl fmt::Debug for TarnFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_macro {
            write!(f, "#<macro>")
        } else {
            write!(f, "#<fn>")
        }
    }
}

impl PartialEq for TarnFn {
    fn eq(&self, _other: &Self) -> bool {
        false // Functions are never equal
    }
}

/// A native (Rust) function.
#[derive(Clone)]
pub struct TarnNativeFn {
    /// Function name for display
    pub name: &'static str,
    /// The actual function (type-erased)
    func: Rc<dyn Any>,
    /// Optional metadata
    pub meta: Meta,
}

impl TarnNativeFn {
    /// Create a new native function with a type-erased function.
    pub fn new(name: &'static str, func: Rc<dyn Any>) -> Self {
        TarnNativeFn {
            name,
            func,
            meta: None,
        }
    }

    /// Get the function name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get the inner function reference.
    pub fn func(&self) -> &Rc<dyn Any> {
        &self.func
    }
}

impl fmt::Debug for TarnNativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<native-fn {}>", self.name)
    }
}

impl PartialEq for TarnNativeFn {
    fn eq(&self, _other: &Self) -> bool {
        false // Functions are never equal
    }
}

// ============================================================================
// Atom Type
// ============================================================================

/// A mutable reference cell.
///
/// Atoms are the only mutable values in the language. Cloning an atom
/// clones the reference, not the cell: all clones alias the same state.
#[derive(Clone)]
pub struct TarnAtom {
    /// The current value (mutable)
    value: Rc<RefCell<TarnVal>>,
}

impl TarnAtom {
    /// Create a new Atom with an initial value.
    pub fn new(value: TarnVal) -> Self {
        TarnAtom {
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Get the current value (deref).
    pub fn deref(&self) -> TarnVal {
        self.value.borrow().clone()
    }

    /// Replace the value, returning the new value.
    pub fn reset(&self, new_val: TarnVal) -> TarnVal {
        *self.value.borrow_mut() = new_val.clone();
        new_val
    }

    /// Check whether two atoms alias the same cell.
    pub fn same_cell(&self, other: &TarnAtom) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for TarnAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(atom {:?})", self.value.borrow())
    }
}

impl PartialEq for TarnAtom {
    fn eq(&self, other: &Self) -> bool {
        // Atoms compare by held value, not identity
        *self.value.borrow() == *other.value.borrow()
    }
}

impl Eq for TarnAtom {}

// ============================================================================
// Constructors and accessors
// ============================================================================

impl TarnVal {
    /// Create a nil value
    pub fn nil() -> Self {
        TarnVal::Nil
    }

    /// Create a boolean value
    pub fn bool(b: bool) -> Self {
        TarnVal::Bool(b)
    }

    /// Create an integer value
    pub fn int(n: i64) -> Self {
        TarnVal::Int(n)
    }

    /// Create a float value
    pub fn float(n: f64) -> Self {
        TarnVal::Float(n)
    }

    /// Create a string value
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        TarnVal::String(s.into())
    }

    /// Create a symbol value
    pub fn symbol(sym: Symbol) -> Self {
        TarnVal::Symbol(sym)
    }

    /// Create a symbol value from a name
    pub fn sym(name: &str) -> Self {
        TarnVal::Symbol(Symbol::new(name))
    }

    /// Create a keyword value
    pub fn keyword(kw: Keyword) -> Self {
        TarnVal::Keyword(kw)
    }

    /// Create an empty list
    pub fn empty_list() -> Self {
        TarnVal::List(Vector::new(), None)
    }

    /// Create a list from elements
    pub fn list(elements: Vec<TarnVal>) -> Self {
        TarnVal::List(elements.into_iter().collect(), None)
    }

    /// Create a list from a persistent vector of elements
    pub fn list_from(elements: Vector<TarnVal>) -> Self {
        TarnVal::List(elements, None)
    }

    /// Create a vector from elements
    pub fn vector(elements: Vec<TarnVal>) -> Self {
        TarnVal::Vector(elements.into_iter().collect(), None)
    }

    /// Create a vector from a persistent vector of elements
    pub fn vector_from(elements: Vector<TarnVal>) -> Self {
        TarnVal::Vector(elements, None)
    }

    /// Create an empty map
    pub fn empty_map() -> Self {
        TarnVal::Map(Rc::new(TarnMap::new()), None)
    }

    /// Create a map from key-value pairs.
    ///
    /// Later occurrences of a key overwrite earlier ones while keeping
    /// the position of the first occurrence.
    pub fn map(pairs: Vec<(TarnVal, TarnVal)>) -> Self {
        TarnVal::Map(Rc::new(pairs.into_iter().collect()), None)
    }

    /// Create a map from an existing entry map
    pub fn map_from(map: TarnMap) -> Self {
        TarnVal::Map(Rc::new(map), None)
    }

    /// Create an atom value
    pub fn atom(value: TarnVal) -> Self {
        TarnVal::Atom(TarnAtom::new(value))
    }

    /// Check if this value is nil
    pub fn is_nil(&self) -> bool {
        matches!(self, TarnVal::Nil)
    }

    /// Check if this value is truthy (not nil and not false)
    pub fn is_truthy(&self) -> bool {
        !matches!(self, TarnVal::Nil | TarnVal::Bool(false))
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            TarnVal::Nil => "nil",
            TarnVal::Bool(_) => "bool",
            TarnVal::Int(_) => "int",
            TarnVal::Float(_) => "float",
            TarnVal::String(_) => "string",
            TarnVal::Symbol(_) => "symbol",
            TarnVal::Keyword(_) => "keyword",
            TarnVal::List(_, _) => "list",
            TarnVal::Vector(_, _) => "vector",
            TarnVal::Map(_, _) => "map",
            TarnVal::Fn(_) => "fn",
            TarnVal::NativeFn(_) => "fn",
            TarnVal::Atom(_) => "atom",
        }
    }

    /// Get the elements if this is a list or vector.
    pub fn as_seq(&self) -> Option<&Vector<TarnVal>> {
        match self {
            TarnVal::List(items, _) | TarnVal::Vector(items, _) => Some(items),
            _ => None,
        }
    }

    /// Get the metadata of this value, defaulting to nil.
    /// Also returns nil for types that don't support metadata.
    pub fn meta(&self) -> TarnVal {
        let meta = match self {
            TarnVal::List(_, meta) | TarnVal::Vector(_, meta) | TarnVal::Map(_, meta) => {
                meta.as_ref()
            }
            TarnVal::Fn(f) => f.meta.as_ref(),
            TarnVal::NativeFn(nf) => nf.meta.as_ref(),
            _ => None,
        };
        meta.map(|m| (**m).clone()).unwrap_or(TarnVal::Nil)
    }

    /// Return a copy of this value carrying the given metadata.
    /// The receiver is unchanged. Returns None if the value type doesn't
    /// support metadata.
    pub fn with_meta(&self, meta: Rc<TarnVal>) -> Option<TarnVal> {
        match self {
            TarnVal::List(items, _) => Some(TarnVal::List(items.clone(), Some(meta))),
            TarnVal::Vector(items, _) => Some(TarnVal::Vector(items.clone(), Some(meta))),
            TarnVal::Map(m, _) => Some(TarnVal::Map(Rc::clone(m), Some(meta))),
            TarnVal::Fn(f) => {
                let mut f = f.clone();
                f.meta = Some(meta);
                Some(TarnVal::Fn(f))
            }
            TarnVal::NativeFn(nf) => {
                let mut nf = nf.clone();
                nf.meta = Some(meta);
                Some(TarnVal::NativeFn(nf))
            }
            _ => None,
        }
    }
}

// ============================================================================
// Display implementation
// ============================================================================

impl fmt::Display for TarnVal {
    /// Formats the value readably; use [`crate::printer::pr_str`] to
    /// control readability.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::printer::pr_str(self, true))
    }
}

impl fmt::Debug for TarnVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

// ============================================================================
// Equality and hashing (for use as map keys)
// ============================================================================

impl PartialEq for TarnVal {
    fn eq(&self, other: &Self) -> bool {
        // Note: Metadata is intentionally ignored in equality comparisons.
        // (= [1 2] (with-meta [1 2] :a)) => true
        //
        // Lists and vectors compare element-wise across variants:
        // (= (list 1 2) [1 2]) => true
        match (self, other) {
            (TarnVal::Nil, TarnVal::Nil) => true,
            (TarnVal::Bool(a), TarnVal::Bool(b)) => a == b,
            (TarnVal::Int(a), TarnVal::Int(b)) => a == b,
            (TarnVal::Float(a), TarnVal::Float(b)) => a.to_bits() == b.to_bits(),
            (TarnVal::Int(a), TarnVal::Float(b)) => (*a as f64).to_bits() == b.to_bits(),
            (TarnVal::Float(a), TarnVal::Int(b)) => a.to_bits() == (*b as f64).to_bits(),
            (TarnVal::String(a), TarnVal::String(b)) => a == b,
            (TarnVal::Symbol(a), TarnVal::Symbol(b)) => a == b,
            (TarnVal::Keyword(a), TarnVal::Keyword(b)) => a == b,
            (
                TarnVal::List(a, _) | TarnVal::Vector(a, _),
                TarnVal::List(b, _) | TarnVal::Vector(b, _),
            ) => a == b,
            (TarnVal::Map(a, _), TarnVal::Map(b, _)) => {
                // IndexMap equality ignores insertion order
                a == b
            }
            (TarnVal::Fn(a), TarnVal::Fn(b)) => a == b,
            (TarnVal::NativeFn(a), TarnVal::NativeFn(b)) => a == b,
            (TarnVal::Atom(a), TarnVal::Atom(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for TarnVal {}

impl Hash for TarnVal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // The tag must agree with equality, so variants that can compare
        // equal share a tag: Int/Float hash as f64 bits, List/Vector hash
        // their elements identically. Metadata is ignored.
        fn tag(v: &TarnVal) -> u8 {
            match v {
                TarnVal::Nil => 0,
                TarnVal::Bool(_) => 1,
                TarnVal::Int(_) | TarnVal::Float(_) => 2,
                TarnVal::String(_) => 3,
                TarnVal::Symbol(_) => 4,
                TarnVal::Keyword(_) => 5,
                TarnVal::List(_, _) | TarnVal::Vector(_, _) => 6,
                TarnVal::Map(_, _) => 7,
                TarnVal::Fn(_) | TarnVal::NativeFn(_) => 8,
                TarnVal::Atom(_) => 9,
            }
        }

        tag(self).hash(state);
        match self {
            TarnVal::Nil => {}
            TarnVal::Bool(b) => b.hash(state),
            TarnVal::Int(n) => (*n as f64).to_bits().hash(state),
            TarnVal::Float(n) => n.to_bits().hash(state),
            TarnVal::String(s) => s.hash(state),
            TarnVal::Symbol(sym) => sym.hash(state),
            TarnVal::Keyword(kw) => kw.hash(state),
            TarnVal::List(items, _) | TarnVal::Vector(items, _) => {
                items.len().hash(state);
                for item in items.iter() {
                    item.hash(state);
                }
            }
            TarnVal::Map(map, _) => {
                // Map equality ignores insertion order, so combine entry
                // hashes commutatively.
                map.len().hash(state);
                let mut combined: u64 = 0;
                for (k, v) in map.iter() {
                    let mut entry_hasher = std::collections::hash_map::DefaultHasher::new();
                    k.hash(&mut entry_hasher);
                    v.hash(&mut entry_hasher);
                    combined ^= entry_hasher.finish();
                }
                combined.hash(state);
            }
            TarnVal::Fn(_) | TarnVal::NativeFn(_) => {
                // Functions don't have a meaningful hash - tag only
            }
            TarnVal::Atom(a) => {
                // Atoms compare by held value, so hash it
                a.deref().hash(state);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
