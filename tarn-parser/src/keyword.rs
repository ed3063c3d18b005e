// tarn-parser - Keyword type with interning
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Keywords are self-evaluating identifiers written with a leading colon.
//!
//! # Interning
//!
//! Keywords are interned using a global string interner, so two keywords with
//! the same name share the same underlying storage. This gives O(1) equality
//! and hashing via pointer comparison, and identical keywords share memory.
//!
//! Like symbols, interned keywords are never deallocated; the interner holds
//! strong references for the lifetime of the program.
//!
//! # Thread Safety
//!
//! The interner is protected by a `Mutex`, making keyword creation
//! thread-safe. Keyword comparison and hashing are lock-free after creation.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

/// An interned keyword.
///
/// Keywords are self-evaluating and always print with a leading colon `:`.
#[derive(Clone)]
pub struct Keyword {
    inner: Arc<str>,
}

/// Global keyword interner
static KEYWORD_INTERNER: OnceLock<Mutex<KeywordInterner>> = OnceLock::new();

struct KeywordInterner {
    /// Map from name to its interned storage
    keywords: HashMap<String, Arc<str>>,
}

impl KeywordInterner {
    fn new() -> Self {
        KeywordInterner {
            keywords: HashMap::new(),
        }
    }

    fn intern(&mut self, name: &str) -> Arc<str> {
        if let Some(existing) = self.keywords.get(name) {
            Arc::clone(existing)
        } else {
            let interned: Arc<str> = Arc::from(name);
            self.keywords
                .insert(name.to_string(), Arc::clone(&interned));
            interned
        }
    }
}

fn get_interner() -> &'static Mutex<KeywordInterner> {
    KEYWORD_INTERNER.get_or_init(|| Mutex::new(KeywordInterner::new()))
}

impl Keyword {
    /// Create (or look up) the keyword with the given name.
    ///
    /// The name is stored without the leading colon.
    pub fn new(name: &str) -> Self {
        let name = name.strip_prefix(':').unwrap_or(name);
        let inner = get_interner()
            .lock()
            .expect(
                "Keyword interner mutex poisoned: another thread panicked while holding the lock",
            )
            .intern(name);
        Keyword { inner }
    }

    /// Get the name, without the leading colon.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.inner)
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword({})", self)
    }
}

impl PartialEq for Keyword {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // Due to interning, pointer comparison is sufficient
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Keyword {}

impl Hash for Keyword {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Use pointer hash for interned keywords
        Arc::as_ptr(&self.inner).hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
