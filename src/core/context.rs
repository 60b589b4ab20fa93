//! Free-form context record carried by a machine.
//!
//! Context is a flat key-value record private to one machine instance. It
//! changes only through explicit merges or replacements, and every change
//! produces a new record rather than mutating the old one in place.

use serde_json::{Map, Value};

/// Flat key-value record attached to a machine.
pub type Context = Map<String, Value>;

/// Shallow-merge `partial` into `base`, returning the merged record.
///
/// Keys absent from `partial` keep their previous values; keys present in
/// `partial` overwrite. Nested objects are replaced, not merged.
///
/// # Example
///
/// ```rust
/// use flowstate::core::{context_of, merge};
/// use serde_json::json;
///
/// let base = context_of(json!({ "a": 1, "b": 2 }));
/// let merged = merge(&base, context_of(json!({ "b": 3 })));
///
/// assert_eq!(merged, context_of(json!({ "a": 1, "b": 3 })));
/// assert_eq!(base["b"], json!(2)); // Original unchanged
/// ```
pub fn merge(base: &Context, partial: Context) -> Context {
    let mut next = base.clone();
    for (key, value) in partial {
        next.insert(key, value);
    }
    next
}

/// Build a context record from a JSON value.
///
/// Objects become the record; any other value yields an empty record.
pub fn context_of(value: Value) -> Context {
    match value {
        Value::Object(map) => map,
        _ => Context::new(),
    }
}

type Derivation = Box<dyn FnOnce(&Context) -> Context + Send>;

/// A requested context change: either a partial record to merge or a
/// function deriving the next record from the previous one.
pub enum ContextUpdate {
    Merge(Context),
    Derive(Derivation),
}

impl ContextUpdate {
    /// Merge a partial record.
    pub fn merge(partial: Context) -> Self {
        Self::Merge(partial)
    }

    /// Derive the next record from the previous one.
    pub fn derive<F>(f: F) -> Self
    where
        F: FnOnce(&Context) -> Context + Send + 'static,
    {
        Self::Derive(Box::new(f))
    }

    /// Apply the update to `previous`, producing the next record.
    pub fn apply(self, previous: &Context) -> Context {
        match self {
            Self::Merge(partial) => merge(previous, partial),
            Self::Derive(f) => f(previous),
        }
    }
}

impl From<Context> for ContextUpdate {
    fn from(partial: Context) -> Self {
        Self::Merge(partial)
    }
}

impl std::fmt::Debug for ContextUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge(partial) => f.debug_tuple("Merge").field(partial).finish(),
            Self::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}
