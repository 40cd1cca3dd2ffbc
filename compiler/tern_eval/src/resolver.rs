//! Variable resolvers.
//!
//! A resolver supplies named-variable lookup and assignment for one
//! evaluation. `MapResolver` is the flat, map-backed variant;
//! `ChainedResolver` layers a local scope over a parent resolver for loop
//! and block bodies.

use rustc_hash::FxHashMap;
use tern_ir::Value;

/// Named-variable lookup and assignment scoped to one evaluation.
pub trait VariableResolver {
    fn resolve(&self, name: &str) -> Option<Value>;

    fn is_resolvable(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    fn assign(&mut self, name: &str, value: Value);
}

/// Map-backed resolver.
#[derive(Clone, Debug, Default)]
pub struct MapResolver {
    vars: FxHashMap<String, Value>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for MapResolver {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        MapResolver {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl VariableResolver for MapResolver {
    fn resolve(&self, name: &str) -> Option<Value> {
        self.vars.get(name).cloned()
    }

    fn is_resolvable(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    fn assign(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_owned(), value);
    }
}

/// Local scope over a borrowed parent resolver.
///
/// Lookups try the locals first. Assignment updates a local if one exists,
/// otherwise writes through to the parent when the parent already knows the
/// name, otherwise creates a new local.
pub struct ChainedResolver<'p> {
    locals: FxHashMap<String, Value>,
    parent: &'p mut dyn VariableResolver,
}

impl<'p> ChainedResolver<'p> {
    pub fn new(parent: &'p mut dyn VariableResolver) -> Self {
        ChainedResolver {
            locals: FxHashMap::default(),
            parent,
        }
    }

    /// Create a local, shadowing any parent variable of the same name.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        self.locals.insert(name.into(), value);
    }

    pub fn local(&self, name: &str) -> Option<&Value> {
        self.locals.get(name)
    }
}

impl VariableResolver for ChainedResolver<'_> {
    fn resolve(&self, name: &str) -> Option<Value> {
        match self.locals.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.resolve(name),
        }
    }

    fn is_resolvable(&self, name: &str) -> bool {
        self.locals.contains_key(name) || self.parent.is_resolvable(name)
    }

    fn assign(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.locals.get_mut(name) {
            *slot = value;
        } else if self.parent.is_resolvable(name) {
            self.parent.assign(name, value);
        } else {
            self.locals.insert(name.to_owned(), value);
        }
    }
}

#[cfg(test)]
mod tests;
