//! Keyed collection of orbiting bodies.
//!
//! Keys are lowercase body names. Bodies are kept in key order so that
//! iteration (and therefore the sequence of random draws on reset) is stable
//! for a given seed.

use std::collections::BTreeMap;

use crate::types::body_key;

use super::body::OrbitingBody;

#[derive(Clone, Debug)]
pub struct OrbitalRegistry<T> {
    bodies: BTreeMap<String, OrbitingBody<T>>,
}

impl<T> Default for OrbitalRegistry<T> {
    fn default() -> Self {
        Self {
            bodies: BTreeMap::new(),
        }
    }
}

impl<T> OrbitalRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body under its key, returning the body it replaced.
    pub fn insert(&mut self, body: OrbitingBody<T>) -> Option<OrbitingBody<T>> {
        self.bodies.insert(body.key.clone(), body)
    }

    pub fn remove(&mut self, name: &str) -> Option<OrbitingBody<T>> {
        self.bodies.remove(&body_key(name))
    }

    pub fn get(&self, name: &str) -> Option<&OrbitingBody<T>> {
        self.bodies.get(&body_key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bodies.contains_key(&body_key(name))
    }

    /// Registered keys in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.bodies.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrbitingBody<T>> {
        self.bodies.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut OrbitingBody<T>> {
        self.bodies.values_mut()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }
}
