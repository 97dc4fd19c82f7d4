//! Static friend relationships
//!
//! Declares which identities may claim from which. The graph is built once
//! at startup and is read-only at request time.

use std::collections::HashMap;

/// Symmetric adjacency between identities.
///
/// Each pair is mutually declared: adding `a <-> b` puts `b` in `a`'s list
/// and `a` in `b`'s. Lists keep declaration order so sender resolution is
/// stable across calls.
#[derive(Debug, Default)]
pub struct FriendGraph {
    friends: HashMap<String, Vec<String>>,
}

impl FriendGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a mutual friendship between two identities.
    pub fn add_pair(&mut self, a: &str, b: &str) {
        Self::add_directed(&mut self.friends, a, b);
        Self::add_directed(&mut self.friends, b, a);
    }

    fn add_directed(map: &mut HashMap<String, Vec<String>>, from: &str, to: &str) {
        let list = map.entry(from.to_string()).or_default();
        if !list.iter().any(|f| f == to) {
            list.push(to.to_string());
        }
    }

    /// Friends declared for `identity`, in declaration order.
    pub fn friends_of(&self, identity: &str) -> &[String] {
        self.friends.get(identity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve the sender whose artifact should be delivered to `receiver_id`.
    ///
    /// Always the first declared friend: the relation is multi-valued but
    /// delivery is single-counterpart, and the pick must not depend on map
    /// iteration order.
    pub fn resolve_sender(&self, receiver_id: &str) -> Option<&str> {
        self.friends
            .get(receiver_id)
            .and_then(|list| list.first())
            .map(String::as_str)
    }
}
