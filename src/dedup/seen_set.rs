use std::collections::HashSet;

/// Memory of identities that have already been announced.
///
/// Implementations only ever grow; nothing is evicted.
pub trait SeenStore: Send + Sync {
    fn contains(&self, identity: &str) -> bool;

    /// Returns `true` if the identity was not present before.
    fn insert(&mut self, identity: String) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime, in-memory [`SeenStore`]. Lost on restart.
#[derive(Debug, Default, Clone)]
pub struct SeenSet {
    identities: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeenStore for SeenSet {
    fn contains(&self, identity: &str) -> bool {
        self.identities.contains(identity)
    }

    fn insert(&mut self, identity: String) -> bool {
        self.identities.insert(identity)
    }

    fn len(&self) -> usize {
        self.identities.len()
    }
}
