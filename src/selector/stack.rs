use std::collections::HashSet;

/// The chain of groups currently being expanded.
///
/// Push order is kept because it ends up in error messages; the set gives
/// constant-time membership checks for cycle detection.
#[derive(Debug, Default)]
pub struct ResolutionStack {
    order: Vec<String>,
    members: HashSet<String>,
}

impl ResolutionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, selector: &str) {
        self.order.push(selector.to_string());
        self.members.insert(selector.to_string());
    }

    pub fn pop(&mut self) -> Option<String> {
        let top = self.order.pop()?;
        self.members.remove(&top);
        Some(top)
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.members.contains(selector)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The current chain followed by `next`, e.g. `[foo, bar, foo]`.
    pub fn chain_with(&self, next: &str) -> Vec<String> {
        let mut chain = self.order.clone();
        chain.push(next.to_string());
        chain
    }
}
