//! Run-scoped identifier generation for AST nodes and pickles.

/// Issues monotonically increasing identifiers within a single discovery run.
///
/// Every parse call of a run shares one generator so that scenario, step,
/// row and pickle identifiers never collide across documents. Create a fresh
/// generator per run; reusing one across unrelated runs only wastes ids, but
/// sharing one between concurrent runs would interleave them.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Create a generator whose first identifier is `"0"`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next identifier.
    pub fn next_id(&mut self) -> String {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id.to_string()
    }

    /// Number of identifiers issued so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.next
    }
}
