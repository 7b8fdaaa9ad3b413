use indexmap::IndexMap;
use std::time::{Duration, Instant};

/// Identity of an operation pushed onto an [`OperationStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationId(u64);

impl OperationId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

/// One tracked unit of work.
#[derive(Debug, Clone)]
pub struct Operation {
    pub(crate) id: OperationId,
    /// The label the operation was started with. Never changes.
    pub(crate) key: String,
    pub(crate) label: String,
    pub(crate) depth: usize,
    pub(crate) started_at: Instant,
    pub(crate) persistent: bool,
    pub(crate) accomplishments: Vec<String>,
}

impl Operation {
    fn new(id: OperationId, label: String, depth: usize, persistent: bool) -> Self {
        Self {
            id,
            key: label.clone(),
            label,
            depth,
            started_at: Instant::now(),
            persistent,
            accomplishments: Vec::new(),
        }
    }

    pub fn id(&self) -> OperationId {
        self.id
    }

    /// Current display text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Nesting depth; `0` for an outermost operation.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Accomplishments logged against this operation, in call order.
    pub fn accomplishments(&self) -> &[String] {
        &self.accomplishments
    }

    fn answers_to(&self, label: &str) -> bool {
        self.key == label || self.label == label
    }
}

/// Ordered stack of in-flight operations. The last entry is the top.
///
/// The stack does no locking of its own; the owning display mutates it from
/// inside its critical section.
#[derive(Debug, Default)]
pub struct OperationStack {
    entries: IndexMap<OperationId, Operation>,
    next_id: u64,
}

impl OperationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pushes a new operation at depth `len()` and returns its id.
    pub fn push(&mut self, label: impl Into<String>, persistent: bool) -> OperationId {
        self.next_id += 1;
        let id = OperationId::new(self.next_id);
        let depth = self.entries.len();
        self.entries
            .insert(id, Operation::new(id, label.into(), depth, persistent));
        id
    }

    /// Removes the most recently started operation of the given kind that
    /// answers to `label`, either by its start label or its current one.
    ///
    /// Returns `None` and leaves the stack untouched when nothing matches.
    pub fn pop(&mut self, label: &str, persistent: bool) -> Option<Operation> {
        let index = self
            .entries
            .values()
            .rposition(|op| op.persistent == persistent && op.answers_to(label))?;
        self.remove_index(index)
    }

    /// Removes the innermost persistent operation, preferring one that
    /// answers to `label`.
    pub fn pop_persistent(&mut self, label: &str) -> Option<Operation> {
        if let Some(op) = self.pop(label, true) {
            return Some(op);
        }
        let index = self.entries.values().rposition(|op| op.persistent)?;
        self.remove_index(index)
    }

    pub fn top(&self) -> Option<&Operation> {
        self.entries.last().map(|(_, op)| op)
    }

    pub fn get(&self, id: OperationId) -> Option<&Operation> {
        self.entries.get(&id)
    }

    /// Relabels the top operation. Returns `false` on an empty stack.
    pub fn update_label(&mut self, label: impl Into<String>) -> bool {
        match self.entries.last_mut() {
            Some((_, op)) => {
                op.label = label.into();
                true
            }
            None => false,
        }
    }

    /// Appends `text` to the innermost persistent operation and returns the
    /// depth its accomplishment lines should be drawn at.
    pub fn log_accomplishment(&mut self, text: &str) -> Option<usize> {
        let op = self.entries.values_mut().rev().find(|op| op.persistent)?;
        op.accomplishments.push(text.to_owned());
        Some(op.depth + 1)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Operation> + ExactSizeIterator {
        self.entries.values()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn remove_index(&mut self, index: usize) -> Option<Operation> {
        let (_, op) = self.entries.shift_remove_index(index)?;
        // Keep depth == position for everything that slid down.
        for (depth, (_, above)) in self.entries.iter_mut().enumerate().skip(index) {
            above.depth = depth;
        }
        Some(op)
    }
}
