use crate::mark::MarkType;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StackEntry {
    pub mark: MarkType,
    pub closing_tag: String,
    pub level: usize,
}

/// Elements that are still open in the output, innermost last.
///
/// Closing tags are only ever written by popping, so the output stays
/// balanced as long as every opened element is pushed here.
#[derive(Clone, Debug, Default)]
pub struct ClosingTagStack {
    entries: Vec<StackEntry>,
}

impl ClosingTagStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mark: MarkType, closing_tag: impl Into<String>, level: usize) {
        self.entries.push(StackEntry {
            mark,
            closing_tag: closing_tag.into(),
            level,
        });
    }

    /// Pops all but the `reserved` bottom entries, writing each closing tag
    /// to `out` innermost first.
    pub fn rollback(&mut self, out: &mut String, reserved: usize) {
        let keep = reserved.min(self.entries.len());
        while self.entries.len() > keep {
            self.pop_one(out);
        }
    }

    pub fn pop_one(&mut self, out: &mut String) -> Option<StackEntry> {
        let entry = self.entries.pop()?;
        out.push_str(&entry.closing_tag);
        Some(entry)
    }

    pub fn top(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    /// The entry pushed first in the current run, i.e. the outermost one.
    pub fn bottom(&self) -> Option<&StackEntry> {
        self.entries.first()
    }

    /// Entries from innermost to outermost.
    pub fn iter_from_top(&self) -> impl Iterator<Item = &StackEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
