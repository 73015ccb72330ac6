use std::collections::HashMap;

pub const DEFAULT_PALETTE: [&str; 4] = ["style01", "style02", "style03", "style04"];

pub fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|label| label.to_string()).collect()
}

/// Hands out palette labels to (annotator, kind) pairs in first-seen order.
///
/// One assigner lives for one compile call or one render session, so two
/// documents never share numbering.
#[derive(Clone, Debug)]
pub struct StyleAssigner {
    palette: Vec<String>,
    assigned: HashMap<(String, String), usize>,
}

impl StyleAssigner {
    pub fn new(palette: Vec<String>) -> Self {
        Self {
            palette,
            assigned: HashMap::new(),
        }
    }

    /// Returns the label for the pair, assigning the next one on first sight.
    /// An empty palette always yields `""`.
    pub fn style_for(&mut self, annotator: &str, kind: &str) -> &str {
        if self.palette.is_empty() {
            return "";
        }
        let next = self.assigned.len() % self.palette.len();
        let slot = *self
            .assigned
            .entry((annotator.to_string(), kind.to_string()))
            .or_insert(next);
        &self.palette[slot]
    }

    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }
}

impl Default for StyleAssigner {
    fn default() -> Self {
        Self::new(default_palette())
    }
}
