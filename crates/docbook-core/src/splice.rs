use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[^>]+>").expect("tag pattern is valid"));

/// A rendered annotation waiting to be placed into its host text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fragment<'a> {
    pub content: &'a str,
    /// Offset into the host's tag-stripped text, in characters.
    pub position: Option<usize>,
}

impl<'a> Fragment<'a> {
    pub fn new(content: &'a str, position: Option<usize>) -> Self {
        Self { content, position }
    }

    fn usable_position(&self) -> Option<usize> {
        self.position.filter(|position| *position != 0)
    }
}

/// Length of `text` in characters once its tags are stripped.
pub(crate) fn plain_len(text: &str) -> usize {
    TAG_PATTERN.split(text).map(|run| run.chars().count()).sum()
}

/// Places each fragment at its plain-text offset inside `base`.
///
/// `fragments` must be sorted by position: a single cursor walks the list
/// and never goes back. Tags in `base` never count toward offsets. A
/// fragment landing exactly before a closing tag is emitted after that tag
/// so it does not end up inside the element being closed. Fragments without
/// a usable position (missing or zero) are skipped. When `base` is empty the
/// fragments are simply concatenated in list order.
pub fn insert_annotations(base: &str, fragments: &[Fragment<'_>]) -> String {
    if fragments.is_empty() {
        return base.to_string();
    }
    if base.is_empty() {
        return fragments
            .iter()
            .inspect(|fragment| {
                if let Some(position) = fragment.usable_position() {
                    tracing::debug!(position, "appending positioned fragment to empty host");
                }
            })
            .map(|fragment| fragment.content)
            .collect();
    }

    let extra: usize = fragments.iter().map(|fragment| fragment.content.len()).sum();
    let mut splicer = Splicer {
        out: String::with_capacity(base.len() + extra),
        fragments,
        placed: vec![false; fragments.len()],
        cursor: 0,
        seen: 0,
    };

    let mut last = 0;
    for tag in TAG_PATTERN.find_iter(base) {
        let deferred = splicer.splice_run(&base[last..tag.start()], Some(tag.as_str()));
        splicer.out.push_str(tag.as_str());
        for content in deferred {
            splicer.out.push_str(content);
        }
        last = tag.end();
    }
    let deferred = splicer.splice_run(&base[last..], None);
    debug_assert!(deferred.is_empty());

    for (fragment, placed) in fragments.iter().zip(&splicer.placed) {
        match fragment.usable_position() {
            Some(position) if !placed => {
                tracing::warn!(
                    position,
                    text_len = splicer.seen,
                    "annotation position lies past the end of its host text"
                );
            }
            None => tracing::debug!("skipped annotation without a usable position"),
            _ => {}
        }
    }

    splicer.out
}

struct Splicer<'f, 'a> {
    out: String,
    fragments: &'f [Fragment<'a>],
    placed: Vec<bool>,
    cursor: usize,
    /// Plain-text characters consumed before the current run.
    seen: usize,
}

impl<'a> Splicer<'_, 'a> {
    /// Writes one tag-free run, inserting every fragment that falls inside
    /// it. Returns the fragments that must follow `next_tag` instead.
    fn splice_run(&mut self, run: &str, next_tag: Option<&str>) -> Vec<&'a str> {
        let bounds: Vec<usize> = run
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(run.len()))
            .collect();
        let run_chars = bounds.len() - 1;
        let start = self.seen;
        let end = start + run_chars;
        let closes_next = next_tag.is_some_and(|tag| tag.starts_with("</"));

        let mut deferred = Vec::new();
        let mut split = 0;
        for index in self.cursor..self.fragments.len() {
            let fragment = self.fragments[index];
            let Some(position) = fragment.usable_position() else {
                continue;
            };
            if self.placed[index] || position > end {
                continue;
            }
            let offset = position.saturating_sub(start).max(split);
            self.out.push_str(&run[bounds[split]..bounds[offset]]);
            if position == end && closes_next {
                deferred.push(fragment.content);
            } else {
                self.out.push_str(fragment.content);
            }
            split = offset;
            self.placed[index] = true;
            self.cursor = index + 1;
        }
        self.out.push_str(&run[bounds[split]..]);
        self.seen = end;
        deferred
    }
}
