use crate::mark::MarkType;

const HEADER_MARKS: [(&str, u8); 4] = [("# ", 1), ("## ", 2), ("### ", 3), ("#### ", 4)];
const ANNOTATION_HEADER_MARK: &str = "!!! ";
const ANNOTATION_MARK: &str = "::: ";
const INDENT_UNIT: &str = "    ";
const ATTRIBUTE_MARKS: [(&str, MarkType); 5] = [
    ("[author] ", MarkType::Author),
    ("[date] ", MarkType::Date),
    ("[category] ", MarkType::Category),
    ("[source] ", MarkType::Source),
    ("[description] ", MarkType::Description),
];
const BREAK_MARKS: [&str; 2] = ["---", "***"];
const NOTE_MARK: &str = "// ";

/// A source line reduced to its mark, the text after the mark and, for
/// annotation lines, the number of indent units in front of it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Classified<'a> {
    pub(crate) mark: MarkType,
    pub(crate) content: &'a str,
    pub(crate) level: usize,
}

impl<'a> Classified<'a> {
    fn flat(mark: MarkType, content: &'a str) -> Self {
        Self {
            mark,
            content,
            level: 0,
        }
    }
}

/// First match wins; anything unmatched is a paragraph line.
pub(crate) fn classify(line: &str) -> Classified<'_> {
    for (mark, level) in HEADER_MARKS {
        if let Some(content) = line.strip_prefix(mark) {
            return Classified::flat(MarkType::Header(level), content);
        }
    }
    for (mark, kind) in [
        (ANNOTATION_HEADER_MARK, MarkType::AnnotationHeader),
        (ANNOTATION_MARK, MarkType::Annotation),
    ] {
        if let Some((content, level)) = strip_nested(line, mark) {
            return Classified {
                mark: kind,
                content,
                level,
            };
        }
    }
    for (mark, kind) in ATTRIBUTE_MARKS {
        if let Some(content) = line.strip_prefix(mark) {
            return Classified::flat(kind, content);
        }
    }
    for mark in BREAK_MARKS {
        if let Some(content) = line.strip_prefix(mark) {
            return Classified::flat(MarkType::Break, content);
        }
    }
    if let Some(content) = line.strip_prefix(NOTE_MARK) {
        return Classified::flat(MarkType::Note, content);
    }
    if line.is_empty() {
        return Classified::flat(MarkType::None, line);
    }
    Classified::flat(MarkType::Paragraph, line)
}

/// Matches `mark`, `INDENT_UNIT + mark`, `INDENT_UNIT * 2 + mark`, ...
fn strip_nested<'a>(line: &'a str, mark: &str) -> Option<(&'a str, usize)> {
    let mut rest = line;
    let mut level = 0;
    loop {
        if let Some(content) = rest.strip_prefix(mark) {
            return Some((content, level));
        }
        rest = rest.strip_prefix(INDENT_UNIT)?;
        level += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::classify;
    use crate::mark::MarkType;

    #[test]
    fn headers_by_depth() {
        assert_eq!(classify("# 毛诗正义").mark, MarkType::Header(1));
        assert_eq!(classify("#### 序言").mark, MarkType::Header(4));
        assert_eq!(classify("#### 序言").content, "序言");
        assert_eq!(classify("##### 太深").mark, MarkType::Paragraph);
        assert_eq!(classify("#没有空格").mark, MarkType::Paragraph);
    }

    #[test]
    fn nesting_level_counts_indent_units() {
        let line = classify("        !!! 陆德明,音义");
        assert_eq!(line.mark, MarkType::AnnotationHeader);
        assert_eq!(line.level, 2);
        assert_eq!(line.content, "陆德明,音义");

        let line = classify("    ::: ○为，于伪反。");
        assert_eq!(line.mark, MarkType::Annotation);
        assert_eq!(line.level, 1);
    }

    #[test]
    fn partial_indent_is_a_paragraph() {
        assert_eq!(classify("  !!! 毛亨,传").mark, MarkType::Paragraph);
        assert_eq!(classify("    正文").mark, MarkType::Paragraph);
    }

    #[test]
    fn breaks_notes_and_blanks() {
        assert_eq!(classify("---").mark, MarkType::Break);
        assert_eq!(classify("***").mark, MarkType::Break);
        assert_eq!(classify("// 校对说明").mark, MarkType::Note);
        assert_eq!(classify("").mark, MarkType::None);
        assert_eq!(classify("//没有空格").mark, MarkType::Paragraph);
    }

    #[test]
    fn attributes() {
        assert_eq!(classify("[author] 司马迁").mark, MarkType::Author);
        assert_eq!(classify("[date] 西汉").mark, MarkType::Date);
        assert_eq!(classify("[category] 史").mark, MarkType::Category);
        assert_eq!(classify("[source] https://x").mark, MarkType::Source);
        assert_eq!(classify("[description] 案").content, "案");
    }
}
