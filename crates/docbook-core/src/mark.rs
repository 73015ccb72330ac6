/// Classification of a markup line, or of the element a stack entry closes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MarkType {
    /// Book (1), volume (2), chapter (3) or section (4) heading.
    Header(u8),
    Author,
    Date,
    Category,
    Source,
    Description,
    Paragraph,
    AnnotationHeader,
    Annotation,
    Break,
    Note,
    /// Blank line.
    None,
}

impl MarkType {
    pub fn is_annotation(self) -> bool {
        matches!(self, MarkType::AnnotationHeader | MarkType::Annotation)
    }
}
