use super::CompilerState;
use super::classify::Classified;
use crate::diagnostic::{DiagnosticSeverity, E_ANNOTATION_ORPHAN, W_ANNOTATION_NESTING};
use crate::html::{
    IDEOGRAPHIC_INDENT, attributes_block, author_content, category_content, data_id_attr,
    dynasty_content, header_content, source_link,
};
use crate::mark::MarkType;

pub(super) fn handle_line(state: &mut CompilerState, index: usize, line: &Classified<'_>) {
    match line.mark {
        MarkType::Header(level) => header(state, index, level, line.content),
        MarkType::Author | MarkType::Date | MarkType::Category | MarkType::Source => {
            attribute(state, index, line.mark, line.content)
        }
        MarkType::Description => description(state, index, line.content),
        MarkType::AnnotationHeader => {
            annotation_header(state, index, line.level, line.content, false);
        }
        MarkType::Annotation => annotation_content(state, index, line.level, line.content),
        MarkType::Break => {
            state.rollback(0);
            state.out.push_str(&format!("<hr data-id=\"{}\" />", index));
        }
        MarkType::Note => {}
        MarkType::None => state.rollback(0),
        MarkType::Paragraph => paragraph(state, index, line.content),
    }
}

fn header(state: &mut CompilerState, index: usize, level: u8, content: &str) {
    state.line_count = 0;
    state.rollback(0);
    state.out.push_str(&format!(
        "<h{level} data-id=\"{index}\">{}</h{level}>",
        header_content(content)
    ));
}

fn attribute(state: &mut CompilerState, index: usize, mark: MarkType, content: &str) {
    state.rollback(0);
    let html = match mark {
        MarkType::Author => attributes_block(Some(index), &author_content(content)),
        MarkType::Date => attributes_block(Some(index), &dynasty_content(content)),
        MarkType::Category => attributes_block(Some(index), &category_content(content)),
        _ => source_link(Some(index), content),
    };
    state.out.push_str(&html);
}

fn description(state: &mut CompilerState, index: usize, content: &str) {
    let continues = state
        .stack
        .top()
        .is_some_and(|top| top.mark == MarkType::Description);
    if continues {
        state.out.push_str(&format!(
            "<p data-id=\"{}\" class=\"description\">{}</p>",
            index, content
        ));
        return;
    }
    state.rollback(0);
    state.out.push_str(&format!(
        "<div data-id=\"{}\" class=\"description-div\"><p class=\"description\">{}</p>",
        index, content
    ));
    state.stack.push(MarkType::Description, "</div>", 0);
}

fn paragraph(state: &mut CompilerState, index: usize, content: &str) {
    // Plain text after an inline annotation belongs to the paragraph that
    // hosts the annotation.
    let continues = match (state.stack.top(), state.stack.bottom()) {
        (Some(top), Some(bottom)) => {
            top.mark.is_annotation() && top.level > 0 && bottom.mark == MarkType::Paragraph
        }
        _ => false,
    };
    if continues {
        state.rollback(1);
        state
            .out
            .push_str(&format!("<span data-id=\"{}\">{}</span>", index, content));
        return;
    }

    state.rollback(0);
    let number = state.next_paragraph_number();
    state.out.push_str(&format!(
        "<div data-id=\"{}\" class=\"paragraph-div\"><p><span class=\"id\">{}</span></p><p class=\"paragraph\">{}{}",
        index, number, IDEOGRAPHIC_INDENT, content
    ));
    state.stack.push(MarkType::Paragraph, "</p></div>", 0);
}

/// Opens an annotation block (level 0) or an inline annotation (deeper).
/// `synthesized` headers stand in for a missing `!!!` line and carry no
/// `data-id`. Returns `false` when the header was rejected.
fn annotation_header(
    state: &mut CompilerState,
    index: usize,
    level: usize,
    content: &str,
    synthesized: bool,
) -> bool {
    if state.stack.is_empty() && level > 0 {
        state.report(
            index,
            DiagnosticSeverity::Error,
            E_ANNOTATION_ORPHAN,
            format!("nested annotation at level {level} has no enclosing block"),
        );
        return false;
    }
    close_for_header(state, level);

    let parts: Vec<&str> = content.split(',').collect();
    let (annotator, kind) = match parts.as_slice() {
        [kind] => ("", *kind),
        [annotator, kind] => (*annotator, *kind),
        _ => {
            tracing::debug!(line = index, "annotation header with more than two fields");
            ("", "")
        }
    };
    let style = if parts.len() > 2 {
        String::new()
    } else {
        state.styles.style_for(annotator, kind).to_string()
    };

    let mut label = String::new();
    if !annotator.is_empty() {
        label.push_str(&format!(
            "<span class=\"annotator\">{}</span>&nbsp;",
            annotator
        ));
    }
    if !kind.is_empty() {
        label.push_str(&format!("<span class=\"type\">{}</span>", kind));
    }

    let data_id = data_id_attr((!synthesized).then_some(index));
    let html = if level == 0 {
        let class = join_class("annotation", &style);
        let label = if label.is_empty() {
            label
        } else {
            format!("<p>{}</p>", label)
        };
        format!("<div{} class=\"{}\">{}", data_id, class, label)
    } else {
        let class = join_class("annotation inner", &style);
        format!("<annotation{} class=\"{}\">{}", data_id, class, label)
    };
    state.out.push_str(&html);

    let closing = if level == 0 { "</div>" } else { "</annotation>" };
    state.stack.push(MarkType::AnnotationHeader, closing, level);
    true
}

fn join_class(base: &str, style: &str) -> String {
    if style.is_empty() {
        base.to_string()
    } else {
        format!("{} {}", base, style)
    }
}

/// A header at the same or a shallower level ends the current annotation,
/// up to and including the sibling header it replaces.
fn close_for_header(state: &mut CompilerState, level: usize) {
    let Some(top) = state.stack.top() else {
        return;
    };
    if level > top.level {
        return;
    }
    if !top.mark.is_annotation() {
        state.rollback(0);
        return;
    }
    while let Some(entry) = state.pop_one() {
        if entry.mark == MarkType::AnnotationHeader && entry.level == level {
            break;
        }
    }
}

fn annotation_content(state: &mut CompilerState, index: usize, level: usize, content: &str) {
    if state.stack.is_empty() {
        if !annotation_header(state, index, level, "", true) {
            return;
        }
    } else {
        match nearest_open(state, index, level) {
            Some((mark, open_level)) if open_level == level && mark.is_annotation() => {}
            Some(_) => {
                annotation_header(state, index, level, "", true);
            }
            None => {
                state.report(
                    index,
                    DiagnosticSeverity::Warning,
                    W_ANNOTATION_NESTING,
                    format!("annotation at level {level} has no open element at or above it"),
                );
                return;
            }
        }
    }
    close_for_content(state, level);

    if level == 0 {
        state.out.push_str(&format!(
            "<p data-id=\"{}\">{}{}",
            index, IDEOGRAPHIC_INDENT, content
        ));
        state.stack.push(MarkType::Annotation, "</p>", 0);
    } else {
        state
            .out
            .push_str(&format!("<span data-id=\"{}\">{}", index, content));
        state.stack.push(MarkType::Annotation, "</span>", level);
    }
}

/// Mark and level of the innermost open element not deeper than `level`.
fn nearest_open(state: &CompilerState, index: usize, level: usize) -> Option<(MarkType, usize)> {
    for entry in state.stack.iter_from_top() {
        if entry.level <= level {
            return Some((entry.mark, entry.level));
        }
        tracing::debug!(
            line = index,
            open_level = entry.level,
            level,
            "annotation content steps out of a deeper element"
        );
    }
    None
}

/// Closes earlier content at this level while keeping the header that
/// introduced it open.
fn close_for_content(state: &mut CompilerState, level: usize) {
    let Some(top) = state.stack.top() else {
        return;
    };
    if level > top.level {
        return;
    }
    if !top.mark.is_annotation() {
        state.rollback(0);
        return;
    }
    while let Some(top) = state.stack.top() {
        let is_sibling_header = top.mark == MarkType::AnnotationHeader && top.level == level;
        if is_sibling_header || top.level < level {
            break;
        }
        state.pop_one();
    }
}

#[cfg(test)]
mod tests {
    use crate::compiler::{CompileOptions, compile_lines};

    fn html(lines: &[&str]) -> String {
        compile_lines(lines.iter().copied(), &CompileOptions::default()).html
    }

    #[test]
    fn sibling_content_closes_previous_content() {
        assert_eq!(
            html(&["!!! 传", "::: 甲", "::: 乙"]),
            "<div data-id=\"0\" class=\"annotation style01\"><p><span class=\"type\">传</span></p>\
             <p data-id=\"1\">&#x3000;&#x3000;甲</p><p data-id=\"2\">&#x3000;&#x3000;乙</p></div>"
        );
    }

    #[test]
    fn sibling_header_replaces_previous_header() {
        assert_eq!(
            html(&["!!! 毛亨,传", "!!! 郑玄,笺"]),
            "<div data-id=\"0\" class=\"annotation style01\"><p><span class=\"annotator\">毛亨</span>&nbsp;<span class=\"type\">传</span></p></div>\
             <div data-id=\"1\" class=\"annotation style02\"><p><span class=\"annotator\">郑玄</span>&nbsp;<span class=\"type\">笺</span></p></div>"
        );
    }

    #[test]
    fn content_without_header_gets_a_default_one() {
        assert_eq!(
            html(&["::: 注"]),
            "<div class=\"annotation style01\"><p data-id=\"0\">&#x3000;&#x3000;注</p></div>"
        );
    }

    #[test]
    fn text_after_inline_annotation_continues_paragraph() {
        assert_eq!(
            html(&["经文", "    !!! 传", "    ::: 注", "续文"]),
            "<div data-id=\"0\" class=\"paragraph-div\"><p><span class=\"id\">1</span></p><p class=\"paragraph\">&#x3000;&#x3000;经文\
             <annotation data-id=\"1\" class=\"annotation inner style01\"><span class=\"type\">传</span>\
             <span data-id=\"2\">注</span></annotation><span data-id=\"3\">续文</span></p></div>"
        );
    }

    #[test]
    fn too_many_fields_drop_label_and_style() {
        assert_eq!(
            html(&["!!! a,b,c"]),
            "<div data-id=\"0\" class=\"annotation\"></div>"
        );
    }
}
