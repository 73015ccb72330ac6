//! Document tree to HTML.
//!
//! Children are rendered before their parent. A parent then splices its
//! positioned annotation children into its own text and emits the rest as
//! block output.

use crate::html::{
    SEPARATOR, attributes_block, authors_line, decorate_title, dynasty_content, source_link,
};
use crate::model::{Book, ContentPiece, Division, DivisionChild, DivisionType, Document, Title};
use crate::splice::{Fragment, insert_annotations, plain_len};
use crate::style::{StyleAssigner, default_palette};

const BOOK_LEVEL: usize = 1;
const VOLUME_LEVEL: usize = 2;
const CHAPTER_LEVEL: usize = 3;
const MAX_HEADING_LEVEL: usize = 6;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderOptions {
    pub palette: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            palette: default_palette(),
        }
    }
}

/// One rendered child, as seen by its parent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderedPiece {
    pub kind: DivisionType,
    pub html: String,
    pub position: Option<usize>,
}

impl RenderedPiece {
    fn has_position(&self) -> bool {
        self.position.is_some_and(|position| position != 0)
    }

    fn is_inline_annotation(&self) -> bool {
        self.kind == DivisionType::Annotation && self.has_position()
    }
}

/// Annotations and empty paragraphs (annotation blocks) carry no number.
fn takes_number(kind: DivisionType, content: &str) -> bool {
    match kind {
        DivisionType::Annotation => false,
        DivisionType::Paragraph => !content.is_empty(),
        _ => true,
    }
}

/// Style numbering for one document. Create a fresh session per document so
/// unrelated renders never share labels.
#[derive(Clone, Debug)]
pub struct RenderSession {
    styles: StyleAssigner,
}

impl RenderSession {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            styles: StyleAssigner::new(options.palette.clone()),
        }
    }

    pub fn render_document(&mut self, document: &Document) -> String {
        match document {
            Document::Book(book) => self.render_book(book),
            Document::Division(division) => self.render_division(division),
        }
    }

    pub fn render_book(&mut self, book: &Book) -> String {
        tracing::debug!(id = %book.id, divisions = book.divisions.len(), "rendering book");
        let mut header = String::new();
        header.push_str(&heading(BOOK_LEVEL, &decorate_title(&book.title, &book.title.title)));
        header.push_str(&authors_line(&book.authors));
        if let Some(dynasty) = book.dynasty.as_ref().filter(|d| !d.value.is_empty()) {
            header.push_str(&attributes_block(None, &dynasty_content(&dynasty.value)));
        }
        if !book.categories.is_empty() {
            let categories: Vec<String> = book
                .categories
                .iter()
                .map(|category| format!("<span class='category'>{}</span>", category))
                .collect();
            header.push_str(&attributes_block(None, &categories.join(SEPARATOR)));
        }
        if let Some(source) = book.source.as_deref().filter(|s| !s.is_empty()) {
            header.push_str(&source_link(None, source));
        }
        if let Some(description) = book.description.as_deref().filter(|d| !d.is_empty()) {
            header.push_str("<div class=\"description-div\">");
            for line in description.split('\n') {
                header.push_str(&format!("<p class=\"description\">{}</p>", line));
            }
            header.push_str("</div>");
        }

        let body: String = book
            .divisions
            .iter()
            .map(|division| self.render_division(division))
            .collect();
        frame("db-book", &book.id, &header, &body)
    }

    /// Volumes and chapters; anything else is not a division and renders
    /// as nothing.
    pub fn render_division(&mut self, division: &Division) -> String {
        match division.kind {
            DivisionType::Volume => self.render_container(division, VOLUME_LEVEL, "db-volume"),
            DivisionType::Chapter => self.render_chapter(division),
            kind => {
                tracing::debug!(id = %division.id, ?kind, "division type has no rendering");
                String::new()
            }
        }
    }

    pub fn render_chapter(&mut self, chapter: &Division) -> String {
        self.render_container(chapter, CHAPTER_LEVEL, "db-section")
    }

    fn render_container(&mut self, division: &Division, level: usize, class: &str) -> String {
        tracing::debug!(id = %division.id, kind = ?division.kind, "rendering division");
        let children = self.render_division_children(&division.divisions, CHAPTER_LEVEL + 1);
        let (inline, blocks) = partition(children);

        let title = division.title.as_ref().map_or_else(
            || {
                if !inline.is_empty() {
                    tracing::debug!(id = %division.id, "untitled division drops title annotations");
                }
                String::new()
            },
            |title| splice_title(title, &inline),
        );
        let mut header = heading(level, &title);
        header.push_str(&authors_line(&division.authors));
        frame(class, &division.id, &header, &blocks)
    }

    fn render_division_children(
        &mut self,
        children: &[DivisionChild],
        level: usize,
    ) -> Vec<RenderedPiece> {
        let mut order = 0;
        let mut rendered = Vec::with_capacity(children.len());
        for child in children {
            match child {
                DivisionChild::Division(division) => {
                    order += 1;
                    rendered.push(RenderedPiece {
                        kind: division.kind,
                        html: self.render_division(division),
                        position: None,
                    });
                }
                DivisionChild::Piece(piece) => {
                    if takes_number(piece.kind, &piece.content) {
                        order += 1;
                    }
                    rendered.push(self.render_content_piece(piece, order, level));
                }
            }
        }
        rendered
    }

    /// Renders `piece` with its visible number `index` and heading depth
    /// `level`; children are rendered one level deeper.
    pub fn render_content_piece(
        &mut self,
        piece: &ContentPiece,
        index: usize,
        level: usize,
    ) -> RenderedPiece {
        let mut order = 0;
        let mut children = Vec::with_capacity(piece.content_pieces.len());
        for child in &piece.content_pieces {
            if takes_number(child.kind, &child.content) {
                order += 1;
            }
            children.push(self.render_content_piece(child, order, level + 1));
        }

        let html = match piece.kind {
            DivisionType::Section => {
                let (inline, blocks) = partition(children);
                let title = insert_annotations(&piece.content, &fragments(&inline));
                let header = heading(level, &title);
                frame("db-section", &index.to_string(), &header, &blocks)
            }
            DivisionType::Paragraph if piece.content.is_empty() => format!(
                "<div class=\"db-column db-annotation\" key=\"{}\"><div class=\"number\"></div><div class=\"content\"><p>{}</p></div></div>",
                index,
                splice_body("", &children)
            ),
            DivisionType::Paragraph => {
                let lines: String = splice_lines(&piece.content, &children)
                    .iter()
                    .map(|line| format!("<p>{}</p>", line))
                    .collect();
                format!(
                    "<div class=\"db-column db-paragraph\" key=\"{index}\"><div class=\"number\"><p>{index}</p></div><div class=\"content\">{lines}</div></div>"
                )
            }
            DivisionType::Annotation if piece.content.is_empty() => {
                children.into_iter().map(|child| child.html).collect()
            }
            DivisionType::Annotation => self.render_annotation(piece, index, &children),
            kind => {
                tracing::debug!(?kind, "content piece of a division type renders as nothing");
                String::new()
            }
        };

        RenderedPiece {
            kind: piece.kind,
            html,
            position: piece.position,
        }
    }

    fn render_annotation(
        &mut self,
        piece: &ContentPiece,
        index: usize,
        children: &[RenderedPiece],
    ) -> String {
        let annotator = piece.annotator.as_deref().unwrap_or_default();
        let kind = piece.authorship.as_deref().unwrap_or_default();
        let style = self.styles.style_for(annotator, kind);

        let mut html = format!("<annotation class=\"{}\" key=\"{}\">", style, index);
        if !annotator.is_empty() {
            html.push_str(&format!("<span class=\"annotator\">{}</span>", annotator));
        }
        if !kind.is_empty() {
            html.push_str(&format!("<span class=\"type\">{}</span>", kind));
        }
        html.push_str(&splice_body(&piece.content, children));
        html.push_str("</annotation>");
        html
    }
}

pub fn render_document(document: &Document, options: &RenderOptions) -> String {
    RenderSession::new(options).render_document(document)
}

pub fn render_book(book: &Book, options: &RenderOptions) -> String {
    RenderSession::new(options).render_book(book)
}

pub fn render_chapter(chapter: &Division, options: &RenderOptions) -> String {
    RenderSession::new(options).render_chapter(chapter)
}

fn heading(level: usize, content: &str) -> String {
    let level = level.min(MAX_HEADING_LEVEL);
    format!("<h{level}>{content}</h{level}>")
}

fn frame(class: &str, key: &str, header: &str, body: &str) -> String {
    format!(
        "<div class=\"{class}\" key=\"{key}\"><div class=\"db-column\"><div class=\"number\"></div><div class=\"content\">{header}</div></div>{body}</div>"
    )
}

/// Splits rendered children into positioned annotations and concatenated
/// block output.
fn partition(children: Vec<RenderedPiece>) -> (Vec<RenderedPiece>, String) {
    let mut inline = Vec::new();
    let mut blocks = String::new();
    for child in children {
        if child.is_inline_annotation() {
            inline.push(child);
        } else {
            blocks.push_str(&child.html);
        }
    }
    (inline, blocks)
}

fn fragments(children: &[RenderedPiece]) -> Vec<Fragment<'_>> {
    children
        .iter()
        .map(|child| Fragment::new(&child.html, child.position))
        .collect()
}

fn splice_title(title: &Title, inline: &[RenderedPiece]) -> String {
    let main = insert_annotations(&title.title, &fragments(inline));
    if title.title.is_empty() {
        main
    } else {
        decorate_title(title, &main)
    }
}

/// Positioned children go to their offsets; the rest follow the text in
/// list order. An empty host just concatenates everything.
fn splice_body(content: &str, children: &[RenderedPiece]) -> String {
    if content.is_empty() {
        return children.iter().map(|child| child.html.as_str()).collect();
    }
    let (placed, floating): (Vec<&RenderedPiece>, Vec<&RenderedPiece>) =
        children.iter().partition(|child| child.has_position());
    let placed: Vec<Fragment<'_>> = placed
        .iter()
        .map(|child| Fragment::new(&child.html, child.position))
        .collect();
    let mut body = insert_annotations(content, &placed);
    for child in floating {
        body.push_str(&child.html);
    }
    body
}

/// Like [`splice_body`], but keeps the host's line breaks apart from the
/// fragments: each line of `content` gets the positioned children whose
/// offsets fall inside it, with every break counting as one character.
/// Children past the last line go to the last line; position-less ones
/// follow it.
fn splice_lines(content: &str, children: &[RenderedPiece]) -> Vec<String> {
    let (placed, floating): (Vec<&RenderedPiece>, Vec<&RenderedPiece>) =
        children.iter().partition(|child| child.has_position());
    let lines: Vec<&str> = content.split('\n').collect();
    let last = lines.len() - 1;

    let mut out = Vec::with_capacity(lines.len());
    let mut start = 0;
    for (index, line) in lines.iter().enumerate() {
        let end = start + plain_len(line);
        let mut leading = String::new();
        let mut local = Vec::new();
        for child in &placed {
            let Some(position) = child.position else {
                continue;
            };
            let on_line = position >= start && (position <= end || index == last);
            if !on_line {
                continue;
            }
            match position - start {
                0 => leading.push_str(&child.html),
                offset => local.push(Fragment::new(&child.html, Some(offset))),
            }
        }
        leading.push_str(&insert_annotations(line, &local));
        out.push(leading);
        start = end + 1;
    }
    if let Some(tail) = out.last_mut() {
        for child in floating {
            tail.push_str(&child.html);
        }
    }
    out
}
