mod compiler;
mod diagnostic;
mod error;
mod html;
mod mark;
mod model;
mod render;
mod sanitize;
mod splice;
mod stack;
mod style;

pub use compiler::{CompileOptions, CompileResult, compile, compile_lines, compile_with_options};
pub use diagnostic::{Diagnostic, DiagnosticSeverity, E_ANNOTATION_ORPHAN, W_ANNOTATION_NESTING};
pub use error::{Error, Result};
pub use mark::MarkType;
pub use model::{
    Author, Book, ContentPiece, Division, DivisionChild, DivisionType, Document, Dynasty, Title,
};
pub use render::{
    RenderOptions, RenderSession, RenderedPiece, render_book, render_chapter, render_document,
};
pub use sanitize::sanitize_html;
pub use splice::{Fragment, insert_annotations};
pub use stack::{ClosingTagStack, StackEntry};
pub use style::{DEFAULT_PALETTE, StyleAssigner, default_palette};
