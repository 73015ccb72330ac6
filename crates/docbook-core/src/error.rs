use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid document json: {0}")]
    #[diagnostic(code(docbook::load::json))]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    #[diagnostic(code(docbook::load::io))]
    Io(#[from] std::io::Error),

    #[error("document is neither a book nor a division")]
    #[diagnostic(
        code(docbook::load::unknown_document),
        help("a book carries `title` without `type`; a division carries `type`")
    )]
    UnknownDocument,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
