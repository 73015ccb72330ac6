//! Line-oriented markup to HTML.
//!
//! Every line is classified on its own, then handed to the handler for its
//! mark. Handlers share one [`ClosingTagStack`]; nothing is ever closed
//! except by popping it, and the stack is drained at end of input.

mod classify;
mod handlers;

use serde::Serialize;

use crate::diagnostic::{Diagnostic, DiagnosticSeverity};
use crate::stack::{ClosingTagStack, StackEntry};
use crate::style::{StyleAssigner, default_palette};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompileOptions {
    /// Labels handed out to annotation (annotator, kind) pairs. Empty means
    /// annotations carry the bare `annotation` class.
    pub palette: Vec<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            palette: default_palette(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CompileResult {
    pub html: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity == DiagnosticSeverity::Error)
    }
}

pub fn compile(source: &str) -> CompileResult {
    compile_with_options(source, &CompileOptions::default())
}

/// Splits on `\n` (dropping a trailing `\r`) and compiles the lines.
pub fn compile_with_options(source: &str, options: &CompileOptions) -> CompileResult {
    compile_lines(
        source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line)),
        options,
    )
}

pub fn compile_lines<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    options: &CompileOptions,
) -> CompileResult {
    let mut state = CompilerState::new(options);
    for (index, line) in lines.into_iter().enumerate() {
        let line = classify::classify(line);
        handlers::handle_line(&mut state, index, &line);
    }
    state.finish()
}

pub(crate) struct CompilerState {
    pub(crate) out: String,
    pub(crate) stack: ClosingTagStack,
    /// Paragraph counter; restarts after every header.
    pub(crate) line_count: usize,
    pub(crate) styles: StyleAssigner,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl CompilerState {
    fn new(options: &CompileOptions) -> Self {
        Self {
            out: String::new(),
            stack: ClosingTagStack::new(),
            line_count: 0,
            styles: StyleAssigner::new(options.palette.clone()),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn rollback(&mut self, reserved: usize) {
        self.stack.rollback(&mut self.out, reserved);
    }

    pub(crate) fn pop_one(&mut self) -> Option<StackEntry> {
        self.stack.pop_one(&mut self.out)
    }

    pub(crate) fn next_paragraph_number(&mut self) -> usize {
        self.line_count += 1;
        self.line_count
    }

    pub(crate) fn report(
        &mut self,
        line: usize,
        severity: DiagnosticSeverity,
        code: &'static str,
        message: impl Into<String>,
    ) {
        let message = message.into();
        tracing::warn!(line, code, severity = severity.label(), "{}", message);
        self.diagnostics
            .push(Diagnostic::new(line, severity, code, message));
    }

    fn finish(mut self) -> CompileResult {
        self.rollback(0);
        CompileResult {
            html: self.out,
            diagnostics: self.diagnostics,
        }
    }
}
