use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use docbook_core::{
    CompileOptions, Diagnostic, Document, RenderOptions, compile_with_options, default_palette,
    render_document, sanitize_html,
};
use docbook_renderer::{FontFamily, Renderer, Theme};
use miette::{IntoDiagnostic, WrapErr};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docbook", version)]
#[command(about = "Render annotated classical texts to HTML")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile line markup to an HTML fragment
    Compile {
        /// Markup file; reads stdin when omitted
        input: Option<PathBuf>,

        /// Print diagnostics to stderr
        #[arg(long, value_enum)]
        diagnostics: Option<DiagnosticsMode>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render a JSON book or division to an HTML fragment
    Render {
        /// JSON file; reads stdin when omitted
        input: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Comma-separated annotation style labels; pass an empty value for none
    #[arg(long, value_delimiter = ',')]
    palette: Option<Vec<String>>,

    /// Strip everything outside the docbook markup vocabulary
    #[arg(long)]
    sanitized: bool,

    /// Emit a complete page with the reader stylesheet inlined
    #[arg(long)]
    standalone: bool,

    /// Reader theme: day01..day05 or night01
    #[arg(long, default_value = "day01")]
    theme: Theme,

    /// Reader font: 黑体, 宋体 or 楷体
    #[arg(long)]
    font: Option<FontFamily>,

    /// Reader font size in px (12-28)
    #[arg(long)]
    font_size: Option<u32>,

    /// Page width preset index (0 = unconstrained, 1-4 = 800/900/1000/1200px)
    #[arg(long)]
    page_size: Option<usize>,
}

impl OutputArgs {
    fn palette(&self) -> Vec<String> {
        match &self.palette {
            Some(labels) => labels
                .iter()
                .filter(|label| !label.is_empty())
                .cloned()
                .collect(),
            None => default_palette(),
        }
    }

    fn renderer(&self) -> Renderer {
        let mut renderer = Renderer::new(self.theme);
        if let Some(font) = self.font {
            renderer = renderer.with_font(font);
        }
        if let Some(size) = self.font_size {
            renderer = renderer.with_font_size(size);
        }
        if let Some(index) = self.page_size {
            renderer = renderer.with_page_size(index);
        }
        renderer
    }

    fn finish(&self, html: String) -> String {
        let html = if self.sanitized {
            sanitize_html(&html)
        } else {
            html
        };
        if self.standalone {
            self.renderer().embed_html(&html, true)
        } else {
            html
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DiagnosticsMode {
    Json,
    Pretty,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let failed = match &cli.command {
        Command::Compile {
            input,
            diagnostics,
            output,
        } => run_compile(input.as_deref(), *diagnostics, output)?,
        Command::Render { input, output } => {
            run_render(input.as_deref(), output)?;
            false
        }
    };

    if failed {
        process::exit(1);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Returns whether any error diagnostic was produced.
fn run_compile(
    input: Option<&Path>,
    mode: Option<DiagnosticsMode>,
    output: &OutputArgs,
) -> miette::Result<bool> {
    let source = read_input(input)?;
    let options = CompileOptions {
        palette: output.palette(),
    };
    let result = compile_with_options(&source, &options);
    tracing::debug!(
        bytes = source.len(),
        diagnostics = result.diagnostics.len(),
        "compiled markup"
    );

    if let Some(mode) = mode {
        emit_diagnostics(&result.diagnostics, mode)?;
    }
    let failed = result.has_errors();
    write_output(&output.finish(result.html))?;
    Ok(failed)
}

fn run_render(input: Option<&Path>, output: &OutputArgs) -> miette::Result<()> {
    let source = read_input(input)?;
    let document = Document::from_json(&source)?;
    let options = RenderOptions {
        palette: output.palette(),
    };
    let html = render_document(&document, &options);
    write_output(&output.finish(html))
}

fn read_input(input: Option<&Path>) -> miette::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .into_diagnostic()
                .wrap_err("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn write_output(html: &str) -> miette::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(html.as_bytes())
        .and_then(|_| stdout.flush())
        .into_diagnostic()
        .wrap_err("failed to write output")
}

fn emit_diagnostics(diagnostics: &[Diagnostic], mode: DiagnosticsMode) -> miette::Result<()> {
    match mode {
        DiagnosticsMode::Json => {
            let json = serde_json::to_string_pretty(diagnostics).into_diagnostic()?;
            eprintln!("{}", json);
        }
        DiagnosticsMode::Pretty => {
            for diagnostic in diagnostics {
                eprintln!(
                    "{}: {} {} {}",
                    diagnostic.line + 1,
                    diagnostic.severity.label(),
                    diagnostic.code,
                    diagnostic.message
                );
            }
        }
    }
    Ok(())
}
