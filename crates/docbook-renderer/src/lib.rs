use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::Path;

mod theme;

pub use theme::{FontFamily, Theme, UnknownPresetError};

const BASE_CSS: &str = include_str!("../assets/docbook.css");

pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 12..=28;

/// Page widths in px, picked by index. Index 0 leaves the page unconstrained.
pub const PAGE_SIZES: [u32; 5] = [0, 800, 900, 1000, 1200];

/// Wraps rendered fragments into a reader page.
#[derive(Debug, Clone)]
pub struct Renderer {
    theme: Theme,
    font: Option<FontFamily>,
    font_size: Option<u32>,
    page_size: Option<u32>,
    custom_vars: BTreeMap<String, String>,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            font: None,
            font_size: None,
            page_size: None,
            custom_vars: BTreeMap::new(),
        }
    }

    pub fn with_font(mut self, font: FontFamily) -> Self {
        self.font = Some(font);
        self
    }

    /// Sizes outside [`FONT_SIZE_RANGE`] are ignored.
    pub fn with_font_size(mut self, size: u32) -> Self {
        if FONT_SIZE_RANGE.contains(&size) {
            self.font_size = Some(size);
        } else {
            tracing::debug!(size, "ignoring font size outside 12..=28");
        }
        self
    }

    /// Index into [`PAGE_SIZES`]; out-of-range indices are ignored.
    pub fn with_page_size(mut self, index: usize) -> Self {
        match PAGE_SIZES.get(index) {
            Some(0) => self.page_size = None,
            Some(width) => self.page_size = Some(*width),
            None => tracing::debug!(index, "ignoring unknown page size index"),
        }
        self
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_vars.insert(key.into(), value.into());
        self
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Reader settings as CSS custom properties, without the theme colours.
    fn reader_vars(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        if let Some(font) = self.font {
            vars.insert("--reader-font-family".to_string(), font.stack().to_string());
        }
        if let Some(size) = self.font_size {
            vars.insert("--reader-font-size".to_string(), format!("{}px", size));
        }
        if let Some(width) = self.page_size {
            vars.insert("--page-size".to_string(), format!("{}px", width));
        }
        vars.extend(
            self.custom_vars
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        vars
    }

    pub fn stylesheet(&self) -> String {
        let mut out = String::new();
        out.push_str(":root {\n");
        let scheme = if self.theme.is_night() { "dark" } else { "light" };
        out.push_str(&format!("  color-scheme: {};\n", scheme));
        for (key, value) in self.theme.vars() {
            push_var(&mut out, key, value);
        }
        for (key, value) in &self.reader_vars() {
            push_var(&mut out, key, value);
        }
        out.push_str("}\n");
        out.push_str(BASE_CSS);
        out
    }

    pub fn embed_html(&self, html: &str, with_inline_css: bool) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n");
        out.push_str("<html lang=\"zh\">\n");
        out.push_str("<head>\n");
        out.push_str("  <meta charset=\"utf-8\" />\n");
        out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
        if with_inline_css {
            out.push_str("  <style>\n");
            out.push_str(&self.stylesheet());
            out.push_str("\n  </style>\n");
        } else {
            out.push_str("  <link rel=\"stylesheet\" href=\"docbook.css\" />\n");
        }
        out.push_str("</head>\n");
        out.push_str("<body>\n");
        out.push_str("<article class=\"docbook\">\n");
        out.push_str(html);
        if !html.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("</article>\n");
        out.push_str("</body>\n");
        out.push_str("</html>\n");
        out
    }

    pub fn generate_files(&self, out_dir: &Path) -> io::Result<()> {
        fs::create_dir_all(out_dir)?;
        fs::write(out_dir.join("docbook.css"), self.stylesheet())?;
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

fn push_var(out: &mut String, key: &str, value: &str) {
    out.push_str("  ");
    out.push_str(key);
    out.push_str(": ");
    out.push_str(value);
    out.push_str(";\n");
}
