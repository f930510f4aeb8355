/// cli/src/output.rs
/// Styled terminal output for the CLI
/// description: Diagnostics go to stderr in red, confirmations to stdout in
/// green. Styling is dropped automatically when the stream is not a tty.

use std::io::{self, Write};

use console::Style;

/// Styles for different output elements
pub struct FormatStyle {
    pub title: Style,
    pub info: Style,
    pub warning: Style,
    pub error: Style,
    pub success: Style,
}

impl Default for FormatStyle {
    fn default() -> Self {
        FormatStyle {
            title: Style::new().bold().underlined(),
            info: Style::new().cyan(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            success: Style::new().green().bold(),
        }
    }
}

/// Writes prefixed, styled lines into any `Write`.
pub struct FormattedOutputHandler<T: Write> {
    out: T,
    formatting: FormatStyle,
}

impl<T: Write> FormattedOutputHandler<T> {
    pub fn new(out: T) -> Self {
        FormattedOutputHandler { out, formatting: FormatStyle::default() }
    }

    /// Write one line, styled if `style` is given.
    pub fn line(&mut self, text: &str, style: Option<&Style>) -> io::Result<()> {
        match style {
            Some(s) => writeln!(self.out, "{}", s.apply_to(text)),
            None => writeln!(self.out, "{}", text),
        }
    }

    pub fn title(&mut self, text: &str) -> io::Result<()> {
        let style = self.formatting.title.clone();
        self.line(text, Some(&style))
    }
    pub fn info(&mut self, text: &str) -> io::Result<()> {
        let style = self.formatting.info.clone();
        self.line(text, Some(&style))
    }
    pub fn warning(&mut self, text: &str) -> io::Result<()> {
        let style = self.formatting.warning.clone();
        self.line(text, Some(&style))
    }
    pub fn error(&mut self, text: &str) -> io::Result<()> {
        let style = self.formatting.error.clone();
        self.line(text, Some(&style))
    }
    pub fn success(&mut self, text: &str) -> io::Result<()> {
        let style = self.formatting.success.clone();
        self.line(text, Some(&style))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

pub type StdoutHandler = FormattedOutputHandler<io::Stdout>;
pub type StderrHandler = FormattedOutputHandler<io::Stderr>;

pub fn stdout_handler() -> StdoutHandler {
    FormattedOutputHandler::new(io::stdout())
}

pub fn stderr_handler() -> StderrHandler {
    FormattedOutputHandler::new(io::stderr())
}
