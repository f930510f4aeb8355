#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Location {
    /// 1-based line number as reported by the parser.
    pub line: usize,
    /// 0-based column (byte offset into the line).
    pub column: usize,
}

impl Location {
    /// Creates a new `Location`.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Span {
    /// The starting location of the span.
    pub start: Location,
    /// The ending location of the span.
    pub end: Location,
}

impl Span {
    /// Creates a new `Span` from two `Location`s.
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Builds a span from the four positional fields a parser attaches to a
    /// node. A node without a start line has no usable position.
    pub fn from_positions(
        lineno: Option<usize>,
        col_offset: Option<usize>,
        end_lineno: Option<usize>,
        end_col_offset: Option<usize>,
    ) -> Option<Self> {
        let line = lineno?;
        let column = col_offset.unwrap_or(0);
        let start = Location::new(line, column);
        let end = Location::new(end_lineno.unwrap_or(line), end_col_offset.unwrap_or(column));
        Some(Span::new(start, end))
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
