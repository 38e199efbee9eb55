use std::sync::Arc;

/// A location inside a named source buffer.
///
/// `index` is a character offset. `line` and `column` are 0-based and
/// always agree with having advanced `index` characters from the start
/// of the text. Cloning a `Position` yields an independent snapshot; the
/// file name and text are shared immutably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    index: usize,
    line: usize,
    column: usize,
    file_name: Arc<str>,
    text: Arc<str>,
}

impl Position {
    /// Position of the first character of `text`.
    #[must_use]
    pub fn start(file_name: &str, text: &str) -> Self {
        Self {
            index: 0,
            line: 0,
            column: 0,
            file_name: Arc::from(file_name),
            text: Arc::from(text),
        }
    }

    /// Step past `current`, the character at this position.
    ///
    /// Leaving a `\n` moves to column 0 of the next line.
    pub const fn advance(&mut self, current: char) {
        self.index += 1;
        if current == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The full source line this position sits on, without its line break.
    #[must_use]
    pub fn source_line(&self) -> &str {
        self.text.lines().nth(self.line).unwrap_or("")
    }
}

/// Half-open source range `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `at`.
    #[must_use]
    pub fn empty(at: Position) -> Self {
        Self {
            end: at.clone(),
            start: at,
        }
    }

    /// Number of characters covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.index - self.start.index
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.index == self.end.index
    }

    /// Span from the start of `self` to the end of `other`.
    #[must_use]
    pub fn to(&self, other: &Self) -> Self {
        Self {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }

    /// Render the first line of the span with `^` markers underneath.
    ///
    /// Spans running past the end of their line are marked up to the
    /// line end; empty spans still get a single marker.
    #[must_use]
    pub fn excerpt(&self) -> String {
        let line = self.start.source_line();
        let width = line.chars().count();
        let from = self.start.column.min(width);
        let to = if self.end.line == self.start.line {
            self.end.column.min(width)
        } else {
            width
        };
        let markers = to.saturating_sub(from).max(1);

        let mut out = String::with_capacity(line.len() + from + markers + 1);
        out.push_str(line);
        out.push('\n');
        out.extend(std::iter::repeat_n(' ', from));
        out.extend(std::iter::repeat_n('^', markers));
        out
    }
}
