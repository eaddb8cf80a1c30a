use std::fmt;

/// A location in some source text: a filename plus 1-origin line/column.
///
/// `filename` is `None` for source that did not come from a file (an `-e`
/// string or stdin); line and column still track as usual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub filename: Option<String>,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(filename: Option<String>, line: usize, column: usize) -> Self {
        Position {
            filename,
            line,
            column,
        }
    }

    pub fn start(filename: Option<String>) -> Self {
        Position::new(filename, 1, 1)
    }

    /// Advances the position by one character. A newline resets the column.
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(name) => write!(f, "{}:{}:{}", name, self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}
