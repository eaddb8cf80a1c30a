use crate::array_value::PlorthArray;
use crate::error::{Error, ErrorKind};
use crate::object_value::PlorthObject;
use crate::position::Position;
use crate::quote::Quote;
use crate::string_value::PlorthString;
use crate::symbol::Symbol;
use crate::value::Value;
use crate::word::Word;
use indexmap::IndexMap;

const RESERVED: &str = "()[]{}\"',:;#";

fn is_word_char(ch: char) -> bool {
    !ch.is_whitespace() && !RESERVED.contains(ch)
}

/// Recursive-descent parser over Unicode source text, one character of
/// lookahead. Produces an ordered sequence of token values ready to be
/// wrapped in a compiled quote and executed.
pub struct Parser {
    chars: Vec<char>,
    pos: usize,
    position: Position,
}

impl Parser {
    pub fn new(source: &str, start: Position) -> Self {
        Parser {
            chars: source.chars().collect(),
            pos: 0,
            position: start,
        }
    }

    pub fn parse_program(&mut self) -> Result<Vec<Value>, Error> {
        tracing::trace!(
            filename = ?self.position.filename,
            bytes = self.chars.len(),
            "parser entry"
        );
        let mut values = Vec::new();
        loop {
            if self.skip_whitespace() {
                break;
            }
            values.push(self.parse_value()?);
        }
        tracing::trace!(tokens = values.len(), "parser exit");
        Ok(values)
    }

    fn eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_is(&self, expected: char) -> bool {
        self.peek() == Some(expected)
    }

    fn read(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        self.position.advance(ch);
        ch
    }

    fn peek_read(&mut self, expected: char) -> bool {
        if self.peek_is(expected) {
            self.read();
            true
        } else {
            false
        }
    }

    /// Returns true if end-of-input was reached while skipping.
    fn skip_whitespace(&mut self) -> bool {
        while !self.eof() {
            if self.peek_read('#') {
                while !self.eof() {
                    if self.peek_read('\n') || self.peek_read('\r') {
                        break;
                    }
                    self.read();
                }
            } else if !self.peek().is_some_and(|c| c.is_whitespace()) {
                return false;
            } else {
                self.read();
            }
        }
        true
    }

    fn err(&self, message: impl Into<String>) -> Error {
        Error::new(ErrorKind::Syntax, message, Some(self.position.clone()))
    }

    fn parse_value(&mut self) -> Result<Value, Error> {
        if self.skip_whitespace() {
            return Err(self.err("Unexpected end of input; Missing value."));
        }
        match self.peek() {
            Some('"') | Some('\'') => self.parse_string().map(Value::String),
            Some('(') => self.parse_quote(),
            Some('[') => self.parse_array(),
            Some('{') => self.parse_object(),
            Some(':') => self.parse_word(),
            _ => self.parse_symbol().map(Value::Symbol),
        }
    }

    fn parse_array(&mut self) -> Result<Value, Error> {
        if self.skip_whitespace() {
            return Err(self.err("Unexpected end of input; Missing array."));
        }
        if !self.peek_read('[') {
            return Err(self.err("Unexpected input; Missing array."));
        }
        let mut elements = Vec::new();
        loop {
            if self.skip_whitespace() {
                return Err(self.err("Unterminated array; Missing `]'."));
            }
            if self.peek_read(']') {
                break;
            }
            elements.push(self.parse_value()?);
            if self.skip_whitespace() || (!self.peek_is(',') && !self.peek_is(']')) {
                return Err(self.err("Unterminated array; Missing `]'."));
            }
            self.peek_read(',');
        }
        Ok(Value::Array(PlorthArray::from_values(elements)))
    }

    fn parse_object(&mut self) -> Result<Value, Error> {
        if self.skip_whitespace() {
            return Err(self.err("Unexpected end of input; Missing object."));
        }
        if !self.peek_read('{') {
            return Err(self.err("Unexpected input; Missing object."));
        }
        let mut properties = IndexMap::new();
        loop {
            if self.skip_whitespace() {
                return Err(self.err("Unterminated object; Missing `}'."));
            }
            if self.peek_read('}') {
                break;
            }
            if !matches!(self.peek(), Some('"') | Some('\'')) {
                return Err(self.err("Unterminated object; Missing `}'."));
            }
            let key = self.parse_string()?;
            if self.skip_whitespace() {
                return Err(self.err("Unterminated object; Missing `}'."));
            }
            if !self.peek_read(':') {
                return Err(self.err("Missing `:' after property key."));
            }
            let value = self.parse_value()?;
            properties.insert(key.to_string(), value);
            if self.skip_whitespace() || (!self.peek_is(',') && !self.peek_is('}')) {
                return Err(self.err("Unterminated object; Missing `}'."));
            }
            self.peek_read(',');
        }
        Ok(Value::Object(PlorthObject::from_values(properties)))
    }

    fn parse_quote(&mut self) -> Result<Value, Error> {
        if self.skip_whitespace() {
            return Err(self.err("Unexpected end of input; Missing quote."));
        }
        if !self.peek_read('(') {
            return Err(self.err("Unexpected input; Missing quote."));
        }
        let mut children = Vec::new();
        loop {
            if self.skip_whitespace() {
                return Err(self.err("Unterminated quote; Missing `)'."));
            }
            if self.peek_read(')') {
                break;
            }
            children.push(self.parse_value()?);
        }
        Ok(Value::Quote(Quote::compiled(children, None)))
    }

    fn parse_string(&mut self) -> Result<PlorthString, Error> {
        if self.skip_whitespace() {
            return Err(self.err("Unexpected end of input; Missing string."));
        }
        let separator = if self.peek_read('"') {
            '"'
        } else if self.peek_read('\'') {
            '\''
        } else {
            return Err(self.err("Unexpected input; Missing string."));
        };
        let mut buffer = String::new();
        loop {
            if self.eof() {
                return Err(self.err(format!("Unterminated string; Missing `{separator}'.")));
            }
            if self.peek_read(separator) {
                break;
            }
            if self.peek_read('\\') {
                self.parse_escape_sequence(&mut buffer)?;
            } else {
                buffer.push(self.read());
            }
        }
        Ok(PlorthString::new(&buffer))
    }

    fn parse_escape_sequence(&mut self, buffer: &mut String) -> Result<(), Error> {
        if self.eof() {
            return Err(self.err("Unexpected end of input; Missing escape sequence."));
        }
        match self.read() {
            'b' => buffer.push('\u{8}'),
            't' => buffer.push('\t'),
            'n' => buffer.push('\n'),
            'f' => buffer.push('\u{c}'),
            'r' => buffer.push('\r'),
            c @ ('"' | '\'' | '\\' | '/') => buffer.push(c),
            'u' => {
                let mut code: u32 = 0;
                for _ in 0..4 {
                    if self.eof() {
                        return Err(self.err("Unterminated escape sequence."));
                    }
                    let digit = self
                        .peek()
                        .and_then(|c| c.to_digit(16))
                        .ok_or_else(|| self.err("Illegal Unicode hex escape sequence."))?;
                    self.read();
                    code = code * 16 + digit;
                }
                let ch = char::from_u32(code)
                    .ok_or_else(|| self.err("Illegal Unicode hex escape sequence."))?;
                buffer.push(ch);
            }
            _ => return Err(self.err("Illegal escape sequence in string literal.")),
        }
        Ok(())
    }

    fn parse_symbol(&mut self) -> Result<Symbol, Error> {
        if self.skip_whitespace() {
            return Err(self.err("Unexpected end of input; Missing symbol."));
        }
        let position = self.position.clone();
        if !self.peek().is_some_and(is_word_char) {
            return Err(self.err("Unexpected input; Missing symbol."));
        }
        let mut buffer = String::new();
        loop {
            buffer.push(self.read());
            if self.eof() || !self.peek().is_some_and(is_word_char) {
                break;
            }
        }
        Ok(Symbol::new(buffer, Some(position)))
    }

    fn parse_word(&mut self) -> Result<Value, Error> {
        if self.skip_whitespace() {
            return Err(self.err("Unexpected end of input; Missing word."));
        }
        let position = self.position.clone();
        if !self.peek_read(':') {
            return Err(self.err("Unexpected input; Missing word."));
        }
        let symbol = self.parse_symbol()?;
        let mut children = Vec::new();
        loop {
            if self.skip_whitespace() {
                return Err(self.err("Unterminated word; Missing `;'."));
            }
            if self.peek_read(';') {
                break;
            }
            children.push(self.parse_value()?);
        }
        let _ = position;
        Ok(Value::Word(Word::new(symbol, Quote::compiled(children, None))))
    }
}
