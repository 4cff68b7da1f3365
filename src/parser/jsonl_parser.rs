// Line-delimited JSON decoding for product and listing files
use crate::model::{Listing, ParserError, Product, Record};
use serde_json::Value;
use std::io::BufRead;
use std::marker::PhantomData;

/// Decodes a single line. `line` is 1-based and only used for error reporting.
pub fn parse_line<T: Record>(text: &str, line: usize) -> Result<T, ParserError> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| ParserError::Json { line, source })?;
    let Value::Object(fields) = value else {
        return Err(ParserError::NotAnObject { line });
    };
    T::from_object(fields).map_err(|field| ParserError::MissingField { line, field })
}

/// Lazily yields one record per non-blank line of the reader.
pub struct JsonLines<R, T> {
    reader: R,
    line: usize,
    buffer: String,
    _record: PhantomData<T>,
}

impl<R: BufRead, T: Record> JsonLines<R, T> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buffer: String::new(),
            _record: PhantomData,
        }
    }
}

impl<R: BufRead, T: Record> Iterator for JsonLines<R, T> {
    type Item = Result<T, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(ParserError::Io(e))),
            }
            self.line += 1;

            let text = self.buffer.trim();
            // Blank lines are tolerated instead of failing as invalid JSON.
            if text.is_empty() {
                continue;
            }
            return Some(parse_line(text, self.line));
        }
    }
}

pub fn products<R: BufRead>(reader: R) -> JsonLines<R, Product> {
    JsonLines::new(reader)
}

pub fn listings<R: BufRead>(reader: R) -> JsonLines<R, Listing> {
    JsonLines::new(reader)
}
