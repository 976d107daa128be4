//! Binding expression parser.

use crate::types::*;
use thiserror::Error;
use tight_filter::FilterCall;
use tight_path::Path;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error: '{expression}'")]
    InvalidProperty { expression: String },
    #[error("syntax error in '{expression}': unexpected character '{found}' at {offset}")]
    UnexpectedChar {
        expression: String,
        found: char,
        offset: usize,
    },
    #[error("syntax error in '{expression}': expected filter name at {offset}")]
    ExpectedFilterName { expression: String, offset: usize },
    #[error("syntax error in '{expression}': unclosed string")]
    UnclosedString { expression: String },
}

impl ParseError {
    /// The raw expression that failed to parse.
    pub fn expression(&self) -> &str {
        match self {
            ParseError::InvalidProperty { expression }
            | ParseError::UnexpectedChar { expression, .. }
            | ParseError::ExpectedFilterName { expression, .. }
            | ParseError::UnclosedString { expression } => expression,
        }
    }
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Binding expression parser.
pub struct BindingParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> BindingParser<'a> {
    /// Parse a binding expression with the given grammar.
    pub fn parse(input: &'a str, syntax: BindingSyntax) -> Result<Binding, ParseError> {
        let syntax = match syntax {
            BindingSyntax::Auto => detect_syntax(input),
            explicit => explicit,
        };
        let mut parser = Self { input, pos: 0 };
        match syntax {
            BindingSyntax::Attribute => parser.parse_attribute().map(Binding::Attribute),
            _ => parser.parse_filter_chain().map(Binding::Filters),
        }
    }

    // -- filter chain grammar ------------------------------------------------

    fn parse_filter_chain(&mut self) -> Result<FilterBinding, ParseError> {
        self.skip_whitespace();
        let property = self.parse_property()?;
        match self.peek() {
            None | Some('|') => {}
            Some(c) if c.is_whitespace() => {}
            Some(_) => return Err(self.invalid_property()),
        }

        let mut filters = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('|') => {
                    self.advance();
                    filters.push(self.parse_filter()?);
                }
                Some(c) => return Err(self.unexpected(c)),
            }
        }

        Ok(FilterBinding { property, filters })
    }

    fn parse_property(&mut self) -> Result<Path, ParseError> {
        let raw = self.take_while(|c| is_word(c) || c == '.');
        if raw.is_empty() {
            return Err(self.invalid_property());
        }
        Path::parse(raw).map_err(|_| self.invalid_property())
    }

    fn parse_filter(&mut self) -> Result<FilterCall, ParseError> {
        self.skip_whitespace();
        let offset = self.pos;
        let name = self.take_while(is_word);
        if name.is_empty() {
            return Err(ParseError::ExpectedFilterName {
                expression: self.input.to_string(),
                offset,
            });
        }
        let mut call = FilterCall::new(name);

        self.skip_whitespace();
        if self.peek() == Some(':') {
            self.advance();
            call.args = self.parse_arguments()?;
        }
        Ok(call)
    }

    /// Quoted arguments separated by optional commas.
    fn parse_arguments(&mut self) -> Result<Vec<String>, ParseError> {
        let mut args = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('"') | Some('\'') => {
                    args.push(self.parse_string()?);
                    self.skip_whitespace();
                    if self.peek() == Some(',') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
        Ok(args)
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let quote = self.advance().ok_or_else(|| self.unclosed())?;
        let mut out = String::new();
        loop {
            match self.advance() {
                None => return Err(self.unclosed()),
                Some('\\') => match self.advance() {
                    Some(escaped) => out.push(escaped),
                    None => return Err(self.unclosed()),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    // -- attribute grammar ---------------------------------------------------

    fn parse_attribute(&mut self) -> Result<AttributeBinding, ParseError> {
        let mut parts = self.input.splitn(4, ':');
        let raw_property = parts.next().unwrap_or_default().trim();
        if raw_property.is_empty() || !raw_property.chars().all(|c| is_word(c) || c == '.') {
            return Err(self.invalid_property());
        }
        let property = Path::parse(raw_property).map_err(|_| self.invalid_property())?;

        let target = parts
            .next()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let truthy = parts.next().unwrap_or_default().to_string();
        let falsy = parts.next().unwrap_or_default().to_string();
        self.pos = self.input.len();

        // Literals only mean something when there is an attribute to set.
        if target.is_none() {
            return Ok(AttributeBinding {
                property,
                target,
                truthy: String::new(),
                falsy: String::new(),
            });
        }
        Ok(AttributeBinding {
            property,
            target,
            truthy,
            falsy,
        })
    }

    // -- cursor --------------------------------------------------------------

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while matches!(self.peek(), Some(c) if pred(c)) {
            self.advance();
        }
        &input[start..self.pos]
    }

    fn invalid_property(&self) -> ParseError {
        ParseError::InvalidProperty {
            expression: self.input.to_string(),
        }
    }

    fn unexpected(&self, found: char) -> ParseError {
        ParseError::UnexpectedChar {
            expression: self.input.to_string(),
            found,
            offset: self.pos,
        }
    }

    fn unclosed(&self) -> ParseError {
        ParseError::UnclosedString {
            expression: self.input.to_string(),
        }
    }
}

/// Pick a grammar for `input` by its delimiters.
pub fn detect_syntax(input: &str) -> BindingSyntax {
    if input.contains('|') {
        BindingSyntax::FilterChain
    } else if input.contains(':') {
        BindingSyntax::Attribute
    } else {
        BindingSyntax::FilterChain
    }
}
