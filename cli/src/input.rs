// Copyright (C) 2025 the mapfn authors. All rights reserved.

//! Line-oriented acquisition of machine-code bytes: a decimal byte count
//! followed by that many two-character hexadecimal tokens, whitespace
//! separated, possibly spread over several lines.

use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    /// The byte count token was not a positive decimal integer.
    #[error("invalid byte count {0:?}: expected a positive decimal integer")]
    BadCount(String),

    /// A byte token was not exactly two hexadecimal digits.
    #[error("invalid byte token {0:?}: expected two hexadecimal digits")]
    BadByte(String),

    /// Input ended before a byte count was given for the named function.
    #[error("input ended before a byte count for {0:?}")]
    MissingCount(String),

    /// Input ended before the promised number of bytes was read.
    #[error("input ended after {got} of {wanted} bytes")]
    MissingBytes { wanted: usize, got: usize },

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Splits a [`BufRead`] into whitespace-separated tokens, reading lines
/// lazily.
pub struct TokenReader<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// The next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }
}

/// Prompts for and reads the code of one named function: its byte count,
/// then exactly that many bytes.
///
/// Never reads past what the count promised, and never hands back fewer
/// bytes than it: short input fails with [`InputError::MissingBytes`]
/// instead of returning a partial buffer.
pub fn read_function<R: BufRead, W: Write>(
    name: &str,
    tokens: &mut TokenReader<R>,
    output: &mut W,
) -> Result<Vec<u8>, InputError> {
    write!(output, "size {name} = ")?;
    output.flush()?;

    let count_token = tokens
        .next_token()?
        .ok_or_else(|| InputError::MissingCount(name.to_owned()))?;
    let count = match count_token.parse::<usize>() {
        Ok(count) if count > 0 => count,
        _ => return Err(InputError::BadCount(count_token)),
    };

    let mut code = Vec::with_capacity(count);
    for got in 0..count {
        let token = tokens.next_token()?.ok_or(InputError::MissingBytes {
            wanted: count,
            got,
        })?;
        code.push(parse_byte(&token)?);
    }
    Ok(code)
}

fn parse_byte(token: &str) -> Result<u8, InputError> {
    if token.len() != 2 {
        return Err(InputError::BadByte(token.to_owned()));
    }
    u8::from_str_radix(token, 16)
        .map_err(|_| InputError::BadByte(token.to_owned()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn read_from(text: &str) -> Result<Vec<u8>, InputError> {
        let mut tokens = TokenReader::new(Cursor::new(text));
        read_function("a", &mut tokens, &mut Vec::new())
    }

    #[test]
    fn reads_count_then_bytes() {
        let code = read_from("6\nb8 2a 00 00 00 c3\n")
            .expect("well-formed input should parse");
        assert_eq!(vec![0xB8, 0x2A, 0x00, 0x00, 0x00, 0xC3], code);
    }

    #[test]
    fn tokens_may_span_lines() {
        let code = read_from("3\nb8\n2a 00")
            .expect("well-formed input should parse");
        assert_eq!(vec![0xB8, 0x2A, 0x00], code);
    }

    #[test]
    fn writes_the_size_prompt() {
        let mut tokens = TokenReader::new(Cursor::new("1\nc3\n"));
        let mut prompt = Vec::new();
        read_function("mul_a_b", &mut tokens, &mut prompt)
            .expect("well-formed input should parse");
        assert_eq!(b"size mul_a_b = ", prompt.as_slice());
    }

    #[test]
    fn non_numeric_count_is_rejected() {
        assert!(matches!(
            read_from("six\nb8 2a\n"),
            Err(InputError::BadCount(token)) if token == "six"
        ));
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(matches!(
            read_from("0\n"),
            Err(InputError::BadCount(token)) if token == "0"
        ));
    }

    #[test]
    fn malformed_byte_token_is_rejected() {
        assert!(matches!(
            read_from("2\nb8 zz\n"),
            Err(InputError::BadByte(token)) if token == "zz"
        ));
        assert!(matches!(
            read_from("1\nabc\n"),
            Err(InputError::BadByte(token)) if token == "abc"
        ));
    }

    #[test]
    fn count_beyond_available_bytes_is_rejected() {
        assert!(matches!(
            read_from("4\nb8 2a\n"),
            Err(InputError::MissingBytes { wanted: 4, got: 2 })
        ));
    }

    #[test]
    fn missing_count_names_the_function() {
        assert!(matches!(
            read_from(""),
            Err(InputError::MissingCount(name)) if name == "a"
        ));
    }

    #[test]
    fn consecutive_functions_share_the_token_stream() {
        let mut tokens = TokenReader::new(Cursor::new("1\nc3\n2\nb8 2a\n"));
        let mut sink = Vec::new();
        let first = read_function("a", &mut tokens, &mut sink)
            .expect("first function should parse");
        let second = read_function("b", &mut tokens, &mut sink)
            .expect("second function should parse");
        assert_eq!(vec![0xC3], first);
        assert_eq!(vec![0xB8, 0x2A], second);
    }
}
