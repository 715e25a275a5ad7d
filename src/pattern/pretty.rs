use core::fmt;

use super::error::ParseError;
use super::types::{IOPattern, Op};

const HEADER: &str = "IOPattern(";

impl IOPattern {
    /// Deterministic, line-based rendering for diagnostics.
    ///
    /// ```text
    /// IOPattern("bad-protocol")
    ///   0: squeeze 8 "first challenge"
    ///   1: absorb 8 "first reply"
    /// ```
    pub fn pretty(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for IOPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{HEADER}{:?})", self.domain_separator)?;
        for (index, interaction) in self.interactions.iter().enumerate() {
            write!(f, "\n  {index}: {interaction}")?;
        }
        Ok(())
    }
}

/// Reads back the rendering produced by [`IOPattern::pretty`].
pub fn parse_pretty(text: &str) -> Result<IOPattern, ParseError> {
    let mut lines = text.lines();
    let header = lines.next().unwrap_or_default();
    let domain = header
        .strip_prefix(HEADER)
        .and_then(read_quoted)
        .and_then(|(domain, rest)| (rest == ")").then_some(domain))
        .ok_or(ParseError::MalformedLine { field: 0 })?;

    let mut builder = IOPattern::new(&domain);
    for (index, line) in lines.enumerate() {
        let field = index + 1;
        let (op, length, label) =
            parse_line(index, line.trim_start()).ok_or(ParseError::MalformedLine { field })?;
        builder = match op {
            Op::Squeeze => builder.squeeze(length, &label),
            Op::Absorb => builder.absorb(length, &label),
        };
    }
    builder.build()
}

fn parse_line(index: usize, line: &str) -> Option<(Op, usize, String)> {
    let (position, rest) = line.split_once(": ")?;
    if position.parse::<usize>().ok()? != index {
        return None;
    }
    let (op, rest) = rest.split_once(' ')?;
    let op = match op {
        "squeeze" => Op::Squeeze,
        "absorb" => Op::Absorb,
        _ => return None,
    };
    let (length, rest) = rest.split_once(' ')?;
    let length = length.parse::<usize>().ok()?;
    let (label, tail) = read_quoted(rest)?;
    tail.is_empty().then_some((op, length, label))
}

/// Reads a string literal in `Debug` form, returning it and the remaining input.
fn read_quoted(input: &str) -> Option<(String, &str)> {
    let mut chars = input.strip_prefix('"')?.char_indices();
    let mut out = String::new();
    let body = &input[1..];
    while let Some((at, c)) = chars.next() {
        match c {
            '"' => return Some((out, &body[at + 1..])),
            '\\' => {
                let (_, escaped) = chars.next()?;
                match escaped {
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    '0' => out.push('\0'),
                    '\\' | '"' | '\'' => out.push(escaped),
                    'u' => {
                        if chars.next()?.1 != '{' {
                            return None;
                        }
                        let mut code = String::new();
                        loop {
                            match chars.next()?.1 {
                                '}' => break,
                                digit => code.push(digit),
                            }
                        }
                        let code = u32::from_str_radix(&code, 16).ok()?;
                        out.push(char::from_u32(code)?);
                    }
                    _ => return None,
                }
            }
            other => out.push(other),
        }
    }
    None
}
