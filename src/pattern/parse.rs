use core::str::{self, FromStr};

use super::error::ParseError;
use super::types::{IOPattern, Interaction, Op};

/// Parses the NUL-separated wire form `<domain>\0<op><len><label>\0...`.
pub fn parse(wire: &[u8]) -> Result<IOPattern, ParseError> {
    let mut fields = wire.split(|byte| *byte == 0);
    let domain = fields.next().unwrap_or_default();
    let domain = str::from_utf8(domain).map_err(|_| ParseError::InvalidUtf8 { field: 0 })?;

    let mut interactions = Vec::new();
    for (offset, bytes) in fields.enumerate() {
        let field = offset + 1;
        let interaction = parse_interaction(field, bytes)?;
        tracing::trace!(field, op = %interaction.op, length = interaction.length, "parsed interaction");
        interactions.push(interaction);
    }
    if interactions.is_empty() {
        return Err(ParseError::EmptySchedule { field: 1 });
    }

    tracing::debug!(
        domain,
        interactions = interactions.len(),
        "parsed io pattern"
    );
    Ok(IOPattern {
        domain_separator: domain.to_owned(),
        interactions,
        wire: wire.to_vec(),
    })
}

fn parse_interaction(field: usize, bytes: &[u8]) -> Result<Interaction, ParseError> {
    let (&op_byte, rest) = bytes
        .split_first()
        .ok_or(ParseError::InvalidOp { field, found: None })?;
    let op = Op::from_wire(op_byte).ok_or(ParseError::InvalidOp {
        field,
        found: Some(op_byte),
    })?;

    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return Err(ParseError::MissingLength { field });
    }
    let (length, label) = rest.split_at(digits);
    if length == b"0" {
        return Err(ParseError::ZeroLength { field });
    }
    if length[0] == b'0' {
        return Err(ParseError::InvalidLength { field });
    }
    let length = str::from_utf8(length)
        .ok()
        .and_then(|digits| digits.parse::<usize>().ok())
        .ok_or(ParseError::InvalidLength { field })?;
    let label = str::from_utf8(label).map_err(|_| ParseError::InvalidUtf8 { field })?;

    Ok(Interaction::new(op, length, label))
}

impl FromStr for IOPattern {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s.as_bytes())
    }
}
