use std::str::{FromStr, SplitWhitespace};

use ampt_core::errors::{AmptError, ErrorInfo};
use ampt_core::{EventHeader, ParticleRecord};

/// Decodes an eleven-field header line.
pub fn decode_header(line: &str) -> Result<EventHeader, AmptError> {
    let mut fields = Fields::new(line, "header", EventHeader::FIELD_COUNT)?;
    let event_number = fields.next("event_number")?;
    let test_number = fields.next("test_number")?;
    let particle_count = fields.next("particle_count")?;
    let impact_parameter = fields.next("impact_parameter")?;
    let projectile_participants = fields.next("projectile_participants")?;
    let target_participants = fields.next("target_participants")?;
    let projectile_elastic = fields.next("projectile_elastic")?;
    let projectile_inelastic = fields.next("projectile_inelastic")?;
    let target_elastic = fields.next("target_elastic")?;
    let target_inelastic = fields.next("target_inelastic")?;
    let trailing_token = fields.raw("trailing")?;
    let trailing_value = parse_token(trailing_token, "header", "trailing")?;
    Ok(EventHeader {
        event_number,
        test_number,
        particle_count,
        impact_parameter,
        projectile_participants,
        target_participants,
        projectile_elastic,
        projectile_inelastic,
        target_elastic,
        target_inelastic,
        trailing_value,
        trailing_token: trailing_token.to_string(),
    })
}

/// Decodes a nine-field particle line.
pub fn decode_particle(line: &str) -> Result<ParticleRecord, AmptError> {
    let mut fields = Fields::new(line, "particle", ParticleRecord::FIELD_COUNT)?;
    Ok(ParticleRecord {
        pid: fields.next("pid")?,
        px: fields.next("px")?,
        py: fields.next("py")?,
        pz: fields.next("pz")?,
        mass: fields.next("mass")?,
        x: fields.next("x")?,
        y: fields.next("y")?,
        z: fields.next("z")?,
        t: fields.next("t")?,
    })
}

/// Attaches the line number to a decode failure.
pub(crate) fn at_line(err: AmptError, number: usize) -> AmptError {
    match err {
        AmptError::Decode(info) => AmptError::Decode(info.with_context("line", number.to_string())),
        other => other,
    }
}

struct Fields<'a> {
    tokens: SplitWhitespace<'a>,
    record: &'static str,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str, record: &'static str, expected: usize) -> Result<Self, AmptError> {
        let found = line.split_whitespace().count();
        if found != expected {
            return Err(AmptError::Decode(
                ErrorInfo::new(
                    format!("{record}-field-count"),
                    format!("expected {expected} fields, found {found}"),
                )
                .with_context("record", record),
            ));
        }
        Ok(Self {
            tokens: line.split_whitespace(),
            record,
        })
    }

    fn raw(&mut self, name: &'static str) -> Result<&'a str, AmptError> {
        self.tokens.next().ok_or_else(|| {
            AmptError::Decode(
                ErrorInfo::new(format!("{}-field", self.record), "missing field")
                    .with_context("field", name),
            )
        })
    }

    fn next<T: FromStr>(&mut self, name: &'static str) -> Result<T, AmptError> {
        let token = self.raw(name)?;
        parse_token(token, self.record, name)
    }
}

fn parse_token<T: FromStr>(token: &str, record: &str, name: &str) -> Result<T, AmptError> {
    token.parse().map_err(|_| {
        AmptError::Decode(
            ErrorInfo::new(
                format!("{record}-field"),
                format!("malformed numeric token `{token}`"),
            )
            .with_context("field", name)
            .with_context("record", record),
        )
    })
}
