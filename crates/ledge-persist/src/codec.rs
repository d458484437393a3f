//! Text encode/decode for level files.
//!
//! The encoder writes through `fmt::Write`, so callers can target a
//! `String` or a fixed byte arena without an intermediate buffer.

use std::fmt;
use std::str::{FromStr, SplitWhitespace};

use ledge_core::{EntityKind, Facing, Rect};

use crate::error::PersistError;
use crate::types::EntityRecord;
use crate::{FIELD_LABELS, TAG};

// ── Encoding ────────────────────────────────────────────────────

/// Write one entity line, newline included.
pub fn encode_record<W: fmt::Write + ?Sized>(w: &mut W, record: &EntityRecord) -> fmt::Result {
    writeln!(
        w,
        "{TAG} type={} posx={} posy={} radiusx={} radiusy={} move_speed={} facing={}",
        record.kind.as_raw(),
        record.rect.pos.x,
        record.rect.pos.y,
        record.rect.radius.x,
        record.rect.radius.y,
        record.move_speed,
        record.facing.as_raw(),
    )
}

/// Write every living record, in order. Records of kind `None` are
/// skipped. Returns the number of lines written.
pub fn encode_entities<'a, W, I>(w: &mut W, records: I) -> Result<usize, fmt::Error>
where
    W: fmt::Write + ?Sized,
    I: IntoIterator<Item = &'a EntityRecord>,
{
    let mut written = 0;
    for record in records {
        if record.kind.is_alive() {
            encode_record(w, record)?;
            written += 1;
        }
    }
    Ok(written)
}

// ── Decoding ────────────────────────────────────────────────────

/// Decode raw file bytes.
pub fn decode_bytes(bytes: &[u8]) -> Result<Vec<EntityRecord>, PersistError> {
    let text = std::str::from_utf8(bytes).map_err(|e| PersistError::NotUtf8 {
        offset: e.valid_up_to(),
    })?;
    decode_entities(text)
}

/// Decode every tagged line of `text`.
///
/// Untagged lines are skipped. The first malformed tagged line aborts the
/// whole decode.
pub fn decode_entities(text: &str) -> Result<Vec<EntityRecord>, PersistError> {
    let mut records = Vec::new();
    for (i, raw) in text.split_inclusive('\n').enumerate() {
        let line = i + 1;
        let Some(body) = raw.strip_prefix(TAG) else {
            continue;
        };
        let Some(body) = body.strip_suffix('\n') else {
            return Err(PersistError::Truncated { line });
        };
        records.push(decode_line(body.trim_end_matches('\r'), line)?);
    }
    Ok(records)
}

/// Positional field reader over one line's tokens.
struct Fields<'a> {
    tokens: SplitWhitespace<'a>,
    next_label: usize,
    line: usize,
}

impl<'a> Fields<'a> {
    /// The raw text of the next field, checking its label.
    fn next_raw(&mut self) -> Result<(&'static str, &'a str), PersistError> {
        let field = FIELD_LABELS[self.next_label];
        self.next_label += 1;
        let value = self
            .tokens
            .next()
            .and_then(|token| token.strip_prefix(field))
            .and_then(|rest| rest.strip_prefix('='))
            .ok_or(PersistError::MissingField {
                line: self.line,
                field,
            })?;
        Ok((field, value))
    }

    /// The next field parsed as `T`.
    fn next<T: FromStr>(&mut self) -> Result<T, PersistError> {
        let (field, value) = self.next_raw()?;
        value.parse().map_err(|_| PersistError::InvalidNumber {
            line: self.line,
            field,
            value: value.to_string(),
        })
    }

    /// The next field as a finite `f32`.
    fn next_f32(&mut self) -> Result<f32, PersistError> {
        let (field, value) = self.next_raw()?;
        value
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| PersistError::InvalidNumber {
                line: self.line,
                field,
                value: value.to_string(),
            })
    }
}

fn decode_line(body: &str, line: usize) -> Result<EntityRecord, PersistError> {
    let mut fields = Fields {
        tokens: body.split_whitespace(),
        next_label: 0,
        line,
    };

    let raw_kind: u16 = fields.next()?;
    let kind = EntityKind::from_raw(raw_kind)
        .filter(|k| k.is_alive())
        .ok_or(PersistError::UnknownKind { line, raw: raw_kind })?;
    let x = fields.next_f32()?;
    let y = fields.next_f32()?;
    let rx = fields.next_f32()?;
    let ry = fields.next_f32()?;
    let move_speed = fields.next_f32()?;
    let raw_facing: i32 = fields.next()?;
    let facing = Facing::from_raw(raw_facing).ok_or(PersistError::UnknownFacing {
        line,
        raw: raw_facing,
    })?;

    if let Some(token) = fields.tokens.next() {
        return Err(PersistError::TrailingTokens {
            line,
            token: token.to_string(),
        });
    }

    Ok(EntityRecord {
        kind,
        rect: Rect::new(x, y, rx, ry),
        move_speed,
        facing,
    })
}
