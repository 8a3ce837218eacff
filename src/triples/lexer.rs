//! Statement splitting and tokenization for the flat triple serialization.

use smallvec::SmallVec;

use crate::{Error, Result};

/// Statement terminator. Records end in ` .` followed by a newline.
pub const TERMINATOR: &str = ".\n";

/// Split `text` into statement records, dropping the leading and trailing
/// segments (header and footer framing of the response).
pub fn statements(text: &str) -> impl Iterator<Item = &str> {
    let segments: Vec<&str> = text.split(TERMINATOR).collect();
    let keep = segments.len().saturating_sub(2);
    segments.into_iter().skip(1).take(keep)
}

/// Split one record into exactly `[subject, predicate, object]`.
///
/// The object may be a quoted literal containing spaces; any other extra
/// token makes the record malformed.
pub fn tokenize(record: &str) -> Result<SmallVec<[&str; 3]>> {
    let malformed = |reason: &'static str| Error::MalformedTriple {
        record: record.trim().to_owned(),
        reason,
    };

    let body = record.trim();
    let body = body.strip_suffix('.').unwrap_or(body).trim_end();

    let mut tokens: SmallVec<[&str; 3]> = SmallVec::new();
    let mut rest = body;
    for _ in 0..2 {
        let token_end = rest.find(char::is_whitespace).ok_or_else(|| malformed("fewer than three tokens"))?;
        tokens.push(&rest[..token_end]);
        rest = rest[token_end..].trim_start();
    }
    if rest.is_empty() {
        return Err(malformed("fewer than three tokens"));
    }

    let trailer = match rest.strip_prefix('"') {
        Some(literal) => match literal.rfind('"') {
            Some(close) => &literal[close + 1..],
            None => return Err(malformed("unterminated literal")),
        },
        None => rest,
    };
    if trailer.contains(char::is_whitespace) {
        return Err(malformed("more than three tokens"));
    }
    tokens.push(rest);
    Ok(tokens)
}
