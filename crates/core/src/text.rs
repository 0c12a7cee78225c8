//! Text helpers shared by validation and matching
//!
//! Keywords and alternatives are authored in a rich text field, so they may
//! carry markup and entities that a learner never types.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});")
        .expect("entity pattern is valid")
});

/// Decode HTML entities and drop tags.
///
/// Unknown entities are kept as written.
pub fn decode_html(text: &str) -> Cow<'_, str> {
    if !text.contains('&') && !text.contains('<') {
        return Cow::Borrowed(text);
    }

    let stripped = TAG_RE.replace_all(text, "");
    let decoded = ENTITY_RE.replace_all(&stripped, |caps: &regex::Captures<'_>| {
        decode_entity(&caps[1]).map_or_else(|| caps[0].to_string(), String::from)
    });
    Cow::Owned(decoded.into_owned())
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = entity.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32);
    }
    let c = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "shy" => '\u{00AD}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "hellip" => '\u{2026}',
        "euro" => '\u{20AC}',
        _ => return None,
    };
    Some(c)
}

/// Body of a `/regex/` literal, or `None` for any other phrase
pub fn regex_literal_body(phrase: &str) -> Option<&str> {
    if phrase.len() > 2 && phrase.starts_with('/') && phrase.ends_with('/') {
        Some(&phrase[1..phrase.len() - 1])
    } else {
        None
    }
}
