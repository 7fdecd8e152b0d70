//! Part Text Parser
//!
//! Turns the raw text extracted from one catalog page into an ordered list
//! of structured part records. Catalog sheets list positions as
//! `<scheme number> <part number> <russian description> <ukrainian
//! description> <quantity>`, repeated; the extractor upstream flattens the
//! sheet into a single run of space-separated tokens, which is what this
//! parser consumes.
//!
//! The scan is strict about scheme numbering: a record only starts at a
//! 1-2 digit token exactly equal to the running counter (1, 2, 3, ...).
//! Sheets with renumbered or missing positions therefore parse partially -
//! everything after the first gap is skipped, never guessed at. Malformed
//! text degrades to fewer (possibly zero) records; the parser never fails.
//!
//! # Examples
//!
//! ```rust
//! use partdesk_core::parser::parse_parts;
//!
//! let parts = parse_parts("1 240-1307216-А Шестерня 1 Gear 1 2 240-1307217 Вал 1 Shaft 1");
//! assert_eq!(parts.len(), 2);
//! assert_eq!(parts[0].part_number, "240-1307216-А");
//! assert_eq!(parts[1].scheme_number, 2);
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// Part numbers longer than this are extraction noise; stop appending.
const PART_NUMBER_MAX_CHARS: usize = 30;

/// Whitespace runs, including the NBSP that PDF extraction loves to emit.
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\u{00A0}\s]+").unwrap());

/// A scheme position marker: the whole token is 1-2 digits.
static SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{1,2}$").unwrap());

/// Token starts with a Cyrillic letter (russian description begins).
static CYRILLIC_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[А-Яа-яЁё]").unwrap());

/// Token starts with a Latin letter or digit (russian description ends).
static LATIN_OR_DIGIT_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]").unwrap());

/// Token contains a Cyrillic letter anywhere.
static CYRILLIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[А-Яа-яЁё]").unwrap());

/// A space and the single non-space character following it.
static SPACE_BEFORE_CHAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" (\S)").unwrap());

/// One parsed catalog line item, not yet an entity (no id, no page
/// attachment - the catalog layer adds both).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPart {
    /// Position on the diagram sheet, ascending from 1
    pub scheme_number: u32,
    /// Part number, concatenated from its extraction fragments
    pub part_number: String,
    /// Russian description
    pub description_ru: String,
    /// Ukrainian description
    pub description_uk: String,
    /// Quantity per assembly, 1 when the sheet does not state one
    pub quantity: u32,
}

/// Parse the leading decimal digits of a token, `parseInt`-style:
/// `"2x"` parses as 2, `"x2"` does not parse.
fn leading_int(token: &str) -> Option<u64> {
    let digits: &str = &token[..token
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(token.len())];
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// Keep a space only in front of an uppercase Latin letter.
///
/// Extraction splits many words into stray fragments; on the Ukrainian side
/// of a record the only spaces worth keeping are the ones that start a new
/// capitalized word.
fn fix_uk_spacing(joined: &str) -> String {
    SPACE_BEFORE_CHAR_RE
        .replace_all(joined, |caps: &regex::Captures| {
            let following = &caps[1];
            if following.starts_with(|c: char| c.is_ascii_uppercase()) {
                format!(" {following}")
            } else {
                following.to_string()
            }
        })
        .into_owned()
}

/// Parse a page's raw text into ordered part records.
///
/// Pure and deterministic: the scheme counter lives on the stack of this
/// one call. See the module docs for the token grammar and the strict
/// numbering policy.
pub fn parse_parts(text: &str) -> Vec<ParsedPart> {
    let normalized = WHITESPACE_RE.replace_all(text, " ");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return Vec::new();
    }
    let tokens: Vec<&str> = normalized.split(' ').collect();

    let mut parsed = Vec::new();
    let mut scheme_counter: u64 = 1;
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];

        // Seek the next scheme marker; everything else is discarded.
        if !(SCHEME_RE.is_match(token) && token.parse::<u64>() == Ok(scheme_counter)) {
            i += 1;
            continue;
        }
        i += 1;

        // Part number: the first token unconditionally, then fragments
        // until a Cyrillic token or the next scheme marker.
        let mut part_number = tokens.get(i).copied().unwrap_or("").to_string();
        i += 1;
        while i < tokens.len()
            && !CYRILLIC_START_RE.is_match(tokens[i])
            && leading_int(tokens[i]) != Some(scheme_counter + 1)
        {
            part_number.push_str(tokens[i]);
            i += 1;
            if part_number.chars().count() >= PART_NUMBER_MAX_CHARS {
                break;
            }
        }
        if part_number.is_empty() {
            // Input exhausted mid-record; the counter stays put so a later
            // marker with the same number can still start this record.
            continue;
        }

        // Russian description: tokens not starting with Latin or a digit.
        let mut ru_tokens: Vec<&str> = Vec::new();
        while i < tokens.len() && !LATIN_OR_DIGIT_START_RE.is_match(tokens[i]) {
            ru_tokens.push(tokens[i]);
            i += 1;
        }

        // Ukrainian description: everything up to the next scheme marker.
        let mut uk_tokens: Vec<&str> = Vec::new();
        while i < tokens.len() && leading_int(tokens[i]) != Some(scheme_counter + 1) {
            uk_tokens.push(tokens[i]);
            i += 1;
        }

        // Descriptions wrap across the language boundary: any Cyrillic
        // token in the UK buffer belongs to the RU side, together with
        // everything before it.
        let mut j = 0;
        while j < uk_tokens.len() {
            if CYRILLIC_RE.is_match(uk_tokens[j]) {
                ru_tokens.extend(uk_tokens.drain(0..=j));
                j = 0;
            } else {
                j += 1;
            }
        }

        // Quantity: the last numeric token left on the UK side.
        let mut quantity: u32 = 1;
        for k in (0..uk_tokens.len()).rev() {
            if let Some(n) = leading_int(uk_tokens[k]) {
                quantity = u32::try_from(n).unwrap_or(u32::MAX);
                uk_tokens.remove(k);
                break;
            }
        }

        parsed.push(ParsedPart {
            scheme_number: scheme_counter as u32,
            part_number,
            description_ru: ru_tokens.join(" "),
            description_uk: fix_uk_spacing(&uk_tokens.join(" ")),
            quantity,
        });

        scheme_counter += 1;
    }

    parsed
}
