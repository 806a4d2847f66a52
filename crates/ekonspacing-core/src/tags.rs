//! # BIES Spacing Tags
//!
//! Defines the label vocabulary for character-level spacing recognition
//! and derives per-character tags from whitespace-separated words.
//! Uses the BIES (Begin-Inside-End-Single) tagging scheme, with an
//! `O` code kept in the vocabulary for compatibility.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpacingError};

/// Spacing label of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Character strictly inside a word of three or more characters.
    Inside,
    /// Reserved; never produced by [`derive_tags`].
    Outside,
    /// First character of a multi-character word.
    Begin,
    /// Last character of a multi-character word.
    End,
    /// A word made of a single character.
    Single,
}

/// The label vocabulary in storage order. Index `i` of a stored tag refers to `TAGS[i]`.
pub const TAGS: [Label; 5] = [
    Label::Inside,
    Label::Outside,
    Label::Begin,
    Label::End,
    Label::Single,
];

/// Symbols of [`TAGS`], in the same order.
pub const TAG_NAMES: [&str; 5] = ["I", "O", "B", "E", "S"];

impl Label {
    /// Get the stored index of this label.
    pub fn index(&self) -> u8 {
        match self {
            Label::Inside => 0,
            Label::Outside => 1,
            Label::Begin => 2,
            Label::End => 3,
            Label::Single => 4,
        }
    }

    /// Get label from a stored index.
    pub fn from_index(idx: u8) -> Option<Self> {
        TAGS.get(usize::from(idx)).copied()
    }

    /// One-letter symbol of the label.
    pub fn symbol(&self) -> &'static str {
        TAG_NAMES[usize::from(self.index())]
    }

    /// Whether a word boundary follows a character with this label.
    pub fn closes_word(&self) -> bool {
        matches!(self, Label::End | Label::Single)
    }

    /// Check if label `to` may directly follow label `from`.
    pub fn is_valid_transition(from: Label, to: Label) -> bool {
        match (from, to) {
            // An open word must continue or close
            (Label::Begin | Label::Inside, Label::Inside | Label::End) => true,
            (Label::Begin | Label::Inside, _) => false,
            // Outside of a word, only a new word (or O) can start
            (_, Label::Begin | Label::Single | Label::Outside) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Label {
    type Err = SpacingError;

    fn from_str(s: &str) -> Result<Self> {
        TAG_NAMES
            .iter()
            .position(|name| *name == s)
            .map(|i| TAGS[i])
            .ok_or_else(|| SpacingError::UnknownLabel(s.to_string()))
    }
}

/// Derive the flat tag sequence for a sequence of words.
///
/// Words are processed in order and characters left to right, so the
/// result has one tag per character of the concatenated words:
/// `S` for a one-character word, otherwise `B`, then `I`s, then `E`.
///
/// # Examples
/// ```
/// use ekonspacing_core::tags::derive_tags;
///
/// // B E B I E
/// assert_eq!(derive_tags(["안녕", "하세요"]), vec![2, 3, 2, 0, 3]);
/// ```
pub fn derive_tags<I, S>(words: I) -> Vec<u8>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags = Vec::new();
    for word in words {
        // empty words contribute nothing
        match word.as_ref().chars().count() {
            0 => {}
            1 => tags.push(Label::Single.index()),
            len => {
                tags.push(Label::Begin.index());
                tags.extend(std::iter::repeat_n(Label::Inside.index(), len - 2));
                tags.push(Label::End.index());
            }
        }
    }
    tags
}

/// Check that a stored tag sequence is a well-formed BIES labeling.
pub fn validate_tags(tags: &[u8]) -> Result<()> {
    let mut prev: Option<Label> = None;
    for (position, &idx) in tags.iter().enumerate() {
        let label = Label::from_index(idx)
            .ok_or_else(|| SpacingError::UnknownLabel(idx.to_string()))?;

        let ok = match prev {
            None => !matches!(label, Label::Inside | Label::End),
            Some(prev) => Label::is_valid_transition(prev, label),
        };
        if !ok {
            return Err(SpacingError::InvalidTagSequence {
                position,
                reason: match prev {
                    Some(prev) => format!("{label} cannot follow {prev}"),
                    None => format!("sequence cannot start with {label}"),
                },
            });
        }
        prev = Some(label);
    }

    match prev {
        Some(last @ (Label::Begin | Label::Inside)) => Err(SpacingError::InvalidTagSequence {
            position: tags.len() - 1,
            reason: format!("sequence cannot end with {last}"),
        }),
        _ => Ok(()),
    }
}

/// Rebuild spaced text from characters and their tags.
///
/// A space is inserted after every character tagged `E` or `S`, except the last one.
pub fn restore_spacing(tokens: &[char], tags: &[u8]) -> Result<String> {
    if tokens.len() != tags.len() {
        return Err(SpacingError::LengthMismatch {
            tokens: tokens.len(),
            tags: tags.len(),
        });
    }

    let mut text = String::with_capacity(tokens.len() * 4);
    for (i, (&c, &idx)) in tokens.iter().zip(tags).enumerate() {
        let label = Label::from_index(idx)
            .ok_or_else(|| SpacingError::UnknownLabel(idx.to_string()))?;
        text.push(c);
        if label.closes_word() && i + 1 < tokens.len() {
            text.push(' ');
        }
    }
    Ok(text)
}
