//! # Record Generation
//!
//! Turns a stream of raw lines into spacing records, one per non-blank
//! line, keyed by the line's position in the partition.

use std::io;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpacingError};
use crate::tags::{derive_tags, restore_spacing, TAG_NAMES};

/// Whitespace for stripping and word splitting: Unicode `White_Space`
/// plus the information separators `U+001C..=U+001F`.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_space).filter(|word| !word.is_empty())
}

/// One training example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The stripped raw line, inner spacing preserved.
    pub text: String,

    /// Characters of the line with all whitespace removed.
    pub tokens: Vec<char>,

    /// Label indices into [`crate::tags::TAGS`], aligned with `tokens`.
    pub spacing_tags: Vec<u8>,
}

impl Record {
    /// Build the record for a raw line, or `None` if the line is blank.
    ///
    /// # Examples
    /// ```
    /// use ekonspacing_core::record::Record;
    ///
    /// let record = Record::from_line("안녕 하세요\n").unwrap();
    /// assert_eq!(record.text, "안녕 하세요");
    /// assert_eq!(record.spacing_tags, vec![2, 3, 2, 0, 3]);
    /// assert!(Record::from_line("   ").is_none());
    /// ```
    pub fn from_line(line: &str) -> Option<Self> {
        let text = line.trim_matches(is_space);
        if text.is_empty() {
            return None;
        }

        let words: Vec<&str> = split_words(text).collect();
        let spacing_tags = derive_tags(&words);
        let tokens: Vec<char> = words.iter().flat_map(|w| w.chars()).collect();

        Some(Self {
            text: text.to_string(),
            tokens,
            spacing_tags,
        })
    }

    /// Words of the line, in order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        split_words(&self.text)
    }

    /// Tag symbols instead of indices.
    pub fn tag_names(&self) -> Vec<&'static str> {
        self.spacing_tags
            .iter()
            .map(|&idx| TAG_NAMES.get(usize::from(idx)).copied().unwrap_or("?"))
            .collect()
    }

    /// Text rebuilt from `tokens` and `spacing_tags`.
    pub fn restored_text(&self) -> Result<String> {
        restore_spacing(&self.tokens, &self.spacing_tags)
    }
}

/// Counters collected while draining a partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PartitionStats {
    /// Lines read, blank ones included.
    pub lines: usize,
    /// Records emitted.
    pub records: usize,
    /// Blank lines skipped.
    pub skipped: usize,
    /// Characters tagged across all records.
    pub characters: usize,
}

/// Lazy iterator over the `(index, Record)` pairs of one partition.
///
/// The index counts every input line, so indices skip over blank lines.
/// A read failure is yielded once and ends the iteration.
pub struct Examples<L> {
    lines: L,
    next_index: usize,
    failed: bool,
    stats: PartitionStats,
}

impl<L> Examples<L>
where
    L: Iterator<Item = io::Result<String>>,
{
    /// Wrap a line source.
    pub fn new(lines: L) -> Self {
        Self {
            lines,
            next_index: 0,
            failed: false,
            stats: PartitionStats::default(),
        }
    }

    /// Counters for the lines consumed so far.
    pub fn stats(&self) -> PartitionStats {
        self.stats
    }
}

impl<L> Iterator for Examples<L>
where
    L: Iterator<Item = io::Result<String>>,
{
    type Item = Result<(usize, Record)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(source) => {
                    self.failed = true;
                    return Some(Err(SpacingError::Decode {
                        line: self.next_index + 1,
                        source,
                    }));
                }
            };

            let index = self.next_index;
            self.next_index += 1;
            self.stats.lines += 1;

            match Record::from_line(&line) {
                Some(record) => {
                    self.stats.records += 1;
                    self.stats.characters += record.tokens.len();
                    return Some(Ok((index, record)));
                }
                None => self.stats.skipped += 1,
            }
        }
    }
}

/// Generate the records of one partition from its lines.
pub fn generate_examples<I>(lines: I) -> Examples<I::IntoIter>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    Examples::new(lines.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<io::Result<String>> {
        text.lines().map(|l| Ok(l.to_string())).collect()
    }

    #[test]
    fn test_record_from_line() {
        let record = Record::from_line("안녕 하세요").unwrap();
        assert_eq!(record.tokens, vec!['안', '녕', '하', '세', '요']);
        assert_eq!(record.spacing_tags, vec![2, 3, 2, 0, 3]);
        assert_eq!(record.tag_names(), vec!["B", "E", "B", "I", "E"]);
    }

    #[test]
    fn test_single_char_words() {
        let record = Record::from_line("가 나").unwrap();
        assert_eq!(record.tokens, vec!['가', '나']);
        assert_eq!(record.spacing_tags, vec![4, 4]);
    }

    #[test]
    fn test_two_char_line() {
        let record = Record::from_line("ab").unwrap();
        assert_eq!(record.tokens, vec!['a', 'b']);
        assert_eq!(record.tag_names(), vec!["B", "E"]);
    }

    #[test]
    fn test_whitespace_runs_and_stripping() {
        let record = Record::from_line("  오늘은 \t 날씨가   좋다 \r\n").unwrap();
        assert_eq!(record.text, "오늘은 \t 날씨가   좋다");
        assert_eq!(record.words().collect::<Vec<_>>(), ["오늘은", "날씨가", "좋다"]);
        assert_eq!(record.tokens.len(), 8);
        assert_eq!(record.tokens.len(), record.spacing_tags.len());
    }

    #[test]
    fn test_information_separators_are_spaces() {
        let record = Record::from_line("\u{1f}라\u{1f}마\u{1c}").unwrap();
        assert_eq!(record.text, "라\u{1f}마");
        assert_eq!(record.words().collect::<Vec<_>>(), ["라", "마"]);
        assert_eq!(record.spacing_tags, vec![4, 4]);

        assert!(Record::from_line("\u{1d}\u{1e}").is_none());
        assert!(is_space('\u{3000}'));
        assert!(!is_space('가'));
    }

    #[test]
    fn test_blank_line_has_no_record() {
        assert!(Record::from_line("").is_none());
        assert!(Record::from_line("   ").is_none());
        assert!(Record::from_line("\t\n").is_none());
    }

    #[test]
    fn test_restored_text() {
        let record = Record::from_line("나는  학교에 간다").unwrap();
        assert_eq!(record.restored_text().unwrap(), "나는 학교에 간다");
    }

    #[test]
    fn test_indices_count_blank_lines() {
        let examples: Vec<_> = generate_examples(lines("첫 줄\n\n   \n둘째 줄\n셋"))
            .collect::<Result<_>>()
            .unwrap();

        let ids: Vec<usize> = examples.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![0, 3, 4]);
        assert_eq!(examples[1].1.text, "둘째 줄");
    }

    #[test]
    fn test_stats() {
        let mut examples = generate_examples(lines("가 나\n\nab"));
        assert_eq!(examples.by_ref().count(), 2);
        assert_eq!(
            examples.stats(),
            PartitionStats {
                lines: 3,
                records: 2,
                skipped: 1,
                characters: 4,
            }
        );
    }

    #[test]
    fn test_read_failure_is_fatal() {
        let source = vec![
            Ok("가 나".to_string()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8")),
            Ok("다 라".to_string()),
        ];
        let mut examples = generate_examples(source);

        assert!(examples.next().unwrap().is_ok());
        match examples.next() {
            Some(Err(SpacingError::Decode { line, .. })) => assert_eq!(line, 2),
            other => panic!("expected decode error, got {other:?}"),
        }
        assert!(examples.next().is_none());
    }

    #[test]
    fn test_regeneration_is_identical() {
        let text = "띄어쓰기 를\n\n잘 하자";
        let first: Vec<_> = generate_examples(lines(text)).map(|r| r.unwrap()).collect();
        let second: Vec<_> = generate_examples(lines(text)).map(|r| r.unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_record_serialization() {
        let record = Record::from_line("가 나").unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"text":"가 나","tokens":["가","나"],"spacing_tags":[4,4]}"#
        );
    }
}
