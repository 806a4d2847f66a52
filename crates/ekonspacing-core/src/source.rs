//! Line sources for dataset partitions.
//!
//! Partition files are UTF-8 text, one example per line. Lines end at `\n`,
//! `\r\n` or a lone `\r`. Files with a `.gz` extension are decompressed on
//! the fly.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::{debug, info};

use crate::config::Partition;
use crate::error::{Result, SpacingError};

/// Number of leading rows echoed at debug level.
const PREVIEW_ROWS: usize = 5;

/// Splits a reader into lines on `\n`, `\r\n` and lone `\r`.
///
/// Line terminators are not included. Invalid UTF-8 is reported as
/// [`io::ErrorKind::InvalidData`].
pub struct UniversalLines<R> {
    reader: R,
}

impl<R: BufRead> UniversalLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let mut started = false;
        loop {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(started.then_some(line));
            }
            started = true;

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(pos) => {
                    let carriage_return = available[pos] == b'\r';
                    line.extend_from_slice(&available[..pos]);
                    self.reader.consume(pos + 1);
                    if carriage_return {
                        self.skip_line_feed()?;
                    }
                    return Ok(Some(line));
                }
                None => {
                    let len = available.len();
                    line.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }
    }

    // \r\n counts as a single line end
    fn skip_line_feed(&mut self) -> io::Result<()> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => {
                    if buf.first() == Some(&b'\n') {
                        self.reader.consume(1);
                    }
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: BufRead> Iterator for UniversalLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_line() {
            Ok(Some(bytes)) => Some(
                String::from_utf8(bytes)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            ),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Lines of one partition file.
pub struct PartitionSource {
    partition: Partition,
    lines: UniversalLines<Box<dyn BufRead + Send>>,
    read: usize,
}

impl PartitionSource {
    /// Open the source file of `partition`.
    ///
    /// Fails with [`SpacingError::SourceUnavailable`] if the file cannot be opened.
    pub fn open(partition: Partition, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SpacingError::SourceUnavailable {
            partition,
            path: path.to_path_buf(),
            source,
        })?;

        let reader: Box<dyn BufRead + Send> = if is_gzip(path) {
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        info!(%partition, path = %path.display(), "Generating examples");

        Ok(Self {
            partition,
            lines: UniversalLines::new(reader),
            read: 0,
        })
    }
}

impl Iterator for PartitionSource {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        if self.read < PREVIEW_ROWS {
            if let Ok(row) = &line {
                debug!(partition = %self.partition, row = self.read, "{row}");
            }
        }
        self.read += 1;
        Some(line)
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    use flate2::write::GzEncoder;
    use flate2::Compression;

    fn split(bytes: &[u8]) -> Vec<String> {
        UniversalLines::new(Cursor::new(bytes))
            .map(|l| l.unwrap())
            .collect()
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(split(b"a\nb\r\nc\rd"), ["a", "b", "c", "d"]);
        assert_eq!(split(b"a\r\rb\n"), ["a", "", "b"]);
        assert_eq!(split(b"\n"), [""]);
        assert!(split(b"").is_empty());
    }

    #[test]
    fn test_crlf_across_buffer_boundary() {
        let reader = BufReader::with_capacity(2, Cursor::new(b"ab\r\ncd".to_vec()));
        let lines: Vec<String> = UniversalLines::new(reader).map(|l| l.unwrap()).collect();
        assert_eq!(lines, ["ab", "cd"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");

        match PartitionSource::open(Partition::Test, &path) {
            Err(SpacingError::SourceUnavailable {
                partition,
                path: missing,
                ..
            }) => {
                assert_eq!(partition, Partition::Test);
                assert_eq!(missing, path);
            }
            _ => panic!("expected source unavailable"),
        }
    }

    #[test]
    fn test_plain_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "가 나\r\n\n다라\r마\n").unwrap();

        let source = PartitionSource::open(Partition::Train, file.path()).unwrap();
        let lines: Vec<String> = source.map(|l| l.unwrap()).collect();
        assert_eq!(lines, ["가 나", "", "다라", "마"]);
    }

    #[test]
    fn test_gzip_lines() {
        let file = tempfile::Builder::new().suffix(".txt.gz").tempfile().unwrap();
        let mut encoder = GzEncoder::new(file.as_file(), Compression::default());
        encoder.write_all("안녕 하세요\n반갑 습니다\n".as_bytes()).unwrap();
        encoder.finish().unwrap();

        let source = PartitionSource::open(Partition::Validation, file.path()).unwrap();
        let lines: Vec<String> = source.map(|l| l.unwrap()).collect();
        assert_eq!(lines, ["안녕 하세요", "반갑 습니다"]);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ok\n\xff\xfe\n").unwrap();

        let mut source = PartitionSource::open(Partition::Train, file.path()).unwrap();
        assert_eq!(source.next().unwrap().unwrap(), "ok");
        let err = source.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
