//! Append-only token tape: binary protobuf log of key presses.
//!
//! Storage format: length-prefixed protobuf frames.
//!   [4-byte LE length][ProtoTokenRecord][4-byte LE length][ProtoTokenRecord]...
//!
//! Rules:
//!   - Strict append only, fsync after every write
//!   - Sequence starts at 1 and increases by exactly one
//!   - Every symbol must parse as a keypad token
//!
//! A tape records input, not state. Replaying it through the kernel
//! reproduces the session.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use prost::Message;

use calc_engine::tokens::Token;

use crate::error::{Result, RuntimeError};
use crate::proto_types::ProtoTokenRecord;

const LENGTH_PREFIX: usize = 4;
/// Records are a sequence number and a short symbol.
const MAX_FRAME_LEN: usize = 1024;

/// Append-only token tape backed by a binary file.
#[derive(Debug)]
pub struct Tape {
    path: PathBuf,
    last_sequence: u64,
}

impl Tape {
    /// Open or create a tape at the given path.
    /// An existing tape is validated in full to find the last sequence.
    pub fn open(path: &Path) -> Result<Self> {
        ensure_parent(path)?;

        let last_sequence = if path.exists() {
            let records = decode_frames(&fs::read(path)?)?;
            records_to_tokens(&records)?;
            records.last().map(|r| r.sequence).unwrap_or(0)
        } else {
            0
        };

        tracing::debug!(path = %path.display(), last_sequence, "tape opened");
        Ok(Self {
            path: path.to_path_buf(),
            last_sequence,
        })
    }

    /// Create a tape, discarding any previous content at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        ensure_parent(path)?;
        File::create(path)?;
        tracing::debug!(path = %path.display(), "tape created");
        Ok(Self {
            path: path.to_path_buf(),
            last_sequence: 0,
        })
    }

    /// Append one token under the next sequence number and fsync.
    pub fn append(&mut self, token: Token) -> Result<u64> {
        let record = ProtoTokenRecord::new(self.last_sequence + 1, token.to_string());
        self.append_record(&record)?;
        Ok(record.sequence)
    }

    /// Append a pre-built record. The sequence must be exactly
    /// `last_sequence + 1` and the symbol must parse as a token.
    pub fn append_record(&mut self, record: &ProtoTokenRecord) -> Result<()> {
        let expected = self.last_sequence + 1;
        if record.sequence != expected {
            return Err(RuntimeError::SequenceViolation {
                expected,
                got: record.sequence,
            });
        }
        record.symbol.parse::<Token>()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        {
            let mut writer = BufWriter::new(&mut file);
            writer.write_all(&encode_frame(record))?;
            writer.flush()?;
        }
        file.sync_all()?;

        self.last_sequence = record.sequence;
        Ok(())
    }

    /// All records in sequence order.
    pub fn load_records(&self) -> Result<Vec<ProtoTokenRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        decode_frames(&fs::read(&self.path)?)
    }

    /// All recorded tokens in sequence order.
    pub fn load_tokens(&self) -> Result<Vec<Token>> {
        records_to_tokens(&self.load_records()?)
    }

    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}

/// Read the tokens of the tape at `path`.
pub fn read_tape(path: &Path) -> Result<Vec<Token>> {
    records_to_tokens(&decode_frames(&fs::read(path)?)?)
}

/// Write `tokens` to a fresh tape at `path`.
pub fn write_tape(path: &Path, tokens: &[Token]) -> Result<Tape> {
    let mut tape = Tape::create(path)?;
    for &token in tokens {
        tape.append(token)?;
    }
    Ok(tape)
}

/// One length-prefixed frame.
pub fn encode_frame(record: &ProtoTokenRecord) -> Vec<u8> {
    let body = record.encode_to_vec();
    let mut frame = Vec::with_capacity(LENGTH_PREFIX + body.len());
    frame.extend_from_slice(&(body.len() as u32).to_le_bytes());
    frame.extend_from_slice(&body);
    frame
}

/// Decode every frame in `bytes`, validating lengths and sequence order.
pub fn decode_frames(bytes: &[u8]) -> Result<Vec<ProtoTokenRecord>> {
    let mut records = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let frame = records.len() + 1;
        let corrupt = |reason: String| RuntimeError::CorruptTape { frame, reason };

        let prefix = bytes
            .get(offset..offset + LENGTH_PREFIX)
            .ok_or_else(|| corrupt(format!("truncated length prefix at byte {}", offset)))?;
        let mut len_buf = [0u8; LENGTH_PREFIX];
        len_buf.copy_from_slice(prefix);
        let len = u32::from_le_bytes(len_buf) as usize;
        offset += LENGTH_PREFIX;

        if len == 0 || len > MAX_FRAME_LEN {
            return Err(corrupt(format!("invalid frame length {}", len)));
        }

        let body = bytes.get(offset..offset + len).ok_or_else(|| {
            corrupt(format!(
                "truncated frame: {} of {} bytes",
                bytes.len() - offset,
                len
            ))
        })?;
        offset += len;

        let record = ProtoTokenRecord::decode(body)
            .map_err(|source| RuntimeError::Decode { frame, source })?;

        let expected = records.len() as u64 + 1;
        if record.sequence != expected {
            return Err(corrupt(format!(
                "sequence {} where {} was expected",
                record.sequence, expected
            )));
        }
        records.push(record);
    }

    Ok(records)
}

/// Parse every record's symbol. An unknown symbol is corruption.
pub fn records_to_tokens(records: &[ProtoTokenRecord]) -> Result<Vec<Token>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            record.symbol.parse::<Token>().map_err(|e| RuntimeError::CorruptTape {
                frame: i + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(symbols: &[&str]) -> Vec<u8> {
        symbols
            .iter()
            .enumerate()
            .flat_map(|(i, s)| encode_frame(&ProtoTokenRecord::new(i as u64 + 1, *s)))
            .collect()
    }

    #[test]
    fn test_decode_in_memory() {
        let records = decode_frames(&frames(&["7", "+", "3", "="])).unwrap();
        let tokens = records_to_tokens(&records).unwrap();
        assert_eq!(tokens, Token::parse_script("7 + 3 =").unwrap());
    }

    #[test]
    fn test_empty_input_is_empty_tape() {
        assert!(decode_frames(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_zero_length_frame_rejected() {
        let err = decode_frames(&[0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, RuntimeError::CorruptTape { frame: 1, .. }));
    }

    #[test]
    fn test_truncated_frame_rejected() {
        let mut bytes = frames(&["1", "2"]);
        bytes.pop();
        let err = decode_frames(&bytes).unwrap_err();
        assert!(matches!(err, RuntimeError::CorruptTape { frame: 2, .. }));
    }

    #[test]
    fn test_truncated_prefix_rejected() {
        let mut bytes = frames(&["1"]);
        bytes.extend_from_slice(&[5, 0]);
        let err = decode_frames(&bytes).unwrap_err();
        assert!(matches!(err, RuntimeError::CorruptTape { frame: 2, .. }));
    }

    #[test]
    fn test_sequence_gap_rejected() {
        let mut bytes = encode_frame(&ProtoTokenRecord::new(1, "1"));
        bytes.extend(encode_frame(&ProtoTokenRecord::new(3, "2")));
        let err = decode_frames(&bytes).unwrap_err();
        assert!(err.to_string().contains("sequence 3"));
    }

    #[test]
    fn test_garbage_body_is_decode_error() {
        let bytes = [2, 0, 0, 0, 0xff, 0xff];
        let err = decode_frames(&bytes).unwrap_err();
        assert!(matches!(err, RuntimeError::Decode { frame: 1, .. }));
    }

    #[test]
    fn test_append_refuses_unknown_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let mut tape = Tape::create(&dir.path().join("calc.tape")).unwrap();
        tape.append_record(&ProtoTokenRecord::new(1, "7")).unwrap();

        let err = tape.append_record(&ProtoTokenRecord::new(2, "12")).unwrap_err();
        assert!(matches!(err, RuntimeError::Token(_)));
        assert_eq!(tape.last_sequence(), 1);
        assert_eq!(tape.load_tokens().unwrap().len(), 1);
    }

    #[test]
    fn test_open_refuses_unknown_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calc.tape");
        fs::write(&path, frames(&["1", "sin"])).unwrap();

        let err = Tape::open(&path).unwrap_err();
        assert!(matches!(err, RuntimeError::CorruptTape { frame: 2, .. }));
    }

    #[test]
    fn test_unknown_symbol_is_corruption() {
        let records = decode_frames(&frames(&["1", "M+"])).unwrap();
        let err = records_to_tokens(&records).unwrap_err();
        assert!(matches!(err, RuntimeError::CorruptTape { frame: 2, .. }));
    }
}
