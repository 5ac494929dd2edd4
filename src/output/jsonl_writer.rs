//! JSON Lines (JSONL) message writer.
//!
//! One reconstructed message per line, in transcript order. Multi-line
//! message bodies stay on one line with `\n` escaped.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::Message;
use crate::error::ChatstatsError;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"date":"1/2/23","time":"9:00","sender":"Alice","content":"hi"}
/// {"date":"1/2/23","time":"9:01","sender":"System","content":"Bob joined","isSystem":true}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: &str) -> Result<(), ChatstatsError> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(messages, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[Message]) -> Result<String, ChatstatsError> {
    let mut buffer = Vec::new();
    write_lines(messages, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(messages: &[Message], writer: &mut W) -> Result<(), ChatstatsError> {
    for msg in messages {
        let line = serde_json::to_string(msg)?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    fn sample() -> Vec<Message> {
        vec![
            Message::new("1/2/23", "9:00", "Alice", "first\nsecond"),
            Message::system("1/2/23", "9:01", "Bob joined"),
        ]
    }

    #[test]
    fn test_write_jsonl_basic() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_jsonl(&sample(), path).unwrap();

        let file = std::fs::File::open(path).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["sender"], "Alice");
        assert_eq!(first["content"], "first\nsecond");
        assert!(first.get("isSystem").is_none());

        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["sender"], "System");
        assert_eq!(second["isSystem"], true);
    }

    #[test]
    fn test_to_jsonl_roundtrip() {
        let jsonl = to_jsonl(&sample()).unwrap();
        let parsed: Vec<Message> = jsonl
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_to_jsonl_empty() {
        assert_eq!(to_jsonl(&[]).unwrap(), "");
    }
}
