use serde_json::Value;
use std::io::{self, Read};

/// The JSON document piped on stdin, if any.
///
/// An interactive terminal, an empty pipe or a whitespace-only pipe all mean
/// no document was supplied.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    read_document(io::stdin().lock())
}

fn read_document<R: Read>(mut reader: R) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    parse_document(&buffer).map_err(Into::into)
}

fn parse_document(buffer: &str) -> Result<Option<Value>, String> {
    let document = buffer.trim();
    if document.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(document)
        .map(Some)
        .map_err(|e| format!("Failed to parse stdin as JSON: {e}"))
}
