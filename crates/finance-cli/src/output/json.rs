use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print the envelope to stdout. A write failure (closed pipe) is
/// reported on stderr.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_json(stdout.lock(), value) {
        eprintln!("Failed to write JSON output: {e}");
    }
}

fn write_json<W: Write>(mut out: W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_written_pretty_with_trailing_newline() {
        let mut out = Vec::new();
        write_json(&mut out, &json!({"result": {"npv": "80015.03"}})).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("{\n"));
        assert!(text.contains("\"npv\": \"80015.03\""));
        assert!(text.ends_with("}\n"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_returned() {
        let err = write_json(ClosedPipe, &json!({"result": 1})).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
