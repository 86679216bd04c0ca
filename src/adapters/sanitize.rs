//! Log redaction for clinical values.
//!
//! Every formatted log line passes through [`RedactingMakeWriter`] before it
//! reaches the sink. Patient measurements must never be logged in the first
//! place; this is the fallback for the ones that slip through, e.g. inside a
//! `Debug` dump of a form or a feature vector.

use std::sync::OnceLock;

use regex::{Regex, RegexSet};
use tracing_subscriber::fmt::MakeWriter;

/// Longest line (in bytes) that is scanned; anything beyond is cut.
const MAX_LINE_BYTES: usize = 8 * 1024;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct Rules {
    any: RegexSet,
    rules: Vec<Rule>,
}

static RULES: OnceLock<Rules> = OnceLock::new();

fn rules() -> &'static Rules {
    RULES.get_or_init(|| {
        let table: [(&str, &'static str); 5] = [
            // key=value / key: value pairs naming a patient attribute.
            // Debug output quotes enum payloads, so `Some(Male)` is covered too.
            // Model column names carry a `_level` suffix (`HbA1c_level`).
            (
                r"(?i)\b((?:age|bmi|hba1c|blood_glucose|glucose|gender|smoking_history|smoking|hypertension|heart_disease)(?:_level)?)\b(\s*[:=]\s*)[^\s,;}\)]+(?:\([^)]*\))?",
                "${1}${2}[REDACTED]",
            ),
            // Bracketed numeric sequences of four or more entries (feature vectors).
            (
                r"\[\s*-?\d+(?:\.\d+)?(?:e-?\d+)?(?:\s*,\s*-?\d+(?:\.\d+)?(?:e-?\d+)?){3,}\s*\]",
                "[REDACTED-VECTOR]",
            ),
            // FeatureVector(...) Debug output
            (r"FeatureVector\([^)]*\)", "FeatureVector([REDACTED])"),
            // E-mail addresses
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            // Phone numbers: international form, or local mobile (01x-xxxxxxx)
            (
                r"\+\d{1,3}[\s-]?\d{1,4}(?:[\s-]?\d{3,4}){2}\b|\b01\d-?\d{7,8}\b",
                "[REDACTED-PHONE]",
            ),
        ];

        let any = RegexSet::new(table.iter().map(|(p, _)| *p)).expect("valid redaction patterns");
        let rules = table
            .into_iter()
            .map(|(pattern, replacement)| Rule {
                regex: Regex::new(pattern).expect("valid redaction pattern"),
                replacement,
            })
            .collect();
        Rules { any, rules }
    })
}

/// Redact clinical values from a single line of text.
#[must_use]
pub fn redact(input: &str) -> String {
    redact_with_limit(input, MAX_LINE_BYTES)
}

fn redact_with_limit(input: &str, max_bytes: usize) -> String {
    let (head, truncated) = if input.len() > max_bytes {
        let mut end = max_bytes;
        while !input.is_char_boundary(end) {
            end -= 1;
        }
        (&input[..end], true)
    } else {
        (input, false)
    };

    let rules = rules();
    let mut out = head.to_string();
    for idx in rules.any.matches(head).into_iter() {
        let rule = &rules.rules[idx];
        out = rule.regex.replace_all(&out, rule.replacement).into_owned();
    }

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// `MakeWriter` wrapper applying [`redact`] to each complete line.
#[derive(Debug, Clone)]
pub struct RedactingMakeWriter<M> {
    inner: M,
}

impl<M> RedactingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}

/// Line-buffering writer produced by [`RedactingMakeWriter`].
pub struct RedactingWriter<W: std::io::Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: std::io::Write> RedactingWriter<W> {
    fn emit(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let line = String::from_utf8_lossy(bytes);
        self.inner.write_all(redact(&line).as_bytes())
    }

    fn drain_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.drain_lines()?;

        // A formatter that never emits a newline must not grow the buffer forever.
        if self.pending.len() > MAX_LINE_BYTES * 2 {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
            self.inner.write_all(b"\n")?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_lines()?;
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for RedactingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FEATURE_NAMES;
    use std::io::Write;

    #[test]
    fn test_redacts_key_value_measurements() {
        let out = redact("submitted age=45 bmi: 28.5 hba1c=6.8 blood_glucose=150");
        assert!(!out.contains("45"));
        assert!(!out.contains("28.5"));
        assert!(!out.contains("6.8"));
        assert!(!out.contains("150"));
        assert!(out.contains("age=[REDACTED]"));
    }

    #[test]
    fn test_redacts_model_column_names() {
        let out = redact("scaled HbA1c_level=6.8 blood_glucose_level=150 age=45");
        assert_eq!(
            out,
            "scaled HbA1c_level=[REDACTED] blood_glucose_level=[REDACTED] age=[REDACTED]"
        );

        for name in FEATURE_NAMES {
            assert_eq!(redact(&format!("{name}=1.5")), format!("{name}=[REDACTED]"));
        }
    }

    #[test]
    fn test_redacts_debug_struct() {
        let out = redact("input: PatientInput { gender: Some(Male), age: 45.0, bmi: 28.5 }");
        assert!(!out.contains("Male"));
        assert!(!out.contains("45.0"));
        assert!(!out.contains("28.5"));
    }

    #[test]
    fn test_redacts_feature_vectors() {
        let out = redact("encoded [1.0, 45.0, 1.0, 0.0, 2.0, 28.5, 6.8, 150.0]");
        assert_eq!(out, "encoded [REDACTED-VECTOR]");

        let out = redact("encoded FeatureVector([1.0, 45.0, 1.0, 0.0])");
        assert!(!out.contains("45.0"));
    }

    #[test]
    fn test_leaves_operational_lines_alone() {
        let line = "Loaded tree_ensemble model artifact from \"/srv/models/model.json\"";
        assert_eq!(redact(line), line);
        let done = "Assessment complete: label=1";
        assert_eq!(redact(done), done);
    }

    #[test]
    fn test_redacts_email() {
        assert!(redact("contact nurse@clinic.my").contains("[REDACTED-EMAIL]"));
    }

    #[test]
    fn test_redacts_phone_numbers() {
        assert_eq!(redact("call +60 3 2345 6789"), "call [REDACTED-PHONE]");
        assert_eq!(redact("call 012-3456789"), "call [REDACTED-PHONE]");
        // Dates and timestamps are not phone numbers
        assert_eq!(redact("2026-10-19T08:15:00Z"), "2026-10-19T08:15:00Z");
    }

    #[test]
    fn test_truncates_long_lines() {
        let out = redact_with_limit("héllo world", 2);
        assert!(out.ends_with("[TRUNCATED]"));
    }

    #[test]
    fn test_writer_redacts_per_line() {
        let mut sink = Vec::new();
        {
            let mut writer = RedactingWriter {
                inner: &mut sink,
                pending: Vec::new(),
            };
            writer.write_all(b"bmi=31.2 first\nsecond ").expect("write");
            writer.write_all(b"line\n").expect("write");
        }
        let text = String::from_utf8(sink).expect("utf8");
        assert_eq!(text, "bmi=[REDACTED] first\nsecond line\n");
    }
}
