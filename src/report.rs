use crate::charset::{CharsetScore, FieldCharsets};
use std::fmt::{self, Display};

/// Quotes raw text the way Rust debug-prints strings, showing bytes that are not UTF-8 as `\xNN`
pub fn quote(text: &[u8]) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for chunk in text.utf8_chunks() {
        let valid = format!("{:?}", chunk.valid());
        quoted.push_str(&valid[1..valid.len() - 1]);
        for byte in chunk.invalid() {
            quoted.push_str(&format!("\\x{:02x}", byte));
        }
    }
    quoted.push('"');
    quoted
}

fn write_ranking(f: &mut fmt::Formatter<'_>, entries: Vec<String>) -> fmt::Result {
    if entries.is_empty() {
        f.write_str(" none.")
    } else {
        write!(f, " {}.", entries.join(", "))
    }
}

/// One line of the per-event report:
///
/// ```text
/// Event 0::"caf\xe9" has possible charset windows-1252(71%), ISO-8859-2(14%).
/// Event 1::"" has error: no text to detect
/// ```
pub struct EventReport<'r> {
    pub index: usize,
    pub field: &'r FieldCharsets,
}

impl Display for EventReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event {}::{} has", self.index, quote(&self.field.text))?;
        match &self.field.result {
            Err(err) => write!(f, " error: {}", err),
            Ok(guesses) => {
                f.write_str(" possible charset")?;
                write_ranking(
                    f,
                    guesses
                        .iter()
                        .map(|g| format!("{}({}%)", g.charset, g.confidence))
                        .collect(),
                )
            }
        }
    }
}

pub fn event_reports(fields: &[FieldCharsets]) -> impl Iterator<Item = EventReport<'_>> {
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| EventReport { index, field })
}

/// The file-level ranking: `Possible charset order: Shift_JIS(110), EUC-JP(90).`
pub struct SummaryReport<'r>(pub &'r [CharsetScore]);

impl Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Possible charset order:")?;
        write_ranking(
            f,
            self.0
                .iter()
                .map(|s| format!("{}({})", s.charset, s.score))
                .collect(),
        )
    }
}
