//! Rewrites the character encoding of the text meta-events of Standard MIDI Files, or guesses
//! which encoding they were written in.

pub mod app;
pub mod charset;
pub mod cmdline;
pub mod error;
pub mod iconv;
pub mod report;
pub mod sequence;
#[cfg(test)]
mod test_helpers;
pub mod text;

pub use charset::{detect, summarize, CharsetDetector, CharsetGuess, CharsetScore, FieldCharsets};
pub use error::{DetectionError, EncodingError, Error, Result};
pub use iconv::{convert, fix_crlf, resolve_encoding, Charset};
pub use text::{for_each_text_field, text_fields, TextKind, TextLocation, TextPayload};
