use crate::error::EncodingError;
use crate::text::{for_each_text_field, TextLocation};
use encoding_rs::Encoding;
use midly::{Arena, Smf};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::{debug, trace};

/// iconv style spellings missing from the WHATWG label list, mapped to a label it knows
static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("latin-1", "latin1"),
        ("latin-2", "latin2"),
        ("latin-9", "iso-8859-15"),
        ("shift-jis", "shift_jis"),
        ("cp932", "shift_jis"),
        ("ms932", "shift_jis"),
        ("eucjp", "euc-jp"),
        ("cp936", "gbk"),
        ("ms936", "gbk"),
        ("cp949", "euc-kr"),
        ("uhc", "euc-kr"),
        ("euckr", "euc-kr"),
        ("cp950", "big5"),
        ("utf-16-le", "utf-16le"),
        ("utf-16-be", "utf-16be"),
    ])
});

/// Labels meaning true ISO-8859-1, which WHATWG would otherwise read as windows-1252
const LATIN1_LABELS: [&str; 10] = [
    "latin1",
    "iso-8859-1",
    "iso8859-1",
    "iso88591",
    "iso_8859-1",
    "iso_8859-1:1987",
    "l1",
    "iso-ir-100",
    "ibm819",
    "cp819",
];

/// A text encoding as understood by iconv
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charset {
    /// ISO-8859-1, every byte mapping to the code point of the same value
    Latin1,
    Whatwg(&'static Encoding),
}

impl From<&'static Encoding> for Charset {
    fn from(encoding: &'static Encoding) -> Self {
        Charset::Whatwg(encoding)
    }
}

impl Charset {
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Latin1 => "ISO-8859-1",
            Charset::Whatwg(encoding) => encoding.name(),
        }
    }

    /// `None` when `text` is not valid in this charset
    fn decode(&self, text: &[u8]) -> Option<String> {
        match self {
            Charset::Latin1 => Some(encoding_rs::mem::decode_latin1(text).into_owned()),
            Charset::Whatwg(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(text)
                .map(|decoded| decoded.into_owned()),
        }
    }

    /// `None` when `text` has characters this charset cannot represent
    fn encode(&self, text: &str) -> Option<Vec<u8>> {
        match self {
            Charset::Latin1 => encoding_rs::mem::is_str_latin1(text)
                .then(|| encoding_rs::mem::encode_latin1_lossy(text).into_owned()),
            Charset::Whatwg(encoding) => {
                let (encoded, _, unmappable) = encoding.encode(text);
                (!unmappable).then(|| encoded.into_owned())
            }
        }
    }
}

/// Looks up an encoding by name, accepting WHATWG labels and common iconv spellings.
///
/// The ISO-8859-1 family resolves to [`Charset::Latin1`] as iconv does. A trailing iconv
/// modifier such as `//TRANSLIT` or `//IGNORE` is ignored.
pub fn resolve_encoding(label: &str) -> Result<Charset, EncodingError> {
    let trimmed = label.trim();
    let lowered = trimmed
        .split("//")
        .next()
        .unwrap_or(trimmed)
        .to_ascii_lowercase();
    let name = ALIASES.get(lowered.as_str()).copied().unwrap_or(&lowered);
    if LATIN1_LABELS.contains(&name) {
        return Ok(Charset::Latin1);
    }
    Encoding::for_label(name.as_bytes())
        .map(Charset::Whatwg)
        .ok_or_else(|| EncodingError::UnknownEncoding(label.to_owned()))
}

/// Rejects encodings `encoding_rs` can decode but not produce, like UTF-16.
pub fn check_target(charset: Charset) -> Result<Charset, EncodingError> {
    match charset {
        Charset::Whatwg(encoding) if encoding.output_encoding() != encoding => {
            Err(EncodingError::UnsupportedTarget(encoding.name()))
        }
        _ => Ok(charset),
    }
}

/// Post-processing step that leaves the text alone
pub fn identity(text: String) -> String {
    text
}

/// Turns every `\r` that is not already followed by `\n` into `\r\n`.
///
/// Some players render a lone carriage return as garbage.
pub fn fix_crlf(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    let mut fixed = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        fixed.push(c);
        if c == '\r' && chars.peek() != Some(&'\n') {
            fixed.push('\n');
        }
    }
    fixed
}

/// Re-encodes one text payload from `from` into `to`, running `post_process` on the decoded text
pub fn convert_text<P>(
    text: &[u8],
    from: Charset,
    to: Charset,
    post_process: P,
    location: TextLocation,
) -> Result<Vec<u8>, EncodingError>
where
    P: Fn(String) -> String,
{
    let decoded = from.decode(text).ok_or(EncodingError::Malformed {
        encoding: from.name(),
        location,
    })?;
    to.encode(&post_process(decoded))
        .ok_or(EncodingError::Unmappable {
            encoding: to.name(),
            location,
        })
}

/// Converts every text payload of `smf` from `from` into `to`.
///
/// Stops at the first payload that cannot be converted. Payloads converted before it keep their
/// new value. An unsupported target is rejected before anything is touched.
///
/// Returns the number of payloads that were replaced. Payloads whose bytes come out identical
/// are left in place and not counted.
pub fn convert<'a, P>(
    smf: &mut Smf<'a>,
    arena: &'a Arena,
    from: Charset,
    to: Charset,
    post_process: P,
) -> Result<usize, EncodingError>
where
    P: Fn(String) -> String,
{
    let to = check_target(to)?;
    let mut replaced = 0;
    let visited = for_each_text_field::<EncodingError, _>(smf, arena, |location, text| {
        let converted = convert_text(text, from, to, &post_process, location)?;
        if converted == text {
            Ok(None)
        } else {
            trace!("converted {}", location);
            replaced += 1;
            Ok(Some(converted))
        }
    })?;
    debug!(
        "replaced {} of {} text fields converting from {} to {}",
        replaced,
        visited,
        from.name(),
        to.name()
    );
    Ok(replaced)
}
