use crate::error::DetectionError;
use crate::text::{text_fields, TextLocation};
use chardetng::EncodingDetector;
use midly::Smf;
use tracing::debug;

/// One candidate charset with its confidence in percent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharsetGuess {
    pub charset: &'static str,
    pub confidence: u32,
}

/// Detection outcome for one text field
#[derive(Clone, Debug, PartialEq)]
pub struct FieldCharsets {
    pub location: TextLocation,
    pub text: Vec<u8>,
    pub result: Result<Vec<CharsetGuess>, DetectionError>,
}

/// Charset total over every field of a file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharsetScore {
    pub charset: &'static str,
    pub score: u32,
}

pub trait CharsetDetector {
    /// Ranks the charsets `text` may be written in, most likely first.
    fn detect_all(&self, text: &[u8]) -> Result<Vec<CharsetGuess>, DetectionError>;
}

/// Regions whose legacy encodings `chardetng` favors when told the text comes from there
const REGIONAL_TLDS: [&str; 13] = [
    "jp", "cn", "tw", "kr", "ru", "gr", "tr", "il", "sa", "pl", "lt", "vn", "th",
];

/// Detector backed by `chardetng`.
///
/// `chardetng` gives a single answer, so the text is guessed once without a hint and once per
/// entry of [`REGIONAL_TLDS`]. The confidence of a charset is its share of those votes. Pure
/// ASCII text answers [`DetectionError::AsciiOnly`]: every candidate decodes it the same way, so
/// it says nothing about the file.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChardetngDetector;

impl CharsetDetector for ChardetngDetector {
    fn detect_all(&self, text: &[u8]) -> Result<Vec<CharsetGuess>, DetectionError> {
        if text.is_empty() {
            return Err(DetectionError::Empty);
        }
        if text.is_ascii() {
            return Err(DetectionError::AsciiOnly);
        }

        let mut detector = EncodingDetector::new();
        detector.feed(text, true);
        let hints = std::iter::once(None)
            .chain(REGIONAL_TLDS.iter().map(|tld| Some(tld.as_bytes())));
        let mut votes: Vec<(&'static str, u32)> = vec![];
        let mut total = 0;
        for hint in hints {
            let charset = detector.guess(hint, true).name();
            match votes.iter_mut().find(|(name, _)| *name == charset) {
                Some((_, count)) => *count += 1,
                None => votes.push((charset, 1)),
            }
            total += 1;
        }
        votes.sort_by(|(_, a), (_, b)| b.cmp(a));
        Ok(votes
            .into_iter()
            .map(|(charset, count)| CharsetGuess {
                charset,
                confidence: count * 100 / total,
            })
            .collect())
    }
}

/// Runs `detector` over every text field of `smf`, in visiting order.
///
/// A field the detector fails on keeps its error and the remaining fields are still examined.
pub fn detect<D>(smf: &Smf, detector: &D) -> Vec<FieldCharsets>
where
    D: CharsetDetector + ?Sized,
{
    text_fields(smf)
        .map(|(location, text)| {
            let result = detector.detect_all(text);
            if let Err(err) = &result {
                debug!("no charset for {}: {}", location, err);
            }
            FieldCharsets {
                location,
                text: text.to_vec(),
                result,
            }
        })
        .collect()
}

/// Sums the confidence of each charset over all successfully detected fields.
///
/// Highest total first. Equal totals keep the order in which the charsets were first seen.
pub fn summarize(fields: &[FieldCharsets]) -> Vec<CharsetScore> {
    let mut scores: Vec<CharsetScore> = vec![];
    for guess in fields
        .iter()
        .filter_map(|field| field.result.as_ref().ok())
        .flatten()
    {
        match scores.iter_mut().find(|s| s.charset == guess.charset) {
            Some(score) => score.score += guess.confidence,
            None => scores.push(CharsetScore {
                charset: guess.charset,
                score: guess.confidence,
            }),
        }
    }
    // `sort_by` is stable, which keeps first-seen order among ties
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores
}
