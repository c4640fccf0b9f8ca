use crate::error::EncodingError;
use crate::iconv::{check_target, fix_crlf, identity, resolve_encoding, Charset};
use std::{path::PathBuf, str::FromStr};

use structopt::StructOpt;

/// Convert the character encoding of text meta-events (track names, lyrics, markers...) in a
/// Standard MIDI File
#[derive(Debug, StructOpt)]
#[structopt(name = "midi-iconv")]
pub struct Cli {
    /// Input MIDI file
    #[structopt(short = "i", long = "input", parse(from_os_str))]
    pub input: PathBuf,
    /// Output MIDI file, defaults to overwriting the input
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    pub output: Option<PathBuf>,
    /// Encoding the text is currently stored in
    #[structopt(short = "f", long = "from", default_value = "utf-8")]
    pub from: String,
    /// Encoding to store the text in
    #[structopt(short = "t", long = "to", default_value = "utf-8")]
    pub to: String,
    /// Convert lone `\r` to `\r\n`
    #[structopt(long = "fix-crlf")]
    pub fix_crlf: bool,
    /// [EXPERIMENTAL] Detect possible character sets instead of converting
    #[structopt(long = "charset-detect")]
    pub charset_detect: bool,
    /// Detection report: `summary` ranks charsets for the whole file, `events` lists every field
    #[structopt(long = "report", default_value = "summary")]
    pub report: ReportForm,
    /// On a conversion error, `best-effort` still writes the fields converted so far while
    /// `abort` writes nothing
    #[structopt(long = "on-error", default_value = "best-effort")]
    pub on_error: OnError,
    /// Log more (-v debug, -vv trace)
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportForm {
    Summary,
    Events,
}

impl FromStr for ReportForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(ReportForm::Summary),
            "events" => Ok(ReportForm::Events),
            other => Err(format!(
                "unknown report `{}`, expected `summary` or `events`",
                other
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnError {
    BestEffort,
    Abort,
}

impl FromStr for OnError {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best-effort" => Ok(OnError::BestEffort),
            "abort" => Ok(OnError::Abort),
            other => Err(format!(
                "unknown error policy `{}`, expected `best-effort` or `abort`",
                other
            )),
        }
    }
}

/// What a run does, with every name already resolved
pub enum Mode {
    Detect {
        report: ReportForm,
    },
    Convert {
        from: Charset,
        to: Charset,
        post_process: fn(String) -> String,
        on_error: OnError,
        output: PathBuf,
    },
}

impl Cli {
    /// Resolves the flags into a [`Mode`], failing on unknown or unusable encodings.
    ///
    /// Encodings are only looked at when converting.
    pub fn mode(&self) -> Result<Mode, EncodingError> {
        if self.charset_detect {
            return Ok(Mode::Detect {
                report: self.report,
            });
        }
        let post_process: fn(String) -> String = if self.fix_crlf { fix_crlf } else { identity };
        Ok(Mode::Convert {
            from: resolve_encoding(&self.from)?,
            to: check_target(resolve_encoding(&self.to)?)?,
            post_process,
            on_error: self.on_error,
            output: self.output.clone().unwrap_or_else(|| self.input.clone()),
        })
    }
}

pub fn parse_args() -> Cli {
    Cli::from_args()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{SHIFT_JIS, UTF_8};
    use rstest::rstest;

    fn cli(args: &[&str]) -> Cli {
        Cli::from_iter_safe(std::iter::once("midi-iconv").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let args = cli(&["--input", "song.mid"]);
        assert_eq!(args.input, PathBuf::from("song.mid"));
        assert_eq!(args.output, None);
        assert_eq!(args.from, "utf-8");
        assert_eq!(args.to, "utf-8");
        assert!(!args.fix_crlf);
        assert!(!args.charset_detect);
        assert_eq!(args.report, ReportForm::Summary);
        assert_eq!(args.on_error, OnError::BestEffort);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::from_iter_safe(["midi-iconv", "--from", "sjis"]).is_err());
    }

    #[rstest(
        flag, value,
        case("--report", "everything"),
        case("--on-error", "ignore"),
    )]
    fn rejects_unknown_choices(flag: &str, value: &str) {
        assert!(Cli::from_iter_safe(["midi-iconv", "-i", "song.mid", flag, value]).is_err());
    }

    #[test]
    fn output_defaults_to_input() {
        match cli(&["-i", "song.mid", "--from", "latin-1"]).mode().unwrap() {
            Mode::Convert {
                from, to, output, ..
            } => {
                assert_eq!(from, Charset::Latin1);
                assert_eq!(to, Charset::Whatwg(UTF_8));
                assert_eq!(output, PathBuf::from("song.mid"));
            }
            Mode::Detect { .. } => panic!("expected conversion"),
        }
    }

    #[test]
    fn full_conversion_flags() {
        let args = cli(&[
            "-i", "in.mid", "-o", "out.mid", "-f", "utf-8", "-t", "cp932", "--fix-crlf",
            "--on-error", "abort", "-vv",
        ]);
        assert_eq!(args.verbose, 2);
        match args.mode().unwrap() {
            Mode::Convert {
                to,
                post_process,
                on_error,
                output,
                ..
            } => {
                assert_eq!(to, Charset::Whatwg(SHIFT_JIS));
                assert_eq!(post_process("a\rb".to_string()), "a\r\nb");
                assert_eq!(on_error, OnError::Abort);
                assert_eq!(output, PathBuf::from("out.mid"));
            }
            Mode::Detect { .. } => panic!("expected conversion"),
        }
    }

    #[test]
    fn detection_ignores_encodings() {
        let args = cli(&[
            "-i",
            "song.mid",
            "--charset-detect",
            "--report",
            "events",
            "--to",
            "nope",
        ]);
        assert!(matches!(
            args.mode(),
            Ok(Mode::Detect {
                report: ReportForm::Events
            })
        ));
    }

    #[rstest(
        from, to, expect,
        case("nope", "utf-8", EncodingError::UnknownEncoding("nope".to_string())),
        case("utf-8", "nope", EncodingError::UnknownEncoding("nope".to_string())),
        case("utf-8", "utf-16le", EncodingError::UnsupportedTarget("UTF-16LE")),
    )]
    fn bad_encodings(from: &str, to: &str, expect: EncodingError) {
        let args = cli(&["-i", "song.mid", "--from", from, "--to", to]);
        assert_eq!(args.mode().err(), Some(expect));
    }
}
