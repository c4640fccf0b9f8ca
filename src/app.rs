use crate::charset::{detect, summarize, ChardetngDetector};
use crate::cmdline::{Cli, Mode, OnError, ReportForm};
use crate::iconv::convert;
use crate::report::{event_reports, SummaryReport};
use crate::sequence::{parse_sequence, read_midi_file, save_sequence};
use anyhow::{Context, Result};
use midly::Arena;
use std::io::Write;
use tracing::{error, info};

/// Loads the input file, then either reports its likely charsets to `out` or converts its text
/// and saves the result.
pub fn run<W: Write>(args: &Cli, out: &mut W) -> Result<()> {
    let mode = args.mode()?;
    let data = read_midi_file(&args.input)?;
    let arena = Arena::new();
    let mut smf = parse_sequence(&data, &args.input)?;

    match mode {
        Mode::Detect { report } => {
            let fields = detect(&smf, &ChardetngDetector);
            info!("examined {} text fields", fields.len());
            match report {
                ReportForm::Summary => writeln!(out, "{}", SummaryReport(&summarize(&fields)))?,
                ReportForm::Events => {
                    for line in event_reports(&fields) {
                        writeln!(out, "{}", line)?;
                    }
                }
            }
        }
        Mode::Convert {
            from,
            to,
            post_process,
            on_error,
            output,
        } => {
            match convert(&mut smf, &arena, from, to, post_process) {
                Ok(replaced) => info!(
                    "replaced {} text fields converting from {} to {}",
                    replaced,
                    from.name(),
                    to.name()
                ),
                Err(err) => match on_error {
                    OnError::Abort => {
                        return Err(err)
                            .with_context(|| format!("{} left untouched", output.display()));
                    }
                    OnError::BestEffort => {
                        error!("{}, saving the fields converted so far", err)
                    }
                },
            }
            save_sequence(&smf, &output)?;
            info!("saved {}", output.display());
        }
    }
    Ok(())
}
