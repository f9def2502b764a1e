use crate::search::runner::FeedOutcome;
use std::io::{self, Write};

/// Writes every successful match as a `Field:\nContent` block.
///
/// Failed outcomes are skipped here; the runner has already logged them.
/// Returns the number of matches written.
pub fn write_results<W: Write>(writer: &mut W, outcomes: &[FeedOutcome]) -> io::Result<usize> {
    let mut written = 0;

    for outcome in outcomes {
        let Ok(results) = &outcome.result else {
            continue;
        };
        for result in results {
            write!(writer, "{}:\n{}\n\n", result.field, result.content)?;
            written += 1;
        }
    }

    writer.flush()?;
    Ok(written)
}
