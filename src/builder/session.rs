use super::command::{self, SessionCommand, HELP};
use super::FilmBuilder;
use crate::error::{CompatError, Result};
use crate::report::browser;
use std::io::{BufRead, Write};

/// Reads commands line by line and re-renders the panel after each change.
/// Bad input is reported and the session carries on; EOF or `quit` ends it.
pub fn run<R: BufRead, W: Write>(
    builder: &mut FilmBuilder<'_>,
    input: R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "{}", builder.panel())?;
    writeln!(output, "type `help` for commands")?;

    for line in input.lines() {
        let line = line?;
        let parsed = match command::parse(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };
        tracing::debug!(command = ?parsed, "session command");
        if !dispatch(builder, parsed, output)? {
            break;
        }
    }
    Ok(())
}

/// Applies one command. Returns `false` when the session should end.
fn dispatch<W: Write>(
    builder: &mut FilmBuilder<'_>,
    parsed: SessionCommand,
    output: &mut W,
) -> Result<bool> {
    match parsed {
        SessionCommand::Add(tags) => {
            let change = builder.add(tags.as_slice());
            for tag in &change.unknown {
                writeln!(output, "unknown tag: {tag}")?;
            }
            if !change.changed.is_empty() {
                writeln!(output, "{}", builder.panel())?;
            }
        }
        SessionCommand::Remove(tags) => {
            let change = builder.remove(tags.as_slice());
            for tag in &change.unknown {
                writeln!(output, "not selected: {tag}")?;
            }
            if !change.changed.is_empty() {
                writeln!(output, "{}", builder.panel())?;
            }
        }
        SessionCommand::Clear => {
            if builder.clear() > 0 {
                writeln!(output, "{}", builder.panel())?;
            }
        }
        SessionCommand::Show => writeln!(output, "{}", builder.panel())?,
        SessionCommand::Mode(mode) => {
            builder.set_mode(mode);
            writeln!(output, "{}", builder.panel())?;
        }
        SessionCommand::Filter(query) => {
            builder.set_query(query);
            writeln!(output, "{}", builder.panel())?;
        }
        SessionCommand::Unlocked(unlocked_only) => {
            builder.set_unlocked_only(unlocked_only);
            writeln!(output, "{}", builder.panel())?;
        }
        SessionCommand::Top(limit) => {
            builder.set_limit(limit);
            writeln!(output, "{}", builder.panel())?;
        }
        SessionCommand::Related(tag) => match browser::related_table(builder.data(), &tag) {
            Ok(table) => writeln!(output, "{table}")?,
            Err(CompatError::UnknownTag(tag)) => writeln!(output, "unknown tag: {tag}")?,
            Err(other) => return Err(other),
        },
        SessionCommand::Help => write!(output, "{HELP}")?,
        SessionCommand::Quit => return Ok(false),
    }
    Ok(true)
}
