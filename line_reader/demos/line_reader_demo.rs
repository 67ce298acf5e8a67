// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Interactive demo. Run with `cargo run --example line_reader_demo [-- --vi]`.
//! Debug logs go to `line_reader_debug.log` in the current folder.

use std::str::FromStr;

use miette::IntoDiagnostic;
use r3bl_line_reader::{LineReader, LineReaderOption, ReadlineEvent, StringsCompleter,
                       TracingConfig, try_initialize_logging_global, variable_names};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::level_filters::LevelFilter;

#[derive(Debug, PartialEq, EnumString, EnumIter, Display)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
enum Command {
    Help,
    History,
    Widgets,
    Exit,
}

fn help() -> String {
    let commands = Command::iter().map(|it| it.to_string()).collect::<Vec<_>>();
    format!("commands: {}. Tab completes, Ctrl-D on an empty line quits.", commands.join(", "))
}

fn main() -> miette::Result<()> {
    try_initialize_logging_global(TracingConfig::new_file(None, LevelFilter::DEBUG))?;

    let editing_mode = if std::env::args().any(|arg| arg == "--vi") { "vi" } else { "emacs" };
    let commands = Command::iter().map(|it| it.to_string()).collect::<Vec<_>>();
    let mut reader = LineReader::builder()
        .set_completer(StringsCompleter::new(&commands))
        .set_variable(variable_names::EDITING_MODE, editing_mode)
        .set_option(LineReaderOption::HistoryIgnoreDups, true)
        .build_for_terminal()
        .into_diagnostic()?;

    // Raw mode is on while the reader lives, so lines end in "\r\n".
    print!("{}\r\n", help());
    loop {
        match reader
            .read_line(Some("%N> "), None, None, None)
            .into_diagnostic()?
        {
            ReadlineEvent::Line(line) => match Command::from_str(line.trim()) {
                Ok(Command::Help) => print!("{}\r\n", help()),
                Ok(Command::History) => {
                    let history = reader.history();
                    for index in 0..history.len() {
                        print!("{index:>4}  {}\r\n", history.get(index).unwrap_or_default());
                    }
                }
                Ok(Command::Widgets) => {
                    let names = LineReader::builtin_widgets()
                        .map(|it| it.to_string())
                        .collect::<Vec<_>>();
                    print!("{} built-in widgets\r\n", names.len());
                }
                Ok(Command::Exit) => break,
                Err(_) => print!("unknown command: {line:?}\r\n"),
            },
            ReadlineEvent::Interrupted { partial_line } => {
                print!("^C (dropped {partial_line:?})\r\n");
            }
            ReadlineEvent::Eof => break,
        }
    }
    Ok(())
}
