//! Line-oriented interactive search

use crate::engine::SearchEngine;
use crate::output::{stdout, write_results, write_suggestions_compact};
use crate::query::parser::parse_query;
use std::io::{self, BufRead, Write};
use termcolor::{Color, ColorSpec, WriteColor};
use tracing::debug;

const PROMPT: &str = "Search> ";
const SUGGESTIONS_PREFIX: &str = "suggestions:";
/// Items shown per suggestion list
const SUGGESTIONS_SHOWN: usize = 5;

const HELP: &str = "\
Commands:
  <text>                 - Search for text
  author:<name>          - Search by author (author:\"Alonzo Church\")
  year:<start>-<end>     - Search by year range (year:1936, year:1970-)
  category:<name>        - Filter by category
  access:<type>          - Filter by access type (OA, AP, PD, IR, AR)
  op:and|op:or           - Require all words or any word
  suggestions:<partial>  - Get suggestions
  help                   - Show this help
  quit                   - Leave interactive mode";

/// What to do with one input line
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Help,
    Suggest(&'a str),
    Search(&'a str),
    Empty,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        match line.to_ascii_lowercase().as_str() {
            "quit" | "exit" | "q" => return Command::Quit,
            "help" | "h" => return Command::Help,
            _ => {}
        }

        match line.get(..SUGGESTIONS_PREFIX.len()) {
            Some(head) if head.eq_ignore_ascii_case(SUGGESTIONS_PREFIX) => {
                Command::Suggest(line[SUGGESTIONS_PREFIX.len()..].trim())
            }
            _ => Command::Search(line),
        }
    }
}

/// Run interactive mode on the terminal
pub fn run(engine: &SearchEngine, color: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = stdout(color);
    run_session(engine, stdin.lock(), &mut out)
}

/// Read commands from `input` until EOF or a quit command
pub fn run_session<R: BufRead, W: WriteColor>(
    engine: &SearchEngine,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Interactive Search Mode")?;
    writeln!(out, "Type 'quit' to exit, 'help' for commands")?;

    let mut lines = input.lines();
    loop {
        write!(out, "\n{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        match Command::parse(&line) {
            Command::Quit => break,
            Command::Empty => continue,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Suggest(partial) => {
                let suggestions = engine.suggest(partial);
                if suggestions.is_empty() {
                    writeln!(out, "No suggestions for {partial:?}")?;
                } else {
                    write_suggestions_compact(out, &suggestions, SUGGESTIONS_SHOWN)?;
                }
            }
            Command::Search(text) => match parse_query(text) {
                Ok(query) => {
                    let query = query.with_limit(engine.config().interactive_max_results);
                    debug!(?query, "interactive query");
                    let results = engine.search(&query);
                    write_results(out, &results, true)?;
                }
                Err(e) => {
                    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                    writeln!(out, "Invalid query: {e}")?;
                    out.reset()?;
                }
            },
        }
    }

    Ok(())
}
