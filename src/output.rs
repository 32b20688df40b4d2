//! Output formatting for search results and suggestions

use crate::index::types::SearchResult;
use crate::query::suggest::Suggestions;
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Standard output, colored only when `color` is set and stdout is a terminal
pub fn stdout(color: bool) -> StandardStream {
    let choice = if color && io::IsTerminal::is_terminal(&io::stdout()) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Year as displayed, `n.d.` when undated
pub fn format_year(year: Option<i32>) -> String {
    year.map_or_else(|| "n.d.".to_string(), |y| y.to_string())
}

/// Write ranked results as numbered entries
pub fn write_results<W: WriteColor>(
    out: &mut W,
    results: &[SearchResult],
    show_scores: bool,
) -> io::Result<()> {
    if results.is_empty() {
        writeln!(out, "No papers found matching your search criteria.")?;
        return Ok(());
    }

    writeln!(out, "Found {} papers:", results.len())?;
    writeln!(out)?;

    for (i, result) in results.iter().enumerate() {
        write!(out, "{}. ", i + 1)?;
        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "{}", result.title)?;
        out.reset()?;
        writeln!(out, " ({})", format_year(result.year))?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        writeln!(out, "   {}", result.author)?;
        out.reset()?;

        let access = result.access_type.map_or("Unknown", |a| a.code());
        writeln!(out, "   Category: {} | Access: {}", result.category, access)?;

        if !result.local_path.is_empty() {
            writeln!(out, "   File: {}", result.local_path)?;
        }
        if !result.url.is_empty() {
            writeln!(out, "   URL: {}", result.url)?;
        }

        if show_scores && result.score > 0.0 {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            writeln!(out, "   Score: {:.2}", result.score)?;
            out.reset()?;
        }

        if !result.matches.is_empty() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            writeln!(out, "   Matches: {}", result.matches.join(", "))?;
            out.reset()?;
        }

        writeln!(out)?;
    }

    Ok(())
}

/// Write every non-empty suggestion list, one item per line
pub fn write_suggestions<W: WriteColor>(out: &mut W, suggestions: &Suggestions) -> io::Result<()> {
    writeln!(out, "Search suggestions:")?;

    for (label, items) in suggestions.sections() {
        if items.is_empty() {
            continue;
        }
        writeln!(out)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        writeln!(out, "{label}:")?;
        out.reset()?;
        for item in items {
            writeln!(out, "  - {item}")?;
        }
    }

    Ok(())
}

/// Write each non-empty suggestion list on a single line, at most `limit` items
pub fn write_suggestions_compact<W: WriteColor>(
    out: &mut W,
    suggestions: &Suggestions,
    limit: usize,
) -> io::Result<()> {
    for (label, items) in suggestions.sections() {
        if items.is_empty() {
            continue;
        }
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{label}:")?;
        out.reset()?;
        let shown: Vec<&str> = items.iter().take(limit).map(String::as_str).collect();
        writeln!(out, " {}", shown.join(", "))?;
    }
    Ok(())
}

/// Write a value as pretty-printed JSON followed by a newline
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
