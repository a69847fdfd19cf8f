//! Screen layout.
//!
//! [`compose`] turns the REPL state into styled lines without touching the
//! terminal; [`paint`] writes those lines out.

use super::Repl;
use crate::clipboard::ClipboardSink;
use crate::terminal::renderer::TerminalRenderer;
use crate::time_input::TimeField;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, Write};
use tally_core::time_format::{format_date_prefix, format_timestamp};
use tally_core::{Clock, CounterId};
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Dim,
    Bold,
    Focus,
    Advisory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    fn push(mut self, text: impl Into<String>, style: Style) -> Self {
        self.spans.push(Span {
            text: text.into(),
            style,
        });
        self
    }

    fn plain(text: impl Into<String>) -> Self {
        Line::default().push(text, Style::Plain)
    }

    fn styled(text: impl Into<String>, style: Style) -> Self {
        Line::default().push(text, style)
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

const HELP: &[&str] = &[
    "Keys",
    "  +1      j f | k d | l s | ; a",
    "  -1      m v | , c | . x | / z",
    "  clear   u r | i e | o w | p q",
    "  clear all h g    undo b n",
    "  summary toggle   4 7 | 3 8 | 2 9 | 1 0",
    "  Enter copy summary    Ctrl+Y copy log",
    "  Ctrl+X reset log and counters",
    "  Ctrl+S start recording from now",
    "  Tab edit start time (arrows, digits, Enter applies)",
    "  ? close help    Esc quit",
];

fn counter_keys(id: CounterId) -> &'static str {
    match id {
        CounterId::Cold => "+j/f -m/v clear u/r",
        CounterId::Shock => "+k/d -,/c clear i/e",
        CounterId::Hot => "+l/s -./x clear o/w",
        CounterId::Herb => "+;/a -//z clear p/q",
    }
}

/// Lay out the whole screen for a terminal of `width` x `height`.
pub fn compose<C: Clock, K: ClipboardSink>(
    repl: &Repl<C, K>,
    width: u16,
    height: u16,
) -> Vec<Line> {
    let mut lines = vec![
        Line::styled("tally", Style::Bold).push("   ? help  Esc quit", Style::Dim),
        Line::default(),
    ];

    for id in CounterId::ALL {
        let mark = if repl.selection.contains(id) { "[x]" } else { "[ ]" };
        lines.push(
            Line::plain(format!("{mark} {} {} ", id.number(), id.symbol()))
                .push(format!("{:>5}", repl.session.value(id)), Style::Bold)
                .push(format!("   {}", counter_keys(id)), Style::Dim),
        );
    }

    lines.push(Line::default());
    lines.push(
        Line::plain("summary  ")
            .push(repl.summary(), Style::Bold)
            .push("   Enter: copy", Style::Dim),
    );
    lines.push(start_time_line(repl));

    let session = &repl.session;
    let origin = session
        .log()
        .origin()
        .map(|o| format_timestamp(&o))
        .unwrap_or_else(|| "not set".to_string());
    lines.push(Line::styled(
        format!(
            "origin {origin}   undo {}/{}   log {}",
            session.history().len(),
            session.history().capacity(),
            session.log().len()
        ),
        Style::Dim,
    ));
    lines.push(Line::default());

    // reserve the bottom line for advisories
    let body_rows = (height as usize).saturating_sub(lines.len() + 1);
    if repl.help_visible {
        lines.extend(HELP.iter().take(body_rows).map(|l| Line::plain(*l)));
    } else {
        let entries = session.log().lines();
        let skip = entries.len().saturating_sub(body_rows);
        lines.extend(entries.into_iter().skip(skip).map(Line::plain));
    }

    let filled = lines.len();
    lines.extend((filled..(height as usize).saturating_sub(1)).map(|_| Line::default()));
    lines.push(match repl.advisory() {
        Some(text) => Line::styled(text, Style::Advisory),
        None => Line::default(),
    });

    lines.truncate(height as usize);
    lines
        .into_iter()
        .map(|line| fit(line, width as usize))
        .collect()
}

fn start_time_line<C: Clock, K: ClipboardSink>(repl: &Repl<C, K>) -> Line {
    let today = repl.session.clock().now();
    let mut line = Line::plain("start    ").push(format_date_prefix(&today), Style::Plain);
    for (i, field) in TimeField::ALL.into_iter().enumerate() {
        if i > 0 {
            line = line.push(":", Style::Plain);
        }
        let text = format!("{:0>2}", repl.time_input.text(field));
        let style = if repl.editing_time && repl.time_input.focus() == field {
            Style::Focus
        } else {
            Style::Plain
        };
        line = line.push(text, style);
    }
    let hint = if repl.editing_time {
        "   arrows/digits, Enter: apply, Esc: cancel"
    } else {
        "   Tab: edit"
    };
    line.push(hint, Style::Dim)
}

/// Cut a line to at most `width` terminal columns.
fn fit(line: Line, width: usize) -> Line {
    let mut used = 0;
    let mut out = Line::default();
    for span in line.spans {
        let mut text = String::new();
        for ch in span.text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            text.push(ch);
        }
        let full = text.len() == span.text.len();
        out.spans.push(Span {
            text,
            style: span.style,
        });
        if !full {
            break;
        }
    }
    out
}

/// Draw `lines` into the renderer's current frame, one row each.
pub fn paint<W: Write>(renderer: &mut TerminalRenderer<W>, lines: &[Line]) -> io::Result<()> {
    for line in lines {
        renderer.start_row()?;
        for span in &line.spans {
            match span.style {
                Style::Plain => queue!(renderer, Print(&span.text))?,
                Style::Dim => queue!(
                    renderer,
                    SetForegroundColor(Color::DarkGrey),
                    Print(&span.text),
                    ResetColor
                )?,
                Style::Bold => queue!(
                    renderer,
                    SetAttribute(Attribute::Bold),
                    Print(&span.text),
                    SetAttribute(Attribute::Reset)
                )?,
                Style::Focus => queue!(
                    renderer,
                    SetAttribute(Attribute::Reverse),
                    Print(&span.text),
                    SetAttribute(Attribute::Reset)
                )?,
                Style::Advisory => queue!(
                    renderer,
                    SetForegroundColor(Color::Yellow),
                    Print(&span.text),
                    ResetColor
                )?,
            }
        }
    }
    Ok(())
}
