// src/style.rs
// =============================================================================
// Terminal decoration for everything we print.
//
// There is no global style state: a `Painter` is a tiny Copy value that knows
// whether colour is on, and `paint(style, text)` returns the decorated text.
// Colours come from the `owo-colors` crate.
//
// Margins are part of the layout, so they are applied even without colour:
//
//   "    -Created a branch in octocat/hello-world at ...!"
//   "        1a2b3c4: Fix typo (by octo@github.com)"
// =============================================================================

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use owo_colors::OwoColorize;

/// The handful of looks a piece of output can have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Leading marker of an event or error line
    Marker,
    /// Short sha in front of a commit line
    CommitId,
    /// The sentence itself
    Content,
    /// Status lines like "Fetching data for user: ..."
    Info,
    Error,
}

impl Style {
    fn margin(self) -> usize {
        match self {
            Style::Marker => 4,
            Style::CommitId => 8,
            Style::Content | Style::Info | Style::Error => 0,
        }
    }
}

/// --color flag values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Colour when stdout is a terminal and NO_COLOR is unset
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Painter { color }
    }

    /// No colour codes at all; what tests compare against
    pub fn plain() -> Self {
        Painter::new(false)
    }

    pub fn from_choice(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Always => Painter::new(true),
            ColorChoice::Never => Painter::plain(),
            ColorChoice::Auto => Painter::new(
                io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
            ),
        }
    }

    /// Decorates `text` with `style`
    pub fn paint(self, style: Style, text: &str) -> String {
        let body = if self.color {
            match style {
                Style::Marker | Style::CommitId => text.truecolor(220, 20, 60).bold().to_string(),
                Style::Content => text.truecolor(255, 215, 0).bold().to_string(),
                Style::Info => text.truecolor(50, 205, 50).bold().to_string(),
                Style::Error => text.truecolor(255, 0, 0).bold().italic().to_string(),
            }
        } else {
            text.to_string()
        };

        format!("{:width$}{}", "", body, width = style.margin())
    }

    /// "-" marker followed by the sentence
    pub fn event_line(self, sentence: &str) -> String {
        self.paint(Style::Marker, "-") + &self.paint(Style::Content, sentence)
    }

    pub fn commit_line(self, short_sha: &str, text: &str) -> String {
        self.paint(Style::CommitId, &format!("{}: ", short_sha)) + &self.paint(Style::Content, text)
    }

    /// Same layout as an event line, told apart by the "!" marker
    pub fn error_line(self, message: &str) -> String {
        self.paint(Style::Marker, "!") + &self.paint(Style::Error, message)
    }

    pub fn info_line(self, message: &str) -> String {
        self.paint(Style::Info, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_painter_only_adds_margins() {
        let p = Painter::plain();
        assert_eq!(p.event_line("Hello"), "    -Hello");
        assert_eq!(p.commit_line("abc1234", "msg"), "        abc1234: msg");
        assert_eq!(p.error_line("boom"), "    !boom");
        assert_eq!(p.info_line("Fetching"), "Fetching");
    }

    #[test]
    fn test_colored_painter_emits_escape_codes() {
        let p = Painter::new(true);
        let out = p.paint(Style::Content, "Hello");
        assert!(out.contains("Hello"));
        assert!(out.contains("\u{1b}["));
    }

    #[test]
    fn test_never_choice_disables_color() {
        assert_eq!(Painter::from_choice(ColorChoice::Never), Painter::plain());
        assert_eq!(Painter::from_choice(ColorChoice::Always), Painter::new(true));
    }
}
