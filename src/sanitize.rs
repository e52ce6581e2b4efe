//! Sanitization of server-provided text before it reaches the terminal.
//!
//! Everything the server sends is untrusted. Console lines are reduced to
//! printable text: escape sequences (CSI, OSC, DCS, ...) and control
//! characters are removed so a log line can never move the cursor, retitle
//! the window or otherwise drive the operator's terminal. ANSI-colored
//! nicknames are parsed into styled runs; only SGR colors and attributes
//! survive, and the raw escape bytes are never written out.

use ratatui::style::{Color, Modifier, Style};
use vte::{Params, Parser, Perform};

/// Strip escape sequences and control characters from a console line.
///
/// Tabs become single spaces, everything else non-printable is dropped.
pub fn console_text(raw: &str) -> String {
    let mut sink = PlainText {
        out: String::with_capacity(raw.len()),
    };
    let mut parser = Parser::new();
    for byte in raw.bytes() {
        parser.advance(&mut sink, byte);
    }
    sink.out
}

/// Parse text containing SGR escape sequences into styled runs.
///
/// Adjacent characters with the same style are merged. Non-SGR sequences and
/// control characters are dropped.
pub fn styled_runs(raw: &str) -> Vec<(String, Style)> {
    let mut sink = StyledText {
        runs: Vec::new(),
        style: Style::default(),
    };
    let mut parser = Parser::new();
    for byte in raw.bytes() {
        parser.advance(&mut sink, byte);
    }
    sink.runs
}

struct PlainText {
    out: String,
}

impl Perform for PlainText {
    fn print(&mut self, c: char) {
        if !c.is_control() {
            self.out.push(c);
        }
    }

    fn execute(&mut self, byte: u8) {
        if byte == b'\t' {
            self.out.push(' ');
        }
    }
}

struct StyledText {
    runs: Vec<(String, Style)>,
    style: Style,
}

impl Perform for StyledText {
    fn print(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        match self.runs.last_mut() {
            Some((text, style)) if *style == self.style => text.push(c),
            _ => self.runs.push((c.to_string(), self.style)),
        }
    }

    fn execute(&mut self, byte: u8) {
        if byte == b'\t' {
            self.print(' ');
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        if action != 'm' || ignore || !intermediates.is_empty() {
            return;
        }
        let values: Vec<u16> = params
            .iter()
            .map(|sub| sub.first().copied().unwrap_or(0))
            .collect();
        self.style = apply_sgr(self.style, &values);
    }
}

/// Apply one SGR parameter list to a style.
fn apply_sgr(mut style: Style, params: &[u16]) -> Style {
    if params.is_empty() {
        return Style::default();
    }

    let mut i = 0;
    while i < params.len() {
        match params[i] {
            0 => style = Style::default(),
            1 => style = style.add_modifier(Modifier::BOLD),
            3 => style = style.add_modifier(Modifier::ITALIC),
            4 => style = style.add_modifier(Modifier::UNDERLINED),
            22 => style = style.remove_modifier(Modifier::BOLD),
            23 => style = style.remove_modifier(Modifier::ITALIC),
            24 => style = style.remove_modifier(Modifier::UNDERLINED),
            n @ 30..=37 => style = style.fg(basic_color(n - 30)),
            39 => style.fg = None,
            n @ 40..=47 => style = style.bg(basic_color(n - 40)),
            49 => style.bg = None,
            n @ 90..=97 => style = style.fg(bright_color(n - 90)),
            n @ 100..=107 => style = style.bg(bright_color(n - 100)),
            38 | 48 => {
                let (color, consumed) = extended_color(&params[i + 1..]);
                if let Some(color) = color {
                    style = if params[i] == 38 {
                        style.fg(color)
                    } else {
                        style.bg(color)
                    };
                }
                i += consumed;
            }
            _ => {}
        }
        i += 1;
    }
    style
}

/// Decode `5;n` or `2;r;g;b`, returning the color and how many params it used.
fn extended_color(rest: &[u16]) -> (Option<Color>, usize) {
    match rest {
        [5, n, ..] => (u8::try_from(*n).ok().map(Color::Indexed), 2),
        [2, r, g, b, ..] => {
            let channel = |v: u16| u8::try_from(v).unwrap_or(u8::MAX);
            (Some(Color::Rgb(channel(*r), channel(*g), channel(*b))), 4)
        }
        _ => (None, rest.len()),
    }
}

fn basic_color(n: u16) -> Color {
    match n {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::Gray,
    }
}

fn bright_color(n: u16) -> Color {
    match n {
        0 => Color::DarkGray,
        1 => Color::LightRed,
        2 => Color::LightGreen,
        3 => Color::LightYellow,
        4 => Color::LightBlue,
        5 => Color::LightMagenta,
        6 => Color::LightCyan,
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(console_text("[INFO]: Done!"), "[INFO]: Done!");
    }

    #[test]
    fn color_sequences_are_removed() {
        assert_eq!(
            console_text("\x1b[33;1mWARN\x1b[0m] something"),
            "WARN] something"
        );
    }

    #[test]
    fn osc_title_sequence_is_removed() {
        assert_eq!(console_text("a\x1b]0;pwned\x07b"), "ab");
    }

    #[test]
    fn cursor_movement_is_removed() {
        assert_eq!(console_text("x\x1b[2J\x1b[Hy"), "xy");
    }

    #[test]
    fn control_characters_are_dropped_and_tabs_become_spaces() {
        assert_eq!(console_text("a\tb\rc\x07d\x08e"), "a bcde");
    }

    #[test]
    fn unicode_is_preserved() {
        assert_eq!(console_text("héllo → wörld"), "héllo → wörld");
    }

    #[test]
    fn styled_runs_split_on_color_change() {
        let runs = styled_runs("\x1b[31mRed\x1b[0mPlain");
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].0, "Red");
        assert_eq!(runs[0].1, Style::default().fg(Color::Red));
        assert_eq!(runs[1].0, "Plain");
        assert_eq!(runs[1].1, Style::default());
    }

    #[test]
    fn styled_runs_handle_bold_bright_and_indexed() {
        let runs = styled_runs("\x1b[1;92mA\x1b[38;5;208mB");
        assert_eq!(
            runs[0].1,
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD)
        );
        assert_eq!(
            runs[1].1,
            Style::default()
                .fg(Color::Indexed(208))
                .add_modifier(Modifier::BOLD)
        );
    }

    #[test]
    fn styled_runs_handle_truecolor() {
        let runs = styled_runs("\x1b[38;2;170;0;170mX");
        assert_eq!(runs[0].1.fg, Some(Color::Rgb(170, 0, 170)));
    }

    #[test]
    fn styled_runs_drop_non_sgr_sequences() {
        let runs = styled_runs("a\x1b[2Jb");
        assert_eq!(runs, vec![("ab".to_string(), Style::default())]);
    }

    #[test]
    fn styled_runs_of_plain_text_is_single_run() {
        let runs = styled_runs("Notch");
        assert_eq!(runs, vec![("Notch".to_string(), Style::default())]);
    }
}
