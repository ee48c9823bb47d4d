//! Line filter that elides delimited diagnostic blocks from tool output.
//!
//! The filter sees one line at a time and never buffers: a line is either
//! forwarded immediately, dropped, or replaced by a single notice when a
//! suppressed block closes.

use serde::{Deserialize, Serialize};

/// Delimiters of one block to elide. Both are matched as line prefixes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterWindow {
    pub begin: String,
    pub end: String,
}

impl FilterWindow {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Passing,
    /// Inside the block opened by `windows[index]`.
    Suppressing(usize),
}

/// What to do with a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<'l> {
    Forward(&'l str),
    Drop,
    /// The block closed on this line; emit the notice instead of the line.
    Notice(String),
}

/// Notice emitted in place of an elided block.
pub fn excluded_notice(begin: &str) -> String {
    format!("'{begin}' has been excluded from output")
}

/// Strip one trailing `\n` or `\r\n`.
pub fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[derive(Debug, Clone)]
pub struct StreamFilter<'w> {
    windows: &'w [FilterWindow],
    state: FilterState,
}

impl<'w> StreamFilter<'w> {
    pub fn new(windows: &'w [FilterWindow]) -> Self {
        Self {
            windows,
            state: FilterState::Passing,
        }
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    /// Advance the state machine by one line.
    pub fn feed<'l>(&mut self, line: &'l str) -> Verdict<'l> {
        let line = strip_terminator(line);
        match self.state {
            FilterState::Passing => {
                match self
                    .windows
                    .iter()
                    .position(|w| line.starts_with(w.begin.as_str()))
                {
                    Some(index) => {
                        self.state = FilterState::Suppressing(index);
                        Verdict::Drop
                    }
                    None => Verdict::Forward(line),
                }
            }
            FilterState::Suppressing(index) => {
                let window = &self.windows[index];
                if line.starts_with(window.end.as_str()) {
                    self.state = FilterState::Passing;
                    Verdict::Notice(excluded_notice(&window.begin))
                } else {
                    Verdict::Drop
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(windows: &[FilterWindow], input: &[&str]) -> Vec<String> {
        let mut filter = StreamFilter::new(windows);
        input
            .iter()
            .filter_map(|line| match filter.feed(line) {
                Verdict::Forward(l) => Some(l.to_string()),
                Verdict::Notice(n) => Some(n),
                Verdict::Drop => None,
            })
            .collect()
    }

    fn window() -> Vec<FilterWindow> {
        vec![FilterWindow::new("<begin>", "<end>")]
    }

    #[test]
    fn passes_everything_without_begin_marker() {
        let input = ["first\n", "second\r\n", "", "<end> stray"];
        let output = run(&window(), &input);
        assert_eq!(output, vec!["first", "second", "", "<end> stray"]);
    }

    #[test]
    fn elides_block_and_emits_notice() {
        let input = [
            "x",
            "<begin>extra",
            "secret1",
            "secret2",
            "<end>markers",
            "y",
        ];
        let output = run(&window(), &input);
        assert_eq!(
            output,
            vec!["x", "'<begin>' has been excluded from output", "y"]
        );
    }

    #[test]
    fn unterminated_block_drops_the_rest() {
        let windows = window();
        let mut filter = StreamFilter::new(&windows);
        let output: Vec<_> = ["a", "<begin>", "b", "c"]
            .iter()
            .map(|l| filter.feed(l))
            .collect();
        assert_eq!(
            output,
            vec![Verdict::Forward("a"), Verdict::Drop, Verdict::Drop, Verdict::Drop]
        );
        assert_eq!(filter.state(), FilterState::Suppressing(0));
    }

    #[test]
    fn nested_begin_does_not_reset_window() {
        let input = ["<begin>", "<begin> again", "inner", "<end>", "after"];
        let output = run(&window(), &input);
        assert_eq!(
            output,
            vec!["'<begin>' has been excluded from output", "after"]
        );
    }

    #[test]
    fn marker_must_be_a_prefix() {
        let input = ["  <begin>", "text <begin>"];
        let output = run(&window(), &input);
        assert_eq!(output, vec!["  <begin>", "text <begin>"]);
    }

    #[test]
    fn later_block_is_elided_again() {
        let input = ["<begin>", "one", "<end>", "mid", "<begin>", "two", "<end>"];
        let output = run(&window(), &input);
        assert_eq!(
            output,
            vec![
                "'<begin>' has been excluded from output",
                "mid",
                "'<begin>' has been excluded from output",
            ]
        );
    }

    #[test]
    fn only_the_opening_window_end_closes_the_block() {
        let windows = vec![
            FilterWindow::new("Note:", "----"),
            FilterWindow::new("Warning:", "===="),
        ];
        let input = ["Warning: x", "----", "====", "Note: y", "====", "----", "z"];
        let output = run(&windows, &input);
        assert_eq!(
            output,
            vec![
                "'Warning:' has been excluded from output",
                "'Note:' has been excluded from output",
                "z",
            ]
        );
    }

    #[test]
    fn no_windows_is_identity() {
        let output = run(&[], &["a", "b"]);
        assert_eq!(output, vec!["a", "b"]);
    }
}
