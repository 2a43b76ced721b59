// ============================================================================
// kako-cli/src/prompt.rs
// ============================================================================
//
// PROMPT READER: Line-oriented Questions with Validated Answers
//
// `Prompter` wraps an input and an output stream. Each `read_*` method asks
// one question, reads exactly one line, and returns a `Validated<T>`: the
// parsed value or the `PromptError` explaining why the line was rejected.
// The outer `CliResult` is reserved for the stream itself failing or closing.
//
// The parsers are free functions so the accepted formats can be tested
// without any I/O.

use crate::error::{CliError, CliResult};
use crate::terminal;

use kako_core::{CropMargins, MAX_FRAME_RATE, Side, SourceFile};

use std::io::{BufRead, Write};
use thiserror::Error;

/// Why an answer was rejected. Always recovered by asking again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("Oopsie... '{0}' is not a whole number")]
    NotANumber(String),

    #[error("Oopsie... Please enter a valid number greater than 0")]
    NotPositive,

    #[error("Sorry... that number exceeds the maximum allowed limit of {0}")]
    ExceedsMaximum(u32),

    #[error("Oopsie... pixel counts cannot be negative")]
    Negative,

    #[error("Sorry... that's not a valid option...")]
    InvalidOption,

    #[error("Oopsie... expected 4 values (Top, Bottom, Right, Left) but got {0}")]
    WrongTokenCount(usize),

    #[error("Oopsie... I can't use that file... ({0})")]
    InvalidFile(String),
}

/// Outcome of validating one answer.
pub type Validated<T> = Result<T, PromptError>;

/// Entries of the crop preference menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropChoice {
    Single(Side),
    AllSides,
}

pub const CROP_MENU: &str = "[1] Top\n[2] Bottom\n[3] Right\n[4] Left\n[5] All Sides";

/// `y` or `yes` in any case; anything else is a no.
pub fn parse_yes(line: &str) -> bool {
    let answer = line.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

fn parse_integer(line: &str) -> Validated<i64> {
    let text = line.trim();
    text.parse::<i64>()
        .map_err(|_| PromptError::NotANumber(text.to_string()))
}

/// Frames per second in `1..=MAX_FRAME_RATE`.
pub fn parse_frame_rate(line: &str) -> Validated<u32> {
    let rate = parse_integer(line)?;
    if rate <= 0 {
        return Err(PromptError::NotPositive);
    }
    if rate > i64::from(MAX_FRAME_RATE) {
        return Err(PromptError::ExceedsMaximum(MAX_FRAME_RATE));
    }
    Ok(rate as u32)
}

/// A non-negative pixel count.
pub fn parse_pixels(line: &str) -> Validated<u32> {
    let value = parse_integer(line)?;
    if value < 0 {
        return Err(PromptError::Negative);
    }
    u32::try_from(value).map_err(|_| PromptError::ExceedsMaximum(u32::MAX))
}

pub fn parse_menu_choice(line: &str) -> Validated<CropChoice> {
    match parse_integer(line)? {
        1 => Ok(CropChoice::Single(Side::Top)),
        2 => Ok(CropChoice::Single(Side::Bottom)),
        3 => Ok(CropChoice::Single(Side::Right)),
        4 => Ok(CropChoice::Single(Side::Left)),
        5 => Ok(CropChoice::AllSides),
        _ => Err(PromptError::InvalidOption),
    }
}

/// Exactly four comma-separated pixel counts, read as Top, Bottom, Right, Left.
pub fn parse_margin_list(line: &str) -> Validated<CropMargins> {
    let tokens: Vec<&str> = line.trim().split(',').collect();
    if tokens.len() != 4 {
        return Err(PromptError::WrongTokenCount(tokens.len()));
    }

    let mut values = [0u32; 4];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        *slot = parse_pixels(token)?;
    }
    let [top, bottom, right, left] = values;
    Ok(CropMargins::new(top, bottom, right, left))
}

/// A line that names an existing, readable `.mp4` file.
pub fn parse_source_file(line: &str) -> Validated<SourceFile> {
    SourceFile::from_path(line.trim()).map_err(|e| PromptError::InvalidFile(e.to_string()))
}

/// Reads answers from `R` and writes questions and feedback to `W`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one line of output.
    pub fn say(&mut self, text: &str) -> CliResult<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Prints `question` on the current line and reads one answer line.
    ///
    /// Fails with [`CliError::InputClosed`] at end of input.
    pub fn ask(&mut self, question: &str) -> CliResult<String> {
        write!(self.output, "{}  ", terminal::question(question))?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(CliError::InputClosed);
        }
        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        log::debug!("Answer to {:?}: {:?}", question, answer);
        Ok(answer)
    }

    /// Asks `question` and validates the answer with `parse`.
    pub fn read_validated<T>(
        &mut self,
        question: &str,
        parse: impl FnOnce(&str) -> Validated<T>,
    ) -> CliResult<Validated<T>> {
        let line = self.ask(question)?;
        Ok(parse(&line))
    }

    /// Asks a yes/no question; only `y`/`yes` count as yes.
    pub fn read_yes(&mut self, question: &str) -> CliResult<bool> {
        let line = self.ask(question)?;
        Ok(parse_yes(&line))
    }

    pub fn read_source_file(&mut self, question: &str) -> CliResult<Validated<SourceFile>> {
        self.read_validated(question, parse_source_file)
    }

    pub fn read_frame_rate(&mut self, question: &str) -> CliResult<Validated<u32>> {
        self.read_validated(question, parse_frame_rate)
    }

    pub fn read_pixels(&mut self, question: &str) -> CliResult<Validated<u32>> {
        self.read_validated(question, parse_pixels)
    }

    pub fn read_menu_choice(&mut self, question: &str) -> CliResult<Validated<CropChoice>> {
        self.read_validated(question, parse_menu_choice)
    }

    pub fn read_margin_list(&mut self, question: &str) -> CliResult<Validated<CropMargins>> {
        self.read_validated(question, parse_margin_list)
    }

    /// Gives back the output sink, e.g. to inspect a transcript in tests.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn frame_rate_accepts_values_in_range() {
        assert_eq!(parse_frame_rate("30"), Ok(30));
        assert_eq!(parse_frame_rate(" 1 "), Ok(1));
        assert_eq!(parse_frame_rate("200"), Ok(200));
    }

    #[test]
    fn frame_rate_rejections() {
        assert_eq!(parse_frame_rate("0"), Err(PromptError::NotPositive));
        assert_eq!(parse_frame_rate("-3"), Err(PromptError::NotPositive));
        assert_eq!(parse_frame_rate("201"), Err(PromptError::ExceedsMaximum(200)));
        assert_eq!(
            parse_frame_rate("abc"),
            Err(PromptError::NotANumber("abc".to_string()))
        );
        assert!(matches!(parse_frame_rate("2.5"), Err(PromptError::NotANumber(_))));
        assert!(
            PromptError::ExceedsMaximum(200)
                .to_string()
                .contains("exceeds the maximum allowed limit of 200")
        );
    }

    #[test]
    fn margin_list_reads_top_bottom_right_left() {
        assert_eq!(
            parse_margin_list("10, 20, 5, 0"),
            Ok(CropMargins::new(10, 20, 5, 0))
        );
        assert_eq!(
            parse_margin_list("1,2,3,4"),
            Ok(CropMargins {
                top: 1,
                bottom: 2,
                right: 3,
                left: 4
            })
        );
    }

    #[test]
    fn margin_list_rejections() {
        assert_eq!(parse_margin_list("1,2,3"), Err(PromptError::WrongTokenCount(3)));
        assert_eq!(parse_margin_list("1,2,3,4,5"), Err(PromptError::WrongTokenCount(5)));
        assert_eq!(parse_margin_list(""), Err(PromptError::WrongTokenCount(1)));
        assert!(matches!(parse_margin_list("1,2,x,4"), Err(PromptError::NotANumber(_))));
        assert!(matches!(parse_margin_list("1,,3,4"), Err(PromptError::NotANumber(_))));
        assert_eq!(parse_margin_list("1,-2,3,4"), Err(PromptError::Negative));
    }

    #[test]
    fn menu_choices() {
        assert_eq!(parse_menu_choice("1"), Ok(CropChoice::Single(Side::Top)));
        assert_eq!(parse_menu_choice("4"), Ok(CropChoice::Single(Side::Left)));
        assert_eq!(parse_menu_choice("5"), Ok(CropChoice::AllSides));
        assert_eq!(parse_menu_choice("0"), Err(PromptError::InvalidOption));
        assert_eq!(parse_menu_choice("6"), Err(PromptError::InvalidOption));
        assert!(matches!(parse_menu_choice("top"), Err(PromptError::NotANumber(_))));
    }

    #[test]
    fn pixels_must_be_non_negative() {
        assert_eq!(parse_pixels("0"), Ok(0));
        assert_eq!(parse_pixels("140"), Ok(140));
        assert_eq!(parse_pixels("-1"), Err(PromptError::Negative));
    }

    #[test]
    fn yes_answers() {
        for yes in ["y", "Y", "yes", "YES", " Yes "] {
            assert!(parse_yes(yes), "{yes:?}");
        }
        for no in ["", "n", "no", "yep", "ye"] {
            assert!(!parse_yes(no), "{no:?}");
        }
    }

    #[test]
    fn prompter_reads_one_line_per_question() {
        let input = Cursor::new("30\nabc\ny\n");
        let mut prompter = Prompter::new(input, Vec::new());

        assert_eq!(prompter.read_frame_rate("Rate?").unwrap(), Ok(30));
        assert!(matches!(
            prompter.read_frame_rate("Rate?").unwrap(),
            Err(PromptError::NotANumber(_))
        ));
        assert!(prompter.read_yes("Sure?").unwrap());
        assert!(matches!(prompter.ask("More?"), Err(CliError::InputClosed)));

        let transcript = String::from_utf8(prompter.into_output()).unwrap();
        assert!(transcript.contains("Rate?"));
        assert!(transcript.contains("More?"));
    }

    #[test]
    fn prompter_strips_windows_line_endings() {
        let mut prompter = Prompter::new(Cursor::new("5\r\n"), Vec::new());
        assert_eq!(prompter.read_menu_choice("Pick").unwrap(), Ok(CropChoice::AllSides));
    }
}
