// ============================================================================
// kako-cli/src/session.rs
// ============================================================================
//
// INTERACTIVE SESSION: The Extract-then-Crop Conversation
//
// A `Session` walks the user through one run:
//
//   banner → source file → frame rate → extraction → "crop too?"
//          → margins → test crop → confirm (or pick new margins) → final crop
//
// Every question is re-asked until the answer validates and is confirmed.
// Failures of the core library end the run; rejected answers never do.

use crate::error::{CliError, CliResult};
use crate::prompt::{CROP_MENU, CropChoice, Prompter, Validated};
use crate::terminal;

use kako_core::config::CROP_DIR_NAME;
use kako_core::{
    CropMargins, CropMode, FfmpegSpawner, OutputLayout, Side, SourceFile, crop_images,
    extract_frames,
};

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

const CONFIRM_QUESTION: &str = "Ready to proceed? (y/Yes)";

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub source: PathBuf,
    pub frames_dir: PathBuf,
    pub extracted: usize,
    /// `None` when the user declined cropping.
    pub cropped: Option<usize>,
}

/// One interactive run against a resolved ffmpeg binary.
pub struct Session<'a, R, W, S> {
    prompter: Prompter<R, W>,
    spawner: &'a S,
    decoder: &'a Path,
}

impl<'a, R: BufRead, W: Write, S: FfmpegSpawner> Session<'a, R, W, S> {
    pub fn new(input: R, output: W, spawner: &'a S, decoder: &'a Path) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            spawner,
            decoder,
        }
    }

    pub fn run(&mut self) -> CliResult<RunSummary> {
        self.prompter.say(&terminal::banner())?;
        self.prompter.say("Welcome to Kako!")?;

        let source = self.file_prompt()?;
        let frame_rate = self.frame_rate_prompt()?;
        let layout = OutputLayout::for_source(&source);

        self.prompter.say("\nHold tight... Extracting images...")?;
        log::info!(
            "Extracting {} at {} fps into {}",
            source.path.display(),
            frame_rate,
            layout.frames_dir.display()
        );
        let extracted = extract_frames(
            self.spawner,
            self.decoder,
            f64::from(frame_rate),
            &layout.frames_dir,
            &source.path,
        )?;
        self.prompter.say(&terminal::success(&format!(
            "Success! {extracted} images have been extracted!\n"
        )))?;

        let mut summary = RunSummary {
            source: source.path.clone(),
            frames_dir: layout.frames_dir.clone(),
            extracted,
            cropped: None,
        };

        if !self
            .prompter
            .read_yes("Do you also need these images cropped? (y/Yes)")?
        {
            self.prompter.say("\nOkie dokie! See you later!\n")?;
            return Ok(summary);
        }

        let margins = self.crop_prompt()?;
        let cropped = self.run_crop(margins, &layout.frames_dir)?;
        self.prompter.say(&terminal::success(&format!(
            "Success! {cropped} images have been cropped!\n"
        )))?;
        self.prompter
            .say("Thank you for using Kako, see you next time!")?;

        summary.cropped = Some(cropped);
        Ok(summary)
    }

    /// Asks until a readable `.mp4` is named and confirmed.
    pub fn file_prompt(&mut self) -> CliResult<SourceFile> {
        loop {
            match self
                .prompter
                .read_source_file("\nWhat MP4 file are we working with today?")?
            {
                Ok(source) => {
                    log::debug!("Source file: {}", source.describe());
                    self.prompter
                        .say(&terminal::result(&format!("{} found!\n", source.file_name)))?;
                    if self.confirm()? {
                        return Ok(source);
                    }
                }
                Err(e) => self.reject(&e.to_string())?,
            }
        }
    }

    /// Asks until a frame rate in range is given and confirmed.
    pub fn frame_rate_prompt(&mut self) -> CliResult<u32> {
        loop {
            match self.prompter.read_frame_rate(
                "\nPlease enter your desired frame rate at which to extract images from the MP4 file:",
            )? {
                Ok(rate) => {
                    self.prompter.say(&terminal::result(&format!(
                        "I will extract {rate} image(s) every second of video time\n"
                    )))?;
                    if self.confirm()? {
                        return Ok(rate);
                    }
                }
                Err(e) => self.reject(&e.to_string())?,
            }
        }
    }

    /// Shows the crop menu until confirmed margins are chosen.
    pub fn crop_prompt(&mut self) -> CliResult<CropMargins> {
        loop {
            self.prompter
                .say("\nPlease select an option based on your cropping preference:")?;
            self.prompter.say(CROP_MENU)?;

            let margins = match self.prompter.read_menu_choice(">")? {
                Ok(CropChoice::Single(side)) => self.single_side_margins(side)?,
                Ok(CropChoice::AllSides) => self.all_side_margins()?,
                Err(e) => Err(e),
            };

            match margins {
                Ok(margins) => {
                    if self.confirm()? {
                        log::debug!("Crop margins: {}", margins.describe());
                        return Ok(margins);
                    }
                }
                Err(e) => self.reject(&e.to_string())?,
            }
        }
    }

    fn single_side_margins(&mut self, side: Side) -> CliResult<Validated<CropMargins>> {
        let question = format!("\nHow many pixels do you want REMOVED from the {}?", side.name());
        let pixels = match self.prompter.read_pixels(&question)? {
            Ok(pixels) => pixels,
            Err(e) => return Ok(Err(e)),
        };

        let place = match side {
            Side::Top | Side::Bottom => format!("the {}", side.label()),
            Side::Right | Side::Left => format!("the {} side", side.label()),
        };
        self.prompter.say(&terminal::result(&format!(
            "I will remove {pixels} pixels from {place} of each image\n"
        )))?;
        Ok(Ok(CropMargins::only(side, pixels)))
    }

    fn all_side_margins(&mut self) -> CliResult<Validated<CropMargins>> {
        self.prompter
            .say("\nPlease enter the cropped dimensions as: Top, Bottom, Right, Left")?;
        self.prompter
            .say("This is the number of pixels you want REMOVED from each side")?;
        self.prompter.say("(Enter '0' to keep the side unchanged)")?;

        let margins = match self.prompter.read_margin_list(">")? {
            Ok(margins) => margins,
            Err(e) => return Ok(Err(e)),
        };

        self.prompter
            .say(&terminal::result("I will remove pixels from each image accordingly:"))?;
        for (side, pixels) in [
            (Side::Top, margins.top),
            (Side::Bottom, margins.bottom),
            (Side::Right, margins.right),
            (Side::Left, margins.left),
        ] {
            self.prompter
                .say(&terminal::result(&format!("{}: {}", side.name(), pixels)))?;
        }
        self.prompter.say("")?;
        Ok(Ok(margins))
    }

    /// Crops one preview, then either commits to the whole directory or
    /// returns to the margin menu. Returns the number of cropped images.
    pub fn run_crop(&mut self, mut margins: CropMargins, frames_dir: &Path) -> CliResult<usize> {
        loop {
            self.prompter
                .say("\n> Let's run a quick test to confirm...")?;

            let preview = crop_images(margins, frames_dir, CropMode::Test)?;
            let Some(preview_path) = preview.first() else {
                return Err(CliError::NothingToCrop(frames_dir.to_path_buf()));
            };
            log::info!("Test crop written to {}", preview_path.display());
            self.prompter.say(&format!(
                "\nCheck the image in the /{CROP_DIR_NAME}/Test folder ({})\n",
                preview_path.display()
            ))?;

            if self.prompter.read_yes("Is this good to go? (y/Yes)")? {
                self.prompter.say("\nHold tight... Cropping images...")?;
                let report = crop_images(margins, frames_dir, CropMode::Final)?;
                return Ok(report.count());
            }
            margins = self.crop_prompt()?;
        }
    }

    fn confirm(&mut self) -> CliResult<bool> {
        self.prompter.read_yes(CONFIRM_QUESTION)
    }

    fn reject(&mut self, message: &str) -> CliResult<()> {
        log::debug!("Rejected answer: {}", message);
        self.prompter.say(&terminal::warning(message))
    }

    /// Gives back the output sink.
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kako_core::external::mocks::MockFfmpegSpawner;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbImage::from_pixel(width, height, image::Rgb([40, 80, 120]))
            .save(path)
            .unwrap();
    }

    /// A source video plus frames already sitting in the output directory,
    /// standing in for what ffmpeg would have written.
    fn fixture(frames: usize) -> (TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        fs::write(&video, b"not really a video").unwrap();
        let frames_dir = dir.path().join("Kako");
        fs::create_dir_all(&frames_dir).unwrap();
        for i in 1..=frames {
            write_png(&frames_dir.join(format!("frame_{i:06}.png")), 100, 100);
        }
        (dir, video, frames_dir)
    }

    fn run_session(input: &str, spawner: &MockFfmpegSpawner) -> (CliResult<RunSummary>, String) {
        let mut session = Session::new(
            Cursor::new(input.to_string()),
            Vec::new(),
            spawner,
            Path::new("/opt/ffmpeg"),
        );
        let result = session.run();
        let transcript = String::from_utf8(session.into_output()).unwrap();
        (result, transcript)
    }

    #[test]
    fn declining_cropping_ends_the_run() {
        let (_dir, video, frames_dir) = fixture(3);
        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("fps=30", &[]);

        let input = format!("{}\ny\n30\ny\nn\n", video.display());
        let (result, transcript) = run_session(&input, &spawner);

        let summary = result.unwrap();
        assert_eq!(summary.extracted, 3);
        assert_eq!(summary.cropped, None);
        assert_eq!(summary.frames_dir, frames_dir);
        assert!(transcript.contains("clip.mp4 found!"));
        assert!(transcript.contains("3 images have been extracted"));
        assert!(transcript.contains("See you later"));
        assert!(!frames_dir.join("Crop").exists());
    }

    #[test]
    fn full_run_with_all_side_margins() {
        let (_dir, video, frames_dir) = fixture(3);
        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("fps=12", &[]);

        let input = format!("{}\ny\n12\ny\ny\n5\n10, 10, 10, 10\ny\ny\n", video.display());
        let (result, transcript) = run_session(&input, &spawner);

        let summary = result.unwrap();
        assert_eq!(summary.cropped, Some(3));
        assert!(transcript.contains("3 images have been cropped"));
        assert!(transcript.contains("Thank you for using Kako"));

        let crop_dir = frames_dir.join("Crop");
        for i in 1..=3 {
            let out = crop_dir.join(format!("cropped_frame_{i:06}.jpg"));
            let img = image::open(&out).unwrap();
            assert_eq!((img.width(), img.height()), (80, 80));
        }
        assert!(
            crop_dir
                .join("Test")
                .join("crop_test_frame_000001.jpg")
                .is_file()
        );
    }

    #[test]
    fn invalid_answers_are_asked_again() {
        let (_dir, video, _frames_dir) = fixture(1);
        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("fps=24", &[]);

        let input = format!(
            "missing.mp4\n{}\nn\n{}\ny\nabc\n0\n201\n24\ny\ny\n9\n1\n-4\n1\n6\ny\ny\n",
            video.display(),
            video.display()
        );
        let (result, transcript) = run_session(&input, &spawner);

        assert_eq!(result.unwrap().cropped, Some(1));
        assert!(transcript.contains("I can't use that file"));
        assert!(transcript.contains("not a whole number"));
        assert!(transcript.contains("greater than 0"));
        assert!(transcript.contains("maximum allowed limit of 200"));
        assert!(transcript.contains("not a valid option"));
        assert!(transcript.contains("cannot be negative"));
        assert!(transcript.contains("remove 6 pixels from the top"));
    }

    #[test]
    fn rejecting_the_preview_returns_to_the_menu() {
        let (_dir, video, frames_dir) = fixture(2);
        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("fps=1", &[]);

        // First preview at Top 50 is rejected, second at Left 25 is accepted.
        let input = format!("{}\ny\n1\ny\ny\n1\n50\ny\nn\n4\n25\ny\ny\n", video.display());
        let (result, transcript) = run_session(&input, &spawner);

        assert_eq!(result.unwrap().cropped, Some(2));
        assert_eq!(transcript.matches("quick test to confirm").count(), 2);

        let img = image::open(frames_dir.join("Crop").join("cropped_frame_000002.jpg")).unwrap();
        assert_eq!((img.width(), img.height()), (75, 100));
    }

    #[test]
    fn oversized_margins_abort_the_run() {
        let (_dir, video, _frames_dir) = fixture(1);
        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("fps=5", &[]);

        let input = format!("{}\ny\n5\ny\ny\n3\n100\ny\n", video.display());
        let (result, _) = run_session(&input, &spawner);

        assert!(matches!(
            result,
            Err(CliError::Core(kako_core::CoreError::InvalidCrop { .. }))
        ));
    }

    #[test]
    fn empty_frames_dir_has_nothing_to_crop() {
        let (_dir, video, _frames_dir) = fixture(0);
        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("fps=5", &[]);

        let input = format!("{}\ny\n5\ny\ny\n1\n5\ny\n", video.display());
        let (result, _) = run_session(&input, &spawner);

        assert!(matches!(result, Err(CliError::NothingToCrop(_))));
    }

    #[test]
    fn extraction_failure_is_fatal() {
        let (_dir, video, _frames_dir) = fixture(0);
        let spawner = MockFfmpegSpawner::new();
        spawner.add_exit_error_expectation("fps=30", Vec::new(), 1);

        let input = format!("{}\ny\n30\ny\n", video.display());
        let (result, _) = run_session(&input, &spawner);

        assert!(matches!(
            result,
            Err(CliError::Core(kako_core::CoreError::DecodeFailed(_)))
        ));
    }

    #[test]
    fn closed_input_ends_the_run() {
        let spawner = MockFfmpegSpawner::new();
        let (result, transcript) = run_session("", &spawner);

        assert!(matches!(result, Err(CliError::InputClosed)));
        assert!(transcript.contains("Welcome to Kako!"));
        assert!(spawner.get_received_calls().is_empty());
    }
}
