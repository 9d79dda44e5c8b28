//! Interactive review of a single practice item

use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::error::Result;
use super::player::AudioPlayer;
use super::prompt::Prompter;
use crate::practice::algorithm::format_duration;
use crate::practice::{Modality, PracticeInfo};
use crate::words::WordRecord;

const LEVEL_UP_QUESTION: &str = "'y' to level up, 'n' to keep";

/// Runs the review of one item and reports whether it leveled up
pub trait Reviewer {
    /// Called before each review with the item's score
    fn announce(&mut self, _info: &PracticeInfo) -> Result<()> {
        Ok(())
    }

    fn review(&mut self, modality: Modality, word: &WordRecord) -> Result<bool>;
}

/// Reviewer that talks to the user through a [`Prompter`]
pub struct InteractiveReviewer<R, W, P> {
    prompter: Prompter<R, W>,
    player: P,
    audio_dir: PathBuf,
    audio_extension: String,
    replays: u32,
}

impl<R: BufRead, W: Write, P: AudioPlayer> InteractiveReviewer<R, W, P> {
    pub fn new(
        prompter: Prompter<R, W>,
        player: P,
        audio_dir: impl Into<PathBuf>,
        audio_extension: impl Into<String>,
        replays: u32,
    ) -> Self {
        Self {
            prompter,
            player,
            audio_dir: audio_dir.into(),
            audio_extension: audio_extension.into(),
            replays,
        }
    }

    pub fn into_inner(self) -> (Prompter<R, W>, P) {
        (self.prompter, self.player)
    }

    /// Recording for a word: `<audio_dir>/<text>.<ext>`
    pub fn audio_path(&self, word: &WordRecord) -> PathBuf {
        self.audio_dir
            .join(format!("{}.{}", word.text, self.audio_extension))
    }

    fn play(&mut self, word: &WordRecord) -> Result<()> {
        self.prompter.say("playing audio")?;
        let path = self.audio_path(word);
        self.player.play(&path)
    }

    fn ask_level_up(&mut self) -> Result<bool> {
        Ok(self.prompter.ask(LEVEL_UP_QUESTION, &['y', 'n'])? == 'y')
    }

    /// Listen first, then reveal the text
    fn review_audio(&mut self, word: &WordRecord) -> Result<bool> {
        let mut replays_left = self.replays;
        self.play(word)?;

        loop {
            match self.prompter.ask("'j' to show text, 'r' to replay", &['j', 'r'])? {
                'j' => break,
                _ if replays_left > 0 => {
                    replays_left -= 1;
                    self.play(word)?;
                }
                _ => self.prompter.say("no more replay")?,
            }
        }

        self.prompter.say(&word.text)?;
        self.ask_level_up()
    }

    /// Read first, then listen
    fn review_text(&mut self, word: &WordRecord) -> Result<bool> {
        self.prompter.say("showing text")?;
        self.prompter.say(&word.text)?;
        self.prompter.ask("'j' to play audio", &['j'])?;
        self.play(word)?;
        self.ask_level_up()
    }

    /// Recall the word from its description
    fn review_usage(&mut self, word: &WordRecord) -> Result<bool> {
        self.prompter.say("showing usage")?;
        self.prompter.say(&word.description)?;
        self.prompter.ask("'j' to show answer", &['j'])?;
        self.play(word)?;
        self.prompter.say(&word.text)?;
        self.ask_level_up()
    }
}

impl<R: BufRead, W: Write, P: AudioPlayer> Reviewer for InteractiveReviewer<R, W, P> {
    fn announce(&mut self, info: &PracticeInfo) -> Result<()> {
        self.prompter.say(format!(
            "practice {} fade {} max {} ratio {:.2}",
            info.key.modality,
            format_duration(info.fade),
            format_duration(info.max),
            info.ratio
        ))
    }

    fn review(&mut self, modality: Modality, word: &WordRecord) -> Result<bool> {
        match modality {
            Modality::Audio => self.review_audio(word),
            Modality::Text => self.review_text(word),
            Modality::Usage => self.review_usage(word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice::PracticeKey;
    use crate::review::error::ReviewError;
    use chrono::Duration;
    use std::io::Cursor;
    use std::path::Path;

    #[derive(Default)]
    struct RecordingPlayer {
        played: Vec<PathBuf>,
    }

    impl AudioPlayer for RecordingPlayer {
        fn play(&mut self, path: &Path) -> Result<()> {
            self.played.push(path.to_path_buf());
            Ok(())
        }
    }

    type TestReviewer = InteractiveReviewer<Cursor<Vec<u8>>, Vec<u8>, RecordingPlayer>;

    fn reviewer(input: &str) -> TestReviewer {
        let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        InteractiveReviewer::new(prompter, RecordingPlayer::default(), "/drill", "mp3", 1)
    }

    fn finish(reviewer: TestReviewer) -> (String, Vec<PathBuf>) {
        let (prompter, player) = reviewer.into_inner();
        let output = String::from_utf8(prompter.into_inner().1).unwrap();
        (output, player.played)
    }

    fn cat() -> WordRecord {
        WordRecord::new("猫", "a small furry animal")
    }

    #[test]
    fn test_audio_review_level_up() {
        let mut r = reviewer("j\ny\n");
        assert!(r.review(Modality::Audio, &cat()).unwrap());

        let (output, played) = finish(r);
        assert_eq!(played, vec![PathBuf::from("/drill/猫.mp3")]);
        assert_eq!(
            output,
            "playing audio\n'j' to show text, 'r' to replay\n猫\n'y' to level up, 'n' to keep\n"
        );
    }

    #[test]
    fn test_audio_replay_limit() {
        let mut r = reviewer("r\nr\nj\nn\n");
        assert!(!r.review(Modality::Audio, &cat()).unwrap());

        let (output, played) = finish(r);
        assert_eq!(played.len(), 2);
        assert!(output.contains("no more replay\n"));
    }

    #[test]
    fn test_text_review_waits_for_j() {
        let mut r = reviewer("x\nj\nmaybe\ny\n");
        assert!(r.review(Modality::Text, &cat()).unwrap());

        let (output, played) = finish(r);
        assert_eq!(played.len(), 1);
        assert!(output.starts_with("showing text\n猫\n'j' to play audio\n'j' to play audio\n"));
    }

    #[test]
    fn test_usage_review_shows_description_then_answer() {
        let mut r = reviewer("j\nn\n");
        assert!(!r.review(Modality::Usage, &cat()).unwrap());

        let (output, played) = finish(r);
        assert_eq!(played.len(), 1);
        assert_eq!(
            output,
            "showing usage\na small furry animal\n'j' to show answer\n\
             playing audio\n猫\n'y' to level up, 'n' to keep\n"
        );
    }

    #[test]
    fn test_announce_prints_score() {
        let mut r = reviewer("");
        let info = PracticeInfo {
            key: PracticeKey::new(Modality::Text, "猫"),
            fade: Duration::hours(3),
            max: Duration::hours(1),
            ratio: 3.0,
        };
        r.announce(&info).unwrap();

        let (output, _) = finish(r);
        assert_eq!(output, "practice text fade 3h max 1h ratio 3.00\n");
    }

    #[test]
    fn test_closed_input_aborts_review() {
        let mut r = reviewer("j\n");
        let err = r.review(Modality::Audio, &cat()).unwrap_err();
        assert!(matches!(err, ReviewError::InputClosed));
    }
}
