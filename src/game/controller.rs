use super::clock::{Clock, RoundClock};
use super::input::{InputMatcher, RoundStats, SubmitOutcome};
use super::rows::{MatchState, Row, RowQueue};
use crate::ui::{Control, Frame, HitTest, InputEvent, Rgb};
use rand::Rng;

const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

const BACKGROUND: Rgb = Rgb::new(240, 240, 240);
const WORD_BOX: Rgb = Rgb::new(220, 220, 220);
const BUTTON: Rgb = Rgb::new(200, 200, 200);
const INK: Rgb = Rgb::new(50, 50, 50);
const LABEL: Rgb = Rgb::new(70, 70, 70);
const HINT: Rgb = Rgb::new(100, 100, 100);
const CORRECT: Rgb = Rgb::new(0, 160, 0);
const INCORRECT: Rgb = Rgb::new(220, 0, 0);

const BOX_X: u16 = 4;
const BOX_Y: u16 = 4;
const WORD_SPACING: u16 = 12;
const ROW_SPACING: u16 = 2;
const BOX_WIDTH: u16 = WORD_SPACING * 6 + 3;
const BOX_HEIGHT: u16 = ROW_SPACING * 3 + 1;
const RESET_BUTTON: (u16, u16, u16, u16) = (BOX_X + BOX_WIDTH - 9, BOX_Y + BOX_HEIGHT + 1, 9, 3);
const RETRY_BUTTON_SIZE: (u16, u16) = (11, 3);

pub struct GameConfig
{
    pub time_limit_secs: u32,
}

impl Default for GameConfig
{
    fn default() -> Self
    {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase
{
    NotStarted,
    Running,
    Over,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundSummary
{
    pub score: u32,
    pub correct_words: u32,
    pub wpm: u32,
    pub stats: RoundStats,
}

/// Words per minute as whole-minute multiples of the limit. Truncates, so
/// any limit above a minute yields 0.
pub fn words_per_minute(correct_words: u32, limit_secs: u32) -> u32
{
    correct_words * 60u32.checked_div(limit_secs).unwrap_or(0)
}

pub struct GameController<C, R>
{
    config: GameConfig,
    clock: C,
    rng: R,
    rows: RowQueue,
    matcher: InputMatcher,
    round: RoundClock,
    phase: Phase,
    summary: Option<RoundSummary>,
}

impl<C: Clock, R: Rng> GameController<C, R>
{
    pub fn new(config: GameConfig, clock: C, mut rng: R) -> Self
    {
        let rows = RowQueue::new(&mut rng);
        Self {
            config,
            clock,
            rng,
            rows,
            matcher: InputMatcher::default(),
            round: RoundClock::default(),
            phase: Phase::NotStarted,
            summary: None,
        }
    }

    /// Routes one input event. Returns true when the player asked to quit.
    pub fn handle_event(&mut self, event: InputEvent, hit: &impl HitTest) -> bool
    {
        match event {
            InputEvent::Close => return true,
            InputEvent::Character(ch) => self.type_char(ch),
            InputEvent::Submit => self.submit(),
            InputEvent::Control(control) => self.press(control),
            InputEvent::MousePressed { x, y } => {
                if let Some(control) = hit.control_at(x, y) {
                    self.press(control);
                }
            }
        }
        false
    }

    pub fn type_char(&mut self, ch: char)
    {
        if self.phase == Phase::Over {
            return;
        }
        self.matcher.on_character(ch, &mut self.round, self.clock.now());
        if self.phase == Phase::NotStarted && self.round.is_started() {
            self.phase = Phase::Running;
            log::info!("round started, {}s on the clock", self.config.time_limit_secs);
        }
    }

    pub fn submit(&mut self)
    {
        if self.phase == Phase::Over {
            return;
        }
        // The delimiter is a keystroke too; it starts the round.
        self.type_char(' ');
        let outcome = self.matcher.on_submit(&mut self.rows, &mut self.rng);
        match outcome {
            SubmitOutcome::Matched { shifted } => {
                log::debug!("match, score {} shifted {shifted}", self.matcher.score());
            }
            SubmitOutcome::Mismatched => {
                log::debug!("mismatch on word {}", self.matcher.word_index());
            }
        }
    }

    pub fn press(&mut self, control: Control)
    {
        match (control, self.phase) {
            (Control::ResetRow, Phase::NotStarted | Phase::Running) => self.reset_rows(),
            (Control::Retry, Phase::Over) => self.retry(),
            _ => {}
        }
    }

    pub fn reset_rows(&mut self)
    {
        self.rows.reset_all(&mut self.rng);
        self.matcher.apply_reset_penalty();
        log::debug!("rows reset, score now {}", self.matcher.score());
    }

    pub fn retry(&mut self)
    {
        self.matcher.clear();
        self.round.reset();
        self.rows.initialize(&mut self.rng);
        self.phase = Phase::NotStarted;
        self.summary = None;
        log::info!("new round");
    }

    pub fn update(&mut self)
    {
        if self.phase != Phase::Running {
            return;
        }
        if !self.round.is_expired(self.config.time_limit_secs, self.clock.now()) {
            return;
        }

        let summary = RoundSummary {
            score: self.score(),
            correct_words: self.correct_words(),
            wpm: words_per_minute(self.correct_words(), self.config.time_limit_secs),
            stats: self.matcher.stats(),
        };
        log::info!(
            "round over: score {} words {} wpm {}",
            summary.score,
            summary.correct_words,
            summary.wpm
        );
        self.summary = Some(summary);
        self.phase = Phase::Over;
    }

    pub fn phase(&self) -> Phase
    {
        self.phase
    }

    pub fn summary(&self) -> Option<&RoundSummary>
    {
        self.summary.as_ref()
    }

    pub fn score(&self) -> u32
    {
        self.matcher.score()
    }

    pub fn correct_words(&self) -> u32
    {
        self.matcher.correct_words()
    }

    pub fn word_index(&self) -> usize
    {
        self.matcher.word_index()
    }

    pub fn buffer(&self) -> &str
    {
        self.matcher.buffer()
    }

    pub fn rows(&self) -> &RowQueue
    {
        &self.rows
    }

    pub fn remaining_secs(&self) -> u32
    {
        self.round
            .remaining(self.config.time_limit_secs, self.clock.now())
    }

    pub fn frame(&self) -> Frame
    {
        let mut frame = Frame {
            background: Some(BACKGROUND),
            ..Frame::default()
        };
        match self.summary() {
            Some(summary) if self.phase() == Phase::Over => draw_results(&mut frame, summary),
            _ => self.draw_board(&mut frame),
        }
        frame
    }

    fn draw_board(&self, frame: &mut Frame)
    {
        frame.bold_text(2, 0, "Typing Speed Game", INK);
        frame.text(2, 1, format!("Score: {}", self.score()), LABEL);
        frame.text(2, 2, format!("Time: {}s", self.remaining_secs()), LABEL);

        frame.rect(BOX_X, BOX_Y, BOX_WIDTH, BOX_HEIGHT, WORD_BOX);
        for (row_index, row) in self.rows().rows().enumerate() {
            let active = row_index == 0;
            draw_row(frame, row, row_index as u16, active.then_some(self.word_index()));
        }

        frame.button(Control::ResetRow, RESET_BUTTON, "Reset", (BUTTON, INK));

        let input_y = BOX_Y + BOX_HEIGHT + 2;
        frame.bold_text(BOX_X + 2, input_y, format!("> {}", self.buffer()), INK);
        frame.text(
            BOX_X + 2,
            input_y + 2,
            "Type the words and press SPACE to submit. TAB resets the rows, ESC quits.",
            HINT,
        );
    }
}

fn draw_row(frame: &mut Frame, row: &Row, row_index: u16, target: Option<usize>)
{
    let y = BOX_Y + 1 + row_index * ROW_SPACING;
    for (column, word) in row.words().iter().enumerate() {
        let x = BOX_X + 2 + column as u16 * WORD_SPACING;
        let color = match word.state() {
            MatchState::Pending => INK,
            MatchState::Correct => CORRECT,
            MatchState::Incorrect => INCORRECT,
        };
        if target == Some(column) {
            frame.bold_text(x, y, word.text(), color);
        } else {
            frame.text(x, y, word.text(), color);
        }
    }
}

fn draw_results(frame: &mut Frame, summary: &RoundSummary)
{
    let x = BOX_X + 2;
    let lines = [
        format!("Final Score: {}", summary.score),
        format!("Words Correct: {}", summary.correct_words),
        format!("WPM: {}", summary.wpm),
        format!(
            "Keystrokes: {}  Backspaces: {}  Misses: {}  Row resets: {}",
            summary.stats.keystrokes,
            summary.stats.backspaces,
            summary.stats.wrong_submits,
            summary.stats.row_resets
        ),
    ];
    frame.bold_text(x, BOX_Y, "Game Over!", INK);
    for (offset, line) in lines.into_iter().enumerate() {
        frame.text(x, BOX_Y + 2 + offset as u16, line, INK);
    }

    let (width, height) = RETRY_BUTTON_SIZE;
    frame.button(Control::Retry, (x, BOX_Y + 7, width, height), "Retry", (BUTTON, INK));
    frame.text(x, BOX_Y + 7 + height + 1, "Click Retry or press ENTER. ESC quits.", HINT);
}
