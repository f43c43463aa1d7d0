use super::clock::RoundClock;
use super::rows::{MatchState, RowQueue, ROW_LEN};
use rand::Rng;
use std::time::Instant;

pub const POINTS_PER_WORD: u32 = 10;
pub const RESET_PENALTY: u32 = 15;
const BACKSPACE: char = '\u{8}';
const DELETE: char = '\u{7f}';
const DELIMITER: char = ' ';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome
{
    Matched { shifted: bool },
    Mismatched,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundStats
{
    pub keystrokes: u32,
    pub backspaces: u32,
    pub wrong_submits: u32,
    pub row_resets: u32,
}

#[derive(Debug, Default)]
pub struct InputMatcher
{
    buffer: String,
    score: u32,
    correct_words: u32,
    word_index: usize,
    stats: RoundStats,
}

impl InputMatcher
{
    pub fn on_character(&mut self, ch: char, clock: &mut RoundClock, now: Instant)
    {
        clock.start(now);

        match ch {
            BACKSPACE | DELETE => {
                if self.buffer.pop().is_some() {
                    self.stats.backspaces += 1;
                }
            }
            DELIMITER => {}
            ch if ch.is_control() => {}
            ch => {
                self.stats.keystrokes += 1;
                self.buffer.push(ch);
            }
        }
    }

    /// Checks the buffer against the active target word. A wrong guess only
    /// tags the word; the buffer stays so it can be edited.
    pub fn on_submit(&mut self, queue: &mut RowQueue, rng: &mut impl Rng) -> SubmitOutcome
    {
        let index = self.word_index;
        let Some(target) = queue.active_row_mut().and_then(|row| row.word_mut(index)) else {
            return SubmitOutcome::Mismatched;
        };

        if target.text() != self.buffer {
            target.mark(MatchState::Incorrect);
            self.stats.wrong_submits += 1;
            return SubmitOutcome::Mismatched;
        }

        target.mark(MatchState::Correct);
        self.correct_words += 1;
        self.score += POINTS_PER_WORD;
        self.buffer.clear();
        self.word_index += 1;

        let shifted = self.word_index >= ROW_LEN;
        if shifted {
            queue.shift(rng);
            self.word_index = 0;
        }
        SubmitOutcome::Matched { shifted }
    }

    pub fn apply_reset_penalty(&mut self)
    {
        self.score = self.score.saturating_sub(RESET_PENALTY);
        self.word_index = 0;
        self.stats.row_resets += 1;
    }

    pub fn clear(&mut self)
    {
        *self = Self::default();
    }

    pub fn buffer(&self) -> &str
    {
        &self.buffer
    }

    pub fn score(&self) -> u32
    {
        self.score
    }

    pub fn correct_words(&self) -> u32
    {
        self.correct_words
    }

    pub fn word_index(&self) -> usize
    {
        self.word_index
    }

    pub fn stats(&self) -> RoundStats
    {
        self.stats
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (InputMatcher, RowQueue, RoundClock, StdRng)
    {
        let mut rng = StdRng::seed_from_u64(9);
        let queue = RowQueue::new(&mut rng);
        (InputMatcher::default(), queue, RoundClock::default(), rng)
    }

    fn type_text(matcher: &mut InputMatcher, clock: &mut RoundClock, text: &str)
    {
        let now = Instant::now();
        for ch in text.chars() {
            matcher.on_character(ch, clock, now);
        }
    }

    fn target(queue: &RowQueue, index: usize) -> String
    {
        queue.active_row().unwrap().word(index).unwrap().text().to_string()
    }

    #[test]
    fn first_keystroke_starts_the_clock()
    {
        let (mut matcher, _, mut clock, _) = setup();
        assert!(!clock.is_started());
        matcher.on_character('a', &mut clock, Instant::now());
        assert!(clock.is_started());
    }

    #[test]
    fn buffer_edits()
    {
        let (mut matcher, _, mut clock, _) = setup();
        type_text(&mut matcher, &mut clock, "ab c\t\u{1b}d");
        assert_eq!(matcher.buffer(), "abcd");
        type_text(&mut matcher, &mut clock, "\u{8}\u{7f}");
        assert_eq!(matcher.buffer(), "ab");
        type_text(&mut matcher, &mut clock, "\u{8}\u{8}\u{8}");
        assert_eq!(matcher.buffer(), "");
        assert_eq!(matcher.stats().backspaces, 4);
        assert_eq!(matcher.stats().keystrokes, 4);
    }

    #[test]
    fn matching_word_scores_and_advances()
    {
        let (mut matcher, mut queue, mut clock, mut rng) = setup();
        let word = target(&queue, 0);
        type_text(&mut matcher, &mut clock, &word);

        let outcome = matcher.on_submit(&mut queue, &mut rng);

        assert_eq!(outcome, SubmitOutcome::Matched { shifted: false });
        assert_eq!(matcher.score(), POINTS_PER_WORD);
        assert_eq!(matcher.correct_words(), 1);
        assert_eq!(matcher.word_index(), 1);
        assert_eq!(matcher.buffer(), "");
        let first = queue.active_row().unwrap().word(0).unwrap();
        assert_eq!(first.state(), MatchState::Correct);
    }

    #[test]
    fn mismatch_marks_word_and_keeps_buffer()
    {
        let (mut matcher, mut queue, mut clock, mut rng) = setup();
        let wrong = format!("{}x", target(&queue, 0));
        type_text(&mut matcher, &mut clock, &wrong);

        let outcome = matcher.on_submit(&mut queue, &mut rng);

        assert_eq!(outcome, SubmitOutcome::Mismatched);
        assert_eq!(matcher.score(), 0);
        assert_eq!(matcher.word_index(), 0);
        assert_eq!(matcher.buffer(), wrong);
        let first = queue.active_row().unwrap().word(0).unwrap();
        assert_eq!(first.state(), MatchState::Incorrect);
        assert_eq!(matcher.stats().wrong_submits, 1);
    }

    #[test]
    fn comparison_is_case_sensitive()
    {
        let (mut matcher, mut queue, mut clock, mut rng) = setup();
        let upper = target(&queue, 0).to_uppercase();
        type_text(&mut matcher, &mut clock, &upper);
        assert_eq!(matcher.on_submit(&mut queue, &mut rng), SubmitOutcome::Mismatched);
    }

    #[test]
    fn fixing_a_mismatch_then_resubmitting_matches()
    {
        let (mut matcher, mut queue, mut clock, mut rng) = setup();
        let word = target(&queue, 0);
        type_text(&mut matcher, &mut clock, &format!("{word}z"));
        matcher.on_submit(&mut queue, &mut rng);
        type_text(&mut matcher, &mut clock, "\u{8}");

        let outcome = matcher.on_submit(&mut queue, &mut rng);

        assert_eq!(outcome, SubmitOutcome::Matched { shifted: false });
        let first = queue.active_row().unwrap().word(0).unwrap();
        assert_eq!(first.state(), MatchState::Correct);
    }

    #[test]
    fn sixth_match_shifts_rows()
    {
        let (mut matcher, mut queue, mut clock, mut rng) = setup();
        let next_row: Vec<String> = queue
            .rows()
            .nth(1)
            .unwrap()
            .words()
            .iter()
            .map(|word| word.text().to_string())
            .collect();

        for index in 0..ROW_LEN {
            let word = target(&queue, index);
            type_text(&mut matcher, &mut clock, &word);
            let outcome = matcher.on_submit(&mut queue, &mut rng);
            assert_eq!(outcome, SubmitOutcome::Matched { shifted: index == ROW_LEN - 1 });
        }

        assert_eq!(matcher.word_index(), 0);
        assert_eq!(matcher.score(), 60);
        let active: Vec<String> = queue
            .active_row()
            .unwrap()
            .words()
            .iter()
            .map(|word| word.text().to_string())
            .collect();
        assert_eq!(active, next_row);
    }

    #[test]
    fn reset_penalty_floors_at_zero()
    {
        let (mut matcher, mut queue, mut clock, mut rng) = setup();
        let word = target(&queue, 0);
        type_text(&mut matcher, &mut clock, &word);
        matcher.on_submit(&mut queue, &mut rng);
        assert_eq!(matcher.score(), 10);

        matcher.apply_reset_penalty();

        assert_eq!(matcher.score(), 0);
        assert_eq!(matcher.word_index(), 0);
        assert_eq!(matcher.stats().row_resets, 1);
    }
}
