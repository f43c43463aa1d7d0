use crate::words::WORDS;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

pub const ROW_LEN: usize = 6;
pub const ROW_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchState
{
    Pending,
    Correct,
    Incorrect,
}

#[derive(Clone, Debug)]
pub struct Word
{
    text: String,
    state: MatchState,
}

impl Word
{
    fn new(text: &str) -> Self
    {
        Self {
            text: text.to_string(),
            state: MatchState::Pending,
        }
    }

    pub fn text(&self) -> &str
    {
        &self.text
    }

    pub fn state(&self) -> MatchState
    {
        self.state
    }

    pub fn mark(&mut self, state: MatchState)
    {
        self.state = state;
    }
}

#[derive(Clone, Debug)]
pub struct Row
{
    words: [Word; ROW_LEN],
}

impl Row
{
    fn generate(rng: &mut impl Rng) -> Self
    {
        Self {
            words: std::array::from_fn(|_| Word::new(pick_word(rng))),
        }
    }

    pub fn words(&self) -> &[Word]
    {
        &self.words
    }

    #[cfg(test)]
    pub fn word(&self, index: usize) -> Option<&Word>
    {
        self.words.get(index)
    }

    pub fn word_mut(&mut self, index: usize) -> Option<&mut Word>
    {
        self.words.get_mut(index)
    }
}

// Index 0 is the active row.
#[derive(Debug, Default)]
pub struct RowQueue
{
    rows: VecDeque<Row>,
}

impl RowQueue
{
    pub fn new(rng: &mut impl Rng) -> Self
    {
        let mut queue = Self::default();
        queue.initialize(rng);
        queue
    }

    pub fn generate_row(&mut self, rng: &mut impl Rng)
    {
        self.rows.push_back(Row::generate(rng));
    }

    pub fn initialize(&mut self, rng: &mut impl Rng)
    {
        self.rows.clear();
        for _ in 0..ROW_COUNT {
            self.generate_row(rng);
        }
    }

    pub fn shift(&mut self, rng: &mut impl Rng)
    {
        self.rows.pop_front();
        self.generate_row(rng);
        while self.rows.len() < ROW_COUNT {
            self.generate_row(rng);
        }
        log::debug!("rows shifted");
    }

    pub fn reset_all(&mut self, rng: &mut impl Rng)
    {
        self.initialize(rng);
        log::debug!("rows regenerated");
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row>
    {
        self.rows.iter()
    }

    #[cfg(test)]
    pub fn active_row(&self) -> Option<&Row>
    {
        self.rows.front()
    }

    pub fn active_row_mut(&mut self) -> Option<&mut Row>
    {
        self.rows.front_mut()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize
    {
        self.rows.len()
    }
}

fn pick_word(rng: &mut impl Rng) -> &'static str
{
    WORDS.choose(rng).copied().unwrap_or("focus")
}
