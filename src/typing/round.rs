use super::word::Word;

/// One batch of words played to completion before the next begins.
#[derive(Debug, Clone)]
pub struct Round {
    words: Vec<Word>,
    score: u32,
    shown: usize,
}

impl Round {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            score: 0,
            shown: 0,
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub(crate) fn word_mut(&mut self, index: usize) -> Option<&mut Word> {
        self.words.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Words resolved so far, successfully or not.
    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn is_complete(&self) -> bool {
        self.shown == self.words.len()
    }

    pub(crate) fn add_point(&mut self) {
        self.score += 1;
    }

    /// Count one more resolved word. Returns `true` when that was the last one.
    pub(crate) fn record_shown(&mut self) -> bool {
        debug_assert!(self.shown < self.words.len(), "round shown past its word count");
        self.shown = (self.shown + 1).min(self.words.len());
        self.is_complete()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.words.iter().position(Word::is_active)
    }

    pub fn active_word(&self) -> Option<&Word> {
        self.words.iter().find(|w| w.is_active())
    }

    pub fn visible_words(&self) -> impl Iterator<Item = &Word> {
        self.words.iter().filter(|w| w.is_visible())
    }

    pub(crate) fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_visible())
            .map(|(i, _)| i)
    }
}
