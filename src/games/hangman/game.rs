use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages the game can be played in. English words come from a remote
/// source, the others from built-in lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Spanish, Language::French];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
            Language::French => "Français",
        }
    }

    /// Letters offered on the on-screen keyboard, in display order.
    pub fn keyboard(self) -> &'static str {
        match self {
            Language::English => "abcdefghijklmnopqrstuvwxyz",
            Language::Spanish => "abcdefghijklmnñopqrstuvwxyz",
            Language::French => "abcdefghijklmnopqrstuvwxyzéèêàçù",
        }
    }

    pub fn accepts(self, letter: char) -> bool {
        let letter = fold(letter);
        self.keyboard().chars().any(|k| k == letter)
    }

    pub fn next(self) -> Self {
        match self {
            Language::English => Language::Spanish,
            Language::Spanish => Language::French,
            Language::French => Language::English,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "es" | "spanish" => Ok(Language::Spanish),
            "fr" | "french" => Ok(Language::French),
            other => Err(format!("unknown language '{other}' (expected en, es or fr)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn max_wrong_guesses(self) -> u8 {
        match self {
            Difficulty::Easy => 8,
            Difficulty::Medium => 6,
            Difficulty::Hard => 4,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}' (expected easy, medium or hard)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LetterStatus {
    #[default]
    Unguessed,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Identity of one session. Async results carry the id of the session that
/// asked for them so late arrivals can be told apart from current ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

/// What a guess or hint did to the session. The caller turns these into
/// figure steps, stored results and definition lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed: terminal session, word still loading, repeated or
    /// invalid letter, or hint already spent.
    Ignored,
    Revealed,
    Won,
    Missed { step: usize },
    Lost { step: usize },
    Hinted { step: usize, lost: bool },
}

/// Lowercases a single character, keeping it as one scalar.
pub fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    language: Language,
    difficulty: Difficulty,
    max_wrong_guesses: u8,
    word: Option<Vec<char>>,
    revealed: Vec<Option<char>>,
    letters: BTreeMap<char, LetterStatus>,
    wrong_count: u8,
    hint_used: bool,
    outcome: Outcome,
}

impl Session {
    /// A session whose word has not arrived yet. Guesses and hints are
    /// ignored until [`Session::install_word`] is called.
    pub fn loading(id: SessionId, language: Language, difficulty: Difficulty) -> Self {
        Self {
            id,
            language,
            difficulty,
            max_wrong_guesses: difficulty.max_wrong_guesses(),
            word: None,
            revealed: Vec::new(),
            letters: BTreeMap::new(),
            wrong_count: 0,
            hint_used: false,
            outcome: Outcome::InProgress,
        }
    }

    pub fn new(id: SessionId, language: Language, difficulty: Difficulty, word: &str) -> Self {
        let mut session = Self::loading(id, language, difficulty);
        session.install_word(word);
        session
    }

    /// Sets the target word. Only the first word installed in a session counts.
    pub fn install_word(&mut self, word: &str) -> bool {
        if self.word.is_some() {
            return false;
        }
        let chars: Vec<char> = word.trim().chars().map(fold).collect();
        // Anything that is not a letter (hyphens, apostrophes) is shown from the start.
        self.revealed = chars
            .iter()
            .map(|&c| if c.is_alphabetic() { None } else { Some(c) })
            .collect();
        self.word = Some(chars);
        true
    }

    pub fn guess(&mut self, letter: char) -> Transition {
        if self.outcome.is_terminal() {
            return Transition::Ignored;
        }
        let Some(word) = &self.word else {
            return Transition::Ignored;
        };
        let letter = fold(letter);
        if !letter.is_alphabetic() || self.status(letter) != LetterStatus::Unguessed {
            return Transition::Ignored;
        }

        if word.contains(&letter) {
            self.letters.insert(letter, LetterStatus::Correct);
            for (slot, &c) in self.revealed.iter_mut().zip(word.iter()) {
                if c == letter {
                    *slot = Some(c);
                }
            }
            if self.blanks() == 0 {
                self.outcome = Outcome::Won;
                return Transition::Won;
            }
            Transition::Revealed
        } else {
            self.letters.insert(letter, LetterStatus::Wrong);
            self.wrong_count += 1;
            let step = usize::from(self.wrong_count);
            if self.wrong_count >= self.max_wrong_guesses {
                self.lose();
                return Transition::Lost { step };
            }
            Transition::Missed { step }
        }
    }

    /// Spends the hint. Costs one wrong guess and may end the game.
    pub fn use_hint(&mut self) -> Transition {
        if self.outcome.is_terminal()
            || self.word.is_none()
            || self.hint_used
            || self.wrong_count >= self.max_wrong_guesses
        {
            return Transition::Ignored;
        }
        self.hint_used = true;
        self.wrong_count += 1;
        let step = usize::from(self.wrong_count);
        let lost = self.wrong_count >= self.max_wrong_guesses && self.blanks() > 0;
        if lost {
            self.lose();
        }
        Transition::Hinted { step, lost }
    }

    fn lose(&mut self) {
        self.outcome = Outcome::Lost;
        if let Some(word) = &self.word {
            self.revealed = word.iter().copied().map(Some).collect();
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn max_wrong_guesses(&self) -> u8 {
        self.max_wrong_guesses
    }

    pub fn word(&self) -> Option<String> {
        self.word.as_ref().map(|w| w.iter().collect())
    }

    pub fn is_loading(&self) -> bool {
        self.word.is_none()
    }

    pub fn revealed(&self) -> &[Option<char>] {
        &self.revealed
    }

    pub fn status(&self, letter: char) -> LetterStatus {
        self.letters.get(&fold(letter)).copied().unwrap_or_default()
    }

    pub fn wrong_count(&self) -> u8 {
        self.wrong_count
    }

    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn blanks(&self) -> usize {
        self.revealed.iter().filter(|slot| slot.is_none()).count()
    }

    /// The word as shown to the player, e.g. `c _ t`.
    pub fn masked(&self) -> String {
        self.revealed
            .iter()
            .map(|slot| slot.unwrap_or('_').to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(difficulty: Difficulty) -> Session {
        Session::new(SessionId(1), Language::English, difficulty, "cat")
    }

    #[test]
    fn guessing_every_letter_wins() {
        let mut s = cat(Difficulty::Medium);
        assert_eq!(s.max_wrong_guesses(), 6);
        assert_eq!(s.guess('c'), Transition::Revealed);
        assert_eq!(s.guess('a'), Transition::Revealed);
        assert_eq!(s.outcome(), Outcome::InProgress);
        assert_eq!(s.guess('t'), Transition::Won);
        assert_eq!(s.outcome(), Outcome::Won);
        assert_eq!(s.revealed(), &[Some('c'), Some('a'), Some('t')]);
    }

    #[test]
    fn reaching_max_wrong_guesses_loses_and_reveals() {
        let mut s = cat(Difficulty::Medium);
        s.max_wrong_guesses = 2;
        assert_eq!(s.guess('x'), Transition::Missed { step: 1 });
        assert_eq!(s.guess('y'), Transition::Lost { step: 2 });
        assert_eq!(s.wrong_count(), 2);
        assert_eq!(s.outcome(), Outcome::Lost);
        assert_eq!(s.masked(), "c a t");
    }

    #[test]
    fn duplicate_guess_is_ignored() {
        let mut s = cat(Difficulty::Hard);
        assert_eq!(s.guess('z'), Transition::Missed { step: 1 });
        assert_eq!(s.guess('z'), Transition::Ignored);
        assert_eq!(s.guess('Z'), Transition::Ignored);
        assert_eq!(s.wrong_count(), 1);

        assert_eq!(s.guess('a'), Transition::Revealed);
        let before = s.revealed().to_vec();
        assert_eq!(s.guess('a'), Transition::Ignored);
        assert_eq!(s.revealed(), before.as_slice());
    }

    #[test]
    fn hint_only_applies_once() {
        let mut s = cat(Difficulty::Easy);
        assert_eq!(s.use_hint(), Transition::Hinted { step: 1, lost: false });
        assert_eq!(s.use_hint(), Transition::Ignored);
        assert!(s.hint_used());
        assert_eq!(s.wrong_count(), 1);
    }

    #[test]
    fn hint_on_last_life_loses() {
        let mut s = cat(Difficulty::Hard);
        for letter in ['q', 'w', 'e'] {
            s.guess(letter);
        }
        assert_eq!(s.wrong_count(), 3);
        assert_eq!(s.use_hint(), Transition::Hinted { step: 4, lost: true });
        assert_eq!(s.outcome(), Outcome::Lost);
        assert_eq!(s.blanks(), 0);
    }

    #[test]
    fn terminal_sessions_ignore_everything() {
        let mut s = cat(Difficulty::Medium);
        for letter in "cat".chars() {
            s.guess(letter);
        }
        assert_eq!(s.guess('z'), Transition::Ignored);
        assert_eq!(s.use_hint(), Transition::Ignored);
        assert_eq!(s.wrong_count(), 0);
        assert!(!s.hint_used());
    }

    #[test]
    fn loading_session_ignores_input() {
        let mut s = Session::loading(SessionId(3), Language::English, Difficulty::Easy);
        assert!(s.is_loading());
        assert_eq!(s.guess('a'), Transition::Ignored);
        assert_eq!(s.use_hint(), Transition::Ignored);
        assert!(s.install_word("Dog"));
        assert!(!s.install_word("cat"));
        assert_eq!(s.word().as_deref(), Some("dog"));
        assert_eq!(s.masked(), "_ _ _");
    }

    #[test]
    fn non_letters_are_revealed_up_front() {
        let s = Session::new(SessionId(1), Language::English, Difficulty::Easy, "x-ray");
        assert_eq!(s.masked(), "_ - _ _ _");
        assert_eq!(s.blanks(), 4);
    }

    #[test]
    fn accented_letters_match() {
        let mut s = Session::new(SessionId(1), Language::French, Difficulty::Easy, "étoile");
        assert_eq!(s.guess('É'), Transition::Revealed);
        assert_eq!(s.status('é'), LetterStatus::Correct);
        assert_eq!(s.revealed()[0], Some('é'));
    }

    #[test]
    fn counters_move_one_way() {
        let mut s = Session::new(SessionId(9), Language::English, Difficulty::Easy, "rhythm");
        let mut blanks = s.blanks();
        let mut wrong = s.wrong_count();
        for letter in "etaoinshrdlucmfwypvbgkjqxz".chars() {
            let transition = s.guess(letter);
            assert!(s.blanks() <= blanks);
            if s.blanks() < blanks && s.outcome() != Outcome::Lost {
                assert!(matches!(transition, Transition::Revealed | Transition::Won));
            }
            assert!(s.wrong_count() >= wrong);
            assert!(s.wrong_count() <= s.max_wrong_guesses());
            blanks = s.blanks();
            wrong = s.wrong_count();
        }
        assert!(s.outcome().is_terminal());
    }

    #[test]
    fn language_and_difficulty_parse() {
        assert_eq!("ES".parse::<Language>(), Ok(Language::Spanish));
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("de".parse::<Language>().is_err());
        assert!(Language::Spanish.accepts('Ñ'));
        assert!(!Language::English.accepts('ñ'));
    }
}
