//! Porter suffix-stripping stemmer.
//!
//! Follows M.F. Porter, "An algorithm for suffix stripping" (Program,
//! 1980): steps 1a through 5b with the measure `m` of `[C](VC){m}[V]`.
//! Input is expected lower-cased. Words of two characters or fewer are
//! returned unchanged.

/// Stem a single lower-cased word
pub fn stem(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() <= 2 {
        return word.to_string();
    }

    let mut word = Word { b: chars };
    word.step1a();
    word.step1b();
    word.step1c();
    word.step2();
    word.step3();
    word.step4();
    word.step5a();
    word.step5b();
    word.b.into_iter().collect()
}

const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

// "ement" precedes "ment" and "ent" so the longest suffix wins
const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

struct Word {
    b: Vec<char>,
}

impl Word {
    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            'a' | 'e' | 'i' | 'o' | 'u' => false,
            'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of VC sequences in the first `len` characters
    fn measure(&self, len: usize) -> usize {
        let mut m = 0;
        let mut i = 0;
        while i < len && self.is_consonant(i) {
            i += 1;
        }
        loop {
            while i < len && !self.is_consonant(i) {
                i += 1;
            }
            if i >= len {
                return m;
            }
            while i < len && self.is_consonant(i) {
                i += 1;
            }
            m += 1;
        }
    }

    fn has_vowel(&self, len: usize) -> bool {
        (0..len).any(|i| !self.is_consonant(i))
    }

    fn ends_double_consonant(&self, len: usize) -> bool {
        len >= 2 && self.b[len - 1] == self.b[len - 2] && self.is_consonant(len - 1)
    }

    /// consonant-vowel-consonant ending, last consonant not w, x or y
    fn ends_cvc(&self, len: usize) -> bool {
        len >= 3
            && self.is_consonant(len - 3)
            && !self.is_consonant(len - 2)
            && self.is_consonant(len - 1)
            && !matches!(self.b[len - 1], 'w' | 'x' | 'y')
    }

    /// Stem length when the word ends with `suffix`
    fn stem_len(&self, suffix: &str) -> Option<usize> {
        let n = suffix.chars().count();
        if n > self.b.len() {
            return None;
        }
        let start = self.b.len() - n;
        self.b[start..]
            .iter()
            .copied()
            .eq(suffix.chars())
            .then_some(start)
    }

    fn replace(&mut self, stem_len: usize, with: &str) {
        self.b.truncate(stem_len);
        self.b.extend(with.chars());
    }

    fn last(&self) -> Option<char> {
        self.b.last().copied()
    }

    /// Apply the first matching rule when the stem's measure exceeds `min_m`
    fn replace_first(&mut self, rules: &[(&str, &str)], min_m: usize) {
        for (suffix, with) in rules {
            if let Some(stem) = self.stem_len(suffix) {
                if self.measure(stem) > min_m {
                    self.replace(stem, with);
                }
                return;
            }
        }
    }

    fn step1a(&mut self) {
        if let Some(stem) = self.stem_len("sses") {
            self.replace(stem, "ss");
        } else if let Some(stem) = self.stem_len("ies") {
            self.replace(stem, "i");
        } else if self.stem_len("ss").is_none() {
            if let Some(stem) = self.stem_len("s") {
                self.replace(stem, "");
            }
        }
    }

    fn step1b(&mut self) {
        if let Some(stem) = self.stem_len("eed") {
            if self.measure(stem) > 0 {
                self.replace(stem, "ee");
            }
            return;
        }

        let stem = match self.stem_len("ed").or_else(|| self.stem_len("ing")) {
            Some(stem) if self.has_vowel(stem) => stem,
            _ => return,
        };
        self.b.truncate(stem);

        let len = self.b.len();
        if ["at", "bl", "iz"].iter().any(|s| self.stem_len(s).is_some()) {
            self.b.push('e');
        } else if self.ends_double_consonant(len)
            && !matches!(self.last(), Some('l' | 's' | 'z'))
        {
            self.b.pop();
        } else if self.measure(len) == 1 && self.ends_cvc(len) {
            self.b.push('e');
        }
    }

    fn step1c(&mut self) {
        if let Some(stem) = self.stem_len("y") {
            if self.has_vowel(stem) {
                self.replace(stem, "i");
            }
        }
    }

    fn step2(&mut self) {
        self.replace_first(STEP2, 0);
    }

    fn step3(&mut self) {
        self.replace_first(STEP3, 0);
    }

    fn step4(&mut self) {
        for suffix in STEP4 {
            if let Some(stem) = self.stem_len(suffix) {
                let allowed = *suffix != "ion"
                    || (stem > 0 && matches!(self.b[stem - 1], 's' | 't'));
                if allowed && self.measure(stem) > 1 {
                    self.b.truncate(stem);
                }
                return;
            }
        }
    }

    fn step5a(&mut self) {
        if let Some(stem) = self.stem_len("e") {
            let m = self.measure(stem);
            if m > 1 || (m == 1 && !self.ends_cvc(stem)) {
                self.b.truncate(stem);
            }
        }
    }

    fn step5b(&mut self) {
        let len = self.b.len();
        if self.last() == Some('l') && self.ends_double_consonant(len) && self.measure(len) > 1 {
            self.b.pop();
        }
    }
}
