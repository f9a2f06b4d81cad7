//! Porter stemmer
//!
//! The classic suffix-stripping algorithm from M.F. Porter, "An algorithm
//! for suffix stripping" (1980), with the two later revisions of the
//! reference implementation (`bli` → `ble`, `logi` → `log`).
//!
//! Works on lowercase ASCII. Anything else, and words of one or two
//! letters, is returned unchanged.

/// Reduce `word` to its Porter stem.
///
/// # Examples
///
/// ```
/// use lexindex_engine::stemmer::stem;
///
/// assert_eq!(stem("running"), "run");
/// assert_eq!(stem("computers"), "comput");
/// assert_eq!(stem("ponies"), "poni");
/// ```
pub fn stem(word: &str) -> String {
    if word.len() <= 2 || !word.is_ascii() {
        return word.to_string();
    }

    let mut w = Word {
        b: word.as_bytes().to_vec(),
    };
    w.step1a();
    w.step1b();
    w.step1c();
    w.step2();
    w.step3();
    w.step4();
    w.step5a();
    w.step5b();
    w.b.into_iter().map(char::from).collect()
}

/// Working buffer. Every helper that takes `k` looks at the prefix `b[..k]`.
struct Word {
    b: Vec<u8>,
}

const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
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
    ("logi", "log"),
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

// Longest suffix first where one ends another.
const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

impl Word {
    fn len(&self) -> usize {
        self.b.len()
    }

    fn last(&self) -> u8 {
        self.b[self.b.len() - 1]
    }

    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in `b[..k]`.
    fn measure(&self, k: usize) -> usize {
        let mut i = 0;
        while i < k && self.is_consonant(i) {
            i += 1;
        }
        let mut m = 0;
        while i < k {
            while i < k && !self.is_consonant(i) {
                i += 1;
            }
            if i >= k {
                break;
            }
            while i < k && self.is_consonant(i) {
                i += 1;
            }
            m += 1;
        }
        m
    }

    fn has_vowel(&self, k: usize) -> bool {
        (0..k).any(|i| !self.is_consonant(i))
    }

    fn double_consonant(&self, k: usize) -> bool {
        k >= 2 && self.b[k - 1] == self.b[k - 2] && self.is_consonant(k - 1)
    }

    /// `b[..k]` ends consonant-vowel-consonant and the last is not w, x or y.
    fn cvc(&self, k: usize) -> bool {
        k >= 3
            && self.is_consonant(k - 3)
            && !self.is_consonant(k - 2)
            && self.is_consonant(k - 1)
            && !matches!(self.b[k - 1], b'w' | b'x' | b'y')
    }

    /// Length of the stem left after removing `suffix`, if the word ends with it.
    fn ends(&self, suffix: &str) -> Option<usize> {
        self.b
            .ends_with(suffix.as_bytes())
            .then(|| self.len() - suffix.len())
    }

    fn set_to(&mut self, k: usize, replacement: &str) {
        self.b.truncate(k);
        self.b.extend_from_slice(replacement.as_bytes());
    }

    /// Apply the first rule whose suffix matches, if its stem has `m > 0`.
    fn replace_first(&mut self, rules: &[(&str, &str)]) {
        for (suffix, replacement) in rules {
            if let Some(k) = self.ends(suffix) {
                if self.measure(k) > 0 {
                    self.set_to(k, replacement);
                }
                return;
            }
        }
    }

    // ========================================================================
    // Steps
    // ========================================================================

    /// Plurals: sses → ss, ies → i, s → (removed) unless ss.
    fn step1a(&mut self) {
        if let Some(k) = self.ends("sses") {
            self.set_to(k, "ss");
        } else if let Some(k) = self.ends("ies") {
            self.set_to(k, "i");
        } else if self.ends("ss").is_none() {
            if let Some(k) = self.ends("s") {
                self.b.truncate(k);
            }
        }
    }

    /// Past tense and gerunds.
    fn step1b(&mut self) {
        if let Some(k) = self.ends("eed") {
            if self.measure(k) > 0 {
                self.b.truncate(k + 2);
            }
            return;
        }

        let stripped = ["ed", "ing"]
            .iter()
            .find_map(|s| self.ends(s).filter(|&k| self.has_vowel(k)));
        let Some(k) = stripped else { return };
        self.b.truncate(k);

        let len = self.len();
        if ["at", "bl", "iz"].iter().any(|s| self.ends(s).is_some()) {
            self.b.push(b'e');
        } else if self.double_consonant(len) && !matches!(self.last(), b'l' | b's' | b'z') {
            self.b.pop();
        } else if self.measure(len) == 1 && self.cvc(len) {
            self.b.push(b'e');
        }
    }

    /// Terminal y → i when the stem has a vowel.
    fn step1c(&mut self) {
        if let Some(k) = self.ends("y") {
            if self.has_vowel(k) {
                self.b[k] = b'i';
            }
        }
    }

    fn step2(&mut self) {
        self.replace_first(STEP2);
    }

    fn step3(&mut self) {
        self.replace_first(STEP3);
    }

    /// Strip residual suffixes when `m > 1`.
    fn step4(&mut self) {
        for suffix in STEP4 {
            if let Some(k) = self.ends(suffix) {
                let allowed = *suffix != "ion" || (k > 0 && matches!(self.b[k - 1], b's' | b't'));
                if allowed && self.measure(k) > 1 {
                    self.b.truncate(k);
                }
                return;
            }
        }
    }

    /// Final e.
    fn step5a(&mut self) {
        if let Some(k) = self.ends("e") {
            let m = self.measure(k);
            if m > 1 || (m == 1 && !self.cvc(k)) {
                self.b.truncate(k);
            }
        }
    }

    /// ll → l when `m > 1`.
    fn step5b(&mut self) {
        let k = self.len();
        if self.double_consonant(k) && self.last() == b'l' && self.measure(k) > 1 {
            self.b.pop();
        }
    }
}
