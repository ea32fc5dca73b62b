use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Word pattern: a letter followed by letters, digits, underscores or
/// apostrophes. Pure-numeric runs never match, so they are dropped.
const WORD_PATTERN: &str = r"(?u)\p{L}[\p{L}\p{N}_']*";

const ENGLISH_STOPWORDS: &[&str] = &[
    "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
    "be","because","been","before","being","below","between","both","but","by",
    "can","can't","cannot","could","couldn't",
    "did","didn't","do","does","doesn't","doing","don't","down","during",
    "each","few","for","from","further",
    "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
    "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
    "let's","me","more","most","mustn't","my","myself",
    "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
    "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
    "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
    "under","until","up","very",
    "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
    "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves",
];

/// Tokenizer configuration. Passed in at construction so multiple
/// configurations can coexist (e.g. a stopword-free tokenizer in tests).
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    pub stopwords: HashSet<String>,
    pub stem: bool,
}

impl Default for TokenizerConfig {
    /// English stopword list with Porter stemming enabled.
    fn default() -> Self {
        Self {
            stopwords: ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect(),
            stem: true,
        }
    }
}

/// Maps raw text to an ordered sequence of normalized tokens.
///
/// Build-time and query-time tokenization must use the same configuration,
/// or document and query weights become incomparable.
pub struct Tokenizer {
    word_re: Regex,
    stemmer: Option<Stemmer>,
    stopwords: HashSet<String>,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            word_re: Regex::new(WORD_PATTERN).expect("valid regex"),
            stemmer: config.stem.then(|| Stemmer::create(Algorithm::English)),
            stopwords: config.stopwords,
        }
    }

    /// Tokenize text using NFKC normalization, lowercasing, stopword removal,
    /// and (if configured) stemming.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        let mut tokens = Vec::new();
        for mat in self.word_re.find_iter(&normalized) {
            let token = mat.as_str();
            if self.stopwords.contains(token) {
                continue;
            }
            let token = match &self.stemmer {
                Some(stemmer) => stemmer.stem(token).to_string(),
                None => token.to_string(),
            };
            tokens.push(token);
        }
        tokens
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}
