use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{EngineSettings, Keyword};

pub const MAX_KEYWORDS: usize = 5;
pub const MIN_RELEVANCE: u8 = 40;
pub const MAX_RELEVANCE: u8 = 100;

/// Padding used when the title yields fewer than [`MAX_KEYWORDS`] words.
pub const FALLBACK_KEYWORDS: [(&str, u8); 5] = [
    ("tutorial", 85),
    ("review", 80),
    ("guide", 75),
    ("howto", 90),
    ("trending", 70),
];

/// Assigns a relevance to one title word. Stands in for a real relevance model.
pub trait RelevanceScorer {
    fn score(&mut self, word: &str) -> u8;
}

/// Uniform random relevance in `MIN_RELEVANCE..=MAX_RELEVANCE`.
///
/// Scores are deliberately non-deterministic; seed the generator with
/// [`RandomScorer::with_rng`] when a repeatable sequence is needed.
pub struct RandomScorer<R> {
    rng: R,
}

impl RandomScorer<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> RandomScorer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RelevanceScorer for RandomScorer<R> {
    fn score(&mut self, _word: &str) -> u8 {
        self.rng.gen_range(MIN_RELEVANCE..=MAX_RELEVANCE)
    }
}

/// Extracts at most [`MAX_KEYWORDS`] ranked keywords from a title.
///
/// The title is lowercased and stripped of everything but `[a-z0-9_]` and
/// whitespace; words of three characters or fewer are dropped and repeated
/// words are scored once. Short results are padded from
/// [`FALLBACK_KEYWORDS`] in order, skipping words already present. The
/// result is sorted by descending relevance.
pub fn analyze(title: &str, scorer: &mut dyn RelevanceScorer) -> Vec<Keyword> {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect();

    let mut keywords: Vec<Keyword> = Vec::new();
    for word in cleaned.split_whitespace() {
        if word.chars().count() <= 3 || keywords.iter().any(|k| k.word == word) {
            continue;
        }
        let relevance = scorer.score(word).clamp(MIN_RELEVANCE, MAX_RELEVANCE);
        keywords.push(Keyword {
            word: word.to_string(),
            relevance,
        });
    }
    sort_by_relevance(&mut keywords);
    keywords.truncate(MAX_KEYWORDS);

    for (word, relevance) in FALLBACK_KEYWORDS {
        if keywords.len() >= MAX_KEYWORDS {
            break;
        }
        if keywords.iter().any(|k| k.word == word) {
            continue;
        }
        keywords.push(Keyword {
            word: word.to_string(),
            relevance,
        });
    }
    sort_by_relevance(&mut keywords);
    keywords
}

/// The fallback list alone, ranked. Used when analysis cannot run at all.
pub fn fallback_keywords() -> Vec<Keyword> {
    let mut keywords: Vec<Keyword> = FALLBACK_KEYWORDS
        .iter()
        .map(|(word, relevance)| Keyword {
            word: word.to_string(),
            relevance: *relevance,
        })
        .collect();
    sort_by_relevance(&mut keywords);
    keywords
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn sort_by_relevance(keywords: &mut [Keyword]) {
    // Stable: equal scores keep title order.
    keywords.sort_by(|a, b| b.relevance.cmp(&a.relevance));
}

#[async_trait::async_trait]
pub trait KeywordService: Send + Sync {
    async fn analyze(&self, title: &str) -> Vec<Keyword>;
}

pub type ScorerFactory = Arc<dyn Fn() -> Box<dyn RelevanceScorer + Send> + Send + Sync>;

/// Local heuristic behind a fixed latency.
#[derive(Clone)]
pub struct SimulatedKeywordService {
    delay: Duration,
    scorer: ScorerFactory,
}

impl SimulatedKeywordService {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            delay: settings.keyword_delay,
            scorer: Arc::new(|| -> Box<dyn RelevanceScorer + Send> {
                Box::new(RandomScorer::from_entropy())
            }),
        }
    }

    pub fn with_scorer(mut self, scorer: ScorerFactory) -> Self {
        self.scorer = scorer;
        self
    }
}

#[async_trait::async_trait]
impl KeywordService for SimulatedKeywordService {
    async fn analyze(&self, title: &str) -> Vec<Keyword> {
        tokio::time::sleep(self.delay).await;
        let mut scorer = (self.scorer)();
        analyze(title, scorer.as_mut())
    }
}
