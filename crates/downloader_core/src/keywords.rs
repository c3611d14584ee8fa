/// One ranked tag derived from the video title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub word: String,
    /// 0..=100
    pub relevance: u8,
}

impl Keyword {
    pub fn new(word: impl Into<String>, relevance: u8) -> Self {
        Self {
            word: word.into(),
            relevance: relevance.min(100),
        }
    }

    pub fn band(&self) -> RelevanceBand {
        RelevanceBand::of(self.relevance)
    }
}

/// Display grouping of relevance scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelevanceBand {
    High,
    Medium,
    Low,
    Minimal,
}

impl RelevanceBand {
    pub fn of(relevance: u8) -> Self {
        match relevance {
            85.. => RelevanceBand::High,
            70..=84 => RelevanceBand::Medium,
            50..=69 => RelevanceBand::Low,
            _ => RelevanceBand::Minimal,
        }
    }
}

/// Keyword analyzer state. Only `Idle` accepts a new analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeywordPanel {
    #[default]
    Idle,
    Analyzing,
    Settled(Vec<Keyword>),
}

impl KeywordPanel {
    pub fn is_idle(&self) -> bool {
        matches!(self, KeywordPanel::Idle)
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self, KeywordPanel::Analyzing)
    }
}
