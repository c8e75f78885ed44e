//! Complexity levels and leveled explanations.
//!
//! Leveled content carries one explanation per complexity rank, from a lay
//! summary (rank 1) to expert detail (rank 5).

use std::collections::BTreeMap;

use crate::well_known;

/// Complexity rank of an explanation.
///
/// # Examples
///
/// ```
/// use medcontent_types::ComplexityLevel;
///
/// let level = ComplexityLevel::from_rank(3).unwrap();
/// assert_eq!(level, ComplexityLevel::Standard);
/// assert_eq!(level.rank(), 3);
/// assert_eq!(level.audience(), "College level");
/// assert_eq!(ComplexityLevel::from_rank(6), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComplexityLevel {
    /// Rank 1, patient-friendly.
    Simple,
    /// Rank 2.
    Basic,
    /// Rank 3.
    Standard,
    /// Rank 4.
    Advanced,
    /// Rank 5, medical professional.
    Expert,
}

impl ComplexityLevel {
    /// All levels in ascending rank order.
    pub const ALL: [Self; 5] = [
        Self::Simple,
        Self::Basic,
        Self::Standard,
        Self::Advanced,
        Self::Expert,
    ];

    /// Lowest rank.
    pub const MIN_RANK: u8 = 1;
    /// Highest rank.
    pub const MAX_RANK: u8 = 5;

    /// Creates a level from its numeric rank.
    ///
    /// Returns `None` outside `1..=5`.
    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Self::Simple),
            2 => Some(Self::Basic),
            3 => Some(Self::Standard),
            4 => Some(Self::Advanced),
            5 => Some(Self::Expert),
            _ => None,
        }
    }

    /// Returns the numeric rank (1..=5).
    pub fn rank(self) -> u8 {
        match self {
            Self::Simple => 1,
            Self::Basic => 2,
            Self::Standard => 3,
            Self::Advanced => 4,
            Self::Expert => 5,
        }
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Basic => "Basic",
            Self::Standard => "Standard",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }

    /// Intended reader.
    pub fn audience(self) -> &'static str {
        match self {
            Self::Simple => "8th grade level",
            Self::Basic => "High school level",
            Self::Standard => "College level",
            Self::Advanced => "Graduate level",
            Self::Expert => "Medical professional",
        }
    }
}

/// A term introduced at a given level, with its definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyTerm {
    /// The term.
    pub term: String,
    /// Its definition.
    pub definition: String,
}

/// One complexity tier of explanation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LevelContent {
    /// Rank this content was authored for. Must equal its key in [`Levels`].
    pub level: u8,
    /// One or two sentence summary.
    pub summary: String,
    /// Full explanation (markdown).
    pub explanation: String,
    /// Terms introduced at this level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub key_terms: Vec<KeyTerm>,
    /// Analogies for lay readers.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub analogies: Option<Vec<String>>,
    /// Worked examples.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub examples: Option<Vec<String>>,
    /// Notes for clinicians.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub clinical_notes: Option<String>,
    /// Points to cover when counseling a patient.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub patient_counseling_points: Option<Vec<String>>,
}

impl LevelContent {
    /// Returns the typed rank, or `None` if `level` is out of range.
    pub fn complexity(&self) -> Option<ComplexityLevel> {
        ComplexityLevel::from_rank(self.level)
    }

    /// Appends every free-text field of this level to `out`.
    pub fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.summary);
        out.push(&self.explanation);
        for key_term in &self.key_terms {
            out.push(&key_term.term);
            out.push(&key_term.definition);
        }
        for list in [&self.analogies, &self.examples, &self.patient_counseling_points]
            .into_iter()
            .flatten()
        {
            out.extend(list.iter().map(String::as_str));
        }
        if let Some(notes) = &self.clinical_notes {
            out.push(notes);
        }
    }
}

/// Rank-keyed map of leveled content.
///
/// Any numeric rank is accepted on construction so that gaps and
/// out-of-range ranks can be reported by validation rather than rejected by
/// the parser. A complete map holds exactly ranks 1 through 5.
///
/// With the `serde` feature the map is an object keyed by the decimal rank
/// (`{"1": {...}, "2": {...}}`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "BTreeMap<String, LevelContent>",
        into = "BTreeMap<String, LevelContent>"
    )
)]
pub struct Levels(BTreeMap<u8, LevelContent>);

impl Levels {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts content under `rank`, replacing any previous entry.
    pub fn insert(&mut self, rank: u8, content: LevelContent) -> Option<LevelContent> {
        self.0.insert(rank, content)
    }

    /// Returns the content for a level, if present.
    pub fn get(&self, level: ComplexityLevel) -> Option<&LevelContent> {
        self.0.get(&level.rank())
    }

    /// Returns the content stored under a raw rank, if present.
    pub fn get_rank(&self, rank: u8) -> Option<&LevelContent> {
        self.0.get(&rank)
    }

    /// Iterates `(rank, content)` pairs in ascending rank order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &LevelContent)> {
        self.0.iter().map(|(rank, content)| (*rank, content))
    }

    /// Stored ranks in ascending order.
    pub fn ranks(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.keys().copied()
    }

    /// Ranks in `1..=5` with no content.
    pub fn missing_ranks(&self) -> Vec<u8> {
        (ComplexityLevel::MIN_RANK..=ComplexityLevel::MAX_RANK)
            .filter(|rank| !self.0.contains_key(rank))
            .collect()
    }

    /// Stored ranks outside `1..=5`.
    pub fn unexpected_ranks(&self) -> Vec<u8> {
        self.ranks()
            .filter(|rank| ComplexityLevel::from_rank(*rank).is_none())
            .collect()
    }

    /// Returns true if exactly ranks 1..=5 are present and every entry's
    /// `level` equals its key.
    pub fn is_complete(&self) -> bool {
        self.0.len() == well_known::LEVEL_COUNT
            && self.missing_ranks().is_empty()
            && self.unexpected_ranks().is_empty()
            && self.0.iter().all(|(rank, content)| content.level == *rank)
    }

    /// Number of stored levels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no level is stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<LevelContent> for Levels {
    /// Keys each content by its own `level` field.
    fn from_iter<I: IntoIterator<Item = LevelContent>>(iter: I) -> Self {
        Self(iter.into_iter().map(|c| (c.level, c)).collect())
    }
}

/// Error for a level key that is not a decimal rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLevelKey(pub String);

impl std::fmt::Display for InvalidLevelKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid level key '{}' (expected a rank such as \"1\")", self.0)
    }
}

impl std::error::Error for InvalidLevelKey {}

impl TryFrom<BTreeMap<String, LevelContent>> for Levels {
    type Error = InvalidLevelKey;

    fn try_from(map: BTreeMap<String, LevelContent>) -> Result<Self, Self::Error> {
        map.into_iter()
            .map(|(key, content)| {
                key.trim()
                    .parse::<u8>()
                    .map(|rank| (rank, content))
                    .map_err(|_| InvalidLevelKey(key))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Self)
    }
}

impl From<Levels> for BTreeMap<String, LevelContent> {
    fn from(levels: Levels) -> Self {
        levels
            .0
            .into_iter()
            .map(|(rank, content)| (rank.to_string(), content))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(rank: u8) -> LevelContent {
        LevelContent {
            level: rank,
            summary: format!("Summary {}", rank),
            explanation: format!("Explanation {}", rank),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_levels() {
        let levels: Levels = (1..=5).map(level).collect();
        assert!(levels.is_complete());
        assert!(levels.missing_ranks().is_empty());
        assert_eq!(levels.get(ComplexityLevel::Expert).unwrap().level, 5);
    }

    #[test]
    fn test_missing_and_unexpected_ranks() {
        let levels: Levels = [1, 2, 4, 5, 7].into_iter().map(level).collect();
        assert!(!levels.is_complete());
        assert_eq!(levels.missing_ranks(), vec![3]);
        assert_eq!(levels.unexpected_ranks(), vec![7]);
    }

    #[test]
    fn test_mismatched_level_field_is_incomplete() {
        let mut levels: Levels = (1..=5).map(level).collect();
        levels.insert(2, level(4));
        assert!(levels.missing_ranks().is_empty());
        assert!(!levels.is_complete());
    }

    #[test]
    fn test_collect_text_includes_optional_lists() {
        let content = LevelContent {
            key_terms: vec![KeyTerm {
                term: "malar rash".into(),
                definition: "butterfly-shaped facial rash".into(),
            }],
            analogies: Some(vec!["like a sunburn".into()]),
            clinical_notes: Some("check complement".into()),
            ..level(1)
        };
        let mut out = Vec::new();
        content.collect_text(&mut out);
        assert!(out.contains(&"malar rash"));
        assert!(out.contains(&"like a sunburn"));
        assert!(out.contains(&"check complement"));
        assert_eq!(out.len(), 6);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_levels_serialize_with_string_keys() {
        let levels: Levels = [1, 2].into_iter().map(level).collect();
        let json = serde_json::to_value(&levels).unwrap();
        assert!(json.get("1").is_some());
        assert!(json.get("2").is_some());

        let parsed: Levels = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, levels);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_levels_reject_non_numeric_key() {
        let json = r#"{"basic": {"level": 1, "summary": "s", "explanation": "e"}}"#;
        assert!(serde_json::from_str::<Levels>(json).is_err());
    }
}
