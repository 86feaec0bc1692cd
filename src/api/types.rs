use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// CEFR proficiency tier. The backend tags both word difficulty and
/// sentence assessments with one of these; anything else is a decode error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CefrLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        CefrLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| format!("unknown CEFR level: {s}"))
    }
}

/// Practice score, validated into `0..=10` at the decode boundary.
/// Integral JSON floats (`7.0`) are accepted; anything else is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64")]
pub struct Score(u8);

impl Score {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 10).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Score {
    type Error = String;

    fn try_from(raw: f64) -> Result<Self, Self::Error> {
        if !raw.is_finite() || raw.fract() != 0.0 {
            return Err(format!("score must be an integer, got {raw}"));
        }
        if !(0.0..=10.0).contains(&raw) {
            return Err(format!("score out of range 0..=10: {raw}"));
        }
        Ok(Self(raw as u8))
    }
}

/// A vocabulary word handed out by the backend for one practice round.
/// Immutable once fetched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub word: String,
    #[serde(default)]
    pub pronunciation: Option<String>,
    pub definition: String,
    #[serde(default)]
    pub example_sentence: Option<String>,
    pub difficulty_level: CefrLevel,
}

/// Backend assessment of one submitted sentence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PracticeResult {
    pub score: Score,
    pub cefr_level: CefrLevel,
    pub feedback: String,
    #[serde(default)]
    pub corrected_sentence: Option<String>,
}

/// Read-only dashboard snapshot. Every numeric field defaults to zero so a
/// sparse or empty payload still renders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_sessions: u64,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default, deserialize_with = "de_optional_level")]
    pub most_common_level: Option<CefrLevel>,
    #[serde(default)]
    pub recent_sessions: Vec<SessionSummary>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: i64,
    pub score: Score,
    pub user_sentence: String,
    #[serde(deserialize_with = "de_utc_timestamp")]
    pub practiced_at: DateTime<Utc>,
}

/// The backend sends the string "N/A" (rather than null) when no sessions
/// exist yet; treat it, an empty string, and null all as absent.
fn de_optional_level<'de, D>(deserializer: D) -> Result<Option<CefrLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") | Some("N/A") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Timestamps arrive as ISO-8601, with or without a timezone suffix
/// (the backend emits naive UTC via `isoformat()`).
fn de_utc_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_decodes_with_all_fields() {
        let json = r#"{
            "id": 42,
            "word": "serendipity",
            "pronunciation": "/ˌsɛrənˈdɪpɪti/",
            "definition": "finding something good without looking for it",
            "example_sentence": "Meeting her was pure serendipity.",
            "difficulty_level": "C1",
            "created_at": "2025-01-01T00:00:00"
        }"#;
        let word: Word = serde_json::from_str(json).unwrap();
        assert_eq!(word.id, 42);
        assert_eq!(word.difficulty_level, CefrLevel::C1);
        assert!(word.pronunciation.is_some());
    }

    #[test]
    fn word_decodes_without_optional_fields() {
        let json = r#"{
            "id": 7,
            "word": "cat",
            "definition": "a small domesticated feline",
            "difficulty_level": "A1"
        }"#;
        let word: Word = serde_json::from_str(json).unwrap();
        assert_eq!(word.pronunciation, None);
        assert_eq!(word.example_sentence, None);
    }

    #[test]
    fn word_rejects_unknown_difficulty() {
        let json = r#"{
            "id": 7,
            "word": "cat",
            "definition": "a small domesticated feline",
            "difficulty_level": "Expert"
        }"#;
        assert!(serde_json::from_str::<Word>(json).is_err());
    }

    #[test]
    fn score_accepts_integral_values_only() {
        assert_eq!(serde_json::from_str::<Score>("7").unwrap().value(), 7);
        assert_eq!(serde_json::from_str::<Score>("7.0").unwrap().value(), 7);
        assert!(serde_json::from_str::<Score>("7.5").is_err());
        assert!(serde_json::from_str::<Score>("11").is_err());
        assert!(serde_json::from_str::<Score>("-1").is_err());
    }

    #[test]
    fn practice_result_decodes_without_correction() {
        let json = r#"{
            "session_id": 9,
            "score": 8,
            "cefr_level": "B2",
            "feedback": "Good use of the word.",
            "corrected_sentence": null
        }"#;
        let result: PracticeResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.score, Score::new(8).unwrap());
        assert_eq!(result.corrected_sentence, None);
    }

    #[test]
    fn dashboard_stats_defaults_from_empty_object() {
        let stats: DashboardStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.most_common_level, None);
        assert!(stats.recent_sessions.is_empty());
    }

    #[test]
    fn most_common_level_placeholder_is_absent() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"most_common_level": "N/A"}"#).unwrap();
        assert_eq!(stats.most_common_level, None);

        let stats: DashboardStats =
            serde_json::from_str(r#"{"most_common_level": "B1"}"#).unwrap();
        assert_eq!(stats.most_common_level, Some(CefrLevel::B1));

        assert!(serde_json::from_str::<DashboardStats>(r#"{"most_common_level": "Z9"}"#).is_err());
    }

    #[test]
    fn session_timestamp_accepts_naive_and_rfc3339() {
        let json = r#"{
            "session_id": 1,
            "score": 6,
            "user_sentence": "I eat apples.",
            "practiced_at": "2025-06-01T12:30:00.123456"
        }"#;
        let session: SessionSummary = serde_json::from_str(json).unwrap();
        assert_eq!(session.practiced_at.timestamp(), 1748781000);

        let json = r#"{
            "session_id": 2,
            "score": 6,
            "user_sentence": "I eat apples.",
            "practiced_at": "2025-06-01T12:30:00Z"
        }"#;
        let session: SessionSummary = serde_json::from_str(json).unwrap();
        assert_eq!(session.practiced_at.timestamp(), 1748781000);
    }

    #[test]
    fn cefr_level_parses_case_insensitively() {
        assert_eq!("b2".parse::<CefrLevel>().unwrap(), CefrLevel::B2);
        assert!("B7".parse::<CefrLevel>().is_err());
    }
}
