//! Sentiment record types and their schema rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::AnalysisError;

/// Accepted range of the `sentiment` score.
pub const SENTIMENT_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Closed set of emotion labels. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Neutral,
    Excited,
    Calm,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Neutral,
        Emotion::Excited,
        Emotion::Calm,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Neutral => "neutral",
            Emotion::Excited => "excited",
            Emotion::Calm => "calm",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| {
                AnalysisError::Validation(format!(
                    "emotion '{}' is not one of {}",
                    s,
                    Emotion::ALL.map(|e| e.as_str()).join(", ")
                ))
            })
    }
}

/// Analysis request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
}

/// Validated sentiment record, serialized flat as the response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: f64,
    pub emotion: Emotion,
    pub keywords: Vec<String>,
}

/// Allowed keyword count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for KeywordBounds {
    fn default() -> Self {
        Self { min: 3, max: 5 }
    }
}

impl From<&aura_common::AnalysisConfig> for KeywordBounds {
    fn from(config: &aura_common::AnalysisConfig) -> Self {
        Self {
            min: config.min_keywords,
            max: config.max_keywords,
        }
    }
}

/// Shape of the object the provider is asked to return.
///
/// Unknown keys are rejected; the emotion stays a string here so an unknown
/// label is reported by name rather than as a serde variant error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSentiment {
    sentiment: f64,
    emotion: String,
    keywords: Vec<String>,
}

impl SentimentResult {
    /// Check a parsed JSON value against the record schema.
    pub fn from_value(
        value: serde_json::Value,
        bounds: KeywordBounds,
    ) -> Result<Self, AnalysisError> {
        if !value.is_object() {
            return Err(AnalysisError::Validation(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }

        let raw: RawSentiment = serde_json::from_value(value)
            .map_err(|e| AnalysisError::Validation(e.to_string()))?;

        if !raw.sentiment.is_finite() || !SENTIMENT_RANGE.contains(&raw.sentiment) {
            return Err(AnalysisError::Validation(format!(
                "sentiment {} is outside [{}, {}]",
                raw.sentiment,
                SENTIMENT_RANGE.start(),
                SENTIMENT_RANGE.end()
            )));
        }

        let emotion: Emotion = raw.emotion.parse()?;

        let count = raw.keywords.len();
        if count < bounds.min || count > bounds.max {
            return Err(AnalysisError::Validation(format!(
                "expected {} to {} keywords, got {}",
                bounds.min, bounds.max, count
            )));
        }
        if raw.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(AnalysisError::Validation(
                "keywords must not be blank".into(),
            ));
        }

        Ok(Self {
            sentiment: raw.sentiment,
            emotion,
            keywords: raw.keywords,
        })
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(value: serde_json::Value) -> Result<SentimentResult, AnalysisError> {
        SentimentResult::from_value(value, KeywordBounds::default())
    }

    #[test]
    fn test_valid_record() {
        let result = validate(json!({
            "sentiment": 0.9,
            "emotion": "happy",
            "keywords": ["love", "this", "product"]
        }))
        .unwrap();

        assert_eq!(result.sentiment, 0.9);
        assert_eq!(result.emotion, Emotion::Happy);
        assert_eq!(result.keywords, vec!["love", "this", "product"]);
    }

    #[test]
    fn test_integer_bounds_accepted() {
        for score in [json!(0), json!(1), json!(0.0), json!(1.0)] {
            let result = validate(json!({
                "sentiment": score,
                "emotion": "calm",
                "keywords": ["a", "b", "c"]
            }));
            assert!(result.is_ok(), "score {} should be accepted", score);
        }
    }

    #[test]
    fn test_out_of_range_sentiment() {
        for score in [1.5, -0.1] {
            let err = validate(json!({
                "sentiment": score,
                "emotion": "happy",
                "keywords": ["a", "b", "c"]
            }))
            .unwrap_err();
            assert!(matches!(err, AnalysisError::Validation(_)));
        }
    }

    #[test]
    fn test_unknown_emotion() {
        let err = validate(json!({
            "sentiment": 0.2,
            "emotion": "furious",
            "keywords": ["a", "b", "c"]
        }))
        .unwrap_err();

        assert!(matches!(err, AnalysisError::Validation(_)));
        assert!(err.to_string().contains("furious"));
    }

    #[test]
    fn test_emotion_is_case_sensitive() {
        assert!("Happy".parse::<Emotion>().is_err());
        assert!("HAPPY".parse::<Emotion>().is_err());
        assert_eq!("happy".parse::<Emotion>().unwrap(), Emotion::Happy);
    }

    #[test]
    fn test_emotion_round_trip_names() {
        for emotion in Emotion::ALL {
            let json = serde_json::to_value(emotion).unwrap();
            assert_eq!(json, json!(emotion.as_str()));
            assert_eq!(emotion.as_str().parse::<Emotion>().unwrap(), emotion);
        }
    }

    #[test]
    fn test_keyword_count_enforced() {
        let too_few = json!({"sentiment": 0.5, "emotion": "neutral", "keywords": ["one"]});
        let too_many = json!({
            "sentiment": 0.5,
            "emotion": "neutral",
            "keywords": ["a", "b", "c", "d", "e", "f"]
        });

        assert!(matches!(validate(too_few), Err(AnalysisError::Validation(_))));
        assert!(matches!(validate(too_many), Err(AnalysisError::Validation(_))));
    }

    #[test]
    fn test_custom_keyword_bounds() {
        let value = json!({"sentiment": 0.9, "emotion": "happy", "keywords": ["love"]});
        let result = SentimentResult::from_value(value, KeywordBounds { min: 1, max: 5 });
        assert!(result.is_ok());
    }

    #[test]
    fn test_blank_keyword_rejected() {
        let err = validate(json!({
            "sentiment": 0.5,
            "emotion": "neutral",
            "keywords": ["a", " ", "c"]
        }))
        .unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));
    }

    #[test]
    fn test_missing_and_extra_keys() {
        let missing = json!({"sentiment": 0.5, "emotion": "neutral"});
        let extra = json!({
            "sentiment": 0.5,
            "emotion": "neutral",
            "keywords": ["a", "b", "c"],
            "confidence": 0.8
        });

        assert!(matches!(validate(missing), Err(AnalysisError::Validation(_))));
        assert!(matches!(validate(extra), Err(AnalysisError::Validation(_))));
    }

    #[test]
    fn test_wrong_types() {
        let string_score = json!({"sentiment": "0.5", "emotion": "neutral", "keywords": ["a", "b", "c"]});
        let numeric_keywords = json!({"sentiment": 0.5, "emotion": "neutral", "keywords": [1, 2, 3]});

        assert!(matches!(validate(string_score), Err(AnalysisError::Validation(_))));
        assert!(matches!(validate(numeric_keywords), Err(AnalysisError::Validation(_))));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = validate(json!([0.5, "happy"])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_serializes_flat() {
        let result = SentimentResult {
            sentiment: 0.25,
            emotion: Emotion::Sad,
            keywords: vec!["rain".into(), "alone".into(), "cold".into()],
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"sentiment": 0.25, "emotion": "sad", "keywords": ["rain", "alone", "cold"]})
        );
    }
}
