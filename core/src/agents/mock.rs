//! Canned responses for development and demos.
//!
//! The catalogue is plain model text (generate answers carry the same fenced
//! record a live model is asked for), so mock answers flow through the same
//! extraction and suggestion pipeline as live ones.

use std::borrow::Cow;
use std::time::Duration;

use serde::Deserialize;

use super::intent::Intent;
use crate::errors::AssistError;

const BUILTIN_CATALOGUE: &str = include_str!("mock_responses.json");

#[derive(Debug, Deserialize)]
struct CannedCompound {
    keyword: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct MockCatalogue {
    compounds: Vec<CannedCompound>,
    unknown_compound: String,
    analysis: String,
    general: String,
    reaction: String,
}

#[derive(Debug, Clone)]
pub struct MockProvider {
    catalogue: Cow<'static, str>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            catalogue: Cow::Borrowed(BUILTIN_CATALOGUE),
        }
    }
}

impl MockProvider {
    pub fn from_json(catalogue: impl Into<String>) -> Self {
        Self {
            catalogue: Cow::Owned(catalogue.into()),
        }
    }

    /// Answer `intent` after `delay_ms`. Same intent, same text.
    pub async fn respond(&self, intent: &Intent, delay_ms: u64) -> Result<String, AssistError> {
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        self.canned_text(intent)
    }

    pub fn canned_text(&self, intent: &Intent) -> Result<String, AssistError> {
        let catalogue: MockCatalogue = serde_json::from_str(&self.catalogue)
            .map_err(|err| AssistError::MalformedMockData(err.to_string()))?;

        let text = match intent {
            Intent::GenerateStructure { prompt } => catalogue
                .compounds
                .into_iter()
                .find(|c| !c.keyword.is_empty() && prompt.contains(&c.keyword))
                .map(|c| c.text)
                .unwrap_or_else(|| {
                    catalogue
                        .unknown_compound
                        .replace("{prompt}", or_unknown(prompt))
                }),
            Intent::AnalyzeStructure { .. } => catalogue.analysis,
            Intent::GeneralChemistry { question, .. } => catalogue
                .general
                .replace("{question}", or_unknown(question)),
            Intent::PredictReaction { .. } => catalogue.reaction,
        };
        Ok(text)
    }
}

fn or_unknown(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "不明"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalogue_parses() {
        let mock = MockProvider::default();
        for intent in [
            Intent::generate("x"),
            Intent::analyze("CCO", None),
            Intent::ask("q", None),
            Intent::predict(vec!["CCO".into()], None),
        ] {
            assert!(!mock.canned_text(&intent).unwrap().is_empty());
        }
    }

    #[test]
    fn known_compound_matches_by_substring() {
        let text = MockProvider::default()
            .canned_text(&Intent::generate("カフェインの構造を描いて"))
            .unwrap();
        assert!(text.contains("CN1C=NC2=C1C(=O)N(C(=O)N2C)C"));
    }

    #[test]
    fn unknown_compound_asks_for_detail() {
        let mock = MockProvider::default();
        let text = mock.canned_text(&Intent::generate("謎の物質")).unwrap();
        assert!(text.contains("「謎の物質」"));
        assert!(text.contains("具体的な化合物名"));
        let blank = mock.canned_text(&Intent::generate("  ")).unwrap();
        assert!(blank.contains("「不明」"));
    }

    #[test]
    fn malformed_catalogue_is_reported() {
        let err = MockProvider::from_json("{\"compounds\": 3}")
            .canned_text(&Intent::generate("アスピリン"))
            .unwrap_err();
        assert!(matches!(err, AssistError::MalformedMockData(_)));
    }

    #[tokio::test]
    async fn respond_is_deterministic() {
        let mock = MockProvider::default();
        let intent = Intent::generate("アスピリン");
        let a = mock.respond(&intent, 1).await.unwrap();
        let b = mock.respond(&intent, 0).await.unwrap();
        assert_eq!(a, b);
    }
}
