use std::fmt;

use serde::Serialize;

pub const DEFAULT_ANALYSIS_QUESTION: &str = "この化合物について教えてください";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    GenerateStructure,
    AnalyzeStructure,
    GeneralChemistry,
    PredictReaction,
}

impl IntentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GenerateStructure => "generate_structure",
            Self::AnalyzeStructure => "analyze_structure",
            Self::GeneralChemistry => "general_chemistry",
            Self::PredictReaction => "predict_reaction",
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user action with its payload. Built per request and consumed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    GenerateStructure {
        prompt: String,
    },
    AnalyzeStructure {
        structure: String,
        question: String,
    },
    GeneralChemistry {
        question: String,
        context: Option<String>,
    },
    PredictReaction {
        reactants: Vec<String>,
        conditions: Option<String>,
    },
}

impl Intent {
    pub fn generate(prompt: impl Into<String>) -> Self {
        Self::GenerateStructure {
            prompt: prompt.into(),
        }
    }

    /// Falls back to a generic "tell me about this compound" question.
    pub fn analyze(structure: impl Into<String>, question: Option<String>) -> Self {
        let question = question
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .unwrap_or_else(|| DEFAULT_ANALYSIS_QUESTION.to_string());
        Self::AnalyzeStructure {
            structure: structure.into(),
            question,
        }
    }

    pub fn ask(question: impl Into<String>, context: Option<String>) -> Self {
        Self::GeneralChemistry {
            question: question.into(),
            context: context.filter(|c| !c.trim().is_empty()),
        }
    }

    pub fn predict(reactants: Vec<String>, conditions: Option<String>) -> Self {
        Self::PredictReaction {
            reactants,
            conditions: conditions.filter(|c| !c.trim().is_empty()),
        }
    }

    pub fn kind(&self) -> IntentKind {
        match self {
            Self::GenerateStructure { .. } => IntentKind::GenerateStructure,
            Self::AnalyzeStructure { .. } => IntentKind::AnalyzeStructure,
            Self::GeneralChemistry { .. } => IntentKind::GeneralChemistry,
            Self::PredictReaction { .. } => IntentKind::PredictReaction,
        }
    }
}
