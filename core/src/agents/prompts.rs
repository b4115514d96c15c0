//! Deterministic prompt construction for each intent.
//!
//! The `generate_structure` system prompt asks the model for exactly one
//! fenced JSON record. Models do not always comply, so nothing downstream may
//! rely on it: see [`crate::extraction`].

use super::intent::{Intent, IntentKind};

const BASE_PROMPT: &str = "あなたは専門的な化学知識を持つChemGPTアシスタントです。化学構造の生成、分析、化学反応の予測を正確に行います。";

const GENERATE_CONTRACT: &str = "化合物名から化学構造を生成する際は、以下の規則に従って回答してください：

1. 化合物の概要説明（50-100文字）を通常の文章で書く
2. 構造は必ず次の形式のJSONコードブロックを1つだけ含める（キーは compound_name と smiles の2つのみ）：
```json
{\"compound_name\": \"化合物名\", \"smiles\": \"SMILES構造式\"}
```
3. 化学的特徴（分子式、分子量、主要官能基、用途など）と安全性の注意点を簡潔に続ける
4. Markdownの見出し、太字、表、箇条書き記号などの装飾は使わない。JSONコードブロック以外はプレーンテキストのみ

例：
アスピリン（アセチルサリチル酸）は解熱・鎮痛・抗炎症作用を持つ代表的なNSAIDです。

```json
{\"compound_name\": \"アスピリン\", \"smiles\": \"CC(=O)OC1=CC=CC=C1C(=O)O\"}
```

分子式はC9H8O4、分子量は180.16 g/molで、エステル基とカルボキシル基を持ちます。胃腸障害のリスクがあるため食後の服用が推奨されます。";

const ANALYZE_GUIDE: &str = "化学構造を分析する際は、以下の項目について詳しく説明してください：

1. 構造の概要と化合物名（既知の場合）
2. 分子式と分子量
3. 主要な官能基とその特徴
4. 化学的性質（極性、酸性・塩基性、反応性など）
5. 生物活性や用途（既知の場合）
6. 合成方法や前駆体化合物
7. 安全性情報";

const REACTION_GUIDE: &str = "化学反応を予測する際は、以下の点を含めて回答してください：
- 予想される主生成物と副生成物
- 反応の種類と反応機構の概要
- 反応条件が結果に与える影響
- 安全性や取り扱いの注意点";

const GENERAL_GUIDE: &str = "化学に関する質問には以下の点を考慮して回答してください：
- 正確な科学的根拠に基づく情報
- 分かりやすい説明と具体例
- 安全性や取り扱い注意点
- 関連する化合物や反応の提示
- 実用的な応用例や背景知識";

pub fn build_system(kind: IntentKind) -> String {
    let guide = match kind {
        IntentKind::GenerateStructure => GENERATE_CONTRACT,
        IntentKind::AnalyzeStructure => ANALYZE_GUIDE,
        IntentKind::PredictReaction => REACTION_GUIDE,
        IntentKind::GeneralChemistry => GENERAL_GUIDE,
    };
    format!("{BASE_PROMPT}\n\n{guide}")
}

pub fn build_user(intent: &Intent) -> String {
    match intent {
        Intent::GenerateStructure { prompt } => format!(
            "以下の化合物について、詳細な情報と構造を生成してください：\n\n化合物名: {}\n\n指定された形式に従い、JSONコードブロックを1つだけ含めて回答してください。",
            prompt.trim()
        ),
        Intent::AnalyzeStructure {
            structure,
            question,
        } => format!(
            "以下の化学構造について詳細な分析を行ってください：\n\n構造データ: {}\n分析要求: {}\n\n構造の特徴、化学的性質、用途、安全性について包括的に分析してください。",
            structure.trim(),
            question.trim()
        ),
        Intent::GeneralChemistry { question, context } => {
            let mut message = format!(
                "以下の化学に関する質問にお答えください：\n\n質問: {}",
                question.trim()
            );
            if let Some(context) = context {
                message.push_str(&format!("\n文脈: {}", context.trim()));
            }
            message.push_str("\n\n科学的根拠に基づき、分かりやすく詳細な説明をお願いします。");
            message
        }
        Intent::PredictReaction {
            reactants,
            conditions,
        } => {
            let mut message = format!(
                "以下の反応物から生成する化合物を予測してください：\n\n反応物: {}",
                reactants
                    .iter()
                    .map(|r| r.trim())
                    .filter(|r| !r.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            if let Some(conditions) = conditions {
                message.push_str(&format!("\n反応条件: {}", conditions.trim()));
            }
            message.push_str("\n\n生成物、反応機構、注意点を説明してください。");
            message
        }
    }
}
