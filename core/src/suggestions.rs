//! Follow-up prompt heuristics shown under each assistant answer.

use crate::agents::Intent;
use crate::extraction::ChemicalStructure;

pub const MAX_SUGGESTIONS: usize = 4;
const MAX_CATEGORY_EXTRAS: usize = 2;
const MAX_KEYWORD_HITS: usize = 2;

struct Category {
    terms: &'static [&'static str],
    templates: [&'static str; 2],
}

const CATEGORIES: &[Category] = &[
    Category {
        terms: &["医薬", "薬", "drug", "pharmaceutical"],
        templates: ["{name}の副作用は？", "{name}の作用機序は？"],
    },
    Category {
        terms: &["有機溶媒", "溶媒", "solvent"],
        templates: ["{name}の沸点は？", "{name}の毒性について"],
    },
    Category {
        terms: &["触媒", "catalyst"],
        templates: ["{name}を使った反応例", "{name}の触媒活性"],
    },
];

const DOMAIN_KEYWORDS: [&str; 20] = [
    "ベンゼン環",
    "カルボニル基",
    "ヒドロキシ基",
    "アミノ基",
    "カルボキシル基",
    "エステル基",
    "エーテル基",
    "アルデヒド基",
    "ケトン基",
    "ニトロ基",
    "芳香族",
    "脂肪族",
    "不飽和",
    "立体異性体",
    "エナンチオマー",
    "酸化反応",
    "還元反応",
    "付加反応",
    "置換反応",
    "脱離反応",
];

const ANALYZE_DEFAULTS: [&str; 3] = [
    "類似構造の化合物は？",
    "この構造の合成方法は？",
    "この化合物の用途は？",
];

const GENERIC_DEFAULTS: [&str; 3] = [
    "関連する化合物を表示",
    "この内容について詳しく",
    "実例を教えて",
];

/// Between three and four follow-up prompts for an answer.
pub fn suggest(
    sanitized: &str,
    intent: &Intent,
    structures: &[ChemicalStructure],
) -> Vec<String> {
    let mut suggestions: Vec<String> = match (intent, structures.first()) {
        (Intent::GenerateStructure { prompt }, Some(first)) => {
            let name = first
                .label
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .unwrap_or(prompt.as_str());
            let mut base = vec![
                format!("{name}の反応性について教えて"),
                format!("{name}の合成方法は？"),
                format!("{name}の類似化合物を表示"),
            ];
            base.extend(
                category_suggestions(sanitized, name)
                    .into_iter()
                    .take(MAX_CATEGORY_EXTRAS),
            );
            base
        }
        (Intent::AnalyzeStructure { .. }, _) => {
            ANALYZE_DEFAULTS.iter().map(|s| s.to_string()).collect()
        }
        _ => GENERIC_DEFAULTS.iter().map(|s| s.to_string()).collect(),
    };

    for keyword in keyword_hits(sanitized) {
        if suggestions.len() > MAX_SUGGESTIONS {
            break;
        }
        suggestions.push(format!("{keyword}について詳しく"));
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn category_suggestions(text: &str, name: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    CATEGORIES
        .iter()
        .filter(|c| c.terms.iter().any(|t| lowered.contains(&t.to_lowercase())))
        .flat_map(|c| c.templates.iter().map(|t| t.replace("{name}", name)))
        .collect()
}

fn keyword_hits(text: &str) -> Vec<&'static str> {
    DOMAIN_KEYWORDS
        .iter()
        .copied()
        .filter(|k| text.contains(k))
        .take(MAX_KEYWORD_HITS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aspirin() -> Vec<ChemicalStructure> {
        vec![ChemicalStructure::smiles("CC(=O)OC1=CC=CC=C1C(=O)O", "アスピリン")]
    }

    #[test]
    fn generate_with_structure_templates_on_label() {
        let out = suggest("plain", &Intent::generate("aspirin please"), &aspirin());
        assert_eq!(
            out,
            vec![
                "アスピリンの反応性について教えて",
                "アスピリンの合成方法は？",
                "アスピリンの類似化合物を表示",
            ]
        );
    }

    #[test]
    fn category_hits_are_case_insensitive() {
        let out = suggest(
            "A common DRUG and Catalyst",
            &Intent::generate("x"),
            &aspirin(),
        );
        assert_eq!(out.len(), 4);
        assert_eq!(out[3], "アスピリンの副作用は？");
    }

    #[test]
    fn generate_without_structures_uses_generic_prompts() {
        let out = suggest("nothing found", &Intent::generate("??"), &[]);
        assert_eq!(out, GENERIC_DEFAULTS.to_vec());
    }

    #[test]
    fn analyze_uses_fixed_prompts_plus_keywords() {
        let out = suggest(
            "ベンゼン環と芳香族性、エステル基",
            &Intent::analyze("c1ccccc1", None),
            &[],
        );
        assert_eq!(&out[..3], &ANALYZE_DEFAULTS.map(String::from));
        assert_eq!(out[3], "ベンゼン環について詳しく");
    }

    #[test]
    fn length_is_always_three_or_four() {
        let texts = [
            "",
            "薬 溶媒 触媒 ベンゼン環 アミノ基 ニトロ基",
            "芳香族",
        ];
        let intents = [
            Intent::generate("アスピリン"),
            Intent::analyze("CCO", None),
            Intent::ask("q", None),
            Intent::predict(vec!["CCO".into()], None),
        ];
        for text in texts {
            for intent in &intents {
                for structures in [aspirin(), vec![]] {
                    let n = suggest(text, intent, &structures).len();
                    assert!((3..=4).contains(&n), "{text:?} {intent:?} -> {n}");
                }
            }
        }
    }
}
