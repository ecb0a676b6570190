//! Supported UI languages and localized tag labels.
//!
//! # Responsibility
//! - Parse and format the persisted language code.
//! - Map built-in tag keys to localized labels, falling back to the raw key.
//!
//! # Invariants
//! - Unknown language codes never parse; callers fall back to `Language::En`.
//! - `LocaleTable::label` never fails: custom keys display verbatim.

use crate::model::tag::{BuiltinTag, TagKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ko,
    Ja,
    Es,
}

impl Language {
    pub const ALL: [Language; 4] = [Self::En, Self::Ko, Self::Ja, Self::Es];

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ko => "ko",
            Self::Ja => "ja",
            Self::Es => "es",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        match value.trim() {
            "en" => Some(Self::En),
            "ko" => Some(Self::Ko),
            "ja" => Some(Self::Ja),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Output-language instruction appended to STARR refinement prompts.
    pub fn refine_instruction(self) -> &'static str {
        match self {
            Self::En => "Output all fields in English.",
            Self::Ko => "모든 필드를 한국어로 작성하세요.",
            Self::Ja => "すべてのフィールドを日本語で作成してください。",
            Self::Es => "Escribe todos los campos en español.",
        }
    }
}

/// Tag label lookup for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleTable {
    language: Language,
}

impl LocaleTable {
    pub fn for_language(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Display label for a stored tag key.
    ///
    /// Built-in keys resolve through the language table; anything else is
    /// returned verbatim.
    pub fn label<'a>(&self, key: &'a str) -> &'a str {
        self.label_of(TagKey::parse(key))
    }

    /// Display label for a classified tag key.
    pub fn label_of<'a>(&self, key: TagKey<'a>) -> &'a str {
        match key {
            TagKey::BuiltIn(tag) => builtin_label(self.language, tag),
            TagKey::Custom(value) => value,
        }
    }
}

fn builtin_label(language: Language, tag: BuiltinTag) -> &'static str {
    match language {
        Language::En => tag.key(),
        Language::Ko => match tag {
            BuiltinTag::Art => "예술",
            BuiltinTag::Science => "과학",
            BuiltinTag::Sports => "스포츠",
            BuiltinTag::Volunteering => "봉사활동",
            BuiltinTag::Career => "진로",
            BuiltinTag::Coding => "코딩",
            BuiltinTag::Music => "음악",
            BuiltinTag::Leadership => "리더십",
            BuiltinTag::Language => "언어",
            BuiltinTag::Reading => "독서",
            BuiltinTag::Curiosity => "호기심",
            BuiltinTag::Collaboration => "협업",
            BuiltinTag::Grit => "끈기",
            BuiltinTag::ProblemSolving => "문제 해결",
            BuiltinTag::Creativity => "창의성",
            BuiltinTag::Empathy => "공감",
            BuiltinTag::Communication => "의사소통",
        },
        Language::Ja => match tag {
            BuiltinTag::Art => "芸術",
            BuiltinTag::Science => "科学",
            BuiltinTag::Sports => "スポーツ",
            BuiltinTag::Volunteering => "ボランティア",
            BuiltinTag::Career => "キャリア",
            BuiltinTag::Coding => "プログラミング",
            BuiltinTag::Music => "音楽",
            BuiltinTag::Leadership => "リーダーシップ",
            BuiltinTag::Language => "語学",
            BuiltinTag::Reading => "読書",
            BuiltinTag::Curiosity => "好奇心",
            BuiltinTag::Collaboration => "協働",
            BuiltinTag::Grit => "やり抜く力",
            BuiltinTag::ProblemSolving => "問題解決",
            BuiltinTag::Creativity => "創造性",
            BuiltinTag::Empathy => "共感",
            BuiltinTag::Communication => "コミュニケーション",
        },
        Language::Es => match tag {
            BuiltinTag::Art => "Arte",
            BuiltinTag::Science => "Ciencia",
            BuiltinTag::Sports => "Deportes",
            BuiltinTag::Volunteering => "Voluntariado",
            BuiltinTag::Career => "Carrera",
            BuiltinTag::Coding => "Programación",
            BuiltinTag::Music => "Música",
            BuiltinTag::Leadership => "Liderazgo",
            BuiltinTag::Language => "Idiomas",
            BuiltinTag::Reading => "Lectura",
            BuiltinTag::Curiosity => "Curiosidad",
            BuiltinTag::Collaboration => "Colaboración",
            BuiltinTag::Grit => "Perseverancia",
            BuiltinTag::ProblemSolving => "Resolución de problemas",
            BuiltinTag::Creativity => "Creatividad",
            BuiltinTag::Empathy => "Empatía",
            BuiltinTag::Communication => "Comunicación",
        },
    }
}
