//! Programming languages a search can target

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported programming languages, keyed by their display strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ProgrammingLanguage {
    Python,
    Java,
    JavaScript,
    TypeScript,
    Go,
    Rust,
    #[serde(rename = "C++")]
    Cpp,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "PHP")]
    Php,
    Kotlin,
    Ruby,
    Scala,
}

impl ProgrammingLanguage {
    pub const ALL: [ProgrammingLanguage; 12] = [
        ProgrammingLanguage::Python,
        ProgrammingLanguage::Java,
        ProgrammingLanguage::JavaScript,
        ProgrammingLanguage::TypeScript,
        ProgrammingLanguage::Go,
        ProgrammingLanguage::Rust,
        ProgrammingLanguage::Cpp,
        ProgrammingLanguage::CSharp,
        ProgrammingLanguage::Php,
        ProgrammingLanguage::Kotlin,
        ProgrammingLanguage::Ruby,
        ProgrammingLanguage::Scala,
    ];

    /// The externally-facing display string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgrammingLanguage::Python => "Python",
            ProgrammingLanguage::Java => "Java",
            ProgrammingLanguage::JavaScript => "JavaScript",
            ProgrammingLanguage::TypeScript => "TypeScript",
            ProgrammingLanguage::Go => "Go",
            ProgrammingLanguage::Rust => "Rust",
            ProgrammingLanguage::Cpp => "C++",
            ProgrammingLanguage::CSharp => "C#",
            ProgrammingLanguage::Php => "PHP",
            ProgrammingLanguage::Kotlin => "Kotlin",
            ProgrammingLanguage::Ruby => "Ruby",
            ProgrammingLanguage::Scala => "Scala",
        }
    }
}

impl fmt::Display for ProgrammingLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgrammingLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|language| language.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unsupported language: {}", s))
    }
}
