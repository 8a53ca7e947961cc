use serde::{Deserialize, Deserializer};

/// Named, author-curated subset of the question bank.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ThemeGroup {
    pub title: String,
    /// Question numbers in the order the author listed them.
    #[serde(
        rename = "questionsNumbers",
        deserialize_with = "deserialize_question_numbers"
    )]
    pub question_numbers: Vec<String>,
}

impl ThemeGroup {
    pub fn new(title: impl Into<String>, question_numbers: Vec<String>) -> Self {
        Self {
            title: title.into(),
            question_numbers,
        }
    }

    pub fn len(&self) -> usize {
        self.question_numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.question_numbers.is_empty()
    }

    pub fn contains(&self, question_number: &str) -> bool {
        self.question_numbers
            .iter()
            .any(|number| number == question_number)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuestionNumber {
    Number(u64),
    Text(String),
}

// Theme files store question numbers as JSON integers while the bank keys
// questions by string.
fn deserialize_question_numbers<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawQuestionNumber>::deserialize(deserializer)?;

    Ok(raw
        .into_iter()
        .map(|number| match number {
            RawQuestionNumber::Number(value) => value.to_string(),
            RawQuestionNumber::Text(value) => value.trim().to_string(),
        })
        .collect())
}
