use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::Config;
use crate::question::Question;
use crate::theme::ThemeGroup;

/// Immutable question bank with its theme groups.
///
/// The last theme is the synthetic group holding every question that no
/// declared theme references, present only when such questions exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
    themes: Vec<ThemeGroup>,
    index: HashMap<String, usize>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BankError {
    #[error("question bank is empty")]
    EmptyBank,
    #[error("question number {question_number} appears more than once")]
    DuplicateQuestion { question_number: String },
    #[error("theme \"{theme}\" references unknown question {question_number}")]
    UnknownQuestion {
        theme: String,
        question_number: String,
    },
    #[error("question {question_number} is listed by both \"{first}\" and \"{second}\"")]
    SharedQuestion {
        question_number: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum BankLoadError {
    #[error("failed to read data file at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse data file at {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] BankError),
}

impl PartialEq for BankLoadError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Read { path: left, .. }, Self::Read { path: right, .. }) => left == right,
            (Self::Parse { path: left, .. }, Self::Parse { path: right, .. }) => left == right,
            (Self::Invalid(left), Self::Invalid(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for BankLoadError {}

impl QuestionBank {
    /// Builds the bank, checking that question numbers are unique and that
    /// every theme reference resolves to exactly one question.
    ///
    /// # Errors
    /// * Returns [`BankError::EmptyBank`] if `questions` is empty.
    /// * Returns [`BankError::DuplicateQuestion`] if two questions share a number.
    /// * Returns [`BankError::UnknownQuestion`] if a theme lists a number missing
    ///   from the bank.
    /// * Returns [`BankError::SharedQuestion`] if a question is listed by more
    ///   than one theme.
    pub fn new(
        questions: Vec<Question>,
        themes: Vec<ThemeGroup>,
        uncategorized_title: &str,
    ) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::EmptyBank);
        }

        let mut index = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            if index
                .insert(question.question_number.clone(), position)
                .is_some()
            {
                return Err(BankError::DuplicateQuestion {
                    question_number: question.question_number.clone(),
                });
            }
        }

        let mut owner: HashMap<&str, &str> = HashMap::new();
        for theme in &themes {
            for number in &theme.question_numbers {
                if !index.contains_key(number) {
                    return Err(BankError::UnknownQuestion {
                        theme: theme.title.clone(),
                        question_number: number.clone(),
                    });
                }

                if let Some(first) = owner.insert(number, &theme.title) {
                    return Err(BankError::SharedQuestion {
                        question_number: number.clone(),
                        first: first.to_string(),
                        second: theme.title.clone(),
                    });
                }
            }
        }

        let uncategorized = uncategorized_group(&questions, &themes, uncategorized_title);

        let mut themes = themes;
        if !uncategorized.is_empty() {
            themes.push(uncategorized);
        }

        log::info!(
            "question bank ready: {} questions, {} themes",
            questions.len(),
            themes.len()
        );

        Ok(Self {
            questions,
            themes,
            index,
        })
    }

    /// Parses the question and theme documents and builds the bank.
    ///
    /// # Errors
    /// * Returns [`BankLoadError::Parse`] if either document is not valid JSON
    ///   of the expected shape.
    /// * Returns [`BankLoadError::Invalid`] if [`QuestionBank::new`] rejects the data.
    pub fn from_json(
        questions_json: &str,
        themes_json: Option<&str>,
        uncategorized_title: &str,
    ) -> Result<Self, BankLoadError> {
        let questions: Vec<Question> =
            serde_json::from_str(questions_json).map_err(|source| BankLoadError::Parse {
                path: "questions".to_string(),
                source,
            })?;

        let themes: Vec<ThemeGroup> = match themes_json {
            Some(json) => serde_json::from_str(json).map_err(|source| BankLoadError::Parse {
                path: "themes".to_string(),
                source,
            })?,
            None => Vec::new(),
        };

        Ok(Self::new(questions, themes, uncategorized_title)?)
    }

    /// Like [`QuestionBank::from_json`], but a broken themes document only
    /// costs the themes: the bank is rebuilt from the questions alone, with
    /// just the synthetic group, and the theme error is returned beside it.
    ///
    /// # Errors
    /// Returns [`BankLoadError::Parse`] or [`BankLoadError::Invalid`] only when
    /// the questions themselves cannot be used (unparsable, empty bank,
    /// duplicate numbers).
    pub fn from_json_keeping_questions(
        questions_json: &str,
        themes_json: Option<&str>,
        uncategorized_title: &str,
    ) -> Result<(Self, Option<BankLoadError>), BankLoadError> {
        match Self::from_json(questions_json, themes_json, uncategorized_title) {
            Ok(bank) => Ok((bank, None)),
            Err(
                error @ (BankLoadError::Parse { .. }
                | BankLoadError::Invalid(
                    BankError::UnknownQuestion { .. } | BankError::SharedQuestion { .. },
                )),
            ) if themes_json.is_some() => {
                let bank = Self::from_json(questions_json, None, uncategorized_title)?;
                log::warn!("themes dropped, keeping {} questions: {}", bank.len(), error);
                Ok((bank, Some(error)))
            }
            Err(error) => Err(error),
        }
    }

    /// Loads the data files named by `config` relative to `root`.
    ///
    /// A missing themes file yields a bank with only the synthetic group.
    ///
    /// # Errors
    /// * Returns [`BankLoadError::Read`] if the questions file, or an existing
    ///   themes file, cannot be read.
    /// * Returns [`BankLoadError::Parse`] if a file is not valid JSON of the
    ///   expected shape.
    /// * Returns [`BankLoadError::Invalid`] if [`QuestionBank::new`] rejects the data.
    pub fn from_directory(root: impl AsRef<Path>, config: &Config) -> Result<Self, BankLoadError> {
        let root = root.as_ref();
        let questions_path = root.join(&config.questions_path);
        let themes_path = root.join(&config.themes_path);

        let questions: Vec<Question> = read_json(&questions_path)?;

        let themes: Vec<ThemeGroup> = match fs::read(&themes_path) {
            Ok(data) => {
                serde_json::from_slice(&data).map_err(|source| BankLoadError::Parse {
                    path: themes_path.display().to_string(),
                    source,
                })?
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                log::warn!("no themes file at {}", themes_path.display());
                Vec::new()
            }
            Err(source) => {
                return Err(BankLoadError::Read {
                    path: themes_path.display().to_string(),
                    source,
                });
            }
        };

        Ok(Self::new(questions, themes, &config.uncategorized_title)?)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Declared themes followed by the synthetic uncategorized group.
    pub fn themes(&self) -> &[ThemeGroup] {
        &self.themes
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, question_number: &str) -> Option<&Question> {
        self.index
            .get(question_number)
            .map(|position| &self.questions[*position])
    }

    /// Looks up a question, falling back to the first bank entry when the
    /// number is unknown.
    pub fn get_or_first(&self, question_number: &str) -> &Question {
        match self.get(question_number) {
            Some(question) => question,
            None => {
                log::warn!(
                    "unknown question number {}, using first bank entry",
                    question_number
                );
                &self.questions[0]
            }
        }
    }

    /// Questions of the theme at `index`, in theme order.
    pub fn theme_questions(&self, index: usize) -> Option<Vec<Question>> {
        let theme = self.themes.get(index)?;

        Some(
            theme
                .question_numbers
                .iter()
                .map(|number| self.get_or_first(number).clone())
                .collect(),
        )
    }
}

fn uncategorized_group(questions: &[Question], themes: &[ThemeGroup], title: &str) -> ThemeGroup {
    let referenced: HashSet<&str> = themes
        .iter()
        .flat_map(|theme| theme.question_numbers.iter().map(String::as_str))
        .collect();

    ThemeGroup::new(
        title,
        questions
            .iter()
            .filter(|question| !referenced.contains(question.question_number.as_str()))
            .map(|question| question.question_number.clone())
            .collect(),
    )
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, BankLoadError> {
    let data = fs::read(path).map_err(|source| BankLoadError::Read {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_slice(&data).map_err(|source| BankLoadError::Parse {
        path: path.display().to_string(),
        source,
    })
}
