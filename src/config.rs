/// Questions in the long whole-bank quiz.
pub const QUIZ_LENGTH: usize = 60;
/// Questions in the short whole-bank quiz and in short theme quizzes.
pub const SHORT_QUIZ_LENGTH: usize = 20;
pub const UNCATEGORIZED_TITLE: &str = "Останали";
pub const NAVIGATION_STEP: usize = 100;

/// How a quiz is presented; fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// One question at a time with an explicit advance step.
    #[default]
    Desktop,
    /// Every question on a swipeable card, scored on finish.
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    pub quiz_length: usize,
    pub short_quiz_length: usize,
    pub display_mode: DisplayMode,
    /// Title of the synthetic group collecting questions no theme references.
    pub uncategorized_title: String,
    pub questions_path: String,
    pub themes_path: String,
    pub image_dir: String,
    /// Distance between jump anchors in the search list.
    pub navigation_step: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiz_length: QUIZ_LENGTH,
            short_quiz_length: SHORT_QUIZ_LENGTH,
            display_mode: DisplayMode::Desktop,
            uncategorized_title: UNCATEGORIZED_TITLE.to_string(),
            questions_path: "data/questions.json".to_string(),
            themes_path: "data/tests.json".to_string(),
            image_dir: "question_images".to_string(),
            navigation_step: NAVIGATION_STEP,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_display_mode(mut self, display_mode: DisplayMode) -> Self {
        self.display_mode = display_mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_published_quiz_lengths() {
        let config = Config::default();

        assert_eq!(config.quiz_length, 60);
        assert_eq!(config.short_quiz_length, 20);
        assert_eq!(config.display_mode, DisplayMode::Desktop);
        assert_eq!(config.navigation_step, 100);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "display_mode": "mobile", "quiz_length": 40 }"#)
            .expect("config should parse");

        assert_eq!(config.display_mode, DisplayMode::Mobile);
        assert_eq!(config.quiz_length, 40);
        assert_eq!(config.short_quiz_length, SHORT_QUIZ_LENGTH);
        assert_eq!(config.uncategorized_title, UNCATEGORIZED_TITLE);
    }

    #[test]
    fn rejects_unknown_display_mode() {
        assert!(Config::from_json(r#"{ "display_mode": "tablet" }"#).is_err());
    }
}
