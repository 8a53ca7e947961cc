use std::fmt;

/// One of the four answer slots of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AnswerOption {
    A,
    B,
    C,
    D,
}

impl AnswerOption {
    pub const ALL: [AnswerOption; 4] = [
        AnswerOption::A,
        AnswerOption::B,
        AnswerOption::C,
        AnswerOption::D,
    ];

    pub fn letter(self) -> &'static str {
        match self {
            AnswerOption::A => "A",
            AnswerOption::B => "B",
            AnswerOption::C => "C",
            AnswerOption::D => "D",
        }
    }
}

impl fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// A multiple-choice question as stored in the question bank.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    /// Stable identifier, also the canonical display order.
    pub question_number: String,
    /// Question text shown as the prompt.
    pub question: String,
    pub answer_a: String,
    pub answer_b: String,
    pub answer_c: String,
    pub answer_d: String,
    /// Slot holding the right answer.
    pub correct_answer: AnswerOption,
    /// File name of an illustration, resolved by the rendering layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_image: Option<String>,
}

impl Question {
    pub fn answer(&self, option: AnswerOption) -> &str {
        match option {
            AnswerOption::A => &self.answer_a,
            AnswerOption::B => &self.answer_b,
            AnswerOption::C => &self.answer_c,
            AnswerOption::D => &self.answer_d,
        }
    }

    /// Answer texts in slot order.
    pub fn answers(&self) -> [(AnswerOption, &str); 4] {
        AnswerOption::ALL.map(|option| (option, self.answer(option)))
    }

    pub fn is_correct(&self, option: AnswerOption) -> bool {
        self.correct_answer == option
    }

    /// Relative path of the illustration under `image_dir`, if the question has one.
    pub fn image_path(&self, image_dir: &str) -> Option<String> {
        self.question_image
            .as_ref()
            .map(|file| format!("{}/{}", image_dir.trim_end_matches('/'), file))
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.question_number, self.question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn right_of_way() -> Question {
        Question {
            question_number: "12".to_string(),
            question: "Кой кораб има предимство?".to_string(),
            answer_a: "Ветроходният".to_string(),
            answer_b: "Моторният".to_string(),
            answer_c: "По-големият".to_string(),
            answer_d: "По-бързият".to_string(),
            correct_answer: AnswerOption::A,
            question_image: None,
        }
    }

    #[test]
    fn answer_returns_slot_text() {
        let question = right_of_way();

        assert_eq!(question.answer(AnswerOption::B), "Моторният");
        assert_eq!(question.answer(AnswerOption::D), "По-бързият");
    }

    #[test]
    fn answers_are_listed_in_slot_order() {
        let question = right_of_way();
        let letters: Vec<&str> = question
            .answers()
            .iter()
            .map(|(option, _)| option.letter())
            .collect();

        assert_eq!(letters, vec!["A", "B", "C", "D"]);
        assert_eq!(question.answers()[2].1, "По-големият");
    }

    #[test]
    fn is_correct_matches_only_the_keyed_slot() {
        let question = right_of_way();

        assert!(question.is_correct(AnswerOption::A));
        assert!(!question.is_correct(AnswerOption::C));
    }

    #[test]
    fn image_path_joins_directory() {
        let mut question = right_of_way();
        assert_eq!(question.image_path("question_images"), None);

        question.question_image = Some("buoy.png".to_string());
        assert_eq!(
            question.image_path("question_images/").as_deref(),
            Some("question_images/buoy.png")
        );
    }

    #[test]
    fn display_includes_number_and_text() {
        assert_eq!(
            format!("{}", right_of_way()),
            "12. Кой кораб има предимство?"
        );
    }

    #[test]
    fn parses_source_json_shape() {
        let json = r#"{
            "question_number": "7",
            "question": "What does a red light mark?",
            "answer_a": "Starboard side",
            "answer_b": "Port side",
            "answer_c": "Stern",
            "answer_d": "Masthead",
            "correct_answer": "B",
            "question_image": "lights.png"
        }"#;

        let parsed: Question = serde_json::from_str(json).expect("question should parse");

        assert_eq!(parsed.correct_answer, AnswerOption::B);
        assert_eq!(parsed.question_image.as_deref(), Some("lights.png"));
    }

    #[test]
    fn missing_image_defaults_to_none() {
        let json = r#"{
            "question_number": "8",
            "question": "q",
            "answer_a": "a",
            "answer_b": "b",
            "answer_c": "c",
            "answer_d": "d",
            "correct_answer": "D"
        }"#;

        let parsed: Question = serde_json::from_str(json).expect("question should parse");

        assert!(parsed.question_image.is_none());
    }

    #[test]
    fn rejects_unknown_answer_letter() {
        let json = r#"{
            "question_number": "9",
            "question": "q",
            "answer_a": "a",
            "answer_b": "b",
            "answer_c": "c",
            "answer_d": "d",
            "correct_answer": "E"
        }"#;

        assert!(serde_json::from_str::<Question>(json).is_err());
    }
}
