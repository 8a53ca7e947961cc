use crate::question::Question;

/// Questions whose text or any answer contains `term`, ignoring case.
///
/// Keeps bank order; an empty term returns every question.
pub fn filter(bank: &[Question], term: &str) -> Vec<Question> {
    let needle = term.to_lowercase();

    bank.iter()
        .filter(|question| matches(question, &needle))
        .cloned()
        .collect()
}

fn matches(question: &Question, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    std::iter::once(question.question.as_str())
        .chain(question.answers().map(|(_, text)| text))
        .any(|field| field.to_lowercase().contains(needle))
}

/// Jump targets for a list of `total` questions: the first question and then
/// every `step`-th one.
pub fn navigation_anchors(total: usize, step: usize) -> Vec<usize> {
    if step == 0 {
        return Vec::new();
    }

    (0..total.div_ceil(step))
        .map(|index| if index == 0 { 1 } else { index * step })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::AnswerOption;

    fn question(number: &str, text: &str, answers: [&str; 4]) -> Question {
        Question {
            question_number: number.to_string(),
            question: text.to_string(),
            answer_a: answers[0].to_string(),
            answer_b: answers[1].to_string(),
            answer_c: answers[2].to_string(),
            answer_d: answers[3].to_string(),
            correct_answer: AnswerOption::A,
            question_image: None,
        }
    }

    fn sample_bank() -> Vec<Question> {
        vec![
            question(
                "1",
                "Какво означава червена светлина?",
                ["Ляв борд", "Десен борд", "Кърма", "Нос"],
            ),
            question(
                "2",
                "Which side is starboard?",
                ["Left", "Right", "Front", "Back"],
            ),
            question(
                "3",
                "What is a buoy?",
                ["A floating marker", "A knot", "A sail", "A RED flag"],
            ),
        ]
    }

    fn numbers(questions: &[Question]) -> Vec<&str> {
        questions
            .iter()
            .map(|question| question.question_number.as_str())
            .collect()
    }

    #[test]
    fn empty_term_returns_bank_unchanged() {
        let bank = sample_bank();

        assert_eq!(filter(&bank, ""), bank);
    }

    #[test]
    fn unmatched_term_returns_nothing() {
        assert!(filter(&sample_bank(), "XYZQ").is_empty());
    }

    #[test]
    fn matches_answers_ignoring_case() {
        let bank = sample_bank();

        assert_eq!(numbers(&filter(&bank, "red")), vec!["3"]);
        assert_eq!(numbers(&filter(&bank, "RIGHT")), vec!["2"]);
    }

    #[test]
    fn matches_cyrillic_ignoring_case() {
        let bank = sample_bank();

        assert_eq!(numbers(&filter(&bank, "БОРД")), vec!["1"]);
        assert_eq!(numbers(&filter(&bank, "червена")), vec!["1"]);
    }

    #[test]
    fn keeps_bank_order() {
        let bank = sample_bank();

        assert_eq!(numbers(&filter(&bank, "a")), vec!["2", "3"]);
    }

    #[test]
    fn anchors_start_at_first_question() {
        assert_eq!(navigation_anchors(250, 100), vec![1, 100, 200]);
        assert_eq!(navigation_anchors(100, 100), vec![1]);
        assert_eq!(navigation_anchors(0, 100), Vec::<usize>::new());
        assert_eq!(navigation_anchors(10, 0), Vec::<usize>::new());
    }
}
