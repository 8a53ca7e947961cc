use crate::config::UNCATEGORIZED_TITLE;
use crate::{AnswerOption, Question, QuestionBank, ThemeGroup};

fn demo_question(
    number: &str,
    question: &str,
    answers: [&str; 4],
    correct_answer: AnswerOption,
) -> Question {
    Question {
        question_number: number.to_string(),
        question: question.to_string(),
        answer_a: answers[0].to_string(),
        answer_b: answers[1].to_string(),
        answer_c: answers[2].to_string(),
        answer_d: answers[3].to_string(),
        correct_answer,
        question_image: None,
    }
}

pub fn demo_questions() -> Vec<Question> {
    vec![
        demo_question(
            "1",
            "Каква светлина носи бордът на кораба от дясната страна?",
            ["Червена", "Зелена", "Бяла", "Жълта"],
            AnswerOption::B,
        ),
        demo_question(
            "2",
            "Каква светлина носи бордът на кораба от лявата страна?",
            ["Зелена", "Синя", "Червена", "Бяла"],
            AnswerOption::C,
        ),
        demo_question(
            "3",
            "Какво показва бяла кърмова светлина?",
            [
                "Кърмата на плавателния съд",
                "Котвена стоянка",
                "Кораб в беда",
                "Лоцман на борда",
            ],
            AnswerOption::A,
        ),
        demo_question(
            "4",
            "Кардиналният буй със знак \"север\" се заобикаля:",
            ["От юг", "От изток", "От запад", "От север"],
            AnswerOption::D,
        ),
        demo_question(
            "5",
            "Какъв цвят е латералният буй, обозначаващ левия край на фарватера?",
            ["Зелен", "Жълт", "Червен", "Черен"],
            AnswerOption::C,
        ),
        demo_question(
            "6",
            "Какво означава сигнал SOS?",
            [
                "Искане за лоцман",
                "Бедствие и искане за помощ",
                "Спиране на двигателя",
                "Промяна на курса",
            ],
            AnswerOption::B,
        ),
        demo_question(
            "7",
            "Кой възел се използва за връзване на въже към кнехт?",
            ["Прав възел", "Булинь", "Кнехтов възел", "Осморка"],
            AnswerOption::C,
        ),
        Question {
            question_image: Some("anchor.png".to_string()),
            ..demo_question(
                "8",
                "Как се нарича показаната на фигурата котва?",
                ["Адмиралтейска", "Хол", "Дрек", "Плаваща"],
                AnswerOption::A,
            )
        },
    ]
}

pub fn demo_themes() -> Vec<ThemeGroup> {
    vec![
        ThemeGroup::new(
            "Светлини",
            vec!["1".to_string(), "2".to_string(), "3".to_string()],
        ),
        ThemeGroup::new("Буйове", vec!["5".to_string(), "4".to_string()]),
    ]
}

/// Small bank used when the published data files cannot be loaded.
pub fn demo_bank() -> QuestionBank {
    match QuestionBank::new(demo_questions(), demo_themes(), UNCATEGORIZED_TITLE) {
        Ok(bank) => bank,
        Err(error) => unreachable!("demo data is consistent: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QuizRequest, ThemeLength, select};
    use crate::config::Config;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn bank_has_declared_and_uncategorized_themes() {
        let bank = demo_bank();
        let titles: Vec<&str> = bank
            .themes()
            .iter()
            .map(|theme| theme.title.as_str())
            .collect();

        assert_eq!(titles, vec!["Светлини", "Буйове", UNCATEGORIZED_TITLE]);
        assert_eq!(bank.themes()[2].question_numbers, vec!["6", "7", "8"]);
    }

    #[test]
    fn dataset_supports_full_theme_quiz() {
        let bank = demo_bank();
        let mut rng = StdRng::seed_from_u64(10);

        let drawn = select(
            &mut rng,
            &bank,
            QuizRequest::Theme {
                index: 1,
                length: ThemeLength::Full,
            },
            &Config::default(),
        )
        .expect("theme exists");

        assert_eq!(drawn.len(), 2);
    }

    #[test]
    fn image_question_resolves_path() {
        let bank = demo_bank();
        let question = bank.get("8").expect("question 8 exists");

        assert_eq!(
            question.image_path(&Config::default().image_dir).as_deref(),
            Some("question_images/anchor.png")
        );
    }
}
