use crate::{
    AnswerMark, AppController, AppView, Config, DesktopSession, MobileSession,
    Question, QuestionBank, QuizInteraction, QuizOutcome, Session, StartOption, ThemeLength,
    demo_bank,
};
use gloo_net::http::Request;
use leptos::*;
use rand::SeedableRng;
use std::rc::Rc;

type AppSignal = RwSignal<Option<AppController>>;

async fn fetch_text(path: &str) -> Result<String, String> {
    let response = Request::get(path)
        .send()
        .await
        .map_err(|error| error.to_string())?;

    if !response.ok() {
        return Err(format!("{} returned HTTP {}", path, response.status()));
    }

    response.text().await.map_err(|error| error.to_string())
}

async fn load_bank(config: &Config) -> Result<(QuestionBank, Option<String>), String> {
    let questions = fetch_text(&config.questions_path).await?;
    let themes = match fetch_text(&config.themes_path).await {
        Ok(themes) => Some(themes),
        Err(message) => {
            log::warn!("themes unavailable: {}", message);
            None
        }
    };

    let (bank, dropped) = QuestionBank::from_json_keeping_questions(
        &questions,
        themes.as_deref(),
        &config.uncategorized_title,
    )
    .map_err(|error| error.to_string())?;

    Ok((bank, dropped.map(|error| error.to_string())))
}

fn act(app: AppSignal, action: impl FnOnce(&mut AppController)) {
    app.update(|state| {
        if let Some(controller) = state.as_mut() {
            action(controller);
        }
    });
}

fn answer_class(mark: AnswerMark) -> &'static str {
    match mark {
        AnswerMark::Neutral => "answer-button",
        AnswerMark::Correct => "answer-button correct",
        AnswerMark::Incorrect => "answer-button incorrect",
    }
}

fn start_label(option: &StartOption) -> String {
    match (&option.theme, option.request) {
        (None, _) => format!("Тест {} въпроса", option.question_count),
        (
            Some(title),
            crate::QuizRequest::Theme {
                length: ThemeLength::Short,
                ..
            },
        ) => title.clone(),
        (Some(_), _) => format!("( {} въпроса )", option.question_count),
    }
}

fn scroll_to_question(anchor: usize) {
    if let Some(element) = document().get_element_by_id(&format!("question-{}", anchor)) {
        element.scroll_into_view();
    }
}

fn question_image(question: &Question, image_dir: &str, class: &'static str) -> Option<View> {
    question.image_path(image_dir).map(|src| {
        view! { <img src=src alt="Илюстрация" class=class /> }.into_view()
    })
}

fn answer_buttons(app: AppSignal, session: &Session, question: &Question) -> View {
    let answered = session.answer_for(&question.question_number).is_some();
    let marks = session.answer_marks(question);

    question
        .answers()
        .into_iter()
        .zip(marks)
        .map(|((option, text), mark)| {
            let number = question.question_number.clone();
            view! {
                <button
                    class=answer_class(mark)
                    disabled=answered
                    on:click=move |_| act(app, |controller| {
                        controller.on_answer_select(&number, option);
                    })
                >
                    {text.to_string()}
                </button>
            }
        })
        .collect_view()
}

#[component]
fn SearchScreen(app: AppSignal) -> impl IntoView {
    move || {
        app.with(|state| {
            let Some(controller) = state else {
                return View::default();
            };
            let AppView::Search {
                results,
                show_answers,
                notice,
                ..
            } = controller.view()
            else {
                return View::default();
            };
            let image_dir = controller.config().image_dir.clone();

            let starts = controller
                .start_options()
                .into_iter()
                .map(|option| {
                    let request = option.request;
                    let label = start_label(&option);
                    view! {
                        <button
                            class="button-primary start-button"
                            on:click=move |_| act(app, |controller| {
                                let mut rng = rand::rngs::StdRng::from_entropy();
                                let _ = controller.on_start_quiz(&mut rng, request);
                            })
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view();

            let notice = notice.map(|error| {
                view! { <p class="notice">{format!("Няма намерени въпроси: {}", error)}</p> }
            });

            let list = if results.is_empty() {
                view! { <p>"Няма нищо намерено!"</p> }.into_view()
            } else {
                results
                    .iter()
                    .map(|question| {
                        let answers = question
                            .answers()
                            .into_iter()
                            .map(|(option, text)| {
                                let class = if show_answers && question.is_correct(option) {
                                    "highlight-answer"
                                } else {
                                    ""
                                };
                                view! { <li class=class>{format!("{}: {}", option, text)}</li> }
                            })
                            .collect_view();

                        view! {
                            <div id=format!("question-{}", question.question_number) class="search-result-card">
                                <h4>{question.to_string()}</h4>
                                {question_image(question, &image_dir, "question-image-small")}
                                <ul>{answers}</ul>
                            </div>
                        }
                    })
                    .collect_view()
            };

            view! {
                <div class="start-quiz-container">{starts}</div>
                {notice}
                <div class="toggle-answers-container">
                    <button
                        class="button-secondary toggle-answers-button"
                        on:click=move |_| act(app, AppController::toggle_answers)
                    >
                        {if show_answers { "Скрий отговорите" } else { "Покажи отговорите" }}
                    </button>
                </div>
                <div class="search-results-container">{list}</div>
            }
            .into_view()
        })
    }
}

fn desktop_view(app: AppSignal, outer: &Session, session: &DesktopSession, image_dir: &str) -> View {
    let question = session.current_question();
    let progress = session.progress();
    let answered = session.selected().is_some();
    let next_label = if session.is_last() {
        "Приключи теста"
    } else {
        "Следващ въпрос"
    };

    view! {
        <div class="quiz-container desktop-quiz">
            <h3>{format!("Въпрос {} / {}", session.current_index() + 1, progress.total)}</h3>
            <h2>{question.question.clone()}</h2>
            {question_image(question, image_dir, "question-image")}
            <div class="answers-grid">{answer_buttons(app, outer, question)}</div>
            {answered.then(|| view! {
                <button class="button-primary" on:click=move |_| act(app, AppController::on_advance)>
                    {next_label}
                </button>
            })}
        </div>
    }
    .into_view()
}

fn mobile_view(app: AppSignal, outer: &Session, session: &MobileSession, image_dir: &str) -> View {
    let cards = session
        .questions()
        .iter()
        .map(|question| {
            view! {
                <div class="flashcard">
                    <h4>{question.to_string()}</h4>
                    {question_image(question, image_dir, "question-image")}
                    <div class="answers-grid">{answer_buttons(app, outer, question)}</div>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="quiz-container mobile-quiz">
            <div class="swipe-track">{cards}</div>
            <button
                class="button-primary finish-mobile-button"
                on:click=move |_| act(app, AppController::on_finish)
            >
                "Завърши теста и прегледай резултата"
            </button>
        </div>
    }
    .into_view()
}

#[component]
fn QuizScreen(app: AppSignal) -> impl IntoView {
    move || {
        app.with(|state| {
            let Some(controller) = state else {
                return View::default();
            };
            let image_dir = controller.config().image_dir.as_str();

            match controller.session() {
                Some(session) => match session {
                    Session::Desktop(desktop) => desktop_view(app, session, desktop, image_dir),
                    Session::Mobile(mobile) => mobile_view(app, session, mobile, image_dir),
                },
                None => View::default(),
            }
        })
    }
}

#[component]
fn ResultsScreen(outcome: QuizOutcome, app: AppSignal) -> impl IntoView {
    view! {
        <div class="results-container">
            <h2>"Готово!"</h2>
            <p>{format!("Точки: {} / {}", outcome.score, outcome.total)}</p>
            <button class="button-primary" on:click=move |_| act(app, AppController::on_restart)>
                "Започни отначало"
            </button>
        </div>
    }
}

#[component]
fn Header(app: AppSignal) -> impl IntoView {
    let term = move || {
        app.with(|state| {
            state
                .as_ref()
                .map(|controller| controller.search_term().to_string())
                .unwrap_or_default()
        })
    };

    let anchors = move || {
        app.with(|state| match state.as_ref().map(AppController::view) {
            Some(AppView::Search { anchors, .. }) => anchors,
            _ => Vec::new(),
        })
    };

    view! {
        <header class="app-header">
            <h1>"Листовки 40бт"</h1>
            <div class="search-container">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Търси въпроси..."
                    prop:value=term
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        act(app, |controller| controller.on_search_term_change(&value));
                    }
                />
            </div>
            <div class="quiz-navigation">
                {move || {
                    anchors()
                        .into_iter()
                        .map(|anchor| {
                            view! {
                                <a
                                    href=format!("#question-{}", anchor)
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        scroll_to_question(anchor);
                                    }
                                >
                                    {anchor.to_string()}
                                </a>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </header>
    }
}

#[component]
fn App(config: Config) -> impl IntoView {
    let app: AppSignal = create_rw_signal(None);
    let (load_error, set_load_error) = create_signal::<Option<String>>(None);

    wasm_bindgen_futures::spawn_local(async move {
        let bank = match load_bank(&config).await {
            Ok((bank, None)) => bank,
            Ok((bank, Some(message))) => {
                set_load_error.set(Some(format!(
                    "Темите не бяха заредени ({}); всички въпроси са в „{}“.",
                    message, config.uncategorized_title
                )));
                bank
            }
            Err(message) => {
                log::error!("falling back to demo questions: {}", message);
                set_load_error.set(Some(format!(
                    "Въпросите не бяха заредени ({}); показани са примерни.",
                    message
                )));
                demo_bank()
            }
        };
        app.set(Some(AppController::new(Rc::new(bank), config)));
    });

    let _ = window_event_listener(ev::keydown, move |ev| {
        let typing = document()
            .active_element()
            .map(|element| element.tag_name().eq_ignore_ascii_case("input"))
            .unwrap_or(false);

        if !typing && ev.key().eq_ignore_ascii_case("a") {
            act(app, AppController::toggle_answers);
        }
    });

    // Memos keep the header input and screens mounted while the controller
    // changes within one mode.
    let mode = create_memo(move |_| app.with(|state| state.as_ref().map(AppController::mode)));
    let screen = create_memo(move |_| {
        app.with(|state| {
            state
                .as_ref()
                .map(|controller| (controller.mode(), controller.outcome()))
        })
    });

    let year = js_sys::Date::new_0().get_full_year();

    view! {
        <div class="App">
            {move || {
                match mode.get() {
                    Some(crate::AppMode::Quiz) => view! {
                        <div class="quiz-header">
                            <button
                                class="button-secondary back-button"
                                on:click=move |_| act(app, AppController::on_back_to_search)
                            >
                                "Назад"
                            </button>
                        </div>
                    }
                    .into_view(),
                    _ => view! { <Header app=app /> }.into_view(),
                }
            }}
            {move || load_error.get().map(|message| view! { <p class="notice">{message}</p> })}
            <main>
                {move || {
                    match screen.get() {
                        None => view! { <p>"Зареждане..."</p> }.into_view(),
                        Some((crate::AppMode::Search, _)) => view! { <SearchScreen app=app /> }.into_view(),
                        Some((crate::AppMode::Quiz, _)) => view! { <QuizScreen app=app /> }.into_view(),
                        Some((crate::AppMode::Results, Some(outcome))) => {
                            view! { <ResultsScreen outcome=outcome app=app /> }.into_view()
                        }
                        Some((crate::AppMode::Results, None)) => View::default(),
                    }
                }}
            </main>
            <footer>
                <p>{format!("© {} Листовки 40бт, за лична употреба.", year)}</p>
            </footer>
        </div>
    }
}

/// Installs panic and log hooks and mounts the application.
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already installed".into());
    }

    mount_to_body(|| view! { <App config=Config::default() /> });
}
