use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::mpsc;
use std::time::Duration;

use classfi::api_worker::spawn_api_worker;
use classfi::auth::{AuthSession, default_session_path};
use classfi::exam::{ExamSession, QuizWalk, handle_exam_input, sample_exam, sample_quiz};
use classfi::forms::{FormAction, LoginForm, SignupForm, handle_login_input, handle_signup_input};
use classfi::models::{
    ApiRequest, ApiResponse, AppState, Card, CardFilter, Subject, Subtopic, Topic,
};
use classfi::{db, logger, ui};

const TICK_RATE: Duration = Duration::from_millis(50);

fn main() -> io::Result<()> {
    logger::init();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let conn = match db::init_db() {
        Ok(conn) => Some(conn),
        Err(e) => {
            logger::log(&format!("Failed to open results database: {}", e));
            None
        }
    };

    let (req_tx, req_rx) = mpsc::channel::<ApiRequest>();
    let (resp_tx, resp_rx) = mpsc::channel::<ApiResponse>();
    let worker = spawn_api_worker(resp_tx, req_rx);

    let mut session = AuthSession::load(&default_session_path());
    let mut app_state = if session.is_authenticated() {
        if let Some(token) = session.token() {
            let _ = req_tx.send(ApiRequest::UseToken(token.to_string()));
        }
        let _ = req_tx.send(ApiRequest::GetSubjects);
        AppState::Subjects
    } else {
        AppState::Login
    };

    let mut login_form = LoginForm::default();
    let mut signup_form = SignupForm::default();
    let mut status: Option<String> = None;

    let mut subjects: Vec<Subject> = Vec::new();
    let mut subject_index: usize = 0;
    let mut subject_title = String::new();

    let mut topics: Vec<Topic> = Vec::new();
    let mut topic_index: usize = 0;

    let mut subtopics: Vec<Subtopic> = Vec::new();
    let mut subtopic_index: usize = 0;
    let mut topic_name = String::new();

    let mut cards: Vec<Card> = Vec::new();
    let mut card_index: usize = 0;

    let mut exam_session: Option<ExamSession> = None;
    let mut quiz: Option<QuizWalk> = None;

    let mut averages = Vec::new();
    let mut recent = Vec::new();

    loop {
        // Drain worker responses before drawing so the frame shows the
        // latest data.
        while let Ok(response) = resp_rx.try_recv() {
            match response {
                ApiResponse::LoggedIn(resp) => {
                    session.login(resp.token.clone(), resp.expires_at.clone(), resp.user);
                    let _ = req_tx.send(ApiRequest::UseToken(resp.token));
                    let _ = req_tx.send(ApiRequest::GetSubjects);
                    login_form = LoginForm::default();
                    status = None;
                    app_state = AppState::Subjects;
                }
                ApiResponse::SignedUp(resp) => {
                    signup_form = SignupForm::default();
                    status = Some(resp.detail);
                    app_state = AppState::Login;
                }
                ApiResponse::Subjects(page) => {
                    subjects = page.results;
                    subject_index = 0;
                }
                ApiResponse::Topics(list) => {
                    topics = list;
                    topic_index = 0;
                }
                ApiResponse::Subtopics(list) => {
                    subtopics = list;
                    subtopic_index = 0;
                }
                ApiResponse::Cards(page) => {
                    cards = page.results;
                    card_index = 0;
                }
                ApiResponse::Error(e) => {
                    status = Some(e.to_string());
                    login_form.in_flight = false;
                    signup_form.in_flight = false;
                }
            }
        }

        // Finish a pending exam submission and record the attempt.
        if let Some(exam) = &mut exam_session {
            if exam.poll_submission() {
                if let Some(conn) = &conn {
                    let score = exam.calculate_score();
                    if let Err(e) =
                        db::result::record_result(conn, &subject_title, &exam.topic, score)
                    {
                        logger::log(&format!("Failed to record exam result: {}", e));
                    }
                }
            }
        }

        terminal.draw(|f| match app_state {
            AppState::Login => ui::draw_login(f, &login_form, status.as_deref()),
            AppState::Signup => ui::draw_signup(f, &signup_form, status.as_deref()),
            AppState::Subjects => {
                ui::draw_subjects(f, &subjects, subject_index, status.as_deref())
            }
            AppState::Topics => {
                ui::draw_topics(f, &subject_title, &topics, topic_index, status.as_deref())
            }
            AppState::Subtopics => ui::draw_subtopics(
                f,
                &topic_name,
                &subtopics,
                subtopic_index,
                status.as_deref(),
            ),
            AppState::Cards => {
                let name = subtopics
                    .get(subtopic_index)
                    .map(|s| s.name.as_str())
                    .unwrap_or("");
                ui::draw_cards(f, name, &cards, card_index, status.as_deref());
            }
            AppState::CardView => {
                if let Some(card) = cards.get(card_index) {
                    ui::draw_card_view(f, card);
                }
            }
            AppState::Exam => {
                if let Some(exam) = &exam_session {
                    ui::draw_exam(f, exam);
                }
            }
            AppState::Quiz => {
                if let Some(quiz) = &quiz {
                    ui::draw_quiz(f, quiz);
                }
            }
            AppState::Dashboard => ui::draw_dashboard(f, &averages, &recent),
        })?;

        if !event::poll(TICK_RATE)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match app_state {
            AppState::Login => match handle_login_input(&mut login_form, key) {
                FormAction::Submit => {
                    status = None;
                    let _ = req_tx.send(ApiRequest::Login {
                        email: login_form.email.trim().to_string(),
                        password: login_form.password.clone(),
                    });
                }
                FormAction::SwitchScreen => {
                    status = None;
                    app_state = AppState::Signup;
                }
                FormAction::None => {
                    if key.code == KeyCode::Esc {
                        break;
                    }
                }
            },
            AppState::Signup => match handle_signup_input(&mut signup_form, key) {
                FormAction::Submit => {
                    status = None;
                    let _ = req_tx.send(ApiRequest::Signup(Box::new(signup_form.to_request())));
                }
                FormAction::SwitchScreen => {
                    status = None;
                    app_state = AppState::Login;
                }
                FormAction::None => {
                    if key.code == KeyCode::Esc {
                        status = None;
                        app_state = AppState::Login;
                    }
                }
            },
            AppState::Subjects => match key.code {
                KeyCode::Up => {
                    if subject_index > 0 {
                        subject_index -= 1;
                    }
                }
                KeyCode::Down => {
                    if subject_index < subjects.len().saturating_sub(1) {
                        subject_index += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Some(subject) = subjects.get(subject_index) {
                        subject_title = subject.title.clone();
                        topics.clear();
                        let _ = req_tx.send(ApiRequest::GetTopics {
                            subject_id: subject.id,
                        });
                        app_state = AppState::Topics;
                    }
                }
                KeyCode::Char('d') => {
                    if let Some(conn) = &conn {
                        averages = db::result::subject_averages(conn).unwrap_or_default();
                        recent = db::result::list_recent(conn, 20).unwrap_or_default();
                    }
                    app_state = AppState::Dashboard;
                }
                KeyCode::Char('l') => {
                    session.logout();
                    let _ = req_tx.send(ApiRequest::ClearToken);
                    subjects.clear();
                    status = None;
                    app_state = AppState::Login;
                }
                KeyCode::Esc => break,
                _ => {}
            },
            AppState::Topics => match key.code {
                KeyCode::Up => {
                    if topic_index > 0 {
                        topic_index -= 1;
                    }
                }
                KeyCode::Down => {
                    if topic_index < topics.len().saturating_sub(1) {
                        topic_index += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Some(topic) = topics.get(topic_index) {
                        topic_name = topic.name.clone();
                        subtopics.clear();
                        let _ = req_tx.send(ApiRequest::GetSubtopics { topic_id: topic.id });
                        app_state = AppState::Subtopics;
                    }
                }
                KeyCode::Char('e') => {
                    if let Some(topic) = topics.get(topic_index) {
                        exam_session = Some(sample_exam(&topic.name));
                        app_state = AppState::Exam;
                    }
                }
                KeyCode::Char('p') => {
                    if !topics.is_empty() {
                        quiz = Some(sample_quiz());
                        app_state = AppState::Quiz;
                    }
                }
                KeyCode::Esc => app_state = AppState::Subjects,
                _ => {}
            },
            AppState::Subtopics => match key.code {
                KeyCode::Up => {
                    if subtopic_index > 0 {
                        subtopic_index -= 1;
                    }
                }
                KeyCode::Down => {
                    if subtopic_index < subtopics.len().saturating_sub(1) {
                        subtopic_index += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Some(subtopic) = subtopics.get(subtopic_index) {
                        cards.clear();
                        let _ = req_tx.send(ApiRequest::GetCards(CardFilter {
                            subtopic_id: Some(subtopic.id),
                            ..CardFilter::default()
                        }));
                        app_state = AppState::Cards;
                    }
                }
                KeyCode::Esc => app_state = AppState::Topics,
                _ => {}
            },
            AppState::Cards => match key.code {
                KeyCode::Up => {
                    if card_index > 0 {
                        card_index -= 1;
                    }
                }
                KeyCode::Down => {
                    if card_index < cards.len().saturating_sub(1) {
                        card_index += 1;
                    }
                }
                KeyCode::Enter => {
                    if card_index < cards.len() {
                        app_state = AppState::CardView;
                    }
                }
                KeyCode::Esc => app_state = AppState::Subtopics,
                _ => {}
            },
            AppState::CardView => {
                if key.code == KeyCode::Esc {
                    app_state = AppState::Cards;
                }
            }
            AppState::Exam => {
                if let Some(exam) = &mut exam_session {
                    handle_exam_input(exam, key, &mut app_state);
                    if app_state != AppState::Exam {
                        // Leaving the exam discards the session.
                        exam_session = None;
                    }
                }
            }
            AppState::Quiz => {
                if let Some(walk) = &mut quiz {
                    match key.code {
                        KeyCode::Left => walk.previous(),
                        KeyCode::Right | KeyCode::Enter => walk.next(),
                        KeyCode::Esc => {
                            quiz = None;
                            app_state = AppState::Topics;
                        }
                        _ => {}
                    }
                }
            }
            AppState::Dashboard => {
                if key.code == KeyCode::Esc {
                    app_state = AppState::Subjects;
                }
            }
        }
    }

    drop(req_tx);
    let _ = worker.join();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}
