use crate::models::AppState;
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const SUBMISSION_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    pub correct: bool,
}

#[derive(Debug, Clone)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub image: Option<String>,
    pub points: u32,
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamScore {
    pub score: u32,
    pub total_points: u32,
    pub percentage: u32,
}

/// The four screens of the exam flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamPhase {
    Notification,
    Instructions,
    Questions,
    Results,
}

/// Client-side exam state: a linear walk over a fixed question list with
/// per-question answer tracking. Answers are not persisted; leaving the
/// exam discards them.
#[derive(Debug)]
pub struct ExamSession {
    pub topic: String,
    pub assigned_by: String,
    pub instructions: Vec<String>,
    pub questions: Vec<Question>,
    pub phase: ExamPhase,
    pub current_index: usize,
    pub selected_answers: HashMap<String, String>,
    pub submitting: bool,
    pub submission_started: Option<Instant>,
    pub submission_delay: Duration,
}

impl ExamSession {
    pub fn new(
        topic: String,
        assigned_by: String,
        instructions: Vec<String>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            topic,
            assigned_by,
            instructions,
            questions,
            phase: ExamPhase::Notification,
            current_index: 0,
            selected_answers: HashMap::new(),
            submitting: false,
            submission_started: None,
            submission_delay: SUBMISSION_DELAY,
        }
    }

    pub fn review_instructions(&mut self) {
        if self.phase == ExamPhase::Notification {
            self.phase = ExamPhase::Instructions;
        }
    }

    pub fn start(&mut self) {
        if self.phase == ExamPhase::Instructions {
            self.phase = ExamPhase::Questions;
        }
    }

    /// Record an answer. Last write wins; a reselection for the same
    /// question replaces the previous choice. The option id is not checked
    /// against the question's option set.
    pub fn select_answer(&mut self, question_id: &str, option_id: &str) {
        self.selected_answers
            .insert(question_id.to_string(), option_id.to_string());
    }

    pub fn selected(&self, question_id: &str) -> Option<&str> {
        self.selected_answers.get(question_id).map(String::as_str)
    }

    /// Advance one question; at the last question this starts submission
    /// instead. A no-op while a submission is in flight.
    pub fn next_question(&mut self) {
        if self.submitting {
            return;
        }
        if self.current_index < self.questions.len().saturating_sub(1) {
            self.current_index += 1;
        } else {
            self.begin_submission();
        }
    }

    /// Step back one question. A no-op at index 0 and while submitting.
    pub fn previous_question(&mut self) {
        if self.submitting {
            return;
        }
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// Start the simulated submission. Calling this again while a
    /// submission is already in flight does nothing, so a double-tapped
    /// submit cannot fire twice.
    pub fn begin_submission(&mut self) {
        if self.submitting || self.phase != ExamPhase::Questions {
            return;
        }
        self.submitting = true;
        self.submission_started = Some(Instant::now());
    }

    /// Drive the submission delay from the event loop. Returns true on the
    /// tick where submission completes and the phase flips to Results.
    pub fn poll_submission(&mut self) -> bool {
        if !self.submitting {
            return false;
        }
        let done = self
            .submission_started
            .is_some_and(|started| started.elapsed() >= self.submission_delay);
        if done {
            self.complete_submission();
        }
        done
    }

    pub fn complete_submission(&mut self) {
        self.submitting = false;
        self.submission_started = None;
        self.phase = ExamPhase::Results;
    }

    /// Sum the points of every question whose selected option is flagged
    /// correct. An empty exam scores 0 percent rather than dividing by zero.
    pub fn calculate_score(&self) -> ExamScore {
        let mut score = 0;
        let mut total_points = 0;

        for question in &self.questions {
            total_points += question.points;
            if self.question_is_correct(question) {
                score += question.points;
            }
        }

        let percentage = if total_points == 0 {
            0
        } else {
            (f64::from(score) / f64::from(total_points) * 100.0).round() as u32
        };

        ExamScore {
            score,
            total_points,
            percentage,
        }
    }

    pub fn question_is_correct(&self, question: &Question) -> bool {
        let Some(selected_id) = self.selected_answers.get(&question.id) else {
            return false;
        };
        question
            .options
            .iter()
            .any(|option| &option.id == selected_id && option.correct)
    }

    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.selected_answers.contains_key(&q.id))
            .count()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }
}

/// The flat quiz flow: an index walk over the question list with no phase
/// tracking and no scoring.
#[derive(Debug)]
pub struct QuizWalk {
    pub questions: Vec<Question>,
    pub current_index: usize,
}

impl QuizWalk {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current_index: 0,
        }
    }

    pub fn next(&mut self) {
        if self.current_index < self.questions.len().saturating_sub(1) {
            self.current_index += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }
}

/// Key handling for the exam flow. Option letters (or 1-4) select an
/// answer; arrows navigate; Esc leaves the exam and discards progress.
pub fn handle_exam_input(session: &mut ExamSession, key: KeyEvent, app_state: &mut AppState) {
    if session.submitting {
        // Input is ignored while the submission overlay is up.
        return;
    }

    match session.phase {
        ExamPhase::Notification => match key.code {
            KeyCode::Enter => session.review_instructions(),
            KeyCode::Esc => *app_state = AppState::Topics,
            _ => {}
        },
        ExamPhase::Instructions => match key.code {
            KeyCode::Enter => session.start(),
            KeyCode::Esc => *app_state = AppState::Topics,
            _ => {}
        },
        ExamPhase::Questions => match key.code {
            KeyCode::Esc => *app_state = AppState::Topics,
            KeyCode::Left => session.previous_question(),
            KeyCode::Right | KeyCode::Enter => session.next_question(),
            KeyCode::Char(c) => {
                if let Some(option_id) = option_id_for_key(c) {
                    if let Some(question_id) =
                        session.current_question().map(|q| q.id.clone())
                    {
                        session.select_answer(&question_id, &option_id);
                    }
                }
            }
            _ => {}
        },
        ExamPhase::Results => match key.code {
            KeyCode::Enter | KeyCode::Esc => *app_state = AppState::Topics,
            _ => {}
        },
    }
}

fn option_id_for_key(c: char) -> Option<String> {
    match c.to_ascii_lowercase() {
        'a' | '1' => Some("A".to_string()),
        'b' | '2' => Some("B".to_string()),
        'c' | '3' => Some("C".to_string()),
        'd' | '4' => Some("D".to_string()),
        _ => None,
    }
}

fn option(id: &str, text: &str, correct: bool) -> AnswerOption {
    AnswerOption {
        id: id.to_string(),
        text: text.to_string(),
        correct,
    }
}

/// Sample assessment used until the backend exposes an exams endpoint.
pub fn sample_exam(topic: &str) -> ExamSession {
    let questions = vec![
        Question {
            id: "1".to_string(),
            text: "Which of the following chambers of the heart receives oxygenated blood from the lungs?".to_string(),
            image: Some("https://images.pexels.com/photos/3376790/pexels-photo-3376790.jpeg".to_string()),
            points: 20,
            options: vec![
                option("A", "Right atrium", false),
                option("B", "Right ventricle", false),
                option("C", "Left atrium", true),
                option("D", "Left ventricle", false),
            ],
        },
        Question {
            id: "2".to_string(),
            text: "Which of the following is NOT a characteristic of living organisms?".to_string(),
            image: None,
            points: 20,
            options: vec![
                option("A", "Respiration", false),
                option("B", "Growth", false),
                option("C", "Crystallization", true),
                option("D", "Reproduction", false),
            ],
        },
        Question {
            id: "3".to_string(),
            text: "Which kingdom do bacteria belong to?".to_string(),
            image: None,
            points: 20,
            options: vec![
                option("A", "Protista", false),
                option("B", "Monera", true),
                option("C", "Fungi", false),
                option("D", "Plantae", false),
            ],
        },
        Question {
            id: "4".to_string(),
            text: "Which of the following is a correct taxonomic hierarchy from largest to smallest?".to_string(),
            image: None,
            points: 20,
            options: vec![
                option("A", "Kingdom > Phylum > Class > Order > Family > Genus > Species", true),
                option("B", "Kingdom > Class > Phylum > Order > Family > Genus > Species", false),
                option("C", "Phylum > Kingdom > Class > Order > Family > Genus > Species", false),
                option("D", "Kingdom > Phylum > Order > Class > Family > Genus > Species", false),
            ],
        },
        Question {
            id: "5".to_string(),
            text: "Which of the following is NOT a vertebrate?".to_string(),
            image: Some("https://images.pexels.com/photos/1108572/pexels-photo-1108572.jpeg".to_string()),
            points: 20,
            options: vec![
                option("A", "Fish", false),
                option("B", "Jellyfish", true),
                option("C", "Bird", false),
                option("D", "Reptile", false),
            ],
        },
    ];

    let instructions = vec![
        "Read each question carefully. Make sure you understand the question before selecting an answer.".to_string(),
        "Use the navigation keys to move through the test.".to_string(),
        "Do not leave the exam screen, as this will discard your progress.".to_string(),
    ];

    ExamSession::new(
        topic.to_string(),
        "Your teacher".to_string(),
        instructions,
        questions,
    )
}

/// Sample practice quiz for a topic.
pub fn sample_quiz() -> QuizWalk {
    QuizWalk::new(vec![
        Question {
            id: "1".to_string(),
            text: "The primary organs involved in maintaining homeostasis include the:".to_string(),
            image: None,
            points: 0,
            options: vec![
                option("A", "Kidneys, liver and skin", true),
                option("B", "Bones and cartilage", false),
                option("C", "Hair and nails", false),
                option("D", "Tendons and ligaments", false),
            ],
        },
        Question {
            id: "2".to_string(),
            text: "Which element has the atomic number 7?".to_string(),
            image: None,
            points: 0,
            options: vec![
                option("A", "Oxygen", false),
                option("B", "Nitrogen", true),
                option("C", "Carbon", false),
                option("D", "Helium", false),
            ],
        },
        Question {
            id: "3".to_string(),
            text: "What is the SI unit of force?".to_string(),
            image: None,
            points: 0,
            options: vec![
                option("A", "Joule", false),
                option("B", "Pascal", false),
                option("C", "Newton", true),
                option("D", "Watt", false),
            ],
        },
    ])
}
