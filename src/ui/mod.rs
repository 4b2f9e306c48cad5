mod auth;
mod browse;
mod dashboard;
mod exam;

pub use auth::{draw_login, draw_signup};
pub use browse::{draw_card_view, draw_cards, draw_subjects, draw_subtopics, draw_topics};
pub use dashboard::draw_dashboard;
pub use exam::{draw_exam, draw_quiz};
