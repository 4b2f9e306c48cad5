pub mod api;
pub mod api_worker;
pub mod auth;
pub mod db;
pub mod exam;
pub mod forms;
pub mod logger;
pub mod models;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use api::{ApiClient, DEFAULT_BASE_URL};
pub use api_worker::spawn_api_worker;
pub use auth::{AuthSession, default_session_path};
pub use exam::{ExamSession, QuizWalk, handle_exam_input, sample_exam, sample_quiz};
pub use forms::{FormAction, LoginForm, SignupForm, handle_login_input, handle_signup_input};
pub use models::{ApiRequest, ApiResponse, AppState};
