use crate::models::SignupRequest;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the caller should do after a form handled a key.
#[derive(Debug, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    SwitchScreen,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: usize,
    pub error: Option<String>,
    pub in_flight: bool,
}

impl LoginForm {
    const FIELDS: usize = 2;

    fn focused_field(&mut self) -> &mut String {
        match self.focus {
            0 => &mut self.email,
            _ => &mut self.password,
        }
    }

    fn validate(&mut self) -> bool {
        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Email and password are required".to_string());
            return false;
        }
        self.error = None;
        true
    }
}

pub fn handle_login_input(form: &mut LoginForm, key: KeyEvent) -> FormAction {
    if form.in_flight {
        // A login request is pending; don't queue another submit.
        return FormAction::None;
    }
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.focus = (form.focus + 1) % LoginForm::FIELDS;
            FormAction::None
        }
        KeyCode::Up => {
            form.focus = (form.focus + LoginForm::FIELDS - 1) % LoginForm::FIELDS;
            FormAction::None
        }
        KeyCode::Enter => {
            if form.validate() {
                form.in_flight = true;
                FormAction::Submit
            } else {
                FormAction::None
            }
        }
        KeyCode::Backspace => {
            form.focused_field().pop();
            FormAction::None
        }
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            FormAction::SwitchScreen
        }
        KeyCode::Char(c) => {
            form.focused_field().push(c);
            FormAction::None
        }
        _ => FormAction::None,
    }
}

#[derive(Debug, Default)]
pub struct SignupForm {
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub gender: String,
    pub password: String,
    pub confirm_password: String,
    pub focus: usize,
    pub error: Option<String>,
    pub in_flight: bool,
}

impl SignupForm {
    const FIELDS: usize = 6;

    pub fn field_labels() -> [&'static str; Self::FIELDS] {
        [
            "Email",
            "Full name",
            "Phone number",
            "Gender",
            "Password",
            "Confirm password",
        ]
    }

    pub fn field_value(&self, index: usize) -> &str {
        match index {
            0 => &self.email,
            1 => &self.full_name,
            2 => &self.phone_number,
            3 => &self.gender,
            4 => &self.password,
            _ => &self.confirm_password,
        }
    }

    fn focused_field(&mut self) -> &mut String {
        match self.focus {
            0 => &mut self.email,
            1 => &mut self.full_name,
            2 => &mut self.phone_number,
            3 => &mut self.gender,
            4 => &mut self.password,
            _ => &mut self.confirm_password,
        }
    }

    fn validate(&mut self) -> bool {
        let all_filled = (0..Self::FIELDS).all(|i| !self.field_value(i).trim().is_empty());
        if !all_filled {
            self.error = Some("All fields are required".to_string());
            return false;
        }
        if !self.email.contains('@') {
            self.error = Some("Enter a valid email address".to_string());
            return false;
        }
        if self.password != self.confirm_password {
            self.error = Some("Passwords do not match".to_string());
            return false;
        }
        self.error = None;
        true
    }

    pub fn to_request(&self) -> SignupRequest {
        SignupRequest {
            email: self.email.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            gender: self.gender.trim().to_string(),
            is_active: true,
            user_type: "student".to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }
}

pub fn handle_signup_input(form: &mut SignupForm, key: KeyEvent) -> FormAction {
    if form.in_flight {
        return FormAction::None;
    }
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.focus = (form.focus + 1) % SignupForm::FIELDS;
            FormAction::None
        }
        KeyCode::Up => {
            form.focus = (form.focus + SignupForm::FIELDS - 1) % SignupForm::FIELDS;
            FormAction::None
        }
        KeyCode::Enter => {
            if form.validate() {
                form.in_flight = true;
                FormAction::Submit
            } else {
                FormAction::None
            }
        }
        KeyCode::Backspace => {
            form.focused_field().pop();
            FormAction::None
        }
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            FormAction::SwitchScreen
        }
        KeyCode::Char(c) => {
            form.focused_field().push(c);
            FormAction::None
        }
        _ => FormAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(form: &mut LoginForm, text: &str) {
        for c in text.chars() {
            handle_login_input(form, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = LoginForm::default();
        type_text(&mut form, "a@b.c");
        assert_eq!(form.email, "a@b.c");
        assert!(form.password.is_empty());

        handle_login_input(&mut form, key(KeyCode::Tab));
        type_text(&mut form, "pw");
        assert_eq!(form.password, "pw");
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut form = LoginForm::default();
        assert_eq!(form.focus, 0);
        handle_login_input(&mut form, key(KeyCode::Tab));
        assert_eq!(form.focus, 1);
        handle_login_input(&mut form, key(KeyCode::Tab));
        assert_eq!(form.focus, 0);
        handle_login_input(&mut form, key(KeyCode::Up));
        assert_eq!(form.focus, 1);
    }

    #[test]
    fn test_backspace_edits_focused_field() {
        let mut form = LoginForm::default();
        type_text(&mut form, "abc");
        handle_login_input(&mut form, key(KeyCode::Backspace));
        assert_eq!(form.email, "ab");
    }

    #[test]
    fn test_empty_login_submit_is_rejected() {
        let mut form = LoginForm::default();
        let action = handle_login_input(&mut form, key(KeyCode::Enter));
        assert_eq!(action, FormAction::None);
        assert!(form.error.is_some());
        assert!(!form.in_flight);
    }

    #[test]
    fn test_valid_login_submits_and_locks() {
        let mut form = LoginForm::default();
        type_text(&mut form, "a@b.c");
        handle_login_input(&mut form, key(KeyCode::Tab));
        type_text(&mut form, "pw");
        let action = handle_login_input(&mut form, key(KeyCode::Enter));
        assert_eq!(action, FormAction::Submit);
        assert!(form.in_flight);

        // While in flight, further submits are swallowed
        let action = handle_login_input(&mut form, key(KeyCode::Enter));
        assert_eq!(action, FormAction::None);
    }

    #[test]
    fn test_ctrl_n_switches_screen() {
        let mut form = LoginForm::default();
        let action = handle_login_input(
            &mut form,
            KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
        );
        assert_eq!(action, FormAction::SwitchScreen);
        assert!(form.email.is_empty());
    }

    fn filled_signup() -> SignupForm {
        SignupForm {
            email: "new@example.com".to_string(),
            full_name: "New User".to_string(),
            phone_number: "+1555000".to_string(),
            gender: "female".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
            ..SignupForm::default()
        }
    }

    #[test]
    fn test_signup_requires_all_fields() {
        let mut form = SignupForm::default();
        let action = handle_signup_input(&mut form, key(KeyCode::Enter));
        assert_eq!(action, FormAction::None);
        assert_eq!(form.error.as_deref(), Some("All fields are required"));
    }

    #[test]
    fn test_signup_rejects_invalid_email() {
        let mut form = filled_signup();
        form.email = "not-an-email".to_string();
        let action = handle_signup_input(&mut form, key(KeyCode::Enter));
        assert_eq!(action, FormAction::None);
        assert_eq!(form.error.as_deref(), Some("Enter a valid email address"));
    }

    #[test]
    fn test_signup_rejects_password_mismatch() {
        let mut form = filled_signup();
        form.confirm_password = "different".to_string();
        let action = handle_signup_input(&mut form, key(KeyCode::Enter));
        assert_eq!(action, FormAction::None);
        assert_eq!(form.error.as_deref(), Some("Passwords do not match"));
    }

    #[test]
    fn test_signup_valid_submit_builds_request() {
        let mut form = filled_signup();
        let action = handle_signup_input(&mut form, key(KeyCode::Enter));
        assert_eq!(action, FormAction::Submit);
        assert!(form.in_flight);

        let request = form.to_request();
        assert_eq!(request.email, "new@example.com");
        assert_eq!(request.user_type, "student");
        assert!(request.is_active);
    }

    #[test]
    fn test_signup_focus_walks_all_fields() {
        let mut form = SignupForm::default();
        for expected in [1, 2, 3, 4, 5, 0] {
            handle_signup_input(&mut form, key(KeyCode::Tab));
            assert_eq!(form.focus, expected);
        }
    }
}
