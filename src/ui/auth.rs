use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::forms::{LoginForm, SignupForm};

fn field_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        })
}

fn masked(value: &str) -> String {
    "*".repeat(value.chars().count())
}

fn status_line(error: Option<&str>, in_flight: bool, status: Option<&str>) -> Paragraph<'static> {
    let (text, color) = if in_flight {
        ("Working...".to_string(), Color::Yellow)
    } else if let Some(error) = error {
        (error.to_string(), Color::Red)
    } else if let Some(status) = status {
        (status.to_string(), Color::Green)
    } else {
        (String::new(), Color::Reset)
    };
    Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
}

pub fn draw_login(f: &mut Frame, form: &LoginForm, status: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Class-Fi")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let email = Paragraph::new(form.email.as_str()).block(field_block("Email", form.focus == 0));
    f.render_widget(email, chunks[1]);

    let password =
        Paragraph::new(masked(&form.password)).block(field_block("Password", form.focus == 1));
    f.render_widget(password, chunks[2]);

    f.render_widget(
        status_line(form.error.as_deref(), form.in_flight, status),
        chunks[3],
    );

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Tab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Next Field  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Login  "),
        Span::styled(
            "Ctrl+N",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Sign Up  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[5]);
}

pub fn draw_signup(f: &mut Frame, form: &SignupForm, status: Option<&str>) {
    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(std::iter::repeat_n(
        Constraint::Length(3),
        SignupForm::field_labels().len(),
    ));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(f.area());

    let title = Paragraph::new("Create Account")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    for (i, label) in SignupForm::field_labels().iter().enumerate() {
        let value = form.field_value(i);
        let shown = if label.contains("assword") {
            masked(value)
        } else {
            value.to_string()
        };
        let field = Paragraph::new(shown).block(field_block(label, form.focus == i));
        f.render_widget(field, chunks[1 + i]);
    }

    let status_idx = 1 + SignupForm::field_labels().len();
    f.render_widget(
        status_line(form.error.as_deref(), form.in_flight, status),
        chunks[status_idx],
    );

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Tab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Next Field  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Sign Up  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Back to Login"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[status_idx + 2]);
}
