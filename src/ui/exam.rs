use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::exam::{ExamPhase, ExamSession, Question, QuizWalk};

fn header(f: &mut Frame, area: ratatui::layout::Rect, text: &str) {
    let widget = Paragraph::new(text.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn help_bar(f: &mut Frame, area: ratatui::layout::Rect, text: &str) {
    let widget = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn question_text(question: &Question, selected: Option<&str>) -> Text<'static> {
    let mut text = Text::default();
    if let Some(image) = &question.image {
        text.push_line(Line::from(Span::styled(
            format!("[image: {}]", image),
            Style::default().fg(Color::DarkGray),
        )));
        text.push_line(Line::from(""));
    }
    text.push_line(Line::from(question.text.clone()));
    text.push_line(Line::from(""));
    for option in &question.options {
        let marker = if selected == Some(option.id.as_str()) {
            ">"
        } else {
            " "
        };
        let style = if selected == Some(option.id.as_str()) {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        text.push_line(Line::from(Span::styled(
            format!("{} {}. {}", marker, option.id, option.text),
            style,
        )));
    }
    text
}

pub fn draw_exam(f: &mut Frame, session: &ExamSession) {
    if session.submitting {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Min(1)])
            .split(f.area());
        let overlay = Paragraph::new("Submitting your answers...")
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(overlay, chunks[0]);
        return;
    }

    match session.phase {
        ExamPhase::Notification => draw_notification(f, session),
        ExamPhase::Instructions => draw_instructions(f, session),
        ExamPhase::Questions => draw_questions(f, session),
        ExamPhase::Results => draw_results(f, session),
    }
}

fn draw_notification(f: &mut Frame, session: &ExamSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    header(f, chunks[0], &session.topic);

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        "New Assessment",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(format!(
        "{} has assigned a new assessment for you",
        session.assigned_by
    )));
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[1]);

    help_bar(f, chunks[2], "Enter Review Instructions  Esc Back");
}

fn draw_instructions(f: &mut Frame, session: &ExamSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    header(f, chunks[0], &session.topic);

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        "Before You Begin",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    for (i, instruction) in session.instructions.iter().enumerate() {
        text.push_line(Line::from(format!("{}. {}", i + 1, instruction)));
        text.push_line(Line::from(""));
    }
    text.push_line(Line::from(Span::styled(
        "Ready to Begin?",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    let body = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[1]);

    help_bar(f, chunks[2], "Enter Start Test  Esc Back");
}

fn draw_questions(f: &mut Frame, session: &ExamSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let total = session.questions.len();
    header(
        f,
        chunks[0],
        &format!(
            "Exam - Question {} / {} - {}",
            session.current_index + 1,
            total.max(1),
            session.topic
        ),
    );

    // Visual pacing only; there is no time limit behind this bar.
    let progress = if total == 0 {
        0
    } else {
        ((session.current_index + 1) * 100 / total) as u16
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(progress.min(100));
    f.render_widget(gauge, chunks[1]);

    if let Some(question) = session.current_question() {
        let selected = session.selected(&question.id);
        let body = Paragraph::new(question_text(question, selected))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(format!(
                "{} points - {} answered",
                question.points,
                session.answered_count()
            )));
        f.render_widget(body, chunks[2]);
    }

    let last = total > 0 && session.current_index == total - 1;
    let help = if last {
        "a-d Select  Left Previous  Enter Submit  Esc Leave"
    } else {
        "a-d Select  Left Previous  Right/Enter Next  Esc Leave"
    };
    help_bar(f, chunks[3], help);
}

fn draw_results(f: &mut Frame, session: &ExamSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let score = session.calculate_score();
    header(
        f,
        chunks[0],
        &format!("{} - {}%", session.topic, score.percentage),
    );

    let mut text = Text::default();
    text.push_line(Line::from(format!(
        "You scored {} out of {} points",
        score.score, score.total_points
    )));
    text.push_line(Line::from(""));
    for (i, question) in session.questions.iter().enumerate() {
        let correct = session.question_is_correct(question);
        let marker = if correct { "[+]" } else { "[-]" };
        let style = if correct {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };
        text.push_line(Line::from(Span::styled(
            format!(
                "{} {}. {}",
                marker,
                i + 1,
                crate::utils::truncate_string(&question.text, 60)
            ),
            style,
        )));
        let answer = match session.selected(&question.id) {
            Some(id) => question
                .options
                .iter()
                .find(|o| o.id == id)
                .map(|o| format!("{}. {}", o.id, o.text))
                .unwrap_or_else(|| id.to_string()),
            None => "Not answered".to_string(),
        };
        text.push_line(Line::from(format!("    Your answer: {}", answer)));
        if !correct {
            if let Some(right) = question.options.iter().find(|o| o.correct) {
                text.push_line(Line::from(format!(
                    "    Correct answer: {}. {}",
                    right.id, right.text
                )));
            }
        }
        text.push_line(Line::from(""));
    }
    let body = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question Summary"));
    f.render_widget(body, chunks[1]);

    help_bar(f, chunks[2], "Enter Back to Topics");
}

pub fn draw_quiz(f: &mut Frame, quiz: &QuizWalk) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let total = quiz.questions.len();
    header(
        f,
        chunks[0],
        &format!("Practice Quiz - {} / {}", quiz.current_index + 1, total.max(1)),
    );

    if let Some(question) = quiz.current_question() {
        let body = Paragraph::new(question_text(question, None))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(body, chunks[1]);
    }

    help_bar(f, chunks[2], "Left Previous  Right Next  Esc Back");
}
