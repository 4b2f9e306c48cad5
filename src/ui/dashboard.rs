use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::db::result::{ExamResult, SubjectAverage};

fn format_taken_at(taken_at: u64) -> String {
    DateTime::from_timestamp(taken_at as i64, 0)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%b %d, %Y %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn percentage_color(percentage: f64) -> Color {
    if percentage >= 70.0 {
        Color::Green
    } else if percentage >= 50.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn draw_dashboard(f: &mut Frame, averages: &[SubjectAverage], recent: &[ExamResult]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let header = Paragraph::new("Performance")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    let average_items: Vec<ListItem> = if averages.is_empty() {
        vec![ListItem::new("No exams taken yet").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        averages
            .iter()
            .map(|a| {
                let attempts = if a.attempts == 1 {
                    "1 attempt".to_string()
                } else {
                    format!("{} attempts", a.attempts)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>5.1}%  ", a.average_percentage),
                        Style::default()
                            .fg(percentage_color(a.average_percentage))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::from(format!("{} ({})", a.subject, attempts)),
                ]))
            })
            .collect()
    };
    let average_list = List::new(average_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Subject Averages"),
    );
    f.render_widget(average_list, panels[0]);

    let recent_items: Vec<ListItem> = if recent.is_empty() {
        vec![ListItem::new("No exams taken yet").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        recent
            .iter()
            .map(|r| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>3}%  ", r.percentage),
                        Style::default()
                            .fg(percentage_color(f64::from(r.percentage)))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::from(format!(
                        "{} / {}  ({}/{} pts)  {}",
                        r.subject,
                        r.topic,
                        r.score,
                        r.total_points,
                        format_taken_at(r.taken_at)
                    )),
                ]))
            })
            .collect()
    };
    let recent_list = List::new(recent_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Recent Exams"),
    );
    f.render_widget(recent_list, panels[1]);

    let help = Paragraph::new("Esc Back")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
