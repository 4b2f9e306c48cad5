use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::models::{Card, Subject, Subtopic, Topic};
use crate::utils::{strip_html, truncate_string};

fn draw_list_screen(
    f: &mut Frame,
    title: &str,
    items: Vec<String>,
    selected: usize,
    empty_text: &str,
    help: &str,
    status: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let header = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let list_items: Vec<ListItem> = if items.is_empty() {
        vec![ListItem::new(empty_text.to_string()).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        items
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let style = if i == selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(text).style(style)
            })
            .collect()
    };

    let list = List::new(list_items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_widget(list, chunks[1]);

    let status = Paragraph::new(status.unwrap_or("").to_string())
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    f.render_widget(status, chunks[2]);

    let help = Paragraph::new(help.to_string())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}

pub fn draw_subjects(f: &mut Frame, subjects: &[Subject], selected: usize, status: Option<&str>) {
    let items = subjects
        .iter()
        .map(|s| format!("{} - {}", s.title, truncate_string(&s.content, 48)))
        .collect();
    draw_list_screen(
        f,
        "Subjects",
        items,
        selected,
        "No subjects yet",
        "Up/Down Navigate  Enter Topics  d Dashboard  l Logout  Esc Quit",
        status,
    );
}

pub fn draw_topics(
    f: &mut Frame,
    subject_title: &str,
    topics: &[Topic],
    selected: usize,
    status: Option<&str>,
) {
    let items = topics
        .iter()
        .map(|t| format!("{} - {}", t.name, truncate_string(&t.description, 48)))
        .collect();
    draw_list_screen(
        f,
        &format!("{} / Topics", subject_title),
        items,
        selected,
        "No topics yet",
        "Up/Down Navigate  Enter Subtopics  e Exam  p Practice Quiz  Esc Back",
        status,
    );
}

pub fn draw_subtopics(
    f: &mut Frame,
    topic_name: &str,
    subtopics: &[Subtopic],
    selected: usize,
    status: Option<&str>,
) {
    let items = subtopics
        .iter()
        .map(|s| format!("{} - {}", s.name, truncate_string(&s.description, 48)))
        .collect();
    draw_list_screen(
        f,
        &format!("{} / Subtopics", topic_name),
        items,
        selected,
        "No subtopics yet",
        "Up/Down Navigate  Enter Cards  Esc Back",
        status,
    );
}

pub fn draw_cards(
    f: &mut Frame,
    subtopic_name: &str,
    cards: &[Card],
    selected: usize,
    status: Option<&str>,
) {
    let items = cards
        .iter()
        .map(|c| {
            let mut extras = Vec::new();
            if c.verge3d_file.is_some() {
                extras.push("3D");
            }
            if c.audio_file.is_some() {
                extras.push("audio");
            }
            if extras.is_empty() {
                c.title.clone()
            } else {
                format!("{} [{}]", c.title, extras.join(", "))
            }
        })
        .collect();
    draw_list_screen(
        f,
        &format!("{} / Cards", subtopic_name),
        items,
        selected,
        "No cards yet",
        "Up/Down Navigate  Enter Read  Esc Back",
        status,
    );
}

pub fn draw_card_view(f: &mut Frame, card: &Card) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let header = Paragraph::new(card.title.clone())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let body = Paragraph::new(strip_html(&card.content))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[1]);

    let help = Paragraph::new("Esc Back")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
