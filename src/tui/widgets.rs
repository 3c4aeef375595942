//! Stateless building blocks for the page views.

use crate::model::format::{long_date, short_date};
use crate::model::{Show, StatusFilter};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

pub const PAST_BADGE: &str = "Past show";
pub const UPCOMING_BADGE: &str = "Upcoming";

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn link() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED)
}

pub fn status_badge(show: &Show) -> Span<'static> {
    if show.is_past() {
        Span::styled(format!(" {} ", PAST_BADGE), Style::default().fg(Color::Black).bg(Color::Gray))
    } else {
        Span::styled(
            format!(" {} ", UPCOMING_BADGE),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )
    }
}

/// One entry on the shows list.
pub fn show_card(show: &Show) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            short_date(show.start_time.as_deref()),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            show.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Where ", dim()),
            Span::raw(show.location.clone()),
        ]),
    ];
    if let Some(description) = show.description_text() {
        lines.push(Line::from(Span::raw(description.to_string())));
    }
    lines.push(Line::from(vec![
        status_badge(show),
        Span::raw("  "),
        Span::styled(format!("View details → /shows/{}", show.id), link()),
    ]));
    lines.push(Line::default());
    Text::from(lines)
}

/// One entry on the tickets page.
pub fn ticket_card(show: &Show) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            show.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            long_date(show.start_time.as_deref()),
            Style::default().fg(Color::Yellow),
        )),
    ];
    if !show.location.is_empty() {
        lines.push(Line::from(Span::styled(show.location.clone(), dim())));
    }
    lines.push(Line::from(vec![
        Span::styled("[b] Buy Tickets", link()),
        Span::raw("  "),
        Span::styled("[Enter] View Details", link()),
    ]));
    lines.push(Line::default());
    Text::from(lines)
}

/// The three filter tabs, with `active` highlighted.
pub fn filter_selector(active: &StatusFilter) -> Line<'static> {
    let mut spans = Vec::with_capacity(StatusFilter::CHOICES.len() * 2);
    for choice in StatusFilter::CHOICES.iter() {
        let style = if choice == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {} ", choice.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
