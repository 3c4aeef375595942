// File: src/tui/view.rs
use crate::model::Show;
use crate::pages::detail::DetailView;
use crate::pages::form::{ContactForm, Field, SubmissionStatus};
use crate::pages::shows::ListView;
use crate::pages::{DetailPage, Page, ShowsPage, TicketsPage};
use crate::tui::state::AppState;
use crate::tui::widgets;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, state: &AppState) {
    let full_help_text = vec![
        Line::from(vec![
            Span::styled(
                " GLOBAL ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" 1:Shows  2:Tickets  r:Reload  ?:Toggle Help  q:Quit"),
        ]),
        Line::from(vec![
            Span::styled(
                " SHOWS ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" h/l:Filter  u/p/a:Upcoming/Past/All  j/k:Up/Down  Enter:Details"),
        ]),
        Line::from(vec![
            Span::styled(
                " DETAILS ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Tab:Next Field  Enter:Send  Esc:Back"),
        ]),
        Line::from(vec![
            Span::styled(
                " TICKETS ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" j/k:Up/Down  b:Buy Tickets  w:Waitlist  Enter:Details"),
        ]),
    ];

    let footer_height = if state.show_full_help {
        Constraint::Length(full_help_text.len() as u16 + 2)
    } else {
        Constraint::Length(3)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), footer_height])
        .split(f.area());

    draw_header(f, state, v_chunks[0]);

    match &state.page {
        Page::Shows(page) => draw_shows(f, page, v_chunks[1]),
        Page::Detail(page) => draw_detail(f, page, v_chunks[1]),
        Page::Tickets(page) => draw_tickets(f, page, v_chunks[1]),
    }

    // Footer
    let footer_area = v_chunks[2];
    f.render_widget(Clear, footer_area);

    if state.show_full_help {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(footer_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Keyboard Shortcuts (Press ? to minimize) ")
            .border_style(Style::default().fg(Color::Cyan));
        let p = Paragraph::new(full_help_text)
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(p, h_chunks[0]);
        f.render_widget(status_bar(state, Borders::ALL), h_chunks[1]);
    } else {
        let f_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(footer_area);
        let help_str = match &state.page {
            Page::Shows(_) => "h/l:Filter j/k:Move Ret:Details 2:Tickets ?:Help",
            Page::Detail(page) if page.form().focus().is_text() => {
                "Tab:Next Field Ret:Send Esc:Back ?:Help"
            }
            Page::Detail(_) => "Tab:Next Field Ret:Send Esc:Back q:Quit ?:Help",
            Page::Tickets(_) => "j/k:Move b:Buy Ret:Details Esc:All Shows ?:Help",
        };
        let help = Paragraph::new(help_str)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                    .title(" Actions "),
            );
        f.render_widget(
            status_bar(state, Borders::LEFT | Borders::TOP | Borders::BOTTOM),
            f_chunks[0],
        );
        f.render_widget(help, f_chunks[1]);
    }
}

fn status_bar(state: &AppState, borders: Borders) -> Paragraph<'_> {
    Paragraph::new(state.message.as_str())
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(borders).title(" Status "))
}

fn draw_header(f: &mut Frame, state: &AppState, area: Rect) {
    let tab = |label: &'static str, active: bool| {
        let style = if active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(label, style)
    };
    let on_list = matches!(state.page, Page::Shows(_) | Page::Detail(_));
    let on_tickets = matches!(state.page, Page::Tickets(_));
    let line = Line::from(vec![
        Span::styled(
            " COMEDYUO ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        tab("[1] Shows", on_list),
        Span::raw("  "),
        tab("[2] Tickets", on_tickets),
        Span::styled(format!("   {}", state.route()), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("  @ {}", state.api_url), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn message(f: &mut Frame, area: Rect, block: Block, text: impl Into<Text<'static>>) {
    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn card_list<'a>(
    f: &mut Frame,
    area: Rect,
    block: Block<'a>,
    shows: &'a [Show],
    selected: usize,
    card: fn(&Show) -> Text<'static>,
) {
    let items: Vec<ListItem> = shows.iter().map(|s| ListItem::new(card(s))).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▌ ");
    let mut list_state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_shows(f: &mut Frame, page: &ShowsPage, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let selector = Paragraph::new(widgets::filter_selector(page.filter()))
        .block(Block::default().borders(Borders::ALL).title(" Show calendar "));
    f.render_widget(selector, chunks[0]);

    let block = Block::default().borders(Borders::ALL);
    match page.view() {
        ListView::Loading => message(f, chunks[1], block, "Loading shows…"),
        ListView::Error(err) => message(
            f,
            chunks[1],
            block,
            Span::styled(err.to_string(), Style::default().fg(Color::Red)),
        ),
        ListView::Empty => message(f, chunks[1], block, "No shows for this filter"),
        ListView::Shows(shows) => {
            let block = block.title(format!(" {} shows ", shows.len()));
            card_list(f, chunks[1], block, shows, page.selected(), widgets::show_card)
        }
    }
}

fn draw_detail(f: &mut Frame, page: &DetailPage, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let show = match page.view() {
        DetailView::Loading => return message(f, area, block, "Loading…"),
        DetailView::NotFound { reason } => {
            let mut lines = vec![Line::from(Span::styled(
                crate::pages::detail::NOT_FOUND,
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            if let Some(reason) = reason {
                lines.push(Line::from(Span::styled(
                    reason.to_string(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "← Back to all shows (Enter)",
                Style::default().fg(Color::Cyan),
            )));
            return message(f, area, block, lines);
        }
        DetailView::Found(show) => show,
    };

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let eyebrow = if show.is_past() {
        "Past show"
    } else {
        "Upcoming show"
    };
    let mut lines = vec![
        Line::from(Span::styled(
            eyebrow.to_uppercase(),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            show.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("When  ", Style::default().fg(Color::DarkGray)),
            Span::raw(crate::model::format::long_date(show.start_time.as_deref())),
        ]),
        Line::from(vec![
            Span::styled("Where ", Style::default().fg(Color::DarkGray)),
            Span::raw(show.location.clone()),
        ]),
    ];
    if let Some(description) = show.description_text() {
        lines.push(Line::default());
        lines.push(Line::from(description.to_string()));
    }
    message(
        f,
        h_chunks[0],
        Block::default().borders(Borders::ALL).title(" Show "),
        lines,
    );
    draw_form(f, page.form(), h_chunks[1]);
}

fn draw_form(f: &mut Frame, form: &ContactForm, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Email a guest ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(inner);

    let invalid = form.invalid();
    let input = |title: &'static str, value: &str, field: Field| {
        let mut style = Style::default();
        if form.focus() == field {
            style = style.fg(Color::Yellow);
        }
        if invalid.map(|i| i.field()) == Some(field) {
            style = style.fg(Color::Red);
        }
        Paragraph::new(value.to_string())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(style),
            )
    };
    f.render_widget(
        input(" Guest name ", &form.guest_name, Field::GuestName),
        chunks[0],
    );
    f.render_widget(
        input(" Guest email ", &form.guest_email, Field::GuestEmail),
        chunks[1],
    );
    f.render_widget(
        input(" Message (optional) ", &form.message, Field::Message),
        chunks[2],
    );

    let button_style = if form.is_sending() {
        Style::default().fg(Color::DarkGray)
    } else if form.focus() == Field::Submit {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    f.render_widget(
        Paragraph::new(Span::styled(format!("[ {} ]", form.submit_label()), button_style)),
        chunks[3],
    );

    let status = match (invalid, form.status()) {
        (Some(invalid), _) => Span::styled(invalid.to_string(), Style::default().fg(Color::Red)),
        (None, SubmissionStatus::Success(msg)) => {
            Span::styled(msg.clone(), Style::default().fg(Color::Green))
        }
        (None, SubmissionStatus::Error(msg)) => {
            Span::styled(msg.clone(), Style::default().fg(Color::Red))
        }
        (None, SubmissionStatus::None) => Span::raw(""),
    };
    f.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), chunks[4]);
}

fn draw_tickets(f: &mut Frame, page: &TicketsPage, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let hero = Paragraph::new(Line::from(Span::styled(
        "Get Your Tickets",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(hero, chunks[0]);

    let block = Block::default().borders(Borders::ALL);
    let link = Style::default().fg(Color::Cyan);
    match page.view() {
        ListView::Loading => message(f, chunks[1], block, "Loading upcoming shows…"),
        ListView::Error(err) => message(
            f,
            chunks[1],
            block,
            Span::styled(err.to_string(), Style::default().fg(Color::Red)),
        ),
        ListView::Empty => {
            let lines = vec![
                Line::from("No upcoming shows at the moment"),
                Line::default(),
                Line::from(Span::styled("[w] Join the waitlist", link)),
                Line::from(Span::styled("[Esc] View All Shows", link)),
            ];
            message(f, chunks[1], block, lines)
        }
        ListView::Shows(shows) => {
            let block = block.title(" Upcoming Shows ");
            card_list(f, chunks[1], block, shows, page.selected(), widgets::ticket_card);
            f.render_widget(
                Paragraph::new(Span::styled("[Esc] View all shows", link))
                    .alignment(Alignment::Center),
                chunks[2],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::{ShowStatus, StatusFilter};
    use crate::pages::Response;
    use crate::route::Route;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn open_mic() -> Show {
        Show {
            id: 1,
            title: "Open Mic".into(),
            description: None,
            location: "Basement".into(),
            start_time: Some("2024-01-01T20:00:00Z".into()),
            status: ShowStatus::Past,
        }
    }

    fn on(route: Route, response: impl FnOnce(crate::fetch::Ticket) -> Response) -> AppState {
        let (mut state, req) = AppState::new(&Config::default(), route);
        state.on_response(response(req.ticket()));
        state
    }

    #[test]
    fn past_show_renders_one_card() {
        let state = on(Route::Shows(StatusFilter::Past), |t| {
            Response::Shows(t, Ok(vec![open_mic()]))
        });
        let screen = render(&state);
        assert!(screen.contains("Open Mic"));
        assert_eq!(screen.matches("Past show").count(), 1);
        assert!(!screen.contains("Loading"));
    }

    #[test]
    fn empty_list_renders_empty_state() {
        let state = on(Route::default(), |t| Response::Shows(t, Ok(vec![])));
        let screen = render(&state);
        assert!(screen.contains("No shows for this filter"));
    }

    #[test]
    fn error_replaces_everything_else() {
        let state = on(Route::default(), |t| {
            Response::Shows(
                t,
                Err(crate::error::ApiError::Status {
                    code: 500,
                    message: "database on fire".into(),
                }),
            )
        });
        let screen = render(&state);
        assert!(screen.contains("database on fire"));
        assert!(!screen.contains("Loading shows"));
        assert!(!screen.contains("No shows for this filter"));
    }

    #[test]
    fn loading_detail_shows_only_indicator() {
        let (state, _) = AppState::new(&Config::default(), Route::Show(3));
        let screen = render(&state);
        assert!(screen.contains("Loading…"));
        assert!(!screen.contains("Guest name"));
    }

    #[test]
    fn missing_show_links_back() {
        let state = on(Route::Show(3), |t| Response::Show(t, Ok(None)));
        let screen = render(&state);
        assert!(screen.contains("Show not found."));
        assert!(screen.contains("Back to all shows"));
    }

    #[test]
    fn found_show_has_form() {
        let state = on(Route::Show(1), |t| Response::Show(t, Ok(Some(open_mic()))));
        let screen = render(&state);
        assert!(screen.contains("PAST SHOW"));
        assert!(screen.contains("Guest email"));
        assert!(screen.contains("[ Send email ]"));
    }

    #[test]
    fn header_names_the_backend() {
        let config = Config {
            api_url: "http://shows.test:9000".into(),
            ..Config::default()
        };
        let (mut state, _) = AppState::new(&config, Route::default());
        state.message.clear();
        let screen = render(&state);
        assert!(screen.contains("COMEDYUO"));
        assert!(screen.contains("@ http://shows.test:9000"));
    }

    #[test]
    fn empty_tickets_offer_waitlist() {
        let state = on(Route::Tickets, |t| Response::Shows(t, Ok(vec![])));
        let screen = render(&state);
        assert!(screen.contains("No upcoming shows at the moment"));
        assert!(screen.contains("waitlist"));
        assert!(screen.contains("View All Shows"));
    }

    #[test]
    fn tickets_list_cards() {
        let mut show = open_mic();
        show.status = ShowStatus::Upcoming;
        let state = on(Route::Tickets, |t| Response::Shows(t, Ok(vec![show])));
        let screen = render(&state);
        assert!(screen.contains("Upcoming Shows"));
        assert!(screen.contains("Buy Tickets"));
        assert!(screen.contains("View all shows"));
    }
}
