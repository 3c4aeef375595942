use crate::model::StatusFilter;
use crate::pages::detail::DetailView;
use crate::pages::form::Field;
use crate::pages::shows::ListView;
use crate::pages::{Page, Request};
use crate::route::Route;
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Applies one key press. Returns the actions for the network worker.
pub fn handle_key_event(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return quit(state);
    }

    // While typing into the form, printable keys belong to the form.
    if let Page::Detail(page) = &state.page
        && matches!(page.view(), DetailView::Found(_))
        && page.form().focus().is_text()
    {
        return handle_form_key(state, key);
    }

    match key.code {
        KeyCode::Char('q') => return quit(state),
        KeyCode::Char('?') => {
            state.show_full_help = !state.show_full_help;
            return vec![];
        }
        KeyCode::Char('1') => return navigate(state, Route::default()),
        KeyCode::Char('2') => return navigate(state, Route::Tickets),
        KeyCode::Char('r') => {
            state.message = "Reloading…".to_string();
            return fetch(Some(state.reload()));
        }
        _ => {}
    }

    match &state.page {
        Page::Shows(_) => handle_shows_key(state, key),
        Page::Detail(_) => handle_detail_key(state, key),
        Page::Tickets(_) => handle_tickets_key(state, key),
    }
}

fn quit(state: &mut AppState) -> Vec<Action> {
    state.should_quit = true;
    vec![Action::Quit]
}

fn fetch(req: Option<Request>) -> Vec<Action> {
    req.into_iter().map(Action::Fetch).collect()
}

fn navigate(state: &mut AppState, route: Route) -> Vec<Action> {
    fetch(state.navigate(route))
}

fn handle_shows_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Page::Shows(page) = &mut state.page else {
        return vec![];
    };
    let filter = match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(page.filter().prev()),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Some(page.filter().next()),
        KeyCode::Char('u') => Some(StatusFilter::Upcoming),
        KeyCode::Char('p') => Some(StatusFilter::Past),
        KeyCode::Char('a') => Some(StatusFilter::All),
        KeyCode::Down | KeyCode::Char('j') => {
            page.select_next();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            page.select_prev();
            None
        }
        KeyCode::Enter => {
            if let Some(show) = page.selected_show() {
                let route = Route::Show(show.id);
                return navigate(state, route);
            }
            None
        }
        _ => None,
    };
    match filter {
        Some(filter) => fetch(page.set_filter(filter)),
        None => vec![],
    }
}

fn handle_tickets_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Page::Tickets(page) = &mut state.page else {
        return vec![];
    };
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => page.select_next(),
        KeyCode::Up | KeyCode::Char('k') => page.select_prev(),
        KeyCode::Enter => {
            if let Some(show) = page.selected_show() {
                let route = Route::Show(show.id);
                return navigate(state, route);
            }
        }
        KeyCode::Char('b') => {
            if page.selected_show().is_some() {
                let url = state.ticket_url.clone();
                open_link(state, &url);
            }
        }
        KeyCode::Char('w') => {
            if page.view() == ListView::Empty {
                let url = state.waitlist_url.clone();
                open_link(state, &url);
            }
        }
        KeyCode::Esc => return navigate(state, Route::default()),
        _ => {}
    }
    vec![]
}

// Detail page when the submit button (or nothing) has focus.
fn handle_detail_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Page::Detail(page) = &mut state.page else {
        return vec![];
    };
    let found = matches!(page.view(), DetailView::Found(_));
    match key.code {
        KeyCode::Esc => navigate(state, Route::default()),
        KeyCode::Enter if found => fetch(page.submit()),
        KeyCode::Enter => navigate(state, Route::default()),
        KeyCode::Tab | KeyCode::Down => {
            page.form_mut().focus_next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            page.form_mut().focus_prev();
            vec![]
        }
        _ => vec![],
    }
}

fn handle_form_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Page::Detail(page) = &mut state.page else {
        return vec![];
    };
    let form = page.form_mut();
    match key.code {
        KeyCode::Esc => return navigate(state, Route::default()),
        KeyCode::Tab => form.focus_next(),
        KeyCode::BackTab => form.focus_prev(),
        KeyCode::Backspace => form.backspace(),
        // Enter in a single-line input submits, like a browser form.
        KeyCode::Enter if form.focus() == Field::Message => {
            form.input('\n');
        }
        KeyCode::Enter => return fetch(page.submit()),
        KeyCode::Char(c) => {
            form.input(c);
        }
        _ => {}
    }
    vec![]
}

fn open_link(state: &mut AppState, url: &str) {
    match open::that(url) {
        Ok(()) => state.message = format!("Opened {}", url),
        Err(e) => {
            log::warn!("Could not open {}: {}", url, e);
            state.message = format!("Could not open {}", url);
        }
    }
}
