pub mod app;
pub mod ui;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use taskboard_core::ViewSession;

use crate::backend::Backend as TaskBackend;
use crate::tui::app::{App, InputMode};

pub fn run(session: ViewSession<TaskBackend>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(std::time::Duration::from_millis(250))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match app.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => app.next(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous(),
                    KeyCode::Char(' ') | KeyCode::Enter => app.toggle_status(),
                    KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
                    KeyCode::Char('a') => app.enter_add_mode(),
                    KeyCode::Char('/') => app.enter_search_mode(),
                    KeyCode::Char('f') => app.cycle_filter(),
                    KeyCode::Char('r') => app.reload(),
                    KeyCode::Esc => app.session.state_mut().clear_notice(),
                    _ => {}
                },
                InputMode::ConfirmDelete => match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
                    // Anything else dismisses the dialog
                    _ => app.cancel_delete(),
                },
                InputMode::Adding => match key.code {
                    KeyCode::Enter => app.submit_command(),
                    KeyCode::Esc => app.exit_input_mode(),
                    KeyCode::Char(c) => app.input_char(c),
                    KeyCode::Backspace => app.delete_char(),
                    KeyCode::Left => app.move_cursor_left(),
                    KeyCode::Right => app.move_cursor_right(),
                    _ => {}
                },
                InputMode::Searching => match key.code {
                    KeyCode::Enter => app.submit_command(),
                    KeyCode::Esc => app.clear_search(),
                    KeyCode::Char(c) => app.input_char(c),
                    KeyCode::Backspace => app.delete_char(),
                    KeyCode::Left => app.move_cursor_left(),
                    KeyCode::Right => app.move_cursor_right(),
                    _ => {}
                },
            },
            Event::Mouse(mouse) => {
                let deleting = matches!(app.input_mode, InputMode::ConfirmDelete);
                if let (true, MouseEventKind::Down(_), Some(dialog)) =
                    (deleting, mouse.kind, app.confirm_area)
                {
                    if ui::click_dismisses_dialog(dialog, mouse.column, mouse.row) {
                        app.cancel_delete();
                    }
                }
            }
            _ => {}
        }
    }
}
