use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::render::palette::TuiPalette;

use super::data::DashboardData;
use super::state::DashboardState;
use super::views::draw_dashboard;

/// Show the dashboard until `q` or `Ctrl-C`.
pub fn run(data: &DashboardData, palette: &TuiPalette, today: NaiveDate) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, data, palette, today);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    data: &DashboardData,
    palette: &TuiPalette,
    today: NaiveDate,
) -> io::Result<()> {
    let contributors = data.contributions.len();
    let folders = data.folders.len();
    let mut state = DashboardState::new(contributors, folders);

    loop {
        terminal.draw(|f| draw_dashboard(f, data, &mut state, palette, today))?;

        if !poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
            KeyCode::Char('j') | KeyCode::Down => state.scroll_down(contributors, folders),
            KeyCode::Char('k') | KeyCode::Up => state.scroll_up(contributors, folders),
            KeyCode::Char('n') => state.switch_focus(),
            _ => {}
        }
    }
}
