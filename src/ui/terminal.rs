use crossterm::{
    cursor,
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{self as term, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

use super::{layout, App};
use crate::error::Result;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the dashboard until the user quits.
///
/// Blocks on each key press; there is no background refresh. The terminal is
/// restored even when drawing fails.
pub fn run(app: &mut App) -> Result<()> {
    let mut terminal = setup()?;
    let result = event_loop(&mut terminal, app);
    restore(&mut terminal)?;
    result
}

fn setup() -> Result<Term> {
    term::enable_raw_mode()?;
    // Alternate screen keeps stderr logs out of the drawing area
    execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore(terminal: &mut Term) -> Result<()> {
    term::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

fn event_loop(terminal: &mut Term, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| layout::render(f, app))?;

        if let TermEvent::Key(key) = event::read()? {
            // Windows reports releases too
            if key.kind == KeyEventKind::Press {
                app.on_key(key.code);
            }
        }
    }
    Ok(())
}
