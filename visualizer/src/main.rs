//! Interactive terminal shortest-path visualizer.
//!
//! Run: cargo run --bin gridpath
//!
//! Left click toggles obstacles, right click moves the start (shift+right
//! the target), space runs the search one step per tick.

mod app;
mod render;
mod scatter;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use app::App;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new()?;
    let mut stdout = io::stdout();
    setup_terminal(&mut stdout)?;
    let result = event_loop(&mut app, &mut stdout);
    restore_terminal(&mut stdout);
    result
}

fn event_loop(app: &mut App, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    while !app.should_quit() {
        if event::poll(Duration::from_millis(16))? {
            while event::poll(Duration::ZERO)? {
                let ev = event::read()?;
                app.update(&ev);
            }
        }
        app.tick(Instant::now());
        render::draw(app, out)?;
    }
    Ok(())
}

fn setup_terminal(out: &mut impl Write) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(
        out,
        EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(ClearType::All),
        EnableMouseCapture,
    )
}

/// Best-effort teardown; runs on error paths too.
fn restore_terminal(out: &mut impl Write) {
    let _ = execute!(
        out,
        DisableMouseCapture,
        cursor::Show,
        LeaveAlternateScreen,
    );
    let _ = terminal::disable_raw_mode();
}
