//! Terminal rendering: one colored block per cell plus a status line.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use gridpath_core::CellState;

use crate::app::{App, CELL_COLS, HEADER_ROWS, Phase};

/// Presentation color for each visualization tag.
fn state_color(state: CellState) -> Color {
    match state {
        CellState::Unvisited => Color::Rgb {
            r: 255,
            g: 255,
            b: 255,
        },
        CellState::Frontier => Color::Rgb {
            r: 0,
            g: 120,
            b: 255,
        },
        CellState::Processing => Color::Rgb {
            r: 255,
            g: 220,
            b: 0,
        },
        CellState::Visited => Color::Rgb { r: 0, g: 200, b: 0 },
        CellState::Obstacle => Color::Rgb { r: 220, g: 0, b: 0 },
        CellState::Path => Color::Rgb {
            r: 128,
            g: 0,
            b: 200,
        },
        CellState::Start => Color::Rgb {
            r: 0,
            g: 200,
            b: 200,
        },
        CellState::Target => Color::Rgb {
            r: 255,
            g: 140,
            b: 0,
        },
    }
}

/// Redraw the status line and the full grid.
pub fn draw(app: &App, out: &mut impl Write) -> io::Result<()> {
    let phase = match app.phase() {
        Phase::Idle => "idle",
        Phase::Running => "searching",
        Phase::Finished => "done",
    };
    let status = format!(
        " {phase}  [space] run  [r] scatter  [c] clear  [d] diag:{}  [up/dn] delay:{}ms  [q] quit",
        if app.grid().diagonal() { "on" } else { "off" },
        app.delay().as_millis(),
    );
    queue!(
        out,
        ResetColor,
        cursor::MoveTo(0, 0),
        Clear(ClearType::CurrentLine),
        SetForegroundColor(Color::White),
        Print(&status),
    )?;

    for cell in app.grid().cells() {
        let x = cell.pos.x as u16 * CELL_COLS;
        let y = cell.pos.y as u16 + HEADER_ROWS;
        queue!(
            out,
            cursor::MoveTo(x, y),
            SetBackgroundColor(state_color(cell.state)),
            Print("  "),
        )?;
    }

    queue!(out, ResetColor)?;
    out.flush()
}
