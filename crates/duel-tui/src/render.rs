use std::io;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use duel_core::{Position, SolveReport};

use crate::app::{format_ms, App, ScreenState};

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, _) = terminal::size()?;

    execute!(stdout, Hide, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;
    match app.screen {
        ScreenState::Board => render_board_screen(stdout, app, term_width)?,
        ScreenState::History => render_history_screen(stdout, app)?,
    }
    execute!(stdout, Show)?;
    Ok(())
}

fn render_board_screen(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    // Board is 25 columns; sidebar sits to its right when the terminal
    // allows, else below.
    let board_x = 2u16;
    let board_y = 1u16;
    render_grid(stdout, app, board_x, board_y)?;

    let sidebar_x = if term_width >= 25 + 36 { board_x + 29 } else { board_x };
    let sidebar_y = if term_width >= 25 + 36 { board_y } else { board_y + 14 };
    render_sidebar(stdout, app, sidebar_x, sidebar_y)?;

    let footer_y = sidebar_y.max(board_y + 13) + 9;
    if let Some(msg) = &app.message {
        execute!(
            stdout,
            MoveTo(board_x, footer_y),
            SetForegroundColor(app.theme.accent),
            Print(msg)
        )?;
    }
    execute!(
        stdout,
        MoveTo(board_x, footer_y + 1),
        SetForegroundColor(app.theme.dim),
        Print("n new  1/2/3 difficulty  d dfs  c csp  s race  r reset  h history  q quit")
    )?;
    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let mut line = y;

    for row in 0..9 {
        if row % 3 == 0 {
            execute!(
                stdout,
                MoveTo(x, line),
                SetForegroundColor(theme.box_border),
                Print("+-------+-------+-------+")
            )?;
            line += 1;
        }
        execute!(stdout, MoveTo(x, line), SetForegroundColor(theme.border))?;
        for col in 0..9 {
            if col % 3 == 0 {
                execute!(stdout, SetForegroundColor(theme.border), Print("| "))?;
            }
            let pos = Position::new(row, col);
            let value = app.display.get(pos);
            if value == 0 {
                execute!(stdout, SetForegroundColor(theme.dim), Print(". "))?;
            } else {
                // Clues and solver-filled cells read differently.
                let color = if app.puzzle.is_blank(pos) {
                    theme.solved
                } else {
                    theme.given
                };
                execute!(stdout, SetForegroundColor(color), Print(format!("{value} ")))?;
            }
        }
        execute!(stdout, SetForegroundColor(theme.border), Print("|"))?;
        line += 1;
    }
    execute!(
        stdout,
        MoveTo(x, line),
        SetForegroundColor(theme.box_border),
        Print("+-------+-------+-------+")
    )?;
    Ok(())
}

fn render_sidebar(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    let difficulty = match app.difficulty {
        Some(d) => d.to_string(),
        None => "custom".to_string(),
    };
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.text),
        Print(format!("puzzle   {difficulty}, {} givens", app.puzzle.filled_count())),
        MoveTo(x, y + 1),
        SetForegroundColor(theme.dim),
        Print(format!("next     {}", app.next_difficulty)),
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 3),
        SetForegroundColor(theme.box_border),
        Print("latest duel"),
    )?;
    match &app.report {
        Some(report) => {
            let winner = report.winner();
            render_result_line(stdout, app, x, y + 4, &report.dfs, winner == Some(report.dfs.strategy))?;
            render_result_line(stdout, app, x, y + 5, &report.csp, winner == Some(report.csp.strategy))?;
            if report.dfs.solved && report.csp.solved {
                let ratio =
                    report.dfs.elapsed.as_secs_f64() / report.csp.elapsed.as_secs_f64().max(1e-9);
                execute!(
                    stdout,
                    MoveTo(x, y + 6),
                    SetForegroundColor(theme.text),
                    Print(format!("dfs/csp  {ratio:.2}x"))
                )?;
            }
        }
        None => {
            execute!(
                stdout,
                MoveTo(x, y + 4),
                SetForegroundColor(theme.dim),
                Print("press s to race the solvers")
            )?;
        }
    }

    execute!(
        stdout,
        MoveTo(x, y + 8),
        SetForegroundColor(theme.dim),
        Print(format!("{} duels recorded", app.history.len()))
    )?;
    Ok(())
}

fn render_result_line(
    stdout: &mut io::Stdout,
    app: &App,
    x: u16,
    y: u16,
    report: &SolveReport,
    winner: bool,
) -> io::Result<()> {
    let theme = &app.theme;
    let status: (&str, Color) = if report.solved {
        ("solved", theme.win)
    } else {
        ("failed", theme.fail)
    };
    let marker = if winner { "*" } else { " " };
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(if winner { theme.win } else { theme.text }),
        Print(format!("{marker}{:<4}", report.strategy.to_string())),
        SetForegroundColor(status.1),
        Print(format!(" {:<7}", status.0)),
        SetForegroundColor(theme.text),
        Print(format!(" {:>10}", format_ms(report.elapsed))),
    )?;
    Ok(())
}

fn render_history_screen(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    execute!(
        stdout,
        MoveTo(2, 1),
        SetForegroundColor(theme.box_border),
        Print("duel history (newest first)"),
    )?;

    if app.history.is_empty() {
        execute!(
            stdout,
            MoveTo(2, 3),
            SetForegroundColor(theme.dim),
            Print("nothing recorded yet")
        )?;
    }

    for (i, record) in app.history.recent(15).enumerate() {
        let report = &record.report;
        let line = format!(
            "{:<8} dfs {:>10}  csp {:>10}  {}",
            record.difficulty,
            format_ms(report.dfs.elapsed),
            format_ms(report.csp.elapsed),
            match report.winner() {
                Some(winner) => format!("{winner} won"),
                None => "no result".to_string(),
            }
        );
        execute!(
            stdout,
            MoveTo(2, 3 + i as u16),
            SetForegroundColor(theme.text),
            Print(line)
        )?;
    }

    execute!(
        stdout,
        MoveTo(2, 20),
        SetForegroundColor(theme.dim),
        Print("esc back  q quit")
    )?;
    Ok(())
}
