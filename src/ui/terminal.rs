use super::{Control, Frame, HitTest, InputEvent, InputSource, Rect, Renderer, Rgb};
use crate::error::GameError;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;

const DEFAULT_INK: Rgb = Rgb::new(50, 50, 50);

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell
{
    ch: char,
    fg: Rgb,
    bg: Option<Rgb>,
    bold: bool,
}

impl Cell
{
    fn blank(bg: Option<Rgb>) -> Self
    {
        Self {
            ch: ' ',
            fg: DEFAULT_INK,
            bg,
            bold: false,
        }
    }
}

pub struct Terminal
{
    stdout: Stdout,
    controls: Vec<Rect>,
}

impl Terminal
{
    pub fn enter() -> io::Result<Self>
    {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self {
            stdout,
            controls: Vec::new(),
        })
    }
}

impl Drop for Terminal
{
    fn drop(&mut self)
    {
        let _ = execute!(self.stdout, Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl HitTest for Terminal
{
    fn control_at(&self, x: u16, y: u16) -> Option<Control>
    {
        self.controls
            .iter()
            .rev()
            .find(|rect| rect.contains(x, y))
            .and_then(|rect| rect.control)
    }
}

impl Renderer for Terminal
{
    fn draw(&mut self, frame: &Frame) -> Result<(), GameError>
    {
        let (cols, rows) = terminal::size().unwrap_or((80, 24));
        let lines = rasterize(frame, cols as usize, rows as usize);
        let output = lines
            .iter()
            .map(|row| render_row(row))
            .collect::<Vec<_>>()
            .join("\r\n");

        queue!(self.stdout, MoveTo(0, 0))?;
        self.stdout.write_all(output.as_bytes())?;
        self.stdout.flush()?;

        self.controls = frame
            .rects
            .iter()
            .filter(|rect| rect.control.is_some())
            .copied()
            .collect();
        Ok(())
    }
}

impl InputSource for Terminal
{
    fn poll(&mut self) -> Result<Vec<InputEvent>, GameError>
    {
        let mut events = Vec::new();
        while event::poll(Duration::from_millis(0))? {
            if let Some(mapped) = map_event(event::read()?) {
                events.push(mapped);
            }
        }
        Ok(events)
    }
}

fn map_event(event: Event) -> Option<InputEvent>
{
    match event {
        Event::Key(KeyEvent { kind: KeyEventKind::Release, .. }) => None,
        Event::Key(KeyEvent { code, modifiers, .. }) => match code {
            KeyCode::Esc => Some(InputEvent::Close),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputEvent::Close)
            }
            KeyCode::Char(' ') => Some(InputEvent::Submit),
            KeyCode::Backspace => Some(InputEvent::Character('\u{8}')),
            KeyCode::Tab => Some(InputEvent::Control(Control::ResetRow)),
            KeyCode::Enter => Some(InputEvent::Control(Control::Retry)),
            KeyCode::Char(ch) => Some(InputEvent::Character(ch)),
            _ => None,
        },
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(InputEvent::MousePressed { x: column, y: row }),
        _ => None,
    }
}

fn rasterize(frame: &Frame, width: usize, height: usize) -> Vec<Vec<Cell>>
{
    let width = width.max(1);
    let height = height.max(1);
    let mut grid = vec![vec![Cell::blank(frame.background); width]; height];

    for rect in &frame.rects {
        let x0 = rect.x as usize;
        let y0 = rect.y as usize;
        let x1 = (x0 + rect.width as usize).min(width);
        let y1 = (y0 + rect.height as usize).min(height);
        for row in grid.iter_mut().take(y1).skip(y0) {
            for cell in row.iter_mut().take(x1).skip(x0) {
                *cell = Cell::blank(Some(rect.color));
            }
        }
    }

    for text in &frame.texts {
        let y = text.y as usize;
        let Some(row) = grid.get_mut(y) else {
            continue;
        };
        for (offset, ch) in text.content.chars().enumerate() {
            let Some(cell) = row.get_mut(text.x as usize + offset) else {
                break;
            };
            cell.ch = ch;
            cell.fg = text.color;
            cell.bold = text.bold;
        }
    }

    grid
}

fn render_row(row: &[Cell]) -> String
{
    let mut line = String::with_capacity(row.len() + 32);
    let mut active: Option<(Rgb, Option<Rgb>, bool)> = None;
    for cell in row {
        let style = (cell.fg, cell.bg, cell.bold);
        if active != Some(style) {
            line.push_str(&ansi_style(cell.fg, cell.bg, cell.bold));
            active = Some(style);
        }
        line.push(cell.ch);
    }
    line.push_str("\x1b[0m");
    line
}

fn ansi_style(fg: Rgb, bg: Option<Rgb>, bold: bool) -> String
{
    let mut style = String::from("\x1b[0m");
    if bold {
        style.push_str("\x1b[1m");
    }
    style.push_str(&format!("\x1b[38;2;{};{};{}m", fg.r, fg.g, fg.b));
    if let Some(bg) = bg {
        style.push_str(&format!("\x1b[48;2;{};{};{}m", bg.r, bg.g, bg.b));
    }
    style
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::game::clock::SystemClock;
    use crate::game::controller::{GameConfig, GameController};
    use crossterm::event::KeyEventState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn key(code: KeyCode) -> Event
    {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn keys_map_to_game_events()
    {
        assert_eq!(map_event(key(KeyCode::Esc)), Some(InputEvent::Close));
        assert_eq!(map_event(key(KeyCode::Char(' '))), Some(InputEvent::Submit));
        assert_eq!(map_event(key(KeyCode::Char('q'))), Some(InputEvent::Character('q')));
        assert_eq!(map_event(key(KeyCode::Backspace)), Some(InputEvent::Character('\u{8}')));
        assert_eq!(
            map_event(key(KeyCode::Tab)),
            Some(InputEvent::Control(Control::ResetRow))
        );
        assert_eq!(map_event(key(KeyCode::Enter)), Some(InputEvent::Control(Control::Retry)));
        assert_eq!(map_event(key(KeyCode::Left)), None);
        assert_eq!(
            map_event(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))),
            Some(InputEvent::Close)
        );
    }

    #[test]
    fn key_release_is_ignored()
    {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_event(Event::Key(release)), None);
    }

    #[test]
    fn left_click_reports_position()
    {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(click), Some(InputEvent::MousePressed { x: 12, y: 4 }));

        let right = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(right), None);
    }

    #[test]
    fn rasterize_paints_rects_then_text_and_clips()
    {
        let grey = Rgb::new(200, 200, 200);
        let red = Rgb::new(255, 0, 0);
        let mut frame = Frame::default();
        frame.rect(1, 0, 3, 1, grey);
        frame.text(2, 0, "abcdef", red);
        frame.text(0, 9, "offscreen", red);

        let grid = rasterize(&frame, 5, 2);

        assert_eq!(grid.len(), 2);
        let line: String = grid[0].iter().map(|cell| cell.ch).collect();
        assert_eq!(line, "  abc");
        assert_eq!(grid[0][2].fg, red);
        assert_eq!(grid[0][2].bg, Some(grey));
        assert_eq!(grid[0][4].bg, None);
    }

    #[test]
    fn board_fits_a_standard_terminal()
    {
        let game = GameController::new(GameConfig::default(), SystemClock, StdRng::seed_from_u64(2));
        let frame = game.frame();
        let grid = rasterize(&frame, 80, 24);

        let found = grid.iter().enumerate().find_map(|(y, row)| {
            let line: String = row.iter().map(|cell| cell.ch).collect();
            line.find("Reset").map(|x| (x as u16, y as u16))
        });
        let (x, y) = found.expect("Reset label not drawn at 80x24");
        assert_eq!(frame.control_at(x, y), Some(Control::ResetRow));

        for rect in &frame.rects {
            assert!(rect.x + rect.width <= 80 && rect.y + rect.height <= 24);
        }
        for text in &frame.texts {
            assert!(text.x as usize + text.content.chars().count() <= 80, "{}", text.content);
        }
    }
}
