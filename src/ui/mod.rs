pub mod terminal;

use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb
{
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb
{
    pub const fn new(r: u8, g: u8, b: u8) -> Self
    {
        Self { r, g, b }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control
{
    ResetRow,
    Retry,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text
{
    pub x: u16,
    pub y: u16,
    pub content: String,
    pub color: Rgb,
    pub bold: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect
{
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub color: Rgb,
    pub control: Option<Control>,
}

impl Rect
{
    pub fn contains(&self, x: u16, y: u16) -> bool
    {
        x >= self.x
            && y >= self.y
            && u32::from(x) < u32::from(self.x) + u32::from(self.width)
            && u32::from(y) < u32::from(self.y) + u32::from(self.height)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame
{
    pub background: Option<Rgb>,
    pub rects: Vec<Rect>,
    pub texts: Vec<Text>,
}

impl Frame
{
    pub fn text(&mut self, x: u16, y: u16, content: impl Into<String>, color: Rgb)
    {
        self.texts.push(Text {
            x,
            y,
            content: content.into(),
            color,
            bold: false,
        });
    }

    pub fn bold_text(&mut self, x: u16, y: u16, content: impl Into<String>, color: Rgb)
    {
        self.text(x, y, content, color);
        if let Some(last) = self.texts.last_mut() {
            last.bold = true;
        }
    }

    pub fn rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Rgb)
    {
        self.rects.push(Rect {
            x,
            y,
            width,
            height,
            color,
            control: None,
        });
    }

    pub fn button(&mut self, control: Control, rect: (u16, u16, u16, u16), label: &str, colors: (Rgb, Rgb))
    {
        let (x, y, width, height) = rect;
        let (fill, ink) = colors;
        self.rects.push(Rect {
            x,
            y,
            width,
            height,
            color: fill,
            control: Some(control),
        });
        let label_len = u16::try_from(label.chars().count()).unwrap_or(width);
        let label_x = x + width.saturating_sub(label_len) / 2;
        self.bold_text(label_x, y + height / 2, label, ink);
    }
}

pub trait HitTest
{
    fn control_at(&self, x: u16, y: u16) -> Option<Control>;
}

impl HitTest for Frame
{
    fn control_at(&self, x: u16, y: u16) -> Option<Control>
    {
        self.rects
            .iter()
            .rev()
            .filter(|rect| rect.contains(x, y))
            .find_map(|rect| rect.control)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent
{
    Close,
    /// Raw character, including backspace as `'\u{8}'`.
    Character(char),
    Submit,
    Control(Control),
    MousePressed { x: u16, y: u16 },
}

pub trait Renderer: HitTest
{
    fn draw(&mut self, frame: &Frame) -> Result<(), GameError>;
}

pub trait InputSource
{
    fn poll(&mut self) -> Result<Vec<InputEvent>, GameError>;
}
