use std::fmt;

use crossterm::style::{style, Stylize};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PlayerColor {
    Red,
    Yellow,
    Green,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl PlayerColor {
    pub const fn count() -> usize {
        7
    }

    /// Colour of the player at `index` in the roster, wrapping past the palette.
    pub fn for_index(index: usize) -> Self {
        match index % Self::count() {
            0 => PlayerColor::Red,
            1 => PlayerColor::Yellow,
            2 => PlayerColor::Green,
            3 => PlayerColor::Blue,
            4 => PlayerColor::Magenta,
            5 => PlayerColor::Cyan,
            _ => PlayerColor::White,
        }
    }

    pub fn to_crossterm(self) -> crossterm::style::Color {
        use crossterm::style::Color;
        match self {
            PlayerColor::Red => Color::Red,
            PlayerColor::Yellow => Color::Yellow,
            PlayerColor::Green => Color::Green,
            PlayerColor::Blue => Color::Blue,
            PlayerColor::Magenta => Color::Magenta,
            PlayerColor::Cyan => Color::Cyan,
            PlayerColor::White => Color::White,
        }
    }

    pub fn to_ratatui(self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            PlayerColor::Red => Color::Red,
            PlayerColor::Yellow => Color::Yellow,
            PlayerColor::Green => Color::Green,
            PlayerColor::Blue => Color::Blue,
            PlayerColor::Magenta => Color::Magenta,
            PlayerColor::Cyan => Color::Cyan,
            PlayerColor::White => Color::White,
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerColor::Red => "Red",
            PlayerColor::Yellow => "Yellow",
            PlayerColor::Green => "Green",
            PlayerColor::Blue => "Blue",
            PlayerColor::Magenta => "Magenta",
            PlayerColor::Cyan => "Cyan",
            PlayerColor::White => "White",
        };
        write!(f, "{}", name)
    }
}

pub fn colorize(text: &str, color: PlayerColor) -> String {
    style(text).with(color.to_crossterm()).to_string()
}
