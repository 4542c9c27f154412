use crossterm::style::Color;

/// Color palette for the terminal UI.
pub struct Theme {
    pub bg: Color,
    pub border: Color,
    pub box_border: Color,
    pub given: Color,
    pub solved: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub win: Color,
    pub fail: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Reset,
            border: Color::DarkGrey,
            box_border: Color::Grey,
            given: Color::White,
            solved: Color::Cyan,
            text: Color::Grey,
            dim: Color::DarkGrey,
            accent: Color::Blue,
            win: Color::Green,
            fail: Color::Red,
        }
    }
}
