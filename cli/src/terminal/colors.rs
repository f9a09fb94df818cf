use colored::Color;

pub const PRIMARY: Color = Color::BrightBlue;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const GOOD: Color = Color::Green;
pub const BAD: Color = Color::Red;
