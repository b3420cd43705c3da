//! Terminal palette.

use pathlab_term::Color;

// -- Backgrounds --

pub const BG: Color = Color::DEFAULT;
pub const BG_STATUS: Color = Color::from_rgb(40, 42, 54);

// -- Cell tiles --

pub const START_BG: Color = Color::from_rgb(80, 200, 80);
pub const END_BG: Color = Color::from_rgb(220, 70, 70);
pub const WALL_BG: Color = Color::from_rgb(150, 155, 170);
pub const PATH_BG: Color = Color::from_rgb(220, 200, 60);
pub const OPEN_BG: Color = Color::from_rgb(80, 210, 210);
pub const VISITED_BG: Color = Color::from_rgb(100, 130, 255);

// -- Text --

pub const FG: Color = Color::DEFAULT;
pub const FG_DARK: Color = Color::from_rgb(20, 20, 24);
pub const FG_DIM: Color = Color::from_rgb(98, 100, 106);
pub const FG_EMPH: Color = Color::from_rgb(248, 248, 242);
pub const FG_NOTICE: Color = Color::from_rgb(220, 140, 50);
