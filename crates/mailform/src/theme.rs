//! Colors for the form, resolved once at startup and passed to the renderer.
//!
//! The palette comes from configuration as `#RRGGBB` strings. The color mode
//! decides how those are emitted: as true color, folded onto the xterm 256
//! palette, or onto the 16 basic ANSI colors.

use std::{env, fmt, str::FromStr};

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    TrueColor,
    Ansi256,
    Ansi16,
}

impl ColorMode {
    /// `MAILFORM_COLOR_MODE` wins, then `COLORTERM` / `TERM` sniffing.
    pub fn detect() -> Self {
        if let Ok(v) = env::var("MAILFORM_COLOR_MODE") {
            if let Some(mode) = Self::parse(&v) {
                return mode;
            }
        }
        if let Ok(v) = env::var("COLORTERM") {
            let l = v.to_ascii_lowercase();
            if l.contains("truecolor") || l.contains("24bit") {
                return ColorMode::TrueColor;
            }
        }
        if let Ok(v) = env::var("TERM") {
            if v.to_ascii_lowercase().contains("256color") {
                return ColorMode::Ansi256;
            }
        }
        ColorMode::Ansi16
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "24bit" | "truecolor" | "rgb" => Some(ColorMode::TrueColor),
            "256" | "ansi256" => Some(ColorMode::Ansi256),
            "16" | "ansi16" | "ansi" => Some(ColorMode::Ansi16),
            _ => None,
        }
    }
}

/// Parts of the form that get their own style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiGroup {
    Label,
    Text,
    Placeholder,
    Hint,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRgb(String);

impl fmt::Display for InvalidRgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a #RRGGBB color, got {:?}", self.0)
    }
}

impl FromStr for Rgb {
    type Err = InvalidRgb;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(InvalidRgb(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| InvalidRgb(s.to_string()))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = InvalidRgb;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub label: Rgb,
    pub text: Rgb,
    pub placeholder: Rgb,
    pub hint: Rgb,
    pub error: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        // hot pink labels, dark grey hints
        Self {
            label: Rgb(0xFF, 0x06, 0x87),
            text: Rgb(0xE4, 0xE4, 0xE4),
            placeholder: Rgb(0x76, 0x76, 0x76),
            hint: Rgb(0x76, 0x76, 0x76),
            error: Rgb(0xF7, 0x76, 0x8E),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub mode: ColorMode,
    pub palette: Palette,
}

impl Theme {
    pub fn new(mode: ColorMode, palette: Palette) -> Self {
        Self { mode, palette }
    }

    pub fn from_env(palette: Palette) -> Self {
        Self::new(ColorMode::detect(), palette)
    }

    pub fn style(&self, group: UiGroup) -> Style {
        let p = &self.palette;
        match group {
            UiGroup::Label => Style::default().fg(self.color(p.label)),
            UiGroup::Text => Style::default().fg(self.color(p.text)),
            UiGroup::Placeholder => Style::default().fg(self.color(p.placeholder)),
            UiGroup::Hint => Style::default().fg(self.color(p.hint)),
            UiGroup::Error => Style::default()
                .fg(self.color(p.error))
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn color(&self, rgb: Rgb) -> Color {
        match self.mode {
            ColorMode::TrueColor => Color::Rgb(rgb.0, rgb.1, rgb.2),
            ColorMode::Ansi256 => Color::Indexed(rgb_to_ansi256(rgb)),
            ColorMode::Ansi16 => rgb_to_ansi16(rgb),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ColorMode::TrueColor, Palette::default())
    }
}

fn rgb_to_ansi256(Rgb(r, g, b): Rgb) -> u8 {
    // 6x6x6 cube vs. 24-step grey ramp, whichever lands closer
    let level = |c: u8| (c as f32 / 255.0 * 5.0).round() as u8;
    let (ri, gi, bi) = (level(r), level(g), level(b));
    let cube = 16 + 36 * ri + 6 * gi + bi;
    let cube_dist = distance((r, g, b), (ri * 51, gi * 51, bi * 51));

    let avg = (r as u16 + g as u16 + b as u16) / 3;
    let grey_step = ((avg as f32 / 255.0) * 23.0).round() as u8;
    let grey = (grey_step as f32 * 255.0 / 23.0).round() as u8;
    let grey_dist = distance((r, g, b), (grey, grey, grey));

    if grey_dist + 15 < cube_dist {
        232 + grey_step
    } else {
        cube
    }
}

fn rgb_to_ansi16(rgb: Rgb) -> Color {
    const TABLE: [(Color, (u8, u8, u8)); 16] = [
        (Color::Black, (0, 0, 0)),
        (Color::Red, (205, 0, 0)),
        (Color::Green, (0, 205, 0)),
        (Color::Yellow, (205, 205, 0)),
        (Color::Blue, (0, 0, 238)),
        (Color::Magenta, (205, 0, 205)),
        (Color::Cyan, (0, 205, 205)),
        (Color::Gray, (229, 229, 229)),
        (Color::DarkGray, (127, 127, 127)),
        (Color::LightRed, (255, 0, 0)),
        (Color::LightGreen, (0, 255, 0)),
        (Color::LightYellow, (255, 255, 0)),
        (Color::LightBlue, (92, 92, 255)),
        (Color::LightMagenta, (255, 0, 255)),
        (Color::LightCyan, (0, 255, 255)),
        (Color::White, (255, 255, 255)),
    ];
    let Rgb(r, g, b) = rgb;
    TABLE
        .iter()
        .min_by_key(|(_, c)| distance((r, g, b), *c))
        .map(|(color, _)| *color)
        .unwrap_or(Color::Reset)
}

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> u16 {
    a.0.abs_diff(b.0) as u16 + a.1.abs_diff(b.1) as u16 + a.2.abs_diff(b.2) as u16
}
