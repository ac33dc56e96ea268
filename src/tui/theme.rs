use ratatui::style::{Color, Modifier, Style};

use crate::prayer_times::Background;

pub const TEXT: Color = Color::Rgb(230, 218, 196);
pub const TEXT_DIM: Color = Color::Rgb(130, 118, 96);
pub const GOLD: Color = Color::Rgb(196, 160, 68);
pub const GREEN: Color = Color::Rgb(92, 148, 92);
pub const AMBER: Color = Color::Rgb(210, 138, 60);
pub const RED: Color = Color::Rgb(180, 82, 62);

/// Colours standing in for the day / sunset / night backdrops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub surface: Color,
    pub border: Color,
    pub accent: Color,
}

pub fn palette(background: Background) -> Palette {
    match background {
        Background::Day => Palette {
            bg: Color::Rgb(36, 62, 88),
            surface: Color::Rgb(44, 74, 104),
            border: Color::Rgb(96, 138, 170),
            accent: GOLD,
        },
        Background::Sunset => Palette {
            bg: Color::Rgb(70, 32, 30),
            surface: Color::Rgb(88, 42, 36),
            border: Color::Rgb(170, 92, 60),
            accent: AMBER,
        },
        Background::Night => Palette {
            bg: Color::Rgb(18, 16, 14),
            surface: Color::Rgb(28, 25, 20),
            border: Color::Rgb(55, 48, 36),
            accent: GOLD,
        },
    }
}

impl Palette {
    pub fn base(&self) -> Style {
        Style::default().fg(TEXT).bg(self.bg)
    }

    pub fn surface(&self) -> Style {
        Style::default().fg(TEXT).bg(self.surface)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_background_has_its_own_palette() {
        let day = palette(Background::Day);
        let sunset = palette(Background::Sunset);
        let night = palette(Background::Night);
        assert_ne!(day.bg, sunset.bg);
        assert_ne!(sunset.bg, night.bg);
        assert_ne!(day.bg, night.bg);
    }
}
