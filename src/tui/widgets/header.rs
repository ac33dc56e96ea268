use chrono::NaiveDateTime;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme::{self, Palette};
use crate::utils::format::{format_clock, format_date, weekday_name};

pub struct HeaderInfo<'a> {
    pub now: NaiveDateTime,
    pub hijri: Option<String>,
    pub city: &'a str,
    pub muted: bool,
}

pub fn render(frame: &mut Frame, area: Rect, palette: &Palette, info: &HeaderInfo) {
    let today = info.now.date();

    let clock_line = Line::from(Span::styled(
        format_clock(info.now.time()),
        palette.accent().add_modifier(Modifier::BOLD),
    ));

    let date_line = Line::from(vec![
        Span::styled(format_date(today), theme::dim()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(weekday_name(today), theme::dim()),
    ]);

    let hijri_line = match &info.hijri {
        Some(h) => Line::from(Span::styled(format!("☾ {}", h), theme::amber())),
        None => Line::from(Span::styled("☾ --", theme::dim())),
    };

    let city_line = Line::from(Span::styled(
        info.city.to_uppercase(),
        theme::bold(),
    ));

    let sound = if info.muted { " 🔇 " } else { " 🔊 " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.accent().add_modifier(Modifier::BOLD))
        .title(Span::styled("  vakit  ", palette.accent().add_modifier(Modifier::BOLD)))
        .title_alignment(Alignment::Center)
        .title_bottom(Line::from(Span::styled(sound, theme::dim())).right_aligned())
        .style(palette.base());

    let text = vec![clock_line, date_line, hijri_line, city_line];
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
