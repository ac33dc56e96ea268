use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::{PrayerSchedule, PrayerType};
use crate::tui::theme::{self, Palette};
use crate::utils::format::format_time;

/// `upcoming` is highlighted; it is `None` before a schedule loads.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    schedule: Option<&PrayerSchedule>,
    upcoming: Option<PrayerType>,
) {
    let block = Block::default()
        .title(Span::styled(" Vakitler ", palette.accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border())
        .style(palette.surface());

    let items: Vec<ListItem> = PrayerType::all()
        .map(|prayer| {
            let time_str = schedule
                .map(|s| format_time(s.time(prayer)))
                .unwrap_or_else(|| "--:--".to_string());

            let is_next = upcoming == Some(prayer);
            let (marker, name_style) = if is_next {
                ("▸ ", palette.accent().add_modifier(Modifier::BOLD))
            } else {
                ("  ", theme::bold())
            };

            let line = Line::from(vec![
                Span::styled(format!("  {}", marker), palette.accent()),
                Span::styled(format!("{:<8}", prayer.display_name()), name_style),
                Span::styled(time_str, if is_next { name_style } else { theme::dim() }),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
