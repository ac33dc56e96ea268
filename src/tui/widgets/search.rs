use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme::{self, Palette};

pub fn render(frame: &mut Frame, area: Rect, palette: &Palette, input: &str, editing: bool) {
    let line = if editing {
        Line::from(vec![
            Span::styled(" ", theme::dim()),
            Span::styled(input, theme::bold()),
            Span::styled("█", theme::amber()),
        ])
    } else {
        Line::from(Span::styled(" Şehir adı… [/]", theme::dim()))
    };

    let border = if editing {
        theme::amber().add_modifier(Modifier::BOLD)
    } else {
        palette.border()
    };

    let block = Block::default()
        .title(Span::styled(" Şehir ", palette.accent()))
        .title_bottom(Line::from(Span::styled(" [Enter] Değiştir ", theme::dim())).right_aligned())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(palette.surface());

    frame.render_widget(Paragraph::new(line).block(block), area);
}
