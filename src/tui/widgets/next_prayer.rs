use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::prayer_times::NextPrayer;
use crate::tui::theme::{self, Palette};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    next_prayer: Option<&NextPrayer>,
    friday: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border())
        .style(palette.surface());

    let mut content: Vec<Line> = match next_prayer {
        None => vec![
            Line::from(""),
            Line::from(Span::styled("Vakitler yükleniyor…", theme::dim())),
        ],
        Some(next) => vec![
            Line::from(Span::styled(
                format!("{} vaktine kalan süre:", next.label()),
                theme::dim(),
            )),
            Line::from(Span::styled(
                next.remaining.to_string(),
                palette.accent().add_modifier(Modifier::BOLD),
            )),
        ],
    };

    if friday {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            " Hayırlı Cumalar ",
            theme::green().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )));
    }

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
