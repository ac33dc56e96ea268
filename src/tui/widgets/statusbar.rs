use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

/// What the last city change did, as far as the user should know.
pub enum FetchStatus<'a> {
    Idle,
    Loading(&'a str),
    Failed(&'a str),
}

pub fn render(frame: &mut Frame, area: Rect, status: FetchStatus) {
    let mut spans = Vec::new();
    match status {
        FetchStatus::Idle => {}
        FetchStatus::Loading(city) => {
            spans.push(Span::styled(format!("{} yükleniyor…  ", city), theme::amber()));
        }
        FetchStatus::Failed(city) => {
            spans.push(Span::styled(format!("✗ {} bulunamadı  ", city), theme::red()));
        }
    }

    let hints = [
        ("[/]", " şehir  "),
        ("[m]", " ses  "),
        ("[r]", " yenile  "),
        ("[q]", " çıkış"),
    ];
    for (key, label) in &hints {
        spans.push(Span::styled(*key, theme::gold()));
        spans.push(Span::styled(*label, theme::dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
