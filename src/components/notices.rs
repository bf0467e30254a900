use super::{Component, ViewContext};
use crate::event::AppMsg;
use crate::widgets::common::focused_block;
use crate::widgets::theme::get_theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};

const MAX_NOTICES: usize = 200;

/// Bottom pane with messages for the user. Always shows the newest lines.
#[derive(Debug, Default)]
pub struct NoticesState {
    pub notices: Vec<String>,
    scroll_state: ScrollbarState,
}

impl NoticesState {
    pub fn push(&mut self, message: String) {
        self.notices.push(message);
        if self.notices.len() > MAX_NOTICES {
            self.notices.remove(0);
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.notices.last().map(String::as_str)
    }
}

impl Component for NoticesState {
    fn update(&mut self, msg: &AppMsg, _ctx: &ViewContext) -> Option<AppMsg> {
        match msg {
            AppMsg::Notice(text) => self.push(text.clone()),
            AppMsg::ErrorOccurred(err) => self.push(format!("ERROR: {}", err)),
            AppMsg::ServiceFinished(report) => {
                for line in report.user_messages() {
                    self.push(line);
                }
            }
            _ => {}
        }
        None
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, _ctx: &ViewContext, is_focused: bool) {
        let block = focused_block("Notices", is_focused);
        let inner_area = block.inner(area);
        block.render(area, buf);

        let width = (inner_area.width as usize).saturating_sub(2);
        if width == 0 {
            return;
        }

        let wrapped_lines: Vec<String> = self
            .notices
            .iter()
            .flat_map(|n| textwrap::wrap(n, width))
            .map(|line| line.to_string())
            .collect();

        let viewport_height = inner_area.height as usize;
        let offset = wrapped_lines.len().saturating_sub(viewport_height);

        self.scroll_state = self
            .scroll_state
            .content_length(wrapped_lines.len())
            .position(offset);

        let theme = get_theme();
        let styled_lines: Vec<Line> = wrapped_lines
            .iter()
            .skip(offset)
            .map(|line| {
                let style = if line.contains("ERROR") {
                    Style::default().fg(theme.status_failed)
                } else if line.starts_with("Success") {
                    Style::default().fg(theme.status_completed)
                } else {
                    Style::default().fg(theme.text_primary)
                };
                Line::from(Span::styled(line.as_str(), style))
            })
            .collect();

        Paragraph::new(styled_lines).render(inner_area, buf);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"));

        StatefulWidget::render(scrollbar, inner_area, buf, &mut self.scroll_state);
    }
}
