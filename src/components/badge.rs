use events_api::{ColorTag, StatusIcon, StatusInfo};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::Widget;

pub const ORANGE: Color = Color::Rgb(255, 165, 0);

pub fn tag_color(tag: ColorTag) -> Color {
    match tag {
        ColorTag::Blue => Color::LightBlue,
        ColorTag::Green => Color::LightGreen,
        ColorTag::Orange => ORANGE,
        ColorTag::Yellow => Color::Yellow,
        ColorTag::Grey => Color::DarkGray,
    }
}

pub fn icon_char(icon: StatusIcon) -> char {
    match icon {
        StatusIcon::Finished => '✓',
        StatusIcon::Urgent => '⧗',
        StatusIcon::Clock => '◷',
    }
}

/// `◷ Starts in 2d 4h`, coloured by tag. Urgent badges get an orange, bold icon.
pub struct StatusBadge<'a> {
    pub info: &'a StatusInfo,
}

impl<'a> StatusBadge<'a> {
    pub fn new(info: &'a StatusInfo) -> Self {
        Self { info }
    }

    pub fn line(&self) -> Line<'static> {
        let color = tag_color(self.info.color);
        let icon = self.info.icon();
        let icon_style = match icon {
            StatusIcon::Urgent => Style::default().fg(ORANGE).add_modifier(Modifier::BOLD),
            StatusIcon::Finished => Style::default().fg(color),
            StatusIcon::Clock => Style::default().fg(color).add_modifier(Modifier::DIM),
        };
        Line::from(vec![
            Span::styled(icon_char(icon).to_string(), icon_style),
            Span::raw(" "),
            Span::styled(self.info.text.clone(), Style::default().fg(color)),
        ])
    }

    pub fn width(&self) -> u16 {
        // icon + space + text
        (self.info.text.chars().count() + 2) as u16
    }
}

impl Widget for StatusBadge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_line(area.x, area.y, &self.line(), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(text: &str, color: ColorTag, urgent: bool, finished: bool) -> StatusInfo {
        StatusInfo { text: text.to_string(), color, urgent, finished }
    }

    #[test]
    fn colors_cover_every_tag() {
        assert_eq!(tag_color(ColorTag::Orange), ORANGE);
        assert_eq!(tag_color(ColorTag::Grey), Color::DarkGray);
        assert_eq!(tag_color(ColorTag::Yellow), Color::Yellow);
    }

    #[test]
    fn line_has_icon_then_text() {
        let status = info("Ends in 30m", ColorTag::Orange, true, false);
        let badge = StatusBadge::new(&status);
        let text: String = badge.line().spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "⧗ Ends in 30m");
        assert_eq!(badge.width(), 13);
    }

    #[test]
    fn finished_gets_check_mark() {
        let status = info("Finished", ColorTag::Grey, false, true);
        let line = StatusBadge::new(&status).line();
        assert_eq!(line.spans[0].content, "✓");
    }

    #[test]
    fn renders_into_buffer() {
        let status = info("Ongoing", ColorTag::Green, false, false);
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        StatusBadge::new(&status).render(area, &mut buf);
        assert_eq!(buf[(2u16, 0u16)].symbol(), "O");
        assert_eq!(buf[(2u16, 0u16)].fg, Color::LightGreen);
    }
}
