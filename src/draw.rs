use chrono::Local;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::badge::StatusBadge;
use crate::state::loader::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use events_api::timeline::{PhaseState, format_full_date, timeline};
use events_api::{StatusInfo, Tournament};

static TABS: &[&str; 2] = &["Dashboard", "Detail"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Dashboard => draw_dashboard(f, layout.main, app),
            MenuItem::Detail => draw_detail(f, layout.main, app),
            MenuItem::Help => draw_placeholder(
                f,
                layout.main,
                "Help: q=quit  1=Dashboard  2=Detail  ↑/↓=move  Enter=open  Esc=back  r=reload  s=shuffle  f=full screen  \"=logs",
            ),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Dashboard | MenuItem::Help => 0,
        MenuItem::Detail => 1,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Tournaments ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let dashboard = &app.state.dashboard;
    let (Some(catalog), Some(listing)) = (dashboard.catalog.as_ref(), dashboard.listing()) else {
        draw_message(f, inner, &load_message(app, "Loading tournaments..."));
        return;
    };

    let [header, key_legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1)])
            .areas(inner);

    let mut header_text = format!(
        "{} tournaments | updated {}",
        catalog.tournaments().len(),
        app.state.now.with_timezone(&Local).format("%H:%M")
    );
    if !catalog.rejected().is_empty() {
        header_text.push_str(&format!(" | {} rejected (see logs)", catalog.rejected().len()));
    }
    f.render_widget(Paragraph::new(header_text), header);
    f.render_widget(
        Paragraph::new("Keys: j/k=move  Enter=details  r=reload  s=shuffle  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    if listing.is_empty() {
        draw_message(f, content, "No tournaments yet");
        return;
    }

    // One "now" for every row on screen.
    let statuses = catalog.statuses(app.state.now);
    let width = content.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0;
    let mut row = 0;

    let sections = [("FEATURED", &listing.featured), ("ALL TOURNAMENTS", &listing.others)];
    for (title, tournaments) in sections {
        if tournaments.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        for t in tournaments.iter() {
            if row == dashboard.selected {
                selected_line = lines.len();
            }
            let selected = row == dashboard.selected;
            lines.push(tournament_row(t, statuses.get(&t.id), selected, width));
            row += 1;
        }
    }

    let visible = content.height as usize;
    let scroll = (selected_line + 1).saturating_sub(visible);
    f.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), content);
}

fn tournament_row<'a>(
    t: &'a Tournament,
    status: Option<&StatusInfo>,
    selected: bool,
    width: usize,
) -> Line<'a> {
    let marker = if selected { '>' } else { ' ' };
    let name_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::raw(format!("{marker} ")),
        Span::styled(t.name.as_str(), name_style),
        Span::styled(format!("  by {}", t.organizer), Style::default().fg(Color::DarkGray)),
    ];
    if t.recommended {
        spans.push(Span::styled("  recommended", Style::default().fg(Color::LightGreen)));
    }

    if let Some(info) = status {
        let badge = StatusBadge::new(info);
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let pad = width.saturating_sub(used + badge.width() as usize).max(1);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.extend(badge.line().spans);
    }

    Line::from(spans)
}

fn draw_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Tournament ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let dashboard = &app.state.dashboard;
    let Some(catalog) = dashboard.catalog.as_ref() else {
        draw_message(f, inner, &load_message(app, "Loading..."));
        return;
    };
    let Some(id) = dashboard.detail_id else {
        draw_message(f, inner, "Select a tournament on the dashboard and press Enter");
        return;
    };
    let tournament = match catalog.get(id) {
        Ok(t) => t,
        Err(e) => {
            draw_message(f, inner, &format!("Tournament not found\n{e}\n\nEsc: back to dashboard"));
            return;
        }
    };

    let now = app.state.now;
    let status = tournament.status(now);
    let label = Style::default().fg(Color::DarkGray);
    let mut lines: Vec<Line> = Vec::new();

    let mut title = vec![
        Span::styled(tournament.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("   "),
    ];
    title.extend(StatusBadge::new(&status).line().spans);
    lines.push(Line::from(title));
    lines.push(Line::default());
    lines.push(Line::raw(tournament.description_or_default()));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Organizer  ", label),
        Span::raw(tournament.organizer.as_str()),
    ]));
    if !tournament.tags.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Tags       ", label),
            Span::raw(tournament.tags.join(", ")),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::styled("SCHEDULE", Style::default().add_modifier(Modifier::BOLD)));
    let entries = timeline(&tournament.schedule, now);
    if entries.is_empty() {
        lines.push(Line::styled("  No phases scheduled", label));
    }
    for entry in entries {
        let (style, marker) = match entry.state {
            PhaseState::Current => (Style::default().fg(Color::Yellow), "▶"),
            PhaseState::Past => (
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
                " ",
            ),
            PhaseState::Upcoming => (Style::default().fg(Color::Gray), " "),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker} {:<20}", entry.name), style),
            Span::styled(format_full_date(entry.start_time, &Local), label),
            Span::styled(format!(" {}", entry.state.label()), style),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("REGISTRATIONS  ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            tournament.registrations.len().to_string(),
            Style::default().fg(Color::Yellow),
        ),
    ]));
    for (i, reg) in tournament.registrations.iter().enumerate() {
        let when = reg
            .registered_at
            .map(|at| at.with_timezone(&Local).format("%d.%m.%Y").to_string())
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<30}", reg.display_name(i))),
            Span::styled(when, label),
        ]));
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((dashboard.detail_scroll, 0)),
        inner,
    );
}

fn load_message(app: &App, fallback: &str) -> String {
    match app.state.last_error.as_deref() {
        Some(err) => format!("Could not load tournaments:\n{err}"),
        None => fallback.to_string(),
    }
}

fn draw_message(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    draw_message(f, inner, msg);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use chrono::{Duration, TimeZone, Utc};
    use events_api::catalog::Catalog;
    use serde_json::json;
    use tui::backend::TestBackend;

    fn app_with_catalog() -> App {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        let payload = json!([
            { "eventId": 1, "eventName": "Spring Cup", "recommended": true,
              "eventStates": [{ "eventStateName": "Groups", "startTime": (now - Duration::hours(1)).to_rfc3339(),
                                "endTime": (now + Duration::minutes(30)).to_rfc3339() }] },
            { "eventId": 2, "eventName": "Winter Open" }
        ]);
        let mut app = App::new(AppSettings::default(), now);
        app.on_catalog_loaded(Catalog::from_json(&payload.to_string()).unwrap());
        app
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn dashboard_shows_sections_and_badges() {
        let mut app = app_with_catalog();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());

        let text = screen(&terminal);
        assert!(text.contains("FEATURED"));
        assert!(text.contains("ALL TOURNAMENTS"));
        assert!(text.contains("Ends in 30m"));
        assert!(text.contains("Date TBA"));
    }

    #[test]
    fn detail_shows_schedule() {
        let mut app = app_with_catalog();
        assert!(app.open_detail());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());

        let text = screen(&terminal);
        assert!(text.contains("Spring Cup"));
        assert!(text.contains("SCHEDULE"));
        assert!(text.contains("Groups"));
        assert!(text.contains("NOW"));
        assert!(text.contains("No description provided"));
    }

    #[test]
    fn missing_tournament_on_detail_tab() {
        let mut app = app_with_catalog();
        app.state.dashboard.detail_id = Some(404);
        app.update_tab(MenuItem::Detail);
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        assert!(screen(&terminal).contains("Tournament not found"));
    }
}
