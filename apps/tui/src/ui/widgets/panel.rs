use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tachyonfx::EffectRenderer;
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::api::AthleteSource;
use crate::app::presentation::{medal_label, panel_notices, panel_title, render_rows, AthleteRow, PanelNotice};
use crate::app::{App, PanelFocus};
use crate::domain::MedalFilter;

/// Lines one athlete takes in the list.
pub const ROW_HEIGHT: u16 = 3;

fn medal_color(code: &str) -> Color {
    match code {
        "G" => Color::Rgb(255, 215, 0),
        "S" => Color::Rgb(192, 192, 192),
        "B" => Color::Rgb(205, 127, 50),
        _ => Color::Gray,
    }
}

pub fn render_panel<S: AthleteSource>(app: &App<S>, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", panel_title(app.open_city())))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let notices = panel_notices(app.query_state(), app.selection.is_open());
    let heights: Vec<u16> = notices
        .iter()
        .map(|notice| notice_height(notice, inner.width))
        .collect();
    let notice_height = heights.iter().fold(0_u16, |sum, h| sum.saturating_add(*h));

    let [search_area, medal_area, notice_area, list_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(notice_height),
        Constraint::Min(0),
    ])
    .areas(inner);

    render_search_box(app, f, search_area);
    render_medal_selector(app.medal_filter, f, medal_area);
    render_notices(app, &notices, &heights, f, notice_area);
    render_athlete_list(&render_rows(app.query_state()), app.result_scroll, f, list_area);

    if let Ok(mut effect) = app.panel_fx.lock() {
        if let Some(effect) = effect.as_mut() {
            let buffer = f.buffer_mut();
            buffer.render_effect(effect, area, app.last_tick);
        }
    }
}

fn render_search_box<S: AthleteSource>(app: &App<S>, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == PanelFocus::Search;
    let border_color = if focused { Color::Yellow } else { Color::DarkGray };

    let mut spans = vec![Span::raw(app.search_input.clone())];
    if focused && app.animation_counter.sin() > 0.0 {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    } else if app.search_input.is_empty() && !focused {
        spans.push(Span::styled(
            "Search athletes by name",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let search = Paragraph::new(TextLine::from(spans)).block(
        Block::default()
            .title(" / Search ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(search, area);
}

fn render_medal_selector(selected: MedalFilter, f: &mut Frame<'_>, area: Rect) {
    let mut spans = vec![Span::styled("m ", Style::default().fg(Color::DarkGray))];
    for filter in MedalFilter::ALL {
        let style = if filter == selected {
            Style::default()
                .fg(Color::Black)
                .bg(medal_color(filter.as_str()))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(medal_color(filter.as_str()))
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
    }
    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

/// Lines `text` takes when word-wrapped to `width` columns.
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width);
    if width == 0 {
        return 1;
    }

    let mut lines: u16 = 1;
    let mut current = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if current == 0 {
            current = len;
        } else if current + 1 + len <= width {
            current += 1 + len;
        } else {
            lines = lines.saturating_add(1);
            current = len;
        }
        // Words longer than the row are broken across lines
        while current > width {
            lines = lines.saturating_add(1);
            current -= width;
        }
    }
    lines
}

fn notice_height(notice: &PanelNotice, width: u16) -> u16 {
    match notice {
        PanelNotice::Error(message) => wrapped_height(message, width),
        PanelNotice::Loading | PanelNotice::NoAthletes => 1,
    }
}

fn render_notices<S: AthleteSource>(
    app: &App<S>,
    notices: &[PanelNotice],
    heights: &[u16],
    f: &mut Frame<'_>,
    area: Rect,
) {
    let rows = Layout::vertical(heights.iter().map(|h| Constraint::Length(*h))).split(area);

    for (notice, row) in notices.iter().zip(rows.iter()) {
        match notice {
            PanelNotice::Loading => {
                let mut state = ThrobberState::default();
                #[allow(clippy::cast_possible_truncation)]
                state.calc_step((app.elapsed.as_millis() / 100 % 8) as i8);
                let throbber = Throbber::default()
                    .label("Loading athletes...")
                    .style(Style::default().fg(Color::Cyan));
                f.render_stateful_widget(throbber, *row, &mut state);
            }
            PanelNotice::Error(message) => {
                let error = Paragraph::new(message.as_str())
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true });
                f.render_widget(error, *row);
            }
            PanelNotice::NoAthletes => {
                f.render_widget(
                    Paragraph::new("No athletes found.").style(Style::default().fg(Color::Gray)),
                    *row,
                );
            }
        }
    }
}

fn athlete_lines(row: &AthleteRow) -> [TextLine<'static>; 3] {
    [
        TextLine::from(vec![
            Span::styled(
                row.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", row.nationality),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        TextLine::from(vec![
            Span::styled(
                medal_label(&row.medal).to_string(),
                Style::default().fg(medal_color(&row.medal)),
            ),
            Span::raw(format!("  {} ({})", row.event, row.year)),
        ]),
        TextLine::from(Span::styled(
            format!("Result: {}", row.result),
            Style::default().fg(Color::Gray),
        )),
    ]
}

fn render_athlete_list(rows: &[AthleteRow], scroll: usize, f: &mut Frame<'_>, area: Rect) {
    if rows.is_empty() || area.height == 0 {
        return;
    }

    let visible = usize::from(area.height / ROW_HEIGHT).max(1);
    let lines: Vec<TextLine<'static>> = rows
        .iter()
        .skip(scroll)
        .take(visible)
        .flat_map(athlete_lines)
        .collect();

    let title = format!(" {} of {} ", scroll.saturating_add(1).min(rows.len()), rows.len());
    let list = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .title_style(Style::default().fg(Color::DarkGray))
            .borders(Borders::TOP),
    );
    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AthleteQuery, FetchError};
    use crate::app::flight::FlightTiming;
    use crate::domain::find_city;
    use crate::test_support::{athlete, ScriptedSource};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn draw(app: &App<ScriptedSource>) -> Result<String, Box<dyn std::error::Error>> {
        draw_sized(app, 60, 30)
    }

    fn draw_sized(
        app: &App<ScriptedSource>,
        width: u16,
        height: u16,
    ) -> Result<String, Box<dyn std::error::Error>> {
        // The reveal effect hides the panel until frames advance
        if let Ok(mut effect) = app.panel_fx.lock() {
            *effect = None;
        }
        let mut terminal = Terminal::new(TestBackend::new(width, height))?;
        terminal.draw(|f| render_panel(app, f, f.area()))?;
        let buffer = terminal.backend().buffer();
        Ok(buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n"))
    }

    async fn settle(app: &mut App<ScriptedSource>) -> Result<(), &'static str> {
        let completion = app.completions.recv().await.ok_or("channel closed")?;
        app.query.complete(completion);
        Ok(())
    }

    #[tokio::test]
    async fn panel_lists_normalised_names() -> TestResult {
        let source = ScriptedSource::default().reply(
            &AthleteQuery::city("Sydney"),
            0,
            Ok(vec![athlete("1", "CATHY FREEMAN", "G", "Sydney")]),
        );
        let mut app = App::new(source, FlightTiming::default());
        app.click_city(find_city("Sydney").ok_or("no Sydney")?);
        settle(&mut app).await?;

        let screen = draw(&app)?;

        assert!(screen.contains("Athletes from Sydney"));
        assert!(screen.contains("Cathy Freeman"));
        assert!(screen.contains("Gold"));
        assert!(screen.contains("All Medals"));
        Ok(())
    }

    #[tokio::test]
    async fn empty_success_shows_no_athletes() -> TestResult {
        let mut app = App::new(ScriptedSource::default(), FlightTiming::default());
        app.click_city(find_city("Antwerp").ok_or("no Antwerp")?);
        settle(&mut app).await?;

        assert!(draw(&app)?.contains("No athletes found."));
        Ok(())
    }

    #[tokio::test]
    async fn failures_show_the_whole_error_message() -> TestResult {
        let source = ScriptedSource::default().reply(
            &AthleteQuery::city("Paris"),
            0,
            Err(FetchError::Service {
                status: 404,
                body: "city not found".to_string(),
            }),
        );
        let mut app = App::new(source, FlightTiming::default());
        app.click_city(find_city("Paris").ok_or("no Paris")?);
        settle(&mut app).await?;

        // Same width the explorer gives the panel
        for width in [46, 60] {
            let screen = draw_sized(&app, width, 30)?;

            assert!(screen.contains("Failed to load athletes"), "width {width}");
            assert!(screen.contains("404"), "width {width}");
            assert!(screen.contains("city not found"), "width {width}");
            assert!(!screen.contains("No athletes found."), "width {width}");
        }
        Ok(())
    }

    #[test]
    fn wrapping_counts_word_breaks_and_long_words() {
        assert_eq!(wrapped_height("", 10), 1);
        assert_eq!(wrapped_height("short", 10), 1);
        assert_eq!(wrapped_height("abcd efgh ijkl", 9), 2);
        assert_eq!(wrapped_height("http://localhost:8080/athletes", 10), 3);
        assert_eq!(
            wrapped_height(
                "Failed to load athletes: HTTP error! status: 404, message: city not found",
                44
            ),
            2
        );
    }
}
