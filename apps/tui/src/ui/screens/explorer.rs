use crate::api::AthleteSource;
use crate::app::{App, PanelFocus};
use crate::ui::explorer_layout;
use crate::ui::widgets::globe::{render_globe, GlobeScene};
use crate::ui::widgets::panel::render_panel;
use crate::ui::widgets::popup::popup_area;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn render_explorer<S: AthleteSource>(app: &App<S>, f: &mut Frame<'_>) {
    let area = f.area();
    let layout = explorer_layout(area, app.selection.is_open());

    render_header(app, f, layout.header);
    render_globe(f, layout.globe, &GlobeScene::from_app(app));
    if let Some(panel) = layout.panel {
        render_panel(app, f, panel);
    }
    render_shortcuts(app, f, layout.footer);

    if app.show_help {
        render_help_popup(f, area);
    }
}

fn render_header<S: AthleteSource>(app: &App<S>, f: &mut Frame<'_>, area: Rect) {
    let mut spans = vec![Span::styled(
        "Olympic Host City Explorer",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    if !app.status_message.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::Gray),
        ));
    }

    let header = Paragraph::new(TextLine::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn key(label: &'static str) -> Span<'static> {
    Span::styled(
        label,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn render_shortcuts<S: AthleteSource>(app: &App<S>, f: &mut Frame<'_>, area: Rect) {
    let spans = if app.focus == PanelFocus::Search {
        vec![
            Span::raw("Type to search   "),
            key("Backspace"),
            Span::raw(": Delete   "),
            key("Esc/Enter"),
            Span::raw(": Back to globe"),
        ]
    } else if app.selection.is_open() {
        vec![
            key("←/→"),
            Span::raw(": City   "),
            key("Enter"),
            Span::raw(": Fly   "),
            key("/"),
            Span::raw(": Search   "),
            key("m/M"),
            Span::raw(": Medal   "),
            key("↑/↓"),
            Span::raw(": Scroll   "),
            key("Esc"),
            Span::raw(": Close   "),
            key("?"),
            Span::raw(": Help   "),
            key("q"),
            Span::raw(": Quit"),
        ]
    } else {
        vec![
            key("Click"),
            Span::raw(" or "),
            key("←/→ Enter"),
            Span::raw(": Pick a city   "),
            key("?"),
            Span::raw(": Help   "),
            key("q"),
            Span::raw(": Quit"),
        ]
    };

    f.render_widget(
        Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        TextLine::from(Span::styled(
            "Olympic Host City Explorer",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(vec![key("Mouse click"), Span::raw("  open a host city")]),
        TextLine::from(vec![key("←/→"), Span::raw("          highlight previous/next city")]),
        TextLine::from(vec![key("Enter"), Span::raw("        fly to the highlighted city")]),
        TextLine::from(vec![key("/"), Span::raw("            search athletes by name")]),
        TextLine::from(vec![key("m / M"), Span::raw("        next/previous medal filter")]),
        TextLine::from(vec![key("↑/↓ PgUp/PgDn"), Span::raw(" scroll results")]),
        TextLine::from(vec![key("Esc"), Span::raw("          close the athlete panel")]),
        TextLine::from(vec![key("q"), Span::raw("            quit")]),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "The medal filter searches every host city.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = popup_area(area, 52, 16);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Help (? to close) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        popup,
    );
}
