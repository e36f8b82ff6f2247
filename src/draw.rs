use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::Line;
use tui::widgets::{BarChart, Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::state::app_state::{ScoreboardView, TableView};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use nba_api::Record;

static TABS: &[&str; 4] = &["Teams", "Players", "Scoreboard", "Standings"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::Teams => draw_teams(f, layout.main, app),
                MenuItem::Players => draw_players(f, layout.main, app),
                MenuItem::Scoreboard => draw_scoreboard(f, layout.main, app),
                MenuItem::Standings => draw_standings(f, layout.main, app),
                MenuItem::Help => draw_help(f, layout.main),
            }

            if let Some(logs) = layout.logs {
                draw_logs(f, logs);
            }

            draw_error_banner(f, layout.main, app);
            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
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
        MenuItem::Teams => 0,
        MenuItem::Players => 1,
        MenuItem::Scoreboard => 2,
        MenuItem::Standings => 3,
        MenuItem::Help => 0,
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

// ---------------------------------------------------------------------------
// Record tables
// ---------------------------------------------------------------------------

/// Build a table over normalized records. Every record exposes the full
/// field set of its kind, so cells render unconditionally; absent upstream
/// data shows as the N/A sentinel.
fn record_table<'a>(
    records: &'a [Record],
    columns: &[(&'a str, &'a str, u16)], // (field, header, width)
) -> Table<'a> {
    let header = Row::new(
        columns
            .iter()
            .map(|(_, title, _)| Cell::from(*title))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = records
        .iter()
        .map(|record| {
            Row::new(
                columns
                    .iter()
                    .map(|(field, _, _)| {
                        let value = record.get(field);
                        let style = if value.is_unavailable() {
                            Style::default().fg(Color::DarkGray)
                        } else {
                            Style::default()
                        };
                        Cell::from(value.to_string()).style(style)
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let widths: Vec<Constraint> = columns
        .iter()
        .map(|(_, _, w)| Constraint::Length(*w))
        .collect();

    Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .column_spacing(1)
}

fn render_table_view(
    f: &mut Frame,
    area: Rect,
    view: &TableView,
    columns: &[(&str, &str, u16)],
    title: &str,
) {
    let block = default_border(Color::White).title(format!(" {title} "));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if view.records.is_empty() {
        f.render_widget(
            Paragraph::new("Loading data...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let table = record_table(&view.records, columns);
    let selected = view.selected.min(view.records.len() - 1);
    let mut table_state = TableState::default().with_selected(Some(selected));
    f.render_stateful_widget(table, inner, &mut table_state);
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

const TEAM_COLUMNS: &[(&str, &str, u16)] = &[
    ("full_name", "Team", 24),
    ("city", "City", 16),
    ("abbreviation", "Abbr", 5),
    ("conference", "Conf", 6),
    ("division", "Division", 12),
];

fn draw_teams(f: &mut Frame, area: Rect, app: &App) {
    // Wide terminals get a stats side panel for the selected team.
    if area.width >= 80 && !app.state.team_stats.is_empty() {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)]).areas(area);
        render_table_view(f, left, &app.state.teams, TEAM_COLUMNS, "Teams");
        draw_team_stats_panel(f, right, app);
    } else {
        render_table_view(f, area, &app.state.teams, TEAM_COLUMNS, "Teams");
    }
}

fn draw_team_stats_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Season Stats ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(stats) = app.state.stats_for_selected_team() else {
        f.render_widget(
            Paragraph::new("No stats for this team")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let lines: Vec<Line> = stats
        .fields()
        .map(|(name, value)| Line::from(format!("{name:>14}: {value}")))
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

const PLAYER_COLUMNS: &[(&str, &str, u16)] = &[
    ("name", "Player", 26),
    ("team", "Team", 20),
    ("position", "Pos", 4),
    ("jersey", "No.", 4),
];

fn draw_players(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.state.filter_team() {
        Some(team) => format!("Players: {} (t to cycle)", team.get("full_name")),
        None => "Players: all teams (t to filter)".to_owned(),
    };

    let visible: Vec<Record> = app.state.filtered_players().into_iter().cloned().collect();
    let view = TableView {
        records: visible,
        selected: app.state.players.selected,
    };
    render_table_view(f, area, &view, PLAYER_COLUMNS, &title);
}

const GAME_COLUMNS: &[(&str, &str, u16)] = &[
    ("home_team", "Home", 20),
    ("home_score", "Pts", 4),
    ("away_team", "Away", 20),
    ("away_score", "Pts", 4),
    ("status", "Status", 10),
    ("period", "Per", 4),
    ("date", "Date", 12),
];

fn draw_scoreboard(f: &mut Frame, area: Rect, app: &App) {
    match app.state.scoreboard {
        ScoreboardView::Games => {
            render_table_view(
                f,
                area,
                &app.state.scoreboard_games,
                GAME_COLUMNS,
                "Today's Games",
            );
        }
        ScoreboardView::Pending | ScoreboardView::Empty => {
            let [message_area, recents_area] =
                Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);

            let message = match app.state.scoreboard {
                ScoreboardView::Empty => "No games scheduled today",
                _ => "Loading today's scoreboard...",
            };
            f.render_widget(
                Paragraph::new(message)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .block(default_border(Color::DarkGray)),
                message_area,
            );

            // Generated rows are visibly labeled; they stand in for a feed.
            let is_sample = app
                .state
                .recent_games
                .records
                .first()
                .is_some_and(Record::is_sample);
            let title = if is_sample {
                "Sample Games (placeholder, no results feed configured)"
            } else {
                "Recent Games"
            };
            render_table_view(f, recents_area, &app.state.recent_games, GAME_COLUMNS, title);
        }
    }
}

const STANDING_COLUMNS: &[(&str, &str, u16)] = &[
    ("rank", "Rk", 3),
    ("team", "Team", 24),
    ("wins", "W", 4),
    ("losses", "L", 4),
    ("win_pct", "Pct", 6),
    ("conference", "Conf", 6),
];

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    if area.height >= 24 && !app.state.standings.records.is_empty() {
        let [table_area, chart_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(10)]).areas(area);
        render_table_view(f, table_area, &app.state.standings, STANDING_COLUMNS, "Standings");
        draw_win_pct_chart(f, chart_area, app);
    } else {
        render_table_view(f, area, &app.state.standings, STANDING_COLUMNS, "Standings");
    }
}

fn draw_win_pct_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Win % ");

    // One bar per team, scaled to thousandths so 0.756 reads as 756.
    let bars: Vec<(String, u64)> = app
        .state
        .standings
        .records
        .iter()
        .filter_map(|record| {
            let pct = record.get("win_pct").as_f64()?;
            let label = match record.get("team").as_text() {
                Some(name) => abbreviate(name),
                None => return None,
            };
            Some((label, (pct * 1000.0).round() as u64))
        })
        .collect();

    let data: Vec<(&str, u64)> = bars.iter().map(|(label, v)| (label.as_str(), *v)).collect();
    let chart = BarChart::default()
        .block(block)
        .bar_width(4)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .data(&data);
    f.render_widget(chart, area);
}

/// Short bar label: first 4 chars of the last word ("Boston Celtics" → "CELT").
fn abbreviate(name: &str) -> String {
    name.split_whitespace()
        .last()
        .unwrap_or(name)
        .chars()
        .take(4)
        .collect::<String>()
        .to_uppercase()
}

// ---------------------------------------------------------------------------
// Chrome
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = [
        "1-4    switch tab (Teams / Players / Scoreboard / Standings)",
        "j/k    move selection down/up",
        "t      cycle team filter (Players tab)",
        "r      refresh current tab and scoreboard",
        "f      toggle full screen",
        "\"      toggle log pane",
        "?      this help, Esc to return",
        "q      quit",
    ];
    let text: Vec<Line> = lines.iter().map(|l| Line::from(*l)).collect();
    f.render_widget(Paragraph::new(text), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logger, area);
}

fn draw_error_banner(f: &mut Frame, area: Rect, app: &App) {
    let Some(message) = app.state.last_error.as_deref() else {
        return;
    };
    let banner_area = Rect::new(
        area.x,
        area.y + area.height.saturating_sub(1),
        area.width,
        1,
    );
    f.render_widget(
        Paragraph::new(format!(" Data unavailable: {message}"))
            .style(Style::default().fg(Color::White).bg(Color::Red)),
        banner_area,
    );
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
