use coin_dashboard_core::models::chart::ChartData;
use coin_dashboard_core::models::notice::NoticeLevel;
use coin_dashboard_core::router::Route;
use coin_dashboard_core::services::chart_service::{detail_title, modal_title};
use coin_dashboard_core::services::format::{format_grouped, CoinCard};
use coin_dashboard_core::state::chart::{ChartPhase, MSG_NO_DATA};
use coin_dashboard_core::state::coin_list::{CoinListBody, MSG_NO_RESULTS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, BorderType, Borders, Chart, Clear, Dataset, GraphType, List, ListItem,
        Paragraph, Wrap,
    },
    Frame,
};

use crate::app::{App, InputMode};
use crate::config::{
    ACCENT_COLOR, CARD_HEIGHT, CHART_COLOR, GAIN_COLOR, GRID_COLUMNS, INFO_TEXT, LOSS_COLOR,
    MUTED_COLOR, SPINNER_FRAMES, TITLE,
};

pub fn render(frame: &mut Frame, app: &App) {
    match &app.route {
        Route::Home => render_home(frame, app),
        Route::CoinDetail { id } => render_detail(frame, app, id),
        Route::NotFound { path } => render_not_found(frame, path),
    }
    render_notice(frame, app);
}

// ── Home ────────────────────────────────────────────────────────────

fn render_home(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(2),
        ])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(TITLE.bold()).alignment(Alignment::Center),
        rows[0],
    );
    render_status(frame, app, rows[1]);
    render_controls(frame, app, rows[2]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[3]);
    render_cards(frame, app, main[0]);
    render_files(frame, app, main[1]);

    frame.render_widget(
        Paragraph::new(INFO_TEXT.map(Line::from).to_vec())
            .style(Style::default().fg(MUTED_COLOR))
            .alignment(Alignment::Center),
        rows[4],
    );

    if app.chart.is_open() {
        render_chart_modal(frame, app);
    }
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let updated = app
        .coin_list
        .last_updated()
        .map(|ts| ts.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let text = format!(
        "Last updated: {updated}   Next refresh in: {}",
        app.coin_list.countdown().display()
    );
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(MUTED_COLOR))
            .alignment(Alignment::Center),
        area,
    );
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(20),
            Constraint::Percentage(30),
        ])
        .split(area);

    let query = app.coin_list.query();
    let searching = app.mode == InputMode::Search;
    let search_text = if query.search.is_empty() && !searching {
        Span::styled("Search by name or symbol...", Style::default().fg(MUTED_COLOR))
    } else {
        Span::raw(query.search.clone())
    };
    frame.render_widget(
        Paragraph::new(Line::from(search_text)).block(focus_block(" Search ", searching)),
        cols[0],
    );
    frame.render_widget(
        Paragraph::new(query.filter.label()).block(focus_block(" Filter (f) ", false)),
        cols[1],
    );
    frame.render_widget(
        Paragraph::new(query.sort.label()).block(focus_block(" Sort (s) ", false)),
        cols[2],
    );
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    match app.coin_list.body() {
        CoinListBody::Placeholders(count) => {
            let cells = grid_cells(area, count);
            for cell in cells.into_iter().flatten() {
                let skeleton = vec![
                    Line::from("▒".repeat(cell.width.saturating_sub(6) as usize)),
                    Line::from("▒".repeat((cell.width / 2) as usize)),
                    Line::from("▒".repeat((cell.width / 4) as usize)),
                ];
                frame.render_widget(
                    Paragraph::new(skeleton)
                        .style(Style::default().fg(MUTED_COLOR))
                        .block(Block::default().borders(Borders::ALL)),
                    cell,
                );
            }
        }
        CoinListBody::NoResults => {
            frame.render_widget(
                Paragraph::new(MSG_NO_RESULTS).alignment(Alignment::Center),
                area,
            );
        }
        CoinListBody::Cards(coins) => {
            let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
            let selected_row = app.selected_card / GRID_COLUMNS;
            let first_row = selected_row.saturating_sub(visible_rows - 1);
            let skip = first_row * GRID_COLUMNS;
            let cells = grid_cells(area, coins.len().saturating_sub(skip));

            for (offset, cell) in cells.into_iter().enumerate() {
                let index = skip + offset;
                let (Some(cell), Some(coin)) = (cell, coins.get(index)) else {
                    continue;
                };
                let card = CoinCard::from(*coin);
                render_card(frame, &card, cell, index == app.selected_card);
            }
        }
    }
}

/// Split `area` into a grid of card cells. Cells that do not fit are `None`.
fn grid_cells(area: Rect, count: usize) -> Vec<Option<Rect>> {
    let rows_fit = (area.height / CARD_HEIGHT) as usize;
    let width = area.width / GRID_COLUMNS as u16;
    (0..count)
        .map(|i| {
            let row = i / GRID_COLUMNS;
            let col = i % GRID_COLUMNS;
            if row >= rows_fit {
                return None;
            }
            Some(Rect {
                x: area.x + col as u16 * width,
                y: area.y + row as u16 * CARD_HEIGHT,
                width,
                height: CARD_HEIGHT,
            })
        })
        .collect()
}

fn render_card(frame: &mut Frame, card: &CoinCard, area: Rect, selected: bool) {
    let change_color = if card.is_gain { GAIN_COLOR } else { LOSS_COLOR };
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(vec![Span::raw("Symbol: "), Span::styled(card.symbol.clone(), bold)]),
        Line::from(vec![Span::raw("Price: "), Span::styled(card.price.clone(), bold)]),
        Line::from(vec![Span::raw("Market Cap: "), Span::styled(card.market_cap.clone(), bold)]),
        Line::from(vec![
            Span::raw("24h Change: "),
            Span::styled(
                card.change.clone(),
                bold.fg(change_color),
            ),
        ]),
    ];
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", card.name));
    if selected {
        block = block
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(ACCENT_COLOR));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_files(frame: &mut Frame, app: &App, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let entering_path = app.mode == InputMode::UploadPath;
    let selection = if entering_path {
        format!("Path: {}", app.path_input)
    } else {
        match app.upload.selected() {
            Some(file) => format!("Selected: {}", file.name),
            None => "(u) choose a .zip or .rar file".to_string(),
        }
    };
    let mut lines = vec![
        Line::from(selection),
        Line::from(format!("[{}]", app.upload.submit_label())),
    ];
    if let Some(message) = app.upload.message() {
        lines.push(Line::from(message.to_string()).style(Style::default().fg(MUTED_COLOR)));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(focus_block(" Upload Compressed Files ", entering_path)),
        parts[0],
    );

    let items: Vec<ListItem> = app
        .upload
        .files()
        .iter()
        .map(|f| {
            ListItem::new(vec![
                Line::from(f.name.clone()),
                Line::from(f.url.clone()).style(Style::default().fg(ACCENT_COLOR)),
            ])
        })
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(" Files ")),
        parts[1],
    );
}

// ── Charts ──────────────────────────────────────────────────────────

fn render_chart_modal(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);

    let title = modal_title(app.chart.coin_id().unwrap_or_default());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {title} "))
        .title_bottom(Line::from(" (Esc) Close ").right_aligned());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_chart_body(frame, app, inner);
}

fn render_detail(frame: &mut Frame, app: &App, id: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(5), Constraint::Length(1)])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(Span::styled(
            detail_title(id),
            Style::default().add_modifier(Modifier::BOLD),
        )).alignment(Alignment::Center),
        rows[0],
    );
    render_chart_body(frame, app, rows[1]);
    frame.render_widget(
        Paragraph::new("(Esc) back | (q) quit")
            .style(Style::default().fg(MUTED_COLOR))
            .alignment(Alignment::Center),
        rows[2],
    );
}

fn render_chart_body(frame: &mut Frame, app: &App, area: Rect) {
    match app.chart.phase() {
        ChartPhase::Closed => {}
        ChartPhase::Loading => {
            let spinner = SPINNER_FRAMES[(app.frame_count / 2) % SPINNER_FRAMES.len()];
            frame.render_widget(
                Paragraph::new(format!("{spinner} Loading..."))
                    .style(Style::default().fg(ACCENT_COLOR))
                    .alignment(Alignment::Center),
                area,
            );
        }
        ChartPhase::NoData => {
            frame.render_widget(
                Paragraph::new(MSG_NO_DATA)
                    .style(Style::default().fg(MUTED_COLOR))
                    .alignment(Alignment::Center),
                area,
            );
        }
        ChartPhase::Ready(chart) => render_line_chart(frame, chart, area),
    }
}

fn render_line_chart(frame: &mut Frame, chart: &ChartData, area: Rect) {
    let Some(dataset) = chart.datasets.first() else {
        return;
    };
    let points: Vec<(f64, f64)> = dataset
        .data
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    let (lo, hi) = chart.value_bounds().unwrap_or((0.0, 1.0));
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    let (y_min, y_max) = (lo - pad, hi + pad);
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    let x_labels: Vec<String> = match chart.labels.as_slice() {
        [] => Vec::new(),
        [only] => vec![only.clone()],
        labels => vec![
            labels[0].clone(),
            labels[labels.len() / 2].clone(),
            labels[labels.len() - 1].clone(),
        ],
    };
    let y_labels = vec![
        format_grouped(y_min, 2),
        format_grouped((y_min + y_max) / 2.0, 2),
        format_grouped(y_max, 2),
    ];

    let datasets = vec![Dataset::default()
        .name(dataset.label.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(CHART_COLOR))
        .data(&points)];

    let widget = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(MUTED_COLOR))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(MUTED_COLOR))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );
    frame.render_widget(widget, area);
}

// ── Misc ────────────────────────────────────────────────────────────

fn render_not_found(frame: &mut Frame, path: &str) {
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(format!("No page at {path}")),
            Line::from("(Esc) home | (q) quit").style(Style::default().fg(MUTED_COLOR)),
        ])
        .alignment(Alignment::Center),
        frame.area(),
    );
}

fn render_notice(frame: &mut Frame, app: &App) {
    let Some((notice, _)) = &app.notice else {
        return;
    };
    let color = match notice.level {
        NoticeLevel::Info => ACCENT_COLOR,
        NoticeLevel::Success => GAIN_COLOR,
        NoticeLevel::Error => LOSS_COLOR,
    };
    let area = frame.area();
    let width = (notice.message.chars().count() as u16 + 4).min(area.width);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width,
        height: 3.min(area.height),
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(notice.message.clone()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        ),
        rect,
    );
}

fn focus_block(title: &str, focused: bool) -> Block<'_> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().fg(ACCENT_COLOR))
    } else {
        block
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
