use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset, GraphType,
        Paragraph, Row, Table, Wrap,
    },
    Frame,
};

use super::{App, Notice, NoticeLevel};
use crate::format;
use crate::models::{ChartData, ChartKind, RenderRequest, ValueFormat};

/// Render the whole dashboard. Every draw starts from an empty frame, so only
/// the current chart is ever on screen.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Status
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(8)])
        .split(body[0]);

    render_summary(f, left[0], app);
    render_controls(f, left[1], app);
    render_chart(f, body[1], app.chart());
    render_status(f, chunks[2], app);

    if let Some(notice) = app.notice() {
        render_notice(f, f.area(), notice);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let text = Line::from(vec![
        Span::styled(
            app.dashboard().title().to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(app.dashboard().data_path().display().to_string()),
    ]);
    f.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(vec!["Product Name", "Total Quantity", "Total Revenue"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .summary()
        .iter()
        .map(|row| {
            Row::new(vec![
                row.product_name.clone(),
                row.total_quantity.clone(),
                row.total_revenue.clone(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(30),
        Constraint::Percentage(30),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Summary"));
    f.render_widget(table, area);
}

fn render_controls(f: &mut Frame, area: Rect, app: &App) {
    let current = app.chart().map(|chart| chart.kind);
    let mut lines: Vec<Line> = ChartKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let style = if Some(*kind) == current {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" [{}] {} ", i + 1, kind.label()), style))
        })
        .collect();

    // The sort control only exists while a bar chart is showing
    let sort = app.chart().and_then(|chart| chart.sort);
    if let Some(direction) = sort {
        lines.push(Line::from(format!(" [s] {}", direction.button_label())));
    }
    lines.push(Line::from(" [r] Reload   [q] Quit"));

    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Charts")),
        area,
    );
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let text = match app.dashboard().session().dataset() {
        Some(dataset) => {
            let report = dataset.report();
            Line::from(vec![
                Span::styled("Rows: ", Style::default().fg(Color::Cyan)),
                Span::raw(report.rows_read.to_string()),
                Span::raw(" | "),
                Span::styled("Kept: ", Style::default().fg(Color::Green)),
                Span::raw(report.rows_kept.to_string()),
                Span::raw(" | "),
                Span::styled("Dropped: ", Style::default().fg(Color::Red)),
                Span::raw(report.rows_dropped.to_string()),
            ])
        }
        None => Line::from(Span::styled(
            "No data loaded",
            Style::default().fg(Color::Gray),
        )),
    };
    f.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Status")),
        area,
    );
}

fn render_chart(f: &mut Frame, area: Rect, chart: Option<&RenderRequest>) {
    let Some(request) = chart else {
        let hint = Paragraph::new("Select a chart with keys 1-4.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Chart"));
        f.render_widget(hint, area);
        return;
    };

    let title = match request.sort {
        Some(direction) => format!("{} ({})", request.title, direction),
        None => request.title.clone(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if request.is_empty() {
        let empty = Paragraph::new("No data to display.")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    match (&request.kind, &request.data) {
        (ChartKind::Pie, _) => render_shares(f, area, request, block),
        (_, ChartData::Dated(_)) => render_line(f, area, request, block),
        _ => render_bars(f, area, request, block),
    }
}

/// Pie slices drawn as proportional horizontal bars with their percentage.
fn render_shares(f: &mut Frame, area: Rect, request: &RenderRequest, block: Block) {
    let shares = request.shares();
    let label_width = shares
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let bar_room = (area.width as usize).saturating_sub(label_width + 14);

    let lines: Vec<Line> = shares
        .iter()
        .zip(request.values())
        .enumerate()
        .map(|(i, ((label, pct), value))| {
            let len = (pct / 100.0 * bar_room as f64).round() as usize;
            Line::from(vec![
                Span::raw(format!("{:<width$} ", label, width = label_width)),
                Span::styled("█".repeat(len), Style::default().fg(palette(i))),
                Span::raw(format!(" {} ({})", format::percent(*pct), request.value_format.format(value))),
            ])
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn render_bars(f: &mut Frame, area: Rect, request: &RenderRequest, block: Block) {
    let labels = request.labels();
    let values = request.values();

    let bars: Vec<Bar> = labels
        .into_iter()
        .zip(values)
        .enumerate()
        .map(|(i, (label, value))| {
            Bar::default()
                .value(bar_height(request.value_format, value))
                .text_value(request.value_format.format(value))
                .label(Line::from(label))
                .style(Style::default().fg(palette(i)))
        })
        .collect();

    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_width = (inner_width / bars.len().max(1)).saturating_sub(1).clamp(3, 14) as u16;

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .value_style(Style::default().add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(Color::White));
    f.render_widget(chart, area);
}

fn render_line(f: &mut Frame, area: Rect, request: &RenderRequest, block: Block) {
    let labels = request.labels();
    let values = request.values();
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64, *value))
        .collect();

    let max = values.iter().cloned().fold(0.0_f64, f64::max);
    let y_max = if max > 0.0 { max * 1.1 } else { 1.0 };
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    let x_labels: Vec<Span> = match labels.len() {
        0 => Vec::new(),
        1 => vec![Span::raw(labels[0].clone())],
        n => vec![
            Span::raw(labels[0].clone()),
            Span::raw(labels[n / 2].clone()),
            Span::raw(labels[n - 1].clone()),
        ],
    };
    let y_labels: Vec<Span> = [0.0, y_max / 2.0, y_max]
        .iter()
        .map(|v| Span::raw(request.value_format.format(*v)))
        .collect();

    let dataset = Dataset::default()
        .name(request.y_axis.clone().unwrap_or_default())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title(request.x_axis.clone().unwrap_or_default())
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(request.y_axis.clone().unwrap_or_default())
                .bounds([0.0, y_max])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

fn render_notice(f: &mut Frame, area: Rect, notice: &Notice) {
    let popup = centered(area, 60, 7);
    let color = match notice.level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Error => Color::Red,
    };
    let text = vec![
        Line::from(notice.message.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to continue",
            Style::default().fg(Color::Gray),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(notice.title.clone())
        .border_style(Style::default().fg(color));

    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }).block(block), popup);
}

/// Bar heights must be integers; millions keep two decimals of resolution.
fn bar_height(format: ValueFormat, value: f64) -> u64 {
    let scaled = match format {
        ValueFormat::Quantity => value,
        ValueFormat::Millions => value * 100.0,
    };
    scaled.max(0.0).round() as u64
}

fn palette(index: usize) -> Color {
    const COLORS: [Color; 6] = [
        Color::LightBlue,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightMagenta,
        Color::LightCyan,
        Color::LightRed,
    ];
    COLORS[index % COLORS.len()]
}

fn centered(area: Rect, width_percent: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let side = (100 - width_percent) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(side),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(side),
        ])
        .split(vertical[1])[1]
}
