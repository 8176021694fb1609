use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row, Table},
    Frame,
};

use crate::models::AccrualPeriod;
use crate::tui::app::{App, Field, Screen};
use crate::utils::{
    format_fdv, format_points, format_signed_pct, format_usd, format_usd_compact,
};

const ACCENT: Color = Color::Cyan;
const BOOST_COLOR: Color = Color::Green;
const BASE_COLOR: Color = Color::Blue;

pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Dashboard => draw_dashboard(frame, app),
        Screen::Breakdown => draw_breakdown(frame, app),
    }
}

fn draw_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(4),
        ])
        .split(frame.size());

    draw_header(frame, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(40)])
        .split(chunks[1]);

    draw_input_panel(frame, body[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(8)])
        .split(body[1]);

    draw_kpis(frame, right[0], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(right[1]);

    draw_accumulation_chart(frame, charts[0], app);
    draw_sensitivity_heatmap(frame, charts[1], app);

    draw_footer(
        frame,
        chunks[2],
        "Tab next field · ↑/↓ adjust · b bonus · d breakdown · r refresh · q quit",
    );
}

fn draw_breakdown(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.size());

    draw_header(frame, chunks[0]);
    draw_breakdown_table(frame, chunks[1], app);

    let summary = Paragraph::new(format!(
        "Share: {:.4}%   Projected network points: {}   Estimate: {} ({})",
        app.metrics.share_pct,
        format_points(app.metrics.projected_global),
        format_points(app.estimate.value),
        app.estimate.source.as_str(),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Projection"));
    frame.render_widget(summary, chunks[2]);

    draw_footer(frame, chunks[3], "↑/↓ scroll · d back · q quit");
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("StandX Yield Estimator")
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn draw_input_panel(frame: &mut Frame, area: Rect, app: &App) {
    let fields = [
        Field::Capital,
        Field::Days,
        Field::ActiveBonus,
        Field::Fdv,
        Field::AirdropPct,
    ];

    let mut lines: Vec<Line> = Vec::new();
    for field in fields {
        let value = match field {
            Field::Capital => format_points(app.capital),
            Field::Days => format!("{}", app.days),
            Field::ActiveBonus => {
                if app.active_bonus {
                    format!("on (+{:.0}/day)", app.daily_bonus())
                } else {
                    "off".to_string()
                }
            }
            Field::Fdv => format_fdv(app.fdv()),
            Field::AirdropPct => format!("{:.1}%", app.airdrop_pct),
        };

        let focused = app.focus == field;
        let marker = if focused { "▸ " } else { "  " };
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{}{:<18}{:>12}", marker, field.label(), value),
            style,
        )));
        lines.push(Line::from(""));
    }

    let source_label = if app.refreshing {
        "refreshing...".to_string()
    } else {
        format!(
            "{} ({})",
            format_points(app.estimate.value),
            app.estimate.source.as_str()
        )
    };
    lines.push(Line::from(Span::styled(
        format!("  Network points: {}", source_label),
        Style::default().fg(Color::DarkGray),
    )));

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Parameters"),
    );
    frame.render_widget(panel, area);
}

fn draw_kpis(frame: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let m = &app.metrics;
    let gain = m.net_profit > 0.0;
    let gain_color = if gain { Color::Green } else { Color::Red };

    kpi_card(
        frame,
        cards[0],
        "Airdrop Value",
        format_usd(m.est_value),
        format!("ROI {}", format_signed_pct(m.roi_pct)),
        gain_color,
    );
    kpi_card(
        frame,
        cards[1],
        "Net Profit",
        format_usd(m.net_profit),
        "principal recoverable".to_string(),
        gain_color,
    );
    kpi_card(
        frame,
        cards[2],
        "APY",
        format_signed_pct(m.apy_pct),
        format!("over {} days", app.days),
        if m.apy_pct > 100.0 {
            Color::Magenta
        } else {
            gain_color
        },
    );
    kpi_card(
        frame,
        cards[3],
        "Total Points",
        format_points(app.accrual.total_points),
        format!("share {:.4}%", m.share_pct),
        ACCENT,
    );
}

fn kpi_card(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    delta: String,
    delta_color: Color,
) {
    let lines = vec![
        Line::from(Span::styled(
            value,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(delta, Style::default().fg(delta_color))),
    ];
    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(card, area);
}

fn draw_accumulation_chart(frame: &mut Frame, area: Rect, app: &App) {
    let series = app.accrual.cumulative_series();
    if series.is_empty() {
        frame.render_widget(
            Block::default().borders(Borders::ALL).title("Cumulative points"),
            area,
        );
        return;
    }

    // Split the series where the boost multiplier expires so the two phases
    // render as differently-colored segments. The boundary point appears in
    // both segments to keep the line connected.
    let split = app
        .accrual
        .schedule
        .iter()
        .position(|r| r.period == AccrualPeriod::Base)
        .unwrap_or(series.len());
    let boost_data = &series[..split];
    let base_data: Vec<(f64, f64)> = if split == 0 {
        series.clone()
    } else if split < series.len() {
        series[split - 1..].to_vec()
    } else {
        Vec::new()
    };

    let mut datasets = Vec::new();
    if !boost_data.is_empty() {
        datasets.push(
            Dataset::default()
                .name("boost")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(BOOST_COLOR))
                .data(boost_data),
        );
    }
    if !base_data.is_empty() {
        datasets.push(
            Dataset::default()
                .name("base")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(BASE_COLOR))
                .data(&base_data),
        );
    }

    let max_day = app.days.max(1) as f64;
    let max_points = app.accrual.total_points.max(1.0) * 1.05;

    let title = match app.accrual.boost_end_day() {
        Some(day) => format!("Cumulative points · boost ends day {}", day),
        None => "Cumulative points".to_string(),
    };

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .title("day")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([1.0, max_day])
                .labels(vec![
                    Span::raw("1"),
                    Span::raw(format!("{}", (app.days.max(1) + 1) / 2)),
                    Span::raw(format!("{}", app.days.max(1))),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, max_points])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format_points(max_points / 2.0)),
                    Span::raw(format_points(max_points)),
                ]),
        );
    frame.render_widget(chart, area);
}

fn draw_sensitivity_heatmap(frame: &mut Frame, area: Rect, app: &App) {
    let grid = &app.grid;
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Net profit · FDV × duration");

    if grid.net_profit.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let (min, max) = grid.value_range();
    let span = (max - min).max(f64::EPSILON);

    let label_width = 5usize;
    let columns = grid.fdv_axis.len().max(1);
    let cell_width = ((area.width as usize).saturating_sub(label_width + 2) / columns).max(6);

    let mut lines: Vec<Line> = Vec::new();

    let mut header = vec![Span::raw(" ".repeat(label_width))];
    for &fdv in &grid.fdv_axis {
        header.push(Span::styled(
            format!("{:^width$}", format_fdv(fdv), width = cell_width),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(header));

    // Thin rows out when the panel is shorter than the duration axis.
    let max_rows = (area.height as usize).saturating_sub(3).max(1);
    let step = ((grid.duration_axis.len() + max_rows - 1) / max_rows).max(1);

    for (i, &days) in grid.duration_axis.iter().enumerate().step_by(step) {
        let mut spans = vec![Span::styled(
            format!("{:>4} ", format!("{}d", days)),
            Style::default().fg(Color::DarkGray),
        )];
        for &value in &grid.net_profit[i] {
            let t = (value - min) / span;
            spans.push(Span::styled(
                format!("{:^width$}", format_usd_compact(value), width = cell_width),
                Style::default().bg(heat_color(t)).fg(heat_text_color(t)),
            ));
        }
        lines.push(Line::from(spans));
    }

    let heatmap = Paragraph::new(lines).block(block);
    frame.render_widget(heatmap, area);
}

fn heat_color(t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Color::Rgb(lerp(13, 94), lerp(42, 234), lerp(51, 212))
}

fn heat_text_color(t: f64) -> Color {
    if t > 0.55 {
        Color::Black
    } else {
        Color::Gray
    }
}

fn draw_breakdown_table(frame: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(["Day", "Date", "Period", "Rate", "Daily", "Cumulative"])
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .accrual
        .schedule
        .iter()
        .skip(app.breakdown_scroll)
        .map(|r| {
            let period_style = match r.period {
                AccrualPeriod::Boost => Style::default().fg(BOOST_COLOR),
                AccrualPeriod::Base => Style::default().fg(BASE_COLOR),
            };
            Row::new(vec![
                Span::raw(format!("{}", r.day)),
                Span::raw(r.date.format("%Y-%m-%d").to_string()),
                Span::styled(r.period.as_str(), period_style),
                Span::raw(format!("{:.1}x", r.multiplier)),
                Span::raw(format_points(r.daily_points)),
                Span::raw(format_points(r.cumulative_points)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(12),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Daily breakdown"),
    );
    frame.render_widget(table, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, keys: &str) {
    let lines = vec![
        Line::from(Span::styled(keys, Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            "Rough estimate from current campaign rules. Not investment advice.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let footer = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
