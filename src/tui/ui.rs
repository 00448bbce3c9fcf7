//! Main UI rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::app::{App, ConnectionStatus, RenderedRow};

/// Column widths for order rows: id, price, amount, total.
const ORDER_WIDTHS: [usize; 4] = [8, 12, 12, 12];

/// Column widths for trade rows: time, type, price, amount, total,
/// initiating id, existing id.
const TRADE_WIDTHS: [usize; 7] = [20, 5, 12, 12, 12, 8, 8];

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(10),   // Book + trades
            Constraint::Length(3), // Balances
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    render_header(frame, main_layout[0], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(27),
            Constraint::Percentage(27),
            Constraint::Percentage(46),
        ])
        .split(main_layout[1]);

    render_order_region(frame, content[0], "Bids", Color::Green, &app.bid_rows);
    render_order_region(frame, content[1], "Asks", Color::Red, &app.ask_rows);
    render_trades(frame, content[2], app);

    render_balances(frame, main_layout[2], app);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " q: quit",
            Style::default().fg(Color::DarkGray),
        ))),
        main_layout[3],
    );
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let status_color = match app.connection_status {
        ConnectionStatus::Connected => Color::Green,
        ConnectionStatus::Connecting | ConnectionStatus::Reconnecting => Color::Yellow,
        ConnectionStatus::Disconnected => Color::Red,
    };

    let header = Line::from(vec![
        Span::styled(
            format!(" depthview — {} ", app.pair_label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}]", app.connection_status.as_str()),
            Style::default().fg(status_color),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_order_region(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    color: Color,
    rows: &[RenderedRow],
) {
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![header_line(&["id", "price", "amount", "total"], &ORDER_WIDTHS)];
    let visible = inner.height.saturating_sub(1) as usize;
    for row in rows.iter().take(visible) {
        lines.push(row_line(row, &ORDER_WIDTHS, Style::default().fg(color)));
    }
    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "no resting orders",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_trades(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Trades");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![header_line(
        &["time", "type", "price", "amount", "total", "init", "exist"],
        &TRADE_WIDTHS,
    )];
    let visible = inner.height.saturating_sub(1) as usize;
    for row in app.trade_rows.iter().take(visible) {
        lines.push(row_line(row, &TRADE_WIDTHS, Style::default()));
    }
    if app.trade_rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "no trades yet",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_balances(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Balances");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans: Vec<Span> = Vec::new();
    for cell in &app.balances {
        let mut style = Style::default();
        if cell.is_flashing() {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(
            format!(" {}: {} ", cell.currency.to_uppercase(), cell.text),
            style,
        ));
    }
    if spans.is_empty() {
        spans.push(Span::styled(
            " no balance data",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn header_line(titles: &[&str], widths: &[usize]) -> Line<'static> {
    let text: String = titles
        .iter()
        .zip(widths)
        .map(|(t, w)| pad(t, *w))
        .collect();
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
    ))
}

fn row_line(row: &RenderedRow, widths: &[usize], style: Style) -> Line<'static> {
    let text: String = row
        .cells
        .iter()
        .zip(widths)
        .map(|(c, w)| pad(c, *w))
        .collect();
    let style = if row.is_flashing() {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    };
    Line::from(Span::styled(text, style))
}

/// Right-pads a cell to a display-column width, truncating if needed.
fn pad(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    while out.width() < width {
        out.push(' ');
    }
    out
}
