//! Rendering. Pure function of [`App`] state; no mutation happens here.

use ratatui::layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block as Panel, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, Wrap,
};
use ratatui::Frame;

use sole_explorer::api::Transaction;
use sole_explorer::classify::{classify, Counterparty, Direction};
use sole_explorer::config::{HASH_TRUNCATE_END, HASH_TRUNCATE_START};
use sole_explorer::format::{format_photons, format_time, truncate_hash};
use sole_explorer::known;
use sole_explorer::search::SearchKind;

use crate::app::{App, Page, SearchState};

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

struct Theme {
    bg: Color,
    panel: Color,
    border: Color,
    text: Color,
    muted: Color,
    accent: Color,
    warning: Color,
    danger: Color,
    success: Color,
}

const THEME: Theme = Theme {
    bg: Color::Rgb(8, 10, 18),
    panel: Color::Rgb(14, 17, 27),
    border: Color::Rgb(45, 52, 70),
    text: Color::Rgb(225, 228, 235),
    muted: Color::Rgb(110, 118, 135),
    accent: Color::Rgb(90, 160, 255),
    warning: Color::Rgb(255, 184, 60),
    danger: Color::Rgb(255, 90, 90),
    success: Color::Rgb(85, 200, 120),
};

fn style_base() -> Style {
    Style::default().fg(THEME.text).bg(THEME.bg)
}

fn style_panel() -> Style {
    Style::default().fg(THEME.text).bg(THEME.panel)
}

fn style_muted() -> Style {
    Style::default().fg(THEME.muted).bg(THEME.panel)
}

fn style_key() -> Style {
    Style::default()
        .fg(THEME.accent)
        .bg(THEME.panel)
        .add_modifier(Modifier::BOLD)
}

fn style_title() -> Style {
    Style::default()
        .fg(THEME.text)
        .bg(THEME.panel)
        .add_modifier(Modifier::BOLD)
}

fn style_error() -> Style {
    Style::default()
        .fg(THEME.danger)
        .bg(THEME.panel)
        .add_modifier(Modifier::BOLD)
}

fn style_selected() -> Style {
    Style::default()
        .fg(THEME.bg)
        .bg(THEME.accent)
        .add_modifier(Modifier::BOLD)
}

fn panel_block(title: impl Into<String>) -> Panel<'static> {
    Panel::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(THEME.border).bg(THEME.panel))
        .style(Style::default().bg(THEME.panel))
        .title(Span::styled(title.into(), style_title()))
}

fn short(hash: &str) -> String {
    truncate_hash(hash, HASH_TRUNCATE_START, HASH_TRUNCATE_END)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, app: &App) {
    frame.render_widget(Clear, frame.size());
    frame.render_widget(Panel::default().style(style_base()), frame.size());

    let rows = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_header(frame, app, rows[0]);
    match &app.page {
        Page::Dashboard => draw_dashboard(frame, app, rows[1]),
        Page::Block { .. } => draw_block_page(frame, app, rows[1]),
        Page::Tx { block_height, .. } => draw_tx_page(frame, app, *block_height, rows[1]),
        Page::Address { address } => draw_address_page(frame, app, address, rows[1]),
    }
    draw_footer(frame, app, rows[2]);

    if app.search.active {
        draw_search_overlay(frame, &app.search, frame.size());
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let status = if app.dashboard.offline {
        Span::styled(" OFFLINE ", style_error())
    } else {
        Span::styled(" ONLINE ", Style::default().fg(THEME.success).bg(THEME.panel))
    };
    let line = Line::from(vec![
        Span::styled(" SOLE Explorer ", style_key()),
        Span::styled(app.node_url.clone(), style_muted()),
        Span::raw("  "),
        status,
    ]);
    frame.render_widget(Paragraph::new(line).style(style_panel()), area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = if app.search.active {
        &[
            ("Enter", "search"),
            ("Tab", "kind"),
            ("Esc", "close"),
        ]
    } else {
        match app.page {
            Page::Dashboard => &[
                ("↑/↓", "select"),
                ("Enter", "open block"),
                ("/", "search"),
                ("q", "quit"),
            ],
            Page::Block { .. } => &[
                ("Enter", "open tx"),
                ("p", "prev block"),
                ("v", "validator"),
                ("Esc", "back"),
            ],
            Page::Tx { .. } => &[
                ("Enter", "receiver"),
                ("f", "sender"),
                ("Esc", "back"),
                ("/", "search"),
            ],
            Page::Address { .. } => &[
                ("↑/↓", "select"),
                ("Enter", "open tx"),
                ("Esc", "back"),
                ("r", "refresh"),
            ],
        }
    };

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {key} "), style_key()));
        spans.push(Span::styled(format!("{action}  "), style_muted()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(style_panel()), area);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn draw_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let cards = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let height_text = match &app.dashboard.tip {
        Some(tip) => tip.height.to_string(),
        None if app.dashboard.loading => "…".to_string(),
        None => "—".to_string(),
    };
    frame.render_widget(
        Paragraph::new(height_text)
            .style(style_panel())
            .block(panel_block(" Chain Height ")),
        cards[0],
    );

    let tip_text = match &app.dashboard.tip {
        Some(tip) => short(&tip.hash),
        None => "—".to_string(),
    };
    frame.render_widget(
        Paragraph::new(tip_text)
            .style(style_panel())
            .block(panel_block(" Tip Hash ")),
        cards[1],
    );

    let table_rows: Vec<Row> = app
        .dashboard
        .blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let row = Row::new(vec![
                Cell::from(block.height.to_string()),
                Cell::from(short(&block.hash)),
                Cell::from(block.transactions.len().to_string()),
                Cell::from(short(&block.validator)),
                Cell::from(format_time(block.timestamp)),
            ]);
            if i == app.dashboard.selected {
                row.style(style_selected())
            } else {
                row.style(style_panel())
            }
        })
        .collect();

    let title = if app.dashboard.loading {
        " Latest Blocks (refreshing…) "
    } else {
        " Latest Blocks "
    };
    let table = Table::new(
        table_rows,
        [
            Constraint::Length(10),
            Constraint::Length(20),
            Constraint::Length(5),
            Constraint::Length(20),
            Constraint::Min(24),
        ],
    )
    .header(header_row(&["Height", "Hash", "Txs", "Validator", "Time"]))
    .block(panel_block(title));
    frame.render_widget(table, rows[1]);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    Row::new(
        titles
            .iter()
            .map(|t| Cell::from(Span::styled(*t, style_muted())))
            .collect::<Vec<_>>(),
    )
}

// ---------------------------------------------------------------------------
// Block page
// ---------------------------------------------------------------------------

fn draw_block_page(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(message) = &app.block.error {
        draw_not_found(frame, message, area);
        return;
    }
    let Some(block) = &app.block.block else {
        draw_loading(frame, " Block ", area);
        return;
    };

    let rows = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    let prev = if block.is_genesis() {
        Span::styled("genesis".to_string(), style_muted())
    } else {
        Span::styled(block.prev_block_hash.clone(), style_key())
    };
    let summary = vec![
        field_line("Height", block.height.to_string()),
        field_line("Hash", block.hash.clone()),
        Line::from(vec![Span::styled("Previous     ", style_muted()), prev]),
        field_line("Validator", label_address(&block.validator)),
        field_line("Signature", short(&block.signature)),
        field_line("Timestamp", format_time(block.timestamp)),
        field_line("Transactions", block.transactions.len().to_string()),
    ];
    frame.render_widget(
        Paragraph::new(summary)
            .style(style_panel())
            .wrap(Wrap { trim: true })
            .block(panel_block(format!(" Block #{} ", block.height))),
        rows[0],
    );

    draw_tx_table(
        frame,
        &block.transactions,
        app.block.selected_tx,
        " Transactions ",
        rows[1],
    );
}

fn draw_tx_table(
    frame: &mut Frame,
    txs: &[Transaction],
    selected: usize,
    title: &str,
    area: Rect,
) {
    let rows: Vec<Row> = txs
        .iter()
        .enumerate()
        .map(|(i, tx)| {
            let sender = match tx.first_sender() {
                Some(s) if !tx.is_coinbase() => short(s),
                _ => "COINBASE".to_string(),
            };
            let row = Row::new(vec![
                Cell::from(short(&tx.id)),
                Cell::from(sender),
                Cell::from(tx.outputs.len().to_string()),
                Cell::from(format_photons(tx.total_output())),
            ]);
            if i == selected {
                row.style(style_selected())
            } else {
                row.style(style_panel())
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(36),
            Constraint::Length(5),
            Constraint::Min(20),
        ],
    )
    .header(header_row(&["TxID", "Sender", "Outs", "Total"]))
    .block(panel_block(title.to_string()));
    frame.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Transaction page
// ---------------------------------------------------------------------------

fn draw_tx_page(frame: &mut Frame, app: &App, block_height: Option<u64>, area: Rect) {
    if let Some(message) = &app.tx.error {
        draw_not_found(frame, message, area);
        return;
    }
    let Some(tx) = &app.tx.tx else {
        draw_loading(frame, " Transaction ", area);
        return;
    };

    let rows = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    let sender = if tx.is_coinbase() {
        Span::styled("COINBASE (newly minted)".to_string(), style_muted())
    } else {
        Span::styled(
            tx.first_sender().map_or_else(String::new, label_address),
            style_key(),
        )
    };
    let mut summary = vec![
        field_line("TxID", tx.id.clone()),
        Line::from(vec![Span::styled("Sender       ", style_muted()), sender]),
        field_line("Timestamp", format_time(tx.timestamp)),
        field_line("Total Output", format_photons(tx.total_output())),
    ];
    if let Some(height) = block_height {
        summary.push(field_line("Included In", format!("block #{height}")));
    }
    frame.render_widget(
        Paragraph::new(summary)
            .style(style_panel())
            .wrap(Wrap { trim: true })
            .block(panel_block(" Transaction ")),
        rows[0],
    );

    let sender_address = tx.first_sender().unwrap_or_default();
    let out_rows: Vec<Row> = tx
        .outputs
        .iter()
        .enumerate()
        .map(|(i, out)| {
            // An output paying the sender back is change, not a transfer.
            let kind = if !tx.is_coinbase() && out.receiver_address == sender_address {
                "Change"
            } else {
                "Transfer"
            };
            let row = Row::new(vec![
                Cell::from(label_address(&out.receiver_address)),
                Cell::from(format_photons(out.value)),
                Cell::from(Span::styled(kind, style_muted())),
            ]);
            if i == app.tx.selected_output {
                row.style(style_selected())
            } else {
                row.style(style_panel())
            }
        })
        .collect();
    let table = Table::new(
        out_rows,
        [
            Constraint::Min(40),
            Constraint::Length(26),
            Constraint::Length(10),
        ],
    )
    .header(header_row(&["Receiver", "Value", "Kind"]))
    .block(panel_block(" Outputs "));
    frame.render_widget(table, rows[1]);
}

// ---------------------------------------------------------------------------
// Address page
// ---------------------------------------------------------------------------

fn draw_address_page(frame: &mut Frame, app: &App, address: &str, area: Rect) {
    if let Some(message) = &app.address.error {
        draw_not_found(frame, message, area);
        return;
    }
    if app.address.loading && app.address.balance.is_none() {
        draw_loading(frame, " Address ", area);
        return;
    }

    let rows = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let balance = app
        .address
        .balance
        .as_ref()
        .map_or_else(|| "—".to_string(), |b| format_photons(b.balance));
    let card = vec![
        field_line("Address", label_address(address)),
        field_line("Balance", balance),
    ];
    frame.render_widget(
        Paragraph::new(card)
            .style(style_panel())
            .wrap(Wrap { trim: true })
            .block(panel_block(" Address ")),
        rows[0],
    );

    if let Some(message) = &app.address.history_error {
        frame.render_widget(
            Paragraph::new(message.clone())
                .style(style_error())
                .alignment(Alignment::Center)
                .block(panel_block(" History ")),
            rows[1],
        );
        return;
    }

    let history_rows: Vec<Row> = app
        .address
        .transactions
        .iter()
        .enumerate()
        .map(|(i, tx)| {
            let verdict = classify(tx, address);
            let direction_style = match verdict.direction {
                Direction::Incoming => Style::default().fg(THEME.success).bg(THEME.panel),
                Direction::Outgoing => Style::default().fg(THEME.warning).bg(THEME.panel),
                Direction::SelfTransfer => style_muted(),
            };
            let counterparty = match &verdict.counterparty {
                Counterparty::Address(addr) => label_address(addr),
                other => other.to_string(),
            };
            let signed = match verdict.direction {
                Direction::Outgoing => format!("-{}", format_photons(verdict.value)),
                _ => format!("+{}", format_photons(verdict.value)),
            };
            let row = Row::new(vec![
                Cell::from(Span::styled(verdict.direction.to_string(), direction_style)),
                Cell::from(short(&tx.id)),
                Cell::from(counterparty),
                Cell::from(signed),
                Cell::from(format_time(tx.timestamp)),
            ]);
            if i == app.address.selected {
                row.style(style_selected())
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        history_rows,
        [
            Constraint::Length(9),
            Constraint::Length(20),
            Constraint::Min(24),
            Constraint::Length(26),
            Constraint::Length(24),
        ],
    )
    .header(header_row(&["Type", "TxID", "Counterparty", "Amount", "Time"]))
    .block(panel_block(format!(
        " History ({}) ",
        app.address.transactions.len()
    )));
    frame.render_widget(table, rows[1]);
}

/// One "Label    value" line for the summary cards.
fn field_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<13}"), style_muted()),
        Span::styled(value, style_panel()),
    ])
}

/// Appends the curated label to well-known addresses.
fn label_address(address: &str) -> String {
    match known::lookup(address) {
        Some(entry) => format!("{} [{}]", address, entry.label),
        None => address.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Not-found / loading / search
// ---------------------------------------------------------------------------

fn draw_not_found(frame: &mut Frame, message: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), style_error())),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to go back or h for the dashboard.",
            style_muted(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .style(style_panel())
            .alignment(Alignment::Center)
            .block(panel_block(" Not Found ")),
        area,
    );
}

fn draw_loading(frame: &mut Frame, title: &str, area: Rect) {
    frame.render_widget(
        Paragraph::new("Loading…")
            .style(style_muted())
            .alignment(Alignment::Center)
            .block(panel_block(title.to_string())),
        area,
    );
}

fn draw_search_overlay(frame: &mut Frame, search: &SearchState, area: Rect) {
    let popup = centered_rect(60, 9, area);
    frame.render_widget(Clear, popup);

    let kind_spans: Vec<Span> = SearchState::KINDS
        .iter()
        .flat_map(|kind| {
            let label = match kind {
                SearchKind::Transaction => "Transaction",
                SearchKind::Address => "Address",
                SearchKind::Block => "Block",
            };
            let style = if *kind == search.kind() {
                style_selected()
            } else {
                style_muted()
            };
            [Span::styled(format!(" {label} "), style), Span::raw(" ")]
        })
        .collect();

    let mut lines = vec![
        Line::from(kind_spans),
        Line::from(vec![
            Span::styled("> ", style_key()),
            Span::styled(search.query.clone(), style_panel()),
            Span::styled("_", style_key()),
        ]),
    ];
    if search.in_flight {
        lines.push(Line::from(Span::styled("Searching…", style_muted())));
    } else if let Some(error) = &search.error {
        lines.push(Line::from(Span::styled(error.clone(), style_error())));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .style(style_panel())
            .wrap(Wrap { trim: true })
            .block(panel_block(" Search ")),
        popup,
    );
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);
    let horizontal = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
