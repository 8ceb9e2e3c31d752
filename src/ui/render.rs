use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::config::{ColorConfig, Config};
use crate::engine::{CarouselSnapshot, Mode};

use super::gradient::{gradient_color, page_position};

/// More pages than this collapse the dot row into a counter.
const MAX_DOTS: usize = 30;

/// Main UI rendering function.
pub fn ui(f: &mut Frame, snapshot: &CarouselSnapshot, config: &Config, haptic_flash: bool) {
    let colors = &config.colors;
    let border_color = Color::Black;
    let bg_color = Color::Rgb(20, 20, 25);

    // Fill entire background with border color to create thick border effect
    let background = Block::default().style(Style::default().bg(border_color));
    f.render_widget(background, f.size());

    // Inner area with margin to create thick border (2 chars on sides, 1 on top/bottom)
    let inner_area = f.size().inner(&Margin {
        horizontal: 2,
        vertical: 1,
    });

    let inner_bg = Block::default().style(Style::default().bg(bg_color));
    f.render_widget(inner_bg, inner_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Page card
            Constraint::Length(1), // Page dots
            Constraint::Length(1), // Drag gauge
            Constraint::Length(1), // Status line
        ])
        .split(inner_area);

    render_card(f, chunks[0], snapshot, config);
    render_dots(f, chunks[1], snapshot, colors);
    render_gauge(f, chunks[2], snapshot, colors);
    render_status(f, chunks[3], snapshot, haptic_flash);
}

/// Where the page card sits inside `area`.
///
/// The card is 60% of the width at scale 1.0, grows and shrinks with the
/// pinch scale, and slides sideways by up to a quarter of the area with the
/// drag progress. It never leaves `area`.
pub fn card_rect(area: Rect, snapshot: &CarouselSnapshot) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let base_width = area.width as f64 * 0.6;
    let width = ((base_width * snapshot.scale).round() as u16).clamp(1, area.width);
    let height = ((area.height as f64 * snapshot.scale.min(1.0)).round() as u16)
        .clamp(area.height.min(3), area.height);

    let free = (area.width - width) as f64;
    let shift = snapshot.drag_progress * area.width as f64 / 4.0;
    let offset = (free / 2.0 + shift).round().clamp(0.0, free) as u16;

    Rect::new(
        area.x + offset,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_card(f: &mut Frame, area: Rect, snapshot: &CarouselSnapshot, config: &Config) {
    let (start, end) = config.colors.card_gradient();
    let position = page_position(snapshot.current_index, snapshot.page_count);
    let accent = gradient_color(start, end, position);

    let mut lines = vec![Line::from("")];
    if snapshot.page_count == 0 {
        lines.push(Line::from(Span::styled(
            "No items",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("Page {} / {}", snapshot.current_index + 1, snapshot.page_count),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        let per_page = config.carousel.items_per_page;
        let first = snapshot.current_index * per_page;
        let last = (first + per_page).min(config.carousel.total_items);
        for item in first..last {
            lines.push(Line::from(Span::styled(
                format!("Item {}", item + 1),
                Style::default().fg(Color::White),
            )));
        }
    }

    let card = card_rect(area, snapshot);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(Color::Rgb(30, 30, 35)));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(Clear, card);
    f.render_widget(paragraph, card);
}

fn render_dots(f: &mut Frame, area: Rect, snapshot: &CarouselSnapshot, colors: &ColorConfig) {
    let active = Style::default().fg(ColorConfig::to_color(&colors.dot_active));
    let inactive = Style::default().fg(ColorConfig::to_color(&colors.dot_inactive));

    let line = if snapshot.page_count > MAX_DOTS {
        Line::from(Span::styled(
            format!("{} / {}", snapshot.current_index + 1, snapshot.page_count),
            active,
        ))
    } else {
        let spans: Vec<Span> = (0..snapshot.page_count)
            .flat_map(|i| {
                let dot = if i == snapshot.current_index {
                    Span::styled("●", active)
                } else {
                    Span::styled("○", inactive)
                };
                [dot, Span::raw(" ")]
            })
            .collect();
        Line::from(spans)
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_gauge(f: &mut Frame, area: Rect, snapshot: &CarouselSnapshot, colors: &ColorConfig) {
    let (start, end) = colors.card_gradient();
    let ratio = ((snapshot.drag_progress + 1.0) / 2.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(gradient_color(start, end, ratio as f32))
                .bg(Color::Rgb(30, 30, 35)),
        )
        .ratio(ratio)
        .label(format!("drag {:+.0}%", snapshot.drag_progress * 100.0));
    f.render_widget(gauge, area);
}

fn render_status(f: &mut Frame, area: Rect, snapshot: &CarouselSnapshot, haptic_flash: bool) {
    let mode_color = match snapshot.mode {
        Mode::Idle => Color::Gray,
        Mode::Dragging => Color::Cyan,
        Mode::Inertia => Color::Magenta,
        Mode::Pinching => Color::Yellow,
        Mode::AutoPlaying => Color::Green,
    };
    let pulse = if haptic_flash { "◆ " } else { "  " };

    let line = Line::from(vec![
        Span::styled(pulse, Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{:?}", snapshot.mode),
            Style::default().fg(mode_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  scale {:.2}", snapshot.scale),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            "  ←/→ page · drag with mouse · +/- pinch · 0 release · q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
