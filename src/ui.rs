use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use clickmash::{celebration::PALETTE, medal::Tier, session::Phase};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 3;
const VERTICAL_MARGIN: u16 = 1;

/// Seconds left at which the clock turns red.
const HURRY_SECS: u32 = 3;

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Gold => Color::Yellow,
        Tier::Silver => Color::Gray,
        Tier::Bronze => Color::Rgb(205, 127, 50),
        Tier::None => Color::DarkGray,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let view = session.notifier();

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let title_style = bold_style.fg(Color::Magenta);
        let neon_style = bold_style.fg(Color::Rgb(105, 255, 204));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // padding
                Constraint::Length(1), // difficulty picker
                Constraint::Length(1), // medal targets
                Constraint::Length(1), // padding
                Constraint::Length(1), // score / time / best
                Constraint::Min(3),    // button
                Constraint::Length(2), // result banner
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("CLICK MASH", title_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let running = session.phase() == Phase::Running;
        let mut picker: Vec<Span> = vec![Span::styled("time ", dim_style)];
        for d in session.catalog().durations() {
            if d == session.selected_duration() {
                picker.push(Span::styled(
                    format!("[{d}s]"),
                    bold_style.add_modifier(Modifier::REVERSED),
                ));
            } else {
                picker.push(Span::styled(format!(" {d}s "), dim_style));
            }
            picker.push(Span::raw(" "));
        }
        if running {
            picker.push(Span::styled("(locked)", dim_style));
        }
        Paragraph::new(Line::from(picker))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        if let Some(profile) = view.profile {
            let badge = |tier: Tier, label: &str, value: u32| {
                Span::styled(format!(" {label} {value} "), bold_style.fg(tier_color(tier)))
            };
            Paragraph::new(Line::from(vec![
                badge(Tier::Bronze, "bronze", profile.bronze),
                Span::styled("·", dim_style),
                badge(Tier::Silver, "silver", profile.silver),
                Span::styled("·", dim_style),
                badge(Tier::Gold, "gold", profile.gold),
            ]))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
        }

        let time_style = if running && view.remaining_secs <= HURRY_SECS {
            bold_style.fg(Color::Red)
        } else {
            bold_style
        };
        Paragraph::new(Line::from(vec![
            Span::styled("score ", dim_style),
            Span::styled(view.score.to_string(), neon_style),
            Span::styled("   time ", dim_style),
            Span::styled(view.remaining_secs.to_string(), time_style),
            Span::styled("   best ", dim_style),
            Span::styled(view.best_score.to_string(), bold_style),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

        let (label, label_style, border_style) = match session.phase() {
            Phase::Idle => (
                "press space or click to start",
                bold_style.fg(Color::Yellow),
                Style::default().fg(Color::Yellow),
            ),
            Phase::Running => (
                "CLICK! CLICK! CLICK!",
                neon_style,
                Style::default().fg(Color::Rgb(255, 79, 216)),
            ),
            Phase::Ended => ("time's up - press r to play again", dim_style, dim_style),
        };
        let button = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(border_style);
        let inner = button.inner(chunks[6]);
        button.render(chunks[6], buf);
        if inner.height > 0 {
            let label_row = Rect {
                y: inner.y + inner.height.saturating_sub(1) / 2,
                height: 1,
                ..inner
            };
            Paragraph::new(Span::styled(label, label_style))
                .alignment(Alignment::Center)
                .render(label_row, buf);
        }

        if let Some(banner) = &view.banner {
            let mut title = vec![Span::styled(
                banner.title.clone(),
                bold_style.fg(tier_color(banner.tier)),
            )];
            if view.new_record {
                title.push(Span::styled("  new best!", neon_style));
            }
            Paragraph::new(vec![Line::from(title), Line::from(banner.text.clone())])
                .alignment(Alignment::Center)
                .render(chunks[7], buf);
        }

        let sound = if view.sound_enabled { "on" } else { "off" };
        Paragraph::new(Span::styled(
            format!("(space/click) mash / (←/→ 1-3) difficulty / (r)eset / (m) sound {sound} / (esc) quit"),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[8], buf);

        for p in &view.celebration.particles {
            if p.x < 0.0 || p.y < 0.0 {
                continue;
            }
            let x = area.x.saturating_add(p.x as u16);
            let y = area.y.saturating_add(p.y as u16);
            if x >= area.right() || y >= area.bottom() {
                continue;
            }
            let (r, g, b) = PALETTE[p.color_index % PALETTE.len()];
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(p.symbol).set_fg(Color::Rgb(r, g, b));
            }
        }
    }
}
