//! GitHub Grind rendering. Reads the game, never mutates it.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::logic::{self, format_multiplier, format_number, ClickAction, ALL_ACTIONS};
use super::prestige::{CAREER_OFFERS, TIER_OFFERS};
use super::shop::Upgrade;
use super::state::{tier_progress, EconomyState, TierStatus};
use super::tables::{career, TIERS};
use super::{is_available, GrindGame, Intent};

const ENERGY_BAR_WIDTH: usize = 20;

pub fn render(
    game: &GrindGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let state = &game.state;

    // Wide screens get the tier list and log in a right-hand column.
    let (main_area, side_area) = if is_narrow_layout(area.width) {
        (area, None)
    } else {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    };

    let mut constraints = vec![
        Constraint::Length(4),                            // header
        Constraint::Length(8),                            // resources
        Constraint::Length(ALL_ACTIONS.len() as u16 + 2), // actions
        Constraint::Length(7),                            // shop + prestige + save
    ];
    if side_area.is_none() {
        constraints.push(Constraint::Length(TIERS.len() as u16 + 2)); // tiers
        constraints.push(Constraint::Min(3)); // log
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(main_area);

    render_header(state, f, chunks[0]);
    render_resources(state, f, chunks[1]);
    render_actions(state, f, chunks[2], click_state);
    render_shop(state, f, chunks[3], click_state);

    match side_area {
        Some(side) => {
            let side_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(TIERS.len() as u16 + 2),
                    Constraint::Min(3),
                ])
                .split(side);
            render_tiers(state, f, side_chunks[0]);
            render_log(game, f, side_chunks[1]);
        }
        None => {
            render_tiers(state, f, chunks[4]);
            render_log(game, f, chunks[5]);
        }
    }
}

fn render_header(state: &EconomyState, f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {}", state.tier_name()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  Semester {}", state.semester),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" Career: {}", state.career_name()),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(
                format!("  Day {}", state.tick),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" GitHub Grind ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn energy_line(state: &EconomyState) -> Line<'static> {
    let pct = state.energy_percent();
    let filled = ((pct / 100.0) * ENERGY_BAR_WIDTH as f64).round() as usize;
    let empty = ENERGY_BAR_WIDTH.saturating_sub(filled);
    let bar: String = "█".repeat(filled) + &"░".repeat(empty);
    let color = if pct >= 50.0 {
        Color::Green
    } else if pct >= 20.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    Line::from(vec![
        Span::styled(" Energy ", Style::default().fg(Color::Gray)),
        Span::styled(bar, Style::default().fg(color)),
        Span::styled(
            format!(
                " {}/{} (+{}/s)",
                state.energy.floor(),
                state.max_energy.floor(),
                state.energy_regen
            ),
            Style::default().fg(Color::White),
        ),
    ])
}

fn stat_line(label: &str, value: String, extra: Option<String>) -> Line<'static> {
    let mut spans = vec![
        Span::styled(format!(" {:<11}", label), Style::default().fg(Color::Gray)),
        Span::styled(
            value,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(extra) = extra {
        spans.push(Span::styled(
            format!("  {}", extra),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn render_resources(state: &EconomyState, f: &mut Frame, area: Rect) {
    let lines = vec![
        energy_line(state),
        stat_line("Skill", format_number(state.skill), None),
        stat_line(
            "Reputation",
            format_number(state.reputation),
            Some(format!("x{}", format_multiplier(state.rep_multiplier()))),
        ),
        stat_line(
            "Stars",
            format_number(state.stars),
            Some(format!("x{:.1}", state.star_multiplier())),
        ),
        stat_line("Offers", state.offers.to_string(), None),
        stat_line("GPA", format!("{:.2}", state.gpa), None),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Resources ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn intent_line(
    state: &EconomyState,
    intent: Intent,
    label: String,
    detail: String,
) -> Line<'static> {
    let available = is_available(state, intent);
    let key_style = if available {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let label_style = if available {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(
            format!(" [{}] ", intent.key().to_ascii_uppercase()),
            key_style,
        ),
        Span::styled(format!("{:<17}", label), label_style),
        Span::styled(detail, Style::default().fg(Color::DarkGray)),
    ])
}

fn action_detail(state: &EconomyState, action: ClickAction) -> String {
    let cost = format!("-{:.0}⚡", action.energy_cost());
    match action {
        ClickAction::ApplyResearch => {
            format!("{} {:.0}%", cost, logic::research_chance(state) * 100.0)
        }
        ClickAction::ApplyInternship => {
            format!("{} {:.0}%", cost, logic::internship_chance(state) * 100.0)
        }
        _ => cost,
    }
}

fn render_actions(
    state: &EconomyState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    for action in ALL_ACTIONS {
        let intent = Intent::Act(action);
        cl.push_clickable(
            intent_line(state, intent, action.name().to_string(), action_detail(state, action)),
            intent.action_id(),
        );
    }

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Actions ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_shop(
    state: &EconomyState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();

    for upgrade in [Upgrade::Coffee, Upgrade::Streak] {
        let intent = Intent::Buy(upgrade);
        cl.push_clickable(
            intent_line(
                state,
                intent,
                format!("{} Lv.{}", upgrade.name(), upgrade.level(state)),
                format!("{} rep", format_number(upgrade.next_cost(state))),
            ),
            intent.action_id(),
        );
    }

    let next_tier = format!("{}/{} offers", state.offers, TIER_OFFERS);
    cl.push_clickable(
        intent_line(state, Intent::Prestige, "Advance Tier".into(), next_tier),
        Intent::Prestige.action_id(),
    );

    let career_detail = if state.at_last_tier() {
        format!(
            "→ {} ({}/{} offers)",
            career(state.career_index + 1).name,
            state.offers,
            CAREER_OFFERS
        )
    } else {
        format!("reach {}", TIERS[TIERS.len() - 1].name)
    };
    cl.push_clickable(
        intent_line(state, Intent::CareerPrestige, "Career Move".into(), career_detail),
        Intent::CareerPrestige.action_id(),
    );

    cl.push_clickable(
        intent_line(state, Intent::Save, "Save".into(), String::new()),
        Intent::Save.action_id(),
    );

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Shop & Prestige ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_tiers(state: &EconomyState, f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = TIERS
        .iter()
        .zip(tier_progress(state))
        .map(|(rung, status)| {
            let (marker, style) = match status {
                TierStatus::Done => ("✓", Style::default().fg(Color::Green)),
                TierStatus::Current => (
                    "▶",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                TierStatus::Locked => ("·", Style::default().fg(Color::DarkGray)),
            };
            Line::from(Span::styled(
                format!(" {} {} x{}", marker, rung.name, rung.multiplier),
                style,
            ))
        })
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Tiers ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_log(game: &GrindGame, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;

    // Newest first
    let log_lines: Vec<Line> = game
        .log
        .iter()
        .rev()
        .take(visible_height)
        .enumerate()
        .map(|(i, entry)| {
            let is_recent = i < 3;
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if is_recent {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(entry.text.clone(), style))
        })
        .collect();

    let widget = Paragraph::new(log_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::grind::save::MemoryStore;
    use crate::games::grind::ALL_INTENTS;
    use ratzilla::ratatui::backend::TestBackend;
    use ratzilla::ratatui::buffer::Buffer;
    use ratzilla::ratatui::Terminal;

    fn game() -> GrindGame {
        GrindGame::with_store(Box::new(MemoryStore::new()), 1)
    }

    /// Draw the game into an off-screen buffer and return it with the
    /// click targets registered during the frame.
    fn draw(game: &GrindGame, width: u16, height: u16) -> (Buffer, ClickState) {
        let click_state = Rc::new(RefCell::new(ClickState::new()));
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render(game, f, area, &click_state);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let cs = click_state.replace(ClickState::new());
        (buffer, cs)
    }

    fn symbol(buf: &Buffer, x: u16, y: u16) -> &str {
        buf.cell((x, y)).map(|c| c.symbol()).unwrap_or("")
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| symbol(buf, x, y)).collect()
    }

    fn screen_text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Every `[X]` hint on screen: `(col, row, key)`.
    fn hints(buf: &Buffer) -> Vec<(u16, u16, char)> {
        let mut found = Vec::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width.saturating_sub(2) {
                if symbol(buf, x, y) != "[" || symbol(buf, x + 2, y) != "]" {
                    continue;
                }
                let mut chars = symbol(buf, x + 1, y).chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    if c.is_ascii_alphanumeric() {
                        found.push((x, y, c.to_ascii_lowercase()));
                    }
                }
            }
        }
        found
    }

    fn assert_hints_are_clickable(width: u16, height: u16) {
        let (buf, cs) = draw(&game(), width, height);
        let hints = hints(&buf);
        assert_eq!(hints.len(), ALL_INTENTS.len(), "hints on screen: {:?}", hints);
        for (x, y, key) in hints {
            let id = cs
                .hit_test(x, y)
                .unwrap_or_else(|| panic!("[{}] at ({}, {}) has no click target", key, x, y));
            let intent = Intent::from_action_id(id)
                .unwrap_or_else(|| panic!("[{}] targets unknown action {}", key, id));
            assert_eq!(intent.key(), key, "[{}] is wired to {:?}", key, intent);
            assert_eq!(Intent::from_key(key), Some(intent));
        }
    }

    #[test]
    fn wide_hints_are_clickable_and_bound() {
        assert_hints_are_clickable(100, 40);
    }

    #[test]
    fn narrow_hints_are_clickable_and_bound() {
        assert_hints_are_clickable(44, 60);
    }

    #[test]
    fn narrow_layout_shows_tier_list() {
        let (buf, _) = draw(&game(), 44, 60);
        let text = screen_text(&buf);
        assert!(text.contains("Tiers"));
        for rung in &TIERS {
            assert!(text.contains(rung.name), "missing tier {}", rung.name);
        }
    }

    #[test]
    fn streak_multiplier_shows_fraction() {
        let mut g = game();
        g.state.streak_level = 1;
        let (buf, _) = draw(&g, 100, 40);
        assert!(screen_text(&buf).contains("x1.2"));
    }

    #[test]
    fn energy_bar_floors_fractional_energy() {
        let mut g = game();
        g.state.energy = 9.6;
        let (buf, _) = draw(&g, 100, 40);
        let text = screen_text(&buf);
        assert!(text.contains(" 9/100 "), "{}", text);
    }
}
