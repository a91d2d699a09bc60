//! Detail screen for a single entry.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::StatusBarHint;

use super::{
    label, quit_hint, render_footer, status_span, title_style, value, Component, ACCENT_GOLD,
    ACCENT_RED, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::display::{format_dex_number, format_name, format_tenths, spinner, yes_no};
use crate::sprite;
use crate::state::{AbilitySlot, AppState, EntryDetail, StatValue};

pub const LOADING_MESSAGE: &str = "Loading Pokemon data...";
pub const FAILED_MESSAGE: &str = "Failed to load Pokemon data";
const MAX_STAT: u16 = 255;
const STAT_BAR_WIDTH: u16 = 20;

pub struct DetailViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct DetailView;

impl Component<Action> for DetailView {
    type Props<'a> = DetailViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Backspace => Some(Action::DetailClose),
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::DetailFetch),
                KeyCode::Char('p') => Some(Action::CryPlay),
                KeyCode::Char('[') => Some(Action::SpritePrev),
                KeyCode::Char(']') => Some(Action::SpriteNext),
                KeyCode::Char('j') | KeyCode::Down => Some(Action::MovesScroll(1)),
                KeyCode::Char('k') | KeyCode::Up => Some(Action::MovesScroll(-1)),
                KeyCode::PageDown => Some(Action::MovesScroll(10)),
                KeyCode::PageUp => Some(Action::MovesScroll(-10)),
                _ => None,
            },
            EventKind::Scroll { delta, .. } => Some(Action::MovesScroll(*delta as i16 * 3)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Body
            Constraint::Length(2), // Status
        ])
        .split(area);

        match &state.detail.entry {
            DataResource::Loaded(entry) => render_entry(frame, chunks[0], state, entry),
            DataResource::Failed(_) => {
                let text = Text::from(vec![
                    Line::styled(
                        FAILED_MESSAGE,
                        Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
                    ),
                    Line::styled("r to retry, Esc to go back", Style::default().fg(TEXT_DIM)),
                ]);
                render_centered(frame, chunks[0], text);
            }
            DataResource::Loading => {
                let line = Line::styled(
                    format!("{LOADING_MESSAGE} {}", spinner(state.tick)),
                    Style::default().fg(TEXT_DIM),
                );
                render_centered(frame, chunks[0], Text::from(line));
            }
            DataResource::Empty => {}
        }

        let hints = [
            StatusBarHint::new("Esc", "Back"),
            StatusBarHint::new("p", "Cry"),
            StatusBarHint::new("[ ]", "Sprite"),
            StatusBarHint::new("j/k", "Moves"),
            StatusBarHint::new("r", "Reload"),
            quit_hint(),
        ];
        let fallback = if state.detail.cry_playing {
            "Playing cry...".to_string()
        } else {
            String::new()
        };
        render_footer(
            frame,
            chunks[1],
            &hints,
            status_span(state.message.as_deref(), &fallback),
        );
    }
}

fn render_centered(frame: &mut Frame, area: Rect, text: Text<'static>) {
    let height = text.lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let target = Rect {
        y: area.y + top,
        height: height.min(area.height),
        ..area
    };
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), target);
}

fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title.into(), title_style()))
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM))
}

fn render_entry(frame: &mut Frame, area: Rect, state: &AppState, entry: &EntryDetail) {
    let rows = Layout::vertical([
        Constraint::Length(4), // Header
        Constraint::Min(1),    // Body
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(header_text(state, entry)).block(panel(format!(
            "{} {}",
            format_dex_number(&entry.id.to_string()),
            format_name(&entry.name)
        ))),
        rows[0],
    );

    let columns =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(rows[1]);

    let details = details_text(entry);
    let left = Layout::vertical([
        Constraint::Min(6),
        Constraint::Length((details.lines.len() as u16).saturating_add(2)),
    ])
    .split(columns[0]);
    render_sprite(frame, left[0], state, entry);
    frame.render_widget(
        Paragraph::new(details)
            .wrap(Wrap { trim: false })
            .block(panel("Details")),
        left[1],
    );

    let history = history_text(entry);
    let history_height = if history.lines.is_empty() {
        0
    } else {
        (history.lines.len() as u16).saturating_add(2)
    };
    let right = Layout::vertical([
        Constraint::Length((entry.stats.len() as u16).saturating_add(2)),
        Constraint::Min(4),
        Constraint::Length(history_height),
    ])
    .split(columns[1]);

    frame.render_widget(
        Paragraph::new(stats_text(&entry.stats)).block(panel("Base Stats")),
        right[0],
    );
    frame.render_widget(
        Paragraph::new(moves_text(entry))
            .scroll((state.detail.moves_scroll, 0))
            .block(panel(format!(
                "This Pokemon can learn {} different moves",
                entry.moves.len()
            ))),
        right[1],
    );
    if history_height > 0 {
        frame.render_widget(
            Paragraph::new(history)
                .wrap(Wrap { trim: false })
                .block(panel("History")),
            right[2],
        );
    }
}

fn header_text(state: &AppState, entry: &EntryDetail) -> Text<'static> {
    let mut type_line = Vec::new();
    for (idx, name) in entry.types.iter().enumerate() {
        if idx > 0 {
            type_line.push(Span::raw(" "));
        }
        type_line.push(Span::styled(
            format!(" {} ", name.to_ascii_uppercase()),
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if entry.cry_url.is_some() {
        type_line.push(label("   Cry: "));
        type_line.push(if state.detail.cry_playing {
            Span::styled(
                format!("playing {}", spinner(state.tick)),
                Style::default().fg(ACCENT_GOLD),
            )
        } else {
            value("press p")
        });
    }

    let base_exp = entry
        .base_experience
        .map(|exp| exp.to_string())
        .unwrap_or_else(|| "-".to_string());
    let measures = vec![
        label("Height: "),
        value(format!("{} m", format_tenths(entry.height))),
        label("   Weight: "),
        value(format!("{} kg", format_tenths(entry.weight))),
        label("   Base Exp: "),
        value(base_exp),
    ];
    Text::from(vec![Line::from(type_line), Line::from(measures)])
}

fn stat_line(stat: &StatValue) -> Line<'static> {
    let filled = (u32::from(stat.base_stat.min(MAX_STAT)) * u32::from(STAT_BAR_WIDTH)
        + u32::from(MAX_STAT) / 2)
        / u32::from(MAX_STAT);
    let filled = filled as usize;
    let empty = usize::from(STAT_BAR_WIDTH).saturating_sub(filled);
    Line::from(vec![
        Span::styled(
            format!("{:<16}", format_name(&stat.name)),
            Style::default().fg(TEXT_DIM),
        ),
        Span::styled(
            format!("{:>3} ", stat.base_stat),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        ),
        Span::styled("\u{2588}".repeat(filled), Style::default().fg(ACCENT_TEAL)),
        Span::styled("\u{2591}".repeat(empty), Style::default().fg(TEXT_DIM)),
        Span::styled(format!("  EV: {}", stat.effort), Style::default().fg(TEXT_DIM)),
    ])
}

fn stats_text(stats: &[StatValue]) -> Text<'static> {
    Text::from(stats.iter().map(stat_line).collect::<Vec<_>>())
}

fn ability_line(ability: &AbilitySlot) -> Line<'static> {
    let name = ability
        .name
        .as_deref()
        .map(format_name)
        .unwrap_or_else(|| "(empty slot)".to_string());
    let mut spans = vec![Span::raw("  "), value(name)];
    if ability.is_hidden {
        spans.push(Span::styled(" (Hidden)", Style::default().fg(ACCENT_GOLD)));
    }
    spans.push(label(&format!("  Slot {}", ability.slot)));
    Line::from(spans)
}

fn details_text(entry: &EntryDetail) -> Text<'static> {
    let mut lines = vec![Line::styled("Abilities", title_style())];
    lines.extend(entry.abilities.iter().map(ability_line));

    lines.push(Line::styled("Game Info", title_style()));
    lines.push(Line::from(vec![
        label("  Order: "),
        value(entry.order.to_string()),
        label("   Default: "),
        value(yes_no(entry.is_default)),
    ]));
    if let Some(species) = entry.species.as_deref() {
        lines.push(Line::from(vec![
            label("  Species: "),
            value(format_name(species)),
        ]));
    }

    if !entry.held_items.is_empty() {
        lines.push(Line::styled("Held Items", title_style()));
        for item in &entry.held_items {
            let versions = item
                .versions
                .iter()
                .map(|detail| format!("{} {}%", format_name(&detail.version), detail.rarity))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(Line::from(vec![
                Span::raw("  "),
                value(format_name(&item.name)),
                label(&format!("  {versions}")),
            ]));
        }
    }
    Text::from(lines)
}

fn moves_text(entry: &EntryDetail) -> Text<'static> {
    let moves = entry.level_up_moves();
    if moves.is_empty() {
        return Text::from(Line::styled(
            "No level-up moves",
            Style::default().fg(TEXT_DIM),
        ));
    }
    Text::from(
        moves
            .into_iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!("Lv. {:>3}  ", entry.level_learned_at),
                        Style::default().fg(ACCENT_GOLD),
                    ),
                    value(format!("{:<20}", format_name(&entry.name))),
                    label(entry.learn_method.as_deref().unwrap_or_default()),
                ])
            })
            .collect::<Vec<_>>(),
    )
}

fn history_text(entry: &EntryDetail) -> Text<'static> {
    let mut lines = Vec::new();
    for past in &entry.past_types {
        let types = past
            .types
            .iter()
            .map(|name| format_name(name))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(Line::from(vec![
            label(&format!("{}: ", format_name(&past.generation))),
            value(format!("types {types}")),
        ]));
    }
    for past in &entry.past_abilities {
        lines.push(Line::from(label(&format!(
            "{}: abilities",
            format_name(&past.generation)
        ))));
        lines.extend(past.abilities.iter().map(ability_line));
    }
    Text::from(lines)
}

fn render_sprite(frame: &mut Frame, area: Rect, state: &AppState, entry: &EntryDetail) {
    let title = match state.detail.current_sprite() {
        Some(variant) => format!(
            "Sprite: {} ({}/{})",
            format_name(&variant.key.replace('_', "-")),
            state.detail.sprite_index + 1,
            entry.sprites.len()
        ),
        None => "Sprite".to_string(),
    };
    let block = panel(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let placeholder =
        |text: &str| Text::from(Line::styled(text.to_string(), Style::default().fg(TEXT_DIM)));
    let text = match &state.detail.sprite {
        DataResource::Loaded(data) => {
            Text::from(sprite::half_block_lines(data, inner.width, inner.height))
        }
        DataResource::Loading => placeholder("Loading sprite..."),
        DataResource::Failed(_) => placeholder("Sprite unavailable"),
        DataResource::Empty => placeholder("No sprite"),
    };
    render_centered(frame, inner, text);
}
