//! List screen: header with counts, the name filter, the page of entries
//! and the range/status footer.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    highlight_substring, BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle, StatusBarHint,
};

use super::{
    label, quit_hint, render_footer, status_span, title_style, value, Component, SearchBar,
    SearchBarProps, ACCENT_GOLD, ACCENT_TEAL, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::catalog;
use crate::display::{format_dex_number, format_name, spinner};
use crate::state::AppState;

pub const EMPTY_SEARCH_MESSAGE: &str = "No Pokemon found matching your search.";
pub const EMPTY_PAGE_MESSAGE: &str = "No Pokemon found.";

pub struct CatalogViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Areas of the last render, for mouse routing.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatalogAreas {
    pub search: Rect,
    pub list: Rect,
}

#[derive(Default)]
pub struct CatalogView {
    list: SelectList,
    search: SearchBar,
    areas: CatalogAreas,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn areas(&self) -> CatalogAreas {
        self.areas
    }

    /// Keys while the search input has focus.
    pub fn handle_search_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        self.search.set_active(state.search.active);
        self.search
            .handle_event(
                event,
                SearchBarProps {
                    query: &state.search.query,
                    is_focused: state.search.active,
                },
            )
            .into_iter()
            .collect()
    }
}

fn entry_items(state: &AppState) -> Vec<Line<'static>> {
    let base = Style::default().fg(TEXT_MAIN);
    let highlight = Style::default()
        .fg(ACCENT_GOLD)
        .add_modifier(Modifier::BOLD);
    state
        .catalog
        .visible()
        .map(|entry| {
            let mut line = highlight_substring(
                &format_name(&entry.name),
                &state.search.query,
                base,
                highlight,
            );
            line.spans.insert(
                0,
                Span::styled(
                    format!("{:<7}", format_dex_number(&entry.id())),
                    Style::default().fg(TEXT_DIM),
                ),
            );
            line
        })
        .collect()
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn header_line(state: &AppState) -> Line<'static> {
    let catalog = &state.catalog;
    let mut spans = vec![
        label("Total: "),
        Span::styled(catalog.total_count.to_string(), Style::default().fg(ACCENT_TEAL)),
        label("  |  "),
        label("Page "),
        value(catalog.page.to_string()),
        label(" of "),
        value(catalog.total_pages().to_string()),
    ];
    if !state.search.query.is_empty() {
        spans.push(label("  |  Found: "));
        spans.push(Span::styled(
            format!("{} results", catalog.filtered.len()),
            Style::default().fg(ACCENT_GOLD),
        ));
    }
    Line::from(spans)
}

fn range_line(state: &AppState) -> Line<'static> {
    let total = state.catalog.total_count;
    let Some((first, last)) = catalog::page_range(state.catalog.page, total) else {
        return Line::default();
    };
    Line::styled(
        format!("Showing {first} - {last} of {total}"),
        Style::default().fg(TEXT_DIM),
    )
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.search.active {
        return vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Clear"),
        ];
    }
    vec![
        StatusBarHint::new("Enter", "Open"),
        StatusBarHint::new("/", "Search"),
        StatusBarHint::new("h/l", "Page"),
        StatusBarHint::new("g/G", "First/Last"),
        StatusBarHint::new(":", "Go to"),
        StatusBarHint::new("r", "Reload"),
        quit_hint(),
    ]
}

impl Component<Action> for CatalogView {
    type Props<'a> = CatalogViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let state = props.state;
        let selected = state.catalog.selected;
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('q') => vec![Action::Quit],
                KeyCode::Char('/') => vec![Action::SearchStart],
                KeyCode::Esc if !state.search.query.is_empty() => vec![Action::SearchCancel],
                KeyCode::Enter if state.catalog.loading => Vec::new(),
                KeyCode::Enter => state
                    .catalog
                    .selected_entry()
                    .map(|entry| vec![Action::DetailOpen(entry.id())])
                    .unwrap_or_default(),
                KeyCode::Char('h') | KeyCode::Left => vec![Action::PagePrev],
                KeyCode::Char('l') | KeyCode::Right => vec![Action::PageNext],
                KeyCode::Char('g') => vec![Action::PageFirst],
                KeyCode::Char('G') => vec![Action::PageLast],
                KeyCode::Char(':') => vec![Action::PageJumpOpen],
                KeyCode::Char('r') | KeyCode::F(5) => vec![Action::CatalogFetch],
                KeyCode::Char('j') | KeyCode::Down => vec![Action::CatalogSelect(selected + 1)],
                KeyCode::Char('k') | KeyCode::Up => {
                    vec![Action::CatalogSelect(selected.saturating_sub(1))]
                }
                _ => {
                    let items = entry_items(state);
                    let list_props = SelectListProps {
                        items: &items,
                        count: items.len(),
                        selected: selected.min(items.len().saturating_sub(1)),
                        is_focused: true,
                        style: list_style(),
                        behavior: SelectListBehavior {
                            show_scrollbar: true,
                            wrap_navigation: false,
                        },
                        on_select: Action::CatalogSelect,
                        render_item: &|item| item.clone(),
                    };
                    self.list.handle_event(event, list_props).into_iter().collect()
                }
            },
            EventKind::Scroll { delta, .. } => {
                let next = (selected as isize + *delta as isize * 3).max(0);
                vec![Action::CatalogSelect(next as usize)]
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Search
            Constraint::Min(3),    // Entries
            Constraint::Length(1), // Range
            Constraint::Length(2), // Status
        ])
        .split(area);

        let header = Paragraph::new(header_line(state)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled("POKEDEX", title_style()))
                .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
                .border_style(Style::default().fg(TEXT_DIM)),
        );
        frame.render_widget(header, chunks[0]);

        self.search.set_active(state.search.active);
        self.search.render(
            frame,
            chunks[1],
            SearchBarProps {
                query: &state.search.query,
                is_focused: state.search.active,
            },
        );

        let mut title = format!("Page {}", state.catalog.page);
        if state.catalog.loading {
            title.push_str(&format!(" {}", spinner(state.tick)));
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(if props.is_focused {
                ACCENT_TEAL
            } else {
                TEXT_DIM
            }));
        let inner = block.inner(chunks[2]);
        frame.render_widget(block, chunks[2]);
        self.areas = CatalogAreas {
            search: chunks[1],
            list: inner,
        };

        // Held entries belong to the previous page until the load lands
        if state.catalog.loading || state.catalog.filtered.is_empty() {
            let message = if state.catalog.loading {
                format!("Loading Pokemon... {}", spinner(state.tick))
            } else if state.search.query.is_empty() {
                EMPTY_PAGE_MESSAGE.to_string()
            } else {
                EMPTY_SEARCH_MESSAGE.to_string()
            };
            frame.render_widget(
                Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                inner,
            );
        } else {
            let items = entry_items(state);
            let list_props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: state.catalog.selected.min(items.len().saturating_sub(1)),
                is_focused: props.is_focused,
                style: list_style(),
                behavior: SelectListBehavior {
                    show_scrollbar: true,
                    wrap_navigation: false,
                },
                on_select: Action::CatalogSelect,
                render_item: &|item| item.clone(),
            };
            self.list.render(frame, inner, list_props);
        }

        frame.render_widget(
            Paragraph::new(range_line(state)).alignment(Alignment::Center),
            chunks[3],
        );

        let fallback = if state.catalog.loading {
            format!("Loading page {}...", state.catalog.page)
        } else {
            String::new()
        };
        render_footer(
            frame,
            chunks[4],
            &status_hints(state),
            status_span(state.message.as_deref(), &fallback),
        );
    }
}
