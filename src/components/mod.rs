pub mod catalog_view;
pub mod detail_view;
pub mod page_jump;
pub mod search_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use catalog_view::{CatalogView, CatalogViewProps};
pub use detail_view::{DetailView, DetailViewProps};
pub use page_jump::{PageJumpModal, PageJumpProps};
pub use search_bar::{SearchBar, SearchBarProps};

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::Frame;
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use crate::action::Action;

pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub const BG_INPUT: Color = Color::Rgb(50, 50, 60);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub const ACCENT_RED: Color = Color::Rgb(224, 96, 96);

pub(crate) fn title_style() -> Style {
    Style::default()
        .fg(ACCENT_TEAL)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(TEXT_DIM))
}

pub(crate) fn value(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(TEXT_MAIN))
}

pub(crate) fn status_bar_style() -> StatusBarStyle {
    StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: ratatui::widgets::Borders::TOP,
                style: Style::default().fg(TEXT_DIM),
                focused_style: None,
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    }
}

/// Status text: the last error/notice, else a loading note.
pub(crate) fn status_span(message: Option<&str>, fallback: &str) -> Span<'static> {
    match message {
        Some(message) => Span::styled(message.to_string(), Style::default().fg(ACCENT_RED)),
        None => Span::styled(fallback.to_string(), Style::default().fg(ACCENT_GOLD)),
    }
}

pub(crate) fn quit_hint() -> StatusBarHint<'static> {
    StatusBarHint::new("q", "Quit")
}

pub(crate) fn render_footer(
    frame: &mut Frame,
    area: Rect,
    hints: &[StatusBarHint<'_>],
    status: Span<'static>,
) {
    let status_items = [StatusBarItem::span(status)];
    let mut status_bar = StatusBar::new();
    <StatusBar as Component<Action>>::render(
        &mut status_bar,
        frame,
        area,
        StatusBarProps {
            left: StatusBarSection::hints(hints).with_separator("  "),
            center: StatusBarSection::empty(),
            right: StatusBarSection::items(&status_items),
            style: status_bar_style(),
            is_focused: false,
        },
    );
}
