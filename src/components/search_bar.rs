use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::{Component, BG_INPUT};
use crate::action::Action;

const PLACEHOLDER: &str = "Search Pokemon on this page... (/)";

/// Name filter input over the held page.
pub struct SearchBar {
    input: TextInput,
    was_active: bool,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            was_active: false,
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the cursor state in step with search mode toggles.
    pub fn set_active(&mut self, active: bool) {
        if active && !self.was_active {
            self.input = TextInput::new();
        }
        self.was_active = active;
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Esc => vec![Action::SearchCancel],
            KeyCode::Enter => vec![Action::SearchSubmit(props.query.to_string())],
            _ => {
                let input_props = TextInputProps {
                    value: props.query,
                    placeholder: PLACEHOLDER,
                    is_focused: true,
                    style: input_style(),
                    on_change: Action::SearchQueryChange,
                    on_submit: Action::SearchSubmit,
                    on_cursor_move: Some(|_| Action::Render),
                };
                self.input
                    .handle_event(event, input_props)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(),
            on_change: Action::SearchQueryChange,
            on_submit: Action::SearchSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, area, input_props);
    }
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(BG_INPUT),
            fg: Some(Color::Reset),
        },
        placeholder_style: Some(Style::default().fg(Color::DarkGray)),
        cursor_style: None,
    }
}
