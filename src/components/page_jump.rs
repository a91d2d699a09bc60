use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, TextInput,
    TextInputProps, TextInputStyle,
};

use super::{Component, BG_INPUT, BG_PANEL, TEXT_DIM};
use crate::action::Action;

/// "Go to page" dialog.
pub struct PageJumpModal {
    input: TextInput,
    modal: Modal,
    was_open: bool,
}

pub struct PageJumpProps<'a> {
    pub input: &'a str,
    pub total_pages: u32,
    pub is_focused: bool,
}

impl Default for PageJumpModal {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            modal: Modal::new(),
            was_open: false,
        }
    }
}

impl PageJumpModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.input = TextInput::new();
        }
        self.was_open = is_open;
    }

    pub fn area(area: Rect) -> Rect {
        centered_rect(40, 7, area)
    }
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(BG_INPUT),
            fg: None,
        },
        placeholder_style: None,
        cursor_style: None,
    }
}

impl Component<Action> for PageJumpModal {
    type Props<'a> = PageJumpProps<'a>;

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
            KeyCode::Esc => vec![Action::PageJumpClose],
            KeyCode::Enter => vec![Action::PageJumpSubmit(props.input.to_string())],
            _ => {
                let input_props = TextInputProps {
                    value: props.input,
                    placeholder: "page number",
                    is_focused: true,
                    style: input_style(),
                    on_change: Action::PageJumpInput,
                    on_submit: Action::PageJumpSubmit,
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
        let PageJumpModal { input, modal, .. } = self;
        let prompt = format!("Go to page (1 - {})", props.total_pages);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // Prompt
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Input
            ])
            .split(content_area);
            frame.render_widget(
                Paragraph::new(Line::styled(prompt.as_str(), Style::default().fg(TEXT_DIM))),
                chunks[0],
            );
            let input_props = TextInputProps {
                value: props.input,
                placeholder: "page number",
                is_focused: props.is_focused,
                style: input_style(),
                on_change: Action::PageJumpInput,
                on_submit: Action::PageJumpSubmit,
                on_cursor_move: Some(|_| Action::Render),
            };
            input.render(frame, chunks[2], input_props);
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: Self::area(area),
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(BG_PANEL),
                        padding: Padding::all(1),
                        border: None,
                        fg: Some(Color::Reset),
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::PageJumpClose,
                render_content: &mut render_content,
            },
        );
    }
}
