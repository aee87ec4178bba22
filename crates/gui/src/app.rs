use std::sync::Arc;

use common::network::NetworkClient;
use iced::{Alignment, Length, widget};

use crate::submission::{Msg, widget::SubmissionForm};

#[derive(Debug)]
pub struct App {
    pub dark_mode: bool,
    form: SubmissionForm,
}

impl App {
    pub fn new(network: Arc<NetworkClient>, dark_mode: bool) -> Self {
        Self {
            dark_mode,
            form: SubmissionForm::new(network),
        }
    }

    pub fn update(&mut self, message: AppMessage) -> iced::Task<AppMessage> {
        match message {
            AppMessage::Form(msg) => self.form.update(msg).map(AppMessage::Form),
            AppMessage::ToggleTheme => {
                self.dark_mode = !self.dark_mode;
                iced::Task::none()
            }
        }
    }

    pub fn view(&self) -> iced::Element<'_, AppMessage> {
        widget::column![
            widget::row![
                widget::space::horizontal(),
                widget::text("Dark mode"),
                widget::toggler(self.dark_mode).on_toggle(|_| AppMessage::ToggleTheme),
            ]
            .spacing(8.0)
            .align_y(Alignment::Center),
            widget::container(self.form.view().map(AppMessage::Form)).center_x(Length::Fill),
        ]
        .spacing(16.0)
        .padding(16.0)
        .into()
    }
}

#[derive(Debug, Clone)]
pub enum AppMessage {
    Form(Msg),
    ToggleTheme,
}
