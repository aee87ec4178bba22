use std::sync::Arc;

use common::{
    form::{self, FormState},
    network::NetworkClient,
};
use iced::{Border, Font, Length, Theme, font::Weight, widget};

use super::{Msg, QuarterChoice};

/// The publication export form.
///
/// The submit button stays enabled while a request is in flight, so a second
/// press sends a second request and the later response overwrites the result.
#[derive(Debug)]
pub struct SubmissionForm {
    state: FormState,
    network: Arc<NetworkClient>,
}

impl SubmissionForm {
    pub fn new(network: Arc<NetworkClient>) -> Self {
        Self {
            state: FormState::new(),
            network,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn update(&mut self, msg: Msg) -> iced::Task<Msg> {
        match msg {
            Msg::PublicationYear(s) => {
                self.state.on_publication_year_change(&s);
                iced::Task::none()
            }
            Msg::SearchType(s) => {
                self.state.on_search_type_change(&s);
                iced::Task::none()
            }
            Msg::SelectQuarter(choice) => {
                self.state.on_quarter_change(choice.as_str());
                iced::Task::none()
            }
            Msg::Submit => {
                let request = self.state.begin_submit();
                let network = self.network.clone();
                iced::Task::perform(
                    async move { form::dispatch(network.as_ref(), request).await },
                    Msg::Settled,
                )
            }
            Msg::Settled(outcome) => {
                self.state.settle(outcome);
                iced::Task::none()
            }
        }
    }

    pub fn view(&self) -> iced::Element<'_, Msg> {
        let mut details = widget::column![];
        if self.state.shows_quarter_selector() {
            details = details.push(
                widget::pick_list(
                    QuarterChoice::ALL,
                    Some(QuarterChoice::from_form(&self.state.quarter)),
                    Msg::SelectQuarter,
                )
                .width(Length::Fill),
            );
        }

        let mut result = widget::column![self.status()].spacing(4.0);
        if !self.state.is_loading && !self.state.download_url.is_empty() {
            result = result.push(widget::text(format!(
                "Download link: {}",
                self.state.download_url
            )));
        }

        widget::container(
            widget::column![
                label("Publication Year"),
                widget::text_input("Enter year", &self.state.publication_year)
                    .on_input(Msg::PublicationYear)
                    .on_submit(Msg::Submit),
                widget::space::vertical().height(8.0),
                label("Is this search annual (A) or quarterly (Q)?"),
                widget::text_input("Enter A or Q", &self.state.search_type)
                    .on_input(Msg::SearchType)
                    .on_submit(Msg::Submit),
                widget::space::vertical().height(8.0),
                details,
                widget::button("Submit").on_press(Msg::Submit),
                widget::rule::horizontal(4.0),
                result,
            ]
            .spacing(8.0),
        )
        .style(|theme: &Theme| {
            let palette = theme.extended_palette();
            widget::container::Style {
                text_color: Some(palette.background.weak.text),
                background: Some(palette.background.weak.color.into()),
                border: Border::default().rounded(8.0),
                ..Default::default()
            }
        })
        .width(Length::Fixed(480.0))
        .padding(16.0)
        .into()
    }

    fn status(&self) -> widget::Text<'_> {
        if self.state.is_loading {
            return label(self.state.status_text());
        }
        let is_error = self.state.is_error;
        widget::text(self.state.status_text()).style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            widget::text::Style {
                color: if is_error {
                    palette.danger.base.color
                } else {
                    palette.success.base.color
                }
                .into(),
            }
        })
    }
}

fn label(text: &str) -> widget::Text<'_> {
    let mut bold = Font::DEFAULT;
    bold.weight = Weight::Bold;
    widget::text(text).font(bold).style(|theme: &Theme| {
        let palette = theme.extended_palette();
        widget::text::Style {
            color: palette.primary.strong.color.into(),
        }
    })
}
