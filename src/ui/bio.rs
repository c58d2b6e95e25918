/// Bio page: who the artist is and where to find them
use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};

use super::social::display_name;
use crate::config::{AppConfig, SocialLink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Home,
    LinkPressed(String),
}

fn contact_box(link: &SocialLink) -> Element<'_, Message> {
    button(
        row![
            text(display_name(&link.name)).size(18),
            text(&link.handle).size(18),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .on_press(Message::LinkPressed(link.url.clone()))
    .style(button::secondary)
    .padding(12)
    .width(Length::Fixed(320.0))
    .into()
}

pub fn view(config: &AppConfig) -> Element<'_, Message> {
    let mut page = Column::new()
        .spacing(20)
        .padding(40)
        .align_x(Alignment::Center)
        .width(Length::Fill);

    if let Some(logo) = &config.logo_path {
        page = page.push(
            iced::widget::image(Handle::from_path(logo))
                .width(Length::Fixed(160.0))
                .height(Length::Fixed(160.0)),
        );
    }

    page = page.push(text(&config.title).size(48));

    if !config.bio.is_empty() {
        page = page.push(container(text(&config.bio).size(16)).max_width(640.0));
    }

    let contacts = config
        .social
        .iter()
        .fold(column![].spacing(8), |contacts, link| contacts.push(contact_box(link)));

    page = page
        .push(contacts)
        .push(button("Back to the gallery").on_press(Message::Home).padding(10));

    scrollable(page).into()
}
