use iced::widget::{button, column, container, text};
use iced::{Alignment, Element, Length};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Home,
}

pub fn view(path: &str) -> Element<'_, Message> {
    let content = column![
        text("404").size(64),
        text(format!("Nothing lives at \"{path}\".")).size(18),
        button("Back to the gallery").on_press(Message::Home).padding(10),
    ]
    .spacing(20)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
