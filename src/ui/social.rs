/// Social media link bar
use iced::widget::{button, row, text};
use iced::{Alignment, Element};

use crate::config::SocialLink;
use crate::error::{GalleryError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    LinkPressed(String),
}

#[derive(Debug, Clone, Default)]
pub struct SocialMediaBar {
    links: Vec<SocialLink>,
}

impl SocialMediaBar {
    pub fn new(links: Vec<SocialLink>) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &[SocialLink] {
        &self.links
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.links
            .iter()
            .fold(row![].spacing(8).align_y(Alignment::Center), |bar, link| {
                bar.push(
                    button(text(display_name(&link.name)).size(14))
                        .on_press(Message::LinkPressed(link.url.clone()))
                        .style(button::secondary),
                )
            })
            .into()
    }
}

/// "instagram" -> "Instagram"
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Open `url` in the system browser
pub fn open_link(url: &str) -> Result<()> {
    log::info!("Opening {}", url);
    open::that(url).map_err(|source| GalleryError::OpenLink {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("patreon"), "Patreon");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_bar_keeps_configured_order() {
        let links = crate::config::AppConfig::default().social;
        let bar = SocialMediaBar::new(links);
        let names: Vec<&str> = bar.links().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["twitter", "instagram", "telegram", "patreon"]);
    }
}
