/// Thumbnail grid of one project's images
use iced::widget::image::Handle;
use iced::widget::{button, container, text};
use iced::{ContentFit, Element, Length};
use iced_aw::Wrap;

use super::context::ViewContext;
use crate::state::data::{Image, ImageSelection};

/// Edge length of a grid tile in logical pixels
const TILE_SIZE: f32 = 220.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    ImagePressed(String),
}

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    images: Vec<Image>,
}

impl Gallery {
    pub fn new(images: Vec<Image>) -> Self {
        Self { images }
    }

    /// Swap in another project's images
    pub fn update(&mut self, images: Vec<Image>) {
        self.images = images;
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// Announce that the image called `name` was picked, along with the
    /// whole list it belongs to. Returns `false` if no such image is shown.
    pub fn select(&self, name: &str, ctx: &mut ViewContext) -> bool {
        let Some(selected) = self.images.iter().find(|image| image.name == name) else {
            log::warn!("Image {} is not in the gallery", name);
            return false;
        };

        ctx.signals.image_selected.emit(&ImageSelection {
            images: self.images.clone(),
            selected: selected.clone(),
        });
        true
    }

    pub fn view(&self) -> Element<'_, Message> {
        if self.images.is_empty() {
            return container(text("This project has no images yet.").size(18))
                .padding(24)
                .into();
        }

        let tiles: Vec<Element<'_, Message>> = self
            .images
            .iter()
            .map(|image| {
                button(
                    iced::widget::image(Handle::from_path(image.tile_source()))
                        .content_fit(ContentFit::Cover)
                        .width(Length::Fixed(TILE_SIZE))
                        .height(Length::Fixed(TILE_SIZE)),
                )
                .padding(0)
                .style(button::text)
                .on_press(Message::ImagePressed(image.name.clone()))
                .into()
            })
            .collect();

        Wrap::with_elements(tiles)
            .spacing(12.0)
            .line_spacing(12.0)
            .into()
    }
}
