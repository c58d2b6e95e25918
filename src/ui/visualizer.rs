/// Image visualizer (lightbox)
///
/// [`VisualizerProcessor`] tracks which image of a gallery list is shown;
/// [`VisualizerView`] is a projection of it drawn over the home view.
use iced::widget::image::Handle;
use iced::widget::{button, column, container, mouse_area, row, text, Space};
use iced::{Alignment, Background, Color, ContentFit, Element, Length, Theme};

use crate::state::data::Image;

const INFO_TEXT: &str = "Click outside the image to close the visualizer.";

/// Ordered image list plus the index of the image on display.
///
/// `index` is only meaningful while the list is non-empty. Navigation is
/// circular: it wraps around both ends and never leaves the list.
#[derive(Debug, Clone, Default)]
pub struct VisualizerProcessor {
    images: Vec<Image>,
    index: usize,
}

impl VisualizerProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tracked list. The index is left alone; call
    /// [`set`](Self::set) afterwards to reposition it.
    pub fn load(&mut self, images: Vec<Image>) {
        self.images = images;
    }

    /// Move to the first image named like `image`, or to the first image
    /// when no such name is in the list.
    pub fn set(&mut self, image: &Image) {
        self.index = self.index_of(image).unwrap_or(0);
    }

    pub fn index_of(&self, image: &Image) -> Option<usize> {
        self.images.iter().position(|candidate| candidate.name == image.name)
    }

    pub fn current_image(&self) -> Option<&Image> {
        self.images.get(self.index)
    }

    pub fn next(&mut self) {
        if self.images.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.images.len();
    }

    pub fn previous(&mut self) {
        let len = self.images.len();
        if len == 0 {
            return;
        }
        // A shorter list may have been loaded without a `set`
        self.index = (self.index.min(len - 1) + len - 1) % len;
    }

    pub fn is_first_image(&self) -> bool {
        !self.images.is_empty() && self.index == 0
    }

    pub fn is_last_image(&self) -> bool {
        !self.images.is_empty() && self.index == self.images.len() - 1
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Previous,
    Next,
    /// Press on the backdrop around the canvas
    BackgroundPressed,
    /// Press on the image or its caption; swallowed
    CanvasPressed,
    Close,
}

/// The on-screen overlay. Holds nothing the processor doesn't know,
/// apart from whether it is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizerView {
    visible: bool,
    source: String,
    caption: String,
    position: String,
}

impl VisualizerView {
    /// Build the overlay once, hidden, showing the processor's current image
    pub fn create(processor: &VisualizerProcessor) -> Self {
        let mut view = Self {
            visible: false,
            source: String::new(),
            caption: String::new(),
            position: String::new(),
        };
        view.update(processor);
        view
    }

    /// Refresh the displayed image and caption from the processor
    pub fn update(&mut self, processor: &VisualizerProcessor) {
        let current = processor.current_image();
        self.source = current.map(|image| image.path.clone()).unwrap_or_default();
        self.caption = current.map(|image| image.name.clone()).unwrap_or_default();
        self.position = if processor.is_empty() {
            String::new()
        } else {
            format!("{} / {}", processor.index() + 1, processor.len())
        };
    }

    /// Update the existing overlay, or create it if there is none yet
    pub fn render<'a>(
        handle: &'a mut Option<VisualizerView>,
        processor: &VisualizerProcessor,
    ) -> &'a mut VisualizerView {
        if let Some(view) = handle.as_mut() {
            view.update(processor);
        }
        handle.get_or_insert_with(|| Self::create(processor))
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the overlay; the processor keeps its position
    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Apply a user action. A hidden overlay ignores input.
    pub fn handle(&mut self, message: Message, processor: &mut VisualizerProcessor) {
        if !self.visible {
            return;
        }

        match message {
            Message::Previous => {
                processor.previous();
                self.update(processor);
            }
            Message::Next => {
                processor.next();
                self.update(processor);
            }
            Message::BackgroundPressed | Message::Close => self.close(),
            Message::CanvasPressed => {}
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let back = button(text("‹").size(64))
            .on_press(Message::Previous)
            .style(button::text);
        let next = button(text("›").size(64))
            .on_press(Message::Next)
            .style(button::text);

        let picture: Element<'_, Message> = if self.source.is_empty() {
            Space::new(Length::Fill, Length::Fill).into()
        } else {
            iced::widget::image(Handle::from_path(&self.source))
                .content_fit(ContentFit::Contain)
                .height(Length::Fill)
                .into()
        };

        // The canvas swallows presses so they never reach the backdrop
        let canvas = mouse_area(
            column![
                picture,
                text(&self.caption).size(32),
                text(&self.position).size(14),
            ]
            .spacing(12)
            .align_x(Alignment::Center),
        )
        .on_press(Message::CanvasPressed);

        let layer = column![
            row![back, container(canvas).center(Length::Fill), next]
                .spacing(16)
                .align_y(Alignment::Center)
                .height(Length::Fill),
            text(INFO_TEXT).size(14),
        ]
        .spacing(8)
        .padding(24)
        .align_x(Alignment::Center);

        mouse_area(
            container(layer)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(backdrop),
        )
        .on_press(Message::BackgroundPressed)
        .into()
    }
}

fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.92))),
        text_color: Some(Color::WHITE),
        ..container::Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::image;

    fn abc() -> Vec<Image> {
        vec![image(1, "A"), image(2, "B"), image(3, "C")]
    }

    fn loaded() -> VisualizerProcessor {
        let mut processor = VisualizerProcessor::new();
        processor.load(abc());
        processor
    }

    #[test]
    fn test_next_then_previous_returns_to_start() {
        let mut processor = loaded();
        processor.set(&image(0, "B"));

        for _ in 0..7 {
            processor.next();
        }
        for _ in 0..7 {
            processor.previous();
        }
        assert_eq!(processor.index(), 1);
    }

    #[test]
    fn test_navigation_wraps_at_both_ends() {
        let mut processor = loaded();
        processor.set(&image(0, "A"));
        processor.previous();
        assert_eq!(processor.index(), 2);
        assert!(processor.is_last_image());

        processor.next();
        assert_eq!(processor.index(), 0);
        assert!(processor.is_first_image());
    }

    #[test]
    fn test_set_then_next() {
        let mut processor = loaded();
        processor.set(&image(0, "B"));
        processor.next();
        assert_eq!(processor.current_image().map(|i| i.name.as_str()), Some("C"));

        processor.set(&image(0, "C"));
        processor.next();
        assert_eq!(processor.current_image().map(|i| i.name.as_str()), Some("A"));
    }

    #[test]
    fn test_set_missing_image_falls_back_to_first() {
        let mut processor = loaded();
        processor.set(&image(0, "C"));
        processor.set(&image(0, "Z"));
        assert_eq!(processor.index(), 0);
        assert_eq!(processor.index_of(&image(0, "Z")), None);
        assert_eq!(processor.index_of(&image(0, "C")), Some(2));
    }

    #[test]
    fn test_empty_list_is_inert() {
        let mut processor = VisualizerProcessor::new();
        processor.load(Vec::new());
        processor.next();
        processor.previous();

        assert!(processor.current_image().is_none());
        assert!(!processor.is_first_image());
        assert!(!processor.is_last_image());
        assert_eq!(processor.index(), 0);
    }

    #[test]
    fn test_navigation_after_loading_a_shorter_list_stays_in_range() {
        let six: Vec<Image> = (0..6).map(|i| image(i, &format!("n{i}"))).collect();

        let mut processor = VisualizerProcessor::new();
        processor.load(six.clone());
        processor.set(&image(0, "n5"));
        processor.load(abc());
        processor.previous();
        assert!(processor.index() < processor.len());
        assert_eq!(processor.current_image().map(|i| i.name.as_str()), Some("B"));

        processor.load(six);
        processor.set(&image(0, "n5"));
        processor.load(abc());
        processor.next();
        assert!(processor.index() < processor.len());
        assert_eq!(processor.current_image().map(|i| i.name.as_str()), Some("A"));
    }

    #[test]
    fn test_render_creates_once_then_updates() {
        let mut processor = loaded();
        processor.set(&image(0, "B"));

        let mut handle = None;
        let view = VisualizerView::render(&mut handle, &processor);
        assert!(!view.is_visible());
        assert_eq!(view.caption(), "B");
        view.show();

        processor.next();
        let view = VisualizerView::render(&mut handle, &processor);
        assert!(view.is_visible());
        assert_eq!(view.caption(), "C");
        assert_eq!(view.source(), "/art/C.png");
    }

    #[test]
    fn test_view_of_empty_processor_is_blank() {
        let view = VisualizerView::create(&VisualizerProcessor::new());
        assert_eq!(view.source(), "");
        assert_eq!(view.caption(), "");
    }

    #[test]
    fn test_buttons_navigate_and_backdrop_closes() {
        let mut processor = loaded();
        processor.set(&image(0, "A"));
        let mut view = VisualizerView::create(&processor);
        view.show();

        view.handle(Message::Previous, &mut processor);
        assert_eq!(view.caption(), "C");

        view.handle(Message::CanvasPressed, &mut processor);
        assert!(view.is_visible());

        view.handle(Message::BackgroundPressed, &mut processor);
        assert!(!view.is_visible());
        assert_eq!(processor.index(), 2);

        view.handle(Message::Next, &mut processor);
        assert_eq!(processor.index(), 2, "hidden overlay ignores input");
    }
}
