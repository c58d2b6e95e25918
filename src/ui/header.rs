/// Site header: logo, title and the category menu
use iced::widget::image::Handle;
use iced::widget::{button, column, mouse_area, text, Column};
use iced::{Alignment, Element, Length};
use std::path::PathBuf;

use super::context::ViewContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    OptionPressed(String),
    /// Logo or title pressed
    LogoPressed,
}

#[derive(Debug, Clone)]
pub struct Header {
    title: String,
    logo: Option<PathBuf>,
    options: Vec<String>,
    selected: Option<String>,
    toggle_enabled: bool,
    hidden: bool,
}

impl Header {
    /// Build the header for `options` with nothing selected yet.
    ///
    /// Any handler still connected to the option-selected signal belongs
    /// to a previous header and is dropped.
    pub fn new(
        options: Vec<String>,
        title: String,
        logo: Option<PathBuf>,
        ctx: &mut ViewContext,
    ) -> Self {
        ctx.signals.option_selected.disconnect_all();

        Self {
            title,
            logo,
            options,
            selected: None,
            toggle_enabled: ctx.toggle_enabled(),
            hidden: false,
        }
    }

    /// Handle a press on a category button and announce the selection.
    /// Returns `false` when the press was ignored.
    pub fn press_option(&mut self, option: String, ctx: &mut ViewContext) -> bool {
        if !self.toggle_enabled && self.selected.as_ref() == Some(&option) {
            return false;
        }

        self.selected = Some(option.clone());
        self.toggle();
        ctx.signals.option_selected.emit(&option);
        true
    }

    /// Mark `option` as selected without announcing it
    pub fn select(&mut self, option: &str) {
        if self.options.iter().any(|o| o == option) {
            self.selected = Some(option.to_string());
        }
    }

    /// Replace the category list, dropping a selection that disappeared
    pub fn set_options(&mut self, options: Vec<String>) {
        if self
            .selected
            .as_ref()
            .is_some_and(|selected| !options.contains(selected))
        {
            self.selected = None;
        }
        self.options = options;
    }

    /// Fold or unfold the header; only compact layouts fold
    pub fn toggle(&mut self) {
        if !self.toggle_enabled {
            return;
        }
        self.hidden = !self.hidden;
    }

    pub fn set_toggle_enabled(&mut self, enabled: bool) {
        self.toggle_enabled = enabled;
        if !enabled {
            self.hidden = false;
        }
    }

    pub fn toggle_enabled(&self) -> bool {
        self.toggle_enabled
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut header = Column::new()
            .spacing(16)
            .padding(24)
            .align_x(Alignment::Start)
            .width(Length::Fill);

        if let Some(logo) = &self.logo {
            header = header.push(
                mouse_area(
                    iced::widget::image(Handle::from_path(logo))
                        .width(Length::Fixed(128.0))
                        .height(Length::Fixed(128.0)),
                )
                .on_press(Message::LogoPressed),
            );
        }

        header = header.push(mouse_area(text(&self.title).size(40)).on_press(Message::LogoPressed));

        let menu = self.options.iter().fold(column![].spacing(4), |menu, option| {
            let style = if self.selected.as_ref() == Some(option) {
                button::primary
            } else {
                button::text
            };
            menu.push(
                button(text(option).size(18))
                    .on_press(Message::OptionPressed(option.clone()))
                    .style(style)
                    .width(Length::Fill),
            )
        });

        header.push(menu).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayMode;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn options() -> Vec<String> {
        vec!["Sketches".to_string(), "Paintings".to_string()]
    }

    fn recorder(ctx: &mut ViewContext) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        ctx.signals
            .option_selected
            .connect(move |option: &String| sink.borrow_mut().push(option.clone()));
        seen
    }

    #[test]
    fn test_nothing_starts_selected() {
        let mut ctx = ViewContext::new(DisplayMode::Desktop);
        let header = Header::new(options(), "Skylerie".into(), None, &mut ctx);
        assert_eq!(header.selected(), None);
    }

    #[test]
    fn test_new_header_drops_old_handlers() {
        let mut ctx = ViewContext::new(DisplayMode::Desktop);
        recorder(&mut ctx);
        Header::new(options(), "Skylerie".into(), None, &mut ctx);
        assert_eq!(ctx.signals.option_selected.handler_count(), 0);
    }

    #[test]
    fn test_pressing_selected_option_is_ignored_on_desktop() {
        let mut ctx = ViewContext::new(DisplayMode::Desktop);
        let mut header = Header::new(options(), "Skylerie".into(), None, &mut ctx);
        let seen = recorder(&mut ctx);

        assert!(header.press_option("Paintings".into(), &mut ctx));
        assert!(!header.press_option("Paintings".into(), &mut ctx));
        assert_eq!(header.selected(), Some("Paintings"));
        assert!(!header.is_hidden());
        assert_eq!(*seen.borrow(), vec!["Paintings"]);
    }

    #[test]
    fn test_compact_header_folds_after_selection() {
        let mut ctx = ViewContext::new(DisplayMode::Compact);
        let mut header = Header::new(options(), "Skylerie".into(), None, &mut ctx);
        let seen = recorder(&mut ctx);

        assert!(header.press_option("Sketches".into(), &mut ctx));
        assert!(header.is_hidden());
        assert_eq!(*seen.borrow(), vec!["Sketches"]);

        header.toggle();
        assert!(!header.is_hidden());

        header.toggle();
        header.set_toggle_enabled(false);
        assert!(!header.is_hidden());
    }

    #[test]
    fn test_select_ignores_unknown_option() {
        let mut ctx = ViewContext::new(DisplayMode::Desktop);
        let mut header = Header::new(options(), "Skylerie".into(), None, &mut ctx);
        header.select("Sculpture");
        assert_eq!(header.selected(), None);
        header.select("Paintings");
        assert_eq!(header.selected(), Some("Paintings"));
    }

    #[test]
    fn test_set_options_keeps_surviving_selection() {
        let mut ctx = ViewContext::new(DisplayMode::Desktop);
        let mut header = Header::new(options(), "Skylerie".into(), None, &mut ctx);
        header.select("Paintings");

        header.set_options(vec!["Paintings".into(), "Prints".into()]);
        assert_eq!(header.selected(), Some("Paintings"));

        header.set_options(vec!["Prints".into()]);
        assert_eq!(header.selected(), None);
        assert_eq!(header.options(), ["Prints".to_string()]);
    }
}
