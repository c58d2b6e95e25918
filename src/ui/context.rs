use crate::display::DisplayMode;
use crate::signal::Signal;
use crate::state::data::{ImageSelection, ProjectSelection};

/// The channels that connect the header, the gallery and the home view
#[derive(Debug)]
pub struct Signals {
    /// A header category was chosen; carries the category name
    pub option_selected: Signal<String>,
    /// A project button was pressed in the project bar
    pub project_selected: Signal<ProjectSelection>,
    /// A gallery tile was pressed
    pub image_selected: Signal<ImageSelection>,
}

impl Signals {
    pub fn new() -> Self {
        Self {
            option_selected: Signal::new("option-selected"),
            project_selected: Signal::new("project-selected"),
            image_selected: Signal::new("image-selected"),
        }
    }
}

impl Default for Signals {
    fn default() -> Self {
        Self::new()
    }
}

/// State shared by every view, passed explicitly into component updates
#[derive(Debug, Default)]
pub struct ViewContext {
    pub signals: Signals,
    pub display: DisplayMode,
}

impl ViewContext {
    pub fn new(display: DisplayMode) -> Self {
        Self {
            signals: Signals::new(),
            display,
        }
    }

    /// Compact layouts fold the header away after each selection
    pub fn toggle_enabled(&self) -> bool {
        self.display.is_compact()
    }
}
