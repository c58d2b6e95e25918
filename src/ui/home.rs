/// Home view: header, project gallery and visualizer
///
/// The header, the project bar and the gallery never call into the home
/// view directly. They emit on the signals in [`ViewContext`]; the handlers
/// connected here queue the work in a mailbox, which is drained right after
/// each emit.
use iced::widget::{button, column, container, horizontal_space, row, scrollable, stack, text, Space};
use iced::{Alignment, Element, Length, Task};
use iced_aw::Wrap;
use std::time::Duration;

use super::context::ViewContext;
use super::gallery::{self, Gallery};
use super::header::{self, Header};
use super::social::{self, SocialMediaBar};
use super::visualizer::{self, VisualizerProcessor, VisualizerView};
use crate::config::AppConfig;
use crate::display::DisplayMode;
use crate::router::Route;
use crate::signal::Mailbox;
use crate::state::catalog::ImageCatalog;
use crate::state::data::{ImageSelection, ProjectSelection};

/// How long the gallery stays blank before a new category appears
const FADE_OUT: Duration = Duration::from_millis(500);

const HEADER_WIDTH: f32 = 280.0;

/// A category (and optionally a project) to put in the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowRequest {
    pub category: String,
    pub project: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Header(header::Message),
    Gallery(gallery::Message),
    Visualizer(visualizer::Message),
    Social(social::Message),
    ProjectPressed(String),
    /// Menu button of the compact title bar
    MenuPressed,
    FadeElapsed(ShowRequest),
}

/// Work queued by signal handlers
#[derive(Debug)]
enum Pending {
    ShowImages(ShowRequest),
    OpenVisualizer(ImageSelection),
}

/// What the application should do after a home update
pub enum Action {
    None,
    Run(Task<Message>),
    Navigate(Route),
    OpenLink(String),
}

pub struct HomeView {
    header: Header,
    social: SocialMediaBar,
    gallery: Option<Gallery>,
    processor: VisualizerProcessor,
    visualizer: Option<VisualizerView>,
    pending: Mailbox<Pending>,
    projects: Vec<String>,
    current_category: Option<String>,
    current_project: Option<String>,
    fading: bool,
}

impl HomeView {
    /// Build the home view and connect it to the signals in `ctx`.
    ///
    /// `category` (from the route) picks the initial category, defaulting
    /// to the first one. Compact layouts wait for the user to pick.
    pub fn new(
        catalog: &dyn ImageCatalog,
        config: &AppConfig,
        category: Option<String>,
        ctx: &mut ViewContext,
    ) -> (Self, Task<Message>) {
        let categories = catalog.categories().unwrap_or_else(|err| {
            log::error!("Could not list categories: {}", err);
            Vec::new()
        });

        let header = Header::new(categories, config.title.clone(), config.logo_path.clone(), ctx);
        let pending = Mailbox::new();
        connect_signals(ctx, &pending);

        let mut home = Self {
            header,
            social: SocialMediaBar::new(config.social.clone()),
            gallery: None,
            processor: VisualizerProcessor::new(),
            visualizer: None,
            pending,
            projects: Vec::new(),
            current_category: None,
            current_project: None,
            fading: false,
        };

        let Some(selected) = category.or_else(|| home.header.options().first().cloned()) else {
            log::warn!("The catalog has no categories");
            return (home, Task::none());
        };

        home.header.select(&selected);
        if ctx.display.is_compact() {
            return (home, Task::none());
        }

        ctx.signals.option_selected.emit(&selected);
        let task = home.pump(catalog, ctx);
        (home, task)
    }

    pub fn update(
        &mut self,
        message: Message,
        catalog: &dyn ImageCatalog,
        ctx: &mut ViewContext,
    ) -> Action {
        match message {
            Message::Header(header::Message::OptionPressed(option)) => {
                self.header.press_option(option, ctx);
                Action::Run(self.pump(catalog, ctx))
            }
            Message::Header(header::Message::LogoPressed) => Action::Navigate(Route::Bio),
            Message::Gallery(gallery::Message::ImagePressed(name)) => {
                if let Some(gallery) = &self.gallery {
                    gallery.select(&name, ctx);
                }
                Action::Run(self.pump(catalog, ctx))
            }
            Message::Visualizer(message) => {
                if let Some(visualizer) = self.visualizer.as_mut() {
                    visualizer.handle(message, &mut self.processor);
                }
                Action::None
            }
            Message::Social(social::Message::LinkPressed(url)) => Action::OpenLink(url),
            Message::ProjectPressed(project) => {
                if let Some(category) = self.current_category.clone() {
                    ctx.signals
                        .project_selected
                        .emit(&ProjectSelection { category, project });
                }
                Action::Run(self.pump(catalog, ctx))
            }
            Message::MenuPressed => {
                self.header.toggle();
                Action::None
            }
            Message::FadeElapsed(request) => {
                let shown = self.show_images(request, catalog, ctx, false);
                Action::Run(Task::batch([shown, self.pump(catalog, ctx)]))
            }
        }
    }

    /// Run everything the signal handlers queued
    fn pump(&mut self, catalog: &dyn ImageCatalog, ctx: &mut ViewContext) -> Task<Message> {
        let mut tasks = Vec::new();
        for pending in self.pending.drain() {
            match pending {
                Pending::ShowImages(request) => {
                    tasks.push(self.show_images(request, catalog, ctx, true));
                }
                Pending::OpenVisualizer(selection) => self.open_visualizer(selection),
            }
        }
        Task::batch(tasks)
    }

    /// Put a category/project in the gallery.
    ///
    /// Switching category rebuilds the title and project bar, after a fade
    /// on desktop layouts. Switching project only refreshes the gallery.
    fn show_images(
        &mut self,
        request: ShowRequest,
        catalog: &dyn ImageCatalog,
        ctx: &ViewContext,
        animate: bool,
    ) -> Task<Message> {
        let ShowRequest { category, project } = request;

        let projects = match catalog.projects_of_category(&category) {
            Ok(projects) => projects,
            Err(err) => {
                log::error!("Could not list projects of {}: {}", category, err);
                return Task::none();
            }
        };
        let Some(first_project) = projects.first() else {
            log::error!("No projects present in category {}", category);
            return Task::none();
        };
        let project = project.unwrap_or_else(|| first_project.clone());

        let category_changed = self.current_category.as_deref() != Some(category.as_str());
        let project_changed = self.current_project.as_deref() != Some(project.as_str());

        if category_changed {
            if animate && !ctx.display.is_compact() {
                self.fading = true;
                let request = ShowRequest {
                    category,
                    project: Some(project),
                };
                return Task::perform(async { tokio::time::sleep(FADE_OUT).await }, move |()| {
                    Message::FadeElapsed(request.clone())
                });
            }

            log::debug!("Showing category {} / project {}", category, project);
            self.header.select(&category);
            self.projects = projects;
            self.render_gallery(&project, &category, catalog);
            self.current_category = Some(category);
        } else if project_changed {
            log::debug!("Showing project {}", project);
            self.render_gallery(&project, &category, catalog);
        }

        self.current_project = Some(project);
        self.fading = false;
        Task::none()
    }

    fn render_gallery(&mut self, project: &str, category: &str, catalog: &dyn ImageCatalog) {
        let images = catalog
            .images_by_project_and_category(project, category)
            .unwrap_or_else(|err| {
                log::error!("Could not load images of {}/{}: {}", category, project, err);
                Vec::new()
            });

        if let Some(gallery) = self.gallery.as_mut() {
            gallery.update(images);
        } else {
            self.gallery = Some(Gallery::new(images));
        }
    }

    /// Load the selection into the processor, then render and show the
    /// visualizer. The order matters: rendering before `set` would show an
    /// index into the previous list.
    fn open_visualizer(&mut self, selection: ImageSelection) {
        self.processor.load(selection.images);
        self.processor.set(&selection.selected);
        VisualizerView::render(&mut self.visualizer, &self.processor).show();
    }

    /// Re-read categories, projects and the current gallery from the
    /// catalog (e.g. after an import or new thumbnails). What is on screen,
    /// including the visualizer, stays where it is.
    pub fn reload(&mut self, catalog: &dyn ImageCatalog) {
        match catalog.categories() {
            Ok(categories) => self.header.set_options(categories),
            Err(err) => log::error!("Could not list categories: {}", err),
        }

        if let (Some(category), Some(project)) =
            (self.current_category.clone(), self.current_project.clone())
        {
            match catalog.projects_of_category(&category) {
                Ok(projects) => self.projects = projects,
                Err(err) => log::error!("Could not list projects of {}: {}", category, err),
            }
            self.render_gallery(&project, &category, catalog);
        }
    }

    pub fn set_display(&mut self, display: DisplayMode) {
        self.header.set_toggle_enabled(display.is_compact());
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current_category.as_deref()
    }

    pub fn current_project(&self) -> Option<&str> {
        self.current_project.as_deref()
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        self.gallery.as_ref()
    }

    pub fn visualizer(&self) -> Option<&VisualizerView> {
        self.visualizer.as_ref()
    }

    pub fn processor(&self) -> &VisualizerProcessor {
        &self.processor
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn is_fading(&self) -> bool {
        self.fading
    }

    pub fn view(&self) -> Element<'_, Message> {
        let header_panel = column![
            self.header.view().map(Message::Header),
            container(self.social.view().map(Message::Social)).padding([0, 24]),
        ]
        .spacing(8);

        let base: Element<'_, Message> = if self.header.is_hidden() {
            self.content()
        } else if self.header.toggle_enabled() {
            // Compact layouts show the unfolded header as a full-screen menu
            scrollable(header_panel).width(Length::Fill).into()
        } else {
            row![
                container(header_panel).width(Length::Fixed(HEADER_WIDTH)),
                self.content(),
            ]
            .into()
        };

        match &self.visualizer {
            Some(visualizer) if visualizer.is_visible() => {
                stack![base, visualizer.view().map(Message::Visualizer)].into()
            }
            _ => base,
        }
    }

    fn content(&self) -> Element<'_, Message> {
        if self.fading {
            return Space::new(Length::Fill, Length::Fill).into();
        }

        let Some(category) = &self.current_category else {
            return container(text("Pick a category to browse the gallery.").size(18))
                .center(Length::Fill)
                .into();
        };

        let mut title_bar = row![text(category).size(40), horizontal_space()]
            .align_y(Alignment::Center)
            .width(Length::Fill);
        if self.header.toggle_enabled() {
            title_bar = title_bar.push(
                button(text("☰").size(28))
                    .on_press(Message::MenuPressed)
                    .style(button::text),
            );
        }

        let project_buttons: Vec<Element<'_, Message>> = self
            .projects
            .iter()
            .map(|project| {
                let style = if self.current_project.as_ref() == Some(project) {
                    button::primary
                } else {
                    button::secondary
                };
                button(text(project).size(16))
                    .on_press(Message::ProjectPressed(project.clone()))
                    .style(style)
                    .into()
            })
            .collect();
        let project_bar = Wrap::with_elements(project_buttons)
            .spacing(8.0)
            .line_spacing(8.0);

        let gallery: Element<'_, Message> = match &self.gallery {
            Some(gallery) => gallery.view().map(Message::Gallery),
            None => Space::new(Length::Fill, Length::Fill).into(),
        };

        column![
            title_bar,
            project_bar,
            scrollable(gallery).width(Length::Fill).height(Length::Fill),
        ]
        .spacing(16)
        .padding(24)
        .into()
    }
}

fn connect_signals(ctx: &mut ViewContext, pending: &Mailbox<Pending>) {
    ctx.signals.project_selected.disconnect_all();
    ctx.signals.image_selected.disconnect_all();

    let outbox = pending.clone();
    ctx.signals.option_selected.connect(move |category: &String| {
        outbox.post(Pending::ShowImages(ShowRequest {
            category: category.clone(),
            project: None,
        }))
    });

    let outbox = pending.clone();
    ctx.signals
        .project_selected
        .connect(move |selection: &ProjectSelection| {
            outbox.post(Pending::ShowImages(ShowRequest {
                category: selection.category.clone(),
                project: Some(selection.project.clone()),
            }))
        });

    let outbox = pending.clone();
    ctx.signals
        .image_selected
        .connect(move |selection: &ImageSelection| {
            outbox.post(Pending::OpenVisualizer(selection.clone()))
        });
}
