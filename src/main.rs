use iced::keyboard::{self, key};
use iced::widget::{button, column, container, text, Column};
use iced::{window, Alignment, Element, Length, Size, Subscription, Task, Theme};
use rfd::FileDialog;

mod config;
mod display;
mod error;
mod media;
mod router;
mod signal;
mod state;
mod ui;

use config::{AppConfig, LogLevel};
use display::DisplayMode;
use media::thumbnail;
use router::Route;
use state::catalog::{self, ImportResult};
use state::library::Library;
use ui::context::ViewContext;
use ui::home::{self, HomeView};
use ui::{bio, not_found, social, visualizer};

/// The view currently on screen
enum Screen {
    Home(HomeView),
    Bio,
    NotFound(String),
    /// The catalog has nothing to show yet
    Empty,
}

/// Main application state
struct Portfolio {
    config: AppConfig,
    /// The catalog database (None if it could not be opened)
    library: Option<Library>,
    context: ViewContext,
    route: Route,
    screen: Screen,
    /// Status message to display on the empty screen
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    Home(home::Message),
    Bio(bio::Message),
    NotFound(not_found::Message),
    /// User clicked the "Import Folder" button
    ImportFolder,
    /// Background import completed
    ImportComplete(Result<ImportResult, String>),
    /// Background thumbnail pass completed with the number generated
    ThumbnailsReady(Result<usize, String>),
    WindowResized(Size),
}

impl Portfolio {
    /// Create a new instance of the application
    fn new(config: AppConfig, route: Route) -> (Self, Task<Message>) {
        let opened = match &config.catalog_path {
            Some(path) => Library::open(path),
            None => Library::open_default(),
        };

        let (library, status) = match opened {
            Ok(library) => {
                let image_count = library.image_count().unwrap_or(0);
                log::info!("🎨 Portfolio initialized with {} images", image_count);
                (Some(library), format!("{} images in the catalog.", image_count))
            }
            Err(err) => {
                log::error!("Could not open the catalog: {}", err);
                (None, format!("Could not open the catalog: {}", err))
            }
        };

        let mut app = Portfolio {
            config,
            library,
            context: ViewContext::new(DisplayMode::Desktop),
            route: route.clone(),
            screen: Screen::Empty,
            status,
        };

        let shown = app.navigate(route);
        let background = match (&app.library, &app.config.portfolio_dir) {
            (Some(library), Some(folder)) => Task::perform(
                catalog::import_folder_async(folder.clone(), library.path().clone()),
                |result| Message::ImportComplete(result.map_err(|e| e.to_string())),
            ),
            _ => app.refresh_thumbnails(),
        };

        (app, Task::batch([shown, background]))
    }

    fn title(&self) -> String {
        match &self.screen {
            Screen::Home(home) => match home.current_category() {
                Some(category) => format!("{} · {}", self.config.title, category),
                None => self.config.title.clone(),
            },
            _ => self.config.title.clone(),
        }
    }

    /// Switch to the view for `route`
    fn navigate(&mut self, route: Route) -> Task<Message> {
        log::debug!("Navigating to \"{}\"", route.path());
        self.route = route.clone();

        match route {
            Route::Home { category } => {
                let library = match &self.library {
                    Some(library) if library.image_count().unwrap_or(0) > 0 => library,
                    _ => {
                        self.screen = Screen::Empty;
                        return Task::none();
                    }
                };

                let (mut home, task) =
                    HomeView::new(library, &self.config, category, &mut self.context);
                home.set_display(self.context.display);
                self.screen = Screen::Home(home);
                task.map(Message::Home)
            }
            Route::Bio => {
                self.screen = Screen::Bio;
                Task::none()
            }
            Route::NotFound(path) => {
                log::warn!("No view for route \"{}\"", path);
                self.screen = Screen::NotFound(path);
                Task::none()
            }
        }
    }

    /// Generate missing thumbnails in the background
    fn refresh_thumbnails(&self) -> Task<Message> {
        let Some(library) = &self.library else {
            return Task::none();
        };

        match thumbnail::thumbnail_cache_dir() {
            Ok(cache_dir) => Task::perform(
                thumbnail::generate_pending_thumbnails(library.path().clone(), cache_dir),
                |result| Message::ThumbnailsReady(result.map_err(|e| e.to_string())),
            ),
            Err(err) => {
                log::warn!("Thumbnails disabled: {}", err);
                Task::none()
            }
        }
    }

    fn perform(&mut self, action: home::Action) -> Task<Message> {
        match action {
            home::Action::None => Task::none(),
            home::Action::Run(task) => task.map(Message::Home),
            home::Action::Navigate(route) => self.navigate(route),
            home::Action::OpenLink(url) => {
                open_link(&url);
                Task::none()
            }
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Home(message) => {
                let action = match (&mut self.screen, &self.library) {
                    (Screen::Home(home), Some(library)) => {
                        home.update(message, library, &mut self.context)
                    }
                    _ => return Task::none(),
                };
                self.perform(action)
            }
            Message::Bio(bio::Message::Home) | Message::NotFound(not_found::Message::Home) => {
                self.navigate(Route::default())
            }
            Message::Bio(bio::Message::LinkPressed(url)) => {
                open_link(&url);
                Task::none()
            }
            Message::ImportFolder => {
                let Some(library) = &self.library else {
                    return Task::none();
                };

                // Show the native folder picker dialog
                let folder = FileDialog::new()
                    .set_title("Select Portfolio Folder")
                    .pick_folder();

                if let Some(folder_path) = folder {
                    self.status = format!("Importing from {}...", folder_path.display());

                    return Task::perform(
                        catalog::import_folder_async(folder_path, library.path().clone()),
                        |result| Message::ImportComplete(result.map_err(|e| e.to_string())),
                    );
                }

                Task::none()
            }
            Message::ImportComplete(Ok(result)) => {
                self.status = format!(
                    "✅ Import complete! Added {} images, skipped {} duplicates.",
                    result.imported_count, result.skipped_count
                );

                // A live home view keeps its category, project and visualizer
                let shown = if result.imported_count == 0 {
                    Task::none()
                } else if matches!(self.screen, Screen::Home(_)) {
                    if let (Screen::Home(home), Some(library)) = (&mut self.screen, &self.library) {
                        home.reload(library);
                    }
                    Task::none()
                } else {
                    self.navigate(self.route.clone())
                };
                Task::batch([shown, self.refresh_thumbnails()])
            }
            Message::ImportComplete(Err(err)) => {
                log::error!("Import failed: {}", err);
                self.status = format!("Import failed: {}", err);
                Task::none()
            }
            Message::ThumbnailsReady(Ok(generated)) => {
                if let (Screen::Home(home), Some(library)) = (&mut self.screen, &self.library) {
                    if generated > 0 {
                        home.reload(library);
                    }
                }
                Task::none()
            }
            Message::ThumbnailsReady(Err(err)) => {
                log::warn!("Thumbnail generation failed: {}", err);
                Task::none()
            }
            Message::WindowResized(size) => {
                let display = DisplayMode::from_width(size.width, self.config.compact_breakpoint);
                if display != self.context.display {
                    log::debug!("Display mode is now {:?}", display);
                    self.context.display = display;
                    if let Screen::Home(home) = &mut self.screen {
                        home.set_display(display);
                    }
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        match &self.screen {
            Screen::Home(home) => home.view().map(Message::Home),
            Screen::Bio => bio::view(&self.config).map(Message::Bio),
            Screen::NotFound(path) => not_found::view(path).map(Message::NotFound),
            Screen::Empty => self.empty_view(),
        }
    }

    fn empty_view(&self) -> Element<'_, Message> {
        let content: Column<'_, Message> = column![
            text(&self.config.title).size(48),
            text("The gallery is empty. Import a folder laid out as category/project/image.")
                .size(16),
            button("Import Folder")
                .on_press_maybe(self.library.as_ref().map(|_| Message::ImportFolder))
                .padding(10),
            text(&self.status).size(16),
        ]
        .spacing(20)
        .padding(40)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            keyboard::on_key_press(|key, _modifiers| {
                let message = match key.as_ref() {
                    keyboard::Key::Named(key::Named::ArrowLeft) => visualizer::Message::Previous,
                    keyboard::Key::Named(key::Named::ArrowRight) => visualizer::Message::Next,
                    keyboard::Key::Named(key::Named::Escape) => visualizer::Message::Close,
                    _ => return None,
                };
                Some(Message::Home(home::Message::Visualizer(message)))
            }),
            window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
        ])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn open_link(url: &str) {
    if let Err(err) = social::open_link(url) {
        log::error!("{}", err);
    }
}

fn init_logging(level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();
}

fn main() -> iced::Result {
    let config_path = AppConfig::default_path();
    let loaded = AppConfig::load(&config_path);
    let config = loaded.as_ref().ok().cloned().unwrap_or_default();

    init_logging(config.log_level);
    match &loaded {
        Err(err) => log::error!("{}; falling back to defaults", err),
        Ok(_) if !config_path.exists() => match config.save(&config_path) {
            Ok(()) => log::info!("Wrote starter configuration to {}", config_path.display()),
            Err(err) => log::warn!("Could not write starter configuration: {}", err),
        },
        Ok(_) => {}
    }

    let start_route = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.start_route.clone());
    let route = Route::parse(&start_route);

    iced::application(Portfolio::title, Portfolio::update, Portfolio::view)
        .subscription(Portfolio::subscription)
        .theme(Portfolio::theme)
        .centered()
        .run_with(move || Portfolio::new(config, route))
}
