/// Route parsing for the views the app can show
///
/// Paths look like the hash part of the original site: `""` or
/// `home/<category>` for the gallery, `bio` for the bio page.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Gallery, optionally opened on a given category
    Home { category: Option<String> },
    Bio,
    /// Any path that matches no view
    NotFound(String),
}

impl Route {
    /// Parse a route path; unknown paths become [`Route::NotFound`]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_start_matches('#').trim_matches('/');
        let mut segments = trimmed.split('/').filter(|s| !s.is_empty());
        let name = segments.next().unwrap_or("").to_lowercase();

        match name.as_str() {
            "" | "home" => Route::Home {
                category: segments.next().map(str::to_string),
            },
            "bio" => Route::Bio,
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    /// Render the route back to a path
    pub fn path(&self) -> String {
        match self {
            Route::Home { category: None } => String::new(),
            Route::Home {
                category: Some(category),
            } => format!("home/{category}"),
            Route::Bio => "bio".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::Home { category: None }
    }
}
