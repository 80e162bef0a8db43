use serde::{Deserialize, Serialize};

/// Client-visible screens, addressed by URL-style paths.
///
/// - `/`          → coin list
/// - `/coin/{id}` → coin detail chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Home,
    CoinDetail { id: String },
    NotFound { path: String },
}

impl Route {
    /// Parse a path. Query strings and fragments are ignored, a trailing
    /// slash is tolerated.
    pub fn parse(path: &str) -> Self {
        let bare = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let trimmed = bare.trim_end_matches('/');

        if trimmed.is_empty() {
            return Route::Home;
        }

        let segments: Vec<&str> = trimmed.trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            ["coin", id] if !id.is_empty() => Route::CoinDetail { id: id.to_string() },
            _ => Route::NotFound {
                path: path.to_string(),
            },
        }
    }

    pub fn coin(id: impl Into<String>) -> Self {
        Route::CoinDetail { id: id.into() }
    }

    /// Path of this route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::CoinDetail { id } => format!("/coin/{id}"),
            Route::NotFound { path } => path.clone(),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
