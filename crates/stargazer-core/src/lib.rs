// Core state engine: fetch lifecycle, filtering, notifications
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod fuzzy;
pub mod models;
pub mod notifications;
pub mod providers;
pub mod resource;
pub mod route;
pub mod session;
pub mod theme;
pub mod topics;

pub use config::Config;
pub use controller::{AppController, Effect, Msg};
pub use error::Error;
pub use filter::{FilterCriteria, TopicOption};
pub use models::{Repository, SortMode, User};
pub use notifications::{Notification, NotificationId, NotificationQueue, Severity};
pub use providers::{GitHubProvider, StarsProvider};
pub use resource::{AsyncResource, RequestTag};
pub use route::Route;
pub use session::Session;
pub use stargazer_api::FetchError;
pub use theme::{ConfigThemeStore, MemoryThemeStore, Theme, ThemeStore};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
