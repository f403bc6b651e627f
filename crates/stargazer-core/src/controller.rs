// Application state and the one place allowed to change it
use std::time::Duration;

use stargazer_api::FetchError;
use tracing::{debug, info, warn};

use crate::{
    filter::{self, FilterCriteria, TopicOption},
    models::{Repository, SortMode, User},
    notifications::{NotificationId, NotificationQueue, Severity, NOTIFICATION_TTL},
    resource::{AsyncResource, RequestTag},
    route::Route,
    theme::Theme,
};

/// Everything that can happen to the app: user input, router changes and
/// fetch/timer completions all arrive as one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Router put us on a new screen
    Navigate(Route),
    /// User typed in the username box on the home screen
    UsernameInput(String),
    /// User pressed go on the home screen
    UsernameSubmitted,
    UserFetched {
        tag: RequestTag,
        result: Result<User, FetchError>,
    },
    RepositoriesFetched {
        tag: RequestTag,
        result: Result<Vec<Repository>, FetchError>,
    },
    SearchChanged(String),
    TopicSearchChanged(String),
    SortChanged(SortMode),
    TopicToggled(String),
    TopicsCleared,
    /// User closed a notice by hand
    NotificationDismissed(NotificationId),
    /// A notice's timer ran out
    NotificationExpired(NotificationId),
    ThemeToggled,
}

/// Side effects the controller wants performed; it never does I/O itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchUser(RequestTag),
    FetchRepositories(RequestTag),
    /// Send `NotificationExpired(id)` back after `after`
    ExpireNotification { id: NotificationId, after: Duration },
    /// Fire-and-forget; failures are only logged
    SaveTheme(Theme),
    /// Ask the router to move somewhere
    PushRoute(Route),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    User,
    Repositories,
}

/// Single owner of the application state
///
/// Feed it messages with [`AppController::update`], carry out the effects
/// it hands back, and read derived data (visible repositories, topic picker)
/// straight off it; those are recomputed on every call.
#[derive(Debug, Clone)]
pub struct AppController {
    route: Route,
    username_input: String,
    active: Option<RequestTag>,
    generation: u64,
    user: AsyncResource<User>,
    repositories: AsyncResource<Vec<Repository>>,
    criteria: FilterCriteria,
    notifications: NotificationQueue,
    theme: Theme,
}

impl AppController {
    /// `stored_theme` is whatever persistence handed us at startup
    pub fn new(stored_theme: Option<&str>) -> Self {
        Self {
            route: Route::Home,
            username_input: String::new(),
            active: None,
            generation: 0,
            user: AsyncResource::NotRequested,
            repositories: AsyncResource::NotRequested,
            criteria: FilterCriteria::new(),
            notifications: NotificationQueue::new(),
            theme: stored_theme.map(Theme::from_stored).unwrap_or_default(),
        }
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::Navigate(route) => self.navigate(route),
            Msg::UsernameInput(value) => {
                self.username_input = value;
                Vec::new()
            }
            Msg::UsernameSubmitted => {
                let username = self.username_input.trim();
                if username.is_empty() {
                    return Vec::new();
                }
                vec![Effect::PushRoute(Route::Repositories(username.to_string()))]
            }
            Msg::UserFetched { tag, result } => {
                let failure = settle_tagged(
                    self.active.as_ref(),
                    &mut self.user,
                    FetchKind::User,
                    &tag,
                    result,
                );
                self.report(failure)
            }
            Msg::RepositoriesFetched { tag, result } => {
                let failure = settle_tagged(
                    self.active.as_ref(),
                    &mut self.repositories,
                    FetchKind::Repositories,
                    &tag,
                    result,
                );
                self.report(failure)
            }
            Msg::SearchChanged(value) => {
                self.criteria.search = value;
                Vec::new()
            }
            Msg::TopicSearchChanged(value) => {
                self.criteria.topic_search = value;
                Vec::new()
            }
            Msg::SortChanged(mode) => {
                self.criteria.sort = mode;
                Vec::new()
            }
            Msg::TopicToggled(topic) => {
                let selected = self.criteria.toggle_topic(&topic);
                debug!("Topic {} selected: {}", topic, selected);
                Vec::new()
            }
            Msg::TopicsCleared => {
                self.criteria.clear_topics();
                Vec::new()
            }
            Msg::NotificationDismissed(id) | Msg::NotificationExpired(id) => {
                if !self.notifications.dismiss(id) {
                    debug!("Notification {} already gone", id);
                }
                Vec::new()
            }
            Msg::ThemeToggled => {
                self.theme = self.theme.toggled();
                vec![Effect::SaveTheme(self.theme)]
            }
        }
    }

    fn navigate(&mut self, route: Route) -> Vec<Effect> {
        let Some(username) = route.username().map(|name| name.trim().to_string()) else {
            self.route = route;
            return Vec::new();
        };
        if username.is_empty() {
            self.route = Route::Home;
            return Vec::new();
        }

        self.generation += 1;
        let tag = RequestTag {
            username: username.clone(),
            generation: self.generation,
        };
        info!("Loading stars for {} ({})", username, tag);

        self.route = Route::Repositories(username.clone());
        self.username_input = username;
        self.criteria.reset();
        self.user.start();
        self.repositories.start();
        self.active = Some(tag.clone());

        vec![Effect::FetchUser(tag.clone()), Effect::FetchRepositories(tag)]
    }

    /// Raise a notice for a failure that made it into state
    fn report(&mut self, failure: Option<String>) -> Vec<Effect> {
        let Some(message) = failure else {
            return Vec::new();
        };

        warn!("{}", message);
        let id = self.notifications.enqueue(message, Severity::Error);
        vec![Effect::ExpireNotification {
            id,
            after: NOTIFICATION_TTL,
        }]
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn username_input(&self) -> &str {
        &self.username_input
    }

    /// Tag of the fetches whose answers we are still willing to accept
    pub fn active_request(&self) -> Option<&RequestTag> {
        self.active.as_ref()
    }

    pub fn user(&self) -> &AsyncResource<User> {
        &self.user
    }

    pub fn repositories(&self) -> &AsyncResource<Vec<Repository>> {
        &self.repositories
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// True while either fetch for the active navigation is outstanding
    pub fn is_loading(&self) -> bool {
        self.user.is_pending() || self.repositories.is_pending()
    }

    /// Starred repositories after topic filter, text filter and sort
    pub fn visible_repositories(&self) -> Vec<&Repository> {
        match self.repositories.ready() {
            Some(repos) => filter::apply(&self.criteria, repos),
            None => Vec::new(),
        }
    }

    pub fn topic_picker(&self) -> Vec<TopicOption> {
        match self.repositories.ready() {
            Some(repos) => filter::topic_picker(&self.criteria, repos),
            None => Vec::new(),
        }
    }
}

impl Default for AppController {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Apply a fetch result if it belongs to the active request
///
/// Returns the notice text when a failure was actually recorded. Stale
/// results and results for an already-settled resource change nothing.
fn settle_tagged<T>(
    active: Option<&RequestTag>,
    resource: &mut AsyncResource<T>,
    kind: FetchKind,
    tag: &RequestTag,
    result: Result<T, FetchError>,
) -> Option<String> {
    if active != Some(tag) {
        warn!("Dropping stale {:?} response for {}", kind, tag);
        return None;
    }

    let failure = result
        .as_ref()
        .err()
        .map(|e| failure_message(kind, &tag.username, e));

    if !resource.settle(result) {
        warn!("{:?} response for {} arrived when nothing was pending", kind, tag);
        return None;
    }

    if failure.is_none() {
        info!("{:?} fetch for {} succeeded", kind, tag);
    }
    failure
}

/// Turn a failed fetch into the text of a notice
///
/// Repository-list decode errors get a generic message; the per-field
/// decoder output is only shown for the user profile.
fn failure_message(kind: FetchKind, username: &str, err: &FetchError) -> String {
    match (kind, err) {
        (FetchKind::Repositories, FetchError::BadBody(_)) => {
            format!("Failed to parse starred repositories for {}", username)
        }
        (FetchKind::Repositories, _) => {
            format!("Could not load starred repositories for {}: {}", username, err)
        }
        (FetchKind::User, _) => format!("Could not load user {}: {}", username, err),
    }
}
