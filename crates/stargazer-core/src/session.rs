// Async driver: runs the controller's effects on tokio and feeds results back
use std::collections::VecDeque;
use std::sync::Arc;

use stargazer_api::FetchError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{
    controller::{AppController, Effect, Msg},
    providers::StarsProvider,
    theme::ThemeStore,
};

/// One running instance of the app
///
/// Fetches and notification timers run as spawned tasks, but they never
/// touch state: each one posts a `Msg` on the session's channel and the
/// session applies it on the caller's task. All mutation therefore happens
/// in one place, one message at a time.
///
/// Must be used from inside a tokio runtime.
pub struct Session {
    controller: AppController,
    provider: Arc<dyn StarsProvider>,
    theme_store: Arc<dyn ThemeStore>,
    tx: mpsc::UnboundedSender<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
    pending_saves: Vec<JoinHandle<()>>,
}

impl Session {
    pub fn new(provider: Arc<dyn StarsProvider>, theme_store: Arc<dyn ThemeStore>) -> Self {
        let stored_theme = theme_store.load();
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            controller: AppController::new(stored_theme.as_deref()),
            provider,
            theme_store,
            tx,
            rx,
            pending_saves: Vec::new(),
        }
    }

    pub fn controller(&self) -> &AppController {
        &self.controller
    }

    /// Apply a message now and start whatever it asks for
    pub fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);

        while let Some(msg) = queue.pop_front() {
            for effect in self.controller.update(msg) {
                if let Some(follow_up) = self.perform(effect) {
                    queue.push_back(follow_up);
                }
            }
        }
    }

    /// Wait for the next fetch or timer to complete and apply it
    pub async fn step(&mut self) {
        // We hold a sender ourselves, so the channel never closes under us
        if let Some(msg) = self.rx.recv().await {
            self.dispatch(msg);
        }
    }

    /// Apply completions until neither fetch is outstanding
    pub async fn settle(&mut self) {
        while self.controller.is_loading() {
            self.step().await;
        }
    }

    /// Wait for any theme writes still running on the blocking pool
    pub async fn flush(&mut self) {
        for save in self.pending_saves.drain(..) {
            if let Err(e) = save.await {
                warn!("Theme save task failed: {}", e);
            }
        }
    }

    fn perform(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::FetchUser(tag) => {
                debug!("Fetching user {}", tag);
                let provider = Arc::clone(&self.provider);
                let username = tag.username.clone();
                let fetch = tokio::spawn(async move { provider.fetch_user(&username).await });
                self.forward(fetch, move |result| Msg::UserFetched { tag, result });
                None
            }
            Effect::FetchRepositories(tag) => {
                debug!("Fetching starred repositories for {}", tag);
                let provider = Arc::clone(&self.provider);
                let username = tag.username.clone();
                let fetch = tokio::spawn(async move {
                    provider.fetch_starred_repositories(&username).await
                });
                self.forward(fetch, move |result| Msg::RepositoriesFetched { tag, result });
                None
            }
            Effect::ExpireNotification { id, after } => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    // Fine if the session or the notice is already gone
                    let _ = tx.send(Msg::NotificationExpired(id));
                });
                None
            }
            Effect::SaveTheme(theme) => {
                let store = Arc::clone(&self.theme_store);
                self.pending_saves.retain(|save| !save.is_finished());
                self.pending_saves.push(tokio::task::spawn_blocking(move || {
                    if let Err(e) = store.save(theme) {
                        warn!("Could not persist theme {}: {}", theme, e);
                    }
                }));
                None
            }
            Effect::PushRoute(route) => Some(Msg::Navigate(route)),
        }
    }

    /// Post the outcome of a fetch task back to the session. A task that
    /// panicked or was cancelled still settles its resource, as a network error.
    fn forward<T, F>(&self, fetch: JoinHandle<Result<T, FetchError>>, into_msg: F)
    where
        T: Send + 'static,
        F: FnOnce(Result<T, FetchError>) -> Msg + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match fetch.await {
                Ok(result) => result,
                Err(e) => {
                    warn!("Fetch task died: {}", e);
                    Err(FetchError::NetworkError(e.to_string()))
                }
            };
            if tx.send(into_msg(result)).is_err() {
                debug!("Session gone before fetch finished");
            }
        });
    }
}
