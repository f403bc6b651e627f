// Lifecycle of one remotely fetched value
use stargazer_api::FetchError;

/// Where a remote value is in its fetch lifecycle
///
/// Every path into `Ready` or `Failed` goes through `Pending`, so a payload
/// on screen always belongs to a fetch that was actually issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncResource<T, E = FetchError> {
    NotRequested,
    Pending,
    Ready(T),
    Failed(E),
}

impl<T, E> Default for AsyncResource<T, E> {
    fn default() -> Self {
        AsyncResource::NotRequested
    }
}

impl<T, E> AsyncResource<T, E> {
    /// A new fetch went out; whatever we had before is gone
    pub fn start(&mut self) {
        *self = AsyncResource::Pending;
    }

    /// Pending -> Ready. Returns false (and changes nothing) otherwise.
    pub fn resolve(&mut self, value: T) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = AsyncResource::Ready(value);
        true
    }

    /// Pending -> Failed. Returns false (and changes nothing) otherwise.
    pub fn reject(&mut self, error: E) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = AsyncResource::Failed(error);
        true
    }

    /// Settle from a fetch result in one go
    pub fn settle(&mut self, result: Result<T, E>) -> bool {
        match result {
            Ok(value) => self.resolve(value),
            Err(error) => self.reject(error),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AsyncResource::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            AsyncResource::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            AsyncResource::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Identifies which navigation a fetch belongs to
///
/// The generation bumps on every navigation, so going alice -> bob -> alice
/// still retires whatever the first alice fetch eventually returns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestTag {
    pub username: String,
    pub generation: u64,
}

impl std::fmt::Display for RequestTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.username, self.generation)
    }
}
