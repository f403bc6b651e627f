/// The three screens the router can put us on
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Repositories(String),
    Settings,
}

impl Route {
    /// Map a path to a screen; anything unrecognised lands on Home
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path
            .trim_start_matches('#')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            ["settings"] => Route::Settings,
            ["user", username] => match urlencoding::decode(username) {
                Ok(username) => Route::Repositories(username.into_owned()),
                Err(_) => Route::Home,
            },
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Repositories(username) => {
                format!("/user/{}", urlencoding::encode(username))
            }
            Route::Settings => "/settings".to_string(),
        }
    }

    /// The user whose stars this screen shows, if any
    pub fn username(&self) -> Option<&str> {
        match self {
            Route::Repositories(username) => Some(username),
            _ => None,
        }
    }
}
