use serde::{Deserialize, Serialize};

/// A starred repository, exactly as far as the engine cares about it
///
/// Never mutated after decoding; a new fetch replaces the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub language: Option<String>,
    pub stars: u32,
    pub topics: Vec<String>,
    /// Raw ISO-8601 timestamp, compared as a string
    pub updated_at: String,
}

impl Repository {
    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}

/// Profile of the user whose stars we're browsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
}

impl User {
    /// Display name if they set one, login otherwise
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

/// How the visible list is ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    #[default]
    ByStars,
    ByUpdated,
    ByName,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::ByStars => "stars",
            SortMode::ByUpdated => "updated",
            SortMode::ByName => "name",
        }
    }

    pub fn parse(value: &str) -> Option<SortMode> {
        match value.trim().to_lowercase().as_str() {
            "stars" => Some(SortMode::ByStars),
            "updated" => Some(SortMode::ByUpdated),
            "name" => Some(SortMode::ByName),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_parse_round_trips() {
        for mode in [SortMode::ByStars, SortMode::ByUpdated, SortMode::ByName] {
            assert_eq!(SortMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(SortMode::parse(" Stars "), Some(SortMode::ByStars));
        assert_eq!(SortMode::parse("forks"), None);
    }

    #[test]
    fn test_display_name_falls_back_to_login() {
        let mut user = User {
            login: "octocat".into(),
            name: None,
            avatar_url: String::new(),
            bio: None,
        };
        assert_eq!(user.display_name(), "octocat");

        user.name = Some("The Octocat".into());
        assert_eq!(user.display_name(), "The Octocat");
    }
}
