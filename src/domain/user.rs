/// The acting identity on the board. Held in memory while logged in and mirrored
/// into the session store.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub email: String,
}

const PLACEHOLDER_AVATAR: &str = "/placeholder.svg?height=32&width=32";

impl User {
    /// Builds the identity a login produces. There is no real credential store, so every
    /// login deterministically synthesizes the same profile from the submitted username.
    pub fn for_username(username: &str) -> User {
        User {
            id: "0".to_owned(),
            name: username.to_owned(),
            avatar: PLACEHOLDER_AVATAR.to_owned(),
            email: format!("{username}@example.com"),
        }
    }
}

/// The fixed team roster backing assignee pickers and like indicators on the frontend.
/// Logins are never checked against it.
pub fn team_roster() -> Vec<User> {
    ["Admin", "Alice", "Bob", "Charlie"]
        .into_iter()
        .enumerate()
        .map(|(index, name)| User {
            id: index.to_string(),
            name: name.to_owned(),
            avatar: PLACEHOLDER_AVATAR.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
        })
        .collect()
}
