use serde::{Deserialize, Serialize};

/// An account as returned by the API's user endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    /// `"first last"` with surrounding whitespace removed; empty when neither is set.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginReq {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRes {
    pub user: User,
}

/// Body of `GET /user/`.
///
/// Older deployments return the bare user object instead of wrapping it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrentUserRes {
    Wrapped { user: User },
    Bare(User),
}

impl CurrentUserRes {
    pub fn into_user(self) -> User {
        match self {
            CurrentUserRes::Wrapped { user } => user,
            CurrentUserRes::Bare(user) => user,
        }
    }
}

/// Error body the API returns alongside non-2xx statuses.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorRes {
    #[serde(default)]
    pub error: Option<String>,
}

/// The authenticated user for one editing session.
///
/// Passed explicitly to whatever needs to know who is signed in, instead of living in
/// process-wide state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Name shown in the header: full name, else username, else "anonymous".
    pub fn display_name(&self) -> String {
        match &self.user {
            Some(user) => {
                let full = user.full_name();
                if full.is_empty() {
                    user.username.clone()
                } else {
                    full
                }
            }
            None => "anonymous".to_string(),
        }
    }
}
