use serde::{Deserialize, Serialize};

/// A catalog entry
///
/// Accepts both stored rows (`title`, `preview_url`) and static catalog
/// entries (`name`, `preview`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionRecord {
    pub slug: String,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub code: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub niches: Vec<String>,
    #[serde(default, alias = "preview")]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    /// User ids that liked the section
    #[serde(default)]
    pub likes: Vec<String>,
    /// User ids that bookmarked the section
    #[serde(default)]
    pub saved_by: Vec<String>,
}

/// Result of flipping a user's membership in a like/bookmark set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Whether the user is a member after the toggle
    pub flag: bool,
    /// Set size after the toggle
    pub count: usize,
}

/// The caller as reported by the identity service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl SectionRecord {
    /// Like or unlike on behalf of `user_id`
    pub fn toggle_like(&mut self, user_id: &str) -> ToggleOutcome {
        toggle_membership(&mut self.likes, user_id)
    }

    /// Bookmark or unbookmark on behalf of `user_id`
    pub fn toggle_bookmark(&mut self, user_id: &str) -> ToggleOutcome {
        toggle_membership(&mut self.saved_by, user_id)
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }

    pub fn is_saved_by(&self, user_id: &str) -> bool {
        self.saved_by.iter().any(|id| id == user_id)
    }
}

/// Remove `user_id` if present (every copy), add it once otherwise
fn toggle_membership(members: &mut Vec<String>, user_id: &str) -> ToggleOutcome {
    let was_member = members.iter().any(|id| id == user_id);
    if was_member {
        members.retain(|id| id != user_id);
    } else {
        members.push(user_id.to_string());
    }

    ToggleOutcome {
        flag: !was_member,
        count: members.len(),
    }
}
