use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;

/// Organization a user belongs to, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: u64,
    pub name: String,
}

/// Authenticated user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub user_type: Option<String>,
    pub organization: Organization,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub gender: String,
    pub is_active: bool,
    pub user_type: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    pub detail: String,
}

/// Paginated list envelope used by the subjects and cards endpoints.
/// `count`/`next`/`previous` are passed through from the server untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subject {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub color: String,
    pub image: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub subject_id: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subtopic {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub topic_id: u64,
    pub subject_id: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A unit of lesson content belonging to a subtopic. `content` is HTML;
/// the optional files are served as URLs and only surfaced as metadata here.
#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub id: u64,
    pub order: i64,
    pub title: String,
    pub content: String,
    pub slug: String,
    #[serde(default)]
    pub verge3d_file: Option<String>,
    #[serde(default)]
    pub audio_file: Option<String>,
    #[serde(default)]
    pub thumbnail_file: Option<String>,
    pub subtopic: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Query filter for the cards endpoint. All fields optional; the client
/// always appends `isOnline=true` alongside whatever is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CardFilter {
    pub subject_id: Option<u64>,
    pub topic_id: Option<u64>,
    pub subtopic_id: Option<u64>,
}

/// Requests sent from the UI thread to the API worker.
#[derive(Debug)]
pub enum ApiRequest {
    UseToken(String),
    ClearToken,
    Login {
        email: String,
        password: String,
    },
    Signup(Box<SignupRequest>),
    GetSubjects,
    GetTopics {
        subject_id: u64,
    },
    GetSubtopics {
        topic_id: u64,
    },
    GetCards(CardFilter),
}

/// Responses sent back from the API worker to the UI thread.
#[derive(Debug)]
pub enum ApiResponse {
    LoggedIn(Box<LoginResponse>),
    SignedUp(SignupResponse),
    Subjects(Paginated<Subject>),
    Topics(Vec<Topic>),
    Subtopics(Vec<Subtopic>),
    Cards(Paginated<Card>),
    Error(ApiError),
}

/// Which screen the main loop is on.
#[derive(Debug, PartialEq)]
pub enum AppState {
    Login,
    Signup,
    Subjects,
    Topics,
    Subtopics,
    Cards,
    CardView,
    Exam,
    Quiz,
    Dashboard,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_FIXTURE: &str = r#"{
        "user": {
            "id": 42,
            "email": "student@example.com",
            "full_name": "Test Student",
            "user_type": "student",
            "organization": { "id": 7, "name": "Greenfield High" }
        },
        "token": "abc123",
        "expires_at": "2099-01-01T00:00:00Z"
    }"#;

    // r## because the color values contain `"#`
    const SUBJECTS_FIXTURE: &str = r##"{
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {
                "id": 1,
                "title": "Biology",
                "content": "Study of living organisms",
                "slug": "biology",
                "color": "#22C55E",
                "image": "https://cdn.example.com/bio.png",
                "background_image": null,
                "icon": null,
                "created_at": null,
                "updated_at": "2025-01-02T00:00:00Z"
            },
            {
                "id": 2,
                "title": "Physics",
                "content": "Matter and motion",
                "slug": "physics",
                "color": "#3B82F6",
                "image": "https://cdn.example.com/phy.png"
            }
        ]
    }"##;

    #[test]
    fn parse_login_response() {
        let resp: LoginResponse = serde_json::from_str(LOGIN_FIXTURE).unwrap();
        assert_eq!(resp.token, "abc123");
        assert_eq!(resp.expires_at, "2099-01-01T00:00:00Z");
        assert_eq!(resp.user.email, "student@example.com");
        assert_eq!(resp.user.organization.name, "Greenfield High");
        assert_eq!(resp.user.user_type.as_deref(), Some("student"));
    }

    #[test]
    fn parse_paginated_subjects() {
        let page: Paginated<Subject> = serde_json::from_str(SUBJECTS_FIXTURE).unwrap();
        assert_eq!(page.count, 2);
        assert!(page.next.is_none());
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].slug, "biology");
        // Missing optional fields default to None
        assert!(page.results[1].icon.is_none());
        assert!(page.results[1].created_at.is_none());
    }

    #[test]
    fn parse_card_with_optional_files() {
        let json = r#"{
            "id": 10,
            "order": 1,
            "title": "The Heart",
            "content": "<p>The heart has four chambers.</p>",
            "slug": "the-heart",
            "verge3d_file": "https://cdn.example.com/heart.glb",
            "audio_file": null,
            "thumbnail_file": null,
            "subtopic": 3
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.subtopic, 3);
        assert!(card.verge3d_file.is_some());
        assert!(card.audio_file.is_none());
    }

    #[test]
    fn signup_request_serializes_all_fields() {
        let req = SignupRequest {
            email: "new@example.com".to_string(),
            full_name: "New User".to_string(),
            phone_number: "+1555000".to_string(),
            gender: "female".to_string(),
            is_active: true,
            user_type: "student".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["email"], "new@example.com");
        assert_eq!(value["is_active"], true);
        assert_eq!(value["confirm_password"], "hunter22");
    }
}
