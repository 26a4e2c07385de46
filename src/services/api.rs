//! REST client for the photogram backend

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::controllers::handshake::SessionCandidate;
use crate::controllers::profile_view::UsersListKind;
use crate::stores::pagination::PageInfo;
use crate::stores::posts::Post;
use crate::stores::profiles::PublicProfile;

/// One page of a user's posts
#[derive(Debug, Clone, Deserialize)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    pub pagination: PageInfo,
}

/// Entry in a followers/following list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct UsersResponse {
    users: Vec<UserSummary>,
}

/// Signed-in user as returned by the login exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub following_ids: Vec<String>,
}

/// Response of `POST /auth/facebook`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

/// Error type for backend calls
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Network(String),
    Status(u16),
    Unauthorized,
    NotFound,
    Parse(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "Network error: {}", e),
            ApiError::Status(code) => write!(f, "Server returned status {}", code),
            ApiError::Unauthorized => write!(f, "Not signed in"),
            ApiError::NotFound => write!(f, "Not found"),
            ApiError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

fn check_status(status: u16) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        code => Err(ApiError::Status(code)),
    }
}

fn users_path(username: &str) -> String {
    format!("users/{}", urlencoding::encode(username))
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let url = config::current().api_url(path);
    log::debug!("GET {}", url);

    let response = reqwest::Client::new()
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await?;
    check_status(response.status().as_u16())?;

    Ok(response.json::<T>().await?)
}

/// Public profile for a username
pub async fn fetch_public_profile(username: &str) -> Result<PublicProfile, ApiError> {
    get_json(&users_path(username)).await
}

/// One page of a user's posts (1-based)
pub async fn fetch_posts(username: &str, page: u32) -> Result<PostsPage, ApiError> {
    get_json(&format!("{}/posts?page={}", users_path(username), page)).await
}

/// Followers or followed accounts of a user
pub async fn fetch_users(username: &str, kind: UsersListKind) -> Result<Vec<UserSummary>, ApiError> {
    let response: UsersResponse = get_json(&format!("{}/{}", users_path(username), kind.as_path())).await?;
    Ok(response.users)
}

/// Exchange an external login for a photogram session
pub async fn login_with_facebook(candidate: &SessionCandidate) -> Result<LoginResponse, ApiError> {
    let url = config::current().api_url("auth/facebook");
    log::debug!("POST {}", url);

    let response = reqwest::Client::new()
        .post(&url)
        .json(candidate)
        .send()
        .await?;
    check_status(response.status().as_u16())?;

    Ok(response.json::<LoginResponse>().await?)
}

/// Follow (true) or unfollow (false) a user by id
pub async fn set_following(token: &str, user_id: &str, follow: bool) -> Result<(), ApiError> {
    let url = config::current().api_url(&format!("users/{}/follow", urlencoding::encode(user_id)));
    let client = reqwest::Client::new();
    let request = if follow { client.post(&url) } else { client.delete(&url) };

    log::debug!("{} {}", if follow { "POST" } else { "DELETE" }, url);
    let response = request.bearer_auth(token).send().await?;
    check_status(response.status().as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(check_status(200), Ok(()));
        assert_eq!(check_status(204), Ok(()));
        assert_eq!(check_status(401), Err(ApiError::Unauthorized));
        assert_eq!(check_status(404), Err(ApiError::NotFound));
        assert_eq!(check_status(502), Err(ApiError::Status(502)));
    }

    #[test]
    fn test_usernames_are_escaped_in_paths() {
        assert_eq!(users_path("alice"), "users/alice");
        assert_eq!(users_path("a b/c"), "users/a%20b%2Fc");
    }

    #[test]
    fn test_posts_page_parses() {
        let page: PostsPage = serde_json::from_str(
            r#"{
                "posts": [{"id": "p1", "imageUrl": "https://img.example/p1.jpg", "caption": "hi"}],
                "pagination": {"currentPage": 1, "totalPages": 3, "nextPage": 2}
            }"#,
        )
        .unwrap();
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.pagination.next_page, Some(2));
    }

    #[test]
    fn test_login_response_parses_without_following() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"token": "t", "user": {"id": "1", "username": "jane"}}"#,
        )
        .unwrap();
        assert!(response.user.following_ids.is_empty());
        assert_eq!(response.user.avatar_url, None);
    }
}
