//! Fetching the comment and user datasets
//!
//! `fetch_*` return the failure; `load_*` absorb it (logged) into an empty
//! result so the dashboard shows its empty state instead of an error.

use crate::error::FetchError;
use crate::model::{Comment, User, parse_comments, parse_users};
use crate::settings::Settings;

pub fn comments_url(settings: &Settings) -> String {
    format!("{}/comments", settings.api_base_url.trim_end_matches('/'))
}

pub fn users_url(settings: &Settings) -> String {
    format!("{}/users", settings.api_base_url.trim_end_matches('/'))
}

/// First user of the list is the profile owner
fn first_user(users: Vec<User>) -> Option<User> {
    users.into_iter().next()
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{fetch_comments, fetch_users, load_comments, load_profile};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::Duration;

    use super::*;

    fn get_text(settings: &Settings, url: &str) -> Result<String, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let response = client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))
    }

    pub fn fetch_comments(settings: &Settings) -> Result<Vec<Comment>, FetchError> {
        parse_comments(&get_text(settings, &comments_url(settings))?)
    }

    pub fn fetch_users(settings: &Settings) -> Result<Vec<User>, FetchError> {
        parse_users(&get_text(settings, &users_url(settings))?)
    }

    pub fn load_comments(settings: &Settings) -> Vec<Comment> {
        match fetch_comments(settings) {
            Ok(comments) => {
                log::info!("Fetched {} comments", comments.len());
                comments
            }
            Err(e) => {
                log::error!("Failed to fetch comments: {}", e);
                Vec::new()
            }
        }
    }

    pub fn load_profile(settings: &Settings) -> Option<User> {
        match fetch_users(settings) {
            Ok(users) => first_user(users),
            Err(e) => {
                log::error!("Failed to fetch user: {}", e);
                None
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{fetch_comments, fetch_users, load_comments, load_profile};

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    use super::*;

    fn js_err(e: wasm_bindgen::JsValue) -> FetchError {
        FetchError::Transport(format!("{:?}", e))
    }

    async fn get_text(url: &str) -> Result<String, FetchError> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
        let window = web_sys::window()
            .ok_or_else(|| FetchError::Transport("no window".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;
        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }
        JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?
            .as_string()
            .ok_or_else(|| FetchError::Transport("response body is not text".to_string()))
    }

    pub async fn fetch_comments(settings: &Settings) -> Result<Vec<Comment>, FetchError> {
        parse_comments(&get_text(&comments_url(settings)).await?)
    }

    pub async fn fetch_users(settings: &Settings) -> Result<Vec<User>, FetchError> {
        parse_users(&get_text(&users_url(settings)).await?)
    }

    pub async fn load_comments(settings: &Settings) -> Vec<Comment> {
        match fetch_comments(settings).await {
            Ok(comments) => {
                log::info!("Fetched {} comments", comments.len());
                comments
            }
            Err(e) => {
                log::error!("Failed to fetch comments: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn load_profile(settings: &Settings) -> Option<User> {
        match fetch_users(settings).await {
            Ok(users) => first_user(users),
            Err(e) => {
                log::error!("Failed to fetch user: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_tolerate_trailing_slash() {
        let settings = Settings {
            api_base_url: "http://localhost:3000/".to_string(),
            ..Settings::default()
        };
        assert_eq!(comments_url(&settings), "http://localhost:3000/comments");
        assert_eq!(users_url(&settings), "http://localhost:3000/users");
    }

    #[test]
    fn test_first_user_of_empty_list_is_none() {
        assert!(first_user(Vec::new()).is_none());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_comments_absorbs_transport_failure() {
        // Port 9 (discard) on loopback refuses connections
        let settings = Settings {
            api_base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            ..Settings::default()
        };
        assert!(load_comments(&settings).is_empty());
        assert!(load_profile(&settings).is_none());
    }
}
