//! Records served by the REST API
//!
//! Field names follow the API's camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// A single comment row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u32,
    pub post_id: u32,
    pub name: String,
    pub email: String,
    pub body: String,
}

impl Comment {
    /// Case-insensitive substring match against name, email and body.
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.body.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

/// A user as shown on the profile page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

impl User {
    /// "@username | website"
    pub fn handle(&self) -> String {
        format!("@{} | {}", self.username, self.website)
    }

    /// "street, suite, city, zipcode"
    pub fn address_line(&self) -> String {
        let a = &self.address;
        format!("{}, {}, {}, {}", a.street, a.suite, a.city, a.zipcode)
    }

    /// "company - catch phrase"
    pub fn company_line(&self) -> String {
        format!("{} - {}", self.company.name, self.company.catch_phrase)
    }
}

/// Decode the `/comments` response body
pub fn parse_comments(body: &str) -> Result<Vec<Comment>, FetchError> {
    Ok(serde_json::from_str(body)?)
}

/// Decode the `/users` response body
pub fn parse_users(body: &str) -> Result<Vec<User>, FetchError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn comment(id: u32, post_id: u32, name: &str, email: &str, body: &str) -> Comment {
        Comment {
            id,
            post_id,
            name: name.to_string(),
            email: email.to_string(),
            body: body.to_string(),
        }
    }

    const USERS_JSON: &str = r#"[{
        "id": 1,
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": "Gwenborough",
            "zipcode": "92998-3874",
            "geo": { "lat": "-37.3159", "lng": "81.1496" }
        },
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org",
        "company": {
            "name": "Romaguera-Crona",
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    }]"#;

    #[test]
    fn test_parse_comments_camel_case() {
        let body = r#"[{"postId":1,"id":1,"name":"id labore","email":"Eliseo@gardner.biz","body":"laudantium"}]"#;
        let comments = parse_comments(body).unwrap();
        assert_eq!(comments, vec![comment(1, 1, "id labore", "Eliseo@gardner.biz", "laudantium")]);
    }

    #[test]
    fn test_parse_comments_rejects_garbage() {
        assert!(matches!(parse_comments("<html>"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_parse_users_and_profile_lines() {
        let users = parse_users(USERS_JSON).unwrap();
        let user = &users[0];
        assert_eq!(user.handle(), "@Bret | hildegard.org");
        assert_eq!(user.address_line(), "Kulas Light, Apt. 556, Gwenborough, 92998-3874");
        assert_eq!(
            user.company_line(),
            "Romaguera-Crona - Multi-layered client-server neural-net"
        );
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let c = comment(1, 1, "Alpha", "ALPHA@Example.com", "Some Body");
        assert!(c.matches("alpha"));
        assert!(c.matches("example"));
        assert!(c.matches("some b"));
        assert!(!c.matches("zeta"));
    }
}
