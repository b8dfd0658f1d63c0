use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub firstname: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub firstname: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_never_carries_a_password_field() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            username: "jdoe".into(),
            firstname: "Jane".into(),
            email: "jane@example.com".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("jane@example.com"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn register_request_parses_the_documented_body() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"jdoe","firstname":"Jane","email":"jane@example.com","password":"s3cretpass"}"#,
        )
        .unwrap();
        assert_eq!(req.username, "jdoe");
        assert_eq!(req.firstname, "Jane");
    }
}
