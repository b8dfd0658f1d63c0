use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload attached to a request once the authentication gate passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,    // user ID
    pub admin: bool,  // admin flag, mirrored from the user record at login
    pub iat: usize,   // issued at (unix timestamp)
    pub exp: usize,   // expires at (unix timestamp)
    pub iss: String,  // issuer
    pub aud: String,  // audience
}
