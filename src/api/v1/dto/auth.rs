/*
 * Responsibility
 * - request/response bodies of /auth/register and /auth/login
 * - shape checks for registration only; role rules live in services::auth::role
 * - login bodies are not checked here: blank fields fail as invalid credentials
 */
use serde::{Deserialize, Serialize};

const CREDENTIALS_REQUIRED: &str = "username and password required";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role_name: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(CREDENTIALS_REQUIRED);
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fail_validation() {
        let req: RegisterRequest = serde_json::from_str(r#"{"password":"1234"}"#).unwrap();
        assert_eq!(req.validate(), Err(CREDENTIALS_REQUIRED));

        let req: RegisterRequest =
            serde_json::from_str(r#"{"username":"  ","password":"x"}"#).unwrap();
        assert_eq!(req.validate(), Err(CREDENTIALS_REQUIRED));
    }

    #[test]
    fn login_fields_default_to_empty() {
        let req: LoginRequest = serde_json::from_str(r#"{"username":"sue"}"#).unwrap();
        assert_eq!(req.username, "sue");
        assert!(req.password.is_empty());
    }

    #[test]
    fn role_name_may_be_null_or_absent() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"username":"anna","password":"1234","role_name":null}"#)
                .unwrap();
        assert!(req.validate().is_ok());
        assert!(req.role_name.is_none());
    }
}
