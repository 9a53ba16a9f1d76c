//! Request payloads built from form fields.
//!
//! Both types are ephemeral: they are read from the page at submission
//! time, serialized into a request body and dropped.

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Highest accepted review rating.
pub const MAX_RATING: u8 = 5;

/// Login/signup body. Never persisted.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Build credentials, rejecting empty fields before anything is sent
    pub fn new(email: &str, password: &str) -> Result<Self, FormError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(FormError::Validation(
                "Please fill in both email and password".to_string(),
            ));
        }
        Ok(Self {
            email: email.trim().to_string(),
            password: password.to_string(),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Review body posted to `<api>/reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ReviewSubmission {
    pub text: String,
    pub rating: Option<u8>,
}

impl ReviewSubmission {
    /// Validate review fields. `require_rating` reflects the page variant.
    pub fn new(text: &str, rating: Option<u8>, require_rating: bool) -> Result<Self, FormError> {
        if text.trim().is_empty() {
            return Err(FormError::Validation(
                "Please write a review before submitting".to_string(),
            ));
        }
        match rating {
            None if require_rating => {
                return Err(FormError::Validation(
                    "Please fill in all required fields".to_string(),
                ));
            }
            Some(r) if r == 0 || r > MAX_RATING => {
                return Err(FormError::Validation(format!(
                    "Rating must be between 1 and {}",
                    MAX_RATING
                )));
            }
            _ => {}
        }
        Ok(Self {
            text: text.to_string(),
            rating,
        })
    }

    /// Parse a rating select value. Empty means no rating was chosen.
    pub fn parse_rating(value: &str) -> Result<Option<u8>, FormError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse::<u8>()
            .map(Some)
            .map_err(|_| FormError::Validation(format!("Invalid rating: {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_fields() {
        assert!(matches!(Credentials::new("", "pw"), Err(FormError::Validation(_))));
        assert!(matches!(Credentials::new("a@b.com", ""), Err(FormError::Validation(_))));
        assert!(matches!(Credentials::new("   ", "pw"), Err(FormError::Validation(_))));

        let creds = Credentials::new(" a@b.com ", "pw").expect("valid credentials");
        assert_eq!(creds.email, "a@b.com");
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("a@b.com", "hunter2").expect("valid credentials");
        let shown = format!("{:?}", creds);
        assert!(shown.contains("a@b.com"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn test_credentials_body() {
        let creds = Credentials::new("a@b.com", "pw").expect("valid credentials");
        let body = serde_json::to_value(&creds).expect("serializable");
        assert_eq!(body, serde_json::json!({"email": "a@b.com", "password": "pw"}));
    }

    #[test]
    fn test_review_validation() {
        assert!(matches!(
            ReviewSubmission::new("", Some(4), false),
            Err(FormError::Validation(_))
        ));
        assert!(matches!(
            ReviewSubmission::new("Lovely", None, true),
            Err(FormError::Validation(_))
        ));
        assert!(matches!(
            ReviewSubmission::new("Lovely", Some(9), false),
            Err(FormError::Validation(_))
        ));

        let review = ReviewSubmission::new("Lovely", None, false).expect("rating optional");
        assert_eq!(review.rating, None);
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(ReviewSubmission::parse_rating("").ok(), Some(None));
        assert_eq!(ReviewSubmission::parse_rating(" 4 ").ok(), Some(Some(4)));
        assert!(ReviewSubmission::parse_rating("four").is_err());
    }

    #[test]
    fn test_review_body() {
        let review = ReviewSubmission::new("Great stay", Some(5), true).expect("valid review");
        let body = serde_json::to_value(&review).expect("serializable");
        assert_eq!(body, serde_json::json!({"text": "Great stay", "rating": 5}));
    }
}
