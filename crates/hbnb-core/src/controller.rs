//! Form submission controller.
//!
//! `FormSubmissionController` binds the login, signup and review forms,
//! validates their fields, performs exactly one request per submission and
//! turns the response into a stored token, a navigation, or an error shown
//! to the user. Nothing is retried and concurrent submissions are not
//! deduplicated.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::api::{HttpReply, Transport};
use crate::auth::{AuthToken, CredentialStore};
use crate::config::Config;
use crate::error::FormError;
use crate::forms::{field, FormFieldSource, FormId};
use crate::listing::{self, PlaceCard};
use crate::models::{Credentials, ReviewSubmission};

/// Shown when a request never produced a response.
const TRANSPORT_FAILURE_MESSAGE: &str = "An error occurred while contacting the server. Please try again.";

/// The page a controller is attached to.
pub trait Presenter: Send + Sync {
    /// Blocking user-facing notification
    fn notify(&self, message: &str);

    /// Full-page navigation
    fn navigate(&self, path: &str);

    /// Clear the fields of `form`
    fn reset_form(&self, form: FormId);
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: Option<String>,
}

pub struct FormSubmissionController {
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
    presenter: Arc<dyn Presenter>,
    config: Config,
}

impl FormSubmissionController {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn CredentialStore>,
        presenter: Arc<dyn Presenter>,
        config: Config,
    ) -> Self {
        Self {
            transport,
            store,
            presenter,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Forms on the page this controller handles. Unknown ids are skipped.
    pub fn bind<'a>(&self, element_ids: impl IntoIterator<Item = &'a str>) -> Vec<FormId> {
        let mut bound = Vec::new();
        for id in element_ids {
            match FormId::from_element_id(id) {
                Some(form) if !bound.contains(&form) => bound.push(form),
                Some(_) => {}
                None => debug!(form = id, "No handler for form"),
            }
        }
        debug!(count = bound.len(), "Forms bound");
        bound
    }

    /// Submit event entry point: read `form`'s fields and dispatch.
    ///
    /// Errors are shown through the presenter and also returned.
    pub async fn handle_submit(
        &self,
        form: FormId,
        fields: &dyn FormFieldSource,
    ) -> Result<(), FormError> {
        let result = match form {
            FormId::Login => self
                .submit_login(
                    &fields.value_or_empty(field::EMAIL),
                    &fields.value_or_empty(field::PASSWORD),
                )
                .await
                .map(|_| ()),
            FormId::Signup => {
                self.submit_signup(
                    &fields.value_or_empty(field::EMAIL),
                    &fields.value_or_empty(field::PASSWORD),
                )
                .await
            }
            FormId::Review => match ReviewSubmission::parse_rating(&fields.value_or_empty(field::RATING)) {
                Ok(rating) => {
                    self.submit_review(&fields.value_or_empty(field::REVIEW), rating)
                        .await
                }
                Err(e) => Err(e),
            },
        };

        if let Err(ref e) = result {
            let message = match (form, e) {
                (_, FormError::Validation(msg)) => msg.clone(),
                (FormId::Login, e) => format!("Login failed: {}", e.message()),
                (FormId::Signup, e) => format!("Signup failed: {}", e.message()),
                (FormId::Review, e) => format!("Failed to submit review: {}", e.message()),
            };
            self.presenter.notify(&message);
        }
        result
    }

    /// Log in, store the returned token and navigate to the landing page
    pub async fn submit_login(&self, email: &str, password: &str) -> Result<AuthToken, FormError> {
        let credentials = Credentials::new(email, password)?;
        let reply = self.post(&self.config.login_endpoint(), None, &credentials).await?;

        if !reply.is_success() {
            let message = reply.error_message();
            warn!(status = reply.status, message = %message, "Login rejected");
            return Err(FormError::Auth(message));
        }

        let body: LoginResponse = reply.json()?;
        let token = body
            .access_token
            .filter(|t| !t.is_empty())
            .map(AuthToken::new)
            .ok_or_else(|| FormError::Transport("Login response carried no access token".to_string()))?;

        self.store
            .set(&token)
            .map_err(|e| FormError::Storage(e.to_string()))?;

        info!(email = %credentials.email, "Login successful");
        self.presenter.navigate(&self.config.landing_page);
        Ok(token)
    }

    /// Register a new account. No token is stored and no navigation happens.
    pub async fn submit_signup(&self, email: &str, password: &str) -> Result<(), FormError> {
        let credentials = Credentials::new(email, password)?;
        let reply = self.post(&self.config.signup_endpoint(), None, &credentials).await?;

        if !reply.is_success() {
            let message = reply.error_message();
            warn!(status = reply.status, message = %message, "Signup rejected");
            return Err(FormError::Auth(message));
        }

        info!(email = %credentials.email, "Signup successful");
        self.presenter
            .notify(&reply.message().unwrap_or_else(|| "Signup successful".to_string()));
        Ok(())
    }

    /// Post a review with the stored token.
    ///
    /// The token is checked before the fields; without one nothing is sent.
    pub async fn submit_review(&self, text: &str, rating: Option<u8>) -> Result<(), FormError> {
        let token = self
            .store
            .get()
            .map_err(|e| FormError::Storage(e.to_string()))?
            .ok_or_else(|| FormError::Auth("You must be logged in to submit a review".to_string()))?;

        let review = ReviewSubmission::new(text, rating, self.config.require_rating)?;
        let reply = self
            .post(&self.config.reviews_endpoint(), Some(&token), &review)
            .await?;

        match reply.status {
            _ if reply.is_success() => {
                info!(rating = ?review.rating, "Review submitted");
                self.presenter.reset_form(FormId::Review);
                self.presenter.notify("Review submitted successfully!");
                Ok(())
            }
            401 | 403 => {
                let message = reply.error_message();
                warn!(status = reply.status, message = %message, "Review rejected: not authorized");
                Err(FormError::Auth(message))
            }
            _ => {
                let message = reply.error_message();
                warn!(status = reply.status, message = %message, "Review rejected");
                Err(FormError::Transport(message))
            }
        }
    }

    /// Drop the stored token and go back to the login page
    pub fn logout(&self) -> Result<(), FormError> {
        self.store
            .clear()
            .map_err(|e| FormError::Storage(e.to_string()))?;
        info!("Logged out");
        self.presenter.navigate(&self.config.login_page);
        Ok(())
    }

    /// Whether a token is currently retrievable
    pub fn is_logged_in(&self) -> bool {
        match self.store.get() {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "Failed to read token");
                false
            }
        }
    }

    /// Apply the price filter select value to the listing
    pub fn filter_by_max_price(&self, cards: &mut [PlaceCard], max_price: Option<u64>) {
        listing::filter_by_max_price(cards, max_price);
        let shown = cards.iter().filter(|c| c.visible).count();
        debug!(max_price = ?max_price, shown = shown, total = cards.len(), "Listing filtered");
    }

    async fn post<B: serde::Serialize>(
        &self,
        url: &str,
        token: Option<&AuthToken>,
        body: &B,
    ) -> Result<HttpReply, FormError> {
        let body = serde_json::to_value(body).map_err(|e| FormError::Transport(e.to_string()))?;
        debug!(url = url, authenticated = token.is_some(), "Submitting form");

        self.transport
            .post_json(url, token.map(AuthToken::as_str), &body)
            .await
            .map_err(|e| {
                warn!(url = url, error = %e, "Request failed");
                FormError::Transport(TRANSPORT_FAILURE_MESSAGE.to_string())
            })
    }
}
