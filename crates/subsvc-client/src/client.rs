//! Subscription service HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use subsvc_core::{SubscriptionId, UserId};

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, CreateSubscriptionRequest, CreateUserRequest, HealthResponse,
    SubscriptionResponse, UserResponse,
};

/// What a request was about, used to turn `not_found`/`conflict` codes into
/// typed errors.
#[derive(Debug, Clone)]
enum Target {
    Any,
    User(UserId),
    UserPlan(UserId, String),
    Subscription(SubscriptionId),
}

/// Subscription service API client.
#[derive(Debug, Clone)]
pub struct SubscriptionClient {
    client: Client,
    base_url: String,
}

impl SubscriptionClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the service (e.g., `"http://subsvc:8080"`)
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Check service health.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = format!("{}/health", self.base_url);

        let response = self.client.get(&url).send().await?;

        Self::handle_response(response, Target::Any).await
    }

    /// Register a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_user(&self, email: impl Into<String>) -> Result<UserResponse, ClientError> {
        let url = format!("{}/users", self.base_url);
        let request = CreateUserRequest {
            email: email.into(),
        };

        let response = self.client.post(&url).json(&request).send().await?;

        Self::handle_response(response, Target::Any).await
    }

    /// Subscribe a user to a plan.
    ///
    /// # Errors
    ///
    /// - `ClientError::UserNotFound` if the user doesn't exist.
    /// - `ClientError::DuplicateActiveSubscription` if the plan is already active.
    pub async fn create_subscription(
        &self,
        user_id: UserId,
        plan: impl Into<String>,
    ) -> Result<SubscriptionResponse, ClientError> {
        let url = format!("{}/subscriptions", self.base_url);
        let request = CreateSubscriptionRequest {
            user_id,
            plan: plan.into(),
        };

        let response = self.client.post(&url).json(&request).send().await?;

        Self::handle_response(response, Target::UserPlan(user_id, request.plan)).await
    }

    /// List a user's subscriptions, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::UserNotFound` if the user doesn't exist.
    pub async fn list_user_subscriptions(
        &self,
        user_id: UserId,
    ) -> Result<Vec<SubscriptionResponse>, ClientError> {
        let url = format!("{}/users/{user_id}/subscriptions", self.base_url);

        let response = self.client.get(&url).send().await?;

        Self::handle_response(response, Target::User(user_id)).await
    }

    /// Activate or deactivate a subscription.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::SubscriptionNotFound` if the subscription doesn't exist.
    pub async fn update_subscription_status(
        &self,
        subscription_id: SubscriptionId,
        active: bool,
    ) -> Result<SubscriptionResponse, ClientError> {
        let url = format!("{}/subscriptions/{subscription_id}", self.base_url);

        let response = self
            .client
            .patch(&url)
            .query(&[("active", active)])
            .send()
            .await?;

        Self::handle_response(response, Target::Subscription(subscription_id)).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        target: Target,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        let Ok(api_error) = error_body else {
            return Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            });
        };

        let code = api_error.error.code;
        let message = api_error.error.message;
        tracing::debug!(status = status.as_u16(), code = %code, message = %message, "API error");

        // Map specific error codes to typed errors
        let typed = match (code.as_str(), target) {
            ("not_found", Target::User(user_id) | Target::UserPlan(user_id, _)) => {
                Some(ClientError::UserNotFound { user_id })
            }
            ("not_found", Target::Subscription(subscription_id)) => {
                Some(ClientError::SubscriptionNotFound { subscription_id })
            }
            ("conflict", Target::UserPlan(user_id, plan)) => {
                Some(ClientError::DuplicateActiveSubscription { user_id, plan })
            }
            _ => None,
        };

        Err(typed.unwrap_or(ClientError::Api {
            code,
            message,
            status: status.as_u16(),
        }))
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}
