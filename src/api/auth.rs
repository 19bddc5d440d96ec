// src/api/auth.rs

use async_trait::async_trait;
use reqwest::Method;

use crate::{
    api::client::{ApiClient, Exchange},
    common::error::ApiError,
    models::auth::{
        AdminProfile, AdminSignUp, AuthResponse, PasswordSignIn, ProfileEnvelope, Receipt,
        SignInRequest, VerifyCodeRequest,
    },
};

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn fetch_admin_info(&self) -> Result<AdminProfile, ApiError>;
    async fn sign_in_admin(&self, credentials: &PasswordSignIn) -> Result<AuthResponse, ApiError>;
    async fn send_sign_in_code(&self, request: &SignInRequest) -> Result<Receipt, ApiError>;
    async fn verify_code(&self, request: &VerifyCodeRequest) -> Result<AuthResponse, ApiError>;
    async fn sign_up_admin(&self, input: &AdminSignUp) -> Result<AuthResponse, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
}

// O token vem no corpo ou no Set-Cookie (quando o backend só seta o cookie)
fn into_auth_response(exchange: Exchange) -> Result<AuthResponse, ApiError> {
    let cookie_token = exchange.auth_cookie();
    let mut response: AuthResponse = exchange.decode()?;
    if response.token.as_deref().is_none_or(str::is_empty) {
        response.token = cookie_token;
    }
    Ok(response)
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn fetch_admin_info(&self) -> Result<AdminProfile, ApiError> {
        let envelope: ProfileEnvelope = self
            .get("/auth-admin/fetch-admin-info", "Error fetching admin info.")
            .await?
            .decode()?;
        Ok(envelope.into_profile())
    }

    async fn sign_in_admin(&self, credentials: &PasswordSignIn) -> Result<AuthResponse, ApiError> {
        let exchange = self
            .send(Method::POST, "/auth-admin/signin-admin", Some(credentials), "An error occurred")
            .await?;
        into_auth_response(exchange)
    }

    async fn send_sign_in_code(&self, request: &SignInRequest) -> Result<Receipt, ApiError> {
        self.send(Method::POST, "/auth-admin/send-code", Some(request), "Failed to send verification code.")
            .await?
            .decode()
    }

    async fn verify_code(&self, request: &VerifyCodeRequest) -> Result<AuthResponse, ApiError> {
        let exchange = self
            .send(Method::POST, "/auth-admin/verify-code", Some(request), "Invalid verification code.")
            .await?;
        into_auth_response(exchange)
    }

    async fn sign_up_admin(&self, input: &AdminSignUp) -> Result<AuthResponse, ApiError> {
        let exchange = self
            .send(Method::POST, "/auth-admin/signup-admin", Some(input), "An error occurred during sign up.")
            .await?;
        into_auth_response(exchange)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.send::<()>(Method::POST, "/auth-user/logout", None, "Logout failed.")
            .await?;
        Ok(())
    }
}
