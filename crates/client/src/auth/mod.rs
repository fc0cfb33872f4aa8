//! Authentication flow.
//!
//! [`AuthFlow`] sequences each operation the same way: validate input, dispatch
//! the start action, await the [`Authenticator`], then dispatch success or
//! failure. Validation failures return before anything is dispatched.
//!
//! Two authenticators exist. [`DemoAuthenticator`] resolves identity from a
//! fixed email table and never touches the network; [`ApiAuthenticator`] calls
//! the backend. [`AnyAuthenticator`] picks one from configuration.

mod demo;
mod error;
mod remote;

pub use demo::DemoAuthenticator;
pub use error::AuthError;
pub use remote::ApiAuthenticator;

use std::future::Future;

use mofresh_core::{
    AuthGrant, Dashboard, Email, LoginForm, OtpCode, RegistrationForm, Session, SessionAction,
    UserPatch, ValidationError,
};
use tracing::{info, instrument, warn};

use crate::config::AuthMode;
use crate::error::ApiError;
use crate::gateway::ApiClient;
use crate::models::Attachment;
use crate::store::SessionStore;

/// Performs the remote half of each authentication step.
pub trait Authenticator: Send + Sync {
    /// Check credentials and issue a grant.
    fn login(&self, form: &LoginForm) -> impl Future<Output = Result<AuthGrant, ApiError>> + Send;

    /// Create an account; a code is then sent to `form.email`.
    fn register(
        &self,
        form: &RegistrationForm,
        documents: Vec<Attachment>,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Exchange a code for a grant.
    fn verify_otp(
        &self,
        email: &Email,
        code: &OtpCode,
    ) -> impl Future<Output = Result<AuthGrant, ApiError>> + Send;

    /// Send a fresh code.
    fn resend_otp(&self, email: &Email) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Authenticator chosen at runtime.
#[derive(Debug)]
pub enum AnyAuthenticator {
    Demo(DemoAuthenticator),
    Api(ApiAuthenticator),
}

impl AnyAuthenticator {
    /// The authenticator for a configured mode.
    #[must_use]
    pub fn for_mode(mode: AuthMode, client: &ApiClient) -> Self {
        match mode {
            AuthMode::Demo => Self::Demo(DemoAuthenticator::new()),
            AuthMode::Api => Self::Api(ApiAuthenticator::new(client.clone())),
        }
    }
}

impl Authenticator for AnyAuthenticator {
    async fn login(&self, form: &LoginForm) -> Result<AuthGrant, ApiError> {
        match self {
            Self::Demo(inner) => inner.login(form).await,
            Self::Api(inner) => inner.login(form).await,
        }
    }

    async fn register(
        &self,
        form: &RegistrationForm,
        documents: Vec<Attachment>,
    ) -> Result<(), ApiError> {
        match self {
            Self::Demo(inner) => inner.register(form, documents).await,
            Self::Api(inner) => inner.register(form, documents).await,
        }
    }

    async fn verify_otp(&self, email: &Email, code: &OtpCode) -> Result<AuthGrant, ApiError> {
        match self {
            Self::Demo(inner) => inner.verify_otp(email, code).await,
            Self::Api(inner) => inner.verify_otp(email, code).await,
        }
    }

    async fn resend_otp(&self, email: &Email) -> Result<(), ApiError> {
        match self {
            Self::Demo(inner) => inner.resend_otp(email).await,
            Self::Api(inner) => inner.resend_otp(email).await,
        }
    }
}

/// Session-mutating authentication operations.
#[derive(Debug)]
pub struct AuthFlow<A> {
    authenticator: A,
    session: SessionStore,
}

impl<A: Authenticator> AuthFlow<A> {
    /// Drive `session` through `authenticator`.
    #[must_use]
    pub const fn new(authenticator: A, session: SessionStore) -> Self {
        Self {
            authenticator,
            session,
        }
    }

    /// The session this flow updates.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Sign in and return the dashboard for the user's role.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for blank or malformed input, with the
    /// session untouched, and [`AuthError::Api`] when the login is rejected.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Dashboard, AuthError> {
        let form = LoginForm::parse(email, password)?;

        self.session.dispatch(SessionAction::LoginStarted);
        match self.authenticator.login(&form).await {
            Ok(grant) => {
                let dashboard = Dashboard::for_role(grant.user.role);
                info!(role = %grant.user.role, dashboard = %dashboard, "Signed in");
                self.session.dispatch(SessionAction::LoginSucceeded(grant));
                Ok(dashboard)
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.session.dispatch(SessionAction::LoginFailed(e.message()));
                Err(e.into())
            }
        }
    }

    /// Register an account and return the address awaiting verification.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for blank or malformed input and
    /// [`AuthError::Api`] when registration is rejected.
    #[instrument(skip(self, full_name, phone, password, documents))]
    pub async fn register(
        &self,
        full_name: &str,
        phone: &str,
        email: &str,
        password: &str,
        documents: Vec<Attachment>,
    ) -> Result<Email, AuthError> {
        let form = RegistrationForm::parse(full_name, phone, email, password)?;

        self.session.dispatch(SessionAction::RegisterStarted);
        match self.authenticator.register(&form, documents).await {
            Ok(()) => {
                info!(email = %form.email, "Registered; awaiting verification");
                self.session
                    .dispatch(SessionAction::RegisterSucceeded(form.email.clone()));
                Ok(form.email)
            }
            Err(e) => {
                warn!(error = %e, "Registration failed");
                self.session.dispatch(SessionAction::RegisterFailed(e.message()));
                Err(e.into())
            }
        }
    }

    /// Submit the verification code for the pending registration.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if the code is not exactly
    /// [`OtpCode::LENGTH`] characters or nothing is pending (nothing is sent in
    /// either case), and [`AuthError::Api`] if the code is rejected.
    #[instrument(skip(self, code))]
    pub async fn verify_otp(&self, code: &str) -> Result<Dashboard, AuthError> {
        let code = OtpCode::parse(code)?;
        let email = self.pending_email()?;

        self.session.dispatch(SessionAction::VerifyStarted);
        match self.authenticator.verify_otp(&email, &code).await {
            Ok(grant) => {
                let dashboard = Dashboard::for_role(grant.user.role);
                info!(email = %email, dashboard = %dashboard, "Verified");
                self.session.dispatch(SessionAction::VerifySucceeded(grant));
                Ok(dashboard)
            }
            Err(e) => {
                warn!(error = %e, "Verification failed");
                self.session.dispatch(SessionAction::VerifyFailed(e.message()));
                Err(e.into())
            }
        }
    }

    /// Request a new code for the pending registration. The session does not
    /// change.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if nothing is pending and
    /// [`AuthError::Api`] if the request fails.
    #[instrument(skip(self))]
    pub async fn resend_otp(&self) -> Result<(), AuthError> {
        let email = self.pending_email()?;
        self.authenticator.resend_otp(&email).await.map_err(|e| {
            warn!(error = %e, "Resend failed");
            AuthError::from(e)
        })
    }

    /// Sign out.
    pub fn logout(&self) -> Session {
        info!("Signed out");
        self.session.dispatch(SessionAction::Logout)
    }

    /// Merge fields into the signed-in user; no-op when signed out.
    pub fn update_user(&self, patch: UserPatch) -> Session {
        self.session.dispatch(SessionAction::UpdateUser(patch))
    }

    /// Dashboard for the signed-in user, if any.
    #[must_use]
    pub fn dashboard(&self) -> Option<Dashboard> {
        self.session
            .snapshot()
            .user()
            .map(|user| Dashboard::for_role(user.role))
    }

    fn pending_email(&self) -> Result<Email, ValidationError> {
        self.session
            .snapshot()
            .otp_email()
            .cloned()
            .ok_or(ValidationError::NoPendingVerification)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mofresh_core::{Role, SessionPhase};

    use super::*;

    /// Counts calls and fails every one of them.
    #[derive(Default)]
    struct Rejecting {
        calls: AtomicUsize,
    }

    impl Rejecting {
        fn fail(&self) -> ApiError {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ApiError::from_response(401, r#"{"message":"Invalid credentials"}"#)
        }
    }

    impl Authenticator for Rejecting {
        async fn login(&self, _form: &LoginForm) -> Result<AuthGrant, ApiError> {
            Err(self.fail())
        }

        async fn register(
            &self,
            _form: &RegistrationForm,
            _documents: Vec<Attachment>,
        ) -> Result<(), ApiError> {
            Err(self.fail())
        }

        async fn verify_otp(&self, _email: &Email, _code: &OtpCode) -> Result<AuthGrant, ApiError> {
            Err(self.fail())
        }

        async fn resend_otp(&self, _email: &Email) -> Result<(), ApiError> {
            Err(self.fail())
        }
    }

    fn demo() -> AuthFlow<DemoAuthenticator> {
        AuthFlow::new(DemoAuthenticator::new(), SessionStore::new())
    }

    #[tokio::test]
    async fn test_demo_admin_login() {
        let flow = demo();
        let dashboard = flow.login("admin@mofresh.rw", "x").await.unwrap();
        assert_eq!(dashboard, Dashboard::Admin);

        let session = flow.session().snapshot();
        assert!(session.is_authenticated());
        assert!(!session.is_loading());
        let user = session.user().unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.location, None);
    }

    #[tokio::test]
    async fn test_demo_manager_login_carries_location() {
        let flow = demo();
        assert_eq!(
            flow.login("kigali@mofresh.rw", "x").await.unwrap(),
            Dashboard::Manager
        );
        let session = flow.session().snapshot();
        assert_eq!(session.user().unwrap().location.as_deref(), Some("Kigali"));
        assert_eq!(flow.dashboard(), Some(Dashboard::Manager));
    }

    #[tokio::test]
    async fn test_blank_password_never_dispatches() {
        let flow = demo();
        let err = flow.login("admin@mofresh.rw", "").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(flow.session().snapshot(), Session::new());
    }

    #[tokio::test]
    async fn test_demo_registration_then_verify() {
        let flow = demo();
        let email = flow
            .register("Aline Uwase", "0788000000", "aline@mofresh.rw", "pw", Vec::new())
            .await
            .unwrap();
        assert_eq!(flow.session().snapshot().phase(), SessionPhase::OtpPending(email));

        flow.resend_otp().await.unwrap();
        assert!(flow.session().snapshot().otp_email().is_some());

        assert_eq!(flow.verify_otp("123456").await.unwrap(), Dashboard::Buyer);
        let session = flow.session().snapshot();
        assert!(session.otp_email().is_none());
        assert_eq!(session.user().unwrap().name, "Aline Uwase");
    }

    #[tokio::test]
    async fn test_wrong_length_code_is_not_sent() {
        let flow = AuthFlow::new(Rejecting::default(), SessionStore::new());
        flow.session()
            .dispatch(SessionAction::RegisterSucceeded(Email::parse("a@mofresh.rw").unwrap()));
        let before = flow.session().snapshot();

        for code in ["12345", "1234567", ""] {
            let err = flow.verify_otp(code).await.unwrap_err();
            assert!(err.is_validation(), "code: {code}");
        }
        assert_eq!(flow.authenticator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(flow.session().snapshot(), before);
    }

    #[tokio::test]
    async fn test_verify_without_registration_is_rejected() {
        let flow = AuthFlow::new(Rejecting::default(), SessionStore::new());
        assert_eq!(
            flow.verify_otp("123456").await.unwrap_err(),
            AuthError::Validation(ValidationError::NoPendingVerification)
        );
        assert!(flow.resend_otp().await.unwrap_err().is_validation());
        assert_eq!(flow.authenticator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rejected_login_records_message() {
        let flow = AuthFlow::new(Rejecting::default(), SessionStore::new());
        let err = flow.login("buyer@mofresh.rw", "wrong").await.unwrap_err();
        assert_eq!(err.message(), "Invalid credentials");

        let session = flow.session().snapshot();
        assert_eq!(session.phase(), SessionPhase::Anonymous);
        assert_eq!(session.error(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_rejected_code_stays_pending() {
        let flow = AuthFlow::new(Rejecting::default(), SessionStore::new());
        let email = Email::parse("a@mofresh.rw").unwrap();
        flow.session()
            .dispatch(SessionAction::RegisterSucceeded(email.clone()));

        assert!(!flow.verify_otp("000000").await.unwrap_err().is_validation());
        assert_eq!(flow.session().snapshot().phase(), SessionPhase::OtpPending(email));
        assert_eq!(flow.authenticator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_logout_and_update_user() {
        let flow = demo();
        flow.login("supplier@mofresh.rw", "x").await.unwrap();

        let session = flow.update_user(UserPatch {
            name: Some("Fresh Farms".to_string()),
            ..UserPatch::default()
        });
        assert_eq!(session.user().unwrap().name, "Fresh Farms");

        assert_eq!(flow.logout(), Session::new());
        assert_eq!(flow.dashboard(), None);
    }
}
