//! Client-side authentication state machine.
//!
//! The session is a plain value. The only way to change it is
//! [`Session::reduce`], which takes the current state and one
//! [`SessionAction`] and returns the next state. Nothing here performs I/O;
//! the client crate dispatches actions around its network calls.
//!
//! ```text
//!  Anonymous ──LoginStarted──► Authenticating ──LoginSucceeded──► Authenticated
//!      ▲                             │
//!      └─────────LoginFailed─────────┘
//!
//!  Anonymous ──RegisterStarted──► Registering ──RegisterSucceeded──► OtpPending(email)
//!                                                                       │  ▲
//!                                                           VerifyStarted  VerifyFailed
//!                                                                       ▼  │
//!                                    Authenticated ◄──VerifySucceeded── Authenticating
//! ```
//!
//! Transitions are applied in the order they are dispatched. Two overlapping
//! requests therefore race and the later completion wins; the store does not
//! guard against it.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{AuthToken, Email, Role};

/// Identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Account email.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Marketplace role; drives the dashboard redirect.
    pub role: Role,
    /// Site the user manages, if any.
    #[serde(default)]
    pub location: Option<String>,
}

/// A user together with the token that authenticates them.
///
/// Keeping both in one value makes "token present iff user present" hold by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    /// Who signed in.
    pub user: SessionUser,
    /// Bearer credential for API calls.
    pub token: AuthToken,
}

/// Request currently in flight, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    /// Email/password login.
    Login,
    /// Account registration.
    Register,
    /// OTP submission.
    VerifyOtp,
}

/// Coarse state of the session, derived from its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nobody signed in and nothing pending.
    Anonymous,
    /// A login or OTP verification is in flight.
    Authenticating,
    /// A registration request is in flight.
    Registering,
    /// Registered; waiting for the code sent to this address.
    OtpPending(Email),
    /// Signed in.
    Authenticated,
}

/// Partial update for the signed-in user. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New email.
    #[serde(default)]
    pub email: Option<Email>,
    /// New role.
    #[serde(default)]
    pub role: Option<Role>,
    /// New location; `Some(None)` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Named transitions of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Login request sent.
    LoginStarted,
    /// Login accepted.
    LoginSucceeded(AuthGrant),
    /// Login rejected or failed in transport.
    LoginFailed(String),
    /// Registration request sent.
    RegisterStarted,
    /// Registration accepted; a code was sent to this address.
    RegisterSucceeded(Email),
    /// Registration rejected or failed in transport.
    RegisterFailed(String),
    /// OTP submitted.
    VerifyStarted,
    /// OTP accepted.
    VerifySucceeded(AuthGrant),
    /// OTP rejected or failed in transport.
    VerifyFailed(String),
    /// Sign out.
    Logout,
    /// Shallow-merge fields into the signed-in user.
    UpdateUser(UserPatch),
}

impl SessionAction {
    /// Stable name for logging; carries no payload.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LoginStarted => "login_started",
            Self::LoginSucceeded(_) => "login_succeeded",
            Self::LoginFailed(_) => "login_failed",
            Self::RegisterStarted => "register_started",
            Self::RegisterSucceeded(_) => "register_succeeded",
            Self::RegisterFailed(_) => "register_failed",
            Self::VerifyStarted => "verify_started",
            Self::VerifySucceeded(_) => "verify_succeeded",
            Self::VerifyFailed(_) => "verify_failed",
            Self::Logout => "logout",
            Self::UpdateUser(_) => "update_user",
        }
    }
}

/// Authentication state of the running client.
///
/// Created empty at startup and never written to storage, so every new
/// process starts [`SessionPhase::Anonymous`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    auth: Option<AuthGrant>,
    pending: Option<PendingRequest>,
    otp_email: Option<Email>,
    error: Option<String>,
}

impl Session {
    /// The initial, anonymous session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.auth.as_ref().map(|auth| &auth.user)
    }

    /// Bearer token, if signed in.
    #[must_use]
    pub fn token(&self) -> Option<&AuthToken> {
        self.auth.as_ref().map(|auth| &auth.token)
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Whether an authentication request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Which request is outstanding.
    #[must_use]
    pub const fn pending(&self) -> Option<PendingRequest> {
        self.pending
    }

    /// Address awaiting OTP verification.
    #[must_use]
    pub const fn otp_email(&self) -> Option<&Email> {
        self.otp_email.as_ref()
    }

    /// Last failure message, cleared when the next request starts.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current state-machine phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.auth.is_some() {
            return SessionPhase::Authenticated;
        }
        match (self.pending, &self.otp_email) {
            (Some(PendingRequest::Login | PendingRequest::VerifyOtp), _) => {
                SessionPhase::Authenticating
            }
            (Some(PendingRequest::Register), _) => SessionPhase::Registering,
            (None, Some(email)) => SessionPhase::OtpPending(email.clone()),
            (None, None) => SessionPhase::Anonymous,
        }
    }

    /// Apply one action and return the next session.
    #[must_use]
    pub fn reduce(mut self, action: SessionAction) -> Self {
        match action {
            SessionAction::LoginStarted => self.start(PendingRequest::Login),
            SessionAction::RegisterStarted => self.start(PendingRequest::Register),
            SessionAction::VerifyStarted => self.start(PendingRequest::VerifyOtp),
            SessionAction::LoginSucceeded(grant) => {
                self.pending = None;
                self.error = None;
                self.auth = Some(grant);
            }
            SessionAction::LoginFailed(message) => {
                self.pending = None;
                self.auth = None;
                self.error = Some(message);
            }
            SessionAction::RegisterSucceeded(email) => {
                self.pending = None;
                self.error = None;
                self.otp_email = Some(email);
            }
            SessionAction::RegisterFailed(message) | SessionAction::VerifyFailed(message) => {
                self.pending = None;
                self.error = Some(message);
            }
            SessionAction::VerifySucceeded(grant) => {
                self.pending = None;
                self.error = None;
                self.otp_email = None;
                self.auth = Some(grant);
            }
            SessionAction::Logout => return Self::default(),
            SessionAction::UpdateUser(patch) => {
                if let Some(auth) = self.auth.as_mut() {
                    patch.apply(&mut auth.user);
                }
            }
        }
        self
    }

    fn start(&mut self, request: PendingRequest) {
        self.pending = Some(request);
        self.error = None;
    }
}

impl UserPatch {
    fn apply(self, user: &mut SessionUser) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(location) = self.location {
            user.location = location;
        }
    }
}

/// Serialized snapshot for display; the token is never included.
impl Serialize for Session {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct View<'a> {
            user: Option<&'a SessionUser>,
            is_authenticated: bool,
            is_loading: bool,
            otp_email: Option<&'a Email>,
            error: Option<&'a str>,
        }

        View {
            user: self.user(),
            is_authenticated: self.is_authenticated(),
            is_loading: self.is_loading(),
            otp_email: self.otp_email(),
            error: self.error(),
        }
        .serialize(serializer)
    }
}
