//! Auth gate: advisory access checks for pages and menu entries.
//!
//! **The gate is not a security boundary.** It only keeps the UI from
//! offering navigations that would dead-end. The identity and document
//! services enforce the real permissions on every request, and nothing in
//! this module may be relied on to protect data.
//!
//! # Pieces
//!
//! | Type | Role |
//! |------|------|
//! | [`IdentityProvider`] | External "who is the current caller" query |
//! | [`AuthStatus`] | Result of one query: `Pending` or a resolved [`AuthContext`] |
//! | [`AccessRequirement`] | What a destination needs: sign-in, a role |
//! | [`AuthGate`] | Turns status + requirement into a [`GateDecision`] |
//! | [`PageAccess`] | Per-page `Unchecked → Checking → Allowed / Denied` machine |
//!
//! # Fail closed
//!
//! A failed identity query is "not authenticated", never an error the page
//! sees. A query still in flight yields [`GateDecision::Pending`], which
//! never permits navigation; pages show a neutral loading state for it.
//!
//! # No memoization
//!
//! Every [`AuthGate::evaluate`] / [`AuthGate::query`] call asks the provider
//! again. Pages re-derive their auth state on mount and on every path change.
//!
//! # Example
//!
//! ```
//! use suite_navigator::{AccessRequirement, AuthContext, AuthGate, AuthStatus, DenyReason, Role};
//!
//! let signed_out = AuthStatus::Resolved(AuthContext::anonymous());
//! let decision = AuthGate::check(&signed_out, "/profile", &AccessRequirement::signed_in());
//! assert_eq!(decision.deny_reason(), Some(&DenyReason::SignInRequired));
//!
//! let member = AuthStatus::Resolved(AuthContext::signed_in(Role::User));
//! let admin_only = AccessRequirement::role(Role::Admin);
//! let decision = AuthGate::check(&member, "/admin/bookings", &admin_only);
//! assert_eq!(
//!     decision.deny_reason(),
//!     Some(&DenyReason::InsufficientRole { required: Role::Admin })
//! );
//! ```

use crate::error::IdentityError;
use crate::state::NavigationState;
use crate::{debug_log, trace_log, warn_log};
use serde::de::{Deserializer, IgnoredAny};
use serde::Deserialize;
use std::fmt;

// ============================================================================
// Role & Identity
// ============================================================================

/// Caller role. Closed set; unknown values read as [`Role::User`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Option<String>")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Read a free-form role preference. Only the exact string `admin`
    /// grants [`Role::Admin`]; anything else is the least privileged role.
    pub fn from_pref(value: Option<&str>) -> Self {
        match value {
            Some("admin") => Self::Admin,
            _ => Self::User,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl From<Option<String>> for Role {
    fn from(value: Option<String>) -> Self {
        Self::from_pref(value.as_deref())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signed-in caller as reported by the identity service.
///
/// Deserializes from the service's account document:
///
/// ```
/// use suite_navigator::{Identity, Role};
///
/// let json = r#"{ "$id": "u-81", "name": "Ama", "prefs": { "role": "admin", "theme": "dark" } }"#;
/// let identity: Identity = serde_json::from_str(json).unwrap();
/// assert_eq!(identity.id, "u-81");
/// assert_eq!(identity.role, Role::Admin);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "AccountDocument")]
pub struct Identity {
    pub id: String,
    pub role: Role,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            name: None,
            email: None,
        }
    }
}

#[derive(Deserialize)]
struct AccountDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    prefs: AccountPrefs,
}

#[derive(Default, Deserialize)]
struct AccountPrefs {
    #[serde(default, deserialize_with = "lenient")]
    role: Role,
}

/// Preferences are free-form: a value of the wrong shape reads as the
/// default instead of failing the whole document.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Value(T),
        Other(IgnoredAny),
    }

    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Value(value) => value,
        Lenient::Other(_) => T::default(),
    })
}

impl From<AccountDocument> for Identity {
    fn from(doc: AccountDocument) -> Self {
        Self {
            id: doc.id,
            role: doc.prefs.role,
            name: doc.name,
            email: doc.email,
        }
    }
}

/// External identity collaborator.
///
/// Resolves with the current caller, or fails when there is no session or
/// the service is unreachable. The gate treats every failure as "signed out".
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    /// Ask the identity service who the current caller is.
    async fn current_caller(&self) -> Result<Identity, IdentityError>;
}

impl<P: IdentityProvider + ?Sized> IdentityProvider for &P {
    async fn current_caller(&self) -> Result<Identity, IdentityError> {
        (**self).current_caller().await
    }
}

// ============================================================================
// AuthContext & AuthStatus
// ============================================================================

/// Derived capability of the caller. Recomputed per query, never stored in
/// the navigation store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub is_authenticated: bool,
    pub role: Role,
}

impl AuthContext {
    /// A caller with no session.
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            role: Role::User,
        }
    }

    /// A signed-in caller with `role`.
    pub fn signed_in(role: Role) -> Self {
        Self {
            is_authenticated: true,
            role,
        }
    }

    pub fn from_identity(identity: &Identity) -> Self {
        Self::signed_in(identity.role)
    }
}

/// Outcome of one identity query as the UI sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// The query has not resolved yet.
    Pending,
    /// The query resolved. Failures resolve to [`AuthContext::anonymous`].
    Resolved(AuthContext),
}

impl AuthStatus {
    /// Fold a query result into a status. Errors become "signed out".
    pub fn from_query(result: &Result<Identity, IdentityError>) -> Self {
        match result {
            Ok(identity) => Self::Resolved(AuthContext::from_identity(identity)),
            Err(err) if err.is_no_session() => {
                debug_log!("identity query: no session");
                Self::Resolved(AuthContext::anonymous())
            }
            Err(err) => {
                warn_log!("identity query failed, treating caller as signed out: {}", err);
                Self::Resolved(AuthContext::anonymous())
            }
        }
    }

    /// `true` once resolved and signed in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Resolved(ctx) if ctx.is_authenticated)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

// ============================================================================
// Requirements & decisions
// ============================================================================

/// What a destination requires of the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRequirement {
    pub requires_auth: bool,
    pub required_role: Option<Role>,
    /// Where the page sends a signed-in caller lacking `required_role`.
    pub redirect: Option<String>,
}

impl AccessRequirement {
    /// Open to everyone.
    pub fn public() -> Self {
        Self::default()
    }

    /// Any signed-in caller.
    pub fn signed_in() -> Self {
        Self {
            requires_auth: true,
            ..Self::default()
        }
    }

    /// Signed-in callers holding `role`.
    pub fn role(role: Role) -> Self {
        Self {
            requires_auth: true,
            required_role: Some(role),
            redirect: None,
        }
    }

    #[must_use]
    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect = Some(path.into());
        self
    }
}

/// Why the gate refused a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The destination needs a signed-in caller and there is none.
    SignInRequired,
    /// The caller is signed in but lacks the role.
    InsufficientRole { required: Role },
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignInRequired => f.write_str("Please sign in to access this feature."),
            Self::InsufficientRole { required } => {
                write!(f, "This page requires the {} role.", required)
            }
        }
    }
}

/// Decision of the auth gate for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    Denied(DenyReason),
    /// Identity still unknown. Never permits navigation.
    Pending,
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn deny_reason(&self) -> Option<&DenyReason> {
        match self {
            Self::Denied(reason) => Some(reason),
            _ => None,
        }
    }

    /// Collapse `Pending` into a sign-in denial, for callers that must act
    /// now (a click handler cannot wait on a loading state).
    pub fn fail_closed(self) -> Self {
        match self {
            Self::Pending => Self::Denied(DenyReason::SignInRequired),
            decided => decided,
        }
    }
}

/// Stateless access checks.
pub struct AuthGate;

impl AuthGate {
    /// Decide whether `destination` is open to the caller described by
    /// `status`.
    pub fn check(
        status: &AuthStatus,
        destination: &str,
        requirement: &AccessRequirement,
    ) -> GateDecision {
        if !requirement.requires_auth {
            return GateDecision::Allowed;
        }

        let decision = match status {
            AuthStatus::Pending => GateDecision::Pending,
            AuthStatus::Resolved(ctx) if !ctx.is_authenticated => {
                GateDecision::Denied(DenyReason::SignInRequired)
            }
            AuthStatus::Resolved(ctx) => match requirement.required_role {
                Some(required) if ctx.role != required => {
                    GateDecision::Denied(DenyReason::InsufficientRole { required })
                }
                _ => GateDecision::Allowed,
            },
        };
        trace_log!("gate '{}' ({:?}) → {:?}", destination, status, decision);
        decision
    }

    /// Query the identity provider once and fold the result into a status.
    pub async fn query<P: IdentityProvider>(provider: &P) -> AuthStatus {
        let result = provider.current_caller().await;
        AuthStatus::from_query(&result)
    }

    /// Query the provider and check `destination` against the fresh status.
    pub async fn evaluate<P: IdentityProvider>(
        provider: &P,
        destination: &str,
        requirement: &AccessRequirement,
    ) -> GateDecision {
        let status = Self::query(provider).await;
        Self::check(&status, destination, requirement)
    }
}

// ============================================================================
// PageAccess
// ============================================================================

/// Access state of one mounted page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    Unchecked,
    /// An identity query is in flight; render a neutral loading state.
    Checking,
    Allowed,
    Denied(DenyReason),
}

/// Identifies one access check. Results are only applied while the ticket
/// is still the page's latest and the navigation it was issued for is still
/// current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTicket {
    navigation_id: usize,
    path: String,
    seq: u64,
}

impl AccessTicket {
    pub fn navigation_id(&self) -> usize {
        self.navigation_id
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Per-page access state machine.
///
/// ```text
/// Unchecked ──begin──▶ Checking ──resolve──▶ Allowed | Denied
///                         ▲                        │
///                         └──────── begin ─────────┘  (every path change)
/// ```
///
/// A page calls [`begin`](Self::begin) when it mounts and whenever the
/// current path changes, runs the identity query, then hands the status to
/// [`resolve`](Self::resolve). Results for a superseded ticket, a stale
/// navigation, or a torn-down page are discarded.
#[derive(Debug, Clone)]
pub struct PageAccess {
    requirement: AccessRequirement,
    state: AccessState,
    outstanding: Option<AccessTicket>,
    next_seq: u64,
}

impl PageAccess {
    pub fn new(requirement: AccessRequirement) -> Self {
        Self {
            requirement,
            state: AccessState::Unchecked,
            outstanding: None,
            next_seq: 0,
        }
    }

    pub fn requirement(&self) -> &AccessRequirement {
        &self.requirement
    }

    pub fn state(&self) -> AccessState {
        self.state
    }

    /// Start a check for the navigation currently in `nav`.
    pub fn begin(&mut self, nav: &NavigationState) -> AccessTicket {
        self.next_seq += 1;
        let ticket = AccessTicket {
            navigation_id: nav.navigation_id(),
            path: nav.current_path().to_string(),
            seq: self.next_seq,
        };
        self.outstanding = Some(ticket.clone());
        self.state = AccessState::Checking;
        ticket
    }

    /// Apply the status a check resolved with.
    ///
    /// Returns `false` (and changes nothing) when the result is stale: the
    /// ticket was superseded, the page was torn down, or the store has moved
    /// on to another navigation. A `Pending` status leaves the page checking.
    pub fn resolve(
        &mut self,
        ticket: &AccessTicket,
        status: &AuthStatus,
        nav: &NavigationState,
    ) -> bool {
        if self.outstanding.as_ref() != Some(ticket) {
            debug_log!(
                "discarding auth result for '{}': ticket superseded or page torn down",
                ticket.path
            );
            return false;
        }
        if ticket.navigation_id != nav.navigation_id() || ticket.path != nav.current_path() {
            debug_log!(
                "discarding auth result for '{}': navigation moved on to '{}'",
                ticket.path,
                nav.current_path()
            );
            self.outstanding = None;
            return false;
        }

        let decision = AuthGate::check(status, &ticket.path, &self.requirement);
        self.state = match decision {
            GateDecision::Pending => return false,
            GateDecision::Allowed => AccessState::Allowed,
            GateDecision::Denied(reason) => AccessState::Denied(reason),
        };
        self.outstanding = None;
        true
    }

    /// Drop any in-flight check; its result will be discarded.
    pub fn teardown(&mut self) {
        self.outstanding = None;
    }

    /// Where a page should send a signed-in caller who lacks the role.
    ///
    /// A caller who is not signed in stays on the page and is shown the
    /// sign-in reason instead.
    pub fn redirect(&self) -> Option<&str> {
        match self.state {
            AccessState::Denied(DenyReason::InsufficientRole { .. }) => {
                self.requirement.redirect.as_deref()
            }
            _ => None,
        }
    }
}
