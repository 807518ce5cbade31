//! Authentication service.

use std::sync::Arc;

use crate::{
    bridge::{Adapter, EventSlot},
    errors::{BridgeError, Result},
    sdk::{
        self, AccountInfo, AuthEventSink, AuthResult, LoginFailReason,
        LoginStatus, LoginType, SdkError,
    },
};

/// Snapshot of the logged in account.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Account {
    /// Display name of the account.
    pub display_name: Option<String>,

    /// Login type of the account.
    pub login_type: LoginType,
}

impl From<&dyn AccountInfo> for Account {
    fn from(info: &dyn AccountInfo) -> Self {
        Self {
            display_name: info.display_name(),
            login_type: info.login_type(),
        }
    }
}

/// Callbacks of the authentication events.
pub struct AuthEvents<C> {
    pub on_authentication_return: fn(&C, AuthResult),
    pub on_login_return_with_reason:
        fn(&C, LoginStatus, Option<&Account>, LoginFailReason),
    pub on_logout: fn(&C),
    pub on_zoom_identity_expired: fn(&C),
    pub on_zoom_auth_identity_expired: fn(&C),
}

impl<C> Default for AuthEvents<C> {
    fn default() -> Self {
        Self {
            on_authentication_return: |_, _| {},
            on_login_return_with_reason: |_, _, _, _| {},
            on_logout: |_| {},
            on_zoom_identity_expired: |_| {},
            on_zoom_auth_identity_expired: |_| {},
        }
    }
}

impl<C: Send + Sync> AuthEventSink for Adapter<C, AuthEvents<C>> {
    fn on_authentication_return(&self, result: AuthResult) {
        log::debug!("Authentication returned: {:?}", result);
        (self.table().on_authentication_return)(self.context(), result);
    }

    fn on_login_return_with_reason(
        &self,
        status: LoginStatus,
        account: Option<&dyn AccountInfo>,
        reason: LoginFailReason,
    ) {
        let account = account.map(Account::from);
        (self.table().on_login_return_with_reason)(
            self.context(),
            status,
            account.as_ref(),
            reason,
        );
    }

    fn on_logout(&self) {
        (self.table().on_logout)(self.context());
    }

    fn on_zoom_identity_expired(&self) {
        (self.table().on_zoom_identity_expired)(self.context());
    }

    fn on_zoom_auth_identity_expired(&self) {
        (self.table().on_zoom_auth_identity_expired)(self.context());
    }
}

/// Handle to the SDK authentication service.
#[derive(Debug)]
pub struct AuthServiceHandle {
    /// Wrapped SDK service.
    service: Arc<dyn sdk::AuthService>,

    /// Registered event sink.
    events: EventSlot<dyn AuthEventSink>,
}

impl AuthServiceHandle {
    /// Wraps the provided SDK `service`.
    #[must_use]
    pub fn new(service: Arc<dyn sdk::AuthService>) -> Self {
        Self {
            service,
            events: EventSlot::new(),
        }
    }

    /// Registers the provided `events` bound to the provided `context`,
    /// replacing the previous registration.
    pub fn set_event<C>(&self, context: C, events: AuthEvents<C>) -> SdkError
    where
        C: Send + Sync + 'static,
    {
        let sink: Arc<dyn AuthEventSink> =
            Arc::new(Adapter::new(context, events));
        self.events
            .replace(sink, |sink| self.service.set_event(Some(sink)))
    }

    /// Removes the current events registration.
    pub fn clear_event(&self) -> SdkError {
        self.events.clear(|| self.service.set_event(None))
    }

    /// Authenticates the SDK with the provided `jwt`.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses the authentication.
    pub fn sdk_auth(&self, jwt: &str) -> Result<()> {
        sdk_try!(self.service.sdk_auth(jwt))
    }

    /// Returns result of the last authentication.
    #[must_use]
    pub fn auth_result(&self) -> AuthResult {
        self.service.auth_result()
    }

    /// Returns identity of the authenticated SDK.
    #[must_use]
    pub fn sdk_identity(&self) -> Option<String> {
        self.service.sdk_identity()
    }

    /// Generates URL to log in via SSO in a web browser.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::NullPtr`] if the SDK generates nothing.
    pub fn generate_sso_login_web_url(&self, prefix: &str) -> Result<String> {
        self.service
            .generate_sso_login_web_url(prefix)
            .ok_or_else(|| tracerr::new!(BridgeError::NullPtr))
    }

    /// Logs in with the URI a web browser received after SSO.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses the login.
    pub fn sso_login_with_web_uri_protocol(&self, uri: &str) -> Result<()> {
        sdk_try!(self.service.sso_login_with_web_uri_protocol(uri))
    }

    /// Logs out the current user.
    ///
    /// # Errors
    ///
    /// With [`BridgeError::Sdk`] if the SDK refuses the logout.
    pub fn log_out(&self) -> Result<()> {
        sdk_try!(self.service.log_out())
    }

    /// Returns account of the logged in user.
    #[must_use]
    pub fn account_info(&self) -> Option<Account> {
        self.service
            .account_info()
            .map(|info| Account::from(info.as_ref()))
    }

    /// Returns status of the login.
    #[must_use]
    pub fn login_status(&self) -> LoginStatus {
        self.service.login_status()
    }
}
