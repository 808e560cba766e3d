//! Request extractor for the authenticated account.

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};

use crate::{
    AppState,
    auth::session::{self, SessionData},
    errors::Error,
    types::AccountId,
};

/// The account behind the current request's session.
///
/// Declaring this as a handler parameter is the session check: extraction
/// fails with 401 before the handler body runs when no valid session cookie
/// is presented. Use `Option<CurrentAccount>` for endpoints that report
/// authentication state instead of requiring it.
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub id: AccountId,
    pub nombre: String,
    pub email: String,
    pub restaurante: String,
}

impl From<SessionData> for CurrentAccount {
    fn from(data: SessionData) -> Self {
        Self {
            id: data.account_id,
            nombre: data.nombre,
            email: data.email,
            restaurante: data.restaurante,
        }
    }
}

fn account_from_parts(parts: &Parts, state: &AppState) -> Option<CurrentAccount> {
    let token = session::token_from_headers(&parts.headers, &state.config.auth.session.cookie_name)?;
    state.sessions.get(&token).map(CurrentAccount::from)
}

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        account_from_parts(parts, state).ok_or_else(Error::unauthenticated)
    }
}

impl OptionalFromRequestParts<AppState> for CurrentAccount {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Option<Self>, Self::Rejection> {
        Ok(account_from_parts(parts, state))
    }
}
