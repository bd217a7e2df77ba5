//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use bookstore_app::auth::AuthServiceError;

use crate::{envelope::ApiError, extensions::*, state::State};

/// Resolve the bearer token to a [`Principal`](bookstore_app::auth::Principal) and
/// store it in the depot.
#[salvo::handler]
pub(crate) async fn authenticate(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        reject(
            res,
            ctrl,
            ApiError::unauthorized("Missing or invalid Authorization header"),
        );

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(api_error) => {
            reject(res, ctrl, api_error);

            return;
        }
    };

    let principal = match state.app.auth.authenticate_bearer(token).await {
        Ok(principal) => principal,
        Err(AuthServiceError::NotFound) => {
            reject(res, ctrl, ApiError::unauthorized("Invalid API token"));

            return;
        }
        Err(AuthServiceError::Sql(source)) => {
            error!("failed to validate api token: {source}");

            reject(res, ctrl, ApiError::internal());

            return;
        }
        Err(AuthServiceError::Token(source)) => {
            error!("failed to process api token: {source}");

            reject(res, ctrl, ApiError::internal());

            return;
        }
    };

    depot.inject(principal);

    ctrl.call_next(req, depot, res).await;
}

/// Admit only principals holding the admin role. Must run after [`authenticate`].
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.principal_or_401() {
        Ok(principal) if principal.is_admin() => {
            ctrl.call_next(req, depot, res).await;
        }
        Ok(principal) => {
            tracing::warn!(token = %principal.token_uuid, role = %principal.role, "admin route denied");

            reject(res, ctrl, ApiError::forbidden("Admin access required"));
        }
        Err(api_error) => reject(res, ctrl, api_error),
    }
}

fn reject(res: &mut Response, ctrl: &mut FlowCtrl, error: ApiError) {
    res.render(error);
    ctrl.skip_rest();
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
