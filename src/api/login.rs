use std::sync::Arc;

use axum::{
    Extension,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{spotify, types::AppState, utils, warning};

/// Redirects the browser to the provider's authorization page.
///
/// Issues a fresh random `state` parameter and stores it in the shared state
/// so the callback can verify that the redirect it receives belongs to this
/// login attempt.
pub async fn login(Extension(state): Extension<Arc<AppState>>) -> Response {
    let csrf_state = utils::generate_state_param();
    {
        let mut lock = state.login_state.lock().await;
        *lock = Some(csrf_state.clone());
    }

    match spotify::auth::authorize_url(&state.config, &csrf_state) {
        Ok(auth_url) => Redirect::temporary(&auth_url).into_response(),
        Err(e) => {
            warning!("Could not build the authorization URL: {}", e);
            Html("<h1>Login failed</h1><p>The authorization URL is invalid; check the configuration.</p>")
                .into_response()
        }
    }
}
