use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::session::{sign_in, sign_out, LOGIN_PATH};
use crate::auth::store::verify_credentials;
use crate::errors::AppError;
use crate::render;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid username or password.";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /admin_login
pub async fn handle_login_form() -> Html<String> {
    Html(render::login_page(None))
}

/// POST /admin_login
pub async fn handle_login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match verify_credentials(&state.db, &form.username, &form.password).await? {
        Some(admin) => {
            info!("Admin '{}' (id {}) logged in", admin.username, admin.id);
            Ok((sign_in(jar), Redirect::to("/")).into_response())
        }
        None => {
            warn!("Failed login attempt for '{}'", form.username);
            Ok(Html(render::login_page(Some(INVALID_CREDENTIALS))).into_response())
        }
    }
}

/// GET /logout
pub async fn handle_logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    (sign_out(jar), Redirect::to(LOGIN_PATH))
}
