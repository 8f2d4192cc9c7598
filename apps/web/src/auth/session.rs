use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};

/// Name of the signed cookie carrying the admin flag.
pub const SESSION_COOKIE: &str = "admin_session";
const LOGGED_IN: &str = "1";

/// Where unauthenticated page requests are sent.
pub const LOGIN_PATH: &str = "/admin_login";

/// Proof that the request carries a valid admin session.
///
/// Extracting it on an anonymous request redirects to the login page. Handlers
/// that must answer with something else take `Option<AdminSession>` instead.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, Key::from_ref(state));
        if is_authenticated(&jar) {
            Ok(AdminSession)
        } else {
            Err(Redirect::to(LOGIN_PATH))
        }
    }
}

/// True when the jar holds a correctly signed session flag. Tampered cookies
/// fail signature verification and are treated as absent.
pub fn is_authenticated(jar: &SignedCookieJar) -> bool {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value() == LOGGED_IN)
        .unwrap_or(false)
}

/// Marks the session authenticated.
pub fn sign_in(jar: SignedCookieJar) -> SignedCookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, LOGGED_IN))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Drops all session state.
pub fn sign_out(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
