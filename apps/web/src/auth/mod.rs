//! Admin authentication: a signed-cookie session flag and the login/logout routes.

pub mod handlers;
pub mod session;
pub mod store;

pub use session::AdminSession;
