use crate::names;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn cookie(name: &str, value: &str, secure: bool) -> String {
    let secure = if secure { " Secure;" } else { "" };
    format!(
        "{name}={value}; HttpOnly; Max-Age={};{secure} Path=/; SameSite=Lax",
        names::SESSION_MAX_AGE_SECS
    )
}

/// An immediately-expiring cookie, used to clear the session on logout.
pub fn expired_cookie(name: &str) -> String {
    format!("{name}=; HttpOnly; Max-Age=0; Path=/; SameSite=Lax")
}
