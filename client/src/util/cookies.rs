//! Cookie header parsing and `document.cookie` assignment strings.
//!
//! Pure string functions over the `cookie` crate; the browser glue lives in
//! `auth::tokens`.

#[cfg(test)]
#[path = "cookies_test.rs"]
mod cookies_test;

use cookie::time::Duration;
use cookie::{Cookie, SameSite};

/// Find `name` in a `a=1; b=2` cookie header. Empty values read as absent.
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse_encoded(header)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}

/// Assignment string that stores `name` for `days` days.
pub fn set_cookie_line(name: &str, value: &str, days: i64, secure: bool) -> String {
    Cookie::build((name, value))
        .path("/")
        .max_age(Duration::days(days))
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
        .encoded()
        .to_string()
}

/// Assignment string that deletes `name`.
pub fn expire_cookie_line(name: &str) -> String {
    Cookie::build((name, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .same_site(SameSite::Lax)
        .build()
        .encoded()
        .to_string()
}
