// src/services/auth.rs
//! Sign-in and sign-up form checks with a simulated login. There is no
//! account store: the resulting record is handed back to the browser.

use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use super::navigation::{Destination, RouteTable};
use crate::error::ValidationError;

const LOGIN_PAGE: &str = "/Roomify-login/login.html";
const SOCIAL_EMAIL: &str = "social@example.com";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-\+\(\)]+$").expect("valid phone regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Digits, spaces and `-+()` only, with at least ten digits.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone) && phone.chars().filter(char::is_ascii_digit).count() >= 10
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthTab {
    SignIn,
    SignUp,
}

/// The sign-up tab is preselected by a `register` query parameter or a
/// `#register` fragment.
pub fn initial_tab(url: &str) -> AuthTab {
    let (rest, fragment) = url.split_once('#').unwrap_or((url, ""));
    let query = rest.split_once('?').map(|(_, q)| q).unwrap_or("");
    let has_param = query
        .split('&')
        .any(|pair| pair.split('=').next() == Some("register"));

    if has_param || fragment == "register" {
        AuthTab::SignUp
    } else {
        AuthTab::SignIn
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SocialSignIn {
    /// Button title, e.g. `Continue with Google`.
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub is_logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signup_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    pub message: String,
    pub redirect: String,
    pub user: UserRecord,
}

impl SignInForm {
    pub fn validate(&self) -> Result<String, ValidationError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(email.to_string())
    }
}

impl SignUpForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().chars().count() < 2 {
            return Err(ValidationError::NameTooShort);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        if !is_valid_phone(self.phone.trim()) {
            return Err(ValidationError::InvalidPhone);
        }
        if self.country.is_empty() {
            return Err(ValidationError::MissingCountry);
        }
        if self.password.chars().count() < 8 {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(())
    }
}

/// Login method named by a social button title.
pub fn social_method(title: &str) -> String {
    title
        .strip_prefix("Continue with ")
        .unwrap_or(title)
        .trim()
        .to_lowercase()
}

fn home_redirect() -> String {
    RouteTable::from_path(LOGIN_PAGE)
        .resolve(Destination::Homepage)
        .to_string()
}

fn logged_in(message: &str, user: UserRecord) -> LoginResult {
    LoginResult {
        message: message.to_string(),
        redirect: home_redirect(),
        user,
    }
}

pub async fn sign_in(form: &SignInForm, latency: Duration) -> Result<LoginResult, ValidationError> {
    let email = form.validate()?;
    sleep(latency).await;
    tracing::info!("sign-in accepted");

    Ok(logged_in(
        "Login successful! Redirecting...",
        UserRecord {
            name: None,
            email,
            phone: None,
            country: None,
            is_logged_in: true,
            login_time: Some(Utc::now()),
            signup_time: None,
            login_method: None,
        },
    ))
}

pub async fn sign_up(form: &SignUpForm, latency: Duration) -> Result<LoginResult, ValidationError> {
    form.validate()?;
    sleep(latency).await;
    tracing::info!(country = %form.country, "account created");

    Ok(logged_in(
        "Account created successfully! Redirecting...",
        UserRecord {
            name: Some(form.name.trim().to_string()),
            email: form.email.trim().to_string(),
            phone: Some(form.phone.trim().to_string()),
            country: Some(form.country.clone()),
            is_logged_in: true,
            login_time: None,
            signup_time: Some(Utc::now()),
            login_method: None,
        },
    ))
}

pub async fn social_sign_in(request: &SocialSignIn, latency: Duration) -> LoginResult {
    let method = social_method(&request.title);
    sleep(latency).await;
    tracing::info!(%method, "social sign-in accepted");

    logged_in(
        "Login successful! Redirecting...",
        UserRecord {
            name: None,
            email: SOCIAL_EMAIL.to_string(),
            phone: None,
            country: None,
            is_logged_in: true,
            login_time: Some(Utc::now()),
            signup_time: None,
            login_method: Some(method),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignUpForm {
        SignUpForm {
            name: "Mona Adel".into(),
            email: "mona@example.com".into(),
            phone: "+20 (100) 123-4567".into(),
            country: "Egypt".into(),
            password: "supersecret".into(),
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@b.co"));
    }

    #[test]
    fn phone_needs_ten_digits() {
        assert!(is_valid_phone("010 0123 4567"));
        assert!(!is_valid_phone("123-456"));
        assert!(!is_valid_phone("0100123456x"));
    }

    #[test]
    fn sign_in_checks_in_order() {
        let form = SignInForm { email: "  ".into(), password: "x".into() };
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
        let form = SignInForm { email: "nope".into(), password: "x".into() };
        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));
        let form = SignInForm { email: " a@b.co ".into(), password: "x".into() };
        assert_eq!(form.validate(), Ok("a@b.co".to_string()));
    }

    #[test]
    fn sign_up_rules() {
        assert_eq!(signup().validate(), Ok(()));

        let form = SignUpForm { name: "M".into(), ..signup() };
        assert_eq!(form.validate(), Err(ValidationError::NameTooShort));
        let form = SignUpForm { phone: "12345".into(), ..signup() };
        assert_eq!(form.validate(), Err(ValidationError::InvalidPhone));
        let form = SignUpForm { country: String::new(), ..signup() };
        assert_eq!(form.validate(), Err(ValidationError::MissingCountry));
        let form = SignUpForm { password: "short".into(), ..signup() };
        assert_eq!(form.validate(), Err(ValidationError::PasswordTooShort));
    }

    #[test]
    fn register_tab_selection() {
        assert_eq!(initial_tab("/Roomify-login/login.html"), AuthTab::SignIn);
        assert_eq!(initial_tab("/Roomify-login/login.html?register"), AuthTab::SignUp);
        assert_eq!(initial_tab("/Roomify-login/login.html?a=1&register=yes"), AuthTab::SignUp);
        assert_eq!(initial_tab("/Roomify-login/login.html#register"), AuthTab::SignUp);
        assert_eq!(initial_tab("/Roomify-login/login.html?registered=1"), AuthTab::SignIn);
    }

    #[test]
    fn social_method_from_title() {
        assert_eq!(social_method("Continue with Google"), "google");
        assert_eq!(social_method("Facebook"), "facebook");
    }

    #[tokio::test]
    async fn sign_up_returns_record_and_home_redirect() {
        let result = sign_up(&signup(), Duration::ZERO).await.unwrap();
        assert_eq!(result.redirect, "../Home Page/index.html");
        assert_eq!(result.user.name.as_deref(), Some("Mona Adel"));
        assert!(result.user.is_logged_in);
        assert!(result.user.signup_time.is_some());
        assert!(result.user.login_time.is_none());
    }
}
