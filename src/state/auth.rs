use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::mock_data::company_for_email;
use crate::state::login_attempts::LoginAttempts;

/// The single account the mocked backend accepts.
pub const DEMO_EMAIL: &str = "test1@ekmtc.com";
pub const DEMO_PASSWORD: &str = "test1";
pub const DEMO_NICKNAME: &str = "test1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
    Submit,
    Signup,
}

impl LoginField {
    const RING: [LoginField; 4] = [LoginField::Email, LoginField::Password, LoginField::Submit, LoginField::Signup];

    pub fn next(self) -> Self {
        let idx = Self::RING.iter().position(|f| *f == self).unwrap_or(0);
        Self::RING[(idx + 1) % Self::RING.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::RING.iter().position(|f| *f == self).unwrap_or(0);
        Self::RING[(idx + Self::RING.len() - 1) % Self::RING.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub nickname: String,
    pub company: String,
    pub domain: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted; the login completes after the simulated delay.
    Accepted,
    Rejected,
    Locked,
    /// A login is already in flight.
    Busy,
}

pub fn check_credentials(email: &str, password: &str) -> bool {
    email.trim() == DEMO_EMAIL && password == DEMO_PASSWORD
}

/// State management for the login form
pub struct AuthState {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
    pub is_loading: bool,
    pub current_user: Option<UserProfile>,
    /// Previous successful login, shown on the board header.
    pub last_login: Option<DateTime<Utc>>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: LoginField::Email,
            error: None,
            is_loading: false,
            current_user: None,
            last_login: None,
        }
    }
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            LoginField::Email => Some(&mut self.email),
            LoginField::Password => Some(&mut self.password),
            LoginField::Submit | LoginField::Signup => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(input) = self.focused_input() {
            input.push(c);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        if let Some(input) = self.focused_input() {
            input.pop();
        }
    }

    /// Checks the form against the mocked backend and records the attempt.
    pub fn submit(&mut self, attempts: &mut LoginAttempts) -> LoginOutcome {
        if self.is_loading {
            return LoginOutcome::Busy;
        }
        attempts.check_status();
        if attempts.is_locked() {
            self.error = Some(format!(
                "Too many failed attempts. Try again in {}.",
                attempts.remaining_time_text()
            ));
            return LoginOutcome::Locked;
        }

        if check_credentials(&self.email, &self.password) {
            attempts.record_attempt(true);
            self.error = None;
            self.is_loading = true;
            LoginOutcome::Accepted
        } else {
            attempts.record_attempt(false);
            let status = attempts.status();
            warn!(attempts = status.current, "login rejected");
            self.password.clear();
            self.error = Some(if status.is_locked {
                format!("Too many failed attempts. Try again in {}.", status.remaining_time_text)
            } else {
                format!("Invalid email or password. {} attempt(s) left.", status.remaining)
            });
            if status.is_locked {
                LoginOutcome::Locked
            } else {
                LoginOutcome::Rejected
            }
        }
    }

    /// Finishes an accepted login, resolving the company from the email.
    pub fn complete_login(&mut self) -> UserProfile {
        let email = self.email.trim().to_string();
        let domain = email
            .rsplit_once('@')
            .map(|(_, d)| d.to_string())
            .unwrap_or_default();
        let profile = UserProfile {
            company: company_for_email(&email).to_string(),
            nickname: DEMO_NICKNAME.to_string(),
            email,
            domain,
        };
        info!(company = %profile.company, "logged in");
        self.is_loading = false;
        self.current_user = Some(profile.clone());
        self.clear_inputs();
        profile
    }

    /// Abandons an in-flight login, e.g. when the view went away.
    pub fn cancel_pending(&mut self) {
        self.is_loading = false;
    }

    pub fn logout(&mut self) {
        if self.current_user.take().is_some() {
            info!("logged out");
        }
        self.clear_inputs();
        self.is_loading = false;
        self.focus = LoginField::Email;
    }

    pub fn clear_inputs(&mut self) {
        self.email.clear();
        self.password.clear();
        self.error = None;
    }
}
