//! The five-step signup wizard and its password rules.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::mock_data::{Company, COMPANIES};

pub const VERIFICATION_CODE: &str = "111111";
const TAKEN_NICKNAME: &str = "test";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));
static SEQUENTIAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(abc|bcd|cde|def|efg|fgh|ghi|hij|ijk|jkl|klm|lmn|mno|nop|opq|pqr|qrs|rst|stu|tuv|uvw|vwx|wxy|xyz|012|123|234|345|456|567|678|789)")
        .expect("static regex")
});
const SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn label(self) -> &'static str {
        match self {
            PasswordStrength::Weak => "weak",
            PasswordStrength::Medium => "medium",
            PasswordStrength::Strong => "strong",
        }
    }
}

fn has_repeated_digit(password: &str) -> bool {
    password
        .as_bytes()
        .windows(3)
        .any(|w| w[0].is_ascii_digit() && w[0] == w[1] && w[1] == w[2])
}

/// `None` for an empty password.
pub fn password_strength(password: &str) -> Option<PasswordStrength> {
    if password.is_empty() {
        return None;
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit || password.chars().count() < 6 {
        return Some(PasswordStrength::Weak);
    }
    if SEQUENTIAL_RE.is_match(password) || has_repeated_digit(password) {
        return Some(PasswordStrength::Weak);
    }

    let score = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        has_digit,
        password.chars().any(|c| SYMBOLS.contains(c)),
    ]
    .into_iter()
    .filter(|hit| *hit)
    .count();

    Some(match score {
        4.. => PasswordStrength::Strong,
        2..=3 => PasswordStrength::Medium,
        _ => PasswordStrength::Weak,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum SignupStep {
    #[default]
    Company,
    Details,
    Credentials,
    Verify,
    Done,
}

impl SignupStep {
    pub const ALL: [SignupStep; 5] = [
        SignupStep::Company,
        SignupStep::Details,
        SignupStep::Credentials,
        SignupStep::Verify,
        SignupStep::Done,
    ];

    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn title(self) -> &'static str {
        match self {
            SignupStep::Company => "Company",
            SignupStep::Details => "Details",
            SignupStep::Credentials => "Nickname & password",
            SignupStep::Verify => "Verification",
            SignupStep::Done => "Done",
        }
    }

    fn fields(self) -> &'static [SignupField] {
        match self {
            SignupStep::Details => &[SignupField::Name, SignupField::Email],
            SignupStep::Credentials => &[SignupField::Nickname, SignupField::Password, SignupField::Confirm],
            SignupStep::Verify => &[SignupField::Code],
            SignupStep::Company | SignupStep::Done => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    Name,
    Email,
    Nickname,
    Password,
    Confirm,
    Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NicknameStatus {
    #[default]
    Unchecked,
    Checking,
    Available,
    Taken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupAdvance {
    Moved,
    Invalid,
    /// Credentials look fine; the nickname check has to finish first.
    CheckNickname,
    Finished,
}

#[derive(Debug, Default)]
pub struct SignupWizard {
    pub step: SignupStep,
    pub company_cursor: usize,
    pub company: Option<Company>,
    pub name: String,
    pub email: String,
    pub nickname: String,
    pub password: String,
    pub confirm: String,
    pub code: String,
    pub focus: Option<SignupField>,
    pub error: Option<String>,
    pub info: Option<String>,
    pub nickname_status: NicknameStatus,
    pub verification_sent: bool,
}

impl SignupWizard {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn password_strength(&self) -> Option<PasswordStrength> {
        password_strength(&self.password)
    }

    pub fn is_checking_nickname(&self) -> bool {
        self.nickname_status == NicknameStatus::Checking
    }

    fn field_mut(&mut self, field: SignupField) -> &mut String {
        match field {
            SignupField::Name => &mut self.name,
            SignupField::Email => &mut self.email,
            SignupField::Nickname => &mut self.nickname,
            SignupField::Password => &mut self.password,
            SignupField::Confirm => &mut self.confirm,
            SignupField::Code => &mut self.code,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.focus {
            self.field_mut(field).push(c);
            if field == SignupField::Nickname {
                self.nickname_status = NicknameStatus::Unchecked;
            }
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focus {
            self.field_mut(field).pop();
        }
    }

    pub fn focus_next(&mut self) {
        let fields = self.step.fields();
        if fields.is_empty() {
            return;
        }
        let idx = self
            .focus
            .and_then(|f| fields.iter().position(|x| *x == f))
            .map(|i| (i + 1) % fields.len())
            .unwrap_or(0);
        self.focus = Some(fields[idx]);
    }

    pub fn move_company_cursor(&mut self, down: bool) {
        let len = COMPANIES.len();
        self.company_cursor = if down {
            (self.company_cursor + 1) % len
        } else {
            (self.company_cursor + len - 1) % len
        };
    }

    fn go_to(&mut self, step: SignupStep) {
        debug!(?step, "signup step");
        self.step = step;
        self.focus = step.fields().first().copied();
        self.error = None;
    }

    fn fail(&mut self, message: impl Into<String>) -> SignupAdvance {
        self.error = Some(message.into());
        SignupAdvance::Invalid
    }

    /// Validates the current step and moves forward when it passes.
    pub fn next(&mut self) -> SignupAdvance {
        match self.step {
            SignupStep::Company => {
                self.company = COMPANIES.get(self.company_cursor).copied();
                self.go_to(SignupStep::Details);
                SignupAdvance::Moved
            }
            SignupStep::Details => {
                let (name, email) = (self.name.trim(), self.email.trim());
                if name.is_empty() || email.is_empty() {
                    return self.fail("Enter your name and company email.");
                }
                if !is_valid_email(email) {
                    return self.fail("Enter a valid email address.");
                }
                if let Some(company) = self.company {
                    let domain = email.rsplit_once('@').map(|(_, d)| d).unwrap_or_default();
                    if domain != company.domain {
                        let msg = format!("Use {}'s official domain ({}).", company.name, company.domain);
                        return self.fail(msg);
                    }
                }
                self.go_to(SignupStep::Credentials);
                SignupAdvance::Moved
            }
            SignupStep::Credentials => {
                if self.is_checking_nickname() {
                    return SignupAdvance::Invalid;
                }
                if self.nickname.trim().is_empty() {
                    return self.fail("Enter a nickname.");
                }
                if self.password.is_empty() {
                    return self.fail("Enter a password.");
                }
                if self.confirm.is_empty() {
                    return self.fail("Confirm your password.");
                }
                if self.password != self.confirm {
                    return self.fail("Passwords do not match.");
                }
                if self.password_strength() == Some(PasswordStrength::Weak) {
                    return self.fail("Password too weak: use 6+ characters with letters and digits.");
                }
                self.nickname_status = NicknameStatus::Checking;
                self.error = None;
                SignupAdvance::CheckNickname
            }
            SignupStep::Verify => {
                if self.code.is_empty() {
                    return self.fail("Enter the verification code.");
                }
                if self.code != VERIFICATION_CODE {
                    return self.fail(format!("Wrong verification code. (demo: {VERIFICATION_CODE})"));
                }
                self.go_to(SignupStep::Done);
                SignupAdvance::Moved
            }
            SignupStep::Done => SignupAdvance::Finished,
        }
    }

    /// Result of the simulated nickname lookup.
    pub fn finish_nickname_check(&mut self) -> bool {
        if self.nickname_status != NicknameStatus::Checking {
            return false;
        }
        if self.nickname.trim() == TAKEN_NICKNAME {
            self.nickname_status = NicknameStatus::Taken;
            self.error = Some("That nickname is already taken.".to_string());
            false
        } else {
            self.nickname_status = NicknameStatus::Available;
            self.go_to(SignupStep::Verify);
            true
        }
    }

    pub fn send_verification(&mut self) -> bool {
        if self.email.trim().is_empty() {
            self.error = Some("Enter your email first.".to_string());
            return false;
        }
        self.verification_sent = true;
        self.info = Some(format!("Verification code sent. (demo: {VERIFICATION_CODE})"));
        true
    }

    pub fn prev(&mut self) -> bool {
        let idx = self.step as usize;
        if idx == 0 || self.step == SignupStep::Done || self.is_checking_nickname() {
            return false;
        }
        self.go_to(SignupStep::ALL[idx - 1]);
        true
    }
}
