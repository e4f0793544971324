//! User model
//!
//! A person who can pay for or take part in expenses. Users are created at
//! registration (or implicitly when added to a group by email) and are never
//! deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// Mail providers whose addresses are only valid with specific TLDs
const SPECIAL_DOMAINS: &[(&str, &[&str])] = &[
    ("gmail", &[".com"]),
    ("yahoo", &[".com", ".in"]),
    ("outlook", &[".com", ".net"]),
    ("hotmail", &[".com"]),
];

/// TLDs accepted for any address
const ALLOWED_TLDS: &[&str] = &[".co.in", ".com", ".in", ".org", ".net"];

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Email address, unique across users (compared case-insensitively)
    pub email: String,

    /// Ten-digit phone number, or empty
    #[serde(default)]
    pub phone: String,

    /// Bank handle payments can be sent to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upi: Option<String>,

    /// Contact handle payments can be sent to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_email: Option<String>,

    #[serde(default)]
    pub bio: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: String::new(),
            upi: None,
            payment_email: None,
            bio: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a profile edit. `None` leaves a field unchanged.
    pub fn apply_profile(&mut self, edit: ProfileEdit) {
        if let Some(name) = edit.name {
            self.name = name;
        }
        if let Some(phone) = edit.phone {
            self.phone = phone;
        }
        if let Some(upi) = edit.upi {
            self.upi = Some(upi).filter(|s| !s.is_empty());
        }
        if let Some(payment_email) = edit.payment_email {
            self.payment_email = Some(payment_email).filter(|s| !s.is_empty());
        }
        if let Some(bio) = edit.bio {
            self.bio = bio;
        }
        self.updated_at = Utc::now();
    }

    /// Payment handles formatted for display, if any are set
    pub fn payment_details(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.upi.as_ref().map(|u| format!("UPI (Bank): {}", u)),
            self.payment_email
                .as_ref()
                .map(|e| format!("Email/Contact: {}", e)),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" • "))
        }
    }

    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }

        if !is_valid_email(&self.email) {
            return Err(UserValidationError::InvalidEmail(self.email.clone()));
        }

        if !self.phone.is_empty()
            && !(self.phone.len() == 10 && self.phone.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(UserValidationError::InvalidPhone(self.phone.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Fields a user may change on their own profile
#[derive(Debug, Clone, Default)]
pub struct ProfileEdit {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub upi: Option<String>,
    pub payment_email: Option<String>,
    pub bio: Option<String>,
}

/// Validation errors for users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    InvalidEmail(String),
    InvalidPhone(String),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "User name cannot be empty"),
            Self::InvalidEmail(e) => {
                write!(f, "Invalid email format or TLD not valid for this domain: {}", e)
            }
            Self::InvalidPhone(p) => write!(f, "Phone number should be 10 digits: {}", p),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Check an address against the accepted TLDs and the provider-specific rules
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim().to_lowercase();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let Some(tld) = ALLOWED_TLDS.iter().find(|tld| domain.ends_with(*tld)) else {
        return false;
    };
    let host = &domain[..domain.len() - tld.len()];
    if host.is_empty() || host.ends_with('.') {
        return false;
    }

    let base = host.rsplit('.').next().unwrap_or(host);
    match SPECIAL_DOMAINS.iter().find(|(name, _)| *name == base) {
        Some((_, tlds)) => tlds.contains(tld),
        None => true,
    }
}
