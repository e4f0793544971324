//! User service
//!
//! Registration, profile edits, and resolving the names and emails typed on
//! the command line to stored users.

use crate::error::{SplitError, SplitResult};
use crate::models::{ProfileEdit, User, UserId};
use crate::storage::Storage;

/// A group member given as `Name <email>` or a bare email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInput {
    pub name: Option<String>,
    pub email: String,
}

impl MemberInput {
    pub fn parse(input: &str) -> SplitResult<Self> {
        let input = input.trim();

        if let Some((name, rest)) = input.split_once('<') {
            let email = rest
                .strip_suffix('>')
                .ok_or_else(|| SplitError::Validation(format!("Unterminated email in '{}'", input)))?
                .trim();
            let name = name.trim();
            return Ok(Self {
                name: (!name.is_empty()).then(|| name.to_string()),
                email: email.to_string(),
            });
        }

        Ok(Self {
            name: None,
            email: input.to_string(),
        })
    }

    /// Display name to use when the member has to be created
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .to_string(),
        }
    }
}

/// Service for user management
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new user
    pub fn register(&self, name: &str, email: &str) -> SplitResult<User> {
        let user = self.create_unsaved(name, email)?;
        self.storage.users.save()?;
        self.storage.save_sequences()?;

        tracing::info!(user = %user.id, email = %user.email, "registered user");
        Ok(user)
    }

    /// Validate and insert a user without persisting
    fn create_unsaved(&self, name: &str, email: &str) -> SplitResult<User> {
        let name = name.trim();
        let email = email.trim();

        let mut user = User::new(UserId::new(0), name, email);
        user.validate()
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        if self.storage.users.email_exists(email, None)? {
            return Err(SplitError::Duplicate {
                entity_type: "User",
                identifier: email.to_string(),
            });
        }

        user.id = self.storage.next_user_id()?;
        self.storage.users.upsert(user.clone())?;
        Ok(user)
    }

    /// Apply a profile edit. The email address cannot be changed.
    pub fn update_profile(&self, id: UserId, edit: ProfileEdit) -> SplitResult<User> {
        let mut user = self
            .storage
            .users
            .get(id)?
            .ok_or_else(|| SplitError::user_not_found(id.to_string()))?;

        let edit = ProfileEdit {
            name: edit.name.map(|n| n.trim().to_string()),
            phone: edit.phone.map(|p| p.trim().to_string()),
            upi: edit.upi.map(|u| u.trim().to_string()),
            payment_email: edit.payment_email.map(|e| e.trim().to_string()),
            bio: edit.bio,
        };
        user.apply_profile(edit);

        user.validate()
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        tracing::info!(user = %user.id, "updated profile");
        Ok(user)
    }

    pub fn get(&self, id: UserId) -> SplitResult<Option<User>> {
        self.storage.users.get(id)
    }

    /// Find a user by email, name, or id
    pub fn find(&self, identifier: &str) -> SplitResult<Option<User>> {
        if identifier.contains('@') {
            return self.storage.users.get_by_email(identifier);
        }

        if let Some(user) = self.storage.users.get_by_name(identifier)? {
            return Ok(Some(user));
        }

        if let Ok(id) = identifier.parse::<UserId>() {
            return self.storage.users.get(id);
        }

        Ok(None)
    }

    /// Like [`find`](Self::find), but a miss is an error
    pub fn resolve(&self, identifier: &str) -> SplitResult<User> {
        self.find(identifier)?
            .ok_or_else(|| SplitError::user_not_found(identifier))
    }

    pub fn list(&self) -> SplitResult<Vec<User>> {
        self.storage.users.get_all()
    }

    /// Name of a user id, or "Unknown" for ids with no record
    pub fn name_of(&self, id: UserId) -> SplitResult<String> {
        Ok(self
            .storage
            .users
            .get(id)?
            .map(|u| u.name)
            .unwrap_or_else(|| "Unknown".to_string()))
    }

    /// Resolve group members by email, creating users for unknown addresses.
    ///
    /// Every address is validated before any user is created. New users are
    /// inserted but not saved; the caller persists them with its own write.
    pub(crate) fn ensure_members(&self, members: &[MemberInput]) -> SplitResult<Vec<UserId>> {
        for member in members {
            if !crate::models::user::is_valid_email(&member.email) {
                return Err(SplitError::Validation(format!(
                    "Invalid email format or TLD not valid for this domain: {}",
                    member.email
                )));
            }
        }

        let mut ids = Vec::with_capacity(members.len());
        for member in members {
            let id = match self.storage.users.get_by_email(&member.email)? {
                Some(existing) => existing.id,
                None => {
                    let user = self.create_unsaved(&member.display_name(), &member.email)?;
                    tracing::info!(user = %user.id, email = %user.email, "created user for new group member");
                    user.id
                }
            };
            ids.push(id);
        }
        Ok(ids)
    }
}
