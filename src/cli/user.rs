//! User CLI commands
//!
//! Registration, login and profile management.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_user_details, format_user_list};
use crate::error::{SplitError, SplitResult};
use crate::models::{ProfileEdit, UserId};
use crate::services::UserService;
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user
    Register {
        /// Display name
        name: String,
        /// Email address (used to log in)
        email: String,
        /// Don't log in as the new user
        #[arg(long)]
        no_login: bool,
    },
    /// Log in as an existing user
    Login {
        /// Email, name or ID
        user: String,
    },
    /// Forget the logged-in user
    Logout,
    /// Show a user's profile (defaults to the acting user)
    Show {
        /// Email, name or ID
        user: Option<String>,
    },
    /// Edit the acting user's profile
    Edit {
        #[arg(short, long)]
        name: Option<String>,
        /// 10-digit phone number
        #[arg(short, long)]
        phone: Option<String>,
        /// UPI ID shown to people paying you
        #[arg(long)]
        upi: Option<String>,
        /// Payment contact email shown to people paying you
        #[arg(long)]
        payment_email: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
    /// List all users
    List,
}

/// Handle a user command. Login and logout persist `settings`.
pub fn handle_user_command(
    storage: &Storage,
    settings: &mut Settings,
    actor: Option<UserId>,
    cmd: UserCommands,
) -> SplitResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Register {
            name,
            email,
            no_login,
        } => {
            let user = service.register(&name, &email)?;
            println!("Registered user: {}", user);
            println!("  ID: {}", user.id);

            if !no_login {
                settings.current_user = Some(user.id);
                settings.save(storage.paths())?;
                println!("Logged in as {}", user.name);
            }
        }

        UserCommands::Login { user } => {
            let found = service.resolve(&user)?;
            settings.current_user = Some(found.id);
            settings.save(storage.paths())?;
            println!("Logged in as {}", found);
        }

        UserCommands::Logout => {
            settings.current_user = None;
            settings.save(storage.paths())?;
            println!("Logged out.");
        }

        UserCommands::Show { user } => {
            let found = match user {
                Some(identifier) => service.resolve(&identifier)?,
                None => {
                    let id = actor.ok_or(SplitError::NoCurrentUser)?;
                    service
                        .get(id)?
                        .ok_or_else(|| SplitError::user_not_found(id.to_string()))?
                }
            };
            print!("{}", format_user_details(&found));
        }

        UserCommands::Edit {
            name,
            phone,
            upi,
            payment_email,
            bio,
        } => {
            let id = actor.ok_or(SplitError::NoCurrentUser)?;
            let edit = ProfileEdit {
                name,
                phone,
                upi,
                payment_email,
                bio,
            };
            if edit.name.is_none()
                && edit.phone.is_none()
                && edit.upi.is_none()
                && edit.payment_email.is_none()
                && edit.bio.is_none()
            {
                println!("No changes specified. Use --name, --phone, --upi, --payment-email or --bio.");
                return Ok(());
            }

            let updated = service.update_profile(id, edit)?;
            println!("Updated profile: {}", updated);
        }

        UserCommands::List => {
            print!("{}", format_user_list(&service.list()?));
        }
    }

    Ok(())
}
