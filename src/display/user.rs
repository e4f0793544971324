//! User display formatting

use crate::models::User;

use super::report::truncate;

/// Format a list of users as a table
pub fn format_user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }

    let name_width = users
        .iter()
        .map(|u| u.name.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 24);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<name_width$}  {}\n",
        "ID",
        "Name",
        "Email",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:->4}  {:-<name_width$}  {:-<24}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for user in users {
        output.push_str(&format!(
            "{:>4}  {:<name_width$}  {}\n",
            user.id.to_string(),
            truncate(&user.name, name_width),
            user.email,
            name_width = name_width,
        ));
    }

    output
}

/// Format a user's profile
pub fn format_user_details(user: &User) -> String {
    let mut output = String::new();

    output.push_str(&format!("User: {}\n", user.name));
    output.push_str(&format!("  ID:       {}\n", user.id));
    output.push_str(&format!("  Email:    {}\n", user.email));
    if !user.phone.is_empty() {
        output.push_str(&format!("  Phone:    {}\n", user.phone));
    }
    if let Some(upi) = &user.upi {
        output.push_str(&format!("  UPI:      {}\n", upi));
    }
    if let Some(email) = &user.payment_email {
        output.push_str(&format!("  Pay to:   {}\n", email));
    }
    if !user.bio.is_empty() {
        output.push('\n');
        output.push_str(&format!("  {}\n", user.bio));
    }

    output
}
