//! Group display formatting

use crate::models::Group;
use crate::services::GroupDetails;

use super::report::truncate;
use super::Names;

/// Format a list of groups as a table
pub fn format_group_list(groups: &[Group], names: &Names) -> String {
    if groups.is_empty() {
        return "No groups found.\n".to_string();
    }

    let name_width = groups
        .iter()
        .map(|g| g.name.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 30);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:<name_width$}  {:<8}  {:>7}  {}\n",
        "ID",
        "Name",
        "Currency",
        "Members",
        "Admin",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:->5}  {:-<name_width$}  {:-<8}  {:->7}  {:-<12}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for group in groups {
        output.push_str(&format!(
            "{:>5}  {:<name_width$}  {:<8}  {:>7}  {}\n",
            group.id.to_string(),
            truncate(&group.name, name_width),
            group.currency.code(),
            group.effective_members().len(),
            names.get(group.admin_id),
            name_width = name_width,
        ));
    }

    output
}

/// Format a group with its resolved members
pub fn format_group_details(details: &GroupDetails) -> String {
    let group = &details.group;
    let mut output = String::new();

    output.push_str(&format!("Group: {}\n", group.name));
    output.push_str(&format!("  ID:        {}\n", group.id));
    output.push_str(&format!("  Currency:  {}\n", group.currency));
    output.push_str(&format!(
        "  Admin:     {}\n",
        details
            .admin
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or("Unknown")
    ));
    if let (Some(start), Some(end)) = (group.start_date, group.end_date) {
        output.push_str(&format!("  Dates:     {} to {}\n", start, end));
    } else if let Some(start) = group.start_date {
        output.push_str(&format!("  Starts:    {}\n", start));
    }
    output.push_str(&format!(
        "  Total:     {}\n",
        group.total_expense.format_with_symbol(group.currency.symbol())
    ));
    output.push_str(&format!("  Expenses:  {}\n", details.expense_count));

    output.push('\n');
    output.push_str(&format!("  Members ({}):\n", details.members.len()));
    for member in &details.members {
        let marker = if member.id == group.admin_id { " (admin)" } else { "" };
        output.push_str(&format!("    {} <{}>{}\n", member.name, member.email, marker));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, GroupId, User, UserId};

    #[test]
    fn test_group_list_shows_admin_name() {
        let asha = User::new(UserId::new(1), "Asha", "asha@gmail.com");
        let names = Names::from_users(std::slice::from_ref(&asha));
        let group = Group::new(GroupId::new(101), "Goa Trip", asha.id, vec![], Currency::Inr);

        let output = format_group_list(&[group], &names);
        assert!(output.contains("101  Goa Trip  INR"));
        assert!(output.trim_end().ends_with("Asha"));
    }

    #[test]
    fn test_details_mark_admin() {
        let asha = User::new(UserId::new(1), "Asha", "asha@gmail.com");
        let ravi = User::new(UserId::new(2), "Ravi", "ravi@yahoo.in");
        let group = Group::new(
            GroupId::new(101),
            "Goa Trip",
            asha.id,
            vec![ravi.id],
            Currency::Usd,
        );

        let details = GroupDetails {
            group,
            admin: Some(asha.clone()),
            members: vec![ravi, asha],
            expense_count: 0,
        };
        let output = format_group_details(&details);
        assert!(output.contains("Asha <asha@gmail.com> (admin)"));
        assert!(output.contains("Ravi <ravi@yahoo.in>\n"));
        assert!(output.contains("Total:     $0.00"));
    }
}
