//! Classified bundle domain model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical file role of a block of Terraform code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Providers,
    Variables,
    Main,
    Outputs,
}

impl Role {
    /// All roles in file order
    pub const ALL: [Role; 4] = [Role::Providers, Role::Variables, Role::Main, Role::Outputs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Providers => "providers",
            Role::Variables => "variables",
            Role::Main => "main",
            Role::Outputs => "outputs",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.tf", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terraform content bucketed by role.
///
/// Every role is always present; an empty string means nothing was assigned
/// to it. Blocks appended to the same role are joined by a blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedBundle {
    #[serde(default)]
    pub providers: String,
    #[serde(default)]
    pub variables: String,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub outputs: String,
}

impl ClassifiedBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: Role) -> &str {
        match role {
            Role::Providers => &self.providers,
            Role::Variables => &self.variables,
            Role::Main => &self.main,
            Role::Outputs => &self.outputs,
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut String {
        match role {
            Role::Providers => &mut self.providers,
            Role::Variables => &mut self.variables,
            Role::Main => &mut self.main,
            Role::Outputs => &mut self.outputs,
        }
    }

    /// Append a block to a role, separated from earlier blocks by a blank line
    pub fn append(&mut self, role: Role, block: &str) {
        let slot = self.slot_mut(role);
        if !slot.is_empty() {
            slot.push_str("\n\n");
        }
        slot.push_str(block);
    }

    /// Replace the whole content of a role
    pub fn set(&mut self, role: Role, content: impl Into<String>) {
        *self.slot_mut(role) = content.into();
    }

    /// Iterate over `(role, content)` pairs in file order, including empty roles
    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }

    /// Roles with non-empty content, in file order
    pub fn non_empty_roles(&self) -> Vec<Role> {
        self.iter()
            .filter(|(_, content)| !content.is_empty())
            .map(|(role, _)| role)
            .collect()
    }

    /// File names (`<role>.tf`) of the non-empty roles, in file order
    pub fn file_names(&self) -> Vec<String> {
        self.non_empty_roles().iter().map(Role::file_name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, content)| content.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_joins_with_blank_line() {
        let mut bundle = ClassifiedBundle::new();
        bundle.append(Role::Main, "resource \"a\" \"b\" {}");
        bundle.append(Role::Main, "resource \"c\" \"d\" {}");

        assert_eq!(
            bundle.main,
            "resource \"a\" \"b\" {}\n\nresource \"c\" \"d\" {}"
        );
        assert!(bundle.providers.is_empty());
    }

    #[test]
    fn test_file_names_follow_role_order() {
        let mut bundle = ClassifiedBundle::new();
        bundle.set(Role::Outputs, "output \"id\" {}");
        bundle.set(Role::Providers, "provider \"azurerm\" {}");

        assert_eq!(bundle.file_names(), vec!["providers.tf", "outputs.tf"]);
        assert_eq!(bundle.non_empty_roles(), vec![Role::Providers, Role::Outputs]);
    }

    #[test]
    fn test_empty_bundle_serializes_every_role() {
        let bundle = ClassifiedBundle::new();
        assert!(bundle.is_empty());

        let json = serde_json::to_value(&bundle).unwrap();
        for role in Role::ALL {
            assert_eq!(json[role.as_str()], "");
        }
    }
}
