//! Static catalog of starter prompts

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
}

static TEMPLATES: [Template; 6] = [
    Template {
        id: "storage",
        name: "Storage Account",
        description: "Azure Storage Account with blob container",
        prompt: "Create an Azure Storage Account with a blob container",
    },
    Template {
        id: "webapp",
        name: "Web App",
        description: "Azure App Service with App Service Plan",
        prompt: "Create an Azure App Service with App Service Plan",
    },
    Template {
        id: "function",
        name: "Function App",
        description: "Azure Function App with consumption plan",
        prompt: "Create an Azure Function App with consumption plan and storage",
    },
    Template {
        id: "vm",
        name: "Virtual Machine",
        description: "Azure Virtual Machine with networking",
        prompt: "Create an Azure Linux Virtual Machine with VNet, subnet, and public IP",
    },
    Template {
        id: "aks",
        name: "Kubernetes Cluster",
        description: "Azure Kubernetes Service cluster",
        prompt: "Create an Azure Kubernetes Service cluster with 2 nodes",
    },
    Template {
        id: "cosmosdb",
        name: "Cosmos DB",
        description: "Azure Cosmos DB account with SQL API",
        prompt: "Create an Azure Cosmos DB account with SQL API database and container",
    },
];

pub fn list_templates() -> &'static [Template] {
    &TEMPLATES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let ids: Vec<&str> = list_templates().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["storage", "webapp", "function", "vm", "aks", "cosmosdb"]);
    }

    #[test]
    fn test_catalog_is_stable() {
        assert_eq!(list_templates(), list_templates());
        assert!(list_templates().iter().all(|t| !t.prompt.is_empty()));
    }
}
