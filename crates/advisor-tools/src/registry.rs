//! Tool registry for namespace discovery

use std::collections::HashMap;
use std::sync::Arc;

use advisor_core::{Error, Result};
use serde_json::Value;
use tracing::debug;

use crate::ToolContract;

/// An immutable, ordered collection of tool contracts under one namespace
///
/// Registries are built once and then only read. Iteration order is the
/// order the tools were registered in, so the catalog an agent sees is
/// stable across runs.
pub struct ToolRegistry {
    namespace: String,
    contracts: Vec<Arc<ToolContract>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Start building a registry for the given namespace
    pub fn builder(namespace: impl Into<String>) -> ToolRegistryBuilder {
        ToolRegistryBuilder {
            namespace: namespace.into(),
            contracts: Vec::new(),
        }
    }

    /// Get the registry's namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get a contract by name
    pub fn get(&self, name: &str) -> Option<&Arc<ToolContract>> {
        self.index.get(name).map(|&i| &self.contracts[i])
    }

    /// List all contracts in registration order
    ///
    /// Returns every contract in the registry. This is useful for building
    /// the tool catalog an agent embeds in its prompt.
    pub fn contracts(&self) -> &[Arc<ToolContract>] {
        &self.contracts
    }

    /// List all tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.contracts.iter().map(|c| c.name()).collect()
    }

    /// Invoke a registered tool by name
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContractViolation`] if no tool with that name is
    /// registered; otherwise forwards the tool's own result unchanged.
    pub async fn invoke(&self, name: &str, args: Value) -> Result<Value> {
        let contract = self.get(name).ok_or_else(|| {
            Error::ContractViolation(format!(
                "no tool named '{}' in namespace '{}'",
                name, self.namespace
            ))
        })?;
        debug!(namespace = %self.namespace, tool = name, "invoking tool");
        contract.invoke(args).await
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("namespace", &self.namespace)
            .field("tools", &self.names())
            .finish()
    }
}

/// Builder for [`ToolRegistry`]
pub struct ToolRegistryBuilder {
    namespace: String,
    contracts: Vec<Arc<ToolContract>>,
}

impl ToolRegistryBuilder {
    /// Register a contract
    ///
    /// Contracts keep the order they are registered in.
    pub fn register(mut self, contract: ToolContract) -> Self {
        self.contracts.push(Arc::new(contract));
        self
    }

    /// Register an already shared contract
    pub fn register_arc(mut self, contract: Arc<ToolContract>) -> Self {
        self.contracts.push(contract);
        self
    }

    /// Build the registry
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContractViolation`] if the namespace is empty or
    /// two contracts share a name.
    pub fn build(self) -> Result<ToolRegistry> {
        if self.namespace.trim().is_empty() {
            return Err(Error::ContractViolation(
                "registry namespace must not be empty".to_string(),
            ));
        }
        let mut index = HashMap::with_capacity(self.contracts.len());
        for (i, contract) in self.contracts.iter().enumerate() {
            if index.insert(contract.name().to_string(), i).is_some() {
                return Err(Error::ContractViolation(format!(
                    "namespace '{}' already contains a tool named '{}'",
                    self.namespace,
                    contract.name()
                )));
            }
        }
        debug!(
            namespace = %self.namespace,
            tools = self.contracts.len(),
            "built tool registry"
        );
        Ok(ToolRegistry {
            namespace: self.namespace,
            contracts: self.contracts,
            index,
        })
    }
}
