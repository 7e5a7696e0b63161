//! Self-describing tool contracts
//!
//! A [`ToolContract`] bundles an async operation with the metadata an
//! orchestrating agent needs to call it: name, description, typed argument
//! list and output type. Contracts are validated when built, so an
//! incompletely described tool never reaches a registry.

use std::fmt;
use std::sync::Arc;

use advisor_core::{Error, Result};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Boxed future produced by a tool operation.
pub type ToolFuture = BoxFuture<'static, Result<Value>>;

type ToolOperation = Arc<dyn Fn(Value) -> ToolFuture + Send + Sync>;

/// JSON value types a tool argument or output can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl ValueType {
    /// JSON Schema type keyword for this value type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed argument in a tool's signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgSpec {
    pub name: String,
    pub ty: ValueType,
}

impl ArgSpec {
    pub fn new(name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A fully described, callable tool
///
/// Each contract carries everything an agent needs to discover and invoke
/// the tool: a unique name, a human-readable description, the ordered
/// argument list with types, the declared output type, and the operation
/// itself. Use [`ToolContract::builder`] to construct one; [`build`]
/// rejects contracts that are missing any part of the description.
///
/// [`build`]: ToolContractBuilder::build
pub struct ToolContract {
    name: String,
    description: String,
    arguments: Vec<ArgSpec>,
    output: ValueType,
    operation: ToolOperation,
}

impl ToolContract {
    /// Start building a contract with the given tool name
    pub fn builder(name: impl Into<String>) -> ToolContractBuilder {
        ToolContractBuilder {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            output: None,
            operation: None,
        }
    }

    /// Get the tool's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the tool's description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the tool's arguments in declaration order
    pub fn arguments(&self) -> &[ArgSpec] {
        &self.arguments
    }

    /// Get the tool's declared output type
    pub fn output(&self) -> ValueType {
        self.output
    }

    /// Invoke the underlying operation
    ///
    /// The contract is a transparent proxy: `args` is passed to the
    /// operation unchanged and the operation's result is returned
    /// unchanged, success or failure.
    ///
    /// # Arguments
    ///
    /// * `args` - Tool input as JSON value (should match [`input_schema`])
    ///
    /// [`input_schema`]: Self::input_schema
    pub async fn invoke(&self, args: Value) -> Result<Value> {
        (self.operation)(args).await
    }

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// Builds an object schema from the argument list. Every declared
    /// argument is required.
    pub fn input_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        for arg in &self.arguments {
            properties.insert(arg.name.clone(), json!({ "type": arg.ty.as_str() }));
        }
        let required: Vec<&str> = self.arguments.iter().map(|a| a.name.as_str()).collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

impl fmt::Debug for ToolContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolContract")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ToolContract {
    /// Render the contract in the flat introspection format agents embed
    /// in prompts: `Tool Name: ..., Description: ..., Arguments: name:
    /// type, ..., Outputs: type`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self
            .arguments
            .iter()
            .map(|a| format!("{}: {}", a.name, a.ty))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Tool Name: {}, Description: {}, Arguments: {}, Outputs: {}",
            self.name, self.description, args, self.output
        )
    }
}

/// Builder for [`ToolContract`]
pub struct ToolContractBuilder {
    name: String,
    description: Option<String>,
    arguments: Vec<ArgSpec>,
    output: Option<ValueType>,
    operation: Option<ToolOperation>,
}

impl ToolContractBuilder {
    /// Set the human-readable description (required)
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Append a typed argument to the signature
    ///
    /// Arguments keep the order they are declared in.
    pub fn arg(mut self, name: impl Into<String>, ty: ValueType) -> Self {
        self.arguments.push(ArgSpec::new(name, ty));
        self
    }

    /// Set the declared output type (required)
    pub fn output(mut self, ty: ValueType) -> Self {
        self.output = Some(ty);
        self
    }

    /// Set the async operation the contract wraps (required)
    pub fn operation<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.operation = Some(Arc::new(move |args| Box::pin(f(args))));
        self
    }

    /// Set a synchronous operation the contract wraps
    ///
    /// Convenience for pure functions; the result is lifted into an
    /// already-resolved future.
    pub fn sync_operation<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.operation = Some(Arc::new(move |args| Box::pin(std::future::ready(f(args)))));
        self
    }

    /// Validate the description and build the contract
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContractViolation`] if the name or description is
    /// empty, an argument name is empty or duplicated, or the output type
    /// or operation was never set.
    pub fn build(self) -> Result<ToolContract> {
        if self.name.trim().is_empty() {
            return Err(Error::ContractViolation(
                "tool name must not be empty".to_string(),
            ));
        }
        let description = match self.description {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                return Err(Error::ContractViolation(format!(
                    "tool '{}' requires a description",
                    self.name
                )));
            }
        };
        for arg in &self.arguments {
            if arg.name.trim().is_empty() {
                return Err(Error::ContractViolation(format!(
                    "tool '{}' has an argument with an empty name",
                    self.name
                )));
            }
        }
        for (i, arg) in self.arguments.iter().enumerate() {
            if self.arguments[..i].iter().any(|a| a.name == arg.name) {
                return Err(Error::ContractViolation(format!(
                    "tool '{}' declares argument '{}' more than once",
                    self.name, arg.name
                )));
            }
        }
        let output = self.output.ok_or_else(|| {
            Error::ContractViolation(format!(
                "tool '{}' requires a declared output type",
                self.name
            ))
        })?;
        let operation = self.operation.ok_or_else(|| {
            Error::ContractViolation(format!("tool '{}' requires an operation", self.name))
        })?;
        Ok(ToolContract {
            name: self.name,
            description,
            arguments: self.arguments,
            output,
            operation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_contract() -> ToolContract {
        ToolContract::builder("echo")
            .description("Return the input unchanged")
            .arg("payload", ValueType::Object)
            .output(ValueType::Object)
            .operation(|args| async move { Ok(args) })
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_preserves_argument_order() {
        let contract = ToolContract::builder("score_lookup")
            .description("Look up a score")
            .arg("symbol", ValueType::String)
            .arg("window_days", ValueType::Integer)
            .arg("strict", ValueType::Boolean)
            .output(ValueType::Number)
            .sync_operation(|_| Ok(json!(0.0)))
            .build()
            .unwrap();

        let names: Vec<&str> = contract.arguments().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["symbol", "window_days", "strict"]);
        assert_eq!(contract.output(), ValueType::Number);
    }

    #[test]
    fn test_display_renders_introspection_format() {
        let contract = ToolContract::builder("make_recommendation")
            .description("Combine scores into a recommendation")
            .arg("performance", ValueType::Number)
            .arg("risk", ValueType::Number)
            .output(ValueType::String)
            .sync_operation(|_| Ok(json!("HOLD")))
            .build()
            .unwrap();

        assert_eq!(
            contract.to_string(),
            "Tool Name: make_recommendation, Description: Combine scores into a \
             recommendation, Arguments: performance: number, risk: number, Outputs: string"
        );
    }

    #[test]
    fn test_input_schema_requires_every_argument() {
        let contract = echo_contract();
        let schema = contract.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["payload"]["type"], "object");
        assert_eq!(schema["required"], json!(["payload"]));
    }

    #[tokio::test]
    async fn test_invoke_forwards_args_and_result_unchanged() {
        let contract = echo_contract();
        let args = json!({ "symbol": "ACME", "nested": { "n": 3 } });
        let result = contract.invoke(args.clone()).await.unwrap();
        assert_eq!(result, args);
    }

    #[tokio::test]
    async fn test_invoke_surfaces_operation_errors_unchanged() {
        let contract = ToolContract::builder("flaky")
            .description("Always fails")
            .output(ValueType::Object)
            .operation(|_| async { Err(Error::collaborator("upstream", "connection reset")) })
            .build()
            .unwrap();

        let err = contract.invoke(json!({})).await.unwrap_err();
        assert!(matches!(err, Error::Collaborator { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_build_rejects_missing_description() {
        let err = ToolContract::builder("bare")
            .output(ValueType::String)
            .sync_operation(|_| Ok(Value::Null))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ContractViolation(msg) if msg.contains("description")));
    }

    #[test]
    fn test_build_rejects_blank_description() {
        let err = ToolContract::builder("bare")
            .description("   ")
            .output(ValueType::String)
            .sync_operation(|_| Ok(Value::Null))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));
    }

    #[test]
    fn test_build_rejects_missing_output() {
        let err = ToolContract::builder("no_output")
            .description("Missing an output type")
            .sync_operation(|_| Ok(Value::Null))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ContractViolation(msg) if msg.contains("output")));
    }

    #[test]
    fn test_build_rejects_missing_operation() {
        let err = ToolContract::builder("no_op")
            .description("Missing an operation")
            .output(ValueType::String)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ContractViolation(msg) if msg.contains("operation")));
    }

    #[test]
    fn test_build_rejects_duplicate_argument_names() {
        let err = ToolContract::builder("dupes")
            .description("Duplicate argument names")
            .arg("symbol", ValueType::String)
            .arg("symbol", ValueType::String)
            .output(ValueType::String)
            .sync_operation(|_| Ok(Value::Null))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ContractViolation(msg) if msg.contains("symbol")));
    }

    #[test]
    fn test_build_rejects_empty_name() {
        let err = ToolContract::builder("  ")
            .description("Blank name")
            .output(ValueType::String)
            .sync_operation(|_| Ok(Value::Null))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));
    }
}
