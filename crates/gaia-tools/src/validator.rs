//! Argument validation against each tool's input schema.

use crate::error::ToolError;
use crate::tools::ToolRegistry;
use serde_json::Value;
use std::collections::HashMap;

/// Compiled input schemas, one per registered tool.
pub struct ArgumentValidator {
    validators: HashMap<String, jsonschema::Validator>,
}

impl ArgumentValidator {
    /// Compile the input schema of every tool in the registry.
    pub fn compile(registry: &ToolRegistry) -> Result<Self, ToolError> {
        let mut validators = HashMap::with_capacity(registry.len());
        for tool in registry.list() {
            let validator = jsonschema::validator_for(&tool.input_schema).map_err(|e| {
                ToolError::InvalidSchema {
                    tool: tool.name.clone(),
                    reason: e.to_string(),
                }
            })?;
            validators.insert(tool.name.clone(), validator);
        }
        Ok(Self { validators })
    }

    /// Check `arguments` against the tool's schema, listing every violation.
    pub fn validate(&self, tool: &str, arguments: &Value) -> Result<(), ToolError> {
        let validator = self.validators.get(tool).ok_or_else(|| ToolError::ToolNotFound {
            name: tool.to_string(),
        })?;

        let violations: Vec<String> = validator
            .iter_errors(arguments)
            .map(|error| {
                let path = error.instance_path().to_string();
                let location = if path.is_empty() {
                    "(root)".to_string()
                } else {
                    path
                };
                format!("{location}: {error}")
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ToolError::InvalidArguments {
                tool: tool.to_string(),
                reason: violations.join("; "),
            })
        }
    }
}
