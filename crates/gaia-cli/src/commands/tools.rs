//! Tools introspection commands.
//!
//! `gaia tools list` - List the published tools.
//! `gaia tools describe` - Show the full descriptor of one tool.

use anyhow::Result;
use gaia_tools::{ToolDefinition, builtin_registry};

fn badge(tool: &ToolDefinition) -> &'static str {
    let read_only = tool
        .annotations
        .as_ref()
        .is_some_and(|a| a.read_only == Some(true));
    if read_only { "read" } else { "write" }
}

fn required_fields(tool: &ToolDefinition) -> Vec<&str> {
    tool.input_schema["required"]
        .as_array()
        .map(|fields| fields.iter().filter_map(|f| f.as_str()).collect())
        .unwrap_or_default()
}

/// List the published tools.
pub fn list(verbose: bool) -> Result<()> {
    let registry = builtin_registry();

    println!("\n🔧 Available Tools ({}):", registry.len());

    for tool in registry.list() {
        println!("   • {} ({})", tool.name, badge(tool));

        if let Some(desc) = &tool.description {
            println!("     {}", desc);
        }

        let required = required_fields(tool);
        if !required.is_empty() {
            println!("     Required: {}", required.join(", "));
        }

        if verbose {
            println!(
                "     Schema: {}",
                serde_json::to_string_pretty(&tool.input_schema)?
            );
        }
    }

    println!();

    Ok(())
}

/// Show the full descriptor of one tool.
pub fn describe(tool_name: &str) -> Result<()> {
    let registry = builtin_registry();
    let tool = registry.get(tool_name).ok_or_else(|| {
        anyhow::anyhow!(
            "Tool '{}' not found. Available: {}",
            tool_name,
            registry.names().join(", ")
        )
    })?;

    println!("\nTool: {}", tool.name);

    if let Some(desc) = &tool.description {
        println!("\nDescription: {}", desc);
    }

    println!("\nInput Schema:");
    println!("{}", serde_json::to_string_pretty(&tool.input_schema)?);

    if let Some(true) = tool.annotations.as_ref().and_then(|a| a.read_only) {
        println!("\nAnnotations:");
        println!("  • readOnly: true");
    }

    println!();

    Ok(())
}
