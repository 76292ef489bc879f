//! Tool domain entities

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Definition of a tool that can be offered to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "search_documents")
    pub name: String,
    /// Natural-language guidance telling the model when to use the tool
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// JSON Schema type ("string", "number", "integer", "boolean", "array")
    pub param_type: String,
    /// Element type for array parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// JSON Schema object describing the accepted arguments.
    pub fn parameters_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &self.parameters {
            properties.insert(param.name.clone(), param.to_schema());
            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Project into the provider's function-declaration shape:
    /// `{name, description, parameters}`.
    pub fn to_function_declaration(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "parameters": self.parameters_schema(),
        })
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
            item_type: None,
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }

    /// Mark as an array of `item_type` elements.
    pub fn array_of(mut self, item_type: impl Into<String>) -> Self {
        self.param_type = "array".to_string();
        self.item_type = Some(item_type.into());
        self
    }

    fn to_schema(&self) -> Value {
        let schema_type = match self.param_type.as_str() {
            "number" => "number",
            "integer" => "integer",
            "boolean" => "boolean",
            "array" => "array",
            _ => "string",
        };

        let mut prop = Map::new();
        prop.insert("type".to_string(), json!(schema_type));
        if schema_type == "array" {
            let item = self.item_type.as_deref().unwrap_or("string");
            prop.insert("items".to_string(), json!({ "type": item }));
        }
        prop.insert("description".to_string(), json!(self.description));
        Value::Object(prop)
    }
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: Map::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Build from a JSON value; anything other than an object yields no arguments.
    pub fn from_json_args(tool_name: impl Into<String>, args: Value) -> Self {
        let arguments = match args {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// Get a list of strings; non-string elements are skipped.
    pub fn get_string_list(&self, key: &str) -> Option<Vec<String>> {
        self.arguments.get(key).and_then(|v| v.as_array()).map(|items| {
            items
                .iter()
                .filter_map(|i| i.as_str().map(str::to_string))
                .collect()
        })
    }

    /// Arguments rendered as compact JSON (non-ASCII kept as-is).
    pub fn arguments_json(&self) -> String {
        serde_json::to_string(&self.arguments).unwrap_or_else(|_| "{}".to_string())
    }
}
