use crate::errors::ToolError;
use crate::mcp::catalog::{ParamSpec, ParamType, ToolKind};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Number(f64),
    Bool(bool),
}

impl ParamValue {
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(ParamValue::String(text.clone())),
            Value::Number(n) => n.as_f64().map(ParamValue::Number),
            Value::Bool(flag) => Some(ParamValue::Bool(*flag)),
            _ => None,
        }
    }

    fn matches(&self, spec: &ParamSpec) -> bool {
        match (self, spec.ty) {
            (ParamValue::String(_), ParamType::String) => true,
            (ParamValue::Bool(_), ParamType::Boolean) => true,
            (ParamValue::Number(n), ParamType::Integer) => {
                n.is_finite() && n.fract() == 0.0 && *n >= spec.minimum.unwrap_or(0) as f64
            }
            _ => false,
        }
    }
}

/// Arguments checked against a tool's parameter specs. Unknown keys are dropped.
#[derive(Debug, Clone)]
pub struct ToolArgs {
    tool: ToolKind,
    values: HashMap<&'static str, ParamValue>,
}

impl ToolArgs {
    pub fn validate(tool: ToolKind, args: &Value) -> Result<Self, ToolError> {
        let empty = serde_json::Map::new();
        let obj = args.as_object().unwrap_or(&empty);
        let mut values = HashMap::new();
        for spec in tool.params() {
            let raw = obj.get(spec.name).filter(|v| !v.is_null());
            let parsed = raw.and_then(ParamValue::from_json);
            match (raw, parsed) {
                (None, _) if spec.required => return Err(ToolError::missing_parameter(spec.name)),
                (None, _) => {}
                (Some(_), Some(value)) if value.matches(spec) => {
                    values.insert(spec.name, value);
                }
                (Some(_), _) if spec.required => {
                    return Err(ToolError::missing_parameter(spec.name).with_hint(format!(
                        "{} must be a {}",
                        spec.name,
                        spec.ty.json_type()
                    )))
                }
                (Some(raw), _) => return Err(invalid_optional(spec, raw)),
            }
        }
        Ok(Self { tool, values })
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::String(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn require_string(&self, name: &str) -> Result<String, ToolError> {
        self.string(name)
            .map(|s| s.to_string())
            .ok_or_else(|| ToolError::missing_parameter(name))
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ParamValue::Bool(flag)) => Some(*flag),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<u64> {
        match self.values.get(name) {
            Some(ParamValue::Number(n)) => Some(*n as u64),
            _ => None,
        }
    }
}

fn invalid_optional(spec: &ParamSpec, raw: &Value) -> ToolError {
    let expected = match (spec.ty, spec.minimum) {
        (ParamType::Integer, Some(min)) => format!("an integer >= {}", min),
        (ty, _) => format!("a {}", ty.json_type()),
    };
    ToolError::invalid_params(
        spec.name,
        format!("Error: parameter {} must be {}, got {}", spec.name, expected, raw),
    )
}

/// One validated invocation, typed per tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolRequest {
    Bash {
        command: String,
        sandbox: Option<bool>,
    },
    Read {
        file_path: String,
        offset: Option<u64>,
        limit: Option<u64>,
    },
    Write {
        file_path: String,
        content: String,
    },
    Edit {
        file_path: String,
        old_string: String,
        new_string: String,
        replace_all: bool,
    },
    Glob {
        pattern: String,
        path: Option<String>,
    },
    Grep {
        pattern: String,
        path: Option<String>,
        case_insensitive: bool,
        line_numbers: bool,
    },
    WebFetch {
        url: String,
    },
}

impl ToolRequest {
    pub fn parse(tool: ToolKind, args: &Value) -> Result<Self, ToolError> {
        Self::from_args(&ToolArgs::validate(tool, args)?)
    }

    pub fn from_args(args: &ToolArgs) -> Result<Self, ToolError> {
        let request = match args.tool() {
            ToolKind::Bash => ToolRequest::Bash {
                command: args.require_string("command")?,
                sandbox: args.flag("sandbox"),
            },
            ToolKind::Read => ToolRequest::Read {
                file_path: args.require_string("file_path")?,
                offset: args.integer("offset"),
                limit: args.integer("limit"),
            },
            ToolKind::Write => ToolRequest::Write {
                file_path: args.require_string("file_path")?,
                content: args.require_string("content")?,
            },
            ToolKind::Edit => ToolRequest::Edit {
                file_path: args.require_string("file_path")?,
                old_string: args.require_string("old_string")?,
                new_string: args.require_string("new_string")?,
                replace_all: args.flag("replace_all").unwrap_or(false),
            },
            ToolKind::Glob => ToolRequest::Glob {
                pattern: args.require_string("pattern")?,
                path: args.string("path").map(|s| s.to_string()),
            },
            ToolKind::Grep => ToolRequest::Grep {
                pattern: args.require_string("pattern")?,
                path: args.string("path").map(|s| s.to_string()),
                case_insensitive: args.flag("-i").unwrap_or(false),
                line_numbers: args.flag("-n").unwrap_or(false),
            },
            ToolKind::WebFetch => ToolRequest::WebFetch {
                url: args.require_string("url")?,
            },
        };
        Ok(request)
    }

    pub fn tool(&self) -> ToolKind {
        match self {
            ToolRequest::Bash { .. } => ToolKind::Bash,
            ToolRequest::Read { .. } => ToolKind::Read,
            ToolRequest::Write { .. } => ToolKind::Write,
            ToolRequest::Edit { .. } => ToolKind::Edit,
            ToolRequest::Glob { .. } => ToolKind::Glob,
            ToolRequest::Grep { .. } => ToolKind::Grep,
            ToolRequest::WebFetch { .. } => ToolKind::WebFetch,
        }
    }
}
