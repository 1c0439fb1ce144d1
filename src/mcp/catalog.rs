use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Bash,
    Read,
    Write,
    Edit,
    Glob,
    Grep,
    WebFetch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Boolean,
}

impl ParamType {
    pub fn json_type(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: ParamType,
    pub required: bool,
    pub minimum: Option<u64>,
    pub description: &'static str,
}

const fn required(name: &'static str, ty: ParamType, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        ty,
        required: true,
        minimum: None,
        description,
    }
}

const fn optional(name: &'static str, ty: ParamType, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        ty,
        required: false,
        minimum: None,
        description,
    }
}

const fn bounded(name: &'static str, minimum: u64, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        ty: ParamType::Integer,
        required: false,
        minimum: Some(minimum),
        description,
    }
}

const BASH_PARAMS: &[ParamSpec] = &[
    required(
        "command",
        ParamType::String,
        "Shell command to run in the remote working directory",
    ),
    optional(
        "sandbox",
        ParamType::Boolean,
        "Run under a hard timeout with a private TMPDIR",
    ),
];

const READ_PARAMS: &[ParamSpec] = &[
    required("file_path", ParamType::String, "File to read"),
    bounded("offset", 0, "Number of leading lines to skip (default 0)"),
    bounded("limit", 1, "Maximum number of lines to return (default 2000)"),
];

const WRITE_PARAMS: &[ParamSpec] = &[
    required("file_path", ParamType::String, "File to create or overwrite"),
    required("content", ParamType::String, "Exact file content"),
];

const EDIT_PARAMS: &[ParamSpec] = &[
    required("file_path", ParamType::String, "File to edit in place"),
    required("old_string", ParamType::String, "Literal text to replace"),
    required("new_string", ParamType::String, "Replacement text"),
    optional(
        "replace_all",
        ParamType::Boolean,
        "Replace every occurrence on each line instead of the first",
    ),
];

const GLOB_PARAMS: &[ParamSpec] = &[
    required("pattern", ParamType::String, "File name pattern, e.g. *.rs"),
    optional("path", ParamType::String, "Directory to search (default .)"),
];

const GREP_PARAMS: &[ParamSpec] = &[
    required("pattern", ParamType::String, "Regular expression to search for"),
    optional("path", ParamType::String, "File or directory to search (default .)"),
    optional("-i", ParamType::Boolean, "Case-insensitive match"),
    optional("-n", ParamType::Boolean, "Prefix matches with line numbers"),
];

const WEBFETCH_PARAMS: &[ParamSpec] = &[required(
    "url",
    ParamType::String,
    "URL to fetch from the remote host",
)];

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Bash,
        ToolKind::Read,
        ToolKind::Write,
        ToolKind::Edit,
        ToolKind::Glob,
        ToolKind::Grep,
        ToolKind::WebFetch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Bash => "bash",
            ToolKind::Read => "read",
            ToolKind::Write => "write",
            ToolKind::Edit => "edit",
            ToolKind::Glob => "glob",
            ToolKind::Grep => "grep",
            ToolKind::WebFetch => "webfetch",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::Bash => "Execute a shell command on the remote server",
            ToolKind::Read => "Read a file on the remote server with line numbers",
            ToolKind::Write => "Write a file on the remote server",
            ToolKind::Edit => "Replace text in a file on the remote server",
            ToolKind::Glob => "Find files by name pattern on the remote server",
            ToolKind::Grep => "Search file contents recursively on the remote server",
            ToolKind::WebFetch => "Fetch a URL from the remote server",
        }
    }

    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            ToolKind::Bash => BASH_PARAMS,
            ToolKind::Read => READ_PARAMS,
            ToolKind::Write => WRITE_PARAMS,
            ToolKind::Edit => EDIT_PARAMS,
            ToolKind::Glob => GLOB_PARAMS,
            ToolKind::Grep => GREP_PARAMS,
            ToolKind::WebFetch => WEBFETCH_PARAMS,
        }
    }

    /// A non-zero exit is an answer, not a failure (grep with no matches,
    /// a failing test command).
    pub fn tolerate_non_zero_exit(self) -> bool {
        matches!(self, ToolKind::Bash | ToolKind::Grep)
    }

    pub fn error_prefix(self) -> &'static str {
        match self {
            ToolKind::Bash => "Command failed",
            ToolKind::Read => "Error reading file",
            ToolKind::Write => "Error writing file",
            ToolKind::Edit => "Error editing file",
            ToolKind::Glob => "Error searching files",
            ToolKind::Grep => "Search failed",
            ToolKind::WebFetch => "Error fetching URL",
        }
    }

    pub fn input_schema(self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for spec in self.params() {
            let mut prop = Map::new();
            prop.insert("type".to_string(), Value::from(spec.ty.json_type()));
            prop.insert("description".to_string(), Value::from(spec.description));
            if let Some(minimum) = spec.minimum {
                prop.insert("minimum".to_string(), Value::from(minimum));
            }
            properties.insert(spec.name.to_string(), Value::Object(prop));
            if spec.required {
                required.push(Value::from(spec.name));
            }
        }
        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

static TOOL_CATALOG: Lazy<Vec<ToolDef>> = Lazy::new(|| {
    ToolKind::ALL
        .iter()
        .map(|tool| ToolDef {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            input_schema: tool.input_schema(),
        })
        .collect()
});

pub fn tool_catalog() -> &'static Vec<ToolDef> {
    &TOOL_CATALOG
}
