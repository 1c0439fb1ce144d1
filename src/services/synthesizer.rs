use crate::services::policy::ExecutionPolicy;
use crate::services::validation::ToolRequest;
use crate::utils::shell::{quote_operand, sed_escape_pattern, sed_escape_replacement, shell_quote};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedCommand {
    pub text: String,
    /// Set when the command runs under the sandbox `timeout` wrapper.
    pub sandbox_timeout_secs: Option<u64>,
}

pub fn synthesize(request: &ToolRequest, policy: &ExecutionPolicy) -> SynthesizedCommand {
    let mut sandbox_timeout_secs = None;
    let body = match request {
        ToolRequest::Bash { command, sandbox } => {
            if policy.resolve_sandbox(*sandbox) {
                sandbox_timeout_secs = Some(policy.sandbox_timeout_secs);
                policy.sandboxed(command)
            } else {
                command.clone()
            }
        }
        ToolRequest::Read {
            file_path,
            offset,
            limit,
        } => {
            let offset = offset.unwrap_or(policy.read_offset);
            let limit = limit.unwrap_or(policy.read_limit);
            read_command(file_path, offset, limit, policy)
        }
        ToolRequest::Write { file_path, content } => format!(
            "printf '%s' {} > {}",
            shell_quote(content),
            quote_operand(file_path)
        ),
        ToolRequest::Edit {
            file_path,
            old_string,
            new_string,
            replace_all,
        } => {
            let expression = format!(
                "s/{}/{}/{}",
                sed_escape_pattern(old_string),
                sed_escape_replacement(new_string),
                if *replace_all { "g" } else { "" }
            );
            format!(
                "sed -i {} {}",
                shell_quote(&expression),
                quote_operand(file_path)
            )
        }
        ToolRequest::Glob { pattern, path } => format!(
            "find {} -name {} -type f | sort",
            quote_operand(path.as_deref().unwrap_or(".")),
            shell_quote(pattern)
        ),
        ToolRequest::Grep {
            pattern,
            path,
            case_insensitive,
            line_numbers,
        } => {
            let mut parts = vec!["grep", "-r"];
            if *case_insensitive {
                parts.push("-i");
            }
            if *line_numbers {
                parts.push("-n");
            }
            format!(
                "{} -e {} -- {}",
                parts.join(" "),
                shell_quote(pattern),
                quote_operand(path.as_deref().unwrap_or("."))
            )
        }
        ToolRequest::WebFetch { url } => format!("curl -s -L {}", shell_quote(url)),
    };
    SynthesizedCommand {
        text: policy.in_working_dir(&body),
        sandbox_timeout_secs,
    }
}

fn read_command(file_path: &str, offset: u64, limit: u64, policy: &ExecutionPolicy) -> String {
    let file = quote_operand(file_path);
    if policy.is_default_read_window(offset, limit) {
        return format!("cat -n {}", file);
    }
    format!(
        "tail -n +{} {} | head -n {} | cat -n",
        offset.saturating_add(1),
        file,
        limit
    )
}
