fn is_safe_shell_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(ch, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

/// POSIX single-quote a word. Words made only of safe characters are left bare.
pub fn shell_quote(value: &str) -> String {
    if !value.is_empty() && value.chars().all(is_safe_shell_char) {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Like [`shell_quote`] but keeps a leading `~` or `~/` outside the quotes so
/// the remote shell still expands it.
pub fn quote_path(path: &str) -> String {
    if path == "~" {
        return "~".to_string();
    }
    match path.strip_prefix("~/") {
        Some("") => "~/".to_string(),
        Some(rest) => format!("~/{}", shell_quote(rest)),
        None => shell_quote(path),
    }
}

/// Quote a path operand. A leading `-` gets a `./` prefix so the command
/// cannot read it as an option.
pub fn quote_operand(path: &str) -> String {
    if path.starts_with('-') {
        return quote_path(&format!("./{}", path));
    }
    quote_path(path)
}

/// Escape a literal string for the pattern side of a `sed` `s/…/…/` expression (BRE).
pub fn sed_escape_pattern(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' | '/' | '.' | '*' | '[' | ']' | '^' | '$' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a literal string for the replacement side of a `sed` `s/…/…/` expression.
pub fn sed_escape_replacement(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' | '/' | '&' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_words_stay_bare() {
        assert_eq!(shell_quote("/srv/work"), "/srv/work");
        assert_eq!(shell_quote("notes.txt"), "notes.txt");
        assert_eq!(shell_quote("user@host:22"), "user@host:22");
    }

    #[test]
    fn unsafe_words_are_single_quoted() {
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("*.rs"), "'*.rs'");
        assert_eq!(shell_quote("a b"), "'a b'");
        assert_eq!(shell_quote("$(rm -rf /)"), "'$(rm -rf /)'");
        assert_eq!(shell_quote("`id`"), "'`id`'");
    }

    #[test]
    fn single_quotes_close_and_reopen() {
        assert_eq!(shell_quote("O'Brien"), "'O'\\''Brien'");
        assert_eq!(shell_quote("'"), "''\\'''");
    }

    #[test]
    fn quote_path_keeps_home_expansion() {
        assert_eq!(quote_path("~"), "~");
        assert_eq!(quote_path("~/"), "~/");
        assert_eq!(quote_path("~/my project"), "~/'my project'");
        assert_eq!(quote_path("/tmp/~x"), "'/tmp/~x'");
    }

    #[test]
    fn dash_operands_cannot_become_options() {
        assert_eq!(quote_operand("-delete"), "./-delete");
        assert_eq!(quote_operand("--files-from x"), "'./--files-from x'");
        assert_eq!(quote_operand("-"), "./-");
        assert_eq!(quote_operand("src/-x"), "src/-x");
        assert_eq!(quote_operand("~/-x"), "~/-x");
        assert_eq!(quote_operand("a b"), "'a b'");
    }

    #[test]
    fn sed_pattern_escapes_delimiter_and_metacharacters() {
        assert_eq!(sed_escape_pattern("a/b"), "a\\/b");
        assert_eq!(sed_escape_pattern("v1.2*"), "v1\\.2\\*");
        assert_eq!(sed_escape_pattern("[x]^$"), "\\[x\\]\\^\\$");
        assert_eq!(sed_escape_pattern("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn sed_replacement_escapes_delimiter_and_ampersand() {
        assert_eq!(sed_escape_replacement("c/d"), "c\\/d");
        assert_eq!(sed_escape_replacement("a & b"), "a \\& b");
        assert_eq!(sed_escape_replacement("line\nnext"), "line\\nnext");
        assert_eq!(sed_escape_replacement("1.2*"), "1.2*");
    }
}
