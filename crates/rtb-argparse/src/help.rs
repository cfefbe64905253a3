use crate::options::{OptionSet, OptionSpec, ValueType};

const HELP_TEXT: &str = "Show help information";

fn format_left(spec: &OptionSpec) -> String {
    let mut names: Vec<String> = Vec::new();
    if let Some(c) = spec.short_alias() {
        names.push(format!("-{c}"));
    }
    names.push(format!("--{}", spec.name()));
    let mut out = names.join(", ");

    let value_name = spec.display_value_name();
    match spec.value_type() {
        ValueType::Boolean => out.push_str(&format!("[=<{value_name}>]")),
        ValueType::RepeatedString => out.push_str(&format!(" <{value_name}>...")),
        ValueType::String | ValueType::Integer => out.push_str(&format!(" <{value_name}>")),
    }
    out
}

fn format_help(spec: &OptionSpec) -> String {
    let mut parts: Vec<String> = Vec::new();
    let help = spec.help_text().trim();
    if !help.is_empty() {
        parts.push(help.to_string());
    }

    if spec.is_required() {
        parts.push("(required)".to_string());
    } else {
        parts.push("(optional)".to_string());
    }

    if !spec.allowed().is_empty() {
        parts.push(format!("[possible values: {}]", spec.allowed().join(", ")));
    }

    if let Some(default) = spec.default_value() {
        let rendered = default.to_string();
        if !rendered.is_empty() {
            parts.push(format!("[default: {rendered}]"));
        }
    }

    parts.join(" ")
}

impl OptionSet {
    /// Render a help message listing every declared option in declaration order.
    pub fn render_help(&self) -> String {
        let mut out = String::new();
        if self.summary_text().trim().is_empty() {
            out.push_str(self.name());
            out.push('\n');
        } else {
            out.push_str(&format!("{} - {}\n", self.name(), self.summary_text().trim()));
        }

        if self.usage_text().trim().is_empty() {
            out.push_str(&format!("\nUsage: {} [OPTIONS]\n", self.name()));
        } else {
            out.push_str(&format!("\nUsage: {}\n", self.usage_text().trim()));
        }

        let mut rows: Vec<(String, String)> = self
            .options()
            .iter()
            .map(|spec| (format_left(spec), format_help(spec)))
            .collect();

        let builtin = match (self.builtin_help_short(), self.builtin_help_long()) {
            (true, true) => Some("-h, --help"),
            (true, false) => Some("-h"),
            (false, true) => Some("--help"),
            (false, false) => None,
        };
        if let Some(left) = builtin {
            rows.push((left.to_string(), HELP_TEXT.to_string()));
        }

        out.push_str("\nOptions:\n");
        let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (left, help) in rows {
            if help.is_empty() {
                out.push_str(&format!("  {}\n", left));
            } else {
                out.push_str(&format!("  {:width$}  {}\n", left, help, width = width));
            }
        }

        out
    }
}
