//! Output formatting for resolved configuration.

use crate::config::{ConfigMetadata, Field, Resolution, ResolvedConfig};
use serde_json::Value;
use std::path::Path;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Show only the first and last two characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 6 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Display value of a field, with the API key masked.
fn field_value(config: &ResolvedConfig, field: Field) -> String {
    match field {
        Field::BaseUrl => config.base_url.clone(),
        Field::ApiKey => config
            .api_key
            .as_deref()
            .map(mask_secret)
            .unwrap_or_else(|| "(unset)".to_string()),
        Field::ContainerTag => config.container_tag.clone(),
        Field::AutoRecall => config.auto_recall.to_string(),
        Field::AutoCapture => config.auto_capture.to_string(),
        Field::MaxRecallResults => config.max_recall_results.to_string(),
        Field::ProfileFrequency => config.profile_frequency.to_string(),
        Field::Debug => config.debug.to_string(),
    }
}

fn push_file_line(out: &mut String, label: &str, path: Option<&Path>) {
    match path {
        Some(path) => out.push_str(&format!("  {:<12} {}\n", label, path.display())),
        None => out.push_str(&format!("  {:<12} (not found)\n", label)),
    }
}

fn format_files(meta: &ConfigMetadata) -> String {
    let mut out = String::new();
    out.push_str("Files:\n");
    push_file_line(&mut out, "project", meta.project_file.as_deref());
    push_file_line(&mut out, "global:pi", meta.global_pi_file.as_deref());
    push_file_line(&mut out, "global:momo", meta.global_momo_file.as_deref());
    out
}

/// Render a resolution in the requested format.
pub fn format_resolution(resolution: &Resolution, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_resolution_text(resolution),
        OutputFormat::Json => serde_json::to_string_pretty(&resolution_json(resolution))
            .unwrap_or_default(),
    }
}

/// Format a resolution as text: one line per field with its source, then files.
pub fn format_resolution_text(resolution: &Resolution) -> String {
    let mut out = String::new();
    out.push_str(&format!("Config for {}\n\n", resolution.meta.cwd.display()));

    for field in Field::ALL {
        out.push_str(&format!(
            "  {:<18} {:<28} [{}]\n",
            field.key(),
            field_value(&resolution.config, field),
            resolution.meta.source_of(field)
        ));
    }

    out.push('\n');
    out.push_str(&format_files(&resolution.meta));
    out
}

/// Format only the per-field sources as text.
pub fn format_sources_text(meta: &ConfigMetadata) -> String {
    let mut out = String::new();
    for field in Field::ALL {
        out.push_str(&format!("{:<18} {}\n", field.key(), meta.source_of(field)));
    }
    out.push('\n');
    out.push_str(&format_files(meta));
    out
}

/// JSON form of a resolution with the API key masked.
pub fn resolution_json(resolution: &Resolution) -> Value {
    let mut value = serde_json::to_value(resolution).unwrap_or(Value::Null);
    if let Some(key) = value.pointer_mut("/config/apiKey")
        && let Some(masked) = key.as_str().map(mask_secret)
    {
        *key = Value::String(masked);
    }
    value
}
