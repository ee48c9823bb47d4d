//! Argument builders for backend-aware `init` and provider lock refresh.
//!
//! Output order is fixed: mapping entries in file order, then the synthesized
//! state key, then passthrough arguments. Terraform keeps the last value for a
//! repeated backend key, so the synthesized key always wins.

use crate::core::path::state_key;

/// Render one backend value. Strings are used raw, everything else in TOML form.
fn render_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `-backend-config=` arguments for `terraform init`.
///
/// Returns an empty list for static directories; callers skip `init` entirely
/// in that case.
pub fn backend_config_args(
    path_id: &str,
    backend: &toml::Table,
    extra: &[String],
    is_static: bool,
) -> Vec<String> {
    if is_static {
        return Vec::new();
    }
    let mut args: Vec<String> = backend
        .iter()
        .map(|(key, value)| format!("-backend-config={key}={}", render_value(value)))
        .collect();
    args.push(format!("-backend-config=key={}", state_key(path_id)));
    args.extend(extra.iter().cloned());
    args
}

/// `-platform=` arguments for `terraform providers lock`, in `arch` order.
pub fn lock_platform_args(arch: &[String]) -> Vec<String> {
    arch.iter().map(|a| format!("-platform={a}")).collect()
}
