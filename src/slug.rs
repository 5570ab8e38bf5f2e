//! Filesystem-safe names for per-project report directories.

/// Encode a project code as a single path component.
///
/// ASCII alphanumerics, `-` and `_` are kept as-is; every other byte
/// (including `%`) becomes `%XX`. The mapping is injective, so two
/// distinct codes never share a directory. A blank code yields "project".
pub fn project_dir_name(project_code: &str) -> String {
    let code = project_code.trim();
    if code.is_empty() {
        return "project".to_string();
    }

    let mut name = String::with_capacity(code.len());
    for byte in code.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            name.push(char::from(byte));
        } else {
            name.push_str(&format!("%{:02X}", byte));
        }
    }
    name
}
