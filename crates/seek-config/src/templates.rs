//! Starter files written by `seek init`.
//!
//! Each template is a real `.seek.toml` listing every setting at its default. It is written out
//! fully commented, so a fresh file changes nothing until edited.

/// Per-project starter, including the `root` switch.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Starter for `~/.seek.toml`.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Commented per-project starter.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Commented global starter.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Prefixes every setting line with `# `, leaving blank lines and existing comments alone.
fn comment_template(template: &str) -> String {
    let mut out = String::with_capacity(template.len() + template.len() / 8);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            out.push_str("# ");
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}
