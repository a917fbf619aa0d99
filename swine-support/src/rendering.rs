//! Text rendering utilities for human-friendly output.
//!
//! Provides helpers to shorten type names, suggest close matches for a
//! missing registration, and dump an entity as an indented record.

/// Placeholder printed for an absent value.
pub const NIL: &str = "nil";

/// Shortens a fully qualified type name for display.
///
/// ```
/// use swine_support::rendering::shorten_type_name;
///
/// let short = shorten_type_name("swine::user::MockUser");
/// assert_eq!(short, "MockUser");
///
/// let short = shorten_type_name("alloc::sync::Arc<dyn swine::user::User>");
/// assert_eq!(short, "Arc<dyn User>");
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    // "swine::user::MockUser" → "MockUser"
    // "Arc<dyn swine::User>" → "Arc<dyn User>"

    let mut result = String::with_capacity(full_name.len());
    let mut chars = full_name.chars().peekable();
    let mut current_segment = String::new();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                current_segment.clear();
            }
            '<' | '>' | ',' | ' ' | '(' | ')' => {
                result.push_str(&current_segment);
                result.push(ch);
                current_segment.clear();
            }
            _ => current_segment.push(ch),
        }
    }

    result.push_str(&current_segment);
    result
}

/// Picks the registered names closest to `requested`, best first.
///
/// Substring matches on the full name rank above matches on the short
/// name, which rank above a shared prefix of three or more characters.
pub fn suggest_similar(
    requested: &str,
    available: &[&str],
    max_suggestions: usize,
) -> Vec<String> {
    let requested_lower = requested.to_lowercase();
    let requested_short = shorten_type_name(requested).to_lowercase();

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter_map(|&name| {
            let name_lower = name.to_lowercase();
            let name_short = shorten_type_name(name).to_lowercase();

            if name_lower.contains(&requested_lower) || requested_lower.contains(&name_lower) {
                return Some((name, 100));
            }

            if name_short.contains(&requested_short) || requested_short.contains(&name_short) {
                return Some((name, 80));
            }

            let common = name_short
                .chars()
                .zip(requested_short.chars())
                .take_while(|(a, b)| a == b)
                .count();

            (common >= 3).then_some((name, common * 10))
        })
        .collect();

    // stable sort keeps registration order among equal scores
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Renders a heap address the way debuggers print object identities.
pub fn render_address<T: ?Sized>(ptr: *const T) -> String {
    format!("{:p}", ptr.cast::<()>())
}

/// Renders an entity as a titled, tab-indented record.
///
/// ```
/// use swine_support::rendering::render_record;
///
/// let dump = render_record("MockUser 0x1", &[("ID", "1".into()), ("username", "test001".into())]);
/// assert_eq!(dump, "MockUser 0x1:\n\tID: 1\n\tusername: test001\n");
/// ```
pub fn render_record(title: &str, fields: &[(&str, String)]) -> String {
    let mut out = format!("{title}:\n");
    for (label, value) in fields {
        out.push_str(&format!("\t{label}: {value}\n"));
    }
    out
}
