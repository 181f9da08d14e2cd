// Username normalization for Farcaster handle lookups.

/// Naming-service suffixes stripped before lookup. First match wins.
pub const HANDLE_SUFFIXES: &[&str] = &[".farcaster.eth", ".eth", ".fc", ".farcaster"];

/// Normalize user input into a bare, lowercase Farcaster username.
///
/// `@Vitalik.eth` -> `vitalik`, `dwr.farcaster.eth` -> `dwr`.
pub fn normalize_username(input: &str) -> String {
    let mut name = strip_at(input.trim());

    for suffix in HANDLE_SUFFIXES {
        let Some(cut) = name.len().checked_sub(suffix.len()) else {
            continue;
        };
        let matches = name
            .get(cut..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix));
        if matches {
            name = &name[..cut];
            break;
        }
    }

    name.to_lowercase().trim().to_string()
}

/// Strip a single leading `@`.
pub fn strip_at(input: &str) -> &str {
    input.strip_prefix('@').unwrap_or(input)
}
