/// Whether a delegator may hand out `requested` class scopes.
///
/// Comparison trims whitespace and ignores case. An empty request is
/// vacuously in scope; a delegator with no scopes of their own can delegate
/// nothing (fails closed).
pub fn within_scope(delegator: &[String], requested: &[String]) -> bool {
    if requested.is_empty() {
        return true;
    }
    if delegator.is_empty() {
        return false;
    }
    let allowed: Vec<String> = delegator.iter().map(|s| normalize(s)).collect();
    requested.iter().all(|r| allowed.contains(&normalize(r)))
}

fn normalize(val: &str) -> String {
    val.trim().to_lowercase()
}
