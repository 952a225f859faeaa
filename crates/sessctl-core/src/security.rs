/// Decide whether `sender` may control this session.
///
/// The single configured username is ground truth: exact, case-sensitive
/// equality. A sender without a username is never authorized, and an empty
/// configured username denies everyone rather than opening the bot up.
/// The check is re-run for every inbound command; there is no logged-in
/// state.
pub fn is_authorized(sender: Option<&str>, authorized_username: &str) -> bool {
    if authorized_username.is_empty() {
        return false;
    }
    sender == Some(authorized_username)
}
