use crate::bot::state::def::SessionIdentity;

pub struct Replies;

impl Replies {
    pub fn incorrect_target() -> String {
        "incorrect target KEKWait".to_string()
    }

    pub fn punished() -> String {
        "hmmmShotgun ✅".to_string()
    }

    pub fn pardoned() -> String {
        "HmmEZ ✅".to_string()
    }

    pub fn note_saved() -> String {
        "HmmNotes ✅".to_string()
    }

    pub fn greeting() -> String {
        "soly amk peepoStare".to_string()
    }

    pub fn check(session: &SessionIdentity) -> String {
        format!("{}, {}", session.moderator_id, session.broadcaster_id)
    }

    pub fn timeout_directive(target: &str, duration: &str, reason: &str) -> String {
        format!(".timeout {target} {duration} {reason}")
    }

    pub fn untimeout_directive(target: &str) -> String {
        format!(".untimeout {target}")
    }
}
