use thiserror::Error;

pub mod commands;
pub mod executor;

pub const DEFAULT_DURATION: &str = "123s";
pub const DEFAULT_REASON: &str = "hmmmShotgun";
pub const ARG_DELIMITER: &str = " | ";

pub const MIN_TARGET_LEN: usize = 4;
pub const MAX_TARGET_LEN: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTargets {
    pub targets: Vec<String>,
    pub duration: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("no targets given")]
    Empty,
    #[error("target '{0}' must be 4-25 characters")]
    BadLength(String),
}

fn strip_leading_at(args: &str) -> &str {
    let args = args.trim();
    args.strip_prefix('@').unwrap_or(args)
}

fn split_targets(segment: &str) -> Vec<String> {
    segment.split_whitespace().map(str::to_string).collect()
}

/// `@a b | 60s | reason` with duration and reason optional.
pub fn parse_timeout_args(args: &str) -> ParsedTargets {
    let mut segments = strip_leading_at(args).split(ARG_DELIMITER);

    let targets = split_targets(segments.next().unwrap_or(""));
    let duration = segments.next().filter(|s| !s.is_empty()).unwrap_or(DEFAULT_DURATION);
    let reason = segments.next().filter(|s| !s.is_empty()).unwrap_or(DEFAULT_REASON);

    ParsedTargets {
        targets,
        duration: duration.to_string(),
        reason: reason.to_string(),
    }
}

/// Untimeout, ban and unban take nothing but targets.
pub fn parse_target_list(args: &str) -> Vec<String> {
    split_targets(strip_leading_at(args))
}

pub fn is_valid_target(target: &str) -> bool {
    (MIN_TARGET_LEN..=MAX_TARGET_LEN).contains(&target.chars().count())
}

/// All or nothing: one bad target rejects the whole list.
pub fn validate_targets(targets: &[String]) -> Result<(), TargetError> {
    if targets.is_empty() {
        return Err(TargetError::Empty);
    }
    match targets.iter().find(|t| !is_valid_target(t)) {
        Some(bad) => Err(TargetError::BadLength(bad.clone())),
        None => Ok(()),
    }
}
