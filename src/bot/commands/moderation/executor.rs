use tracing::{debug, error, info, warn};

use crate::bot::{commands::{commands::BotResult, moderation::validate_targets}, replies::Replies, state::def::AppState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModAction {
    Timeout { duration: String, reason: String },
    Untimeout,
    Ban { reason: String },
    Unban,
}

impl ModAction {
    fn acknowledgment(&self) -> String {
        match self {
            ModAction::Timeout { .. } | ModAction::Ban { .. } => Replies::punished(),
            ModAction::Untimeout | ModAction::Unban => Replies::pardoned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationPhase {
    Idle,
    Validating,
    ResolvingIds,
    Executing { index: usize, total: usize },
    Acknowledged,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationReport {
    pub phase: ModerationPhase,
    pub requested: usize,
    pub resolved: usize,
    pub failed: usize,
}

/// One moderation command from validation to acknowledgment.
pub struct ModerationRun<'a> {
    state: &'a AppState,
    channel: &'a str,
    phase: ModerationPhase,
    resolved: usize,
    failed: usize,
}

impl<'a> ModerationRun<'a> {
    pub fn new(state: &'a AppState, channel: &'a str) -> Self {
        ModerationRun { state, channel, phase: ModerationPhase::Idle, resolved: 0, failed: 0 }
    }

    fn advance(&mut self, next: ModerationPhase) {
        debug!("Moderation phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    fn report(&self, requested: usize) -> ModerationReport {
        ModerationReport { phase: self.phase, requested, resolved: self.resolved, failed: self.failed }
    }

    pub async fn execute(mut self, targets: Vec<String>, action: ModAction) -> BotResult<ModerationReport> {
        self.advance(ModerationPhase::Validating);
        if let Err(e) = validate_targets(&targets) {
            warn!("Rejected {:?} on {:?}: {}", action, targets, e);
            self.advance(ModerationPhase::Rejected);
            self.state.chat_client.send_message(self.channel, &Replies::incorrect_target()).await?;
            return Ok(self.report(targets.len()));
        }

        match &action {
            ModAction::Timeout { duration, reason } => {
                for (i, target) in targets.iter().enumerate() {
                    self.advance(ModerationPhase::Executing { index: i + 1, total: targets.len() });
                    self.send_directive(&Replies::timeout_directive(target, duration, reason)).await;
                }
                self.resolved = targets.len();
            }
            ModAction::Untimeout => {
                for (i, target) in targets.iter().enumerate() {
                    self.advance(ModerationPhase::Executing { index: i + 1, total: targets.len() });
                    self.send_directive(&Replies::untimeout_directive(target)).await;
                }
                self.resolved = targets.len();
            }
            ModAction::Ban { .. } | ModAction::Unban => {
                self.advance(ModerationPhase::ResolvingIds);
                let ids = self.resolve_ids(&targets).await;
                self.resolved = ids.len();

                for (i, id) in ids.iter().enumerate() {
                    self.advance(ModerationPhase::Executing { index: i + 1, total: ids.len() });
                    let session = &self.state.session;
                    let result = match &action {
                        ModAction::Ban { reason } => self.state.api.ban_user(session, id, reason).await,
                        _ => self.state.api.unban_user(session, id).await,
                    };
                    if let Err(e) = result {
                        error!("{:?} failed for user id {}: {}", action, id, e);
                        self.failed += 1;
                    }
                }
            }
        }

        info!("{:?} done: {} requested, {} acted on, {} failed", action, targets.len(), self.resolved, self.failed);
        self.state.chat_client.send_message(self.channel, &action.acknowledgment()).await?;
        self.advance(ModerationPhase::Acknowledged);
        Ok(self.report(targets.len()))
    }

    /// Directives are independent of each other. A failed send is logged and
    /// counted, and the remaining targets still get theirs.
    async fn send_directive(&mut self, directive: &str) {
        if let Err(e) = self.state.chat_client.send_message(self.channel, directive).await {
            error!("Failed to send '{}': {}", directive, e);
            self.failed += 1;
        }
    }

    /// Lookup failures are logged and treated as nothing resolved.
    async fn resolve_ids(&self, targets: &[String]) -> Vec<String> {
        match self.state.api.get_users(&self.state.session.access_token, targets).await {
            Ok(users) => {
                if users.len() < targets.len() {
                    // Acknowledgment stays the same for a partial lookup.
                    warn!("Resolved only {}/{} of {:?}", users.len(), targets.len(), targets);
                }
                users.into_iter().map(|u| u.id).collect()
            }
            Err(e) => {
                error!("User lookup failed for {:?}: {}", targets, e);
                Vec::new()
            }
        }
    }
}
