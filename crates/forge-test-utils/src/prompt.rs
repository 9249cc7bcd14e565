//! A scripted, recording double for [`ReconcilerPrompt`]

use forge_graph::{GameFileType, SourceFileType};
use forge_watch::{Decision, DecisionContext, ProposedChange, ReconcilerPrompt, Tree};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One recorded callback invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCall {
    Decide {
        tree: Tree,
        path: String,
        change: ProposedChange,
        decision: Decision,
    },
    AssumeSourceType { path: String },
    AssumeGameType { path: String },
}

/// Shared handle onto the recorded call sequence. Clone it before handing
/// the prompt to a reconciler; calls appear in invocation order.
pub type CallLog = Arc<Mutex<Vec<PromptCall>>>;

/// Prompt double that answers from a script and records every call.
///
/// Scripted decisions are consumed front to back; once the script runs
/// out, the default decision answers. Type assumptions always return the
/// configured fallback types.
pub struct ScriptedPrompt {
    scripted: VecDeque<Decision>,
    default_decision: Decision,
    source_type: SourceFileType,
    game_type: GameFileType,
    calls: CallLog,
}

impl ScriptedPrompt {
    /// A prompt that accepts everything.
    pub fn accepting() -> Self {
        Self::with_default(Decision::Accept)
    }

    /// A prompt that ignores everything.
    pub fn ignoring() -> Self {
        Self::with_default(Decision::Ignore)
    }

    fn with_default(default_decision: Decision) -> Self {
        Self {
            scripted: VecDeque::new(),
            default_decision,
            source_type: SourceFileType::Other,
            game_type: GameFileType::Other,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue an explicit decision for the next `decide` call.
    pub fn then(mut self, decision: Decision) -> Self {
        self.scripted.push_back(decision);
        self
    }

    /// Fallback type returned by `assume_source_type`.
    pub fn assuming_source(mut self, file_type: SourceFileType) -> Self {
        self.source_type = file_type;
        self
    }

    /// Fallback type returned by `assume_game_type`.
    pub fn assuming_game(mut self, file_type: GameFileType) -> Self {
        self.game_type = file_type;
        self
    }

    /// Handle for inspecting recorded calls after the prompt moves into a
    /// reconciler.
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: PromptCall) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }
}

impl ReconcilerPrompt for ScriptedPrompt {
    fn decide(&mut self, context: DecisionContext<'_>) -> Decision {
        let decision = self.scripted.pop_front().unwrap_or(self.default_decision);
        self.record(PromptCall::Decide {
            tree: context.tree,
            path: context.path.to_string(),
            change: context.change,
            decision,
        });
        decision
    }

    fn assume_source_type(&mut self, path: &str) -> SourceFileType {
        self.record(PromptCall::AssumeSourceType {
            path: path.to_string(),
        });
        self.source_type
    }

    fn assume_game_type(&mut self, path: &str) -> GameFileType {
        self.record(PromptCall::AssumeGameType {
            path: path.to_string(),
        });
        self.game_type
    }
}
