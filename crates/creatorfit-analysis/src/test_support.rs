use std::sync::Mutex;

use creatorfit_judge::{CompletionRequest, Judge, JudgeError};

/// In-memory judge that answers from a closure and records every request.
pub(crate) struct ScriptedJudge<F> {
    reply: F,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl<F> ScriptedJudge<F>
where
    F: Fn(&CompletionRequest) -> Result<String, JudgeError> + Send + Sync,
{
    pub(crate) fn new(reply: F) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl<F> Judge for ScriptedJudge<F>
where
    F: Fn(&CompletionRequest) -> Result<String, JudgeError> + Send + Sync,
{
    async fn complete(&self, request: CompletionRequest) -> Result<String, JudgeError> {
        let reply = (self.reply)(&request);
        self.calls.lock().unwrap().push(request);
        reply
    }
}
