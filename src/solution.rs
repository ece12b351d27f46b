use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::text_utils::strip_code_fence;

pub const FALLBACK_SUBJECT: &str = "Общее";
pub const FALLBACK_TASK: &str = "Задание с фото";
pub const FALLBACK_ANSWER: &str = "См. решение выше";

/// A step-by-step solution returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub subject: String,
    pub task: String,
    pub steps: Vec<String>,
    pub answer: String,
}

impl Solution {
    /// Wrap unstructured model output as a single-step solution.
    pub fn fallback(text: &str) -> Self {
        Self {
            subject: FALLBACK_SUBJECT.to_string(),
            task: FALLBACK_TASK.to_string(),
            steps: vec![text.to_string()],
            answer: FALLBACK_ANSWER.to_string(),
        }
    }

    /// Decode a model reply, repairing code fences and falling back to
    /// [`Solution::fallback`] when the text is not a solution object.
    pub fn from_reply(content: &str) -> Self {
        let cleaned = strip_code_fence(content);
        match serde_json::from_str::<Solution>(cleaned) {
            Ok(solution) => solution,
            Err(err) => {
                debug!(error = %err, "Reply is not a solution object, using fallback");
                Self::fallback(cleaned)
            }
        }
    }
}
