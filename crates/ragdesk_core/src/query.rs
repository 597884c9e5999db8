use crate::{QueryAnswer, RequestFailed, RequestId, Source};

/// Shown in place of an answer when the question could not be answered.
pub const QUERY_FAILURE_MESSAGE: &str =
    "Error: Failed to get a response. Please make sure the API server is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryPhase {
    #[default]
    Idle,
    Asking {
        request_id: RequestId,
    },
    Answered,
}

/// The answer and its sources. Always replaced as one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerSet {
    /// The question as it was submitted.
    pub question: String,
    pub answer: String,
    pub sources: Vec<Source>,
}

impl AnswerSet {
    pub fn has_answer(&self) -> bool {
        !self.answer.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryController {
    question: String,
    phase: QueryPhase,
    result: AnswerSet,
}

impl QueryController {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn phase(&self) -> QueryPhase {
        self.phase
    }

    pub fn result(&self) -> &AnswerSet {
        &self.result
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, QueryPhase::Asking { .. })
    }

    pub fn can_submit(&self) -> bool {
        !self.question.trim().is_empty() && !self.is_loading()
    }

    /// Returns `false` when the text is unchanged.
    pub(crate) fn edit_question(&mut self, text: String) -> bool {
        if self.question == text {
            return false;
        }
        self.question = text;
        true
    }

    /// Enters `Asking`, clearing the previous answer and sources together.
    ///
    /// Returns the trimmed question to send, or `None` when submission is
    /// not enabled.
    pub(crate) fn begin(&mut self, request_id: RequestId) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        let question = self.question.trim().to_string();
        self.result = AnswerSet {
            question: question.clone(),
            ..AnswerSet::default()
        };
        self.phase = QueryPhase::Asking { request_id };
        Some(question)
    }

    /// Applies a settlement. Returns `false` if it does not belong to the
    /// request in flight.
    pub(crate) fn settle(
        &mut self,
        request_id: RequestId,
        result: Result<QueryAnswer, RequestFailed>,
    ) -> bool {
        if self.phase != (QueryPhase::Asking { request_id }) {
            return false;
        }
        let question = std::mem::take(&mut self.result.question);
        match result {
            Ok(QueryAnswer { answer, sources }) => {
                self.result = AnswerSet {
                    question,
                    answer,
                    sources,
                };
                self.phase = QueryPhase::Answered;
            }
            Err(_) => {
                self.result = AnswerSet {
                    question,
                    answer: QUERY_FAILURE_MESSAGE.to_string(),
                    sources: Vec::new(),
                };
                self.phase = QueryPhase::Idle;
            }
        }
        true
    }
}
