use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use quiz_core::model::{
    CertificationTrack, Explanation, OptionKey, OptionRationale, Question, QuestionNumber,
    QuestionOption, TermEntry, UserId,
};

use crate::source::{QuestionSource, SourceError};

/// Question source backed by the quiz HTTP API.
///
/// Questions are fetched with
/// `GET {base_url}/aws/question/{user}/{track}/{number}`. Auth headers and
/// endpoint selection are the caller's concern; the engine only consumes the
/// payload.
#[derive(Clone)]
pub struct HttpQuestionSource {
    client: Client,
    base_url: Url,
}

impl HttpQuestionSource {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Use a preconfigured client (timeouts, proxies) instead of the default.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn question_url(
        &self,
        user: &UserId,
        track: &CertificationTrack,
        number: QuestionNumber,
    ) -> String {
        format!(
            "{}/aws/question/{}/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            user,
            track,
            number
        )
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn question(
        &self,
        user: &UserId,
        track: &CertificationTrack,
        number: QuestionNumber,
    ) -> Result<Question, SourceError> {
        let url = self.question_url(user, track, number);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let body: QuestionDto = response
            .json()
            .await
            .map_err(|err| SourceError::Decode(err.to_string()))?;
        body.into_question(number)
    }
}

//
// ─── WIRE FORMAT ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct QuestionDto {
    success: bool,
    #[serde(default)]
    question_number: u32,
    #[serde(default)]
    question: String,
    #[serde(default)]
    options: BTreeMap<String, String>,
    #[serde(default)]
    answer: Vec<String>,
    #[serde(default)]
    explanation: Option<ExplanationDto>,
}

#[derive(Debug, Deserialize)]
struct ExplanationDto {
    #[serde(rename = "keyPointToTest", default)]
    key_point_to_test: Vec<String>,
    // Each terminology entry is a single-pair object: {concept: explanation}.
    #[serde(default)]
    terminology: Vec<BTreeMap<String, String>>,
    #[serde(default)]
    options: BTreeMap<String, OptionVerdictDto>,
}

#[derive(Debug, Deserialize)]
struct OptionVerdictDto {
    #[serde(default)]
    correct: String,
    #[serde(default)]
    reason: String,
}

impl QuestionDto {
    fn into_question(self, requested: QuestionNumber) -> Result<Question, SourceError> {
        if !self.success {
            return Err(SourceError::Unavailable(requested));
        }

        // Option keys are short letter labels, so map order is presentation
        // order.
        let options = self
            .options
            .into_iter()
            .map(|(key, text)| QuestionOption::new(OptionKey::new(key), text))
            .collect();
        let correct = self.answer.into_iter().map(OptionKey::new);
        let explanation = self
            .explanation
            .map(ExplanationDto::into_explanation)
            .filter(|explanation| !explanation.is_empty());

        Ok(Question::new(
            QuestionNumber::new(self.question_number),
            self.question,
            options,
            correct,
            explanation,
        )?)
    }
}

impl ExplanationDto {
    fn into_explanation(self) -> Explanation {
        let terminology = self
            .terminology
            .into_iter()
            .filter_map(|entry| entry.into_iter().next())
            .map(|(concept, explanation)| TermEntry {
                concept,
                explanation,
            })
            .collect();
        let option_rationale = self
            .options
            .into_iter()
            .map(|(key, verdict)| {
                (
                    OptionKey::new(key),
                    OptionRationale {
                        is_correct: verdict.correct == "yes",
                        reason: verdict.reason,
                    },
                )
            })
            .collect();

        Explanation {
            key_points: self.key_point_to_test,
            terminology,
            option_rationale,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
