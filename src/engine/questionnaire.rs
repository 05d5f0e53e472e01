//! Questionnaire Progression
//!
//! Three ordered stages, each gated by a local completion check:
//! Education -> Interests -> Vision. Going back is always allowed except
//! from the first stage. Only a completed Vision stage produces answers.

use super::catalog::{future_plan_label, is_known_interest};
use super::types::UserAnswers;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Education,
    Interests,
    Vision,
}

impl Stage {
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Education => Some(Stage::Interests),
            Stage::Interests => Some(Stage::Vision),
            Stage::Vision => None,
        }
    }

    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::Education => None,
            Stage::Interests => Some(Stage::Education),
            Stage::Vision => Some(Stage::Interests),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionnaireError {
    #[error("Stage {0:?} is incomplete")]
    StageIncomplete(Stage),

    #[error("Unknown interest '{0}'")]
    UnknownInterest(String),

    #[error("Already at the first stage")]
    AtFirstStage,

    #[error("Already at the last stage")]
    AtLastStage,

    #[error("Answers can only be submitted from the Vision stage (currently at {0:?})")]
    NotAtFinalStage(Stage),
}

/// In-progress questionnaire state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    stage: Stage,
    qualification: String,
    major: String,
    interests: Vec<String>,
    future_plan: String,
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::new()
    }
}

impl Questionnaire {
    pub fn new() -> Self {
        Self {
            stage: Stage::Education,
            qualification: String::new(),
            major: String::new(),
            interests: Vec::new(),
            future_plan: String::new(),
        }
    }

    /// Walk a full answer set through every stage gate.
    ///
    /// Stops at the first incomplete stage, so the error names what is missing.
    pub fn from_answers(answers: &UserAnswers) -> Result<Self, QuestionnaireError> {
        let mut q = Self::new();
        q.set_qualification(&answers.qualification);
        q.set_major(&answers.major);
        q.advance()?;
        for interest in &answers.interests {
            if !q.interests.contains(interest) {
                q.toggle_interest(interest)?;
            }
        }
        q.advance()?;
        q.set_future_plan(&answers.future_plan);
        if !q.can_proceed() {
            return Err(QuestionnaireError::StageIncomplete(Stage::Vision));
        }
        Ok(q)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn set_qualification(&mut self, qualification: &str) {
        self.qualification = qualification.to_string();
    }

    pub fn set_major(&mut self, major: &str) {
        self.major = major.to_string();
    }

    /// Select the interest if absent, deselect it if present.
    /// Only catalog interests can be selected.
    pub fn toggle_interest(&mut self, interest: &str) -> Result<(), QuestionnaireError> {
        if let Some(pos) = self.interests.iter().position(|i| i == interest) {
            self.interests.remove(pos);
        } else if is_known_interest(interest) {
            self.interests.push(interest.to_string());
        } else {
            return Err(QuestionnaireError::UnknownInterest(interest.to_string()));
        }
        Ok(())
    }

    pub fn set_future_plan(&mut self, future_plan: &str) {
        self.future_plan = future_plan.to_string();
    }

    pub fn is_stage_complete(&self, stage: Stage) -> bool {
        match stage {
            Stage::Education => !self.qualification.is_empty() && !self.major.is_empty(),
            Stage::Interests => !self.interests.is_empty(),
            Stage::Vision => future_plan_label(&self.future_plan).is_some(),
        }
    }

    /// Whether the current stage allows moving on
    pub fn can_proceed(&self) -> bool {
        self.is_stage_complete(self.stage)
    }

    pub fn advance(&mut self) -> Result<Stage, QuestionnaireError> {
        if !self.can_proceed() {
            return Err(QuestionnaireError::StageIncomplete(self.stage));
        }
        let next = self.stage.next().ok_or(QuestionnaireError::AtLastStage)?;
        self.stage = next;
        Ok(next)
    }

    pub fn back(&mut self) -> Result<Stage, QuestionnaireError> {
        let previous = self.stage.previous().ok_or(QuestionnaireError::AtFirstStage)?;
        self.stage = previous;
        Ok(previous)
    }

    /// Produce the final answers. Only valid from a completed Vision stage.
    pub fn finish(&self) -> Result<UserAnswers, QuestionnaireError> {
        if self.stage != Stage::Vision {
            return Err(QuestionnaireError::NotAtFinalStage(self.stage));
        }
        if !self.can_proceed() {
            return Err(QuestionnaireError::StageIncomplete(Stage::Vision));
        }
        // A deserialized questionnaire never went through `toggle_interest`
        if let Some(unknown) = self.interests.iter().find(|i| !is_known_interest(i)) {
            return Err(QuestionnaireError::UnknownInterest(unknown.clone()));
        }
        Ok(UserAnswers {
            qualification: self.qualification.clone(),
            major: self.major.clone(),
            interests: self.interests.clone(),
            future_plan: self.future_plan.clone(),
        })
    }
}
