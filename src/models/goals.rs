//! Goal, daily progress, and trial models.
//!
//! A goal is a free-text behavioral objective for a client. Progress toward
//! goals is recorded once per client per day as a DailyProgress row, which
//! owns the discrete scored trials observed during that session.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A behavioral goal for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Row id.
    pub id: i64,
    /// The client this goal belongs to.
    pub client_id: i64,
    /// What the goal is.
    pub description: String,
    /// Activities used to work toward the goal.
    pub activities: String,
    /// Expected outcome.
    pub outcome: String,
    /// Whether the goal is currently being worked on.
    pub is_active: bool,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Scored percentage bucket for a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PercentageBucket {
    /// 0% success.
    #[serde(rename = "0%")]
    Zero,
    /// 25% success.
    #[serde(rename = "25%")]
    TwentyFive,
    /// 50% success.
    #[serde(rename = "50%")]
    Fifty,
    /// 75% success.
    #[serde(rename = "75%")]
    SeventyFive,
    /// 100% success.
    #[serde(rename = "100%")]
    Hundred,
}

impl PercentageBucket {
    /// Returns the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PercentageBucket::Zero => "0%",
            PercentageBucket::TwentyFive => "25%",
            PercentageBucket::Fifty => "50%",
            PercentageBucket::SeventyFive => "75%",
            PercentageBucket::Hundred => "100%",
        }
    }

    /// Parses the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "0%" => Some(PercentageBucket::Zero),
            "25%" => Some(PercentageBucket::TwentyFive),
            "50%" => Some(PercentageBucket::Fifty),
            "75%" => Some(PercentageBucket::SeventyFive),
            "100%" => Some(PercentageBucket::Hundred),
            _ => None,
        }
    }
}

/// Prompt-type code recorded against a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptType {
    /// Barriers prevented the trial.
    Barriers,
    /// HH - hand over hand.
    #[serde(rename = "HH")]
    HandOverHand,
    /// I - independent.
    #[serde(rename = "I")]
    Independent,
    /// M - modelling.
    #[serde(rename = "M")]
    Modelling,
    /// P - physical prompt.
    #[serde(rename = "P")]
    PhysicalPrompt,
    /// R - refused.
    #[serde(rename = "R")]
    Refused,
    /// S - visual (sight) prompt.
    #[serde(rename = "S")]
    VisualPrompt,
    /// G - gesture prompt.
    #[serde(rename = "G")]
    GesturePrompt,
    /// VP - verbal prompt.
    #[serde(rename = "VP")]
    VerbalPrompt,
}

impl PromptType {
    /// Returns the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptType::Barriers => "Barriers",
            PromptType::HandOverHand => "HH",
            PromptType::Independent => "I",
            PromptType::Modelling => "M",
            PromptType::PhysicalPrompt => "P",
            PromptType::Refused => "R",
            PromptType::VisualPrompt => "S",
            PromptType::GesturePrompt => "G",
            PromptType::VerbalPrompt => "VP",
        }
    }

    /// Parses the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Barriers" => Some(PromptType::Barriers),
            "HH" => Some(PromptType::HandOverHand),
            "I" => Some(PromptType::Independent),
            "M" => Some(PromptType::Modelling),
            "P" => Some(PromptType::PhysicalPrompt),
            "R" => Some(PromptType::Refused),
            "S" => Some(PromptType::VisualPrompt),
            "G" => Some(PromptType::GesturePrompt),
            "VP" => Some(PromptType::VerbalPrompt),
            _ => None,
        }
    }
}

/// One scored observation within a daily progress session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    /// Row id.
    pub id: i64,
    /// The daily progress session this trial belongs to.
    pub daily_progress_id: i64,
    /// Ordinal within the session, unique per session.
    pub trial_number: u32,
    /// Scored percentage bucket.
    pub percentage: PercentageBucket,
    /// Prompt type observed, if any.
    pub prompt: Option<PromptType>,
    /// Initials of the recording provider.
    pub initials: String,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// A per-client daily progress note, unique per (client, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    /// Row id.
    pub id: i64,
    /// The client this session belongs to.
    pub client_id: i64,
    /// Session date.
    pub date: NaiveDate,
    /// Where the session took place.
    pub location: String,
    /// Free-text session notes.
    pub general_notes: String,
    /// Initials of the provider who ran the session.
    pub provider_initials: String,
    /// The user who recorded the session, if still present.
    pub created_by: Option<i64>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// Trials observed during the session.
    #[serde(default)]
    pub trials: Vec<Trial>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_round_trip() {
        for bucket in [
            PercentageBucket::Zero,
            PercentageBucket::TwentyFive,
            PercentageBucket::Fifty,
            PercentageBucket::SeventyFive,
            PercentageBucket::Hundred,
        ] {
            assert_eq!(PercentageBucket::parse(bucket.as_str()), Some(bucket));
        }
        assert_eq!(PercentageBucket::parse("10%"), None);
    }

    #[test]
    fn test_prompt_round_trip() {
        for prompt in [
            PromptType::Barriers,
            PromptType::HandOverHand,
            PromptType::Independent,
            PromptType::Modelling,
            PromptType::PhysicalPrompt,
            PromptType::Refused,
            PromptType::VisualPrompt,
            PromptType::GesturePrompt,
            PromptType::VerbalPrompt,
        ] {
            assert_eq!(PromptType::parse(prompt.as_str()), Some(prompt));
        }
    }

    #[test]
    fn test_percentage_serializes_with_sign() {
        assert_eq!(
            serde_json::to_string(&PercentageBucket::SeventyFive).unwrap(),
            "\"75%\""
        );
    }

    #[test]
    fn test_prompt_serializes_as_code() {
        assert_eq!(
            serde_json::to_string(&PromptType::VerbalPrompt).unwrap(),
            "\"VP\""
        );
        assert_eq!(
            serde_json::to_string(&PromptType::Barriers).unwrap(),
            "\"Barriers\""
        );
    }

    #[test]
    fn test_daily_progress_trials_default_empty() {
        let json = r#"{
            "id": 1,
            "client_id": 4,
            "date": "2026-01-15",
            "location": "Guadalupe DTA",
            "general_notes": "",
            "provider_initials": "DR",
            "created_by": 2,
            "created_at": "2026-01-15T17:00:00Z"
        }"#;

        let progress: DailyProgress = serde_json::from_str(json).unwrap();
        assert!(progress.trials.is_empty());
    }
}
