//! Core data model types for geoprep.
//!
//! These are the flat records the rest of the system passes around: modes,
//! users, chat messages, evaluation results and log entries. None of them
//! carry invariants beyond their shape.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

/// A fixed conversation persona or screen the user can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppMode {
    #[serde(rename = "MODE_A")]
    SyllabusDecoder,
    #[serde(rename = "MODE_B")]
    InterviewSimulator,
    #[serde(rename = "MODE_C")]
    HaryanaContextualizer,
    #[serde(rename = "MODE_D")]
    EvaluationLab,
    #[serde(rename = "MODE_ADMIN")]
    AdminDashboard,
}

impl AppMode {
    /// The modes a student can pick, in menu order.
    pub const STUDENT_MODES: [AppMode; 4] = [
        AppMode::SyllabusDecoder,
        AppMode::InterviewSimulator,
        AppMode::HaryanaContextualizer,
        AppMode::EvaluationLab,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            AppMode::SyllabusDecoder => "MODE_A",
            AppMode::InterviewSimulator => "MODE_B",
            AppMode::HaryanaContextualizer => "MODE_C",
            AppMode::EvaluationLab => "MODE_D",
            AppMode::AdminDashboard => "MODE_ADMIN",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppMode::SyllabusDecoder => "Syllabus Decoder",
            AppMode::InterviewSimulator => "Interview Simulator",
            AppMode::HaryanaContextualizer => "Haryana Context",
            AppMode::EvaluationLab => "Evaluation Lab",
            AppMode::AdminDashboard => "Admin Dashboard",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AppMode::SyllabusDecoder => "Deep academic explanation",
            AppMode::InterviewSimulator => "Mock panel simulation",
            AppMode::HaryanaContextualizer => "Link global to local",
            AppMode::EvaluationLab => "AI Score Card & Grading",
            AppMode::AdminDashboard => "Cohort analytics",
        }
    }

    /// Whether this mode is a free-form chat with the mentor.
    pub fn is_chat(&self) -> bool {
        matches!(
            self,
            AppMode::SyllabusDecoder | AppMode::InterviewSimulator | AppMode::HaryanaContextualizer
        )
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for AppMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mode_a" | "a" | "syllabus" | "syllabus-decoder" => Ok(AppMode::SyllabusDecoder),
            "mode_b" | "b" | "interview" | "interview-simulator" => {
                Ok(AppMode::InterviewSimulator)
            }
            "mode_c" | "c" | "haryana" | "haryana-context" | "haryana-contextualizer" => {
                Ok(AppMode::HaryanaContextualizer)
            }
            "mode_d" | "d" | "lab" | "evaluation-lab" => Ok(AppMode::EvaluationLab),
            "mode_admin" | "admin" | "dashboard" => Ok(AppMode::AdminDashboard),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Student,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Student => write!(f, "Student"),
            UserRole::Admin => write!(f, "Admin"),
        }
    }
}

/// Self-declared preparation background. Only changes prompt tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProfileType {
    #[serde(rename = "Fresher")]
    Fresher,
    #[serde(rename = "Working Professional")]
    WorkingProfessional,
    #[serde(rename = "UPSC Aspirant")]
    UpscAspirant,
    #[default]
    #[serde(rename = "General")]
    General,
}

impl ProfileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Fresher => "Fresher",
            ProfileType::WorkingProfessional => "Working Professional",
            ProfileType::UpscAspirant => "UPSC Aspirant",
            ProfileType::General => "General",
        }
    }

    /// One-line promise shown when a user picks this profile at signup.
    pub fn tagline(&self) -> &'static str {
        match self {
            ProfileType::Fresher => "We will start from basics.",
            ProfileType::WorkingProfessional => "We will focus on high-yield topics.",
            ProfileType::UpscAspirant => "We will leverage your General Studies knowledge.",
            ProfileType::General => "Balanced coverage of the syllabus.",
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "fresher" => Ok(ProfileType::Fresher),
            "working-professional" | "professional" => Ok(ProfileType::WorkingProfessional),
            "upsc-aspirant" | "upsc" => Ok(ProfileType::UpscAspirant),
            "general" => Ok(ProfileType::General),
            other => Err(format!("unknown profile: {other}")),
        }
    }
}

/// The identity of whoever is currently logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub role: UserRole,
    pub profile_type: ProfileType,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// A credential record as persisted in the user directory.
///
/// The password is stored in plain text. This is a practice tool, not a
/// security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub password: String,
    pub profile: ProfileType,
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
}

/// One turn of an in-memory conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::now(MessageRole::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::now(MessageRole::Model, text)
    }

    fn now(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// The kind of performance being graded; selects the scoring framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationModule {
    InterviewSimulation,
    TeachingDemo,
    ResearchDefense,
}

impl EvaluationModule {
    pub const ALL: [EvaluationModule; 3] = [
        EvaluationModule::InterviewSimulation,
        EvaluationModule::TeachingDemo,
        EvaluationModule::ResearchDefense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationModule::InterviewSimulation => "INTERVIEW_SIMULATION",
            EvaluationModule::TeachingDemo => "TEACHING_DEMO",
            EvaluationModule::ResearchDefense => "RESEARCH_DEFENSE",
        }
    }

    /// Labels for `dimension_1..3` under this module's framework.
    pub fn dimension_labels(&self) -> [&'static str; 3] {
        match self {
            EvaluationModule::InterviewSimulation => ["Content", "Context", "Communication"],
            EvaluationModule::TeachingDemo => ["Pedagogy", "Engagement", "Complexity"],
            EvaluationModule::ResearchDefense => ["Methodology", "Relevance", "Feasibility"],
        }
    }

    pub fn framework(&self) -> &'static str {
        match self {
            EvaluationModule::InterviewSimulation => "The 3-C Model",
            EvaluationModule::TeachingDemo => "TPACK + Bloom's Taxonomy",
            EvaluationModule::ResearchDefense => "The Grant Reviewer Standard",
        }
    }
}

impl fmt::Display for EvaluationModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationModule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "interview_simulation" | "interview" => Ok(EvaluationModule::InterviewSimulation),
            "teaching_demo" | "teaching" => Ok(EvaluationModule::TeachingDemo),
            "research_defense" | "research" => Ok(EvaluationModule::ResearchDefense),
            other => Err(format!("unknown evaluation module: {other}")),
        }
    }
}

/// Declares a categorical tag produced by the language model.
///
/// Known values map to variants; anything else is kept verbatim in `Other`
/// so a slightly off-script reply never fails to parse.
macro_rules! model_tag {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $text,)+
                    $name::Other(s) => s.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.trim() {
                    $($text => $name::$variant,)+
                    _ => $name::Other(s),
                }
            }
        }

        impl From<$name> for String {
            fn from(tag: $name) -> Self {
                tag.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

model_tag! {
    /// How the candidate appears to be preparing.
    CandidateArchetype {
        RoteLearner => "Rote Learner",
        Generalist => "Generalist",
        Academic => "Academic",
        HpscReady => "HPSC Ready",
    }
}

model_tag! {
    /// Where the answer fell short.
    ErrorCategory {
        ConceptualGap => "Conceptual Gap",
        ContextualBlindness => "Contextual Blindness",
        PedagogicalFailure => "Pedagogical Failure",
        None => "None",
    }
}

model_tag! {
    /// Bloom's taxonomy level demonstrated by the answer.
    CognitiveLevel {
        Recall => "Recall",
        Application => "Application",
        Analysis => "Analysis",
        Synthesis => "Synthesis",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameworkScores {
    #[serde(default)]
    pub dimension_1: f64,
    #[serde(default)]
    pub dimension_2: f64,
    #[serde(default)]
    pub dimension_3: f64,
}

impl FrameworkScores {
    pub fn as_array(&self) -> [f64; 3] {
        [self.dimension_1, self.dimension_2, self.dimension_3]
    }
}

/// The part of an evaluation shown to the candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserFeedback {
    #[serde(default)]
    pub score_total: f64,
    #[serde(default)]
    pub framework_scores: FrameworkScores,
    #[serde(default)]
    pub constructive_comment: String,
}

/// The part of an evaluation consumed by the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminAnalytics {
    #[serde(default)]
    pub module_used: String,
    #[serde(default)]
    pub candidate_archetype: Option<CandidateArchetype>,
    #[serde(default)]
    pub error_category: Option<ErrorCategory>,
    #[serde(default)]
    pub cognitive_level: Option<CognitiveLevel>,
}

/// Structured grading returned by the language model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(default)]
    pub user_feedback: UserFeedback,
    #[serde(default)]
    pub admin_analytics: AdminAnalytics,
}

// ---------------------------------------------------------------------------
// Evaluation log
// ---------------------------------------------------------------------------

/// A persisted evaluation, as stored in the log book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub student: String,
    pub topic: String,
    pub question: String,
    pub module: EvaluationModule,
    #[serde(default)]
    pub result: EvaluationResult,
}

impl LogEntry {
    pub fn score(&self) -> f64 {
        self.result.user_feedback.score_total
    }

    /// The module the grader reported, falling back to the one requested.
    pub fn module_label(&self) -> String {
        let reported = self.result.admin_analytics.module_used.trim();
        if reported.is_empty() {
            self.module.to_string()
        } else {
            reported.to_string()
        }
    }
}

/// A log entry before the log book has assigned its id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLogEntry {
    pub student: String,
    pub topic: String,
    pub question: String,
    pub module: EvaluationModule,
    pub result: EvaluationResult,
}
