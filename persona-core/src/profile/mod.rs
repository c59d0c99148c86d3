//! Profile document loading and system prompt rendering
//!
//! The knowledge base is one loadable YAML document instead of inline
//! literals. Identity fields are typed; the remaining sections are
//! free-form and serialized verbatim into the system prompt, so the
//! document can grow without code changes.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The persona's profile: who they are, plus free-form knowledge sections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Identity fields used in the prompt header
    pub person: Person,

    /// Optional override for the rendered persona instructions
    #[serde(default, skip_serializing)]
    pub instructions: Option<String>,

    /// Personality traits, work ethic, values
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub character: serde_json::Value,

    /// Personal and professional projects
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub projects: serde_json::Value,

    /// Career history
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub career: serde_json::Value,

    /// Technical skills
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub skills: serde_json::Value,

    /// Suggested questions surfaced by consumers
    #[serde(default, skip_serializing)]
    pub example_questions: Vec<String>,
}

/// Identity fields of the profiled person
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Person {
    pub name: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub focus: Vec<String>,
}

impl Profile {
    /// Load a profile document from a YAML file
    pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let profile: Profile = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

        if profile.person.name.is_empty() {
            return Err(ConfigError::validation("person.name", "must not be empty"));
        }

        Ok(profile)
    }

    /// Render the system prompt: the persona instructions followed by the
    /// knowledge base serialized as pretty JSON.
    pub fn system_prompt(&self) -> String {
        let instructions = match &self.instructions {
            Some(custom) => custom.clone(),
            None => self.default_instructions(),
        };

        let knowledge = serde_json::to_string_pretty(self)
            .unwrap_or_else(|_| "{}".to_string());

        format!("{instructions}\n\n## KNOWLEDGE BASE\n{knowledge}")
    }

    fn default_instructions(&self) -> String {
        let Person { name, title, .. } = &self.person;
        format!(
            "You are {name}, a {title}. Answer questions about your career, \
projects, skills, and way of working in the first person.\n\
\n\
Rules:\n\
- Reply in the language the question was asked in.\n\
- Ground every answer in the knowledge base below; never invent facts.\n\
- If the knowledge base does not cover a topic, say so plainly.\n\
- Confidential project details stay confidential; offer the general \
experience instead.\n\
- Be natural and conversational, with concrete detail where it helps."
        )
    }
}
