//! Prompt collaborators
//!
//! The pipeline only sees the [`Prompter`] trait. [`ClackPrompter`] asks on
//! the terminal; [`ScriptedPrompter`] answers from an [`Answers`] record
//! (answers file, `--yes`, tests).

use super::question::{Answer, Question, QuestionId};
use crate::config::{FeatureModule, FeatureSet};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

pub trait Prompter {
    /// Ask one question; an error aborts the pipeline
    fn ask(&mut self, question: &Question) -> Result<Answer>;
}

/// Pre-supplied answers; `None` means "take the question's default"
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Answers {
    #[serde(default)]
    pub preprocessor: Option<bool>,
    #[serde(default)]
    pub ui_framework: Option<bool>,
    #[serde(default)]
    pub preprocessor_framework: Option<bool>,
    #[serde(default)]
    pub modules: Option<Vec<FeatureModule>>,
}

impl Answers {
    pub fn from_yaml_str(content: &str, path: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|source| Error::AnswersParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::AnswersRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content, path)
    }

    fn answer_for(&self, question: &Question) -> Option<Answer> {
        match question.id {
            QuestionId::StylePreprocessor => self.preprocessor.map(Answer::Confirm),
            QuestionId::UiFramework => self.ui_framework.map(Answer::Confirm),
            QuestionId::StylePreprocessorFramework => {
                self.preprocessor_framework.map(Answer::Confirm)
            }
            QuestionId::FeatureModules => self
                .modules
                .as_ref()
                .map(|m| Answer::Modules(m.iter().copied().collect::<FeatureSet>())),
        }
    }
}

/// Answers questions without a terminal
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: Answers,
    asked: Vec<QuestionId>,
}

impl ScriptedPrompter {
    pub fn new(answers: Answers) -> Self {
        Self {
            answers,
            asked: Vec::new(),
        }
    }

    /// Accept every default (`--yes`)
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Questions presented so far, in order
    pub fn asked(&self) -> &[QuestionId] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &Question) -> Result<Answer> {
        self.asked.push(question.id);
        Ok(self
            .answers
            .answer_for(question)
            .unwrap_or_else(|| question.default_answer()))
    }
}

/// Terminal prompts via cliclack
#[cfg(feature = "tui")]
#[derive(Debug, Default)]
pub struct ClackPrompter;

#[cfg(feature = "tui")]
impl Prompter for ClackPrompter {
    fn ask(&mut self, question: &Question) -> Result<Answer> {
        use super::question::QuestionKind;

        match &question.kind {
            QuestionKind::Confirm { default } => cliclack::confirm(question.message)
                .initial_value(*default)
                .interact()
                .map(Answer::Confirm)
                .map_err(Error::Interaction),
            QuestionKind::MultiSelect { choices } => {
                let mut multi = cliclack::multiselect(question.message);
                for choice in choices {
                    multi = multi.item(choice.module, choice.label, "");
                }
                let initial: Vec<FeatureModule> = choices
                    .iter()
                    .filter(|c| c.checked)
                    .map(|c| c.module)
                    .collect();

                let selected: Vec<FeatureModule> = multi
                    .initial_values(initial)
                    .required(false)
                    .interact()
                    .map_err(Error::Interaction)?;

                Ok(Answer::Modules(selected.into_iter().collect()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_file_parses() {
        let answers = Answers::from_yaml_str(
            "preprocessor: true\nui_framework: false\nmodules: [touch, resource]\n",
            Path::new("answers.yaml"),
        )
        .unwrap();
        assert_eq!(answers.preprocessor, Some(true));
        assert_eq!(answers.ui_framework, Some(false));
        assert_eq!(answers.preprocessor_framework, None);
        assert_eq!(
            answers.modules,
            Some(vec![FeatureModule::Touch, FeatureModule::Resource])
        );
    }

    #[test]
    fn test_answers_file_rejects_unknown_module() {
        let err = Answers::from_yaml_str("modules: [router]\n", Path::new("a.yaml")).unwrap_err();
        assert!(matches!(err, Error::AnswersParse { .. }));
    }

    #[test]
    fn test_answers_file_rejects_unknown_key() {
        let err = Answers::from_yaml_str("compass: true\n", Path::new("a.yaml")).unwrap_err();
        assert!(matches!(err, Error::AnswersParse { .. }));
    }

    #[test]
    fn test_missing_answers_file_is_read_error() {
        let err = Answers::from_yaml_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, Error::AnswersRead { .. }));
    }

    #[test]
    fn test_scripted_prompter_falls_back_to_defaults() {
        let mut prompter = ScriptedPrompter::defaults();
        let q = Question::confirm(QuestionId::UiFramework, "?", true);
        assert_eq!(prompter.ask(&q).unwrap(), Answer::Confirm(true));
        assert_eq!(prompter.asked(), &[QuestionId::UiFramework]);
    }
}
