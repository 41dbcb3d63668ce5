//! Interaction pipeline
//!
//! Stages run strictly in order. For each question the pipeline evaluates the
//! question's `when` predicate against the configuration collected so far
//! (earlier stages plus the answers already given in the current stage),
//! then asks the prompter. A prompter error aborts the run and no partial
//! configuration is returned.

pub mod prompter;
pub mod question;
pub mod stages;

use crate::config::Configuration;
use crate::error::Result;
use tracing::debug;

pub use prompter::{Answers, Prompter, ScriptedPrompter};
#[cfg(feature = "tui")]
pub use prompter::ClackPrompter;
pub use question::{Answer, Choice, Question, QuestionId, QuestionKind, Responses};
pub use stages::{standard_stages, Stage};

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    pub fn standard() -> Self {
        Self::new(standard_stages())
    }

    /// Run every stage against `initial`, returning the completed configuration
    pub fn run(
        &self,
        initial: Configuration,
        prompter: &mut dyn Prompter,
    ) -> Result<Configuration> {
        let mut config = initial;

        for stage in &self.stages {
            debug!(stage = stage.name(), "running stage");
            let mut responses = Responses::default();

            for question in stage.questions(&config) {
                if let Some(when) = question.when {
                    let collected = stage.apply(config.clone(), &responses);
                    if !when(&collected) {
                        debug!(question = ?question.id, "question suppressed");
                        continue;
                    }
                }

                let answer = prompter.ask(&question)?;
                responses.record(question.id, answer);
            }

            config = stage.apply(config, &responses);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeatureModule, FeatureSet};
    use crate::error::Error;

    fn initial() -> Configuration {
        Configuration::new("demo", "Demo", "App", "app")
    }

    fn run_with(answers: Answers) -> (Configuration, Vec<QuestionId>) {
        let mut prompter = ScriptedPrompter::new(answers);
        let config = Pipeline::standard().run(initial(), &mut prompter).unwrap();
        (config, prompter.asked().to_vec())
    }

    #[test]
    fn test_defaults_enable_everything() {
        let (config, asked) = run_with(Answers::default());
        assert!(config.use_style_preprocessor());
        assert!(config.include_ui_framework());
        assert!(config.use_style_preprocessor_framework());
        assert_eq!(config.feature_modules(), &FeatureSet::all());
        assert_eq!(asked.len(), 4);
    }

    #[test]
    fn test_framework_question_requires_preprocessor_and_ui() {
        for preprocessor in [false, true] {
            for ui_framework in [false, true] {
                let (config, asked) = run_with(Answers {
                    preprocessor: Some(preprocessor),
                    ui_framework: Some(ui_framework),
                    preprocessor_framework: Some(true),
                    modules: Some(vec![]),
                });

                let was_asked = asked.contains(&QuestionId::StylePreprocessorFramework);
                assert_eq!(was_asked, preprocessor && ui_framework);
                assert_eq!(
                    config.use_style_preprocessor_framework(),
                    preprocessor && ui_framework
                );
            }
        }
    }

    #[test]
    fn test_questions_asked_in_stage_order() {
        let (_, asked) = run_with(Answers::default());
        assert_eq!(
            asked,
            vec![
                QuestionId::StylePreprocessor,
                QuestionId::UiFramework,
                QuestionId::StylePreprocessorFramework,
                QuestionId::FeatureModules,
            ]
        );
    }

    #[test]
    fn test_module_selection_recorded() {
        let (config, _) = run_with(Answers {
            modules: Some(vec![FeatureModule::Route, FeatureModule::Sanitize]),
            ..Default::default()
        });
        let modules: Vec<_> = config.feature_modules().iter().collect();
        assert_eq!(modules, vec![FeatureModule::Sanitize, FeatureModule::Route]);
    }

    struct FailingPrompter {
        calls: usize,
    }

    impl Prompter for FailingPrompter {
        fn ask(&mut self, _question: &Question) -> Result<Answer> {
            self.calls += 1;
            Err(Error::Interaction(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "not a terminal",
            )))
        }
    }

    #[test]
    fn test_prompt_failure_aborts_pipeline() {
        let mut prompter = FailingPrompter { calls: 0 };
        let result = Pipeline::standard().run(initial(), &mut prompter);
        assert!(matches!(result, Err(Error::Interaction(_))));
        assert_eq!(prompter.calls, 1);
    }
}
