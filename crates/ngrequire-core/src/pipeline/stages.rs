//! The question stages, in the order they run

use super::question::{Choice, Question, QuestionId, Responses};
use crate::config::{Configuration, FeatureModule};

/// One step of the interaction pipeline
///
/// `questions` may only read fields recorded by earlier stages; `apply`
/// records this stage's fields and nothing else.
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    fn questions(&self, config: &Configuration) -> Vec<Question>;

    fn apply(&self, config: Configuration, responses: &Responses) -> Configuration;
}

pub struct StylePreprocessorStage;

impl Stage for StylePreprocessorStage {
    fn name(&self) -> &'static str {
        "style-preprocessor"
    }

    fn questions(&self, _config: &Configuration) -> Vec<Question> {
        vec![Question::confirm(
            QuestionId::StylePreprocessor,
            "Would you like to use Sass (with Compass)?",
            true,
        )]
    }

    fn apply(&self, mut config: Configuration, responses: &Responses) -> Configuration {
        config.record_style_preprocessor(responses.confirmed(QuestionId::StylePreprocessor));
        config
    }
}

pub struct UiFrameworkStage;

impl Stage for UiFrameworkStage {
    fn name(&self) -> &'static str {
        "ui-framework"
    }

    fn questions(&self, _config: &Configuration) -> Vec<Question> {
        vec![
            Question::confirm(
                QuestionId::UiFramework,
                "Would you like to include Bootstrap?",
                true,
            ),
            Question::confirm(
                QuestionId::StylePreprocessorFramework,
                "Would you like to use the Sass version of Bootstrap?",
                true,
            )
            .when(|c| c.use_style_preprocessor() && c.include_ui_framework()),
        ]
    }

    fn apply(&self, mut config: Configuration, responses: &Responses) -> Configuration {
        config.record_ui_framework(responses.confirmed(QuestionId::UiFramework));
        config.record_style_preprocessor_framework(
            responses.confirmed(QuestionId::StylePreprocessorFramework),
        );
        config
    }
}

pub struct FeatureModulesStage;

impl Stage for FeatureModulesStage {
    fn name(&self) -> &'static str {
        "feature-modules"
    }

    fn questions(&self, _config: &Configuration) -> Vec<Question> {
        let choices = FeatureModule::ALL
            .into_iter()
            .map(|module| Choice {
                module,
                label: module.artifacts().label,
                checked: true,
            })
            .collect();
        vec![Question::multi_select(
            QuestionId::FeatureModules,
            "Which modules would you like to include?",
            choices,
        )]
    }

    fn apply(&self, mut config: Configuration, responses: &Responses) -> Configuration {
        config.record_feature_modules(responses.modules(QuestionId::FeatureModules));
        config
    }
}

/// The standard stage sequence
pub fn standard_stages() -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(StylePreprocessorStage),
        Box::new(UiFrameworkStage),
        Box::new(FeatureModulesStage),
    ]
}
