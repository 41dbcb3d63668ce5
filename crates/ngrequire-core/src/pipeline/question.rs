//! Questions asked by the interaction stages and the answers they produce

use crate::config::{Configuration, FeatureModule, FeatureSet};

/// Stable identifier for each question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionId {
    StylePreprocessor,
    UiFramework,
    StylePreprocessorFramework,
    FeatureModules,
}

/// One entry of a multi-select question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub module: FeatureModule,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Confirm { default: bool },
    MultiSelect { choices: Vec<Choice> },
}

/// Predicate deciding whether a question is presented
pub type When = fn(&Configuration) -> bool;

#[derive(Debug, Clone)]
pub struct Question {
    pub id: QuestionId,
    pub message: &'static str,
    pub kind: QuestionKind,
    /// Evaluated against the configuration collected so far, including the
    /// answers already given in the same stage
    pub when: Option<When>,
}

impl Question {
    pub fn confirm(id: QuestionId, message: &'static str, default: bool) -> Self {
        Self {
            id,
            message,
            kind: QuestionKind::Confirm { default },
            when: None,
        }
    }

    pub fn multi_select(id: QuestionId, message: &'static str, choices: Vec<Choice>) -> Self {
        Self {
            id,
            message,
            kind: QuestionKind::MultiSelect { choices },
            when: None,
        }
    }

    pub fn when(mut self, predicate: When) -> Self {
        self.when = Some(predicate);
        self
    }

    /// The answer given when the user accepts every default
    pub fn default_answer(&self) -> Answer {
        match &self.kind {
            QuestionKind::Confirm { default } => Answer::Confirm(*default),
            QuestionKind::MultiSelect { choices } => Answer::Modules(
                choices
                    .iter()
                    .filter(|c| c.checked)
                    .map(|c| c.module)
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Confirm(bool),
    Modules(FeatureSet),
}

/// Answers collected within a single stage
#[derive(Debug, Clone, Default)]
pub struct Responses(Vec<(QuestionId, Answer)>);

impl Responses {
    pub fn record(&mut self, id: QuestionId, answer: Answer) {
        self.0.push((id, answer));
    }

    fn get(&self, id: QuestionId) -> Option<&Answer> {
        self.0.iter().find(|(q, _)| *q == id).map(|(_, a)| a)
    }

    /// Confirm answer for `id`; unanswered or skipped questions read as `false`
    pub fn confirmed(&self, id: QuestionId) -> bool {
        matches!(self.get(id), Some(Answer::Confirm(true)))
    }

    /// Module answer for `id`; unanswered reads as the empty set
    pub fn modules(&self, id: QuestionId) -> FeatureSet {
        match self.get(id) {
            Some(Answer::Modules(set)) => set.clone(),
            _ => FeatureSet::empty(),
        }
    }
}
