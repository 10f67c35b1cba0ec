//! Plant matching
//!
//! Rules are evaluated in priority order and the first one that applies
//! wins:
//!
//! 1. A shady space or a visitor who is rarely home gets the hardiest
//!    low-light plant the catalog carries (snake plant, then sansevieria).
//! 2. Candidates are plants whose care level matches, or whose light needs
//!    match or are `mixed`. If none qualify, care level alone decides. If
//!    that is empty too, the catalog default is returned.
//! 3. Personality preferences pick a specific candidate when present.
//! 4. Otherwise the first candidate in catalog order wins.
//!
//! Hard environment constraints always dominate personality preferences.

use std::sync::LazyLock;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, Plant, ids};
use crate::quiz::{
    AnswerSet, HomeFrequency, Lifestyle, LightNeeds, QuestionKind, QuizAnswers, Reminder,
};

/// Low-light plants for the override rule, in preference order
const LOW_LIGHT_PLANTS: [&str; 2] = [ids::SNAKE_PLANT, ids::SANSEVIERIA];

static STANDARD_MATCHER: LazyLock<Matcher> = LazyLock::new(Matcher::default);

/// Which rule produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "question")]
pub enum MatchReason {
    /// Shady space or rarely home
    LowLightOverride,
    /// A personality preference picked the plant
    Preference(QuestionKind),
    /// First candidate in catalog order
    FirstCandidate,
    /// No candidate qualified; catalog default
    NoCandidates,
    /// The answers were incomplete or unrecognized; catalog default
    IncompleteAnswers,
}

/// A matched plant and the rule that chose it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub plant: &'a Plant,
    pub reason: MatchReason,
}

/// Matches quiz answers to a plant from a catalog
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    catalog: Catalog,
}

impl Matcher {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Return the plant for a set of raw answers
    ///
    /// Never fails: incomplete or unrecognized answers yield the catalog
    /// default.
    pub fn compute_match(&self, answers: &QuizAnswers) -> &Plant {
        self.explain(answers).plant
    }

    /// Like [`compute_match`](Self::compute_match), also reporting the rule
    pub fn explain(&self, answers: &QuizAnswers) -> Match<'_> {
        match answers.parse() {
            Ok(set) => self.match_answers(&set),
            Err(e) => {
                debug!(error = %e, "answers not usable, falling back to default plant");
                Match {
                    plant: self.catalog.default_plant(),
                    reason: MatchReason::IncompleteAnswers,
                }
            }
        }
    }

    /// Apply the matching rules to a complete answer set
    pub fn match_answers(&self, answers: &AnswerSet) -> Match<'_> {
        if answers.space_light == LightNeeds::Shady
            || answers.home_frequency == HomeFrequency::Rarely
        {
            if let Some(plant) = LOW_LIGHT_PLANTS.iter().find_map(|id| self.catalog.get(id)) {
                return self.found(plant, MatchReason::LowLightOverride);
            }
        }

        let mut candidates: Vec<&Plant> = self
            .catalog
            .iter()
            .filter(|plant| {
                plant.care_level == answers.care_level
                    || plant.light_needs == answers.space_light
                    || plant.light_needs == LightNeeds::Mixed
            })
            .collect();

        if candidates.is_empty() {
            candidates = self
                .catalog
                .iter()
                .filter(|plant| plant.care_level == answers.care_level)
                .collect();
        }

        let Some(&first) = candidates.first() else {
            return self.found(self.catalog.default_plant(), MatchReason::NoCandidates);
        };

        let preferences = [
            (answers.reminder == Reminder::SlowDown, ids::SNAKE_PLANT, QuestionKind::Reminder),
            (answers.reminder == Reminder::Responsibility, ids::SANSEVIERIA, QuestionKind::Reminder),
            (answers.reminder == Reminder::Gratitude, ids::SPIDER_PLANT, QuestionKind::Reminder),
            (answers.lifestyle == Lifestyle::Busy, ids::AGLAONEMA, QuestionKind::Lifestyle),
            (answers.lifestyle == Lifestyle::Adventurous, ids::SYNGONIUM, QuestionKind::Lifestyle),
        ];

        for (applies, id, question) in preferences {
            if !applies {
                continue;
            }
            if let Some(&plant) = candidates.iter().find(|plant| plant.id == id) {
                return self.found(plant, MatchReason::Preference(question));
            }
        }

        self.found(first, MatchReason::FirstCandidate)
    }

    fn found<'a>(&'a self, plant: &'a Plant, reason: MatchReason) -> Match<'a> {
        debug!(plant = %plant.id, ?reason, "matched plant");
        Match { plant, reason }
    }
}

/// Match answers against the standard catalog
///
/// The standard matcher is built once and shared across calls.
pub fn compute_match(answers: &QuizAnswers) -> &'static Plant {
    STANDARD_MATCHER.compute_match(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::CareLevel;

    fn answers(values: [&str; 5]) -> QuizAnswers {
        QuizAnswers::from_ordered(values)
    }

    fn catalog_of(plant_ids: &[&str]) -> Catalog {
        let standard = Catalog::standard();
        Catalog::new(
            plant_ids
                .iter()
                .map(|id| standard.get(id).unwrap().clone())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn every_answer_combination_matches_a_catalog_plant() {
        let matcher = Matcher::default();
        for set in AnswerSet::all() {
            let found = matcher.match_answers(&set);
            assert!(matcher.catalog().contains(&found.plant.id), "{:?}", set);
        }
    }

    #[test]
    fn matching_is_deterministic() {
        let matcher = Matcher::default();
        for set in AnswerSet::all() {
            let raw = QuizAnswers::from(set);
            assert_eq!(matcher.compute_match(&raw), matcher.compute_match(&raw));
        }
    }

    #[test]
    fn shady_space_overrides_other_answers() {
        let matcher = Matcher::default();
        let found = matcher.explain(&answers(["busy", "daily", "love-it", "shady", "gratitude"]));
        assert_eq!(found.plant.id, ids::SNAKE_PLANT);
        assert_eq!(found.reason, MatchReason::LowLightOverride);
    }

    #[test]
    fn rarely_home_overrides_other_answers() {
        let plant = compute_match(&answers(["adventurous", "rarely", "little", "sunny", "gratitude"]));
        assert_eq!(plant.id, ids::SNAKE_PLANT);
    }

    #[test]
    fn every_shady_combination_gets_the_low_light_plant() {
        let matcher = Matcher::default();
        for set in AnswerSet::all().filter(|s| s.space_light == LightNeeds::Shady) {
            assert_eq!(matcher.match_answers(&set).plant.id, ids::SNAKE_PLANT);
        }
    }

    #[test]
    fn override_falls_back_to_sansevieria() {
        let matcher = Matcher::new(catalog_of(&[ids::AGLAONEMA, ids::SANSEVIERIA]));
        let plant = matcher.compute_match(&answers(["busy", "daily", "little", "shady", "gratitude"]));
        assert_eq!(plant.id, ids::SANSEVIERIA);
    }

    #[test]
    fn override_without_low_light_plants_continues_to_candidates() {
        let matcher = Matcher::new(catalog_of(&[ids::SYNGONIUM, ids::AGLAONEMA]));
        let found = matcher.explain(&answers(["busy", "daily", "minimal", "shady", "gratitude"]));
        assert_eq!(found.plant.id, ids::AGLAONEMA);
        assert_eq!(found.reason, MatchReason::Preference(QuestionKind::Lifestyle));
    }

    #[test]
    fn reminder_preference_outranks_lifestyle() {
        let matcher = Matcher::default();
        let found = matcher.explain(&answers(["busy", "daily", "little", "mixed", "slow-down"]));
        assert_eq!(found.plant.id, ids::SNAKE_PLANT);
        assert_eq!(found.reason, MatchReason::Preference(QuestionKind::Reminder));
    }

    #[test]
    fn reminder_preferences_pick_their_plants() {
        let matcher = Matcher::default();
        let responsibility =
            matcher.compute_match(&answers(["relaxed", "daily", "little", "sunny", "responsibility"]));
        assert_eq!(responsibility.id, ids::SANSEVIERIA);

        let gratitude =
            matcher.compute_match(&answers(["relaxed", "few-times", "love-it", "sunny", "gratitude"]));
        assert_eq!(gratitude.id, ids::SPIDER_PLANT);
    }

    #[test]
    fn lifestyle_preferences_apply_when_reminder_plant_is_absent() {
        let matcher = Matcher::new(catalog_of(&[
            ids::BABY_RUBBER_PLANT,
            ids::AGLAONEMA,
            ids::SYNGONIUM,
        ]));

        let busy = matcher.compute_match(&answers(["busy", "daily", "minimal", "sunny", "slow-down"]));
        assert_eq!(busy.id, ids::AGLAONEMA);

        let adventurous =
            matcher.compute_match(&answers(["adventurous", "daily", "minimal", "sunny", "gratitude"]));
        assert_eq!(adventurous.id, ids::SYNGONIUM);
    }

    #[test]
    fn preference_requires_plant_in_candidates() {
        // Aglaonema needs shade and minimal care; with little care in a sunny
        // space it is not a candidate even though the visitor is busy.
        let matcher = Matcher::new(catalog_of(&[ids::AGLAONEMA, ids::BABY_RUBBER_PLANT]));
        let found = matcher.explain(&answers(["busy", "daily", "little", "sunny", "slow-down"]));
        assert_eq!(found.plant.id, ids::BABY_RUBBER_PLANT);
        assert_eq!(found.reason, MatchReason::FirstCandidate);
    }

    #[test]
    fn first_candidate_follows_catalog_order() {
        let matcher = Matcher::new(catalog_of(&[ids::BABY_RUBBER_PLANT, ids::SYNGONIUM]));
        let found = matcher.explain(&answers(["relaxed", "daily", "little", "sunny", "slow-down"]));
        assert_eq!(found.plant.id, ids::BABY_RUBBER_PLANT);
        assert_eq!(found.reason, MatchReason::FirstCandidate);
    }

    #[test]
    fn no_candidates_returns_first_catalog_entry() {
        let matcher = Matcher::new(
            Catalog::new(vec![
                Plant::new("fern", "Fern", CareLevel::LoveIt, LightNeeds::Sunny),
                Plant::new("cactus", "Cactus", CareLevel::LoveIt, LightNeeds::Sunny),
            ])
            .unwrap(),
        );
        let found = matcher.explain(&answers(["busy", "daily", "little", "mixed", "slow-down"]));
        assert_eq!(found.plant.id, "fern");
        assert_eq!(found.reason, MatchReason::NoCandidates);
    }

    #[test]
    fn incomplete_answers_return_default_plant() {
        let matcher = Matcher::default();
        let partial = QuizAnswers::new().with(QuestionKind::SpaceLight, "shady");
        let found = matcher.explain(&partial);
        assert_eq!(found.plant.id, ids::AGLAONEMA);
        assert_eq!(found.reason, MatchReason::IncompleteAnswers);
    }

    #[test]
    fn unrecognized_answer_returns_default_plant() {
        let plant = compute_match(&answers(["busy", "daily", "little", "dim", "slow-down"]));
        assert_eq!(plant.id, ids::AGLAONEMA);
    }

    #[test]
    fn standard_matcher_is_shared_between_calls() {
        let set = answers(["busy", "daily", "little", "mixed", "slow-down"]);
        let first = compute_match(&set);
        let second = compute_match(&set);
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn reason_serializes_with_rule_tag() {
        let json = serde_json::to_value(MatchReason::Preference(QuestionKind::Reminder)).unwrap();
        assert_eq!(json["rule"], "preference");
        assert_eq!(json["question"], "reminder");

        let json = serde_json::to_value(MatchReason::LowLightOverride).unwrap();
        assert_eq!(json["rule"], "low_light_override");
    }
}
