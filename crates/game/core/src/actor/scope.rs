use super::ActorRecord;
use crate::expr::{self, AttributeSource, ExprError, ExprLimits};
use crate::pool::PoolEvaluator;
use crate::stats::{StatKind, StatValues};

/// Expression scope over one actor record.
pub struct ActorScope<'a> {
    actor: &'a ActorRecord,
    limits: &'a ExprLimits,
}

impl<'a> ActorScope<'a> {
    pub fn new(actor: &'a ActorRecord, limits: &'a ExprLimits) -> Self {
        Self { actor, limits }
    }
}

impl AttributeSource for ActorScope<'_> {
    fn level(&self) -> i32 {
        i32::try_from(self.actor.level).unwrap_or(i32::MAX)
    }

    fn stat(&self, kind: StatKind) -> StatValues {
        self.actor.stats.values(kind)
    }

    fn skill_rank(&self, name: &str) -> Option<i32> {
        self.actor.items.iter().find_map(|item| {
            let skill = item.as_skill()?;
            item.name.eq_ignore_ascii_case(name).then_some(skill.rank)
        })
    }

    fn highest_psychic_rank(&self) -> Option<i32> {
        self.actor
            .items
            .iter()
            .filter_map(|item| item.as_skill())
            .filter(|skill| skill.is_psychic())
            .map(|skill| skill.rank)
            .max()
    }
}

impl PoolEvaluator for ActorScope<'_> {
    fn evaluate_condition(&self, condition: &str) -> bool {
        expr::evaluate_condition(condition, self, self.limits)
    }

    fn evaluate_formula(&self, formula: &str) -> Result<f64, ExprError> {
        expr::evaluate_formula(formula, self, self.limits)
    }
}
