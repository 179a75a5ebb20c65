use crate::actor::ActorKind;
use crate::expr::ExprLimits;

/// Engine configuration threaded into derivation and refresh calls.
///
/// Nothing in the engine reads ambient settings; every tunable lives here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Bounds applied to every formula and condition before evaluation.
    pub limits: ExprLimits,
    /// System strain removed by a day refresh (characters only).
    pub strain_recovery_per_day: u32,
    /// Whether a day refresh restores NPC health to max.
    pub npc_full_heal_on_day: bool,
    /// Actor kinds whose pools are reduced by effort commitments.
    pub commitment_kinds: Vec<ActorKind>,
    /// Actor kinds skipped when a batch refresh runs over the default set.
    pub batch_excluded_kinds: Vec<ActorKind>,
}

impl EngineConfig {
    pub const DEFAULT_STRAIN_RECOVERY: u32 = 1;

    pub fn new() -> Self {
        Self {
            limits: ExprLimits::default(),
            strain_recovery_per_day: Self::DEFAULT_STRAIN_RECOVERY,
            npc_full_heal_on_day: true,
            commitment_kinds: vec![ActorKind::Character],
            batch_excluded_kinds: vec![ActorKind::Faction],
        }
    }

    /// Returns true if pools of this actor kind track commitments.
    pub fn tracks_commitments(&self, kind: ActorKind) -> bool {
        self.commitment_kinds.contains(&kind)
    }

    /// Returns true if this actor kind belongs to the default batch set.
    pub fn in_default_batch(&self, kind: ActorKind) -> bool {
        !self.batch_excluded_kinds.contains(&kind)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
