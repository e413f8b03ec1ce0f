//! Built-in spell modules.
//!
//! | Spell | School | Effect |
//! |---|---|---|
//! | [`Icebolt`] | Decay | frozen on one target |
//! | [`Fireball`] | Destruction | ranged damage and burn on one hero |
//! | [`PoisonPollen`] | Decay | poison on every enemy |
//! | [`VenomInfusion`] | Decay | more poison on poisoned enemies |
//! | [`Stoneskin`] | Support | damage reduction on the caster |
//! | [`RallyingCry`] | Support | heals allied creatures |
//! | [`GatheringStorm`] | Destruction | damage to every enemy |
//! | [`ToxicTrap`] | Decay (trap) | armed before combat |
//! | [`CrashLanding`] | Fighting | extra damage and stun per success |
//! | [`Bloodthirst`] | Fighting | lifesteal after a creature kill |

mod bloodthirst;
mod crash_landing;
mod fireball;
mod gathering_storm;
mod icebolt;
mod poison_pollen;
mod rallying_cry;
mod stoneskin;
mod toxic_trap;
mod venom_infusion;

pub use bloodthirst::Bloodthirst;
pub use crash_landing::CrashLanding;
pub use fireball::Fireball;
pub use gathering_storm::GatheringStorm;
pub use icebolt::Icebolt;
pub use poison_pollen::PoisonPollen;
pub use rallying_cry::RallyingCry;
pub use stoneskin::Stoneskin;
pub use toxic_trap::ToxicTrap;
pub use venom_infusion::VenomInfusion;

use super::registry::SpellRegistry;
use crate::core::{BattleError, BattleState, CombatantId};
use crate::targeting::{TargetList, TargetResolver};

/// Register every built-in module.
pub(crate) fn register_all(registry: &mut SpellRegistry) -> Result<(), BattleError> {
    registry.register(Icebolt)?;
    registry.register(Fireball)?;
    registry.register(PoisonPollen)?;
    registry.register(VenomInfusion)?;
    registry.register(Stoneskin)?;
    registry.register(RallyingCry)?;
    registry.register(GatheringStorm)?;
    registry.register(ToxicTrap)?;
    registry.register(CrashLanding)?;
    registry.register(Bloodthirst)?;
    Ok(())
}

/// Living enemies of `caster`, in canonical order.
pub(crate) fn enemies_of(state: &BattleState, caster: &CombatantId) -> TargetList {
    TargetResolver::find_all_enemy_targets(state, state.local_side(caster.absolute_side))
}

/// Living allies of `caster` (itself included), in canonical order.
pub(crate) fn allies_of(state: &BattleState, caster: &CombatantId) -> TargetList {
    TargetResolver::find_all_ally_targets(state, state.local_side(caster.absolute_side))
}
