use crate::cards::SpellSchool;
use crate::combat::{DamageSource, LandedHit, ResolveContext};
use crate::replication::{EffectType, MessageBody, SpellEffect};
use crate::spells::contract::{SpellReplicator, SpellResolver, TriggerRule};
use crate::status::StatusKind;

/// Fighting trigger: extra damage per success, then a stun.
///
/// Every copy rolls on its own; damage scales with the success count.
pub struct CrashLanding;

impl CrashLanding {
    pub const NAME: &'static str = "CrashLanding";
}

impl SpellResolver for CrashLanding {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn school(&self) -> SpellSchool {
        SpellSchool::Fighting
    }

    fn trigger_rule(&self) -> TriggerRule {
        TriggerRule::PerCopy
    }

    fn resolve_trigger(&self, ctx: &mut ResolveContext<'_>, hit: &LandedHit, successes: u32) -> MessageBody {
        let level = ctx.school_level(&hit.attacker, SpellSchool::Fighting);
        let target = hit.target.id;
        let effect = SpellEffect::new(Self::NAME, hit.attacker, EffectType::Stun)
            .with_target(target)
            .with_level(level)
            .with_successes(successes);

        if ctx.is_alive(&target) {
            let amount = ctx
                .tuning()
                .crash_landing_damage_per_success
                .saturating_mul(successes);
            let source = DamageSource::Spell {
                caster: hit.attacker,
                spell: Self::NAME.to_string(),
            };
            ctx.deal_damage(&target, amount, &source);
            ctx.apply_status(&target, StatusKind::Stunned, 1);
        }
        effect.with_changes(ctx.take_changes()).into()
    }
}

impl SpellReplicator for CrashLanding {}
