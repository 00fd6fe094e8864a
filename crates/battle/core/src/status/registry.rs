//! Tag-keyed handlers for status effect behaviour.
//!
//! Each handler is registered against exactly one [`EffectTags`] flag. A
//! definition carrying several tags runs the handler of every tag, in flag
//! declaration order.

use std::collections::HashMap;

use super::{EffectTags, StatusEffectDef};
use crate::formulas::{self, DamageType, Defenses};
use crate::state::Vitals;

/// Everything a tick handler may read or change for one buff.
pub struct TickContext<'a> {
    pub vitals: &'a mut Vitals,
    pub def: &'a StatusEffectDef,
    pub magnitude: Option<f64>,
    /// Carrier's defenses, buffs included, sampled at the start of the tick.
    pub defenses: Defenses,
    /// Seconds this buff was active during the tick.
    pub seconds: f64,
}

pub type TickHandler = fn(&mut TickContext<'_>);
pub type ApplyHandler = fn(&StatusEffectDef, &mut Vitals, Option<f64>);
pub type ExpireHandler = fn(&StatusEffectDef, &mut Vitals);

#[derive(Clone, Debug, Default)]
pub struct EffectHandlers {
    tick: HashMap<EffectTags, TickHandler>,
    apply: HashMap<EffectTags, ApplyHandler>,
    expire: HashMap<EffectTags, ExpireHandler>,
}

impl EffectHandlers {
    /// Periodic damage, heal over time and the shield pool.
    pub fn standard() -> Self {
        let mut handlers = Self::default();
        handlers.register_tick(EffectTags::TICK_DAMAGE, tick_damage);
        handlers.register_tick(EffectTags::HEAL_OVER_TIME, heal_over_time);
        handlers.register_apply(EffectTags::SHIELD, grant_shield);
        handlers.register_expire(EffectTags::SHIELD, discard_shield);
        handlers
    }

    pub fn register_tick(&mut self, tag: EffectTags, handler: TickHandler) {
        self.tick.insert(tag, handler);
    }

    pub fn register_apply(&mut self, tag: EffectTags, handler: ApplyHandler) {
        self.apply.insert(tag, handler);
    }

    pub fn register_expire(&mut self, tag: EffectTags, handler: ExpireHandler) {
        self.expire.insert(tag, handler);
    }

    pub(crate) fn on_tick(&self, ctx: &mut TickContext<'_>) {
        for tag in ctx.def.tags.iter() {
            if let Some(handler) = self.tick.get(&tag) {
                handler(ctx);
            }
        }
    }

    pub(crate) fn on_apply(&self, def: &StatusEffectDef, vitals: &mut Vitals, magnitude: Option<f64>) {
        for tag in def.tags.iter() {
            if let Some(handler) = self.apply.get(&tag) {
                handler(def, vitals, magnitude);
            }
        }
    }

    pub(crate) fn on_expire(&self, def: &StatusEffectDef, vitals: &mut Vitals) {
        for tag in def.tags.iter() {
            if let Some(handler) = self.expire.get(&tag) {
                handler(def, vitals);
            }
        }
    }
}

fn tick_damage(ctx: &mut TickContext<'_>) {
    let Some(dps) = ctx.magnitude.filter(|m| *m > 0.0) else {
        return;
    };
    let damage_type = ctx.def.tick_damage_type.unwrap_or(DamageType::Magical);
    let damage = formulas::mitigate(dps * ctx.seconds, damage_type, ctx.defenses);
    ctx.vitals.lose_hp(damage);
}

fn heal_over_time(ctx: &mut TickContext<'_>) {
    if let Some(hps) = ctx.magnitude.filter(|m| *m > 0.0) {
        ctx.vitals.heal(hps * ctx.seconds);
    }
}

fn grant_shield(_def: &StatusEffectDef, vitals: &mut Vitals, magnitude: Option<f64>) {
    if let Some(amount) = magnitude {
        vitals.shield_hp = vitals.shield_hp.max(amount);
    }
}

fn discard_shield(_def: &StatusEffectDef, vitals: &mut Vitals) {
    vitals.shield_hp = 0.0;
}
