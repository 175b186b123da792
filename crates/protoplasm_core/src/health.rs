use crate::config::HealthConfig;
use protoplasm_data::Health;

pub trait HealthLogic {
    fn is_alive(&self) -> bool;

    /// Applies damage and starts the regeneration cooldown.
    ///
    /// A lethal hit on a cell whose health is above `protection_threshold`
    /// leaves it at the threshold instead of killing it.
    fn deal_damage(
        &mut self,
        amount: f32,
        cause: &str,
        protection_threshold: f32,
        cooldown: f32,
    ) -> bool;

    /// Heals by `amount`, never above max health.
    fn heal(&mut self, amount: f32);
}

impl HealthLogic for Health {
    fn is_alive(&self) -> bool {
        !self.dead && self.current_health > 0.0
    }

    fn deal_damage(
        &mut self,
        amount: f32,
        cause: &str,
        protection_threshold: f32,
        cooldown: f32,
    ) -> bool {
        if !self.is_alive() || amount.is_nan() || amount <= 0.0 {
            return false;
        }

        let remaining = self.current_health - amount;
        if remaining <= 0.0
            && protection_threshold > 0.0
            && self.current_health > protection_threshold
        {
            self.current_health = protection_threshold;
        } else {
            self.current_health = remaining;
        }

        if self.current_health <= 0.0 {
            self.current_health = 0.0;
            self.dead = true;
        }

        self.regen_cooldown = self.regen_cooldown.max(cooldown);
        self.last_damage_cause = Some(cause.to_owned());
        true
    }

    fn heal(&mut self, amount: f32) {
        if !self.is_alive() || amount <= 0.0 {
            return;
        }
        self.current_health = (self.current_health + amount).min(self.max_health);
    }
}

/// Health floor a single lethal hit cannot push through.
#[must_use]
pub fn instant_kill_protection_threshold(
    health: &Health,
    is_player: bool,
    config: &HealthConfig,
) -> f32 {
    if is_player {
        health.max_health * config.instant_kill_protection_fraction
    } else {
        0.0
    }
}
