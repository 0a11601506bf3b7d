/// Score keeping and stage progression.

use crate::config::Rules;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Score {
    pub value: u32,
}

impl Score {
    pub fn add(&mut self, points: u32) {
        self.value = self.value.saturating_add(points);
    }

    /// Deducts `cost` if the score covers it.  Returns whether it did.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        match self.value.checked_sub(cost) {
            Some(rest) => {
                self.value = rest;
                true
            }
            None => false,
        }
    }

    /// Text shown in the HUD.
    pub fn label(&self) -> String {
        format!("Score: {}", self.value)
    }
}

/// Stage number, kill counters and the NeoBeam cooldown gate.
#[derive(Clone, Debug, PartialEq)]
pub struct StageManager {
    pub stage: u8,
    pub enemy_kill_count: u32,
    pub kills_toward_neobeam: u32,
    pub neobeam_ready: bool,
    pub neobeam_uses: u32,
    pub boss_spawned: bool,
    pub boss_defeated: bool,
}

impl Default for StageManager {
    fn default() -> Self {
        StageManager {
            stage: 1,
            enemy_kill_count: 0,
            kills_toward_neobeam: 0,
            neobeam_ready: false,
            neobeam_uses: 0,
            boss_spawned: false,
            boss_defeated: false,
        }
    }
}

impl StageManager {
    /// Counts a beam kill toward both the stage and the NeoBeam cooldown.
    pub fn record_kill(&mut self, rules: &Rules) {
        self.enemy_kill_count += 1;
        self.kills_toward_neobeam += 1;
        if self.kills_toward_neobeam >= rules.neobeam_kills {
            self.reset_neobeam_uses(rules);
        }
    }

    pub fn reset_neobeam_uses(&mut self, rules: &Rules) {
        self.neobeam_ready = true;
        self.kills_toward_neobeam = 0;
        self.neobeam_uses = rules.neobeam_uses;
    }

    /// Consumes one NeoBeam use.  Returns false when none are left.
    pub fn use_neobeam(&mut self) -> bool {
        if self.neobeam_uses == 0 {
            return false;
        }
        self.neobeam_uses -= 1;
        if self.neobeam_uses == 0 {
            self.neobeam_ready = false;
        }
        true
    }

    /// Kills still needed before NeoBeam unlocks.
    pub fn kills_until_neobeam(&self, rules: &Rules) -> u32 {
        rules.neobeam_kills.saturating_sub(self.kills_toward_neobeam)
    }

    /// Kills still needed to clear stage 1.
    pub fn kills_until_clear(&self, rules: &Rules) -> u32 {
        rules.stage_clear_kills.saturating_sub(self.enemy_kill_count)
    }

    pub fn stage_one_cleared(&self, rules: &Rules) -> bool {
        self.stage == 1 && self.enemy_kill_count >= rules.stage_clear_kills
    }

    pub fn advance_stage(&mut self) {
        self.stage += 1;
    }

    pub fn game_cleared(&self) -> bool {
        self.stage == 2 && self.boss_defeated
    }
}
