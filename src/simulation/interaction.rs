//! Ant-to-ant encounters
//!
//! Phase A resolves encounters for every loaded, ready ant. Phase B then
//! counts every cooldown down. Only the acting ant's own cooldown changes in
//! phase A, so all ants are judged against the cooldowns the step began with.

use crate::simulation::ground::Ground;

impl Ground {
    /// Resolve encounters and decay cooldowns; returns interactions fired this step
    pub fn handle_interactions(&mut self) -> usize {
        let fired = self.resolve_interactions();
        self.decay_cooldowns();
        fired
    }

    /// Phase A: at most one interaction per ant.
    ///
    /// A ready ant carrying an object scans its neighbor cells in topology
    /// order. The first ant found whose memory holds at least
    /// `similarity_threshold` entries of the carried category triggers the
    /// interaction: the actor turns to face opposite that ant's heading and
    /// its cooldown restarts.
    pub fn resolve_interactions(&mut self) -> usize {
        self.ant_index.rebuild(
            self.agents
                .iter()
                .enumerate()
                .map(|(i, ant)| (i, ant.position())),
        );

        let threshold = self.similarity_threshold as usize;
        let mut fired = 0;

        for i in 0..self.agents.len() {
            let actor = &self.agents[i];
            if actor.interaction_cooldown() != 0 {
                continue;
            }
            let Some(load) = actor.load() else {
                continue;
            };
            let position = actor.position();

            let partner = self
                .ant_index
                .query_neighbors(&self.topology, position)
                .filter(|&j| j != i)
                .find(|&j| self.agents[j].similarity(load.category) >= threshold);

            if let Some(j) = partner {
                let heading = self.agents[j].prev_direction().reversed();
                let actor = &mut self.agents[i];
                actor.set_prev_direction(heading);
                actor.set_interaction_cooldown(self.cooldown_duration);
                self.interaction_counter += 1;
                fired += 1;

                tracing::debug!(
                    "Ant {} carrying {:?} met ant {}, turning {:?}",
                    i,
                    load.category,
                    j,
                    heading
                );
            }
        }

        fired
    }

    /// Phase B: every positive cooldown drops by one
    pub fn decay_cooldowns(&mut self) {
        for ant in self.agents.iter_mut() {
            ant.tick_cooldown();
        }
    }
}
