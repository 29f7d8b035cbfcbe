use std::collections::HashMap;

use replicant_shared::{PeerId, SceneId, SceneMembership};

/// Scene membership table for tests
#[derive(Default)]
pub struct SceneMembers {
    scenes: HashMap<SceneId, Vec<PeerId>>,
}

impl SceneMembers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&mut self, scene: SceneId, peer: PeerId) {
        let peers = self.scenes.entry(scene).or_default();
        if !peers.contains(&peer) {
            peers.push(peer);
        }
    }

    pub fn leave(&mut self, scene: &SceneId, peer: &PeerId) {
        if let Some(peers) = self.scenes.get_mut(scene) {
            peers.retain(|member| member != peer);
        }
    }
}

impl SceneMembership for SceneMembers {
    fn peers_in_scene(&self, scene: &SceneId) -> Vec<PeerId> {
        self.scenes.get(scene).cloned().unwrap_or_default()
    }
}
