/// Simple World implementation for E2E testing
/// Holds NetworkTransforms keyed by Scene & ObjectId, and counts the codec
/// calls the replication module makes on each of them.

use std::collections::HashMap;

use replicant_shared::{
    BitReader, BitWrite, NetworkTransform, ObjectId, PeerId, ReplicatedObject, SceneId, SerdeErr,
    TransformState, WorldMutType,
};

/// A NetworkTransform plus call counters
pub struct TestObject {
    pub transform: NetworkTransform,
    pub captures: usize,
    pub commits: usize,
    pub reads: usize,
    /// Result of every write_delta call, in call order
    pub writes: Vec<bool>,
    /// Makes every read_delta fail without consuming anything
    pub reject_reads: bool,
}

impl TestObject {
    pub fn new(transform: NetworkTransform) -> Self {
        Self {
            transform,
            captures: 0,
            commits: 0,
            reads: 0,
            writes: Vec::new(),
            reject_reads: false,
        }
    }

    pub fn wrote_anything(&self) -> bool {
        self.writes.iter().any(|written| *written)
    }

    pub fn reset_counters(&mut self) {
        self.captures = 0;
        self.commits = 0;
        self.reads = 0;
        self.writes.clear();
    }
}

impl ReplicatedObject for TestObject {
    fn object_id(&self) -> Option<ObjectId> {
        self.transform.object_id()
    }

    fn owner(&self) -> Option<PeerId> {
        self.transform.owner()
    }

    fn is_observed_by(&self, peer: &PeerId) -> bool {
        self.transform.is_observed_by(peer)
    }

    fn capture_state(&mut self) {
        self.captures += 1;
        self.transform.capture_state();
    }

    fn write_delta(&mut self, writer: &mut dyn BitWrite) -> bool {
        let written = self.transform.write_delta(writer);
        self.writes.push(written);
        written
    }

    fn read_delta(&mut self, reader: &mut BitReader) -> Result<(), SerdeErr> {
        if self.reject_reads {
            return Err(SerdeErr::InvalidValue {
                type_name: "TestObject",
            });
        }
        self.reads += 1;
        self.transform.read_delta(reader)
    }

    fn commit_baseline(&mut self) {
        self.commits += 1;
        self.transform.commit_baseline();
    }

    fn clear_received(&mut self) {
        self.transform.clear_received();
    }
}

// TestWorld - Simple HashMap-based world
#[derive(Default)]
pub struct TestWorld {
    pub objects: HashMap<(SceneId, ObjectId), TestObject>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a transform with a confirmed id at the default state, which
    /// every participant agrees on as the starting baseline
    pub fn spawn(&mut self, scene: SceneId, id: ObjectId) -> &mut TestObject {
        self.spawn_with(
            scene,
            NetworkTransform::with_baseline(Some(id), TransformState::default()),
        )
    }

    pub fn spawn_with(&mut self, scene: SceneId, transform: NetworkTransform) -> &mut TestObject {
        let id = transform
            .object_id()
            .expect("spawned transforms need a confirmed id");
        self.objects
            .entry((scene, id))
            .or_insert_with(|| TestObject::new(transform))
    }

    pub fn despawn(&mut self, scene: &SceneId, id: &ObjectId) -> Option<TestObject> {
        self.objects.remove(&(*scene, *id))
    }

    pub fn object(&self, scene: &SceneId, id: &ObjectId) -> &TestObject {
        self.objects
            .get(&(*scene, *id))
            .expect("object should exist in TestWorld")
    }

    pub fn object_mut(&mut self, scene: &SceneId, id: &ObjectId) -> &mut TestObject {
        self.objects
            .get_mut(&(*scene, *id))
            .expect("object should exist in TestWorld")
    }

    pub fn reset_counters(&mut self) {
        self.objects
            .values_mut()
            .for_each(TestObject::reset_counters);
    }
}

// WorldMutType implementation
impl WorldMutType for TestWorld {
    fn replicated_object(&self, scene: &SceneId, id: &ObjectId) -> Option<&dyn ReplicatedObject> {
        self.objects
            .get(&(*scene, *id))
            .map(|object| object as &dyn ReplicatedObject)
    }

    fn replicated_object_mut(
        &mut self,
        scene: &SceneId,
        id: &ObjectId,
    ) -> Option<&mut dyn ReplicatedObject> {
        self.objects
            .get_mut(&(*scene, *id))
            .map(|object| object as &mut dyn ReplicatedObject)
    }
}
