use crate::{
    types::{ObjectId, SceneId},
    world::replicated_object::ReplicatedObject,
};

/// Structures that implement the WorldMutType trait resolve object identifiers
/// to live replicated objects.
///
/// A lookup returns None both when no object exists under the id and when the
/// object is of a kind this module does not replicate.
pub trait WorldMutType {
    fn replicated_object(&self, scene: &SceneId, id: &ObjectId) -> Option<&dyn ReplicatedObject>;

    fn replicated_object_mut(
        &mut self,
        scene: &SceneId,
        id: &ObjectId,
    ) -> Option<&mut dyn ReplicatedObject>;

    fn has_replicated_object(&self, scene: &SceneId, id: &ObjectId) -> bool {
        self.replicated_object(scene, id).is_some()
    }
}
