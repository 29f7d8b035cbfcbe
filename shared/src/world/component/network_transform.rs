use std::collections::HashSet;

use replicant_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::{
    types::{ObjectId, PeerId},
    world::{component::diff_mask::DiffMask, replicated_object::ReplicatedObject},
};

const POSITION_BIT: u8 = 0;
const ROTATION_BIT: u8 = 1;
const SCALE_BIT: u8 = 2;
const FIELD_COUNT: u8 = 3;

/// Position, rotation (quaternion, xyzw) & scale of an object
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl TransformState {
    pub fn from_position(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    fn diff(&self, baseline: Option<&TransformState>) -> DiffMask {
        let mut mask = DiffMask::new(FIELD_COUNT);
        let Some(baseline) = baseline else {
            for bit in 0..FIELD_COUNT {
                mask.set_bit(bit, true);
            }
            return mask;
        };
        mask.set_bit(POSITION_BIT, self.position != baseline.position);
        mask.set_bit(ROTATION_BIT, self.rotation != baseline.rotation);
        mask.set_bit(SCALE_BIT, self.scale != baseline.scale);
        mask
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
        }
    }
}

/// A replicated transform.
///
/// Keeps three copies of its state: `live` (what the game reads & writes),
/// `captured` (snapshot taken this tick) and `baseline` (last committed
/// snapshot). Deltas carry only the fields that differ between captured and
/// baseline; with no baseline yet, every field is sent. Nothing is sent
/// before the first capture or received delta.
///
/// On the receiving side, applied fields are also kept in `relay` so that a
/// host which does not control the transform can forward them once.
pub struct NetworkTransform {
    id: Option<ObjectId>,
    owner: Option<PeerId>,
    observers: HashSet<PeerId>,
    live: TransformState,
    captured: Option<TransformState>,
    baseline: Option<TransformState>,
    relay: DiffMask,
}

impl NetworkTransform {
    pub fn new(id: Option<ObjectId>, state: TransformState) -> Self {
        Self {
            id,
            owner: None,
            observers: HashSet::new(),
            live: state,
            captured: None,
            baseline: None,
            relay: DiffMask::new(FIELD_COUNT),
        }
    }

    /// A transform both sides already agree on, so only later changes are sent.
    pub fn with_baseline(id: Option<ObjectId>, state: TransformState) -> Self {
        let mut transform = Self::new(id, state);
        transform.baseline = Some(state);
        transform
    }

    pub fn confirm_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    pub fn set_owner(&mut self, owner: Option<PeerId>) {
        self.owner = owner;
    }

    // Observers

    pub fn add_observer(&mut self, peer: PeerId) -> bool {
        self.observers.insert(peer)
    }

    pub fn remove_observer(&mut self, peer: &PeerId) -> bool {
        self.observers.remove(peer)
    }

    pub fn observers(&self) -> impl Iterator<Item = &PeerId> {
        self.observers.iter()
    }

    // State

    pub fn state(&self) -> &TransformState {
        &self.live
    }

    pub fn state_mut(&mut self) -> &mut TransformState {
        &mut self.live
    }

    pub fn set_position(&mut self, position: [f32; 3]) {
        self.live.position = position;
    }

    pub fn set_rotation(&mut self, rotation: [f32; 4]) {
        self.live.rotation = rotation;
    }

    pub fn set_scale(&mut self, scale: [f32; 3]) {
        self.live.scale = scale;
    }

    pub fn baseline(&self) -> Option<&TransformState> {
        self.baseline.as_ref()
    }
}

impl ReplicatedObject for NetworkTransform {
    fn object_id(&self) -> Option<ObjectId> {
        self.id
    }

    fn owner(&self) -> Option<PeerId> {
        self.owner
    }

    fn is_observed_by(&self, peer: &PeerId) -> bool {
        self.observers.contains(peer)
    }

    fn capture_state(&mut self) {
        self.captured = Some(self.live);
    }

    fn write_delta(&mut self, writer: &mut dyn BitWrite) -> bool {
        let Some(captured) = self.captured else {
            return false;
        };
        let mut mask = captured.diff(self.baseline.as_ref());
        mask.or(&self.relay);
        if mask.is_clear() {
            return false;
        }

        mask.ser(writer);
        if mask.bit(POSITION_BIT) == Some(true) {
            captured.position.ser(writer);
        }
        if mask.bit(ROTATION_BIT) == Some(true) {
            captured.rotation.ser(writer);
        }
        if mask.bit(SCALE_BIT) == Some(true) {
            captured.scale.ser(writer);
        }
        true
    }

    fn read_delta(&mut self, reader: &mut BitReader) -> Result<(), SerdeErr> {
        let mask = DiffMask::de(reader, FIELD_COUNT)?;

        // decode everything before touching live state, so a short read applies nothing
        let mut next = self.live;
        if mask.bit(POSITION_BIT) == Some(true) {
            next.position = Serde::de(reader)?;
        }
        if mask.bit(ROTATION_BIT) == Some(true) {
            next.rotation = Serde::de(reader)?;
        }
        if mask.bit(SCALE_BIT) == Some(true) {
            next.scale = Serde::de(reader)?;
        }
        self.live = next;
        self.captured = Some(next);
        self.baseline = Some(next);
        self.relay.or(&mask);
        Ok(())
    }

    fn commit_baseline(&mut self) {
        if let Some(captured) = self.captured {
            self.baseline = Some(captured);
        }
    }

    fn clear_received(&mut self) {
        self.relay.clear();
    }
}
