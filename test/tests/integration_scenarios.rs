/// End-to-end scenarios: one server and its clients over a LocalNetwork

use replicant_shared::{
    BitWriter, DeltaPacket, DeltaWriter, NetworkTransform, PeerId, RegistrationPacket,
    ReplicatedObject, ReplicationPacket, SceneId, TransformState, WriterPool,
};
use replicant_test::{deltas, init_logging, registrations, LocalNetwork, SceneMembers, TestHost};

const SCENE: SceneId = SceneId::new(1);
const P1: PeerId = PeerId::new(1);
const P2: PeerId = PeerId::new(2);

fn members() -> SceneMembers {
    let mut members = SceneMembers::new();
    members.join(SCENE, PeerId::SERVER);
    members.join(SCENE, P1);
    members.join(SCENE, P2);
    members
}

/// Object owned by P1 becomes visible to P2 at tick 1: one Registration to P2
/// carrying the id, and nothing left pending for P2 afterwards.
#[test]
fn scenario_a_registration_on_first_visibility() {
    init_logging();
    let network = LocalNetwork::new();
    let mut server = TestHost::server(&network, SCENE);
    let members = members();

    let object = server.spawn(10);
    server.object_mut(&object).transform.set_owner(Some(P1));
    assert!(server.show_to(P2, &object));

    let report = server.tick(&members);

    assert_eq!(report.registration_packets, 1);
    let to_p2 = server.bus.sent_to(&P2);
    assert_eq!(registrations(&to_p2), vec![vec![object]]);
    assert!(server.module.tracker().pending_for(&P2).is_empty());
    assert!(server.bus.sent_to(&P1).is_empty());
}

/// A server-controlled object changes between tick 1 and tick 2: P2, which
/// observes it, gets exactly one non-empty Delta at tick 2 and applies it.
#[test]
fn scenario_b_changed_state_reaches_observer() {
    init_logging();
    let network = LocalNetwork::new();
    let mut server = TestHost::server(&network, SCENE);
    let mut client = TestHost::client(&network, SCENE, P2);
    let members = members();

    let object = server.spawn(10);
    client.spawn_unregistered(10);
    server.show_to(P2, &object);
    server.tick(&members);
    client.receive_all();
    assert!(client.module.is_tracked(&object));

    server.object_mut(&object).transform.set_position([4.0, 5.0, 6.0]);
    server.bus.clear_sent();
    server.world.reset_counters();
    let report = server.tick(&members);

    assert!(server.object(&object).wrote_anything());
    assert_eq!(report.delta_packets, 1);
    let to_p2 = server.bus.sent_to(&P2);
    let sent = deltas(&to_p2);
    assert_eq!(sent.len(), 1);
    assert!(!sent[0].payload.is_empty());

    assert_eq!(client.receive_all(), 1);
    assert_eq!(client.object(&object).transform.state().position, [4.0, 5.0, 6.0]);
}

/// Nothing changes between ticks: write_delta reports false and no Delta is sent.
#[test]
fn scenario_c_unchanged_state_sends_nothing() {
    init_logging();
    let network = LocalNetwork::new();
    let mut server = TestHost::server(&network, SCENE);
    let members = members();

    let object = server.spawn(10);
    server.show_to(P2, &object);
    server.tick(&members);

    server.bus.clear_sent();
    server.world.reset_counters();
    let report = server.tick(&members);

    assert_eq!(server.object(&object).writes, vec![false]);
    assert_eq!(report.delta_packets, 0);
    assert!(server.bus.sent().is_empty());
}

/// A Registration naming an id with no local object skips only that entry.
#[test]
fn scenario_d_unresolved_registration_entry_is_skipped() {
    init_logging();
    let network = LocalNetwork::new();
    let mut server = TestHost::server(&network, SCENE);
    let mut client = TestHost::client(&network, SCENE, P2);
    let members = members();

    let first = server.spawn(1);
    let missing = server.spawn(2);
    let last = server.spawn(3);
    for object in [first, missing, last] {
        server.show_to(P2, &object);
    }
    server.tick(&members);

    client.spawn_unregistered(1);
    client.spawn_unregistered(3);

    assert_eq!(client.receive_all(), 2);
    assert!(client.module.is_tracked(&first));
    assert!(!client.module.is_tracked(&missing));
    assert!(client.module.is_tracked(&last));
}

/// A Delta for another Scene is ignored entirely by a client.
#[test]
fn scenario_e_cross_scene_delta_is_ignored() {
    init_logging();
    let network = LocalNetwork::new();
    let mut client = TestHost::client(&network, SCENE, P2);

    let object = client.spawn_unregistered(10);
    let registration = RegistrationPacket::new(SCENE, vec![object]);
    client
        .module
        .receive(&PeerId::SERVER, &registration.into(), &mut client.world)
        .unwrap();

    // a well-formed delta for the same id, addressed to another scene
    let mut source = NetworkTransform::with_baseline(Some(object), TransformState::default());
    source.set_position([9.0, 9.0, 9.0]);
    source.capture_state();
    let pool = WriterPool::new(2);
    let mut writer = DeltaWriter::new(&pool);
    writer.write_object(object, &mut source);
    let payload = writer.finish().unwrap();
    let packet: ReplicationPacket = DeltaPacket::new(SceneId::new(2), payload).into();

    let affected = client
        .module
        .receive(&PeerId::SERVER, &packet, &mut client.world)
        .unwrap();

    assert_eq!(affected, 0);
    assert_eq!(client.object(&object).reads, 0);
    assert_eq!(*client.object(&object).transform.state(), TransformState::default());
}

/// The wire form of a tick's output decodes back to the packets that were sent.
#[test]
fn packets_survive_the_wire() {
    init_logging();
    let network = LocalNetwork::new();
    let mut server = TestHost::server(&network, SCENE);
    let mut client = TestHost::client(&network, SCENE, P2);
    let members = members();

    let object = server.spawn(77);
    server.show_to(P2, &object);
    server.tick(&members);

    let sent: Vec<ReplicationPacket> = server
        .bus
        .sent_to(&P2)
        .into_iter()
        .cloned()
        .collect();
    let mut received = Vec::new();
    while let Some((sender, packet)) = client.bus.receive() {
        assert_eq!(sender, PeerId::SERVER);
        received.push(packet);
    }
    assert_eq!(sent, received);

    // sanity: an empty writer really is empty on the wire
    assert!(BitWriter::new().to_bytes().is_empty());
}
