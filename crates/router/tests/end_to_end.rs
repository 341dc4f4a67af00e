use arplace_core::{
    AnchorId, AnchorRemoval, Geometry, HapticCommand, NodeParent, RouterCommand,
};
use arplace_router::{AnchorEventRouter, ImageAnchorPhase};
use arplace_testkit::{image_anchor, plane_anchor, test_cube_materials};
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

#[test]
fn plane_anchor_places_rotated_plane_and_origin_marker() {
    let mut router = AnchorEventRouter::new(test_cube_materials());
    let added = router.on_anchor_added(&plane_anchor(1, (0.5, 0.0, 0.3)), Duration::ZERO);

    assert_eq!(added.mutations.len(), 2);
    let surface = added.mutations[0].node();
    assert_eq!(surface.position, Vec3::new(0.5, 0.0, 0.3));
    assert!(surface
        .rotation
        .abs_diff_eq(Quat::from_rotation_x(FRAC_PI_2), 1e-6));
    assert_eq!(
        surface.geometry,
        Geometry::Plane {
            width: 0.5,
            height: 0.3
        }
    );

    let marker = added.mutations[1].node();
    assert_eq!(marker.position, Vec3::ZERO);
    assert_eq!(marker.geometry, Geometry::cube(0.18));
    assert_eq!(added.mutations[1].parent(), NodeParent::Anchor(AnchorId(1)));
}

#[test]
fn image_anchor_vibrates_places_then_removes() {
    let mut router = AnchorEventRouter::new(test_cube_materials());
    let anchor = image_anchor(2, Vec3::new(1.0, 0.0, 2.0));
    assert_eq!(router.image_phase(anchor.id), ImageAnchorPhase::Undetected);

    let added = router.on_anchor_added(&anchor, Duration::from_millis(500));
    assert!(added.mutations.is_empty());
    assert_eq!(router.image_phase(anchor.id), ImageAnchorPhase::Detected);

    let detection = added.detection.expect("image anchor detected");
    let commands = router
        .on_image_detected(&detection)
        .expect("first detection places")
        .into_commands();
    assert_eq!(router.image_phase(anchor.id), ImageAnchorPhase::Consumed);

    assert_eq!(commands[0], RouterCommand::Haptic(HapticCommand::Vibrate));
    match &commands[1] {
        RouterCommand::Scene(mutation) => {
            assert_eq!(mutation.parent(), NodeParent::Root);
            assert_eq!(mutation.node().position, Vec3::new(1.0, 0.0, 2.0));
            assert_eq!(mutation.node().geometry, Geometry::cube(0.25));
            assert_eq!(mutation.node().materials.len(), 6);
        }
        other => panic!("expected scene mutation, got {other:?}"),
    }
    assert_eq!(
        commands[2],
        RouterCommand::RemoveAnchor(AnchorRemoval { anchor: anchor.id })
    );
}

#[test]
fn consumed_image_anchor_readded_fires_nothing() {
    let mut router = AnchorEventRouter::new(test_cube_materials());
    let anchor = image_anchor(3, Vec3::ZERO);
    let detection = router
        .on_anchor_added(&anchor, Duration::ZERO)
        .detection
        .expect("detected");
    router.on_image_detected(&detection).expect("placed");
    router.on_anchor_removed(anchor.id);

    let again = router.on_anchor_added(&anchor, Duration::from_secs(1));
    assert!(again.detection.is_none());
    assert!(again.mutations.is_empty());
    assert_eq!(router.image_phase(anchor.id), ImageAnchorPhase::Consumed);
}
