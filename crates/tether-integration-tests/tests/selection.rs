//! Proximity tracking and selection through a full attachable.

use std::collections::HashSet;
use std::rc::Rc;

use proptest::prelude::*;
use tether_attach::{AttachState, SelectionChange};
use tether_space::Vec3;
use tether_integration_tests::{keyed_plug, universal_plug, wall, Cable, Collider, Socket};

#[test]
fn closer_socket_of_same_kind_is_selected() {
    let cable = Rc::new(Cable::default());
    let sockets = [Socket::along_x(5.0, Some(1)), Socket::along_x(2.0, Some(1))];
    let directory = wall(&sockets);
    let mut plug = keyed_plug(&cable, 1);

    plug.on_range_enter(0);
    plug.on_range_enter(1);
    plug.recalculate(&directory);

    let selected = plug.selected_slot().expect("a socket is selected");
    assert!(Rc::ptr_eq(&selected, &sockets[1]));
    assert!(sockets[1].highlighted.get());
}

#[test]
fn mismatched_kind_is_never_selected_and_never_plugs() {
    let cable = Rc::new(Cable::default());
    let sockets = [Socket::along_x(1.0, Some(1))];
    let directory = wall(&sockets);
    let mut plug = keyed_plug(&cable, 2);

    plug.on_range_enter(0);
    plug.recalculate(&directory);

    assert!(plug.selected_slot().is_none());
    assert!(!plug.try_plug(Some(&sockets[0])));
    assert!(!plug.is_plugged_in());
}

#[test]
fn closer_mismatch_loses_to_farther_match() {
    let cable = Rc::new(Cable::default());
    let sockets = [Socket::along_x(0.5, Some(9)), Socket::along_x(7.0, Some(3))];
    let directory = wall(&sockets);
    let mut plug = keyed_plug(&cable, 3);

    plug.on_range_enter(0);
    plug.on_range_enter(1);
    plug.recalculate(&directory);

    assert!(Rc::ptr_eq(&plug.selected_slot().unwrap(), &sockets[1]));
}

#[test]
fn leaving_range_deselects() {
    let cable = Rc::new(Cable::default());
    let sockets = [Socket::along_x(1.0, None), Socket::along_x(3.0, None)];
    let directory = wall(&sockets);
    let mut plug = universal_plug(&cable);

    plug.on_range_enter(0);
    plug.on_range_enter(1);
    assert_eq!(plug.recalculate(&directory), SelectionChange::Selected);

    plug.on_range_exit(&0);
    assert_eq!(plug.recalculate(&directory), SelectionChange::Switched);
    assert!(!sockets[0].highlighted.get());
    assert!(sockets[1].highlighted.get());

    plug.on_range_exit(&1);
    assert_eq!(plug.recalculate(&directory), SelectionChange::Cleared);
    assert!(!sockets[1].highlighted.get());
    assert!(matches!(plug.state(), AttachState::Idle));
}

#[test]
fn equal_distance_prefers_first_entered() {
    let cable = Rc::new(Cable::default());
    let sockets = [
        Socket::at(Vec3::new(0.0, 2.0, 0.0), None),
        Socket::at(Vec3::new(2.0, 0.0, 0.0), None),
    ];
    let directory = wall(&sockets);
    let mut plug = universal_plug(&cable);

    plug.on_range_enter(1);
    plug.on_range_enter(0);
    plug.recalculate(&directory);

    assert!(Rc::ptr_eq(&plug.selected_slot().unwrap(), &sockets[1]));
}

#[test]
fn following_the_cable_moves_selection() {
    let cable = Rc::new(Cable::default());
    let sockets = [Socket::along_x(0.0, None), Socket::along_x(10.0, None)];
    let directory = wall(&sockets);
    let mut plug = universal_plug(&cable);

    plug.on_range_enter(0);
    plug.on_range_enter(1);

    let mut switches = 0;
    for step in 0..=10 {
        let x = step as f32;
        if plug.tick(Vec3::new(x, 0.0, 0.0), &directory) == SelectionChange::Switched {
            switches += 1;
        }
    }

    assert_eq!(switches, 1);
    assert!(Rc::ptr_eq(&plug.selected_slot().unwrap(), &sockets[1]));
}

proptest! {
    #[test]
    fn range_membership_mirrors_events(
        ops in proptest::collection::vec((any::<bool>(), 0u32..8), 0..48)
    ) {
        let cable = Rc::new(Cable::default());
        let mut plug = universal_plug(&cable);
        let mut model: HashSet<Collider> = HashSet::new();

        for (enter, collider) in ops {
            if enter {
                plug.on_range_enter(collider);
                model.insert(collider);
            } else {
                plug.on_range_exit(&collider);
                model.remove(&collider);
            }
        }

        let actual: HashSet<Collider> = plug.proximity().iter().copied().collect();
        prop_assert_eq!(actual, model);
    }
}
