//! Shared fixtures for the cross-crate tests.
//!
//! A minimal host: numbered colliders, sockets with an integer kind, and a
//! cable that counts how often it was pulled out of every hand.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tether_attach::{
    AnyKind, AttachableId, Attachable, Compatibility, Grabbable, MatchKind, PlugEvent, Slot,
    SlotDirectory,
};
use tether_space::{Kinded, Positioned, Vec3};

/// Host collider handle.
pub type Collider = u32;

/// The carried cable.
#[derive(Debug, Default)]
pub struct Cable {
    pub pulls: Cell<u32>,
}

impl Grabbable for Cable {
    fn detach_from_all_grabbers(&self) {
        self.pulls.set(self.pulls.get() + 1);
    }
}

/// A wall socket.
#[derive(Debug)]
pub struct Socket {
    pub at: Vec3,
    pub kind: Option<u32>,
    pub holding: Cell<bool>,
    pub highlighted: Cell<bool>,
    pub sink: RefCell<Vec<AttachableId>>,
}

impl Socket {
    pub fn at(position: Vec3, kind: Option<u32>) -> Rc<Self> {
        Rc::new(Self {
            at: position,
            kind,
            holding: Cell::new(false),
            highlighted: Cell::new(false),
            sink: RefCell::new(Vec::new()),
        })
    }

    /// A socket `distance` units from the origin along +X.
    pub fn along_x(distance: f32, kind: Option<u32>) -> Rc<Self> {
        Self::at(Vec3::new(distance, 0.0, 0.0), kind)
    }
}

impl Positioned for Socket {
    fn position(&self) -> Vec3 {
        self.at
    }
}

impl Kinded for Socket {
    type Kind = u32;

    fn kind(&self) -> Option<&u32> {
        self.kind.as_ref()
    }
}

impl Slot for Socket {
    type Grab = Cable;

    fn accept_grab(&self, _grabbable: &Rc<Cable>) {
        self.holding.set(true);
    }

    fn release_grab(&self, _grabbable: &Rc<Cable>) {
        self.holding.set(false);
    }

    fn attach_succeeded(&self, event: &PlugEvent<'_, Self>) {
        self.sink.borrow_mut().push(event.attachable);
    }

    fn highlight(&self) {
        self.highlighted.set(true);
    }

    fn unhighlight(&self) {
        self.highlighted.set(false);
    }
}

/// Sockets registered under colliders `0..n`.
pub fn wall(sockets: &[Rc<Socket>]) -> SlotDirectory<Collider, Socket> {
    let mut directory = SlotDirectory::new();
    for (collider, socket) in sockets.iter().enumerate() {
        directory.insert(collider as Collider, socket);
    }
    directory
}

/// A plug that fits any socket.
pub fn universal_plug(cable: &Rc<Cable>) -> Attachable<Collider, Socket> {
    Attachable::new(AttachableId(1), cable, AnyKind)
}

/// A plug that only fits sockets of `kind`.
pub fn keyed_plug(cable: &Rc<Cable>, kind: u32) -> Attachable<Collider, Socket, MatchKind<u32>> {
    Attachable::new(AttachableId(2), cable, MatchKind::new(kind))
}

/// Subscribe to every channel and log channel names in firing order.
pub fn record_notifications<P>(
    plug: &mut Attachable<Collider, Socket, P>,
) -> Rc<RefCell<Vec<&'static str>>>
where
    P: Compatibility<Socket>,
{
    let log = Rc::new(RefCell::new(Vec::new()));
    let events = plug.events();

    let sink = Rc::clone(&log);
    events.attempt.subscribe(move |_| sink.borrow_mut().push("attempt"));
    let sink = Rc::clone(&log);
    events.success.subscribe(move |_| sink.borrow_mut().push("success"));
    let sink = Rc::clone(&log);
    events.fail.subscribe(move |_| sink.borrow_mut().push("fail"));
    let sink = Rc::clone(&log);
    events.detached.subscribe(move |_| sink.borrow_mut().push("detached"));

    log
}
