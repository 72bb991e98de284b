use serde::{Deserialize, Serialize};
use tracing::trace;

/// Fixed vocabulary of chart lifecycle and interaction events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    ConfigUpdated,
    SurfaceRebuilt { width: f64, height: f64 },
    DataUpdated { len: usize },
    Rendered,
    Updated,
    PointHovered { index: usize },
    PointClicked { index: usize },
    PointLeft,
}

impl ChartEvent {
    #[must_use]
    pub fn kind(&self) -> ChartEventKind {
        match self {
            Self::ConfigUpdated => ChartEventKind::ConfigUpdated,
            Self::SurfaceRebuilt { .. } => ChartEventKind::SurfaceRebuilt,
            Self::DataUpdated { .. } => ChartEventKind::DataUpdated,
            Self::Rendered => ChartEventKind::Rendered,
            Self::Updated => ChartEventKind::Updated,
            Self::PointHovered { .. } => ChartEventKind::PointHovered,
            Self::PointClicked { .. } => ChartEventKind::PointClicked,
            Self::PointLeft => ChartEventKind::PointLeft,
        }
    }
}

/// Subscription key for `ChartEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartEventKind {
    ConfigUpdated,
    SurfaceRebuilt,
    DataUpdated,
    Rendered,
    Updated,
    PointHovered,
    PointClicked,
    PointLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&ChartEvent)>;

struct Listener {
    id: ListenerId,
    kind: ChartEventKind,
    callback: Callback,
}

/// Synchronous publish/subscribe channel.
///
/// Listeners run in subscription order on the emitting thread. Events with
/// no listener are dropped. A closed channel accepts nothing further.
#[derive(Default)]
pub struct EventChannel {
    listeners: Vec<Listener>,
    next_id: u64,
    closed: bool,
}

impl std::fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .field("closed", &self.closed)
            .finish()
    }
}

impl EventChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `callback` to `kind`. On a closed channel the callback is
    /// dropped immediately and the returned id is already detached.
    pub fn on<F>(&mut self, kind: ChartEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&ChartEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        if self.closed {
            trace!(?kind, "ignoring subscription on a closed channel");
            return id;
        }
        self.listeners.push(Listener {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    /// Removes one listener. Returns `false` if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: ChartEvent) {
        let kind = event.kind();
        if self.closed {
            trace!(?kind, "dropping event on a closed channel");
            return;
        }
        let mut delivered = 0_usize;
        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.callback)(&event);
            delivered += 1;
        }
        trace!(?kind, delivered, "emit chart event");
    }

    #[must_use]
    pub fn listener_count(&self, kind: ChartEventKind) -> usize {
        self.listeners.iter().filter(|l| l.kind == kind).count()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Detaches every listener and stops all further delivery.
    pub fn close(&mut self) {
        self.listeners.clear();
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{ChartEvent, ChartEventKind, EventChannel};

    #[test]
    fn listeners_fire_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = EventChannel::new();
        for tag in ["first", "second", "third"] {
            let log = log.clone();
            channel.on(ChartEventKind::Rendered, move |_| log.borrow_mut().push(tag));
        }

        channel.emit(ChartEvent::Rendered);

        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn only_matching_kind_is_delivered() {
        let hits = Rc::new(RefCell::new(0));
        let mut channel = EventChannel::new();
        let counter = hits.clone();
        channel.on(ChartEventKind::DataUpdated, move |event| {
            if let ChartEvent::DataUpdated { len } = event {
                *counter.borrow_mut() += len;
            }
        });

        channel.emit(ChartEvent::Rendered);
        channel.emit(ChartEvent::DataUpdated { len: 4 });

        assert_eq!(*hits.borrow(), 4);
    }

    #[test]
    fn off_detaches_a_single_listener() {
        let mut channel = EventChannel::new();
        let a = channel.on(ChartEventKind::Updated, |_| {});
        channel.on(ChartEventKind::Updated, |_| {});

        assert!(channel.off(a));
        assert!(!channel.off(a));
        assert_eq!(channel.listener_count(ChartEventKind::Updated), 1);
    }

    #[test]
    fn closed_channel_ignores_late_subscribers() {
        let hits = Rc::new(RefCell::new(0));
        let mut channel = EventChannel::new();
        channel.close();

        let counter = hits.clone();
        let id = channel.on(ChartEventKind::Rendered, move |_| *counter.borrow_mut() += 1);
        channel.emit(ChartEvent::Rendered);

        assert!(channel.is_closed());
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(channel.listener_count(ChartEventKind::Rendered), 0);
        assert!(!channel.off(id));
    }
}
