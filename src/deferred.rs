//! Simulated-latency continuations.
//!
//! Work that would otherwise sit behind a network round trip is queued with
//! a due time and drained by the event loop tick. Each entry carries a
//! [`LivenessToken`] for the view that queued it; when that view has been
//! dismounted or remounted since, the entry is dropped instead of run.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Login,
    Signup,
    Board,
    MessageCompose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivenessToken {
    view: ViewId,
    generation: u64,
}

impl LivenessToken {
    pub fn view(&self) -> ViewId {
        self.view
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ViewSlot {
    generation: u64,
    mounted: bool,
}

/// Mount registry. Every mount and dismount bumps the view's generation,
/// which invalidates all tokens handed out before it.
#[derive(Debug, Default)]
pub struct Lifecycle {
    views: HashMap<ViewId, ViewSlot>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, view: ViewId) -> LivenessToken {
        let slot = self.views.entry(view).or_default();
        slot.generation += 1;
        slot.mounted = true;
        LivenessToken {
            view,
            generation: slot.generation,
        }
    }

    pub fn dismount(&mut self, view: ViewId) {
        if let Some(slot) = self.views.get_mut(&view) {
            if slot.mounted {
                slot.generation += 1;
                slot.mounted = false;
            }
        }
    }

    pub fn is_mounted(&self, view: ViewId) -> bool {
        self.views.get(&view).is_some_and(|slot| slot.mounted)
    }

    /// Token for the current mount of `view`, if it is mounted.
    pub fn token(&self, view: ViewId) -> Option<LivenessToken> {
        self.views
            .get(&view)
            .filter(|slot| slot.mounted)
            .map(|slot| LivenessToken {
                view,
                generation: slot.generation,
            })
    }

    pub fn is_live(&self, token: LivenessToken) -> bool {
        self.views
            .get(&token.view)
            .is_some_and(|slot| slot.mounted && slot.generation == token.generation)
    }
}

#[derive(Debug)]
struct Pending<A> {
    due_ms: u64,
    seq: u64,
    token: LivenessToken,
    action: A,
}

#[derive(Debug)]
pub struct DeferredQueue<A> {
    pending: Vec<Pending<A>>,
    next_seq: u64,
}

impl<A> Default for DeferredQueue<A> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<A: std::fmt::Debug> DeferredQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, now_ms: u64, delay: Duration, token: LivenessToken, action: A) {
        let due_ms = now_ms.saturating_add(delay.as_millis() as u64);
        debug!(?action, due_ms, "deferring action");
        self.pending.push(Pending {
            due_ms,
            seq: self.next_seq,
            token,
            action,
        });
        self.next_seq += 1;
    }

    pub fn has_pending(&self, pred: impl Fn(&A) -> bool) -> bool {
        self.pending.iter().any(|p| pred(&p.action))
    }

    /// Removes every entry that is due at `now_ms` and returns the live ones
    /// in due order (ties in scheduling order). Stale entries are discarded.
    pub fn drain_due(&mut self, now_ms: u64, lifecycle: &Lifecycle) -> Vec<A> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.due_ms <= now_ms);
        self.pending = waiting;
        due.sort_by_key(|p| (p.due_ms, p.seq));

        due.into_iter()
            .filter_map(|p| {
                if lifecycle.is_live(p.token) {
                    Some(p.action)
                } else {
                    debug!(action = ?p.action, view = ?p.token.view, "dropping stale continuation");
                    None
                }
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Act {
        A,
        B,
        C,
    }

    #[test]
    fn drains_only_due_actions_in_order() {
        let mut lifecycle = Lifecycle::new();
        let token = lifecycle.mount(ViewId::Login);
        let mut queue = DeferredQueue::new();
        queue.schedule(0, Duration::from_millis(300), token, Act::C);
        queue.schedule(0, Duration::from_millis(100), token, Act::A);
        queue.schedule(0, Duration::from_millis(100), token, Act::B);

        assert!(queue.drain_due(99, &lifecycle).is_empty());
        assert_eq!(queue.drain_due(150, &lifecycle), vec![Act::A, Act::B]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.drain_due(1_000, &lifecycle), vec![Act::C]);
        assert!(queue.is_empty());
    }

    #[test]
    fn dismounted_view_drops_its_continuations() {
        let mut lifecycle = Lifecycle::new();
        let login = lifecycle.mount(ViewId::Login);
        let board = lifecycle.mount(ViewId::Board);
        let mut queue = DeferredQueue::new();
        queue.schedule(0, Duration::from_secs(1), login, Act::A);
        queue.schedule(0, Duration::from_secs(1), board, Act::B);

        lifecycle.dismount(ViewId::Login);
        assert_eq!(queue.drain_due(1_000, &lifecycle), vec![Act::B]);
        assert!(queue.is_empty());
    }

    #[test]
    fn remounting_supersedes_older_tokens() {
        let mut lifecycle = Lifecycle::new();
        let first = lifecycle.mount(ViewId::MessageCompose);
        lifecycle.dismount(ViewId::MessageCompose);
        let second = lifecycle.mount(ViewId::MessageCompose);

        assert!(!lifecycle.is_live(first));
        assert!(lifecycle.is_live(second));
        assert_eq!(lifecycle.token(ViewId::MessageCompose), Some(second));

        let mut queue = DeferredQueue::new();
        queue.schedule(0, Duration::ZERO, first, Act::A);
        queue.schedule(0, Duration::ZERO, second, Act::B);
        assert_eq!(queue.drain_due(0, &lifecycle), vec![Act::B]);
    }

    #[test]
    fn unmounted_views_have_no_token() {
        let mut lifecycle = Lifecycle::new();
        assert!(lifecycle.token(ViewId::Signup).is_none());
        lifecycle.mount(ViewId::Signup);
        lifecycle.dismount(ViewId::Signup);
        assert!(!lifecycle.is_mounted(ViewId::Signup));
        assert!(lifecycle.token(ViewId::Signup).is_none());
    }
}
