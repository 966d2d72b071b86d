//! Lines-changed notification stream
//!
//! After a view swap or text-snapshot replacement the tagger announces
//! which buffer lines may now resolve differently, so hosts re-request tags
//! for the affected spans instead of the whole buffer. Delivery is
//! fan-out over channels; receivers that have been dropped are pruned on
//! the next send.

use std::ops::Range;

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::session::BufferId;

/// Buffer lines whose resolved tag may differ after a state change
///
/// Sent strictly after the new state is in place; a tag request issued on
/// receipt observes the replaced snapshot, never a partial one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinesChanged {
    pub buffer: BufferId,
    /// Half-open 0-based line ranges, ascending and disjoint
    pub ranges: Vec<Range<u32>>,
}

/// Subscriber registry for one buffer's change stream
#[derive(Debug, Default)]
pub(crate) struct ChangeNotifier {
    senders: Vec<Sender<LinesChanged>>,
}

impl ChangeNotifier {
    pub fn subscribe(&mut self) -> Receiver<LinesChanged> {
        let (tx, rx) = unbounded();
        self.senders.push(tx);
        rx
    }

    /// Deliver to every live subscriber, dropping the ones that hung up.
    pub fn send(&mut self, change: &LinesChanged) {
        self.senders.retain(|tx| tx.send(change.clone()).is_ok());
    }
}

/// Coalesce ascending, deduplicated line numbers into half-open ranges.
pub(crate) fn ranges_from_sorted(lines: impl Iterator<Item = u32>) -> Vec<Range<u32>> {
    let mut ranges: Vec<Range<u32>> = Vec::new();
    for line in lines {
        match ranges.last_mut() {
            Some(last) if last.end == line => last.end = line + 1,
            _ => ranges.push(line..line + 1),
        }
    }
    ranges
}
