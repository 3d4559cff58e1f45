use crate::ir::{Port, SignalRef};
use std::collections::BinaryHeap;
use std::collections::binary_heap::PeekMut;

#[derive(Debug, Clone)]
pub struct ClockDef {
    pub period: u64,
}

#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: u64,
    pub signal: SignalRef,
    pub next_val: u64,
    seq: u64,
}

impl SimEvent {
    pub fn is_clock(&self) -> bool {
        self.signal.port == Port::Clk
    }
}

impl PartialEq for SimEvent {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}

impl Eq for SimEvent {}

impl PartialOrd for SimEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Earlier time has higher priority (BinaryHeap is a Max-Heap).
        // Within one instant, pin writes land before the clock edge samples them.
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.is_clock().cmp(&self.is_clock()))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

pub struct Scheduler {
    pub(crate) time: u64,
    pub(crate) clock: Option<ClockDef>,
    pub(crate) event_queue: BinaryHeap<SimEvent>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            time: 0,
            clock: None,
            event_queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn next_event_time(&self) -> Option<u64> {
        self.event_queue.peek().map(|e| e.time)
    }

    pub fn push(&mut self, time: u64, signal: SignalRef, next_val: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.event_queue.push(SimEvent {
            time,
            signal,
            next_val,
            seq,
        });
    }

    /// Drops every pending clock edge, e.g. when the clock is redefined.
    pub fn cancel_clock(&mut self) {
        self.event_queue.retain(|ev| !ev.is_clock());
    }

    pub fn pop_all_at_next_time(&mut self) -> Option<(u64, Vec<SimEvent>)> {
        let next_time = self.next_event_time()?;
        let mut events = Vec::new();
        while let Some(ev) = self.event_queue.peek_mut() {
            if ev.time != next_time {
                break;
            }
            events.push(PeekMut::pop(ev));
        }
        Some((next_time, events))
    }
}
