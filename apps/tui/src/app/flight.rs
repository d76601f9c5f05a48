use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use tracing::debug;

use crate::app::selection::Selection;
use crate::domain::Coordinate;

pub const FLIGHT_TIME: Duration = Duration::from_millis(1000);
pub const ARC_REL_LEN: f64 = 0.4;

/// Handle for one emitted arc or ring. Never reused, so two effects with the
/// same coordinates are still told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightArc {
    pub id: EffectId,
    pub start: Coordinate,
    pub end: Coordinate,
    pub emitted_at: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseRing {
    pub id: EffectId,
    pub at: Coordinate,
    pub emitted_at: Duration,
}

/// Timing knobs for a flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightTiming {
    pub flight_time: Duration,
    /// Fraction of the flight time a ring stays alive.
    pub arc_rel_len: f64,
}

impl Default for FlightTiming {
    fn default() -> Self {
        Self {
            flight_time: FLIGHT_TIME,
            arc_rel_len: ARC_REL_LEN,
        }
    }
}

impl FlightTiming {
    pub fn arc_lifetime(&self) -> Duration {
        self.flight_time * 2
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn ring_lifetime(&self) -> Duration {
        // Rounded to whole milliseconds so 1000 * 0.4 is exactly 400ms
        let millis = (self.flight_time.as_millis() as f64 * self.arc_rel_len).round();
        Duration::from_millis(millis.max(0.0) as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Deferred {
    RemoveArc(EffectId),
    RemoveRing(EffectId),
    EmitRing(Coordinate),
}

#[derive(Debug)]
struct Scheduled {
    due: Duration,
    seq: u64,
    task: Deferred,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so the BinaryHeap pops the earliest task, ties in scheduling order
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Owns the live arcs and rings and the timers that retire them.
///
/// Time is passed in as an offset from application start. Nothing here sleeps:
/// `trigger` records effects and deferred work, `advance` runs whatever has come
/// due. Removal is by [`EffectId`] and is a no-op for effects already gone.
#[derive(Debug, Default)]
pub struct FlightScheduler {
    timing: FlightTiming,
    arcs: Vec<FlightArc>,
    rings: Vec<PulseRing>,
    queue: BinaryHeap<Scheduled>,
    next_id: u64,
    next_seq: u64,
}

impl FlightScheduler {
    pub fn new(timing: FlightTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    pub const fn timing(&self) -> FlightTiming {
        self.timing
    }

    pub fn arcs(&self) -> &[FlightArc] {
        &self.arcs
    }

    pub fn rings(&self) -> &[PulseRing] {
        &self.rings
    }

    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    /// Launch a flight from the selection's last coordinate to `destination`.
    ///
    /// The selection's last coordinate moves to `destination` before this
    /// returns, so a second trigger chains from here.
    pub fn trigger(
        &mut self,
        selection: &mut Selection,
        destination: Coordinate,
        now: Duration,
    ) -> EffectId {
        let start = selection.last_coordinate();
        selection.set_last_coordinate(destination);

        let arc_id = self.allocate_id();
        self.arcs.push(FlightArc {
            id: arc_id,
            start,
            end: destination,
            emitted_at: now,
        });
        self.schedule(now + self.timing.arc_lifetime(), Deferred::RemoveArc(arc_id));

        self.emit_ring(start, now);
        self.schedule(now + self.timing.flight_time, Deferred::EmitRing(destination));

        debug!(
            from_lat = start.lat,
            from_lng = start.lng,
            to_lat = destination.lat,
            to_lng = destination.lng,
            "flight triggered"
        );
        arc_id
    }

    /// Run every deferred task due at or before `now`, in due order.
    pub fn advance(&mut self, now: Duration) {
        while self.queue.peek().is_some_and(|next| next.due <= now) {
            let Some(Scheduled { due, task, .. }) = self.queue.pop() else {
                break;
            };
            match task {
                Deferred::RemoveArc(id) => self.remove_arc(id),
                Deferred::RemoveRing(id) => self.remove_ring(id),
                // Stamped with its due time so a late tick does not stretch its life
                Deferred::EmitRing(at) => {
                    self.emit_ring(at, due);
                }
            }
        }
    }

    pub fn remove_arc(&mut self, id: EffectId) {
        self.arcs.retain(|arc| arc.id != id);
    }

    pub fn remove_ring(&mut self, id: EffectId) {
        self.rings.retain(|ring| ring.id != id);
    }

    fn emit_ring(&mut self, at: Coordinate, now: Duration) -> EffectId {
        let id = self.allocate_id();
        self.rings.push(PulseRing {
            id,
            at,
            emitted_at: now,
        });
        self.schedule(now + self.timing.ring_lifetime(), Deferred::RemoveRing(id));
        id
    }

    fn schedule(&mut self, due: Duration, task: Deferred) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled { due, seq, task });
    }

    fn allocate_id(&mut self) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: Coordinate = Coordinate::new(48.8566, 2.3522);
    const TOKYO: Coordinate = Coordinate::new(35.6895, 139.6917);
    const SYDNEY: Coordinate = Coordinate::new(-33.8688, 151.2093);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn ring_positions(scheduler: &FlightScheduler) -> Vec<Coordinate> {
        scheduler.rings().iter().map(|ring| ring.at).collect()
    }

    #[test]
    fn first_flight_departs_from_origin() {
        let mut selection = Selection::default();
        let mut scheduler = FlightScheduler::default();

        scheduler.trigger(&mut selection, PARIS, ms(0));

        assert_eq!(scheduler.arcs().len(), 1);
        assert_eq!(scheduler.arcs()[0].start, Coordinate::ORIGIN);
        assert_eq!(scheduler.arcs()[0].end, PARIS);
        assert_eq!(ring_positions(&scheduler), vec![Coordinate::ORIGIN]);
    }

    #[test]
    fn last_coordinate_moves_before_animation_finishes() {
        let mut selection = Selection::default();
        let mut scheduler = FlightScheduler::default();

        scheduler.trigger(&mut selection, PARIS, ms(0));
        assert_eq!(selection.last_coordinate(), PARIS);

        scheduler.trigger(&mut selection, TOKYO, ms(10));
        assert_eq!(selection.last_coordinate(), TOKYO);
        assert_eq!(scheduler.arcs()[1].start, PARIS);
        assert_eq!(scheduler.arcs()[1].end, TOKYO);
    }

    #[test]
    fn flight_timeline_matches_lifetimes() {
        let mut selection = Selection::default();
        let mut scheduler = FlightScheduler::default();
        scheduler.trigger(&mut selection, PARIS, ms(0));

        scheduler.advance(ms(399));
        assert_eq!(ring_positions(&scheduler), vec![Coordinate::ORIGIN]);

        scheduler.advance(ms(400));
        assert!(scheduler.rings().is_empty());

        scheduler.advance(ms(999));
        assert!(scheduler.rings().is_empty());

        scheduler.advance(ms(1000));
        assert_eq!(ring_positions(&scheduler), vec![PARIS]);

        scheduler.advance(ms(1399));
        assert_eq!(scheduler.rings().len(), 1);

        scheduler.advance(ms(1400));
        assert!(scheduler.rings().is_empty());
        assert_eq!(scheduler.arcs().len(), 1);

        scheduler.advance(ms(1999));
        assert_eq!(scheduler.arcs().len(), 1);

        scheduler.advance(ms(2000));
        assert!(scheduler.arcs().is_empty());
        assert_eq!(scheduler.pending_tasks(), 0);
    }

    #[test]
    fn late_tick_runs_chained_work_in_one_pass() {
        let mut selection = Selection::default();
        let mut scheduler = FlightScheduler::default();
        scheduler.trigger(&mut selection, PARIS, ms(0));

        // The arrival ring is emitted and retired within the same advance
        scheduler.advance(ms(5000));
        assert!(scheduler.arcs().is_empty());
        assert!(scheduler.rings().is_empty());
        assert_eq!(scheduler.pending_tasks(), 0);
    }

    #[test]
    fn duplicate_flights_keep_independent_lifetimes() {
        let mut selection = Selection::default();
        let mut scheduler = FlightScheduler::default();

        // Paris -> Tokyo twice, the second leg starting half a flight later
        selection.set_last_coordinate(PARIS);
        let first = scheduler.trigger(&mut selection, TOKYO, ms(0));
        selection.set_last_coordinate(PARIS);
        let second = scheduler.trigger(&mut selection, TOKYO, ms(500));
        assert_ne!(first, second);

        scheduler.advance(ms(2000));
        assert_eq!(scheduler.arcs().len(), 1);
        assert_eq!(scheduler.arcs()[0].id, second);

        scheduler.advance(ms(2500));
        assert!(scheduler.arcs().is_empty());
    }

    #[test]
    fn removal_is_idempotent() {
        let mut selection = Selection::default();
        let mut scheduler = FlightScheduler::default();
        let arc = scheduler.trigger(&mut selection, PARIS, ms(0));

        scheduler.remove_arc(arc);
        scheduler.remove_arc(arc);
        assert!(scheduler.arcs().is_empty());

        scheduler.advance(ms(3000));
        assert!(scheduler.arcs().is_empty());
    }

    #[test]
    fn live_counts_follow_click_windows() {
        let mut selection = Selection::default();
        let mut scheduler = FlightScheduler::default();
        let timing = scheduler.timing();
        let clicks = [0_u64, 150, 700, 1100, 1150, 2600, 2900];
        let destinations = [PARIS, TOKYO, SYDNEY, PARIS, PARIS, TOKYO, SYDNEY];

        let mut next_click = 0;
        for now in (0..=6000_u64).step_by(50) {
            while next_click < clicks.len() && clicks[next_click] <= now {
                scheduler.advance(ms(clicks[next_click]));
                scheduler.trigger(&mut selection, destinations[next_click], ms(clicks[next_click]));
                next_click += 1;
            }
            scheduler.advance(ms(now));

            let fired = &clicks[..next_click];
            let arc_window = timing.arc_lifetime();
            let ring_window = timing.ring_lifetime();
            let live_arcs = fired.iter().filter(|&&t| ms(now) < ms(t) + arc_window).count();
            let departure_rings = fired
                .iter()
                .filter(|&&t| ms(now) < ms(t) + ring_window)
                .count();
            let arrival_rings = fired
                .iter()
                .filter(|&&t| {
                    let arrival = ms(t) + timing.flight_time;
                    arrival <= ms(now) && ms(now) < arrival + ring_window
                })
                .count();

            assert_eq!(scheduler.arcs().len(), live_arcs, "arcs at {now}ms");
            assert_eq!(
                scheduler.rings().len(),
                departure_rings + arrival_rings,
                "rings at {now}ms"
            );
        }
    }

    #[test]
    fn ring_lifetime_is_a_fraction_of_flight_time() {
        let timing = FlightTiming {
            flight_time: ms(1500),
            arc_rel_len: 0.25,
        };
        assert_eq!(timing.ring_lifetime(), ms(375));
        assert_eq!(timing.arc_lifetime(), ms(3000));
    }
}
