use super::Segment;

/// Lazy iterator closing a contiguous index range into a cycle of segments.
///
/// See [`round_trip`].
#[derive(Debug, Clone)]
pub struct RoundTrip {
    next: usize,
    start: usize,
    end: usize,
    done: bool,
}

/// Connects the contiguous index range `[start, end]` into a closed loop.
///
/// Emits `(i, i + 1)` for `i` from `start` to `end - 1`, then the closing
/// segment `(end, start)` — exactly `end - start + 1` segments in total,
/// visiting every index in the range once. Requires `start <= end`.
#[must_use]
pub fn round_trip(start: usize, end: usize) -> RoundTrip {
    debug_assert!(start <= end, "round_trip range reversed: {start} > {end}");
    RoundTrip {
        next: start,
        start,
        end,
        done: false,
    }
}

impl Iterator for RoundTrip {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.done {
            return None;
        }
        if self.next < self.end {
            let seg = Segment::new(self.next, self.next + 1);
            self.next += 1;
            Some(seg)
        } else {
            self.done = true;
            Some(Segment::new(self.end, self.start))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.done {
            0
        } else {
            self.end - self.next + 1
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RoundTrip {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn emits_one_segment_per_index() {
        assert_eq!(round_trip(0, 5).len(), 6);
        assert_eq!(round_trip(3, 9).len(), 7);
        assert_eq!(round_trip(4, 4).len(), 1);
    }

    #[test]
    fn last_segment_closes_the_loop() {
        let segs: Vec<_> = round_trip(2, 5).collect();
        assert_eq!(
            segs,
            vec![
                Segment::new(2, 3),
                Segment::new(3, 4),
                Segment::new(4, 5),
                Segment::new(5, 2),
            ]
        );
    }

    #[test]
    fn following_segments_visits_every_index_once() {
        let start = 7;
        let end = 19;
        let segs: Vec<_> = round_trip(start, end).collect();

        let mut visited = vec![false; end - start + 1];
        let mut current = start;
        for seg in &segs {
            assert_eq!(seg.start, current, "segments are not chained");
            assert!(!visited[seg.start - start], "index visited twice");
            visited[seg.start - start] = true;
            current = seg.end;
        }
        assert_eq!(current, start, "loop did not return to its start");
        assert!(visited.iter().all(|&v| v));
    }

    #[test]
    fn single_index_range_is_a_self_loop() {
        let segs: Vec<_> = round_trip(4, 4).collect();
        assert_eq!(segs, vec![Segment::new(4, 4)]);
    }
}
