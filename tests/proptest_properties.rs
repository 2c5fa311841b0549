use std::io;

use oxicmp::{ByteSource, CompareOptions, Fill, Mismatch, compare_report};
use proptest::prelude::*;

/// Replays `data` using a schedule of chunk sizes; the last entry repeats
/// once the schedule runs out. A zero produces an empty non-terminal read.
struct Scheduled {
    data: Vec<u8>,
    pos: usize,
    schedule: Vec<usize>,
    step: usize,
}

impl Scheduled {
    fn new(data: Vec<u8>, schedule: Vec<usize>) -> Self {
        Self {
            data,
            pos: 0,
            schedule,
            step: 0,
        }
    }
}

impl ByteSource for Scheduled {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        let left = self.data.len() - self.pos;
        if left == 0 {
            return Ok(Fill::last(0));
        }
        let last = self.schedule.len() - 1;
        let want = self.schedule[self.step.min(last)];
        self.step += 1;
        let n = want.min(buf.len()).min(left);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(Fill::more(n))
    }
}

fn expected(a: &[u8], b: &[u8]) -> Option<Mismatch> {
    let common = a.len().min(b.len());
    if let Some(i) = a[..common].iter().zip(&b[..common]).position(|(x, y)| x != y) {
        return Some(Mismatch::Content { offset: i as u64 });
    }
    None
}

proptest! {
    #[test]
    fn prop_verdict_matches_slice_equality(
        a in proptest::collection::vec(any::<u8>(), 0..512),
        b in proptest::collection::vec(any::<u8>(), 0..512),
        cap1 in 1usize..64,
        cap2 in 1usize..64,
        sched1 in proptest::collection::vec(1usize..80, 1..8),
        sched2 in proptest::collection::vec(1usize..80, 1..8),
    ) {
        let opts = CompareOptions { first_capacity: cap1, second_capacity: cap2, max_zero_reads: 0 };
        let r = compare_report(
            &opts,
            &mut Scheduled::new(a.clone(), sched1),
            &mut Scheduled::new(b.clone(), sched2),
        ).unwrap();
        prop_assert_eq!(r.equal, a == b);
        if let Some(content) = expected(&a, &b) {
            prop_assert_eq!(r.mismatch, Some(content));
        } else if a.len() != b.len() {
            let is_length = matches!(r.mismatch, Some(Mismatch::Length { .. }));
            prop_assert!(is_length);
        }
    }

    #[test]
    fn prop_chunking_does_not_change_equal_verdict(
        data in proptest::collection::vec(any::<u8>(), 0..2048),
        cap1 in 1usize..128,
        cap2 in 1usize..128,
        sched1 in proptest::collection::vec(1usize..200, 1..16),
        sched2 in proptest::collection::vec(1usize..200, 1..16),
    ) {
        let opts = CompareOptions { first_capacity: cap1, second_capacity: cap2, max_zero_reads: 0 };
        let r = compare_report(
            &opts,
            &mut Scheduled::new(data.clone(), sched1),
            &mut Scheduled::new(data.clone(), sched2),
        ).unwrap();
        prop_assert!(r.equal);
        prop_assert_eq!(r.first_read, data.len() as u64);
        prop_assert_eq!(r.second_read, data.len() as u64);
    }

    #[test]
    fn prop_stalls_within_budget_are_tolerated(
        data in proptest::collection::vec(any::<u8>(), 1..256),
        stalls in 0usize..4,
        cap in 1usize..32,
    ) {
        let mut schedule = vec![0usize; stalls];
        schedule.push(usize::MAX);
        let opts = CompareOptions::with_capacity(cap).max_zero_reads(stalls as u32);
        let mut stalling = Scheduled::new(data.clone(), schedule);
        let mut plain: &[u8] = &data;
        let r = compare_report(&opts, &mut stalling, &mut plain).unwrap();
        prop_assert!(r.equal);
    }
}
