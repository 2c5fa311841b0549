#![no_main]
use libfuzzer_sys::fuzz_target;
use oxicmp::{ByteSource, CompareOptions, Fill, compare};
use std::io;

/// Chunk sizes are drawn from a byte schedule; zero means an empty read.
struct Scripted<'a> {
    data: &'a [u8],
    script: &'a [u8],
    step: usize,
}

impl ByteSource for Scripted<'_> {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        if self.data.is_empty() {
            return Ok(Fill::last(0));
        }
        let want = match self.script.get(self.step) {
            Some(&b) => b as usize,
            None => usize::MAX,
        };
        self.step += 1;
        let n = want.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(Fill::more(n))
    }
}

fuzz_target!(|data: &[u8]| {
    // Layout: [cap1, cap2, script_len, script..., payload]. The payload is
    // halved into two inputs; the verdict must match slice equality
    // whatever the chunking.
    if data.len() < 4 {
        return;
    }
    let cap1 = data[0] as usize + 1;
    let cap2 = data[1] as usize + 1;
    let script_len = (data[2] as usize).min(data.len() - 3);
    let (script, rest) = data[3..].split_at(script_len);
    let (a, b) = rest.split_at(rest.len() / 2);

    let opts = CompareOptions {
        first_capacity: cap1,
        second_capacity: cap2,
        max_zero_reads: u32::MAX,
    };
    let mut s1 = Scripted {
        data: a,
        script,
        step: 0,
    };
    let mut s2 = Scripted {
        data: a,
        script: b,
        step: 0,
    };
    assert!(compare(&opts, &mut s1, &mut s2).unwrap());

    let mut s1 = Scripted {
        data: a,
        script,
        step: 0,
    };
    let mut plain = b;
    assert_eq!(compare(&opts, &mut s1, &mut plain).unwrap(), a == b);
});
