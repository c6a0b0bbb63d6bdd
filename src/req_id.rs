//! Request ids for tracing a single insert through the server logs.
//!
//! Layout (high to low): 12 bits process hash, 12 bits pid,
//! 24 bits millisecond clock, 16 bits rolling serial.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use chrono::Utc;

static HASH_ID: LazyLock<u64> = LazyLock::new(|| u64::from(rand::random::<u32>()));
static SERIAL: AtomicU32 = AtomicU32::new(0);

pub fn generate() -> u64 {
    loop {
        let ts = Utc::now().timestamp_millis() as u64;
        let pid = u64::from(std::process::id());
        let val = SERIAL.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        if val >= 0xFFFF {
            SERIAL.store(0, Ordering::Relaxed);
        }

        let id = ((*HASH_ID & 0x0FFF) << 52)
            | ((pid & 0x0FFF) << 40)
            | ((ts & 0xFF_FFFF) << 16)
            | (u64::from(val) & 0xFFFF);
        if id != 0 {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_are_unique_and_nonzero() {
        let ids: HashSet<u64> = (0..1000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(!ids.contains(&0));
    }

    #[test]
    fn carries_pid_and_process_hash() {
        let id = generate();
        assert_eq!((id >> 40) & 0x0FFF, u64::from(std::process::id()) & 0x0FFF);
        assert_eq!(id >> 52, *HASH_ID & 0x0FFF);
    }
}
