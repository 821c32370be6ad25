use xxhash_rust::xxh3::Xxh3;

use crate::eval::resolver::ResolvedFrameState;

const XXH3_SEED: u64 = 0x5c0d_eca5_7e11_a9b3;

/// Stable 128-bit digest of resolved display state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FrameFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Fingerprint one frame's state, frame index included.
///
/// Equal across processes and machines for equal inputs; float fields are hashed by bit pattern.
pub fn fingerprint_state(state: &ResolvedFrameState<'_>) -> FrameFingerprint {
    let mut h = StableHasher::new();
    write_state(&mut h, state);
    h.finish()
}

/// Order-sensitive digest over a sequence of frame states.
pub fn fingerprint_sequence<'a, 't: 'a>(
    states: impl IntoIterator<Item = &'a ResolvedFrameState<'t>>,
) -> FrameFingerprint {
    let mut h = StableHasher::new();
    let mut n = 0u64;
    for st in states {
        let fp = fingerprint_state(st);
        h.write_u64(fp.hi);
        h.write_u64(fp.lo);
        n += 1;
    }
    h.write_u64(n);
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_state(h: &mut StableHasher, st: &ResolvedFrameState<'_>) {
    h.write_u64(st.frame.0);
    match st.action_index {
        Some(i) => {
            h.write_u8(1);
            h.write_u64(i as u64);
        }
        None => h.write_u8(0),
    }
    if let Some(action) = st.active_action {
        h.write_str(&action.file);
        h.write_str(action.kind.label());
    }
    h.write_str(st.revealed_content);
    h.write_bool(st.cursor_visible);
    h.write_f64(st.breathing_scale);
    h.write_u64(st.terminal_lines.len() as u64);
}

#[cfg(test)]
#[path = "../../tests/unit/render/fingerprint.rs"]
mod tests;
