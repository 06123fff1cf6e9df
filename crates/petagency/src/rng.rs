/// xorshift64* PRNG.
///
/// Fast and plenty good for cosmetic randomness (species picks, reply
/// choices, follow jitter). Not cryptographic. Seed it from `AGENCY_SEED`
/// for reproducible runs, or from entropy.
#[derive(Debug, Clone)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn from_seed(seed: u64) -> Self {
        let mut s = seed;
        if s == 0 {
            s = 0x9e3779b97f4a7c15;
        }
        Self { state: s }
    }

    pub fn from_entropy() -> Self {
        let mut b = [0u8; 8];
        getrandom::getrandom(&mut b).expect("getrandom");
        Self::from_seed(u64::from_be_bytes(b))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform pick. `None` only for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = (self.next_u64() % items.len() as u64) as usize;
        Some(&items[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_is_remapped() {
        let mut a = Rng64::from_seed(0);
        let mut b = Rng64::from_seed(0x9e3779b97f4a7c15);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn pick_handles_empty_and_singleton() {
        let mut rng = Rng64::from_seed(42);
        let empty: [u8; 0] = [];
        assert_eq!(rng.pick(&empty), None);
        assert_eq!(rng.pick(&[7u8]), Some(&7));
    }

    #[test]
    fn pick_eventually_covers_all_items() {
        let mut rng = Rng64::from_seed(3);
        let items = [0usize, 1, 2, 3];
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[*rng.pick(&items).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
