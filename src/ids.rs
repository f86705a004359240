use rand::{RngCore, SeedableRng, rngs::StdRng};
use uuid::{Builder, Uuid};

/// Source of fresh entity identifiers for the mutation engine.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// Random uuid-v4 identifiers.
#[derive(Default)]
pub struct RandomIds {
    rng: Option<StdRng>,
}

impl RandomIds {
    pub fn new() -> Self {
        Self { rng: None }
    }

    /// Reproducible sequence, for benches and tests that only need distinct ids.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        let uuid = match self.rng.as_mut() {
            Some(rng) => {
                let mut bytes = [0u8; 16];
                rng.fill_bytes(&mut bytes);
                Builder::from_random_bytes(bytes).into_uuid()
            }
            None => Uuid::new_v4(),
        };
        uuid.to_string()
    }
}

/// Deterministic `prefix1`, `prefix2`, ... identifiers.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_v4_uuids() {
        let mut ids = RandomIds::new();
        let id = ids.next_id();
        let parsed = Uuid::parse_str(&id).expect("uuid");
        assert_eq!(parsed.get_version_num(), 4);
        assert_ne!(id, ids.next_id());
    }

    #[test]
    fn seeded_ids_repeat_per_seed() {
        let mut first = RandomIds::seeded(7);
        let mut second = RandomIds::seeded(7);
        let id = first.next_id();
        assert_eq!(id, second.next_id());
        assert_eq!(Uuid::parse_str(&id).expect("uuid").get_version_num(), 4);
        assert_ne!(id, first.next_id());
    }

    #[test]
    fn sequential_ids_count_up_from_one() {
        let mut ids = SequentialIds::new("u");
        assert_eq!(ids.next_id(), "u1");
        assert_eq!(ids.next_id(), "u2");
    }
}
