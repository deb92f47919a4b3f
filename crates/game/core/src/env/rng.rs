//! RNG oracle for deterministic random number generation.
//!
//! Dice rolls for base damage, initiative rolls for enemies, and enemy target
//! selection all go through [`RngOracle`]. Implementations must be
//! deterministic: the same seed always yields the same value, which makes an
//! encounter fully reproducible from its game seed and command sequence.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (self.next_u32(seed) % sides) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: every call derives its output from the supplied seed alone, so
/// the encounter only needs to persist its game seed and command nonce.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Context values separating independent rolls made by the same actor
/// within one command.
pub mod context {
    /// Initiative roll while seeding an encounter.
    pub const INITIATIVE: u32 = 0;
    /// Enemy choosing which player to strike.
    pub const ENEMY_TARGET: u32 = 1;
    /// First base-damage die; die `i` uses `DAMAGE_DICE + i`.
    pub const DAMAGE_DICE: u32 = 0x100;
    /// First die of the second set rolled under disadvantage.
    pub const DISADVANTAGE_DICE: u32 = 0x1000;
}

/// Compute deterministic seed from encounter state components.
///
/// # Arguments
///
/// * `game_seed` - Base seed set at encounter start
/// * `nonce` - Command sequence number (increments each executed command)
/// * `actor_id` - Entity making the roll
/// * `context` - One of the [`context`] values, distinguishing rolls in the same command
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = game_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
