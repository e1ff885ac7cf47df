use bevy::prelude::*;

/// Source of randomness for the session.
///
/// The session never owns its generator, every random operation borrows one, so tests can
/// script exact draws while the game runs on [`fastrand`].
pub trait Dice {
    /// uniform draw in `0..n`
    fn below(&mut self, n: usize) -> usize;
    /// fair coin flip
    fn coin(&mut self) -> bool;
}

impl Dice for fastrand::Rng {
    fn below(&mut self, n: usize) -> usize {
        self.usize(..n)
    }

    fn coin(&mut self) -> bool {
        self.bool()
    }
}

/// Unseeded generator used by the running game.
#[derive(Resource, Debug)]
pub struct GameDice(pub fastrand::Rng);

impl Default for GameDice {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fastrand_draws_stay_in_range() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let n = rng.below(5);
            assert!(n < 5);
            seen[n] = true;
        }
        assert!(seen.iter().all(|s| *s));

        let heads = (0..1000).filter(|_| rng.coin()).count();
        assert!((300..700).contains(&heads));
    }
}
