use super::engine::{release, Engine};
use crate::core::EngineError;
use crate::procedural::NoiseGenerator;
use crate::resource::Handle;

impl Engine {
    /// Creates an OpenSimplex generator. Needs no window or GPU.
    pub fn create_noise(&mut self, seed: i64) -> Handle<NoiseGenerator> {
        let handle = self.noises.insert(NoiseGenerator::new(seed));
        log::debug!("created {handle:?} with seed {seed}");
        handle
    }

    /// Samples 2D noise at integer coordinates. `None` when the handle is stale.
    pub fn get_noise(&self, noise: &Handle<NoiseGenerator>, x: i64, y: i64) -> Option<f32> {
        self.noises.get(noise).map(|n| n.sample(x, y))
    }

    pub fn delete_noise(&mut self, handle: Handle<NoiseGenerator>) -> Result<(), EngineError> {
        release(&mut self.noises, handle).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_lifecycle() {
        let mut engine = Engine::default();
        let noise = engine.create_noise(7);

        let first = engine.get_noise(&noise, 12, 34);
        assert!(first.is_some());
        assert_eq!(engine.get_noise(&noise, 12, 34), first);

        let key = noise.key();
        engine.delete_noise(noise).unwrap();
        assert!(engine.get_noise(&Handle::forge(key), 12, 34).is_none());
    }

    #[test]
    fn deleting_twice_through_a_stale_key_fails() {
        let mut engine = Engine::default();
        let noise = engine.create_noise(1);
        let key = noise.key();
        engine.delete_noise(noise).unwrap();

        let err = engine.delete_noise(Handle::forge(key)).unwrap_err();
        assert!(matches!(err, EngineError::StaleHandle(_)));
    }
}
