use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// A fixed layout generates itself, ignoring the requested config.
impl MinefieldGenerator for MineLayout {
    fn generate(self, _config: GameConfig) -> MineLayout {
        self
    }
}
