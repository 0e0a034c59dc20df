//! Voice bookkeeping: the looping pool, its key registry, and the one-shot voice.

mod looping;
mod one_shot;
mod pool;
mod voice;

pub use looping::LoopingSoundRegistry;
pub use one_shot::OneShotChannel;
pub use pool::VoicePool;
pub use voice::{
    validate_loop_priority, validate_volume, Voice, VoiceId, DEFAULT_VOLUME, LOOP_BASE_PRIORITY,
    MAX_PRIORITY, ONE_SHOT_PRIORITY,
};
