//! Audio playback and export

pub mod export;
pub mod player;
pub mod rodio_player;

pub use export::{batch_file_name, save_all, save_audio, with_default_extension, SaveReport};
pub use player::{PlaybackToken, Player};
pub use rodio_player::RodioPlayer;
