pub mod chatterbox_model;
pub mod speech_model;

pub use chatterbox_model::ChatterboxModel;
pub use speech_model::{ModelHandle, SpeechModel};
