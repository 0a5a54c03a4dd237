//! Audio capabilities: text-to-speech and transcription.

pub mod media;
pub mod speech;
pub mod transcription;

pub use media::AudioInput;
pub use speech::generate_speech;
pub use transcription::transcribe;
