//! Recording domain module

mod audio_data;
mod descriptor;

pub use audio_data::{AudioData, AudioMimeType};
pub use descriptor::RecordingDescriptor;
