// Purpose: Voice management and polyphony
// This layer sits between the instrument patches and the mixer's chains

pub mod factory;
pub mod poly;
pub mod voice;
