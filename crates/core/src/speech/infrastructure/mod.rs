pub mod google_speech_client;
mod wire;
