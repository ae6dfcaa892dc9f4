//! Test doubles shared by the TUI tests.

use std::sync::{Arc, Mutex};

use crate::core::persistence::Theme;
use crate::core::speech::{Speaker, SpeechError};

use super::app::App;

#[derive(Default)]
pub(crate) struct SpeakerLog {
    pub spoken: Vec<String>,
    pub speaking: bool,
    pub stops: usize,
}

/// Records utterances instead of running a TTS command.
#[derive(Clone, Default)]
pub(crate) struct FakeSpeaker {
    pub log: Arc<Mutex<SpeakerLog>>,
}

impl Speaker for FakeSpeaker {
    fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        let mut log = self.log.lock().unwrap();
        log.spoken.push(text.to_string());
        log.speaking = true;
        Ok(())
    }

    fn stop(&mut self) {
        let mut log = self.log.lock().unwrap();
        if log.speaking {
            log.stops += 1;
        }
        log.speaking = false;
    }

    fn is_speaking(&mut self) -> bool {
        self.log.lock().unwrap().speaking
    }
}

/// App with a fake speaker, the dark theme, and Hindi selected.
pub(crate) fn test_app() -> (App, Arc<Mutex<SpeakerLog>>) {
    let speaker = FakeSpeaker::default();
    let log = Arc::clone(&speaker.log);
    let app = App::new(Theme::Dark, "hi-IN", "test-model".to_string(), Box::new(speaker));
    (app, log)
}
