//! Reading answers aloud through an external text-to-speech command.
//!
//! The text is written to the command's stdin, so answers starting with "- " are never
//! mistaken for options. Only one utterance plays at a time.

use std::io::{self, Write};
use std::process::{Child, Command, ExitStatus, Stdio};

/// Errors from starting or running the text-to-speech command.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("text-to-speech command is empty")]
    EmptyCommand,
    #[error("could not start '{program}' (set EXPLORE_TTS_COMMAND to a working command): {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("'{program}' exited with {status}")]
    Failed { program: String, status: ExitStatus },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Something that can read text aloud.
pub trait Speaker: Send {
    /// Start speaking `text`, stopping any utterance in progress.
    fn speak(&mut self, text: &str) -> Result<(), SpeechError>;
    /// Stop speaking. No-op when idle.
    fn stop(&mut self);
    /// True while an utterance is playing.
    fn is_speaking(&mut self) -> bool;
}

/// Platform default: `say` on macOS, `espeak-ng` elsewhere.
pub fn default_command() -> Vec<String> {
    if cfg!(target_os = "macos") {
        vec!["say".to_string()]
    } else {
        vec!["espeak-ng".to_string()]
    }
}

/// Speaker backed by a child process per utterance.
pub struct CommandSpeaker {
    command: Vec<String>,
    child: Option<Child>,
}

impl CommandSpeaker {
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            child: None,
        }
    }

    /// Use the configured command, or the platform default.
    pub fn from_config(command: Option<&[String]>) -> Self {
        Self::new(command.map(<[String]>::to_vec).unwrap_or_else(default_command))
    }

    fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or("")
    }

    /// Block until the current utterance finishes.
    pub fn wait(&mut self) -> Result<(), SpeechError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Failed {
                program: self.program().to_string(),
                status,
            })
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        self.stop();
        let (program, args) = self.command.split_first().ok_or(SpeechError::EmptyCommand)?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: program.clone(),
                source,
            })?;
        log::info!("Speaking {} chars with {}", text.len(), program);
        if let Some(mut stdin) = child.stdin.take() {
            let text = text.to_string();
            // Long answers can exceed the pipe buffer; do not block the caller on it.
            std::thread::spawn(move || {
                if let Err(e) = stdin.write_all(text.as_bytes()) {
                    log::debug!("TTS stdin closed early: {}", e);
                }
            });
        }
        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Ok(None) = child.try_wait() {
                log::info!("Stopping speech");
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }

    fn is_speaking(&mut self) -> bool {
        match self.child.as_mut().map(|c| c.try_wait()) {
            Some(Ok(None)) => true,
            Some(_) => {
                self.child = None;
                false
            }
            None => false,
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_command_is_rejected() {
        let mut speaker = CommandSpeaker::new(Vec::new());
        assert!(matches!(speaker.speak("hi"), Err(SpeechError::EmptyCommand)));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let mut speaker = CommandSpeaker::new(cmd(&["explore-no-such-tts-binary"]));
        match speaker.speak("hi") {
            Err(SpeechError::Spawn { program, .. }) => {
                assert_eq!(program, "explore-no-such-tts-binary")
            }
            other => panic!("expected Spawn error, got {:?}", other.err()),
        }
        assert!(!speaker.is_speaking());
    }

    #[test]
    fn from_config_falls_back_to_default() {
        let speaker = CommandSpeaker::from_config(None);
        assert_eq!(speaker.command, default_command());
        let custom = cmd(&["spd-say", "-e"]);
        let speaker = CommandSpeaker::from_config(Some(custom.as_slice()));
        assert_eq!(speaker.command, custom);
    }

    #[cfg(unix)]
    #[test]
    fn speak_then_wait_reads_stdin() {
        let mut speaker = CommandSpeaker::new(cmd(&["cat"]));
        speaker.speak("- Step 1: read the question").unwrap();
        speaker.wait().unwrap();
        assert!(!speaker.is_speaking());
    }

    #[cfg(unix)]
    #[test]
    fn stop_ends_a_long_utterance() {
        let mut speaker = CommandSpeaker::new(cmd(&["sleep", "30"]));
        speaker.speak("ignored").unwrap();
        assert!(speaker.is_speaking());
        speaker.stop();
        assert!(!speaker.is_speaking());
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_is_reported_on_wait() {
        let mut speaker = CommandSpeaker::new(cmd(&["false"]));
        speaker.speak("x").unwrap();
        assert!(matches!(speaker.wait(), Err(SpeechError::Failed { .. })));
    }
}
