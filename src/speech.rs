//! Fire-and-forget pronunciation
//!
//! The speech backend is an external command. Failures are logged and never
//! reported back to the caller.

use std::process::{Command, Stdio};

use crate::config::SpeechConfig;

/// Something that can read a term aloud
pub trait Speaker {
    fn speak(&self, term: &str);
}

/// Speaker used when no speech command is configured
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&self, term: &str) {
        log::debug!("Speech disabled, not speaking '{}'", term);
    }
}

/// Runs a configured command with the term as its last argument.
///
/// Arguments may use `{language}` and `{rate}` placeholders, e.g.
/// `espeak-ng -v {language}`.
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(command_line: &str, language: &str, rate: f32) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(|part| {
            part.replace("{language}", language)
                .replace("{rate}", &rate.to_string())
        });
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    fn command(&self, term: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(term)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, term: &str) {
        if let Err(e) = self.command(term).spawn() {
            log::warn!("Failed to run speech command '{}': {}", self.program, e);
        }
    }
}

/// Build the speaker described by the configuration
pub fn speaker_from_config(config: &SpeechConfig) -> Box<dyn Speaker> {
    config
        .command
        .as_deref()
        .and_then(|cmd| CommandSpeaker::new(cmd, &config.language, config.rate))
        .map(|s| Box::new(s) as Box<dyn Speaker>)
        .unwrap_or_else(|| Box::new(SilentSpeaker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_expanded() {
        let speaker = CommandSpeaker::new("espeak-ng -v {language} -r {rate}", "en-US", 0.9).unwrap();
        assert_eq!(speaker.program, "espeak-ng");
        assert_eq!(speaker.args, vec!["-v", "en-US", "-r", "0.9"]);

        let command = speaker.command("hello");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args.last().and_then(|a| a.to_str()), Some("hello"));
    }

    #[test]
    fn test_blank_command_disables_speech() {
        assert!(CommandSpeaker::new("   ", "en-US", 1.0).is_none());
    }

    #[test]
    fn test_missing_program_does_not_panic() {
        let speaker = CommandSpeaker::new("definitely-not-a-real-tts-binary", "en-US", 1.0).unwrap();
        speaker.speak("word");
        SilentSpeaker.speak("word");
    }
}
