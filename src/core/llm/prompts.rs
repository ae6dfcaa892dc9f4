//! Prompts sent to the model.

use crate::core::languages::SpeechLanguage;

/// Instruction sent with every image. The answer format feeds `solution::split`.
pub(super) const IMAGE_PROMPT: &str = "\
You are a helpful assistant. Analyze the provided image data and:
1. Provide a meaningful and concise title describing the main academic topic, question, or content in the image.
2. Provide a detailed step-by-step explanation of the problem or question, if applicable.
Use this format for your response:
---
Title: <A meaningful title summarizing the content>
Solution:
<Detailed step-by-step explanation>
---";

pub(super) fn doubt_prompt(question: &str) -> String {
    format!(
        "You are a helpful teaching assistant. Please provide a clear, step-by-step solution to this academic question: {}",
        question
    )
}

pub(super) fn transcription_prompt(language: &SpeechLanguage) -> String {
    format!(
        "Transcribe the spoken question in this audio clip. The speaker is using {} ({}). \
         Reply with the transcript only, in the language spoken, without translation or commentary. \
         If there is no intelligible speech, reply with nothing.",
        language.name, language.code
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_prompt_asks_for_markers() {
        assert!(IMAGE_PROMPT.contains("Title:"));
        assert!(IMAGE_PROMPT.contains("Solution:"));
    }

    #[test]
    fn doubt_prompt_appends_question() {
        assert!(doubt_prompt("What is 2+2?").ends_with("academic question: What is 2+2?"));
    }

    #[test]
    fn transcription_prompt_names_language() {
        let lang = SpeechLanguage {
            code: "bn-IN".to_string(),
            name: "Bengali".to_string(),
        };
        let prompt = transcription_prompt(&lang);
        assert!(prompt.contains("Bengali (bn-IN)"));
    }
}
