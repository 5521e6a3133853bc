//! Chat prompts sent to the inference service

use crate::backend::{ChatMessage, InferenceRequest};

use super::payload::{HintRequest, WordsRequest};

/// Ask for `numOfWords` answer/clue pairs on a topic, as a bare JSON array
pub fn words_prompt(request: &WordsRequest) -> InferenceRequest {
    let system = format!(
        "You are a Professional Crossword Constructor who specializes in creating crosswords. \
         Your task is to generate words for a crossword with difficulty level - {}. \
         You must write the response in the following JSON format:\n\
         [\n  {{\"answer\": \"answer1\", \"clue\": \"clue1\"}},\n  {{\"answer\": \"answer2\", \"clue\": \"clue2\"}}\n].\n\
         Ensure the response is valid JSON and strictly follows this structure.",
        request.difficulty_level
    );
    let user = format!(
        "For the topic - {}, list {} words. Remember, the response must contain \"answer\" and \
         \"clue\" pairs in valid JSON format.",
        request.topic, request.num_of_words
    );

    InferenceRequest::new(vec![ChatMessage::system(system), ChatMessage::user(user)])
}

/// Ask whether the player's question relates to the hidden word, yes or no only
pub fn hint_prompt(request: &HintRequest) -> InferenceRequest {
    let system = "You are the judge in a crossword guessing game. The player asks a question \
                  about a hidden word. Reply with exactly one word: \"yes\" if the question \
                  relates to or correctly describes the word, otherwise \"no\". \
                  Do not explain your answer.";
    let user = format!(
        "Hidden word: {}\nQuestion: {}\nAnswer only yes or no.",
        request.input_word, request.input_question
    );

    InferenceRequest::new(vec![ChatMessage::system(system), ChatMessage::user(user)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Role;

    #[test]
    fn test_words_prompt_embeds_fields() {
        let request = WordsRequest {
            topic: "volcanoes".to_string(),
            num_of_words: "6".to_string(),
            difficulty_level: "medium".to_string(),
        };
        let prompt = words_prompt(&request);

        assert!(!prompt.stream);
        assert_eq!(prompt.messages.len(), 2);
        assert_eq!(prompt.messages[0].role, Role::System);
        assert!(prompt.messages[0].content.contains("difficulty level - medium"));
        assert!(prompt.messages[0].content.contains(r#"{"answer": "answer1", "clue": "clue1"}"#));
        assert_eq!(prompt.messages[1].role, Role::User);
        assert!(prompt.messages[1].content.contains("topic - volcanoes, list 6 words"));
    }

    #[test]
    fn test_hint_prompt_embeds_fields() {
        let request = HintRequest {
            input_word: "cat".to_string(),
            input_question: "Is it an animal?".to_string(),
        };
        let prompt = hint_prompt(&request);

        assert!(!prompt.stream);
        assert_eq!(prompt.messages[0].role, Role::System);
        assert!(prompt.messages[0].content.contains("\"yes\""));
        assert!(prompt.messages[1].content.contains("Hidden word: cat"));
        assert!(prompt.messages[1].content.contains("Question: Is it an animal?"));
    }
}
