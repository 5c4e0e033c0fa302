//! Prompt templates for the two AI integration points.
//!
//! Both the refinement dialogue and PRD generation build their system
//! framing here, so persona, round counter, and tuning values live in one
//! place. The dialogue prompts are Danish, matching the product's audience;
//! the PRD framing is the English instruction the product has always used.

use crate::domain::conversation::{ChatMessage, Transcript, MAX_ROUNDS};

/// Sampling temperature for refinement chat turns.
pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Token budget for a single assistant chat reply. Kept low so answers stay
/// at the 2-3 sentence length the persona demands.
pub const CHAT_MAX_TOKENS: u32 = 300;

/// Sampling temperature for PRD generation.
pub const PRD_TEMPERATURE: f32 = 0.6;

/// Token budget for a generated PRD.
pub const PRD_MAX_TOKENS: u32 = 800;

/// Text recorded for a submitter turn that carries attachments but no text.
pub const ATTACHMENT_ONLY_PLACEHOLDER: &str = "Vedhæftede filer til gennemgang";

/// System prompt for the PRD generator.
pub const PRD_SYSTEM_PROMPT: &str =
    "You are an expert product manager writing a concise product requirements document (PRD).";

/// System prompt for a refinement turn, parameterized by the current round.
///
/// `round` is the round the submitter is currently asking, counted from 1.
pub fn refinement_system_prompt(round: usize) -> String {
    format!(
        "Du er en venlig AI-assistent der hjælper brugere med at forbedre deres \
forretningsforslag. Dit mål er at holde samtalen kort og fokuseret - maksimalt 3-5 spørgsmål.

Nuværende samtale runde: {round}/{max_rounds}

Retningslinjer baseret på samtale runde:

Runde 1-2: Stil 1-2 korte, fokuserede spørgsmål for at forstå kerneidéen bedre
- Hvad er hovedproblemet der skal løses?
- Hvem vil have gavn af dette?

Runde 3-4: Hjælp med at forfine og uddybe idéen
- Hvordan kan idéen implementeres?
- Hvilke ressourcer skal der til?

Runde 5: Opsummer og afslut samtalen
- Giv en kort opsummering af den forbedrede idé
- Foreslå at idéen er klar til indsendelse

VIGTIGE REGLER:
- Hold svar korte (max 2-3 sætninger)
- Stil kun ÉT spørgsmål ad gangen
- Undgå tekniske termer
- Vær opmuntrende og konstruktiv
- Efter runde 5: Opsummer altid og foreslå indsendelse",
        round = round,
        max_rounds = MAX_ROUNDS,
    )
}

/// User instruction asking the assistant to open a conversation with a
/// personalized greeting for the given suggestion.
pub fn greeting_instruction(title: &str, description: &str) -> String {
    format!(
        "En medarbejder vil gerne arbejde med idéen \"{title}\". Beskrivelse: {description}\n\n\
Byd velkommen med en kort, personlig hilsen og stil ét åbningsspørgsmål om, \
hvilket problem idéen skal løse.",
    )
}

/// Fixed greeting used when the AI collaborator cannot produce one.
pub fn fallback_greeting(title: &str, description: &str) -> String {
    format!(
        "Hej! Jeg kan se, at du gerne vil arbejde med: \"{title}\". {description}\n\n\
Lad os sammen udvikle idéen uden svære fagudtryk. Husk, næsten alt kan lade sig gøre. \
Hvilket problem vil du gerne løse?",
    )
}

/// User instruction for PRD generation, embedding the refined idea and a
/// flattened `role: content` rendering of the conversation.
pub fn prd_instruction(title: &str, description: &str, conversation: &Transcript) -> String {
    format!(
        "Create a PRD for the following idea.\nTitle: {title}\nDescription: {description}\n\
Conversation summary:\n{summary}",
        summary = flatten_transcript(conversation.messages()),
    )
}

fn flatten_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.author().as_str(), m.content()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refinement_prompt_includes_round_counter() {
        let prompt = refinement_system_prompt(3);
        assert!(prompt.contains("Nuværende samtale runde: 3/5"));
    }

    #[test]
    fn refinement_prompt_keeps_round_guidance() {
        let prompt = refinement_system_prompt(1);
        assert!(prompt.contains("Runde 1-2"));
        assert!(prompt.contains("Runde 3-4"));
        assert!(prompt.contains("Runde 5"));
        assert!(prompt.contains("VIGTIGE REGLER"));
    }

    #[test]
    fn greeting_instruction_embeds_suggestion() {
        let prompt = greeting_instruction("Refleks på jakker", "striber for sikkerhed");
        assert!(prompt.contains("\"Refleks på jakker\""));
        assert!(prompt.contains("striber for sikkerhed"));
    }

    #[test]
    fn fallback_greeting_matches_product_copy() {
        let greeting = fallback_greeting("Refleks på jakker", "striber for sikkerhed");
        assert!(greeting.starts_with("Hej! Jeg kan se, at du gerne vil arbejde med:"));
        assert!(greeting.ends_with("Hvilket problem vil du gerne løse?"));
    }

    #[test]
    fn prd_instruction_flattens_conversation() {
        let mut transcript = Transcript::new();
        transcript
            .append(ChatMessage::assistant("Hej! Hvad vil du løse?").unwrap())
            .unwrap();
        transcript
            .append(ChatMessage::submitter("Bedre sikkerhed", Vec::new()).unwrap())
            .unwrap();

        let prompt = prd_instruction("Titel", "Beskrivelse", &transcript);
        assert!(prompt.contains("Title: Titel"));
        assert!(prompt.contains("assistant: Hej! Hvad vil du løse?"));
        assert!(prompt.contains("user: Bedre sikkerhed"));
    }
}
