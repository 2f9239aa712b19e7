//! Prompt building for the remote report generator.

use crate::llm_client::GenerationRequest;

/// System instruction sent with every report request
pub const SYSTEM_PROMPT: &str = "You are an expert CS2 performance analyst.";

/// Render a K/D history as `[1.5, 1.8, 2.0]`
pub fn format_history(history: &[f64]) -> String {
    format!("{:?}", history)
}

/// Build the user prompt embedding the player's numbers
pub fn build_report_prompt(username: &str, kd: f64, hs_pct: f64, history: &[f64]) -> String {
    let mut s = String::new();
    s.push_str("You are a CS2 game analyst and must write a short report on a player's performance.\n");
    s.push_str(&format!("Player: {}\n", username));
    s.push_str(&format!("Stats: K/D: {:?}, HS%: {:?}%\n", kd, hs_pct));
    s.push_str(&format!("K/D history: {}\n", format_history(history)));
    s.push_str("The analysis must be short (3 sentences).\n");
    s
}

/// Full request for one report
pub fn report_request(username: &str, kd: f64, hs_pct: f64, history: &[f64]) -> GenerationRequest {
    GenerationRequest {
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_prompt: build_report_prompt(username, kd, hs_pct, history),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_history() {
        assert_eq!(format_history(&[1.5, 1.8, 2.0]), "[1.5, 1.8, 2.0]");
        assert_eq!(format_history(&[]), "[]");
    }

    #[test]
    fn test_prompt_embeds_player_numbers() {
        let prompt = build_report_prompt("Ivan", 2.0, 40.0, &[1.5, 1.8, 2.0]);
        assert!(prompt.contains("Player: Ivan"));
        assert!(prompt.contains("K/D: 2.0, HS%: 40.0%"));
        assert!(prompt.contains("K/D history: [1.5, 1.8, 2.0]"));
        assert!(prompt.contains("3 sentences"));
    }

    #[test]
    fn test_report_request_uses_system_prompt() {
        let request = report_request("Ivan", 1.25, 47.5, &[]);
        assert_eq!(request.system_prompt, SYSTEM_PROMPT);
        assert!(request.user_prompt.contains("K/D: 1.25, HS%: 47.5%"));
    }
}
