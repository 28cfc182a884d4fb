pub const PERSONA_PREAMBLE: &str = "You are a medical science liaison translating clinical and promotional updates \
     into clear, actionable insights for marketing, medical affairs, legal, and sales.";

pub const TONE_INSTRUCTION: &str = "Describe changes in a neutral, friendly tone highlighting compliance impact, \
     patient safety, and sales alignment.";

/// Build the summarization prompt. The mission context line is only included
/// when a non-empty context is supplied.
pub fn build_prompt(diff_text: &str, mission_context: Option<&str>) -> String {
    let mut sections = vec![PERSONA_PREAMBLE.to_string()];

    if let Some(context) = mission_context.filter(|c| !c.is_empty()) {
        sections.push(format!("Mission context: {}", context));
    }

    sections.push(TONE_INSTRUCTION.to_string());
    sections.push("Changes:".to_string());
    sections.push(diff_text.to_string());

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_ends_with_the_diff() {
        let prompt = build_prompt("-line2\n+line3", None);
        assert!(prompt.starts_with(PERSONA_PREAMBLE));
        assert!(prompt.ends_with("Changes:\n\n-line2\n+line3"));
    }

    #[test]
    fn mission_context_is_labeled_when_present() {
        let prompt = build_prompt("diff", Some("Q3 label update"));
        assert!(prompt.contains("Mission context: Q3 label update"));
    }

    #[test]
    fn empty_mission_context_is_omitted() {
        let prompt = build_prompt("diff", Some(""));
        assert!(!prompt.contains("Mission context"));
        assert_eq!(prompt, build_prompt("diff", None));
    }
}
