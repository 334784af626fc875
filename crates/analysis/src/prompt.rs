pub fn build_analysis_prompt(analysis_type: &str, text: &str) -> String {
    format!(
        r#"Analyze the following text for {analysis_type}:
Text: {text}

Please provide your analysis in the following format:

Summary of Analysis: [Provide a brief summary of your analysis]

Suggestions for Improvement:
Focus on these key areas:
1. Specificity: How can the text be more specific and detailed?
2. Unique Value: What unique features or benefits should be highlighted?
3. Target Audience: How can the language be better tailored to the intended audience?
4. Action Items: What specific changes would improve the text?

Overall Quality Score: [Provide a score from 0 to 1, where:
0.0-0.3: Needs significant improvement
0.4-0.6: Average, needs some refinement
0.7-0.8: Good, minor improvements needed
0.9-1.0: Excellent, minimal changes required]

Detailed Explanation: [Provide a detailed explanation of your analysis, including:
- Why each suggestion would improve the text
- How the suggestions align with the text's purpose
- Specific examples of how to implement the suggestions]

Please ensure your response follows this exact format with clear sections and a numerical score.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_inputs_verbatim() {
        let prompt = build_analysis_prompt("tone", "We sells  widgets!");

        assert!(prompt.starts_with("Analyze the following text for tone:"));
        assert!(prompt.contains("Text: We sells  widgets!"));
    }

    #[test]
    fn test_prompt_sections_in_order() {
        let prompt = build_analysis_prompt("grammar", "x");
        let positions: Vec<usize> = [
            "Summary of Analysis:",
            "Suggestions for Improvement:",
            "Overall Quality Score:",
            "Detailed Explanation:",
        ]
        .iter()
        .map(|section| prompt.find(section).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_prompt_lists_focus_areas_and_rubric() {
        let prompt = build_analysis_prompt("style", "x");

        for area in ["Specificity:", "Unique Value:", "Target Audience:", "Action Items:"] {
            assert!(prompt.contains(area), "missing focus area {area}");
        }
        for band in ["0.0-0.3", "0.4-0.6", "0.7-0.8", "0.9-1.0"] {
            assert!(prompt.contains(band), "missing rubric band {band}");
        }
    }
}
