// file: src/analyzer/prompts.rs
// description: instruction templates sent to the completion service

pub const SUMMARY_INSTRUCTIONS: &str = "Summarize this research paper content. Extract key findings, main contributions, research methodology, and results in bullet points:";

pub const GAP_ANALYSIS_INSTRUCTIONS: &str = "Identify the research limitations, gaps, potential future work, and unexplored opportunities in the following paper content:";

pub fn summary_prompt(content: &str) -> String {
    build(SUMMARY_INSTRUCTIONS, content)
}

pub fn gap_analysis_prompt(content: &str) -> String {
    build(GAP_ANALYSIS_INSTRUCTIONS, content)
}

fn build(instructions: &str, content: &str) -> String {
    format!("{}\n\n{}", instructions, content)
}
