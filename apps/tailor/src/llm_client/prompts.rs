// Prompt constants for the tailoring call.

/// System instruction for tailoring. The reply must be a JSON object with
/// exactly the keys `tailoredResume` and `explanation`.
pub const TAILOR_SYSTEM: &str = "\
You are an expert resume editor. Your task is to tailor the provided resume to match the given job description.
Analyze the job description to identify the key skills, experiences, and keywords it asks for.
Rewrite the resume to surface the matching skills and experience the candidate already has. Adjust phrasing and reorder sections where that helps.
Do NOT invent employers, titles, dates, degrees, metrics, or skills that are not supported by the original resume. Rephrasing is allowed; fabrication is not.
The tailored resume should be well-structured and readable, using Markdown for formatting (headings, bullet points, bold).
After tailoring the resume, explain the key changes you made and why, referencing the job description. The explanation should also be Markdown, preferably a bulleted list.
Respond with a JSON object containing exactly two keys: \"tailoredResume\" and \"explanation\". Both values must be Markdown strings.";

/// User turn template. Replace `{resume}` and `{job_description}` before sending.
pub const TAILOR_USER_TEMPLATE: &str = "Original Resume:\n{resume}\n\nJob Description:\n{job_description}";

pub fn build_user_message(resume: &str, job_description: &str) -> String {
    // Fill the job description first so a literal "{job_description}" inside
    // the resume text is left alone.
    TAILOR_USER_TEMPLATE
        .replace("{job_description}", job_description)
        .replacen("{resume}", resume, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_embeds_both_texts() {
        let msg = build_user_message("Jane Doe", "Rust Engineer");
        assert_eq!(
            msg,
            "Original Resume:\nJane Doe\n\nJob Description:\nRust Engineer"
        );
    }

    #[test]
    fn test_system_prompt_names_both_keys() {
        assert!(TAILOR_SYSTEM.contains("\"tailoredResume\""));
        assert!(TAILOR_SYSTEM.contains("\"explanation\""));
    }
}
