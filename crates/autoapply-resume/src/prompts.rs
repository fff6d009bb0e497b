//! Prompt texts for the resume optimizer.

/// System prompt for the free-text resume rewrite.
pub const IMPROVE_SYSTEM: &str = "You are an expert career coach and resume writer. \
Your task is to rewrite the given resume to be perfectly tailored for the provided \
job description. Analyze the job description to identify the key skills, experiences \
and keywords the hiring manager is looking for, then rewrite the resume integrating \
those keywords and aligning the experience with the job's requirements. Output only \
the full, improved resume text, with no introductory phrases.";

/// System prompt for the structured (ATS-friendly) rewrite. The response
/// must be a single JSON object matching the `TailoredResume` shape.
pub const OPTIMIZE_SYSTEM: &str = "You are an expert AI resume optimizer and ATS \
specialist. Rewrite the user's resume tailored to the given job description. \
Respond with ONLY a JSON object (no markdown fences, no commentary) with this \
shape: {\"full_name\": string, \"contact_line\": string|null, \"summary\": \
string|null, \"skills\": [string], \"experience\": [{\"heading\": string, \
\"subheading\": string|null, \"bullets\": [string]}], \"education\": \
[{\"heading\": string, \"subheading\": string|null, \"bullets\": [string]}]}";

/// System prompt for improvement suggestions. The response must be a JSON
/// array of strings.
pub const SUGGESTIONS_SYSTEM: &str = "You are an expert resume reviewer. Given a \
resume and a target job description, list the most impactful concrete changes the \
candidate should make. Respond with ONLY a JSON array of suggestion strings, \
ordered by impact, at most ten entries.";

/// User message combining the resume and the target job description.
pub fn user_message(resume_text: &str, job_description: &str) -> String {
    format!(
        "JOB DESCRIPTION:\n{job_description}\n\n---\n\nORIGINAL RESUME:\n{resume_text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_contains_both_inputs() {
        let msg = user_message("my resume", "the job");
        assert!(msg.contains("my resume"));
        assert!(msg.contains("the job"));
    }
}
