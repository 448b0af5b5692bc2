//! Template-based cover letter

use crate::processing::pipeline::MatchOutcome;

const RESUME_SNIPPET_CHARS: usize = 500;
const JD_SNIPPET_CHARS: usize = 300;

/// Render a cover letter from a match outcome
pub fn generate(outcome: &MatchOutcome) -> String {
    let result = &outcome.result;
    let jd_skills = join_or(result.jd_skills.iter(), "the listed requirements");
    let matched = join_or(result.matched_skills().iter(), "relevant skills");
    let missing = join_or(result.missing_skills.iter(), "none");
    let resume_snippet = snippet(&outcome.cleaned_resume, RESUME_SNIPPET_CHARS);
    let jd_snippet = snippet(&outcome.cleaned_jd, JD_SNIPPET_CHARS);

    format!(
        "Dear Hiring Manager,

I am writing to apply for the position you described. Based on the job description provided, you are looking for: {jd_skills}. The role as described: {jd_snippet}

My background includes experience with {matched}. A short summary of my experience: {resume_snippet}

I noticed the job mentions {jd_skills}. Skills I currently do not list on my resume are: {missing}. I am eager to learn and can quickly get up to speed on these.

I am excited about the opportunity and believe my experience would be a good match for this role.

Sincerely,
[Applicant Name]
"
    )
}

fn join_or<'a>(items: impl Iterator<Item = &'a String>, fallback: &str) -> String {
    let joined = items.map(String::as_str).collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        fallback.to_string()
    } else {
        joined
    }
}

/// First `max_chars` characters, with an ellipsis when cut
fn snippet(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
