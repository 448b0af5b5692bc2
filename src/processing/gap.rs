//! Skill gap analysis

use crate::processing::skills::SkillSet;

/// Skills the job description asks for that the resume lacks
pub fn gap(resume_skills: &SkillSet, jd_skills: &SkillSet) -> SkillSet {
    jd_skills.difference(resume_skills).cloned().collect()
}

/// Skills present on both sides
pub fn matched(resume_skills: &SkillSet, jd_skills: &SkillSet) -> SkillSet {
    jd_skills.intersection(resume_skills).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_gap_is_asymmetric() {
        let resume = set(&["python", "git", "docker"]);
        let jd = set(&["python", "machine learning"]);

        assert_eq!(gap(&resume, &jd), set(&["machine learning"]));
        assert_eq!(gap(&jd, &resume), set(&["docker", "git"]));
    }

    #[test]
    fn test_no_self_gap() {
        let skills = set(&["python", "sql", "rest api"]);
        assert!(gap(&skills, &skills).is_empty());
    }

    #[test]
    fn test_full_coverage() {
        let resume = set(&["python", "sql", "aws"]);
        let jd = set(&["python", "sql"]);
        assert!(gap(&resume, &jd).is_empty());
    }

    #[test]
    fn test_matched() {
        let resume = set(&["python", "git"]);
        let jd = set(&["python", "sql"]);
        assert_eq!(matched(&resume, &jd), set(&["python"]));
    }
}
