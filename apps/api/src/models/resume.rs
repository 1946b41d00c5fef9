use serde::{Deserialize, Serialize};

/// Structured résumé as edited by a client. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal: PersonalInfo,
    pub summary: Option<String>,
    pub experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Skills,
    pub projects: Vec<Project>,
    pub achievements: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    pub gpa: Option<String>,
    pub honors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: Option<String>,
    pub github: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub business: Vec<String>,
    pub soft: Vec<String>,
    pub languages: Vec<String>,
    pub certifications: Vec<String>,
}

fn date_range(start: &str, end: Option<&str>, current: bool) -> String {
    let end = if current { "Present" } else { end.unwrap_or("") };
    format!("{start} - {end}")
}

/// Flattens structured résumé data into the plain-text layout the analyzer reads.
pub fn render_resume_text(data: &ResumeData) -> String {
    let mut lines: Vec<String> = Vec::new();
    let personal = &data.personal;

    lines.push(personal.full_name.clone());
    lines.push(personal.email.clone());
    if !personal.phone.is_empty() {
        lines.push(personal.phone.clone());
    }
    if !personal.location.is_empty() {
        lines.push(personal.location.clone());
    }
    if let Some(linkedin) = personal.linkedin.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("LinkedIn: {linkedin}"));
    }
    if let Some(github) = personal.github.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("GitHub: {github}"));
    }
    lines.push(String::new());

    if let Some(summary) = data.summary.as_deref().filter(|s| !s.is_empty()) {
        lines.push("PROFESSIONAL SUMMARY".to_string());
        lines.push(summary.to_string());
        lines.push(String::new());
    }

    if !data.experience.is_empty() {
        lines.push("PROFESSIONAL EXPERIENCE".to_string());
        for exp in &data.experience {
            lines.push(format!("{} at {}", exp.position, exp.company));
            lines.push(date_range(&exp.start_date, exp.end_date.as_deref(), exp.current));
            if !exp.description.is_empty() {
                lines.push(exp.description.clone());
            }
            lines.extend(exp.achievements.iter().map(|a| format!("• {a}")));
            lines.push(String::new());
        }
    }

    if !data.education.is_empty() {
        lines.push("EDUCATION".to_string());
        for edu in &data.education {
            lines.push(format!("{} in {}", edu.degree, edu.field));
            lines.push(edu.institution.clone());
            lines.push(date_range(&edu.start_date, edu.end_date.as_deref(), edu.current));
            if let Some(gpa) = edu.gpa.as_deref().filter(|s| !s.is_empty()) {
                lines.push(format!("GPA: {gpa}"));
            }
            lines.push(String::new());
        }
    }

    lines.push("SKILLS".to_string());
    let skill_lines = [
        ("Technical", &data.skills.technical),
        ("Business", &data.skills.business),
        ("Soft Skills", &data.skills.soft),
        ("Languages", &data.skills.languages),
        ("Certifications", &data.skills.certifications),
    ];
    for (label, skills) in skill_lines {
        if !skills.is_empty() {
            lines.push(format!("{label}: {}", skills.join(", ")));
        }
    }
    lines.push(String::new());

    if !data.projects.is_empty() {
        lines.push("PROJECTS".to_string());
        for project in &data.projects {
            lines.push(project.name.clone());
            if !project.description.is_empty() {
                lines.push(project.description.clone());
            }
            if !project.technologies.is_empty() {
                lines.push(format!("Technologies: {}", project.technologies.join(", ")));
            }
            lines.push(String::new());
        }
    }

    if let Some(achievements) = data.achievements.as_ref().filter(|a| !a.is_empty()) {
        lines.push("ACHIEVEMENTS".to_string());
        lines.extend(achievements.iter().map(|a| format!("• {a}")));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResumeData {
        ResumeData {
            personal: PersonalInfo {
                full_name: "Jane Doe".into(),
                email: "jane@example.com".into(),
                phone: "555-0100".into(),
                linkedin: Some("linkedin.com/in/jane".into()),
                ..Default::default()
            },
            summary: Some("Engineer focused on reliable systems.".into()),
            experience: vec![WorkExperience {
                company: "Acme".into(),
                position: "Backend Engineer".into(),
                start_date: "2021-01".into(),
                current: true,
                description: "Built billing APIs.".into(),
                achievements: vec!["Cut latency by 40%".into()],
                ..Default::default()
            }],
            skills: Skills {
                technical: vec!["Rust".into(), "PostgreSQL".into()],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_deserializes_sparse_camel_case_json() {
        let json = r#"{"personal":{"fullName":"Jane","jobTitle":"SRE"},"experience":[{"startDate":"2020-03"}]}"#;
        let data: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(data.personal.full_name, "Jane");
        assert_eq!(data.personal.job_title.as_deref(), Some("SRE"));
        assert_eq!(data.experience[0].start_date, "2020-03");
        assert!(data.skills.technical.is_empty());
        assert!(data.summary.is_none());
    }

    #[test]
    fn test_render_sections_in_order() {
        let text = render_resume_text(&sample());
        let summary = text.find("PROFESSIONAL SUMMARY").unwrap();
        let experience = text.find("PROFESSIONAL EXPERIENCE").unwrap();
        let skills = text.find("SKILLS\n").unwrap();
        assert!(summary < experience && experience < skills);
        assert!(text.contains("Backend Engineer at Acme\n2021-01 - Present\n"));
        assert!(text.contains("• Cut latency by 40%"));
        assert!(text.contains("Technical: Rust, PostgreSQL"));
        assert!(text.contains("LinkedIn: linkedin.com/in/jane"));
        assert!(!text.contains("EDUCATION"));
        assert!(!text.contains("PROJECTS"));
    }

    #[test]
    fn test_render_empty_resume_still_has_skills_heading() {
        let text = render_resume_text(&ResumeData::default());
        assert!(text.contains("SKILLS"));
        assert!(!text.contains("PROFESSIONAL EXPERIENCE"));
    }
}
