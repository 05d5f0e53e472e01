//! Roadmap Lookup
//!
//! Static, staged career-progression guides keyed by career id.
//! Unknown ids never fail: they get the generic template.

use super::types::{
    CareerRoadmap, CertificationRef, CourseRef, Importance, RoadmapNode, StageId,
};

/// Title used by the generic template
pub const GENERIC_CAREER_TITLE: &str = "Career Path";

/// Look up the roadmap for a career id. Total over all inputs.
pub fn lookup_roadmap(career_id: &str) -> CareerRoadmap {
    match career_id {
        "ml-engineer" => ml_engineer(),
        "product-manager" => product_manager(),
        _ => {
            log::debug!("[ENGINE] No dedicated roadmap for '{}', using template", career_id);
            generic(career_id)
        }
    }
}

fn ml_engineer() -> CareerRoadmap {
    CareerRoadmap {
        career_id: "ml-engineer".to_string(),
        career_title: "Machine Learning Engineer".to_string(),
        nodes: vec![
            RoadmapNode::new(StageId::Foundation, "Foundation", "Build your knowledge base")
                .with_duration("1-2 years")
                .with_items(&[
                    "Bachelor's in Computer Science, Mathematics, or related field",
                    "Master's degree (recommended) in ML/AI or Data Science",
                    "Strong foundation in linear algebra, calculus, and statistics",
                ]),
            RoadmapNode::new(StageId::Skills, "Key Skills", "Technical & soft skills to master")
                .with_duration("Ongoing")
                .with_items(&[
                    "Python, TensorFlow, PyTorch, Scikit-learn",
                    "Deep Learning, NLP, Computer Vision",
                    "Data preprocessing and feature engineering",
                    "Communication and problem-solving",
                ]),
            RoadmapNode::new(StageId::Entry, "Entry Level", "Your first roles in the field")
                .with_duration("1-3 years")
                .with_items(&[
                    "Junior ML Engineer",
                    "Data Scientist (ML focus)",
                    "ML Research Assistant",
                    "AI Software Developer",
                ]),
            RoadmapNode::new(StageId::Senior, "Career Progression", "Advanced roles & leadership")
                .with_duration("5+ years")
                .with_items(&[
                    "Senior ML Engineer",
                    "ML Architect",
                    "Principal Data Scientist",
                    "Director of AI/ML",
                ]),
        ],
        courses: vec![
            CourseRef::new("Machine Learning Specialization", "Coursera (Stanford)", "3 months"),
            CourseRef::new("Deep Learning Specialization", "deeplearning.ai", "4 months"),
            CourseRef::new("Fast.ai Practical Deep Learning", "Fast.ai", "2 months"),
        ],
        certifications: vec![
            CertificationRef::new("AWS Machine Learning Specialty", "Amazon Web Services", Importance::Recommended),
            CertificationRef::new("TensorFlow Developer Certificate", "Google", Importance::Recommended),
            CertificationRef::new("Azure AI Engineer Associate", "Microsoft", Importance::Optional),
        ],
    }
}

fn product_manager() -> CareerRoadmap {
    CareerRoadmap {
        career_id: "product-manager".to_string(),
        career_title: "Product Manager".to_string(),
        nodes: vec![
            RoadmapNode::new(StageId::Foundation, "Foundation", "Build your knowledge base")
                .with_duration("2-4 years")
                .with_items(&[
                    "Bachelor's in Business, Engineering, or related field",
                    "MBA (helpful but not required)",
                    "Understanding of technology and business fundamentals",
                ]),
            RoadmapNode::new(StageId::Skills, "Key Skills", "Technical & soft skills to master")
                .with_duration("Ongoing")
                .with_items(&[
                    "Product strategy and roadmapping",
                    "User research and data analysis",
                    "Agile/Scrum methodologies",
                    "Stakeholder management and communication",
                ]),
            RoadmapNode::new(StageId::Entry, "Entry Level", "Your first roles in the field")
                .with_duration("2-3 years")
                .with_items(&[
                    "Associate Product Manager",
                    "Product Analyst",
                    "Junior PM",
                    "Product Marketing Coordinator",
                ]),
            RoadmapNode::new(StageId::Senior, "Career Progression", "Advanced roles & leadership")
                .with_duration("5+ years")
                .with_items(&[
                    "Senior Product Manager",
                    "Director of Product",
                    "VP of Product",
                    "Chief Product Officer",
                ]),
        ],
        courses: vec![
            CourseRef::new("Product Management Certificate", "Product School", "2 months"),
            CourseRef::new("Digital Product Management", "Coursera (UVA)", "4 months"),
            CourseRef::new("Become a Product Manager", "Udemy", "1.5 months"),
        ],
        certifications: vec![
            CertificationRef::new("Certified Scrum Product Owner", "Scrum Alliance", Importance::Essential),
            CertificationRef::new("Product-Led Growth Certificate", "Pendo", Importance::Recommended),
            CertificationRef::new("PMP Certification", "PMI", Importance::Optional),
        ],
    }
}

fn generic(career_id: &str) -> CareerRoadmap {
    CareerRoadmap {
        career_id: career_id.to_string(),
        career_title: GENERIC_CAREER_TITLE.to_string(),
        nodes: vec![
            RoadmapNode::new(StageId::Foundation, "Foundation", "Build your knowledge base")
                .with_duration("2-4 years")
                .with_items(&[
                    "Relevant bachelor's degree",
                    "Industry certifications",
                    "Foundational skills development",
                ]),
            RoadmapNode::new(StageId::Skills, "Key Skills", "Technical & soft skills")
                .with_duration("Ongoing")
                .with_items(&[
                    "Technical expertise",
                    "Communication skills",
                    "Problem-solving abilities",
                    "Industry tools proficiency",
                ]),
            RoadmapNode::new(StageId::Entry, "Entry Level", "First roles in the field")
                .with_duration("1-3 years")
                .with_items(&[
                    "Junior/Associate positions",
                    "Internships",
                    "Entry-level specialist roles",
                ]),
            RoadmapNode::new(StageId::Senior, "Career Progression", "Advanced roles")
                .with_duration("5+ years")
                .with_items(&[
                    "Senior specialist",
                    "Team lead",
                    "Director/Manager",
                    "Executive roles",
                ]),
        ],
        courses: vec![
            CourseRef::new("Industry Fundamentals", "Coursera", "2 months"),
            CourseRef::new("Advanced Skills", "LinkedIn Learning", "3 months"),
        ],
        certifications: vec![CertificationRef::new(
            "Industry Certification",
            "Professional Body",
            Importance::Recommended,
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roadmap_has_canonical_stages() {
        let roadmap = lookup_roadmap("ml-engineer");
        assert_eq!(roadmap.career_id, "ml-engineer");
        assert_eq!(roadmap.career_title, "Machine Learning Engineer");
        assert_eq!(roadmap.stage_ids(), StageId::ORDER.to_vec());
        assert_eq!(roadmap.courses.len(), 3);
    }

    #[test]
    fn test_unknown_id_gets_template() {
        let roadmap = lookup_roadmap("not-a-real-id");
        assert_eq!(roadmap.career_id, "not-a-real-id");
        assert_eq!(roadmap.career_title, GENERIC_CAREER_TITLE);
        assert_eq!(roadmap.stage_ids(), StageId::ORDER.to_vec());
    }

    #[test]
    fn test_recommended_ids_without_roadmap_get_template() {
        // ux-designer is a real recommendation but has no dedicated roadmap
        let roadmap = lookup_roadmap("ux-designer");
        assert_eq!(roadmap.career_id, "ux-designer");
        assert_eq!(roadmap.career_title, GENERIC_CAREER_TITLE);
    }

    #[test]
    fn test_every_roadmap_has_four_ordered_stages() {
        for id in ["ml-engineer", "product-manager", "", "product-manager ", "ML-ENGINEER"] {
            let roadmap = lookup_roadmap(id);
            assert_eq!(roadmap.stage_ids(), StageId::ORDER.to_vec(), "id: {:?}", id);
            assert!(roadmap.nodes.iter().all(|n| !n.items.is_empty()));
        }
    }

    #[test]
    fn test_product_manager_certifications() {
        let roadmap = lookup_roadmap("product-manager");
        assert_eq!(roadmap.certifications[0].importance, Importance::Essential);
        assert_eq!(
            roadmap.nodes[3].items.last().map(String::as_str),
            Some("Chief Product Officer")
        );
    }
}
