//! Static reference data offered by the questionnaire

use serde::Serialize;

/// Selectable interests
pub const INTERESTS: [&str; 10] = [
    "Coding",
    "Design",
    "Management",
    "Writing",
    "Data",
    "Research",
    "Marketing",
    "Sales",
    "Finance",
    "Healthcare",
];

/// Selectable highest qualifications
pub const QUALIFICATIONS: [&str; 5] = [
    "High School",
    "Bachelor's Degree",
    "Master's Degree",
    "PhD",
    "Professional Certification",
];

/// A future-plan option: stored value plus display label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FuturePlan {
    pub value: &'static str,
    pub label: &'static str,
}

pub const FUTURE_PLANS: [FuturePlan; 6] = [
    FuturePlan { value: "startup", label: "Start my own business" },
    FuturePlan { value: "remote", label: "Work remotely with flexibility" },
    FuturePlan { value: "research", label: "Pursue research & innovation" },
    FuturePlan { value: "leadership", label: "Lead and manage teams" },
    FuturePlan { value: "freelance", label: "Freelance & consult" },
    FuturePlan { value: "corporate", label: "Climb the corporate ladder" },
];

pub fn is_known_interest(interest: &str) -> bool {
    INTERESTS.contains(&interest)
}

pub fn future_plan_label(value: &str) -> Option<&'static str> {
    FUTURE_PLANS.iter().find(|p| p.value == value).map(|p| p.label)
}

/// Everything a questionnaire renderer needs, in one serializable bundle
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub interests: &'static [&'static str],
    pub qualifications: &'static [&'static str],
    pub future_plans: &'static [FuturePlan],
}

pub fn catalog() -> Catalog {
    Catalog {
        interests: &INTERESTS,
        qualifications: &QUALIFICATIONS,
        future_plans: &FUTURE_PLANS,
    }
}
