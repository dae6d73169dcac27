//! Crew performance rubric (5 points).
//!
//! - pilot certification or flight experience: 0..=3, whichever is higher
//! - recurrent training expired: -1
//! - trained ground crew: 0, 1 or 2 points for 0, 1 or 2+ members

use serde_json::json;

use sora_core::constants::{CREW_MAX_SCORE, CREW_PASSING_SCORE};
use sora_core::types::{CertificationType, CrewEvidence};

use crate::catalog::CheckKind;
use crate::compliance::types::{CheckContext, CheckResult, ObjectiveCheck};

pub struct CrewPerformanceCheck;

/// Point breakdown of the rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrewScore {
    pub experience: i32,
    pub training_penalty: i32,
    pub ground_crew: i32,
}

impl CrewScore {
    pub fn from_evidence(crew: &CrewEvidence) -> Self {
        let experience = certification_points(crew.pilot_certification)
            .max(flight_hour_points(crew.pilot_flight_hours));
        let training_penalty = if crew.recurrent_training_current { 0 } else { 1 };
        let ground_crew = match crew.trained_ground_crew {
            0 => 0,
            1 => 1,
            _ => 2,
        };
        Self {
            experience,
            training_penalty,
            ground_crew,
        }
    }

    /// Rubric total, floored at zero.
    pub fn total(&self) -> i32 {
        (self.experience - self.training_penalty + self.ground_crew).max(0)
    }
}

fn certification_points(certification: CertificationType) -> i32 {
    match certification {
        CertificationType::None => 0,
        CertificationType::Basic => 1,
        CertificationType::Intermediate => 2,
        CertificationType::Advanced => 3,
    }
}

fn flight_hour_points(hours: f64) -> i32 {
    if hours >= 100.0 {
        3
    } else if hours >= 50.0 {
        2
    } else if hours >= 10.0 {
        1
    } else {
        0
    }
}

impl ObjectiveCheck for CrewPerformanceCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::CrewPerformance
    }

    fn name(&self) -> &'static str {
        "Crew Performance"
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckResult {
        let crew = &ctx.operation.crew;
        let score = CrewScore::from_evidence(crew);
        let total = score.total();
        let confidence = f64::from(total) / f64::from(CREW_MAX_SCORE);
        let details = json!({
            "experience_points": score.experience,
            "training_penalty": score.training_penalty,
            "ground_crew_points": score.ground_crew,
            "total": total,
            "required": CREW_PASSING_SCORE,
        });

        if total >= CREW_PASSING_SCORE {
            return CheckResult::pass(
                confidence,
                format!("Crew rubric {total}/{CREW_MAX_SCORE}"),
            )
            .with_details(details);
        }

        let mut missing = Vec::new();
        if score.experience < 3 {
            missing.push(format!(
                "{}: advanced pilot certification or at least 100 flight hours",
                ctx.objective
            ));
        }
        if score.training_penalty > 0 {
            missing.push(format!("{}: current recurrent training", ctx.objective));
        }
        if score.ground_crew < 2 {
            missing.push(format!("{}: at least 2 trained ground crew members", ctx.objective));
        }

        CheckResult::fail(
            confidence,
            format!("Crew rubric {total}/{CREW_MAX_SCORE} below {CREW_PASSING_SCORE}"),
            missing,
        )
        .with_details(details)
    }
}
