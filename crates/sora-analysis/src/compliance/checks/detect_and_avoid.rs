//! Detect-and-avoid: strategic evidence at low air risk, tactical means above.

use serde_json::json;

use sora_core::constants::{DAA_MIN_VISUAL_OBSERVERS, DAA_MIN_WAYPOINTS, DAA_STRATEGIC_REQUIRED};

use crate::catalog::CheckKind;
use crate::compliance::types::{CheckContext, CheckResult, ObjectiveCheck};

pub struct DetectAndAvoidCheck;

impl DetectAndAvoidCheck {
    fn strategic(&self, ctx: &CheckContext<'_>) -> CheckResult {
        let flight = &ctx.operation.flight;
        let items = [
            ("pre-flight airspace analysis (NOTAM review)", flight.airspace_analysis),
            ("ATC coordination", flight.atc_coordination),
            (
                "waypoint-level flight plan (at least 2 waypoints)",
                flight.waypoints >= DAA_MIN_WAYPOINTS,
            ),
        ];

        let present = items.iter().filter(|(_, ok)| *ok).count();
        let missing: Vec<String> = items
            .iter()
            .filter(|(_, ok)| !*ok)
            .map(|(name, _)| format!("{}: {name}", ctx.objective))
            .collect();
        let confidence = present as f64 / items.len() as f64;
        let details = json!({
            "mode": "strategic",
            "arc": ctx.arc,
            "evidence_present": present,
            "evidence_required": DAA_STRATEGIC_REQUIRED,
        });

        if present >= DAA_STRATEGIC_REQUIRED {
            CheckResult::pass(
                confidence,
                format!(
                    "Strategic detect-and-avoid: {present}/{} evidence items at {}",
                    items.len(),
                    ctx.arc
                ),
            )
            .with_details(details)
        } else {
            CheckResult::fail(
                confidence,
                format!(
                    "Strategic detect-and-avoid: only {present}/{} evidence items at {} (need {DAA_STRATEGIC_REQUIRED})",
                    items.len(),
                    ctx.arc
                ),
                missing,
            )
            .with_details(details)
        }
    }

    fn tactical(&self, ctx: &CheckContext<'_>) -> CheckResult {
        let tactical_system = ctx
            .operation
            .active_mitigations()
            .find(|m| m.kind.is_air_tactical() || m.applies_to == ctx.objective);
        let observers = ctx.operation.crew.trained_visual_observers;
        let details = json!({
            "mode": "tactical",
            "arc": ctx.arc,
            "tactical_system": tactical_system.map(|m| m.kind.as_str()),
            "trained_visual_observers": observers,
        });

        if let Some(system) = tactical_system {
            CheckResult::pass(
                1.0,
                format!(
                    "Tactical detect-and-avoid at {}: {} active",
                    ctx.arc,
                    system.kind.as_str()
                ),
            )
            .with_details(details)
        } else if observers >= DAA_MIN_VISUAL_OBSERVERS {
            CheckResult::pass(
                1.0,
                format!(
                    "Tactical detect-and-avoid at {}: {observers} trained visual observers",
                    ctx.arc
                ),
            )
            .with_details(details)
        } else {
            CheckResult::fail(
                0.0,
                format!(
                    "No tactical detect-and-avoid means at {}: no active system and {observers} visual observers",
                    ctx.arc
                ),
                vec![format!(
                    "{}: active tactical detect-and-avoid system or at least {DAA_MIN_VISUAL_OBSERVERS} trained visual observers",
                    ctx.objective
                )],
            )
            .with_details(details)
        }
    }
}

impl ObjectiveCheck for DetectAndAvoidCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::DetectAndAvoid
    }

    fn name(&self) -> &'static str {
        "Detect and Avoid"
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckResult {
        if ctx.arc.is_low() {
            self.strategic(ctx)
        } else {
            self.tactical(ctx)
        }
    }
}
