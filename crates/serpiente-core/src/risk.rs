//! Fuzzy risk inference for the safety perimeter.
//!
//! A 12-rule Mamdani engine over two inputs: the worker's distance to
//! the safety line (pixels, negative once crossed) and the approach
//! velocity (px/s, positive toward the line). Output is a risk
//! percentage in `0..=100`, defuzzified as the activation-weighted
//! average of the rule consequents. A detected phone multiplies the
//! base risk by 1.4 (capped below 100) because a distracted worker
//! reacts late.
//!
//! The production decision engine runs this inference server-side; the
//! monitoring head carries it so the simulated change feed can fabricate
//! payloads that follow plausible physics instead of uniform noise.

use serpiente_types::ActionKind;

/// Risk above which the engine orders a total stop.
pub const TOTAL_STOP_THRESHOLD: f64 = 85.0;

/// Risk above which the engine issues a warning.
pub const WARNING_THRESHOLD: f64 = 40.0;

/// Multiplier applied to the base risk when a phone is detected.
const PHONE_RISK_FACTOR: f64 = 1.4;

/// Ceiling for phone-amplified risk, kept strictly below 100 so the
/// distraction multiplier alone never reads as a physical catastrophe.
const PHONE_RISK_CEILING: f64 = 99.9;

/// Fuzzy inference inputs.
#[derive(Debug, Clone, Copy)]
pub struct RiskInput {
    /// Distance from the worker's midpoint to the safety line, in
    /// pixels. Negative means the line has been crossed.
    pub distance_px: f64,
    /// Approach velocity in px/s. Positive means moving toward the
    /// line, negative means retreating.
    pub velocity_px_s: f64,
    /// Whether the vision layer detected a phone in the worker's hand.
    pub phone_detected: bool,
}

/// Trapezoidal membership function over `[a, b, c, d]`.
///
/// Degenerate edges (`a == b` or `c == d`) clamp to full membership on
/// that side, which is how open-ended sets are expressed.
fn trapezoid(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    let rise = if b > a { (x - a) / (b - a) } else { 1.0 };
    let fall = if d > c { (d - x) / (d - c) } else { 1.0 };
    rise.min(1.0).min(fall).max(0.0)
}

/// Compute the risk percentage for the given inputs.
///
/// The result is always within `0.0..=100.0`.
pub fn infer_risk(input: &RiskInput) -> f64 {
    let dist = input.distance_px;
    let vel = input.velocity_px_s;

    // Fuzzification: distance sets.
    let d_critical = trapezoid(dist, -500.0, -500.0, 0.0, 30.0);
    let d_danger = trapezoid(dist, 20.0, 50.0, 80.0, 120.0);
    let d_safe = trapezoid(dist, 100.0, 200.0, 1000.0, 1000.0);

    // Fuzzification: velocity sets.
    let v_rushing = trapezoid(vel, 60.0, 100.0, 1000.0, 1000.0);
    let v_walking = trapezoid(vel, 5.0, 20.0, 40.0, 60.0);
    let v_still = trapezoid(vel, -15.0, -5.0, 5.0, 15.0);
    let v_leaving = trapezoid(vel, -1000.0, -1000.0, -30.0, -10.0);

    // Rule base: (activation, consequent risk).
    let rules = [
        // Critical distance block.
        (d_critical.min(v_rushing), 100.0),
        (d_critical.min(v_walking), 98.0),
        (d_critical.min(v_still), 95.0),
        (d_critical.min(v_leaving), 80.0),
        // Danger distance block.
        (d_danger.min(v_rushing), 90.0),
        (d_danger.min(v_walking), 65.0),
        (d_danger.min(v_still), 40.0),
        (d_danger.min(v_leaving), 20.0),
        // Safe distance block.
        (d_safe.min(v_rushing), 45.0),
        (d_safe.min(v_walking), 15.0),
        (d_safe.min(v_still), 5.0),
        (d_safe.min(v_leaving), 0.0),
    ];

    // Defuzzification: activation-weighted average.
    let numerator: f64 = rules.iter().map(|(w, risk)| w * risk).sum();
    let denominator: f64 = rules.iter().map(|(w, _)| w).sum();
    let base = if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    };

    if input.phone_detected {
        (base * PHONE_RISK_FACTOR).min(PHONE_RISK_CEILING)
    } else {
        base
    }
}

/// Map a computed risk to the safety action the engine would record.
///
/// Returns `None` when operation is nominal and nothing is worth
/// logging. A detected phone below the warning threshold still produces
/// an audit [`ActionKind::Log`] entry.
pub fn decide_action(risk: f64, phone_detected: bool) -> Option<(ActionKind, String)> {
    if risk > TOTAL_STOP_THRESHOLD {
        Some((ActionKind::TotalStop, format!("EMERGENCIA: riesgo {risk:.1}%")))
    } else if risk > WARNING_THRESHOLD {
        Some((ActionKind::Warning, format!("ALERTA: riesgo {risk:.1}%")))
    } else if phone_detected {
        Some((
            ActionKind::Log,
            String::from("Distracción detectada: operario con celular"),
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(distance_px: f64, velocity_px_s: f64, phone_detected: bool) -> f64 {
        infer_risk(&RiskInput {
            distance_px,
            velocity_px_s,
            phone_detected,
        })
    }

    #[test]
    fn far_and_leaving_is_harmless() {
        let r = risk(400.0, -50.0, false);
        assert!(r < 1.0, "expected near-zero risk, got {r}");
    }

    #[test]
    fn crossed_line_at_speed_is_catastrophic() {
        let r = risk(-50.0, 150.0, false);
        assert!(r > 99.0, "expected catastrophic risk, got {r}");
    }

    #[test]
    fn crossed_line_while_still_is_extreme() {
        let r = risk(-50.0, 0.0, false);
        assert!((90.0..=100.0).contains(&r), "got {r}");
    }

    #[test]
    fn danger_zone_walking_is_a_strong_warning() {
        let r = risk(65.0, 30.0, false);
        assert!((50.0..=80.0).contains(&r), "got {r}");
    }

    #[test]
    fn phone_amplifies_risk_but_stays_below_hundred() {
        let attentive = risk(65.0, 30.0, false);
        let distracted = risk(65.0, 30.0, true);
        assert!(distracted > attentive);
        assert!(distracted < 100.0);

        let worst = risk(-50.0, 150.0, true);
        assert!(worst < 100.0, "distraction alone must not read as 100, got {worst}");
    }

    #[test]
    fn risk_is_always_within_bounds() {
        for dist in [-600.0, -50.0, 0.0, 25.0, 65.0, 110.0, 300.0, 2000.0] {
            for vel in [-500.0, -20.0, 0.0, 10.0, 50.0, 120.0, 2000.0] {
                for phone in [false, true] {
                    let r = risk(dist, vel, phone);
                    assert!((0.0..=100.0).contains(&r), "({dist}, {vel}, {phone}) -> {r}");
                }
            }
        }
    }

    #[test]
    fn closer_is_never_safer_at_walking_pace() {
        let far = risk(300.0, 30.0, false);
        let near = risk(65.0, 30.0, false);
        let crossed = risk(-20.0, 30.0, false);
        assert!(far < near && near < crossed, "{far} {near} {crossed}");
    }

    #[test]
    fn decision_thresholds() {
        assert!(matches!(
            decide_action(97.0, false),
            Some((ActionKind::TotalStop, _))
        ));
        assert!(matches!(
            decide_action(55.0, false),
            Some((ActionKind::Warning, _))
        ));
        assert!(matches!(decide_action(10.0, true), Some((ActionKind::Log, _))));
        assert!(decide_action(10.0, false).is_none());
        // Boundary values do not trigger the higher tier.
        assert!(matches!(
            decide_action(WARNING_THRESHOLD, true),
            Some((ActionKind::Log, _))
        ));
    }
}
