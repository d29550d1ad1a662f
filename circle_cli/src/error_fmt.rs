//! Human-readable error descriptions and structured JSON error formatting.

use crate::cli::LAST_SESSION;
use crate::trace::rejection_name;
use circle_core::error::{BuildError, CircleError, Rejection};

fn humanize_rejection(r: Rejection) -> String {
    match r {
        Rejection::TooSmall => "What happened: Too small. A sample landed closer to the center than the minimum radius.\nLikely causes: The circle was drawn too small, or [surface] center_x/center_y do not match where the trace was drawn.\nHow to fix: Draw a larger circle around the surface center, or lower session.min_radius.".to_string(),
        Rejection::NotCircle => "What happened: Not circle. The path turned back on itself instead of following an arc.\nLikely causes: A zig-zag or a sharp reversal in the stroke.\nHow to fix: Keep a steady curve; widen session.not_circle_band only if the input device is noisy.".to_string(),
        Rejection::TooSlow => "What happened: Too slow. The pointer did not move on within the allowed delay.\nLikely causes: The stroke paused, or samples arrived further apart than session.position_change_delay_ms.\nHow to fix: Draw in one continuous motion, or raise session.position_change_delay_ms.".to_string(),
        Rejection::NotCompleted => "What happened: Circle is not completed. The pointer was released before the loop closed.\nLikely causes: The stroke stopped short of the starting quadrant, or a quadrant was skipped.\nHow to fix: Go all the way around and return to where the trace started.".to_string(),
    }
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingCenter => {
                "What happened: No center was provided to the session.\nLikely causes: The session builder was not given a surface center.\nHow to fix: Set [surface] center_x/center_y in the config.".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. Run `circle self-check` to see the effective settings."
            ),
        };
    }

    if let Some(ce) = err.downcast_ref::<CircleError>() {
        return match ce {
            CircleError::Rejected(r) => humanize_rejection(*r),
            CircleError::Interrupted => "What happened: The run was interrupted.\nLikely causes: Ctrl-C was pressed while drawing.\nHow to fix: Start a new run.".to_string(),
            CircleError::Input(msg) => format!(
                "What happened: The input stream failed ({msg}).\nLikely causes: A malformed trace or a disconnected pointer device.\nHow to fix: Check the trace file or device, then rerun."
            ),
            CircleError::State(_) => format!(
                "What happened: {ce}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    // String-based heuristics for errors coming from config or file loading
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("trace csv must have headers") {
        return "Invalid headers in trace CSV. Expected 'event,x,y,t_ms'.".to_string();
    }

    if lower.contains("open trace csv") {
        return format!(
            "What happened: The trace file could not be opened.\nLikely causes: Wrong path or missing permissions.\nHow to fix: Check the --trace argument. Original: {msg}"
        );
    }

    if lower.contains("invalid csv row") || lower.contains("trace row") || lower.contains("non-decreasing") {
        return format!(
            "What happened: The trace file is malformed ({msg}).\nLikely causes: Unknown event names, missing coordinates, or timestamps going backwards.\nHow to fix: Each row must be event,x,y,t_ms with event in down|move|up|tick."
        );
    }

    if lower.contains("parse config") || lower.contains("config file") || lower.contains("session.") || lower.contains("surface.") || lower.contains("surface center") || lower.contains("logging.") {
        return format!(
            "What happened: Configuration is invalid or unreadable.\nLikely causes: A typo in the TOML or an out-of-range value.\nHow to fix: Edit the TOML config and try again. Detail: {msg}"
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Map rejections to stable exit codes; everything else exits with 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(CircleError::Rejected(r)) = err.downcast_ref::<CircleError>() {
        return match r {
            Rejection::TooSmall => 3,
            Rejection::NotCircle => 4,
            Rejection::TooSlow => 5,
            Rejection::NotCompleted => 6,
        };
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    if let Some(CircleError::Rejected(r)) = err.downcast_ref::<CircleError>() {
        let msg = humanize(err);
        let details = LAST_SESSION.get();

        let detail_obj = match r {
            Rejection::TooSmall => details.map(|s| json!({ "min_radius": s.min_radius })),
            Rejection::TooSlow => details.map(|s| {
                json!({
                    "position_change_delay_ms": s.position_change_delay_ms,
                    "tick_interval_ms": s.tick_interval_ms,
                })
            }),
            _ => None,
        };

        let obj = if let Some(d) = detail_obj {
            json!({ "reason": rejection_name(*r), "details": d, "message": msg })
        } else {
            json!({ "reason": rejection_name(*r), "message": msg })
        };
        return obj.to_string();
    }

    // Generic error JSON
    json!({ "reason": "Error", "message": humanize(err) }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_have_distinct_exit_codes() {
        let codes: Vec<i32> = [
            Rejection::TooSmall,
            Rejection::NotCircle,
            Rejection::TooSlow,
            Rejection::NotCompleted,
        ]
        .into_iter()
        .map(|r| exit_code_for_error(&eyre::Report::new(CircleError::Rejected(r))))
        .collect();
        assert_eq!(codes, vec![3, 4, 5, 6]);
        assert_eq!(exit_code_for_error(&eyre::eyre!("boom")), 1);
    }

    #[test]
    fn rejection_json_names_the_reason() {
        let err = eyre::Report::new(CircleError::Rejected(Rejection::NotCircle));
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&err)).unwrap();
        assert_eq!(v["reason"], "NotCircle");
        assert!(v["message"].as_str().unwrap().starts_with("What happened: Not circle"));
    }

    #[test]
    fn header_errors_get_a_short_hint() {
        let err = eyre::eyre!("trace CSV must have headers 'event,x,y,t_ms', got: a,b");
        assert!(humanize(&err).contains("Invalid headers"));
    }
}
