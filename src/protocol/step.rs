use serde::Deserialize;
use serde_json::Value;

/// One decoded step of the plan/action/observe/output protocol.
///
/// The model reply is a flat JSON object tagged by `step`; fields like
/// `function` and `input` are meaningful only for `action` steps, so the
/// record is classified into a variant eagerly rather than accessed ad hoc.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The model describes what it intends to do next.
    Plan { description: Option<String> },
    /// The model requests a tool invocation.
    Action { function: String, input: Value },
    /// The model delivers its final answer; terminal for the query.
    Output { description: Option<String> },
    /// The `step` tag is absent or not one of the known tags.
    Unrecognized { tag: Option<String> },
}

/// Raw decode of a model reply, before classification.
///
/// The protocol tolerates several alternative names for the same
/// human-readable description, so all of them are captured here and resolved
/// first-match-wins by [`RawStep::description`].
#[derive(Debug, Deserialize)]
pub struct RawStep {
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    plan: Option<PlanBody>,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub input: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PlanBody {
    #[serde(default)]
    description: Option<String>,
}

impl RawStep {
    /// Resolve the description field in priority order:
    /// `content`, `description`, `message`, `plan.description`, `result`.
    pub fn description(&self) -> Option<String> {
        self.content
            .clone()
            .or_else(|| self.description.clone())
            .or_else(|| self.message.clone())
            .or_else(|| self.plan.as_ref().and_then(|p| p.description.clone()))
            .or_else(|| self.result.clone())
    }

    /// Classify the record into its step variant.
    pub fn classify(self) -> Step {
        let tag = self.step.clone();
        match tag.as_deref() {
            Some("plan") => Step::Plan {
                description: self.description(),
            },
            Some("action") => Step::Action {
                function: self.function.unwrap_or_default(),
                input: self.input.unwrap_or(Value::Null),
            },
            Some("output") => Step::Output {
                description: self.description(),
            },
            _ => Step::Unrecognized { tag },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(raw: Value) -> Step {
        serde_json::from_value::<RawStep>(raw)
            .expect("valid raw step")
            .classify()
    }

    #[test]
    fn classify_plan_step() {
        let step = classify(json!({"step": "plan", "content": "I will create index.html"}));
        assert_eq!(
            step,
            Step::Plan {
                description: Some("I will create index.html".to_string())
            }
        );
    }

    #[test]
    fn classify_action_step() {
        let step = classify(json!({
            "step": "action",
            "function": "run_command",
            "input": "ls -la"
        }));
        assert_eq!(
            step,
            Step::Action {
                function: "run_command".to_string(),
                input: json!("ls -la"),
            }
        );
    }

    #[test]
    fn classify_output_step() {
        let step = classify(json!({"step": "output", "content": "Done"}));
        assert_eq!(
            step,
            Step::Output {
                description: Some("Done".to_string())
            }
        );
    }

    #[test]
    fn classify_missing_step_tag() {
        let step = classify(json!({"content": "no tag here"}));
        assert_eq!(step, Step::Unrecognized { tag: None });
    }

    #[test]
    fn classify_unknown_step_tag() {
        let step = classify(json!({"step": "reflect"}));
        assert_eq!(
            step,
            Step::Unrecognized {
                tag: Some("reflect".to_string())
            }
        );
    }

    #[test]
    fn description_prefers_content() {
        let step = classify(json!({
            "step": "plan",
            "content": "from content",
            "description": "from description",
            "message": "from message"
        }));
        assert_eq!(
            step,
            Step::Plan {
                description: Some("from content".to_string())
            }
        );
    }

    #[test]
    fn description_falls_back_to_nested_plan() {
        let step = classify(json!({
            "step": "plan",
            "plan": {"description": "nested plan text"}
        }));
        assert_eq!(
            step,
            Step::Plan {
                description: Some("nested plan text".to_string())
            }
        );
    }

    #[test]
    fn description_falls_back_to_result() {
        let step = classify(json!({"step": "output", "result": "all finished"}));
        assert_eq!(
            step,
            Step::Output {
                description: Some("all finished".to_string())
            }
        );
    }

    #[test]
    fn description_absent_when_no_field_matches() {
        let step = classify(json!({"step": "output"}));
        assert_eq!(step, Step::Output { description: None });
    }

    #[test]
    fn action_with_missing_function_defaults_to_empty_name() {
        let step = classify(json!({"step": "action", "input": "ls"}));
        assert_eq!(
            step,
            Step::Action {
                function: String::new(),
                input: json!("ls"),
            }
        );
    }
}
