//! Action execution.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::services::{FormStateStore, NavigationController, RuntimeContext};
use crate::types::{Action, ActionVerb, FieldValue, SUBMISSIONS_CATEGORY};

/// Form-state key the `ai` verb reads its input text from.
pub const AI_PROMPT_FIELD: &str = "ai_prompt";

/// Form-state key the `ai` verb writes generated text into.
pub const AI_OUTPUT_FIELD: &str = "ai_output";

/// What an executed action did, reported back to the host.
///
/// Host-level verbs (`share`, `upload_file`, `download`, `process`)
/// come back as [`Delegated`](Self::Delegated): they are OS/presentation
/// operations the interpreter does not own.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// A screen was pushed.
    Navigated {
        /// The pushed screen id (unresolved; fallback happens at render).
        screen_id: String,
    },
    /// `go_back` ran; `moved` is false at the stack floor.
    WentBack {
        /// Whether a pop actually happened.
        moved: bool,
    },
    /// The form snapshot was persisted and cleared.
    Saved {
        /// Category the snapshot was written to.
        category: String,
        /// Id of the inserted row.
        row_id: String,
    },
    /// Generated text was written into the output field.
    Generated {
        /// The output field id.
        field: String,
        /// The generated text.
        text: String,
    },
    /// A value is ready for the host clipboard.
    Copied {
        /// The field the value came from.
        field: String,
        /// The copied text.
        text: String,
    },
    /// A host-level side effect; the interpreter takes no action.
    Delegated {
        /// The verb, verbatim.
        verb: String,
        /// The argument, verbatim.
        argument: String,
    },
    /// Unknown verb; logged and ignored.
    Ignored {
        /// The unrecognized verb.
        verb: String,
    },
}

/// Parses nothing, validates nothing twice: executes already-parsed
/// [`Action`]s against the runtime's state and collaborators.
///
/// Takes `&self` so multiple actions can be in flight concurrently; a
/// slow `save_form` never blocks a subsequent `navigate`. Results of
/// external calls are epoch-checked before being applied, so a
/// response that outlives its app instance is discarded instead of
/// corrupting the next one.
pub struct ActionExecutor {
    ctx: Arc<RuntimeContext>,
    form: Arc<FormStateStore>,
    nav: Arc<NavigationController>,
}

impl ActionExecutor {
    /// Create an executor bound to one runtime instance's state.
    #[must_use]
    pub fn new(
        ctx: Arc<RuntimeContext>,
        form: Arc<FormStateStore>,
        nav: Arc<NavigationController>,
    ) -> Self {
        Self { ctx, form, nav }
    }

    /// Execute one action.
    ///
    /// Collaborator errors are returned to the caller, never thrown
    /// across the render boundary, and never retried here.
    pub async fn execute(&self, action: &Action) -> CoreResult<ActionOutcome> {
        match &action.verb {
            ActionVerb::Navigate => {
                self.nav.navigate_to(&action.argument).await;
                Ok(ActionOutcome::Navigated {
                    screen_id: action.argument.clone(),
                })
            }
            ActionVerb::GoBack => Ok(ActionOutcome::WentBack {
                moved: self.nav.go_back().await,
            }),
            ActionVerb::SaveForm => self.save_form(&action.argument).await,
            ActionVerb::Ai => self.generate(&action.argument).await,
            ActionVerb::Copy => self.copy(&action.argument).await,
            ActionVerb::Share | ActionVerb::UploadFile | ActionVerb::Download
            | ActionVerb::Process => Ok(ActionOutcome::Delegated {
                verb: action.verb.as_str().to_string(),
                argument: action.argument.clone(),
            }),
            ActionVerb::Unknown(verb) => {
                log::warn!("ignoring unknown action verb: {verb}");
                Ok(ActionOutcome::Ignored { verb: verb.clone() })
            }
        }
    }

    /// Submit the form snapshot to the row store.
    ///
    /// On success the form is cleared; on failure it is retained so
    /// the user's input survives for a retry.
    async fn save_form(&self, category: &str) -> CoreResult<ActionOutcome> {
        let category = if category.is_empty() {
            SUBMISSIONS_CATEGORY
        } else {
            category
        };
        let epoch = self.ctx.epoch();
        let identity = self.ctx.identity().await;
        let snapshot = self.form.snapshot().await;
        let payload = serde_json::to_value(&snapshot)?;

        let row = match self
            .ctx
            .app_store()
            .insert(&identity, category, payload)
            .await
        {
            Ok(row) => row,
            Err(e) => {
                log::warn!("save_form to {category} failed, form state retained: {e}");
                return Err(e.into());
            }
        };

        if !self.ctx.is_current(epoch) {
            log::debug!("discarding save_form result for stale identity {identity}");
            return Err(CoreError::IdentityChanged);
        }

        self.form.clear().await;
        Ok(ActionOutcome::Saved {
            category: category.to_string(),
            row_id: row.id,
        })
    }

    /// Run the text-generation collaborator and store the result.
    async fn generate(&self, intent: &str) -> CoreResult<ActionOutcome> {
        let epoch = self.ctx.epoch();
        let snapshot = self.form.snapshot().await;
        let text = snapshot
            .get(AI_PROMPT_FIELD)
            .map(ToString::to_string)
            .unwrap_or_default();
        let context = serde_json::to_string(&snapshot)?;

        let generated = self
            .ctx
            .generator()
            .generate(intent, &text, &context)
            .await?;

        if !self.ctx.is_current(epoch) {
            log::debug!("discarding generation result for a stale app instance");
            return Err(CoreError::IdentityChanged);
        }

        self.form
            .set_field(AI_OUTPUT_FIELD, FieldValue::Text(generated.clone()))
            .await;
        Ok(ActionOutcome::Generated {
            field: AI_OUTPUT_FIELD.to_string(),
            text: generated,
        })
    }

    /// Hand a form value to the host clipboard.
    async fn copy(&self, field: &str) -> CoreResult<ActionOutcome> {
        let field = if field.is_empty() {
            AI_OUTPUT_FIELD
        } else {
            field
        };
        let text = self
            .form
            .get_field(field)
            .await
            .map(|value| value.to_string())
            .unwrap_or_default();
        Ok(ActionOutcome::Copied {
            field: field.to_string(),
            text,
        })
    }
}
