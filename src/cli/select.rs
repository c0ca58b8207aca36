use campusdesk_core::AppError;
use campusdesk_models::ids::{ClassId, CollegeId, SectionId};
use dialoguer::Select;

use super::SelectArgs;
use crate::components::SelectorView;
use crate::state::AppState;

pub async fn handle_select(state: &AppState, args: SelectArgs) -> Result<(), AppError> {
    state.start_session().await?;

    if args.interactive {
        choose_interactively(state).await?;
    } else {
        apply_choices(state, &args).await?;
    }

    if args.json {
        let json = serde_json::to_string_pretty(&state.selection()).map_err(AppError::internal)?;
        println!("{}", json);
        return Ok(());
    }

    let toolbar = state.toolbar_view();
    if toolbar.is_empty() {
        println!("No context selectors are available for this user.");
    } else {
        println!("{}", toolbar);
    }
    Ok(())
}

/// Apply explicit `--college/--class/--section` choices, top-down.
///
/// A level can only be chosen when its selector is visible and the id is
/// one of its options.
pub async fn apply_choices(state: &AppState, args: &SelectArgs) -> Result<(), AppError> {
    let permissions = state.permissions_context();

    if let Some(id) = args.college {
        let view = state.toolbar.college.render(&permissions, &state.selection());
        ensure_choosable(view, "college", id)?;
        state
            .fetcher
            .choose_college(Some(CollegeId::new(id)))
            .await
            .map_err(AppError::fetch)?;
    }

    if let Some(id) = args.class {
        let view = state.toolbar.class.render(&permissions, &state.selection());
        ensure_choosable(view, "class", id)?;
        state
            .fetcher
            .choose_class(Some(ClassId::new(id)))
            .await
            .map_err(AppError::fetch)?;
    }

    if let Some(id) = args.section {
        let view = state.toolbar.section.render(&permissions, &state.selection());
        ensure_choosable(view, "section", id)?;
        state.fetcher.choose_section(Some(SectionId::new(id)));
    }

    Ok(())
}

fn ensure_choosable(view: Option<SelectorView>, level: &str, id: i64) -> Result<(), AppError> {
    let Some(view) = view else {
        return Err(AppError::validation(anyhow::anyhow!(
            "this user cannot choose a {}",
            level
        )));
    };

    if view.disabled {
        return Err(AppError::validation(anyhow::anyhow!(
            "cannot choose a {} yet: {}",
            level,
            view.placeholder
        )));
    }

    let value = id.to_string();
    if !view.options.iter().any(|o| o.value == value) {
        let available: Vec<String> = view
            .options
            .iter()
            .map(|o| format!("{} ({})", o.value, o.label))
            .collect();
        return Err(AppError::validation(anyhow::anyhow!(
            "{} {} is not available; options: {}",
            level,
            id,
            if available.is_empty() {
                "none".to_string()
            } else {
                available.join(", ")
            }
        )));
    }

    Ok(())
}

/// Prompt for each visible level in turn.
async fn choose_interactively(state: &AppState) -> Result<(), AppError> {
    let permissions = state.permissions_context();

    if let Some(view) = state.toolbar.college.render(&permissions, &state.selection())
        && let Some(index) = prompt(&view)?
        && let Some(id) = state.selection().colleges.get(index).map(|o| o.id)
    {
        state
            .fetcher
            .choose_college(Some(id))
            .await
            .map_err(AppError::fetch)?;
    }

    if let Some(view) = state.toolbar.class.render(&permissions, &state.selection())
        && let Some(index) = prompt(&view)?
        && let Some(id) = state.selection().classes.get(index).map(|o| o.id)
    {
        state
            .fetcher
            .choose_class(Some(id))
            .await
            .map_err(AppError::fetch)?;
    }

    if let Some(view) = state.toolbar.section.render(&permissions, &state.selection())
        && let Some(index) = prompt(&view)?
        && let Some(id) = state.selection().sections.get(index).map(|o| o.id)
    {
        state.fetcher.choose_section(Some(id));
    }

    Ok(())
}

/// Ask for one option of `view`; `None` when there is nothing to pick or
/// the prompt was dismissed.
fn prompt(view: &SelectorView) -> Result<Option<usize>, AppError> {
    if view.disabled || view.options.is_empty() {
        println!("{}", view);
        return Ok(None);
    }

    let labels: Vec<&str> = view.options.iter().map(|o| o.label.as_str()).collect();
    let current = view
        .value
        .as_ref()
        .and_then(|v| view.options.iter().position(|o| &o.value == v))
        .unwrap_or(0);

    Select::new()
        .with_prompt(view.label.as_str())
        .items(&labels)
        .default(current)
        .interact_opt()
        .map_err(AppError::internal)
}
