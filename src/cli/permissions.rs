use campusdesk_core::AppError;

use crate::state::AppState;

pub async fn handle_permissions(state: &AppState) -> Result<(), AppError> {
    state.load_permissions().await?;

    let context = state.permissions_context();
    let (Some(permissions), Some(user)) = (context.permissions(), context.user()) else {
        return Err(AppError::internal(anyhow::anyhow!("permissions were not loaded")));
    };

    println!("Role:                {}", user.role);
    if let Some(email) = &user.email {
        println!("Email:               {}", email);
    }
    match user.college_id {
        Some(id) => println!("Home college:        {}", id),
        None => println!("Home college:        -"),
    }
    println!("Can choose college:  {}", permissions.can_choose_college());
    println!("Can choose class:    {}", permissions.can_choose_class());
    println!("Can choose section:  {}", permissions.can_choose_section());

    Ok(())
}
