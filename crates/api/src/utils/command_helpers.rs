//! Command execution helpers
//!
//! Every route handler runs its gateway call through [`execute_command`] so
//! timing and outcome logging stay uniform across the API.

use std::future::Future;
use std::time::Instant;

use linkpage_domain::Result as DomainResult;

use crate::error::ApiError;
use crate::utils::logging::log_command_execution;

/// Execute a command with timing and structured logging
///
/// # Example
///
/// ```rust,ignore
/// pub async fn list_links(
///     State(ctx): State<Arc<AppContext>>,
///     AuthSession(session): AuthSession,
/// ) -> Result<Json<Vec<Link>>, ApiError> {
///     execute_command("links::list_links", || ctx.gateway.list_links(&session))
///         .await
///         .map(Json)
/// }
/// ```
pub async fn execute_command<F, Fut, T>(command_name: &str, command_fn: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err());

    result.map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use linkpage_domain::LinkpageError;

    use super::*;

    #[tokio::test]
    async fn test_execute_command_passes_value_through() {
        let value = execute_command("test::ok", || async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_execute_command_wraps_domain_error() {
        let err = execute_command::<_, _, ()>("test::fail", || async {
            Err(LinkpageError::NotFound("profile".into()))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Domain(LinkpageError::NotFound(_))));
    }
}
