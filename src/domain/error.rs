use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A delegated command ran but exited unsuccessfully
    #[error("`{command}` terminou com {}", describe_code(.code))]
    CommandFailed { command: String, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "sinal".to_string(),
    }
}

/// Exit code the process should end with for a given failure.
///
/// Failed engine commands propagate their own status; everything else is 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<EngineError>())
        .and_then(|EngineError::CommandFailed { code, .. }| *code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}
